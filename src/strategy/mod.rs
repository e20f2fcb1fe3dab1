pub mod filter;
pub mod panic;
pub mod reporter;
pub mod runner;
