//! testflow resolves test selections into runnable trees, threads them through
//! an ordered chain of two phase filters, runs them and aggregates their result
//! records. It also renders navigation menus over the known cases.
//!
//! Start with [`Dispatcher::new`] and a [`TestCatalog`].

pub mod catalog;
pub use catalog::{StaticCatalog, TestCatalog};

pub mod error;

pub mod ident;
pub use ident::TestIdentifier;

pub mod menu;

pub mod options;
pub use options::{FilterSpec, RunOptions};

pub mod outcome;

pub mod pipeline;

pub mod record;
pub use record::{ResultKind, ResultRecord, classify};

pub mod resolve;

pub mod stats;
pub use stats::{Stats, aggregate};


mod strategy;
pub use strategy::*;

mod dispatch;
pub use dispatch::*;

mod report;
pub use report::*;

#[cfg(test)]
mod test_support;
