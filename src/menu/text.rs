use crate::menu::{MenuFormat, join_path};

/// One `-group` or `-case` line per entry, each naming the full path.
///
/// The lines are ready to be passed on as command line selections.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextMenu;

impl MenuFormat for TextMenu {
    fn group(&self, path: &str, _name: &str, inner: &str) -> String {
        format!("-group {path}\n{inner}")
    }

    fn case(&self, name: &str, parent: &str) -> String {
        format!("-case {}\n", join_path(parent, name))
    }

    fn wrap(&self, content: &str) -> String {
        content.to_string()
    }
}
