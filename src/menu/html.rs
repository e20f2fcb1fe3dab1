use maud::{PreEscaped, html};

use crate::menu::{MenuFormat, join_path};

/// Nested `<ul>` lists linking to `?group=` and `?case=` selections.
///
/// Names and paths are escaped, nested levels are inserted as rendered.
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlMenu;

impl MenuFormat for HtmlMenu {
    fn group(&self, path: &str, name: &str, inner: &str) -> String {
        html! {
            li {
                a href={ "?group=" (path) } { (name) }
                (PreEscaped(inner))
            }
        }
        .into_string()
    }

    fn case(&self, name: &str, parent: &str) -> String {
        html! {
            li { a href={ "?case=" (join_path(parent, name)) } { (name) } }
        }
        .into_string()
    }

    fn wrap(&self, content: &str) -> String {
        html! { ul { (PreEscaped(content)) } }.into_string()
    }
}
