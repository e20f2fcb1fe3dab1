//! Navigation menus over the test catalog.
//!
//! The [`MenuBuilder`] folds a flat list of qualified case identifiers into a
//! [`MenuTree`] keyed by path segment and renders it with a [`MenuFormat`].
//! Keys are kept sorted at every level, so the output does not depend on the
//! order identifiers are discovered in.
//!
//! The first segment of an identifier is its library. When the conventional
//! `tests.cases` infix follows it, the infix is folded into the library key
//! instead of becoming two more levels, so every rendered path is still a full
//! identifier:
//!
//! ```
//! # use testflow::{TestIdentifier, menu::MenuBuilder};
//! let ids: [TestIdentifier; 2] = [
//!     "lib.tests.cases.net.Socket".parse()?,
//!     "lib.tests.cases.Core".parse()?,
//! ];
//! let menu = MenuBuilder::new().build(&ids, "text").unwrap_or_default();
//! assert!(menu.contains("-group lib.tests.cases\n"));
//! assert!(menu.contains("-case lib.tests.cases.net.Socket\n"));
//! # Ok::<(), testflow::error::IdentifierError>(())
//! ```

use std::{collections::BTreeMap, str::FromStr};

use crate::{catalog::TestCatalog, error::UnknownMenuFormat, ident::TestIdentifier};

mod html;
pub use html::*;

mod text;
pub use text::*;

/// Sorted children of a menu level.
pub type MenuTree = BTreeMap<String, MenuNode>;

/// A node of the menu tree.
///
/// A leaf is a case, its name is the key it is stored under and its parent path
/// is the path leading to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuNode {
    Branch(MenuTree),
    Leaf,
}

/// How a menu is rendered.
pub trait MenuFormat {
    /// A group named `name` at `path`, containing the already rendered `inner` level.
    fn group(&self, path: &str, name: &str, inner: &str) -> String;

    /// A case named `name` below the group at `parent`.
    fn case(&self, name: &str, parent: &str) -> String;

    /// One rendered level.
    fn wrap(&self, content: &str) -> String;
}

/// The built in formats, by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuFormatKind {
    Html,
    Text,
}

impl FromStr for MenuFormatKind {
    type Err = UnknownMenuFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "html" => Ok(MenuFormatKind::Html),
            "text" | "txt" => Ok(MenuFormatKind::Text),
            other => Err(UnknownMenuFormat(other.to_string())),
        }
    }
}

/// Join a path and a segment, an empty path yields just the segment.
pub(crate) fn join_path(parent: &str, segment: &str) -> String {
    match parent.is_empty() {
        true => segment.to_string(),
        false => format!("{parent}.{segment}"),
    }
}

#[derive(Debug, Clone)]
pub struct MenuBuilder {
    infix: Vec<String>,
}

impl Default for MenuBuilder {
    fn default() -> Self {
        Self {
            infix: vec!["tests".to_string(), "cases".to_string()],
        }
    }
}

impl MenuBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the segments stripped after the library segment. An empty infix
    /// keeps identifiers as they are.
    pub fn with_infix<I, S>(self, infix: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            infix: infix.into_iter().map(Into::into).collect(),
        }
    }

    /// Render the identifiers located by `catalog`.
    pub fn menu<C: TestCatalog + ?Sized>(&self, catalog: &C, format: &str) -> Option<String> {
        self.build(&catalog.locate(), format)
    }

    /// Render `ids` in the named format.
    ///
    /// Returns `None` for a format that is not [`MenuFormatKind`].
    pub fn build<'i>(
        &self,
        ids: impl IntoIterator<Item = &'i TestIdentifier>,
        format: &str,
    ) -> Option<String> {
        let kind = match format.parse::<MenuFormatKind>() {
            Ok(kind) => kind,
            Err(err) => {
                tracing::debug!(%err, "not rendering menu");
                return None;
            }
        };

        let tree = self.tree(ids);
        Some(match kind {
            MenuFormatKind::Html => self.render_with(&tree, &HtmlMenu),
            MenuFormatKind::Text => self.render_with(&tree, &TextMenu),
        })
    }

    /// Fold `ids` into a sorted tree.
    ///
    /// Top level keys are library paths, `lib.tests.cases` for identifiers
    /// carrying the infix and just `lib` for the others. A case whose name is
    /// later needed as a group is promoted to an empty group. A case named like
    /// an existing group is dropped.
    pub fn tree<'i>(&self, ids: impl IntoIterator<Item = &'i TestIdentifier>) -> MenuTree {
        let mut tree = MenuTree::new();
        for id in ids {
            insert(&mut tree, &self.keyed_by_library(id.segments()));
        }
        tree
    }

    /// Render a tree, each library as its own top level group.
    pub fn render_with(&self, tree: &MenuTree, format: &impl MenuFormat) -> String {
        tree.iter()
            .map(|(path, node)| match node {
                MenuNode::Branch(children) => {
                    let library = path.split_once('.').map_or(path.as_str(), |(lib, _)| lib);
                    let inner = render_level(children, path, format);
                    format.wrap(&format.group(path, library, &inner))
                }
                MenuNode::Leaf => format.wrap(&format.case(path, "")),
            })
            .collect()
    }

    /// Split `segments` into the library path and the segments below it.
    ///
    /// The infix only counts when something follows it.
    fn keyed_by_library(&self, segments: &[String]) -> Vec<String> {
        let infix = self.infix.len();
        let has_infix = infix > 0
            && segments.len() > infix + 1
            && segments[1..=infix] == self.infix[..];

        let split = if has_infix { infix + 1 } else { 1 };
        let (library, rest) = segments.split_at(split.min(segments.len()));
        std::iter::once(library.join("."))
            .chain(rest.iter().cloned())
            .collect()
    }
}

fn insert(tree: &mut MenuTree, segments: &[String]) {
    let Some((head, rest)) = segments.split_first() else {
        return;
    };

    if rest.is_empty() {
        tree.entry(head.clone()).or_insert(MenuNode::Leaf);
        return;
    }

    let node = tree
        .entry(head.clone())
        .or_insert_with(|| MenuNode::Branch(MenuTree::new()));
    if let MenuNode::Leaf = node {
        tracing::trace!(name = %head, "promoting case to group");
        *node = MenuNode::Branch(MenuTree::new());
    }
    if let MenuNode::Branch(children) = node {
        insert(children, rest);
    }
}

fn render_level(children: &MenuTree, parent: &str, format: &impl MenuFormat) -> String {
    let content = children
        .iter()
        .map(|(key, node)| match node {
            MenuNode::Branch(grandchildren) => {
                let path = join_path(parent, key);
                let inner = render_level(grandchildren, &path, format);
                format.group(&path, &key.to_lowercase(), &inner)
            }
            MenuNode::Leaf => format.case(key, parent),
        })
        .collect::<String>();
    format.wrap(&content)
}
