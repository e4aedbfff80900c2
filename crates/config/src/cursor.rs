//! Path-indexed navigation into a command tree.
//!
//! A path is an ordered list of small integers, one selection index per
//! menu level. Paths are validated step by step rather than cached as
//! node references, so a path that has gone stale against a reloaded
//! config fails with [`NavigationError`] instead of addressing the
//! wrong node.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Command, CommandKind};

/// Errors returned when a path cannot be walked against a command tree.
///
/// Never fatal: a navigation error means the caller's path is stale and
/// should be re-derived from the root.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum NavigationError {
    /// The path tried to index into a terminal command.
    #[error("command at depth {depth} is not a menu")]
    NotAMenu {
        /// Zero-based depth of the failing step.
        depth: usize,
    },
    /// The selection index does not exist at this level.
    #[error("index {index} out of range at depth {depth} (menu has {len} items)")]
    IndexOutOfRange {
        /// Zero-based depth of the failing step.
        depth: usize,
        /// The offending selection index.
        index: u32,
        /// Number of items the menu at this depth actually has.
        len: usize,
    },
}

/// Walk `path` from `root`, descending one radial-menu item per index.
///
/// The empty path returns `root` unchanged. Pure and idempotent: the
/// same `(root, path)` always yields the same command, which is what
/// makes breadcrumb/back-navigation correct without caching.
pub fn navigate<'a>(root: &'a Command, path: &[u32]) -> Result<&'a Command, NavigationError> {
    let mut current = root;
    for (depth, &index) in path.iter().enumerate() {
        let items = match current.kind() {
            CommandKind::Menu(items) => items,
            CommandKind::Terminal(_) => return Err(NavigationError::NotAMenu { depth }),
        };
        current = items
            .get(index as usize)
            .map(|item| &item.command)
            .ok_or(NavigationError::IndexOutOfRange {
                depth,
                index,
                len: items.len(),
            })?;
    }
    Ok(current)
}

/// Pointer into a command tree: the breadcrumb state kept by
/// configuration tooling. Uses the same indexing scheme [`navigate`]
/// validates, which guarantees the path you browsed to is the path the
/// engine executes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct Cursor {
    /// Indices into the parent menu's items for each descent step.
    path: Vec<u32>,
}

impl Cursor {
    /// Construct a cursor from an explicit path.
    pub fn new(path: Vec<u32>) -> Self {
        Self { path }
    }

    /// Logical depth equals the number of elements in the path (root = 0).
    pub fn depth(&self) -> usize {
        self.path.len()
    }

    /// Push an index step into the path.
    pub fn push(&mut self, idx: u32) {
        self.path.push(idx);
    }

    /// Pop a step from the path. Returns the popped index if any.
    pub fn pop(&mut self) -> Option<u32> {
        self.path.pop()
    }

    /// Clear the path, returning to root.
    pub fn clear(&mut self) {
        self.path.clear();
    }

    /// Borrow the immutable path for navigation/logging.
    pub fn path(&self) -> &[u32] {
        &self.path
    }

    /// Resolve this cursor against a root command.
    pub fn resolve<'a>(&self, root: &'a Command) -> Result<&'a Command, NavigationError> {
        navigate(root, &self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Operation, RadialMenuItem};

    fn leaf(name: &str) -> Command {
        Command::terminal(
            name,
            vec![Operation::KeyTap {
                key: name.to_string(),
            }],
        )
    }

    fn item(label: &str, command: Command) -> RadialMenuItem {
        RadialMenuItem {
            label: label.to_string(),
            command,
        }
    }

    /// Three-level menu where [1, 0, 2] addresses a known leaf.
    fn three_level_root() -> Command {
        let inner = Command::menu(
            "inner",
            vec![item("x", leaf("x")), item("y", leaf("y")), item("target", leaf("target"))],
        );
        let mid = Command::menu("mid", vec![item("inner", inner)]);
        Command::menu("root", vec![item("a", leaf("a")), item("mid", mid)])
    }

    #[test]
    fn empty_path_returns_root() {
        let root = three_level_root();
        let got = navigate(&root, &[]).unwrap();
        assert_eq!(got.display_name, "root");
    }

    #[test]
    fn deep_path_reaches_leaf() {
        let root = three_level_root();
        let got = navigate(&root, &[1, 0, 2]).unwrap();
        assert_eq!(got.display_name, "target");
    }

    #[test]
    fn out_of_range_final_index() {
        let root = three_level_root();
        let err = navigate(&root, &[1, 0, 3]).unwrap_err();
        assert_eq!(
            err,
            NavigationError::IndexOutOfRange {
                depth: 2,
                index: 3,
                len: 3
            }
        );
    }

    #[test]
    fn descending_into_terminal_fails() {
        let root = three_level_root();
        let err = navigate(&root, &[0, 0]).unwrap_err();
        assert_eq!(err, NavigationError::NotAMenu { depth: 1 });
    }

    #[test]
    fn empty_menu_rejects_any_index() {
        let root = Command::menu("empty", vec![]);
        let err = navigate(&root, &[0]).unwrap_err();
        assert_eq!(
            err,
            NavigationError::IndexOutOfRange {
                depth: 0,
                index: 0,
                len: 0
            }
        );
    }

    #[test]
    fn navigate_is_idempotent() {
        let root = three_level_root();
        let first = navigate(&root, &[1, 0, 2]).unwrap().clone();
        let second = navigate(&root, &[1, 0, 2]).unwrap();
        assert_eq!(&first, second);
    }

    #[test]
    fn cursor_tracks_depth() {
        let root = three_level_root();
        let mut cur = Cursor::default();
        assert_eq!(cur.depth(), 0);
        cur.push(1);
        cur.push(0);
        assert_eq!(cur.depth(), 2);
        assert_eq!(cur.resolve(&root).unwrap().display_name, "inner");
        assert_eq!(cur.pop(), Some(0));
        cur.clear();
        assert_eq!(cur.resolve(&root).unwrap().display_name, "root");
    }
}
