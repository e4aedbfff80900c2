//! Core configuration data types: the command tree and profile schema.

use std::collections::HashMap;

use macrodeck_protocol::Action;
use serde::{Deserialize, Serialize};

/// One step of a macro.
///
/// `Repeat` is eliminated during expansion; the other variants map
/// one-to-one onto device effects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operation {
    /// Press and hold a key.
    KeyPress {
        /// Key name understood by the injection host.
        key: String,
    },
    /// Press and release a key.
    KeyTap {
        /// Key name understood by the injection host.
        key: String,
    },
    /// Release a previously pressed key.
    KeyRelease {
        /// Key name understood by the injection host.
        key: String,
    },
    /// Pause before the next operation.
    Delay {
        /// Pause duration in milliseconds.
        ms: u64,
    },
    /// Run a sub-sequence a fixed number of times. `times: 0` runs
    /// zero iterations; it is not an error.
    Repeat {
        /// Total number of iterations contributed to the expansion.
        times: u32,
        /// The repeated sub-sequence.
        operations: Vec<Operation>,
    },
}

/// One entry of a radial menu. The command may itself be another menu,
/// to unbounded depth; items are owned by their parent command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RadialMenuItem {
    /// Label rendered in the menu section.
    pub label: String,
    /// Command executed (or opened) when this section is selected.
    pub command: Command,
}

/// A bound command: either a terminal operation sequence or a radial
/// menu of child commands.
///
/// On the wire at most one of `operations` / `radial_menu_items` is
/// present; both populated is a schema violation rejected by
/// [`crate::validate`]. Both absent means an empty terminal command
/// (a no-op).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Command {
    /// Human-readable name, presentation only.
    pub display_name: String,

    /// Terminal shape: the macro to execute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operations: Option<Vec<Operation>>,

    /// Menu shape: child commands selected by an angular gesture.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radial_menu_items: Option<Vec<RadialMenuItem>>,
}

/// Borrowed view distinguishing the two legal command shapes.
#[derive(Debug, Clone, Copy)]
pub enum CommandKind<'a> {
    /// A macro; the slice may be empty (no-op).
    Terminal(&'a [Operation]),
    /// A radial menu; the slice may be empty (nothing selectable).
    Menu(&'a [RadialMenuItem]),
}

impl Command {
    /// Classify this command. A command with neither field set is an
    /// empty terminal; both-set never survives validation and is
    /// treated as terminal here.
    pub fn kind(&self) -> CommandKind<'_> {
        match (&self.operations, &self.radial_menu_items) {
            (None, Some(items)) => CommandKind::Menu(items),
            (ops, _) => CommandKind::Terminal(ops.as_deref().unwrap_or(&[])),
        }
    }

    /// Construct a terminal command.
    pub fn terminal(display_name: impl Into<String>, operations: Vec<Operation>) -> Self {
        Self {
            display_name: display_name.into(),
            operations: Some(operations),
            radial_menu_items: None,
        }
    }

    /// Construct a menu command.
    pub fn menu(display_name: impl Into<String>, items: Vec<RadialMenuItem>) -> Self {
        Self {
            display_name: display_name.into(),
            operations: None,
            radial_menu_items: Some(items),
        }
    }
}

/// An (action, command) pair. A named struct rather than a tuple so
/// schema errors can point at the failing field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Binding {
    /// Hardware trigger.
    pub action: Action,
    /// Command executed when the trigger fires.
    pub command: Command,
}

/// Ordered bindings for one foreground application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Profile {
    /// Evaluated in listed order; the first action match wins.
    pub bindings: Vec<Binding>,
}

impl Profile {
    /// Find the command bound to `action`: ordered scan, structural
    /// equality, first match wins. `None` means "no binding", a
    /// defined no-op outcome rather than an error.
    pub fn resolve(&self, action: &Action) -> Option<&Command> {
        self.bindings
            .iter()
            .find(|b| &b.action == action)
            .map(|b| &b.command)
    }
}

/// The whole configuration document: profiles keyed by application name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Config {
    /// Application name → profile, exact-match selection.
    pub profiles: HashMap<String, Profile>,
}

impl Config {
    /// Select the profile for an application by exact name match.
    pub fn profile_for(&self, app_name: &str) -> Option<&Profile> {
        self.profiles.get(app_name)
    }
}
