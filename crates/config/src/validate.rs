//! Schema validation with field-path reporting.
//!
//! Violations abort with [`Error::Validation`] naming the exact field;
//! suspicious-but-legal constructs (shadowed duplicate bindings) come
//! back as [`Lint`]s for the caller to surface.

use std::collections::HashMap;

use macrodeck_protocol::{Action, BUTTON_COUNT, ENCODER_COUNT};

use crate::{
    Error,
    types::{Command, Config, Operation, Profile},
};

/// A non-fatal finding about a legal but questionable configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lint {
    /// Dotted/indexed path of the field the lint refers to.
    pub field: String,
    /// Human-readable description.
    pub message: String,
}

/// Validate a whole configuration document.
///
/// Returns the collected lints on success; the first schema violation
/// aborts with an error naming the offending field. A config that fails
/// validation must not be installed.
pub fn validate(cfg: &Config) -> Result<Vec<Lint>, Error> {
    let mut lints = Vec::new();
    // Sorted for deterministic lint ordering across runs.
    let mut names: Vec<&String> = cfg.profiles.keys().collect();
    names.sort();
    for name in names {
        let profile = &cfg.profiles[name];
        validate_profile(profile, &format!("profiles.{}", name), &mut lints)?;
    }
    Ok(lints)
}

fn validate_profile(profile: &Profile, field: &str, lints: &mut Vec<Lint>) -> Result<(), Error> {
    let mut first_seen: HashMap<&Action, usize> = HashMap::new();
    for (i, binding) in profile.bindings.iter().enumerate() {
        let base = format!("{}.bindings[{}]", field, i);
        validate_action(&binding.action, &format!("{}.action", base))?;
        validate_command(&binding.command, &format!("{}.command", base))?;

        if let Some(&first) = first_seen.get(&binding.action) {
            lints.push(Lint {
                field: base,
                message: format!(
                    "duplicate action is shadowed by bindings[{}] and never reachable",
                    first
                ),
            });
        } else {
            first_seen.insert(&binding.action, i);
        }
    }
    Ok(())
}

fn validate_action(action: &Action, field: &str) -> Result<(), Error> {
    match action {
        Action::ButtonPress { button } if *button >= BUTTON_COUNT => Err(Error::Validation {
            field: format!("{}.buttonPress.button", field),
            message: format!("button {} out of range (pad has {})", button, BUTTON_COUNT),
        }),
        Action::EncoderIncrement { id } | Action::EncoderDecrement { id }
            if *id >= ENCODER_COUNT =>
        {
            Err(Error::Validation {
                field: format!("{}.id", field),
                message: format!("encoder {} out of range (pad has {})", id, ENCODER_COUNT),
            })
        }
        _ => Ok(()),
    }
}

fn validate_command(command: &Command, field: &str) -> Result<(), Error> {
    if command.operations.is_some() && command.radial_menu_items.is_some() {
        // Rejected even when one side is empty: a command is one shape.
        return Err(Error::Validation {
            field: format!("{}.radialMenuItems", field),
            message: "command has both operations and radialMenuItems; set exactly one"
                .to_string(),
        });
    }
    if let Some(ops) = &command.operations {
        validate_operations(ops, &format!("{}.operations", field))?;
    }
    if let Some(items) = &command.radial_menu_items {
        for (i, item) in items.iter().enumerate() {
            validate_command(
                &item.command,
                &format!("{}.radialMenuItems[{}].command", field, i),
            )?;
        }
    }
    Ok(())
}

fn validate_operations(ops: &[Operation], field: &str) -> Result<(), Error> {
    for (i, op) in ops.iter().enumerate() {
        match op {
            Operation::KeyPress { key } | Operation::KeyTap { key } | Operation::KeyRelease { key } => {
                if key.is_empty() {
                    return Err(Error::Validation {
                        field: format!("{}[{}].key", field, i),
                        message: "key must not be empty".to_string(),
                    });
                }
            }
            Operation::Delay { .. } => {}
            Operation::Repeat { operations, .. } => {
                validate_operations(operations, &format!("{}[{}].repeat.operations", field, i))?;
            }
        }
    }
    Ok(())
}
