//! Error types for configuration loading and validation.

use std::{
    cmp::{max, min},
    fmt::Write as _,
    path::{Path, PathBuf},
};

use thiserror::Error;

/// Errors produced while loading, parsing, or validating a configuration.
#[derive(Debug, Error, Clone)]
pub enum Error {
    /// I/O or filesystem error.
    #[error("{message}")]
    Read {
        /// Optional path associated with the read error.
        path: Option<PathBuf>,
        /// Human-readable error message.
        message: String,
    },
    /// JSON parse error with a concrete line/column location and excerpt.
    #[error("{message}")]
    Parse {
        /// Optional path associated with the parse error.
        path: Option<PathBuf>,
        /// 1-based line number.
        line: usize,
        /// 1-based column number.
        col: usize,
        /// Human-readable error message.
        message: String,
        /// Rendered excerpt including a caret at the error location.
        excerpt: String,
    },
    /// Schema violation, naming the field that failed.
    #[error("{field}: {message}")]
    Validation {
        /// Dotted/indexed path of the offending field, e.g.
        /// `profiles.Blender.bindings[2].command.radialMenuItems`.
        field: String,
        /// Human-readable error message.
        message: String,
    },
    /// Serialization failure while producing the config document.
    #[error("{message}")]
    Encode {
        /// Human-readable error message.
        message: String,
    },
}

impl Error {
    /// Render a human-friendly error message including location and an
    /// excerpt when available.
    pub fn pretty(&self) -> String {
        match self {
            Self::Read { path, message } => match path {
                Some(p) => format!("Read error at {}: {}", p.display(), message),
                None => format!("Read error: {}", message),
            },
            Self::Parse {
                path,
                line,
                col,
                message,
                excerpt,
            } => match path {
                Some(p) => format!(
                    "Config parse error at {}:{}:{}\n{}\n{}",
                    p.display(),
                    line,
                    col,
                    message,
                    excerpt
                ),
                None => format!(
                    "Config parse error at line {}, column {}\n{}\n{}",
                    line, col, message, excerpt
                ),
            },
            Self::Validation { field, message } => {
                format!("Config validation error at {}\n{}", field, message)
            }
            Self::Encode { message } => format!("Config encode error: {}", message),
        }
    }

    /// Access the optional path attached to this error.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Read { path, .. } | Self::Parse { path, .. } => path.as_deref(),
            Self::Validation { .. } | Self::Encode { .. } => None,
        }
    }
}

/// Build a small 2-3 line excerpt with a caret at `(line_no, col_no)`.
pub fn excerpt_at(source: &str, line_no: usize, col_no: usize) -> String {
    let lines: Vec<&str> = source.lines().collect();
    let total = lines.len();
    // serde_json reports EOF errors one line past the last line; clamp
    // so the caret still renders after the final line.
    let line_no = min(max(line_no, 1), max(total, 1));
    let start = max(1usize, line_no.saturating_sub(2));
    let end = min(max(total, 1), line_no + 1);

    let mut out = String::new();
    for n in start..=end {
        let text = lines.get(n - 1).copied().unwrap_or("");
        let _ignored = writeln!(out, " {:>4} | {}", n, text);
        if n == line_no {
            let prefix = format!(" {:>4} | ", n);
            let _ignored = writeln!(
                out,
                "{}{}^",
                " ".repeat(prefix.len()),
                " ".repeat(col_no.saturating_sub(1))
            );
        }
    }
    out
}
