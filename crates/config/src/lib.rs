//! Configuration schema, validation, and lookup for macrodeck.
//!
//! The three pure lookups the engine builds on live here next to the
//! types they operate over: binding resolution ([`Profile::resolve`]),
//! profile selection ([`Config::profile_for`]), and path-indexed
//! command-tree navigation ([`navigate`]).

use std::{
    env,
    path::{Path, PathBuf},
};

mod cursor;
mod error;
mod loader;
mod types;
mod validate;

#[cfg(test)]
mod test_parse;

pub use cursor::{Cursor, NavigationError, navigate};
pub use error::Error;
pub use loader::{load_from_path, load_from_str, save_to_path, to_json_string};
pub use types::{Binding, Command, CommandKind, Config, Operation, Profile, RadialMenuItem};
pub use validate::{Lint, validate};

/// Determine the preferred user config path (`~/.macrodeck/config.json`).
pub fn default_config_path() -> PathBuf {
    let mut p = PathBuf::from(env::var_os("HOME").unwrap_or_default());
    p.push(".macrodeck");
    p.push("config.json");
    p
}

/// Resolve the effective config path using the default policy.
///
/// Policy:
/// 1) Use `explicit` when provided.
/// 2) Else use `~/.macrodeck/config.json` when it exists.
/// 3) Else return a clear "no config found" error.
pub fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf, Error> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    let preferred = default_config_path();
    if preferred.exists() {
        return Ok(preferred);
    }

    Err(Error::Read {
        path: Some(preferred),
        message: "No config found. Create ~/.macrodeck/config.json or pass --config".to_string(),
    })
}
