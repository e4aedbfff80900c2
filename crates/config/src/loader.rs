//! Parse, validate, and persist the configuration document.

use std::{fs, path::Path};

use tracing::warn;

use crate::{Config, Error, error::excerpt_at, validate::validate};

/// Parse a config from its JSON text and validate it. Lints (shadowed
/// bindings and the like) are logged at `warn` and do not fail the load.
pub fn load_from_str(source: &str, path: Option<&Path>) -> Result<Config, Error> {
    let cfg: Config = serde_json::from_str(source).map_err(|e| Error::Parse {
        path: path.map(Path::to_path_buf),
        line: e.line(),
        col: e.column(),
        message: e.to_string(),
        excerpt: excerpt_at(source, e.line(), e.column()),
    })?;

    for lint in validate(&cfg)? {
        warn!(field = %lint.field, "{}", lint.message);
    }
    Ok(cfg)
}

/// Load and validate a config from a JSON file at `path`.
pub fn load_from_path(path: &Path) -> Result<Config, Error> {
    let source = fs::read_to_string(path).map_err(|e| Error::Read {
        path: Some(path.to_path_buf()),
        message: e.to_string(),
    })?;
    load_from_str(&source, Some(path))
}

/// Serialize a config to pretty-printed JSON, the stored document form.
pub fn to_json_string(cfg: &Config) -> Result<String, Error> {
    serde_json::to_string_pretty(cfg).map_err(|e| Error::Encode {
        message: e.to_string(),
    })
}

/// Validate and write a config to `path`, creating parent directories.
pub fn save_to_path(cfg: &Config, path: &Path) -> Result<(), Error> {
    let _lints = validate(cfg)?;
    let doc = to_json_string(cfg)?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|e| Error::Read {
            path: Some(dir.to_path_buf()),
            message: e.to_string(),
        })?;
    }
    fs::write(path, doc).map_err(|e| Error::Read {
        path: Some(path.to_path_buf()),
        message: e.to_string(),
    })
}
