#![warn(missing_docs)]

//! Shared logging helpers and CLI argument definitions for the
//! macrodeck workspace.

use std::env;

use clap::Args;
use tracing_subscriber::EnvFilter;

/// Logging controls for CLI apps.
#[derive(Debug, Clone, Args)]
pub struct LogArgs {
    /// Set global log level to trace (our crates only)
    #[arg(long, conflicts_with_all = ["debug", "log_level", "log_filter"])]
    pub trace: bool,

    /// Set global log level to debug (our crates only)
    #[arg(long, conflicts_with_all = ["trace", "log_level", "log_filter"])]
    pub debug: bool,

    /// Set a single global log level for our crates (error|warn|info|debug|trace)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Set an explicit tracing filter directive (overrides other flags)
    /// e.g. "macrodeck_engine=trace,config=debug"
    #[arg(long)]
    pub log_filter: Option<String>,
}

/// List of crate targets that constitute "our" logs.
pub fn our_crates() -> &'static [&'static str] {
    &[
        "macrodeck",
        "macrodeck_engine",
        "macrodeck_protocol",
        "config",
        "radial",
        "padhid",
        "logging",
    ]
}

/// Build a filter directive string that sets the same `level` for all of
/// our crates.
pub fn level_spec_for(level: &str) -> String {
    let lvl = level.to_ascii_lowercase();
    let parts: Vec<String> = our_crates().iter().map(|t| format!("{}={}", t, lvl)).collect();
    parts.join(",")
}

/// Compute the final filter spec string with precedence:
/// - `log_filter`
/// - `trace`/`debug`/`log_level` (crate-scoped)
/// - `RUST_LOG` env
/// - default to crate-scoped `info`
pub fn compute_spec(
    trace: bool,
    debug: bool,
    log_level: Option<&str>,
    log_filter: Option<&str>,
) -> String {
    if let Some(spec) = log_filter {
        return spec.to_string();
    }
    if trace {
        return level_spec_for("trace");
    }
    if debug {
        return level_spec_for("debug");
    }
    if let Some(lvl) = log_level {
        return level_spec_for(lvl);
    }
    if let Ok(spec) = env::var("RUST_LOG") {
        spec
    } else {
        level_spec_for("info")
    }
}

/// Create an `EnvFilter` from a spec string.
pub fn env_filter_from_spec(spec: &str) -> EnvFilter {
    EnvFilter::new(spec)
}

/// Install a compact fmt subscriber filtered by `spec`. Intended for
/// binary entrypoints; later calls are no-ops.
pub fn init(spec: &str) {
    let _ignored = tracing_subscriber::fmt()
        .with_env_filter(env_filter_from_spec(spec))
        .without_time()
        .compact()
        .try_init();
}
