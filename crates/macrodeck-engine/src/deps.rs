//! Collaborator seams the engine invokes but does not implement.

use macrodeck_protocol::Point;
use thiserror::Error;

/// Failure reported by the injection host.
#[derive(Debug, Error, Clone)]
#[error("{0}")]
pub struct SinkError(pub String);

/// Keystroke-injection capability.
///
/// Implementations post synthetic key events to the focused
/// application. Calls are synchronous and fast; delays between effects
/// are the engine's job, not the sink's.
pub trait KeySink: Send + Sync {
    /// Post a key-down for `key`.
    fn key_down(&self, key: &str) -> Result<(), SinkError>;
    /// Post a key-up for `key`.
    fn key_up(&self, key: &str) -> Result<(), SinkError>;
    /// Post a down-then-up for `key`.
    fn key_tap(&self, key: &str) -> Result<(), SinkError>;
}

/// Provides the current pointer position, used as the center of a
/// freshly opened radial menu.
pub trait PointerSource: Send + Sync {
    /// Current pointer position in screen coordinates.
    fn position(&self) -> Point;
}
