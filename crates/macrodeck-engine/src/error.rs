use std::result::Result as StdResult;

use thiserror::Error;

/// Convenient result type for the engine crate.
pub type Result<T> = StdResult<T, Error>;

/// Unified error type for the macrodeck engine.
#[derive(Debug, Error)]
pub enum Error {
    /// Errors originating from configuration parsing or validation.
    #[error("Config error: {0}")]
    Config(#[from] config::Error),

    /// The UI event channel has been closed by the receiver.
    #[error("UI channel closed")]
    ChannelClosed,

    /// The device-effect sink rejected an injection.
    #[error("Sink error: {0}")]
    Sink(#[from] crate::deps::SinkError),
}
