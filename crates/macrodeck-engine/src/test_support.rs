//! Shared fakes for engine unit tests.

use parking_lot::Mutex;

use macrodeck_protocol::Point;

use crate::deps::{KeySink, PointerSource, SinkError};

/// Sink that records every call as `"down:x"` / `"up:x"` / `"tap:x"`,
/// optionally failing after a fixed number of successful calls.
#[derive(Default)]
pub struct RecordingSink {
    calls: Mutex<Vec<String>>,
    fail_after: Option<usize>,
}

impl RecordingSink {
    /// Sink that succeeds `n` times, then rejects every call.
    pub fn failing_after(n: usize) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_after: Some(n),
        }
    }

    /// Snapshot of recorded calls so far.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    fn record(&self, entry: String) -> Result<(), SinkError> {
        let mut calls = self.calls.lock();
        if let Some(limit) = self.fail_after {
            if calls.len() >= limit {
                return Err(SinkError("injection rejected".into()));
            }
        }
        calls.push(entry);
        Ok(())
    }
}

impl KeySink for RecordingSink {
    fn key_down(&self, key: &str) -> Result<(), SinkError> {
        self.record(format!("down:{key}"))
    }

    fn key_up(&self, key: &str) -> Result<(), SinkError> {
        self.record(format!("up:{key}"))
    }

    fn key_tap(&self, key: &str) -> Result<(), SinkError> {
        self.record(format!("tap:{key}"))
    }
}

/// Pointer source pinned to one position.
pub struct FixedPointer(pub Point);

impl PointerSource for FixedPointer {
    fn position(&self) -> Point {
        self.0
    }
}
