//! Shared boundary types for the macrodeck workspace.
//!
//! Everything that crosses a process- or collaborator-boundary lives here:
//! the hardware [`Action`] type, the focus snapshot [`App`], screen
//! geometry ([`Point`]), and the outbound UI message enum [`MsgToUI`].

use serde::{Deserialize, Serialize};

/// Number of buttons on the pad.
pub const BUTTON_COUNT: u8 = 12;

/// Number of rotary encoders on the pad.
pub const ENCODER_COUNT: u8 = 1;

/// A discrete hardware input event produced by the pad.
///
/// Exactly one variant is ever populated; decode boundaries that may have
/// nothing to report use `Option<Action>` rather than a sentinel variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Action {
    /// A button transitioned from released to pressed.
    ButtonPress {
        /// Button index, `0..BUTTON_COUNT`.
        button: u8,
    },
    /// An encoder turned one detent clockwise.
    EncoderIncrement {
        /// Encoder index, `0..ENCODER_COUNT`.
        id: u8,
    },
    /// An encoder turned one detent counter-clockwise.
    EncoderDecrement {
        /// Encoder index, `0..ENCODER_COUNT`.
        id: u8,
    },
}

/// A point in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate in pixels.
    pub x: f32,
    /// Vertical coordinate in pixels (down is positive, screen convention).
    pub y: f32,
}

impl Point {
    /// Construct a point from parts.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Focused application context, as reported by the window tracker.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct App {
    /// Window title of the focused window.
    pub title: String,
    /// Application name used to select the active profile.
    pub app_name: String,
}

/// One device-level effect of an expanded macro.
///
/// This is what the injection sink consumes: `Repeat` never appears
/// here, it is eliminated during expansion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeviceEffect {
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
    /// Pause before the next effect.
    Delay {
        /// Pause duration in milliseconds.
        ms: u64,
    },
}

/// Severity of a notification sent to the UI layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotifyKind {
    /// Informational message.
    Info,
    /// Something went wrong but the engine keeps running.
    Warn,
    /// An operation failed.
    Error,
}

/// Messages sent from the engine to UI clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum MsgToUI {
    /// Open the radial menu overlay at `location` with one label per
    /// angular section, section 0 at twelve o'clock, clockwise.
    ShowRadialMenu {
        /// Menu center in screen coordinates.
        location: Point,
        /// Section labels in section order.
        labels: Vec<String>,
    },

    /// Close the radial menu overlay.
    HideRadialMenu,

    /// The focused window changed; shown in the console header.
    FocusUpdate(App),

    /// Notification request for the UI.
    Notify {
        /// Severity of the notification.
        kind: NotifyKind,
        /// Short title.
        title: String,
        /// Body text.
        text: String,
    },
}

/// Channel aliases for the engine → UI event stream.
pub mod ipc {
    use super::MsgToUI;

    /// Tokio unbounded sender for UI messages.
    pub type UiTx = tokio::sync::mpsc::UnboundedSender<MsgToUI>;
    /// Tokio unbounded receiver for UI messages.
    pub type UiRx = tokio::sync::mpsc::UnboundedReceiver<MsgToUI>;

    /// Create a standard unbounded UI channel (sender, receiver).
    pub fn ui_channel() -> (UiTx, UiRx) {
        tokio::sync::mpsc::unbounded_channel::<MsgToUI>()
    }
}
