use macrodeck_protocol::{App, MsgToUI, NotifyKind, Point, ipc::UiTx};
use tracing::info;

use crate::{Error, Result};

/// Sends menu lifecycle events and notifications to the UI layer.
#[derive(Clone)]
pub struct NotificationDispatcher {
    tx: UiTx,
}

impl NotificationDispatcher {
    /// Create a new dispatcher from a UI message channel.
    pub fn new(tx: UiTx) -> Self {
        Self { tx }
    }

    /// Ask the UI to open the radial menu overlay.
    pub fn show_menu(&self, location: Point, labels: Vec<String>) -> Result<()> {
        self.tx
            .send(MsgToUI::ShowRadialMenu { location, labels })
            .map_err(|_| Error::ChannelClosed)
    }

    /// Ask the UI to close the radial menu overlay.
    pub fn hide_menu(&self) -> Result<()> {
        self.tx
            .send(MsgToUI::HideRadialMenu)
            .map_err(|_| Error::ChannelClosed)
    }

    /// Forward a focus change to the UI.
    pub fn send_focus(&self, app: App) -> Result<()> {
        self.tx
            .send(MsgToUI::FocusUpdate(app))
            .map_err(|_| Error::ChannelClosed)
    }

    /// Send a notification with the given kind, title, and text.
    pub fn send_notification(&self, kind: NotifyKind, title: String, text: String) -> Result<()> {
        // Log every notification display for traceability, regardless of kind.
        info!(kind = ?kind, title = %title, text = %text, "notification_display");
        self.tx
            .send(MsgToUI::Notify { kind, title, text })
            .map_err(|_| Error::ChannelClosed)
    }

    /// Convenience helper to send an error notification.
    pub fn send_error(&self, title: &str, text: String) -> Result<()> {
        self.send_notification(NotifyKind::Error, title.to_string(), text)
    }
}
