//! Binding resolution and macro execution for the pad.
//!
//! The engine owns the live [`Config`] snapshot, the current focus
//! context, and at most one open radial menu session. Hardware actions
//! come in through [`Engine::dispatch`]; key effects go out through the
//! [`KeySink`] seam and UI updates through the notification channel.

mod error;
mod notification;
mod plan;
mod runner;

pub mod deps;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use config::{Command, CommandKind, Config, RadialMenuItem};
use macrodeck_protocol::{Action, App, Point, ipc::UiTx};
use parking_lot::Mutex;
use radial::{DEFAULT_DEAD_ZONE_RADIUS, MenuSession};
use tracing::debug;

pub use deps::{KeySink, PointerSource, SinkError};
pub use error::{Error, Result};
pub use notification::NotificationDispatcher;
pub use plan::expand;
pub use runner::{MacroPolicy, MacroRunner};

/// Tunables fixed at engine construction.
#[derive(Debug, Clone, Copy)]
pub struct EngineSettings {
    /// What to do with an action that arrives while a macro is running.
    pub policy: MacroPolicy,
    /// Radial menu dead-zone radius in pixels.
    pub dead_zone_radius: f32,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            policy: MacroPolicy::Queue,
            dead_zone_radius: DEFAULT_DEAD_ZONE_RADIUS,
        }
    }
}

/// Central dispatcher: resolves hardware actions against the active
/// profile and drives macro execution and radial menu sessions.
///
/// Cheap to clone; all state is shared behind `Arc`s.
#[derive(Clone)]
pub struct Engine {
    config: Arc<tokio::sync::RwLock<Config>>,
    focus: Arc<Mutex<App>>,
    menu: Arc<Mutex<Option<MenuSession>>>,
    runner: MacroRunner,
    notifier: NotificationDispatcher,
    pointer: Arc<dyn PointerSource>,
    dead_zone_radius: f32,
}

impl Engine {
    /// Build an engine around the given config, UI channel, and
    /// platform collaborators.
    pub fn new(
        config: Config,
        ui_tx: UiTx,
        sink: Arc<dyn KeySink>,
        pointer: Arc<dyn PointerSource>,
        settings: EngineSettings,
    ) -> Self {
        let notifier = NotificationDispatcher::new(ui_tx);
        Self {
            config: Arc::new(tokio::sync::RwLock::new(config)),
            focus: Arc::new(Mutex::new(App::default())),
            menu: Arc::new(Mutex::new(None)),
            runner: MacroRunner::new(sink, notifier.clone(), settings.policy),
            notifier,
            pointer,
            dead_zone_radius: settings.dead_zone_radius,
        }
    }

    /// Handle one hardware action from the pad.
    ///
    /// Looks up the profile for the currently focused application and
    /// resolves `action` against its bindings. No profile or no binding
    /// is a quiet no-op.
    pub async fn dispatch(&self, action: &Action) -> Result<()> {
        let app_name = self.focus.lock().app_name.clone();
        let command = {
            let cfg = self.config.read().await;
            let Some(profile) = cfg.profile_for(&app_name) else {
                debug!(app = %app_name, "no profile for focused app");
                return Ok(());
            };
            match profile.resolve(action) {
                Some(cmd) => cmd.clone(),
                None => {
                    debug!(app = %app_name, ?action, "no binding for action");
                    return Ok(());
                }
            }
        };
        self.run_command(&command)
    }

    /// Execute a resolved command: run a terminal command's macro, or
    /// open a radial menu for a menu command.
    fn run_command(&self, command: &Command) -> Result<()> {
        match command.kind() {
            CommandKind::Terminal(ops) => {
                debug!(command = %command.display_name, "run_macro");
                self.runner.submit(expand(ops));
                Ok(())
            }
            CommandKind::Menu(items) => self.open_menu(command, items.to_vec()),
        }
    }

    /// Open a radial menu centered on the current pointer position.
    /// Any previously open menu is closed first.
    fn open_menu(&self, command: &Command, items: Vec<RadialMenuItem>) -> Result<()> {
        let center = self.pointer.position();
        debug!(command = %command.display_name, sections = items.len(), "open_menu");
        let session = MenuSession::new(items, center, self.dead_zone_radius);
        let labels = session.labels();
        {
            let mut menu = self.menu.lock();
            if menu.take().is_some() {
                self.notifier.hide_menu()?;
            }
            *menu = Some(session);
        }
        self.notifier.show_menu(center, labels)
    }

    /// Conclude an open menu gesture at `release`.
    ///
    /// The menu always closes; whether the selected command runs
    /// depends on the hit-test. Releasing with no menu open is a no-op.
    pub fn on_menu_release(&self, release: Point) -> Result<()> {
        let Some(session) = self.menu.lock().take() else {
            return Ok(());
        };
        self.notifier.hide_menu()?;
        match session.resolve(release) {
            Some(item) => self.run_command(&item.command),
            None => {
                debug!("menu gesture cancelled");
                Ok(())
            }
        }
    }

    /// True while a radial menu session is open.
    pub fn menu_open(&self) -> bool {
        self.menu.lock().is_some()
    }

    /// Record a focus change and forward it to the UI.
    pub fn on_focus_changed(&self, app: App) -> Result<()> {
        debug!(app = %app.app_name, title = %app.title, "focus_changed");
        *self.focus.lock() = app.clone();
        self.notifier.send_focus(app)
    }

    /// Replace the live configuration.
    pub async fn set_config(&self, config: Config) {
        *self.config.write().await = config;
    }

    /// Serialize the live configuration as pretty JSON.
    pub async fn get_config(&self) -> Result<String> {
        let cfg = self.config.read().await;
        Ok(config::to_json_string(&cfg)?)
    }

    /// Parse, validate, and install a config document. On any error the
    /// previous configuration stays in effect.
    pub async fn save_config(&self, doc: &str) -> Result<()> {
        let parsed = config::load_from_str(doc, None)?;
        self.set_config(parsed).await;
        Ok(())
    }

    /// Wait until all submitted macros have finished.
    pub async fn wait_idle(&self) {
        self.runner.wait_idle().await;
    }
}
