//! Console binary for the macrodeck engine.
//!
//! `check` validates a configuration file, `show` inspects profiles and
//! command trees, and `simulate` drives the full engine from scripted
//! pad events without hardware attached.

use std::{
    path::{Path, PathBuf},
    process,
    sync::Arc,
};

use clap::{Parser, Subcommand};
use config::{Command as BoundCommand, CommandKind, Config};
use macrodeck_engine::{
    Engine, EngineSettings, KeySink, MacroPolicy, PointerSource, SinkError,
};
use macrodeck_protocol::{Action, App, Point, ipc};
use padhid::{PadState, decode_report};
use tracing::error;

#[derive(Parser, Debug)]
#[command(name = "macrodeck", about = "Per-application macropad dispatch engine", version)]
/// Command-line interface for the `macrodeck` binary.
struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    command: CliCommand,

    /// Logging controls
    #[command(flatten)]
    log: logging::LogArgs,

    /// Optional path to the config file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
/// Top-level CLI subcommands.
enum CliCommand {
    /// Load and validate the configuration then exit.
    Check {
        /// Path to configuration file to check (defaults to ~/.macrodeck/config.json)
        path: Option<String>,

        /// Dump the parsed configuration as JSON to stdout
        #[arg(long)]
        dump: bool,
    },

    /// Print profiles and bindings; descend into a command tree with --path.
    Show {
        /// Application profile to show (lists profile names when omitted)
        app: Option<String>,

        /// Binding index to descend into
        #[arg(long, requires = "app")]
        binding: Option<usize>,

        /// Comma-separated menu indices to navigate, e.g. "0,2,1"
        #[arg(long, value_name = "PATH", requires = "binding")]
        path: Option<String>,
    },

    /// Feed scripted pad events through the engine and print the results.
    ///
    /// Events: b<N> button press, e<N>+ / e<N>- encoder detent,
    /// r<X>,<Y> menu release at a screen point, x<HHHH> raw 2-byte report.
    Simulate {
        /// Application name treated as focused
        #[arg(long)]
        app: String,

        /// Pointer position used as menu center
        #[arg(long, value_name = "X,Y", default_value = "400,400")]
        pointer: String,

        /// Macro policy when events arrive mid-macro (queue|preempt)
        #[arg(long, default_value = "queue")]
        policy: String,

        /// Event script
        #[arg(required = true)]
        events: Vec<String>,
    },
}

/// One scripted event of a `simulate` run.
#[derive(Debug, Clone, PartialEq)]
enum SimEvent {
    /// A decoded hardware action.
    Action(Action),
    /// A radial menu release at a screen point.
    Release(Point),
    /// A raw 2-byte input report, decoded through the pad state machine.
    Report([u8; 2]),
}

/// Parse one event token of the simulate script.
fn parse_event(token: &str) -> Result<SimEvent, String> {
    if let Some(rest) = token.strip_prefix('b') {
        let button: u8 = rest
            .parse()
            .map_err(|_| format!("invalid button event: {token}"))?;
        return Ok(SimEvent::Action(Action::ButtonPress { button }));
    }
    if let Some(rest) = token.strip_prefix('e') {
        let (id_str, dir) = rest.split_at(rest.len().saturating_sub(1));
        let id: u8 = id_str
            .parse()
            .map_err(|_| format!("invalid encoder event: {token}"))?;
        return match dir {
            "+" => Ok(SimEvent::Action(Action::EncoderIncrement { id })),
            "-" => Ok(SimEvent::Action(Action::EncoderDecrement { id })),
            _ => Err(format!("invalid encoder direction: {token}")),
        };
    }
    if let Some(rest) = token.strip_prefix('r') {
        return Ok(SimEvent::Release(parse_point(rest)?));
    }
    if let Some(rest) = token.strip_prefix('x') {
        if rest.len() != 4 {
            return Err(format!("raw report needs 4 hex digits: {token}"));
        }
        let lo = u8::from_str_radix(&rest[0..2], 16)
            .map_err(|_| format!("invalid raw report: {token}"))?;
        let hi = u8::from_str_radix(&rest[2..4], 16)
            .map_err(|_| format!("invalid raw report: {token}"))?;
        return Ok(SimEvent::Report([lo, hi]));
    }
    Err(format!("unrecognized event: {token}"))
}

/// Parse an "X,Y" point.
fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y: {s}"))?;
    let x: f32 = x.trim().parse().map_err(|_| format!("invalid x: {s}"))?;
    let y: f32 = y.trim().parse().map_err(|_| format!("invalid y: {s}"))?;
    Ok(Point::new(x, y))
}

/// Parse a comma-separated menu path like "0,2,1". Empty means the root.
fn parse_menu_path(s: &str) -> Result<Vec<u32>, String> {
    if s.trim().is_empty() {
        return Ok(Vec::new());
    }
    s.split(',')
        .map(|part| {
            part.trim()
                .parse::<u32>()
                .map_err(|_| format!("invalid path index: {part}"))
        })
        .collect()
}

/// Sink that prints each injected effect to stdout.
struct PrintSink;

impl KeySink for PrintSink {
    fn key_down(&self, key: &str) -> Result<(), SinkError> {
        println!("key down  {key}");
        Ok(())
    }

    fn key_up(&self, key: &str) -> Result<(), SinkError> {
        println!("key up    {key}");
        Ok(())
    }

    fn key_tap(&self, key: &str) -> Result<(), SinkError> {
        println!("key tap   {key}");
        Ok(())
    }
}

/// Pointer pinned to the --pointer argument.
struct FixedPointer(Point);

impl PointerSource for FixedPointer {
    fn position(&self) -> Point {
        self.0
    }
}

/// One-line summary of a command's shape.
fn describe(cmd: &BoundCommand) -> String {
    match cmd.kind() {
        CommandKind::Terminal(ops) => {
            format!("\"{}\" (macro, {} ops)", cmd.display_name, ops.len())
        }
        CommandKind::Menu(items) => {
            format!("\"{}\" (menu, {} items)", cmd.display_name, items.len())
        }
    }
}

/// Human form of a binding trigger.
fn describe_action(action: &Action) -> String {
    match action {
        Action::ButtonPress { button } => format!("button {button}"),
        Action::EncoderIncrement { id } => format!("encoder {id} +"),
        Action::EncoderDecrement { id } => format!("encoder {id} -"),
    }
}

/// Resolve and load the configuration, exiting with a pretty error on
/// failure.
fn load_config(explicit: Option<&Path>) -> Config {
    let resolved = match config::resolve_config_path(explicit) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("{}", e.pretty());
            process::exit(1);
        }
    };
    match config::load_from_path(&resolved) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{}", e.pretty());
            process::exit(1);
        }
    }
}

/// `check` subcommand: validate, report lints, optionally dump JSON.
fn run_check(explicit: Option<&Path>, dump: bool) {
    let cfg = load_config(explicit);
    // load_from_path already validated; re-run for the lint report.
    match config::validate(&cfg) {
        Ok(lints) => {
            for lint in &lints {
                println!("warning: {}: {}", lint.field, lint.message);
            }
        }
        Err(e) => {
            eprintln!("{}", e.pretty());
            process::exit(1);
        }
    }
    if dump {
        match config::to_json_string(&cfg) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("{}", e.pretty());
                process::exit(1);
            }
        }
    } else {
        println!("OK");
    }
}

/// `show` subcommand: list profiles, bindings, or a navigated subtree.
fn run_show(
    explicit: Option<&Path>,
    app: Option<&str>,
    binding: Option<usize>,
    path: Option<&str>,
) {
    let cfg = load_config(explicit);

    let Some(app) = app else {
        let mut names: Vec<&String> = cfg.profiles.keys().collect();
        names.sort();
        for name in names {
            let count = cfg.profiles[name].bindings.len();
            println!("{name} ({count} bindings)");
        }
        return;
    };

    let Some(profile) = cfg.profile_for(app) else {
        eprintln!("no profile for {app}");
        process::exit(1);
    };

    let Some(index) = binding else {
        for (i, b) in profile.bindings.iter().enumerate() {
            println!("[{i}] {} -> {}", describe_action(&b.action), describe(&b.command));
        }
        return;
    };

    let Some(bound) = profile.bindings.get(index) else {
        eprintln!("binding index {index} out of range ({} bindings)", profile.bindings.len());
        process::exit(1);
    };

    let menu_path = match parse_menu_path(path.unwrap_or_default()) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };
    match config::navigate(&bound.command, &menu_path) {
        Ok(cmd) => {
            println!("{}", describe(cmd));
            if let CommandKind::Menu(items) = cmd.kind() {
                for (i, item) in items.iter().enumerate() {
                    println!("  [{i}] {} -> {}", item.label, describe(&item.command));
                }
            }
        }
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    }
}

/// `simulate` subcommand: run a scripted event sequence through the
/// engine, printing injected effects and UI messages.
fn run_simulate(
    explicit: Option<&Path>,
    app: &str,
    pointer: &str,
    policy: &str,
    events: &[String],
) {
    let cfg = load_config(explicit);
    let center = match parse_point(pointer) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };
    let policy = match policy {
        "queue" => MacroPolicy::Queue,
        "preempt" => MacroPolicy::Preempt,
        other => {
            eprintln!("unknown policy: {other} (expected queue or preempt)");
            process::exit(1);
        }
    };
    let script = match events
        .iter()
        .map(|t| parse_event(t))
        .collect::<Result<Vec<SimEvent>, String>>()
    {
        Ok(script) => script,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("failed to start runtime: {e}");
            process::exit(1);
        }
    };

    runtime.block_on(async move {
        let (tx, mut rx) = ipc::ui_channel();
        let engine = Engine::new(
            cfg,
            tx,
            Arc::new(PrintSink),
            Arc::new(FixedPointer(center)),
            EngineSettings {
                policy,
                ..EngineSettings::default()
            },
        );
        if let Err(e) = engine.on_focus_changed(App {
            title: app.to_string(),
            app_name: app.to_string(),
        }) {
            error!("focus update failed: {e}");
            return;
        }

        let mut pad = PadState::default();
        for event in script {
            let action = match event {
                SimEvent::Action(a) => Some(a),
                SimEvent::Release(point) => {
                    if let Err(e) = engine.on_menu_release(point) {
                        error!("release failed: {e}");
                    }
                    None
                }
                SimEvent::Report(report) => {
                    let (next, action) = decode_report(&pad, report);
                    pad = next;
                    action
                }
            };
            if let Some(action) = action
                && let Err(e) = engine.dispatch(&action).await
            {
                error!("dispatch failed: {e}");
            }
            engine.wait_idle().await;

            while let Ok(msg) = rx.try_recv() {
                match serde_json::to_string(&msg) {
                    Ok(json) => println!("ui: {json}"),
                    Err(e) => error!("serialize failed: {e}"),
                }
            }
        }
    });
}

fn main() {
    let cli = Cli::parse();

    let spec = logging::compute_spec(
        cli.log.trace,
        cli.log.debug,
        cli.log.log_level.as_deref(),
        cli.log.log_filter.as_deref(),
    );
    logging::init(&spec);

    let explicit = cli.config.as_deref();
    match &cli.command {
        CliCommand::Check { path, dump } => {
            let explicit = path.as_deref().map(Path::new).or(explicit);
            run_check(explicit, *dump);
        }
        CliCommand::Show { app, binding, path } => {
            run_show(explicit, app.as_deref(), *binding, path.as_deref());
        }
        CliCommand::Simulate {
            app,
            pointer,
            policy,
            events,
        } => {
            run_simulate(explicit, app, pointer, policy, events);
        }
    }
}
