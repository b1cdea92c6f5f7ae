//! Pointer trace replay
//!
//! Drives a [`MouseSubsystem`] from a recorded JSON-lines trace. Each line is
//! either a raw pointer event as delivered by the platform
//!
//! ```text
//! {"button_mask": 1, "action": 0, "x": 120.0, "y": 64.0}
//! ```
//!
//! or a control command
//!
//! ```text
//! {"command": "show_cursor", "visible": false}
//! ```
//!
//! Blank lines and lines starting with `#` are skipped. Translated events are
//! written to the output as JSON lines.

use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::cursor::{ActiveCursor, CursorBackend, HeadlessPlatform, Surface};
use crate::hooks::{HookRegistry, InputHooks};
use crate::input::{EventSink, MouseEvent, RawPointerEvent, Window};
use crate::subsystem::MouseSubsystem;

/// Control command embedded in a trace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum TraceCommand {
    /// Show or hide the pointer
    ShowCursor {
        /// Visibility
        visible: bool,
    },
    /// Toggle relative mode
    RelativeMode {
        /// Requested state
        enabled: bool,
    },
    /// Replace the focus window
    Window {
        /// Window id
        #[serde(default = "default_window_id")]
        id: u32,
        /// Width in pixels
        width: u32,
        /// Height in pixels
        height: u32,
    },
    /// Drop focus; pointer events are ignored until a window is set
    ClearWindow,
}

fn default_window_id() -> u32 {
    1
}

/// One trace line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TraceEntry {
    /// Control command
    Command(TraceCommand),
    /// Raw pointer event
    Pointer(RawPointerEvent),
}

/// Outcome of a replay
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplaySummary {
    /// Pointer events read from the trace
    pub pointer_events: u64,
    /// Commands read from the trace
    pub commands: u64,
    /// Events written to the output
    pub events_emitted: u64,
    /// Pointer events the translator ignored
    pub events_dropped: u64,
    /// Final pointer position
    pub final_position: (f32, f32),
}

/// Hooks that report every notification through `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingHooks;

impl InputHooks for LoggingHooks {
    fn on_show_mouse(&self, visible: bool) {
        info!(target: "droid_pointer::hooks", "show mouse: {}", visible);
    }

    fn on_mouse_move(&self, x: f32, y: f32) {
        debug!(target: "droid_pointer::hooks", "mouse move: {:.4}, {:.4}", x, y);
    }

    fn on_show_keyboard(&self, visible: bool) {
        info!(target: "droid_pointer::hooks", "show keyboard: {}", visible);
    }
}

/// Parse a trace from a reader
pub fn parse_trace(reader: impl BufRead) -> Result<Vec<TraceEntry>> {
    let mut entries = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.context("Failed to read trace")?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let entry = serde_json::from_str(line)
            .with_context(|| format!("Invalid trace entry on line {}", index + 1))?;
        entries.push(entry);
    }
    Ok(entries)
}

/// Load a trace file
pub fn load_trace(path: &Path) -> Result<Vec<TraceEntry>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open trace file: {}", path.display()))?;
    parse_trace(BufReader::new(file))
}

/// Load a PNG or BMP file as a cursor surface
pub fn load_cursor_image(path: &Path) -> Result<Surface> {
    let image = image::open(path)
        .with_context(|| format!("Failed to load cursor image: {}", path.display()))?;
    Ok(Surface::from_rgba_image(&image.to_rgba8()))
}

/// Build a subsystem over a headless platform as described by `config`.
///
/// The platform handle is returned so callers can inspect the cursor state.
pub fn build_subsystem<S: EventSink>(
    config: &Config,
    sink: S,
) -> Result<(MouseSubsystem<S>, Arc<Mutex<HeadlessPlatform>>)> {
    let backend = config.cursor_backend()?;
    let platform = Arc::new(Mutex::new(HeadlessPlatform::new(
        config.cursor.relative_supported,
    )));

    let hooks = Arc::new(HookRegistry::new());
    if backend == CursorBackend::Hooks {
        hooks.set_hooks(Arc::new(LoggingHooks));
    }

    let driver = backend.build(platform.clone(), hooks.clone());
    let subsystem = MouseSubsystem::new(config.translator_options(), driver, sink, hooks)
        .context("Failed to initialize mouse subsystem")?;

    let cursor = match &config.cursor.custom_image {
        Some(path) => {
            let surface = load_cursor_image(path)?;
            subsystem
                .create_cursor(&surface, config.cursor.hot_x, config.cursor.hot_y)
                .context("Failed to create custom cursor")?
        }
        None => subsystem
            .create_system_cursor(config.cursor.default_cursor)
            .context("Failed to create system cursor")?,
    };
    subsystem
        .set_cursor(&cursor)
        .context("Failed to install cursor")?;

    subsystem.set_window(Some(config.focus_window()));
    Ok((subsystem, platform))
}

/// Replay `entries`, writing translated events to `out`
pub fn run_replay<W: Write>(
    config: &Config,
    entries: &[TraceEntry],
    mut out: W,
) -> Result<ReplaySummary> {
    let (tx, rx) = crossbeam_channel::unbounded::<MouseEvent>();
    let (subsystem, platform) = build_subsystem(config, tx)?;

    let mut summary = ReplaySummary {
        pointer_events: 0,
        commands: 0,
        events_emitted: 0,
        events_dropped: 0,
        final_position: (0.0, 0.0),
    };

    for entry in entries {
        match entry {
            TraceEntry::Pointer(event) => {
                summary.pointer_events += 1;
                subsystem.on_mouse(*event)?;
            }
            TraceEntry::Command(command) => {
                summary.commands += 1;
                apply_command(&subsystem, command);
            }
        }

        for event in rx.try_iter() {
            serde_json::to_writer(&mut out, &event).context("Failed to encode event")?;
            writeln!(out).context("Failed to write event")?;
            summary.events_emitted += 1;
        }
    }
    out.flush().context("Failed to flush output")?;

    summary.events_dropped = subsystem.events_dropped();
    summary.final_position = subsystem.position();
    match platform.lock().active() {
        Some(ActiveCursor::Custom(id)) => debug!("Final cursor: custom {:?}", id),
        Some(ActiveCursor::System(id)) => debug!("Final cursor: {:?}", id),
        None => debug!("Final cursor: none"),
    }

    subsystem.shutdown();
    info!(
        "Replayed {} pointer events and {} commands: {} emitted, {} dropped",
        summary.pointer_events, summary.commands, summary.events_emitted, summary.events_dropped
    );
    Ok(summary)
}

fn apply_command<S: EventSink>(subsystem: &MouseSubsystem<S>, command: &TraceCommand) {
    debug!("Trace command {:?}", command);
    let result = match *command {
        TraceCommand::ShowCursor { visible } => subsystem.show_cursor(visible),
        TraceCommand::RelativeMode { enabled } => subsystem.set_relative_mode(enabled),
        TraceCommand::Window { id, width, height } => {
            subsystem.set_window(Some(Window::new(id, width, height)));
            Ok(())
        }
        TraceCommand::ClearWindow => {
            subsystem.set_window(None);
            Ok(())
        }
    };
    if let Err(e) = result {
        warn!("Trace command {:?} failed: {}", command, e);
    }
}
