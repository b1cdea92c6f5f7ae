//! Configuration type definitions

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::cursor::SystemCursor;

/// Input translation configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputConfig {
    /// Accept action code 3 as a relative move (pointer capture builds)
    #[serde(default)]
    pub accept_move_relative: bool,
}

/// Cursor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CursorConfig {
    /// Cursor backend ("platform", "hooks")
    #[serde(default = "default_backend")]
    pub backend: String,

    /// Cursor shown after start
    #[serde(default)]
    pub default_cursor: SystemCursor,

    /// PNG or BMP image installed as a custom cursor (None = system cursor)
    #[serde(default)]
    pub custom_image: Option<PathBuf>,

    /// Hotspot of the custom cursor
    #[serde(default)]
    pub hot_x: i32,

    /// Hotspot of the custom cursor
    #[serde(default)]
    pub hot_y: i32,

    /// Whether the platform offers pointer capture
    #[serde(default = "default_true")]
    pub relative_supported: bool,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            default_cursor: SystemCursor::Arrow,
            custom_image: None,
            hot_x: 0,
            hot_y: 0,
            relative_supported: true,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level ("trace", "debug", "info", "warn", "error")
    #[serde(default = "default_level")]
    pub level: String,

    /// Console format ("pretty", "compact", "json")
    #[serde(default = "default_format")]
    pub format: String,

    /// Log file (None = console only)
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
            log_file: None,
        }
    }
}

/// Focus window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Window id reported in events
    #[serde(default = "default_window_id")]
    pub id: u32,

    /// Width in pixels
    pub width: u32,

    /// Height in pixels
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            id: default_window_id(),
            width: 1920,
            height: 1080,
        }
    }
}

fn default_backend() -> String {
    "platform".to_string()
}

fn default_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "pretty".to_string()
}

fn default_window_id() -> u32 {
    1
}

fn default_true() -> bool {
    true
}
