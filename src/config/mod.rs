//! Configuration management
//!
//! Handles loading, validation, and merging of configuration from:
//! - TOML files
//! - CLI arguments

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::cursor::CursorBackend;
use crate::input::{TranslatorOptions, Window};

pub mod types;

pub use types::{CursorConfig, InputConfig, LoggingConfig, WindowConfig};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Input translation configuration
    #[serde(default)]
    pub input: InputConfig,
    /// Cursor configuration
    #[serde(default)]
    pub cursor: CursorConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Focus window configuration
    #[serde(default)]
    pub window: WindowConfig,
}

impl Config {
    /// Load configuration from file.
    ///
    /// The result is not validated; call [`validate`](Self::validate) once
    /// command-line overrides are applied.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path))?;

        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    /// Create default configuration
    pub fn default_config() -> Self {
        Config {
            input: InputConfig::default(),
            cursor: CursorConfig::default(),
            logging: LoggingConfig::default(),
            window: WindowConfig::default(),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.cursor_backend()?;

        if let Some(path) = &self.cursor.custom_image {
            if !path.exists() {
                anyhow::bail!("Cursor image not found: {:?}", path);
            }
        }

        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!("Invalid log level: {}", self.logging.level),
        }

        match self.logging.format.as_str() {
            "pretty" | "compact" | "json" => {}
            _ => anyhow::bail!("Invalid log format: {}", self.logging.format),
        }

        if self.window.width == 0 || self.window.height == 0 {
            anyhow::bail!(
                "Window size must be non-zero, got {}x{}",
                self.window.width,
                self.window.height
            );
        }

        Ok(())
    }

    /// Override config with CLI arguments
    pub fn with_overrides(
        mut self,
        backend: Option<String>,
        width: Option<u32>,
        height: Option<u32>,
    ) -> Self {
        if let Some(backend) = backend {
            self.cursor.backend = backend;
        }
        if let Some(width) = width {
            self.window.width = width;
        }
        if let Some(height) = height {
            self.window.height = height;
        }

        self
    }

    /// Parsed cursor backend
    pub fn cursor_backend(&self) -> Result<CursorBackend> {
        self.cursor
            .backend
            .parse::<CursorBackend>()
            .map_err(anyhow::Error::msg)
            .context("Invalid cursor backend")
    }

    /// Translator switches
    pub fn translator_options(&self) -> TranslatorOptions {
        TranslatorOptions {
            accept_move_relative: self.input.accept_move_relative,
        }
    }

    /// Focus window described by `[window]`
    pub fn focus_window(&self) -> Window {
        Window::new(self.window.id, self.window.width, self.window.height)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}
