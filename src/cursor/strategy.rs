//! Cursor backend selection
//!
//! Picks which [`CursorDriver`] the mouse subsystem is built with.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::driver::{CursorDriver, PlatformCursorDriver};
use super::hooked::HookCursorDriver;
use super::platform::CursorPlatform;
use crate::hooks::HookRegistry;

/// Cursor backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CursorBackend {
    /// Platform pointer icons and pointer capture
    #[default]
    Platform,

    /// Embedder draws the pointer; visibility and motion go to hooks
    Hooks,
}

impl CursorBackend {
    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::Platform => "Platform pointer icons",
            Self::Hooks => "Embedder-drawn pointer via hooks",
        }
    }

    /// Build the driver for this backend
    pub fn build<P>(self, platform: P, hooks: Arc<HookRegistry>) -> Box<dyn CursorDriver>
    where
        P: CursorPlatform + 'static,
    {
        info!("Cursor backend: {}", self.description());
        match self {
            Self::Platform => Box::new(PlatformCursorDriver::new(platform)),
            Self::Hooks => Box::new(HookCursorDriver::new(hooks)),
        }
    }
}

impl std::fmt::Display for CursorBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Platform => write!(f, "Platform"),
            Self::Hooks => write!(f, "Hooks"),
        }
    }
}

impl std::str::FromStr for CursorBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "platform" | "system" | "native" => Ok(Self::Platform),
            "hooks" | "callbacks" | "embedder" => Ok(Self::Hooks),
            _ => Err(format!("Unknown cursor backend: {}", s)),
        }
    }
}
