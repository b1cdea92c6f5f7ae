//! Target window description

use serde::{Deserialize, Serialize};

/// Identifier of a window owned by the windowing subsystem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowId(pub u32);

impl std::fmt::Display for WindowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "window#{}", self.0)
    }
}

/// The window pointer events are delivered to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    /// Window id
    pub id: WindowId,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Window {
    /// Create a window description
    pub fn new(id: u32, width: u32, height: u32) -> Self {
        Self {
            id: WindowId(id),
            width,
            height,
        }
    }

    /// Clamp a position to the window bounds
    pub fn clamp(&self, x: f32, y: f32) -> (f32, f32) {
        let max_x = self.width.saturating_sub(1) as f32;
        let max_y = self.height.saturating_sub(1) as f32;
        (x.clamp(0.0, max_x), y.clamp(0.0, max_y))
    }

    /// Position as a fraction of the window size, `None` for an empty window
    pub fn normalize(&self, x: f32, y: f32) -> Option<(f32, f32)> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        Some((x / self.width as f32, y / self.height as f32))
    }
}
