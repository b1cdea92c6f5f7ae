//! Platform cursor services
//!
//! On device these calls cross into Java (`PointerIcon`, pointer capture).
//! [`HeadlessPlatform`] keeps the same bookkeeping in-process for tools and
//! tests.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::surface::ArgbImage;

/// Id of a custom cursor allocated by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomCursorId(pub u32);

/// Platform-provided cursor shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemCursor {
    /// Arrow
    #[default]
    Arrow,
    /// I-beam
    IBeam,
    /// Wait
    Wait,
    /// Crosshair
    Crosshair,
    /// Small wait cursor (or wait if not available)
    WaitArrow,
    /// Double arrow pointing northwest and southeast
    SizeNwse,
    /// Double arrow pointing northeast and southwest
    SizeNesw,
    /// Double arrow pointing west and east
    SizeWe,
    /// Double arrow pointing north and south
    SizeNs,
    /// Four pointed arrow pointing north, south, east, and west
    SizeAll,
    /// Slashed circle or crossbones
    No,
    /// Hand
    Hand,
}

/// Cursor services offered by the platform
#[cfg_attr(test, mockall::automock)]
pub trait CursorPlatform: Send {
    /// Upload an ARGB image as a custom cursor, `None` if the platform refuses
    fn create_custom_cursor(
        &mut self,
        image: &ArgbImage,
        hot_x: i32,
        hot_y: i32,
    ) -> Option<CustomCursorId>;

    /// Release a custom cursor
    fn destroy_custom_cursor(&mut self, id: CustomCursorId);

    /// Make a custom cursor current
    fn set_custom_cursor(&mut self, id: CustomCursorId) -> bool;

    /// Make a system cursor current
    fn set_system_cursor(&mut self, cursor: SystemCursor) -> bool;

    /// Whether pointer capture is available
    fn supports_relative_mouse(&self) -> bool;

    /// Enable or disable pointer capture
    fn set_relative_mouse_enabled(&mut self, enabled: bool) -> bool;
}

/// Cursor currently shown by a [`HeadlessPlatform`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveCursor {
    /// A custom cursor
    Custom(CustomCursorId),
    /// A system cursor
    System(SystemCursor),
}

/// In-process cursor platform
#[derive(Debug)]
pub struct HeadlessPlatform {
    next_id: u32,
    cursors: HashMap<CustomCursorId, ArgbImage>,
    active: Option<ActiveCursor>,
    relative_supported: bool,
    relative_enabled: bool,
}

impl HeadlessPlatform {
    /// Create a platform; `relative_supported` controls pointer capture
    pub fn new(relative_supported: bool) -> Self {
        Self {
            next_id: 1,
            cursors: HashMap::new(),
            active: None,
            relative_supported,
            relative_enabled: false,
        }
    }

    /// Currently shown cursor
    pub fn active(&self) -> Option<ActiveCursor> {
        self.active
    }

    /// Number of live custom cursors
    pub fn custom_cursor_count(&self) -> usize {
        self.cursors.len()
    }

    /// Image uploaded for a custom cursor
    pub fn custom_cursor_image(&self, id: CustomCursorId) -> Option<&ArgbImage> {
        self.cursors.get(&id)
    }

    /// Whether pointer capture is on
    pub fn relative_enabled(&self) -> bool {
        self.relative_enabled
    }
}

impl Default for HeadlessPlatform {
    fn default() -> Self {
        Self::new(true)
    }
}

impl CursorPlatform for HeadlessPlatform {
    fn create_custom_cursor(
        &mut self,
        image: &ArgbImage,
        hot_x: i32,
        hot_y: i32,
    ) -> Option<CustomCursorId> {
        if image.width == 0 || image.height == 0 {
            return None;
        }
        let id = CustomCursorId(self.next_id);
        self.next_id += 1;
        debug!(
            "Created custom cursor {:?} ({}x{}, hotspot {},{})",
            id, image.width, image.height, hot_x, hot_y
        );
        self.cursors.insert(id, image.clone());
        Some(id)
    }

    fn destroy_custom_cursor(&mut self, id: CustomCursorId) {
        self.cursors.remove(&id);
        if self.active == Some(ActiveCursor::Custom(id)) {
            self.active = None;
        }
    }

    fn set_custom_cursor(&mut self, id: CustomCursorId) -> bool {
        if !self.cursors.contains_key(&id) {
            return false;
        }
        self.active = Some(ActiveCursor::Custom(id));
        true
    }

    fn set_system_cursor(&mut self, cursor: SystemCursor) -> bool {
        self.active = Some(ActiveCursor::System(cursor));
        true
    }

    fn supports_relative_mouse(&self) -> bool {
        self.relative_supported
    }

    fn set_relative_mouse_enabled(&mut self, enabled: bool) -> bool {
        if !self.relative_supported {
            return false;
        }
        self.relative_enabled = enabled;
        true
    }
}

/// Shared platform handle, so the caller can keep inspecting a platform
/// owned by a driver
impl<P: CursorPlatform> CursorPlatform for Arc<Mutex<P>> {
    fn create_custom_cursor(
        &mut self,
        image: &ArgbImage,
        hot_x: i32,
        hot_y: i32,
    ) -> Option<CustomCursorId> {
        self.lock().create_custom_cursor(image, hot_x, hot_y)
    }

    fn destroy_custom_cursor(&mut self, id: CustomCursorId) {
        self.lock().destroy_custom_cursor(id)
    }

    fn set_custom_cursor(&mut self, id: CustomCursorId) -> bool {
        self.lock().set_custom_cursor(id)
    }

    fn set_system_cursor(&mut self, cursor: SystemCursor) -> bool {
        self.lock().set_system_cursor(cursor)
    }

    fn supports_relative_mouse(&self) -> bool {
        self.lock().supports_relative_mouse()
    }

    fn set_relative_mouse_enabled(&mut self, enabled: bool) -> bool {
        self.lock().set_relative_mouse_enabled(enabled)
    }
}
