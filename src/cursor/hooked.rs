//! Hook-driven cursor
//!
//! For embedders that draw their own pointer: nothing is sent to the platform.
//! Visibility changes and pointer motion are reported through the
//! [`HookRegistry`] instead.

use std::sync::Arc;

use tracing::trace;

use super::driver::{Cursor, CursorDriver};
use super::error::Result;
use super::platform::{CustomCursorId, SystemCursor};
use super::surface::Surface;
use crate::hooks::HookRegistry;
use crate::input::Window;

/// Cursor driver reporting to embedder hooks
#[derive(Debug)]
pub struct HookCursorDriver {
    hooks: Arc<HookRegistry>,

    /// Local ids for bitmap cursors; nothing is uploaded
    next_id: u32,
}

impl HookCursorDriver {
    /// Create a driver reporting to `hooks`
    pub fn new(hooks: Arc<HookRegistry>) -> Self {
        Self { hooks, next_id: 1 }
    }
}

impl CursorDriver for HookCursorDriver {
    fn name(&self) -> &'static str {
        "hooks"
    }

    fn create_cursor(&mut self, surface: &Surface, _hot_x: i32, _hot_y: i32) -> Result<Cursor> {
        let id = CustomCursorId(self.next_id);
        self.next_id += 1;
        trace!(
            "Hook cursor {:?} for {}x{} surface",
            id,
            surface.width(),
            surface.height()
        );
        Ok(Cursor::custom(id))
    }

    fn create_system_cursor(&mut self, id: SystemCursor) -> Result<Cursor> {
        Ok(Cursor::system(id))
    }

    fn show_cursor(&mut self, cursor: Option<&Cursor>) -> Result<()> {
        self.hooks.show_mouse(cursor.is_some());
        Ok(())
    }

    fn move_cursor(&mut self, x: f32, y: f32, focus: Option<&Window>) {
        if let Some((nx, ny)) = focus.and_then(|window| window.normalize(x, y)) {
            self.hooks.mouse_move(nx, ny);
        }
    }

    fn set_relative_mode(&mut self, _enabled: bool) -> Result<()> {
        Ok(())
    }

    fn free_cursor(&mut self, _cursor: Cursor) {}
}
