//! Cursor drivers
//!
//! A [`CursorDriver`] realizes cursor requests of the windowing subsystem.
//! [`PlatformCursorDriver`] talks to the platform cursor services; the
//! hook-based driver in [`super::hooked`] forwards visibility and position to
//! the embedding application instead.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, warn};

use super::error::{CursorError, Result};
use super::platform::{CursorPlatform, CustomCursorId, SystemCursor};
use super::surface::{PixelFormat, Surface};
use super::EMPTY_CURSOR_SIZE;
use crate::input::Window;

/// Driver data carried by a cursor handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CursorData {
    /// Bitmap cursor allocated by the platform
    Custom(CustomCursorId),
    /// Platform-provided shape
    System(SystemCursor),
}

static NEXT_CURSOR_SERIAL: AtomicU64 = AtomicU64::new(1);

/// Opaque cursor handle.
///
/// Handles are not `Clone`; they are released by passing them back to
/// [`CursorDriver::free_cursor`]. Two handles wrapping the same shape are
/// still distinct: identity is the handle's serial, not its data.
#[derive(Debug, PartialEq, Eq)]
pub struct Cursor {
    serial: u64,
    data: CursorData,
}

impl Cursor {
    fn with_data(data: CursorData) -> Self {
        Self {
            serial: NEXT_CURSOR_SERIAL.fetch_add(1, Ordering::Relaxed),
            data,
        }
    }

    pub(crate) fn custom(id: CustomCursorId) -> Self {
        Self::with_data(CursorData::Custom(id))
    }

    pub(crate) fn system(id: SystemCursor) -> Self {
        Self::with_data(CursorData::System(id))
    }

    /// Borrowed view of a handle owned elsewhere
    pub(crate) fn view(&self) -> Self {
        Self {
            serial: self.serial,
            data: self.data,
        }
    }

    /// Unique handle identity
    pub fn serial(&self) -> u64 {
        self.serial
    }

    /// Driver data
    pub fn data(&self) -> CursorData {
        self.data
    }
}

/// Cursor operations required by the windowing subsystem
pub trait CursorDriver: Send {
    /// Short name for logs
    fn name(&self) -> &'static str;

    /// Create a cursor from a bitmap with the given hotspot
    fn create_cursor(&mut self, surface: &Surface, hot_x: i32, hot_y: i32) -> Result<Cursor>;

    /// Wrap a platform cursor shape
    fn create_system_cursor(&mut self, id: SystemCursor) -> Result<Cursor>;

    /// Cursor installed at subsystem start
    fn default_cursor(&mut self) -> Result<Cursor> {
        self.create_system_cursor(SystemCursor::Arrow)
    }

    /// Show `cursor`, or hide the pointer when `None`
    fn show_cursor(&mut self, cursor: Option<&Cursor>) -> Result<()>;

    /// Pointer moved to `(x, y)` in `focus` coordinates
    fn move_cursor(&mut self, _x: f32, _y: f32, _focus: Option<&Window>) {}

    /// Enable or disable relative pointer reporting
    fn set_relative_mode(&mut self, enabled: bool) -> Result<()>;

    /// Release a cursor
    fn free_cursor(&mut self, cursor: Cursor);

    /// Release driver-held resources at subsystem teardown
    fn shutdown(&mut self) {}
}

/// Driver backed by the platform cursor services
pub struct PlatformCursorDriver<P: CursorPlatform> {
    platform: P,

    /// Transparent 1x1 cursor standing in for "hidden"
    empty_cursor: Option<Cursor>,
}

impl<P: CursorPlatform> PlatformCursorDriver<P> {
    /// Create a driver over `platform`
    pub fn new(platform: P) -> Self {
        Self {
            platform,
            empty_cursor: None,
        }
    }

    /// Borrow the platform
    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// The cached empty cursor, if it has been created
    pub fn cached_empty_cursor(&self) -> Option<&Cursor> {
        self.empty_cursor.as_ref()
    }

    /// Get the empty cursor, creating it on first use
    pub fn empty_cursor(&mut self) -> Result<&Cursor> {
        let cursor = match self.empty_cursor.take() {
            Some(cursor) => cursor,
            None => {
                let surface =
                    Surface::blank(EMPTY_CURSOR_SIZE, EMPTY_CURSOR_SIZE, PixelFormat::Argb8888)?;
                let cursor = self.create_cursor(&surface, 0, 0)?;
                debug!("Created empty cursor {:?}", cursor.data());
                cursor
            }
        };
        Ok(&*self.empty_cursor.insert(cursor))
    }

    fn activate(&mut self, data: CursorData) -> Result<()> {
        let ok = match data {
            CursorData::Custom(id) => self.platform.set_custom_cursor(id),
            CursorData::System(id) => self.platform.set_system_cursor(id),
        };
        if !ok {
            warn!("Platform refused to show cursor {:?}", data);
            return Err(CursorError::Unsupported(format!(
                "cannot show cursor {:?}",
                data
            )));
        }
        Ok(())
    }
}

impl<P: CursorPlatform> CursorDriver for PlatformCursorDriver<P> {
    fn name(&self) -> &'static str {
        "platform"
    }

    fn create_cursor(&mut self, surface: &Surface, hot_x: i32, hot_y: i32) -> Result<Cursor> {
        let image = surface.to_argb8888()?;

        let id = self
            .platform
            .create_custom_cursor(&image, hot_x, hot_y)
            .ok_or_else(|| {
                warn!(
                    "Platform refused {}x{} custom cursor",
                    image.width, image.height
                );
                CursorError::Unsupported("custom cursor creation failed".to_string())
            })?;

        Ok(Cursor::custom(id))
    }

    fn create_system_cursor(&mut self, id: SystemCursor) -> Result<Cursor> {
        Ok(Cursor::system(id))
    }

    fn show_cursor(&mut self, cursor: Option<&Cursor>) -> Result<()> {
        let data = match cursor {
            Some(cursor) => cursor.data(),
            None => self.empty_cursor()?.data(),
        };
        self.activate(data)
    }

    fn set_relative_mode(&mut self, enabled: bool) -> Result<()> {
        if !self.platform.supports_relative_mouse() {
            return Err(CursorError::Unsupported(
                "relative mouse mode not available".to_string(),
            ));
        }
        if !self.platform.set_relative_mouse_enabled(enabled) {
            return Err(CursorError::Unsupported(format!(
                "failed to {} relative mouse mode",
                if enabled { "enable" } else { "disable" }
            )));
        }
        debug!("Relative mouse mode {}", enabled);
        Ok(())
    }

    fn free_cursor(&mut self, cursor: Cursor) {
        if let CursorData::Custom(id) = cursor.data() {
            self.platform.destroy_custom_cursor(id);
        }
    }

    fn shutdown(&mut self) {
        if let Some(cursor) = self.empty_cursor.take() {
            debug!("Destroying empty cursor {:?}", cursor.data());
            self.free_cursor(cursor);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::platform::MockCursorPlatform;
    use mockall::predicate::eq;

    fn rgba_surface() -> Surface {
        Surface::new(2, 2, PixelFormat::Rgba8888, vec![0xFF; 16]).unwrap()
    }

    #[test]
    fn test_create_custom_cursor() {
        let mut platform = MockCursorPlatform::new();
        platform
            .expect_create_custom_cursor()
            .withf(|image, hot_x, hot_y| {
                image.width == 2 && image.pixels[0] == 0xFFFF_FFFF && *hot_x == 1 && *hot_y == 0
            })
            .times(1)
            .returning(|_, _, _| Some(CustomCursorId(9)));

        let mut driver = PlatformCursorDriver::new(platform);
        let cursor = driver.create_cursor(&rgba_surface(), 1, 0).unwrap();
        assert_eq!(cursor.data(), CursorData::Custom(CustomCursorId(9)));
    }

    #[test]
    fn test_unconvertible_bitmap_creates_nothing() {
        let mut platform = MockCursorPlatform::new();
        platform.expect_create_custom_cursor().never();

        let mut driver = PlatformCursorDriver::new(platform);
        let surface = Surface::new(1, 1, PixelFormat::Index8, vec![3]).unwrap();
        let err = driver.create_cursor(&surface, 0, 0).unwrap_err();

        assert!(err.is_unsupported());
        assert!(matches!(err, CursorError::UnsupportedFormat(PixelFormat::Index8)));
    }

    #[test]
    fn test_platform_refusal_is_unsupported() {
        let mut platform = MockCursorPlatform::new();
        platform
            .expect_create_custom_cursor()
            .returning(|_, _, _| None);

        let mut driver = PlatformCursorDriver::new(platform);
        let err = driver.create_cursor(&rgba_surface(), 0, 0).unwrap_err();
        assert!(matches!(err, CursorError::Unsupported(_)));
    }

    #[test]
    fn test_system_cursor_needs_no_platform_call() {
        let platform = MockCursorPlatform::new();
        let mut driver = PlatformCursorDriver::new(platform);

        let cursor = driver.create_system_cursor(SystemCursor::Crosshair).unwrap();
        assert_eq!(cursor.data(), CursorData::System(SystemCursor::Crosshair));

        let default = driver.default_cursor().unwrap();
        assert_eq!(default.data(), CursorData::System(SystemCursor::Arrow));
    }

    #[test]
    fn test_same_shape_handles_are_distinct() {
        let mut driver = PlatformCursorDriver::new(MockCursorPlatform::new());
        let a = driver.create_system_cursor(SystemCursor::Hand).unwrap();
        let b = driver.create_system_cursor(SystemCursor::Hand).unwrap();

        assert_eq!(a.data(), b.data());
        assert_ne!(a.serial(), b.serial());
        assert_ne!(a, b);
        assert_eq!(a.view(), a);
    }

    #[test]
    fn test_hide_reuses_empty_cursor() {
        let mut platform = MockCursorPlatform::new();
        platform
            .expect_create_custom_cursor()
            .withf(|image, _, _| {
                image.width == 1 && image.height == 1 && image.is_fully_transparent()
            })
            .times(1)
            .returning(|_, _, _| Some(CustomCursorId(3)));
        platform
            .expect_set_custom_cursor()
            .with(eq(CustomCursorId(3)))
            .times(2)
            .returning(|_| true);

        let mut driver = PlatformCursorDriver::new(platform);
        driver.show_cursor(None).unwrap();
        driver.show_cursor(None).unwrap();

        assert_eq!(
            driver.cached_empty_cursor().map(Cursor::data),
            Some(CursorData::Custom(CustomCursorId(3)))
        );
    }

    #[test]
    fn test_show_system_cursor_failure() {
        let mut platform = MockCursorPlatform::new();
        platform
            .expect_set_system_cursor()
            .with(eq(SystemCursor::Hand))
            .returning(|_| false);

        let mut driver = PlatformCursorDriver::new(platform);
        let cursor = driver.create_system_cursor(SystemCursor::Hand).unwrap();
        let err = driver.show_cursor(Some(&cursor)).unwrap_err();
        assert!(err.is_unsupported());
    }

    #[test]
    fn test_relative_mode() {
        let mut platform = MockCursorPlatform::new();
        platform
            .expect_supports_relative_mouse()
            .returning(|| false);
        platform.expect_set_relative_mouse_enabled().never();

        let mut driver = PlatformCursorDriver::new(platform);
        assert!(driver.set_relative_mode(true).unwrap_err().is_unsupported());

        let mut platform = MockCursorPlatform::new();
        platform.expect_supports_relative_mouse().returning(|| true);
        platform
            .expect_set_relative_mouse_enabled()
            .with(eq(true))
            .times(1)
            .returning(|_| false);

        let mut driver = PlatformCursorDriver::new(platform);
        assert!(driver.set_relative_mode(true).unwrap_err().is_unsupported());
    }

    #[test]
    fn test_free_and_shutdown_release_platform_ids() {
        let mut platform = MockCursorPlatform::new();
        let mut next = 0;
        platform
            .expect_create_custom_cursor()
            .times(2)
            .returning(move |_, _, _| {
                next += 1;
                Some(CustomCursorId(next))
            });
        platform.expect_set_custom_cursor().returning(|_| true);
        platform
            .expect_destroy_custom_cursor()
            .with(eq(CustomCursorId(1)))
            .times(1)
            .return_const(());
        platform
            .expect_destroy_custom_cursor()
            .with(eq(CustomCursorId(2)))
            .times(1)
            .return_const(());

        let mut driver = PlatformCursorDriver::new(platform);
        let cursor = driver.create_cursor(&rgba_surface(), 0, 0).unwrap();
        driver.show_cursor(None).unwrap();

        driver.free_cursor(cursor);
        driver.shutdown();
        assert!(driver.cached_empty_cursor().is_none());

        // Second shutdown has nothing left to release
        driver.shutdown();
    }
}
