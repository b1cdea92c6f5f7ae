//! Cursor integration tests
//!
//! Runs both cursor backends against the headless platform.

use std::sync::Arc;

use droid_pointer::cursor::{
    ActiveCursor, CursorBackend, CursorData, CursorDriver, CursorError, HeadlessPlatform,
    PixelFormat, PlatformCursorDriver, Surface, SystemCursor, EMPTY_CURSOR_SIZE,
};
use droid_pointer::hooks::{CallbackHooks, HookRegistry};
use droid_pointer::input::Window;
use parking_lot::Mutex;

#[test]
fn test_hidden_cursor_is_cached_transparent_bitmap() {
    let mut driver = PlatformCursorDriver::new(HeadlessPlatform::default());

    driver.show_cursor(None).unwrap();
    let first = driver.platform().active();
    driver.show_cursor(None).unwrap();

    assert_eq!(driver.platform().active(), first);
    assert_eq!(driver.platform().custom_cursor_count(), 1);

    let Some(CursorData::Custom(id)) = driver.cached_empty_cursor().map(|c| c.data()) else {
        panic!("empty cursor not cached");
    };
    let image = driver.platform().custom_cursor_image(id).unwrap();
    assert_eq!((image.width, image.height), (EMPTY_CURSOR_SIZE, EMPTY_CURSOR_SIZE));
    assert!(image.is_fully_transparent());

    driver.shutdown();
    assert_eq!(driver.platform().custom_cursor_count(), 0);
}

#[test]
fn test_bgra_surface_with_padding_converts() {
    // 1x2 BGRA with 8-byte rows
    let pixels = vec![
        0x10, 0x20, 0x30, 0x40, 0xEE, 0xEE, 0xEE, 0xEE, //
        0x01, 0x02, 0x03, 0xFF,
    ];
    let surface = Surface::with_pitch(1, 2, 8, PixelFormat::Bgra8888, pixels).unwrap();

    let mut driver = PlatformCursorDriver::new(HeadlessPlatform::default());
    let cursor = driver.create_cursor(&surface, 0, 1).unwrap();
    let CursorData::Custom(id) = cursor.data() else {
        panic!("expected a custom cursor");
    };

    let image = driver.platform().custom_cursor_image(id).unwrap();
    assert_eq!(image.pixels, vec![0x4030_2010, 0xFF03_0201]);
}

#[test]
fn test_unconvertible_bitmap_is_unsupported() {
    let mut driver = PlatformCursorDriver::new(HeadlessPlatform::default());
    let surface = Surface::new(2, 2, PixelFormat::Index8, vec![0; 4]).unwrap();

    let err = driver.create_cursor(&surface, 0, 0).unwrap_err();
    assert!(matches!(err, CursorError::UnsupportedFormat(PixelFormat::Index8)));
    assert_eq!(driver.platform().custom_cursor_count(), 0);
}

#[test]
fn test_short_pixel_buffer_is_rejected() {
    let err = Surface::new(4, 4, PixelFormat::Argb8888, vec![0; 8]).unwrap_err();
    assert!(matches!(err, CursorError::InvalidSurface(_)));
}

#[test]
fn test_system_cursor_selection() {
    let mut driver = PlatformCursorDriver::new(HeadlessPlatform::default());
    let cursor = driver.create_system_cursor(SystemCursor::IBeam).unwrap();
    driver.show_cursor(Some(&cursor)).unwrap();

    assert_eq!(
        driver.platform().active(),
        Some(ActiveCursor::System(SystemCursor::IBeam))
    );
}

#[test]
fn test_hooks_backend_reports_visibility_and_motion() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let show_log = log.clone();
    let move_log = log.clone();

    let registry = Arc::new(HookRegistry::new());
    registry.set_hooks(Arc::new(
        CallbackHooks::new()
            .show_mouse(move |visible| show_log.lock().push(format!("show {}", visible)))
            .mouse_move(move |x, y| move_log.lock().push(format!("move {:.2} {:.2}", x, y))),
    ));

    let platform = Arc::new(Mutex::new(HeadlessPlatform::default()));
    let mut driver = CursorBackend::Hooks.build(platform.clone(), registry.clone());

    let cursor = driver.default_cursor().unwrap();
    driver.show_cursor(Some(&cursor)).unwrap();
    driver.move_cursor(960.0, 270.0, Some(&Window::new(1, 1920, 1080)));
    driver.show_cursor(None).unwrap();
    assert!(driver.set_relative_mode(true).is_ok());

    assert_eq!(
        *log.lock(),
        vec!["show true", "move 0.50 0.25", "show false"]
    );
    // Nothing reached the platform
    assert_eq!(platform.lock().active(), None);

    // Cleared hooks fall back to no-ops
    registry.clear_hooks();
    driver.show_cursor(None).unwrap();
    assert_eq!(log.lock().len(), 3);
}
