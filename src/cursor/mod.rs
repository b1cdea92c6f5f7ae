//! Cursor handling
//!
//! Cursor handles, bitmap conversion, and the two cursor backends.
//!
//! # Backends
//!
//! | Backend | Show/hide | Custom bitmaps | Relative mode |
//! |---------|-----------|----------------|---------------|
//! | Platform | Pointer icon; hidden = transparent 1x1 cursor | Uploaded as ARGB8888 | Pointer capture |
//! | Hooks | `on_show_mouse` hook | Local ids only | Always accepted |
//!
//! # Hidden cursor
//!
//! The platform has no "hide pointer" call. Hiding shows a fully transparent
//! 1x1 custom cursor instead. It is created on first use, reused afterwards,
//! and destroyed when the driver shuts down.
//!
//! ```text
//! show_cursor(None)
//!   └─> empty cursor cached?
//!       ├─ no  → Surface::blank(1, 1) → ARGB8888 → platform id → cache
//!       └─ yes → reuse
//!   └─> platform.set_custom_cursor(id)
//! ```

mod driver;
mod error;
mod hooked;
mod platform;
mod strategy;
mod surface;

pub use driver::{Cursor, CursorData, CursorDriver, PlatformCursorDriver};
pub use error::{CursorError, Result};
pub use hooked::HookCursorDriver;
pub use platform::{ActiveCursor, CursorPlatform, CustomCursorId, HeadlessPlatform, SystemCursor};
pub use strategy::CursorBackend;
pub use surface::{ArgbImage, PixelFormat, Surface};

/// Size of the transparent cursor used to hide the pointer
pub const EMPTY_CURSOR_SIZE: u32 = 1;
