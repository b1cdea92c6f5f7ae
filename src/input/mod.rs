//! Pointer Input Handling
//!
//! Translation of Android pointer events into the normalized mouse event model
//! of the owning windowing subsystem.
//!
//! # Features
//!
//! - Press/release edge detection against the last known button state, so a
//!   release reported with an empty button mask still names the right button
//! - Fixed button priority when several bits change at once
//!   (primary > secondary > tertiary > forward > back)
//! - Absolute and relative motion, hover, and wheel events
//! - Events for a missing window are dropped without error
//!
//! # Architecture
//!
//! ```text
//! Android MotionEvent (buttonState, action, x, y)
//!       ↓
//! ┌─────────────────────────┐
//! │  InputTranslator        │ ← last_button_mask
//! └─────────────────────────┘
//!       ↓ MouseEvent
//! ┌─────────────────────────┐
//! │  EventSink              │ ← owning event system
//! └─────────────────────────┘
//! ```
//!
//! # Usage Example
//!
//! ```rust
//! use droid_pointer::input::{
//!     ButtonState, InputTranslator, MouseButton, MouseEvent, RawPointerEvent, WindowId,
//! };
//!
//! let mut translator = InputTranslator::default();
//! let mut events: Vec<MouseEvent> = Vec::new();
//!
//! // BUTTON_PRIMARY down at (120, 80)
//! translator
//!     .translate_raw(Some(WindowId(1)), RawPointerEvent::new(1, 0, 120.0, 80.0, false), &mut events)
//!     .unwrap();
//!
//! // Android reports the release with an empty mask
//! translator
//!     .translate_raw(Some(WindowId(1)), RawPointerEvent::new(0, 1, 120.0, 80.0, false), &mut events)
//!     .unwrap();
//!
//! assert!(matches!(
//!     events.last(),
//!     Some(MouseEvent::Button { button: MouseButton::Left, state: ButtonState::Released, .. })
//! ));
//! ```

pub mod error;
pub mod mouse;
pub mod sink;
pub mod translator;
pub mod window;

pub use error::{InputError, Result};
pub use mouse::{
    mask_from_raw, AndroidButton, ButtonMask, ButtonState, MouseButton, MouseEvent,
    WheelDirection,
};
pub use sink::{EventSink, NullSink};
pub use translator::{InputTranslator, PointerAction, RawPointerEvent, TranslatorOptions};
pub use window::{Window, WindowId};
