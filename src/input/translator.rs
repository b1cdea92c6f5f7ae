//! Pointer Event Translator
//!
//! Turns Android pointer callbacks (button state, action code, coordinates)
//! into normalized motion, button and wheel events.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::input::error::{InputError, Result};
use crate::input::mouse::{
    mask_from_raw, ButtonMask, ButtonState, MouseButton, MouseEvent, WheelDirection,
};
use crate::input::sink::EventSink;
use crate::input::window::WindowId;

/// Android `MotionEvent` action codes understood by the translator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerAction {
    /// `ACTION_DOWN`
    Down,
    /// `ACTION_UP`
    Up,
    /// `ACTION_MOVE`
    Move,
    /// Relative move reported by pointer capture builds
    MoveRelative,
    /// `ACTION_HOVER_MOVE`
    HoverMove,
    /// `ACTION_SCROLL`
    Scroll,
}

impl PointerAction {
    /// Raw action code
    pub fn code(&self) -> i32 {
        match self {
            PointerAction::Down => 0,
            PointerAction::Up => 1,
            PointerAction::Move => 2,
            PointerAction::MoveRelative => 3,
            PointerAction::HoverMove => 7,
            PointerAction::Scroll => 8,
        }
    }

    /// Convert from a raw action code
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(PointerAction::Down),
            1 => Some(PointerAction::Up),
            2 => Some(PointerAction::Move),
            3 => Some(PointerAction::MoveRelative),
            7 => Some(PointerAction::HoverMove),
            8 => Some(PointerAction::Scroll),
            _ => None,
        }
    }
}

impl TryFrom<i32> for PointerAction {
    type Error = InputError;

    fn try_from(code: i32) -> Result<Self> {
        Self::from_code(code).ok_or(InputError::UnknownAction(code))
    }
}

/// Raw pointer event as delivered by the platform
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawPointerEvent {
    /// `MotionEvent.getButtonState()` bits
    #[serde(default)]
    pub button_mask: u32,
    /// Action code
    pub action: i32,
    /// X position or delta
    #[serde(default)]
    pub x: f32,
    /// Y position or delta
    #[serde(default)]
    pub y: f32,
    /// Coordinates are deltas
    #[serde(default)]
    pub relative: bool,
}

impl RawPointerEvent {
    /// Create a raw event
    pub fn new(button_mask: u32, action: i32, x: f32, y: f32, relative: bool) -> Self {
        Self {
            button_mask,
            action,
            x,
            y,
            relative,
        }
    }
}

/// Translator behaviour switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TranslatorOptions {
    /// Accept action code 3 as a relative move
    #[serde(default)]
    pub accept_move_relative: bool,
}

/// Pointer event translator
///
/// Holds the last observed button mask so that press and release edges can
/// be attributed to a button even when the platform reports an empty mask on
/// release.
#[derive(Debug, Default)]
pub struct InputTranslator {
    /// Last observed button mask
    last_button_mask: ButtonMask,

    /// Behaviour switches
    options: TranslatorOptions,

    /// Total events processed
    events_processed: u64,

    /// Events ignored for lack of a window or an unknown action
    events_dropped: u64,
}

impl InputTranslator {
    /// Create a new translator with no buttons held
    pub fn new(options: TranslatorOptions) -> Self {
        Self {
            last_button_mask: ButtonMask::empty(),
            options,
            events_processed: 0,
            events_dropped: 0,
        }
    }

    /// Translate a raw platform event.
    ///
    /// Without a window the event is dropped silently. Unknown action codes
    /// are ignored as well.
    pub fn translate_raw(
        &mut self,
        window: Option<WindowId>,
        event: RawPointerEvent,
        sink: &mut dyn EventSink,
    ) -> Result<()> {
        let Some(window) = window else {
            trace!("No window, dropping pointer event {:?}", event);
            self.events_dropped += 1;
            return Ok(());
        };

        let action = match PointerAction::from_code(event.action) {
            Some(PointerAction::MoveRelative) if !self.options.accept_move_relative => None,
            action => action,
        };
        let Some(action) = action else {
            trace!("Ignoring pointer action code {}", event.action);
            self.events_dropped += 1;
            return Ok(());
        };

        self.translate(
            window,
            action,
            mask_from_raw(event.button_mask),
            event.x,
            event.y,
            event.relative,
            sink,
        )
    }

    /// Translate a decoded pointer event for `window`
    #[allow(clippy::too_many_arguments)]
    pub fn translate(
        &mut self,
        window: WindowId,
        action: PointerAction,
        button_mask: ButtonMask,
        x: f32,
        y: f32,
        relative: bool,
        sink: &mut dyn EventSink,
    ) -> Result<()> {
        self.events_processed += 1;

        match action {
            PointerAction::Down => {
                let changes = button_mask & !self.last_button_mask;
                self.last_button_mask = button_mask;
                self.send_motion(window, x, y, relative, sink)?;
                self.send_button(window, changes, ButtonState::Pressed, sink)
            }

            PointerAction::Up => {
                let changes = self.last_button_mask & !button_mask;
                self.last_button_mask = button_mask;
                self.send_motion(window, x, y, relative, sink)?;
                self.send_button(window, changes, ButtonState::Released, sink)
            }

            PointerAction::Move | PointerAction::HoverMove => {
                self.send_motion(window, x, y, relative, sink)
            }

            PointerAction::MoveRelative => self.send_motion(window, x, y, true, sink),

            PointerAction::Scroll => sink.send(MouseEvent::Wheel {
                window,
                x,
                y,
                direction: WheelDirection::Normal,
            }),
        }
    }

    fn send_motion(
        &self,
        window: WindowId,
        x: f32,
        y: f32,
        relative: bool,
        sink: &mut dyn EventSink,
    ) -> Result<()> {
        sink.send(MouseEvent::Motion {
            window,
            x,
            y,
            relative,
        })
    }

    fn send_button(
        &self,
        window: WindowId,
        changes: ButtonMask,
        state: ButtonState,
        sink: &mut dyn EventSink,
    ) -> Result<()> {
        match MouseButton::from_changes(changes) {
            Some(button) => {
                debug!("Mouse button {:?} {:?} on {}", button, state, window);
                sink.send(MouseEvent::Button {
                    window,
                    button,
                    state,
                })
            }
            None => {
                trace!(
                    "No recognized button changed (0x{:02X}), skipping {:?}",
                    changes.bits(),
                    state
                );
                Ok(())
            }
        }
    }

    /// Forget held buttons
    pub fn reset(&mut self) {
        self.last_button_mask = ButtonMask::empty();
        debug!("Pointer translator reset");
    }

    /// Last observed button mask
    pub fn last_button_mask(&self) -> ButtonMask {
        self.last_button_mask
    }

    /// Translator options
    pub fn options(&self) -> TranslatorOptions {
        self.options
    }

    /// Get total events processed
    pub fn events_processed(&self) -> u64 {
        self.events_processed
    }

    /// Get number of events dropped
    pub fn events_dropped(&self) -> u64 {
        self.events_dropped
    }
}
