//! Mouse Button and Event Model
//!
//! Platform button flags, the logical button ids of the owning event system,
//! and the normalized events produced by the translator.

use enumflags2::{bitflags, BitFlags};
use serde::{Deserialize, Serialize};

use crate::input::window::WindowId;

/// Android `MotionEvent` button flags
#[bitflags]
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AndroidButton {
    /// `BUTTON_PRIMARY`
    Primary = 1,
    /// `BUTTON_SECONDARY`
    Secondary = 2,
    /// `BUTTON_TERTIARY`
    Tertiary = 4,
    /// `BUTTON_BACK`
    Back = 8,
    /// `BUTTON_FORWARD`
    Forward = 16,
}

/// Set of platform buttons held at the time of an event
pub type ButtonMask = BitFlags<AndroidButton>;

/// Build a mask from the raw `buttonState` integer, dropping unknown bits.
pub fn mask_from_raw(raw: u32) -> ButtonMask {
    BitFlags::from_bits_truncate(raw)
}

/// Logical mouse button ids of the owning event system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Middle mouse button
    Middle,
    /// Right mouse button
    Right,
    /// Extra button 1 (forward)
    X1,
    /// Extra button 2 (back)
    X2,
}

impl MouseButton {
    /// Numeric id as seen by the owning event system (1-based)
    pub fn id(&self) -> u8 {
        match self {
            MouseButton::Left => 1,
            MouseButton::Middle => 2,
            MouseButton::Right => 3,
            MouseButton::X1 => 4,
            MouseButton::X2 => 5,
        }
    }

    /// Pick the logical button for a set of changed platform buttons.
    ///
    /// Priority is primary, secondary, tertiary, forward, back. Only the
    /// highest priority bit is reported; an empty set yields `None`.
    pub fn from_changes(changes: ButtonMask) -> Option<Self> {
        if changes.contains(AndroidButton::Primary) {
            Some(MouseButton::Left)
        } else if changes.contains(AndroidButton::Secondary) {
            Some(MouseButton::Right)
        } else if changes.contains(AndroidButton::Tertiary) {
            Some(MouseButton::Middle)
        } else if changes.contains(AndroidButton::Forward) {
            Some(MouseButton::X1)
        } else if changes.contains(AndroidButton::Back) {
            Some(MouseButton::X2)
        } else {
            None
        }
    }
}

/// Button transition direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonState {
    /// Button went down
    Pressed,
    /// Button went up
    Released,
}

/// Wheel direction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WheelDirection {
    /// Positive y scrolls away from the user
    #[default]
    Normal,
    /// Natural scrolling, axes inverted
    Flipped,
}

/// Normalized mouse event handed to the owning event system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MouseEvent {
    /// Pointer moved
    Motion {
        /// Target window
        window: WindowId,
        /// X position, or delta when `relative`
        x: f32,
        /// Y position, or delta when `relative`
        y: f32,
        /// Coordinates are deltas
        relative: bool,
    },

    /// Button pressed or released
    Button {
        /// Target window
        window: WindowId,
        /// Logical button
        button: MouseButton,
        /// Transition
        state: ButtonState,
    },

    /// Wheel scrolled
    Wheel {
        /// Target window
        window: WindowId,
        /// Horizontal amount
        x: f32,
        /// Vertical amount
        y: f32,
        /// Direction mode
        direction: WheelDirection,
    },
}

impl MouseEvent {
    /// Window the event is addressed to
    pub fn window(&self) -> WindowId {
        match self {
            MouseEvent::Motion { window, .. }
            | MouseEvent::Button { window, .. }
            | MouseEvent::Wheel { window, .. } => *window,
        }
    }
}
