//! # droid-pointer
//!
//! Android mouse input for an SDL-style windowing subsystem.
//!
//! Integrates:
//! - [`input`] - pointer event translation (button-mask edge detection)
//! - [`cursor`] - cursor handles and the platform/hook cursor backends
//! - [`hooks`] - embedder notifications (mouse, keyboard, buffer swaps)
//! - [`subsystem`] - the locked mouse context and event injection
//!
//! # Architecture
//!
//! ```text
//! droid-pointer
//!   ├─> MouseSubsystem (activity lock)
//!   │     ├─> InputTranslator → EventSink (owning event system)
//!   │     └─> CursorDriver
//!   │           ├─> PlatformCursorDriver → CursorPlatform (pointer icons)
//!   │           └─> HookCursorDriver → HookRegistry (embedder draws)
//!   └─> droid-pointer-replay (trace replay tool)
//! ```
//!
//! # Data Flow
//!
//! **Native path:** Platform callback → `on_mouse` → translator → sink
//!
//! **Injection path:** Any thread → `inject_mouse` → translator → sink
//!
//! Both paths take the same lock.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Replay tool configuration
pub mod config;

pub mod cursor;
pub mod hooks;
pub mod input;

/// Trace replay
pub mod replay;

pub mod subsystem;

pub use subsystem::MouseSubsystem;
