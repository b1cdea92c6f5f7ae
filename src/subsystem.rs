//! Mouse subsystem context
//!
//! One [`MouseSubsystem`] owns everything the pointer path touches: the
//! translator state, the cursor driver, the outbound sink, the focus window
//! and the tracked pointer position. All of it sits behind a single activity
//! lock, so events injected from arbitrary threads and events arriving on the
//! native callback thread are serialized.
//!
//! ```text
//! inject_mouse / on_mouse
//!   └─> lock ─> InputTranslator ─> MotionTracker ─> EventSink
//!                                     └─> CursorDriver::move_cursor (visible, not relative)
//! ```

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, trace, warn};

use crate::cursor::{self, Cursor, CursorDriver, CursorError, Surface, SystemCursor};
use crate::hooks::HookRegistry;
use crate::input::{
    self, EventSink, InputError, InputTranslator, MouseEvent, RawPointerEvent, TranslatorOptions,
    Window,
};

struct MouseState<S> {
    translator: InputTranslator,
    driver: Box<dyn CursorDriver>,
    sink: S,
    window: Option<Window>,
    position: (f32, f32),
    cursor_visible: bool,
    relative_mode: bool,
    default_cursor: Option<Cursor>,
    /// Cursor selected with `set_cursor`; `None` falls back to the default
    current_cursor: Option<Cursor>,
    /// Views of handles created through the subsystem and not yet freed
    live_cursors: Vec<Cursor>,
    shut_down: bool,
}

/// Forwards translated events while keeping pointer position current
struct MotionTracker<'a, S> {
    sink: &'a mut S,
    driver: &'a mut Box<dyn CursorDriver>,
    window: Option<Window>,
    position: &'a mut (f32, f32),
    cursor_visible: bool,
    relative_mode: bool,
}

impl<S: EventSink> EventSink for MotionTracker<'_, S> {
    fn send(&mut self, event: MouseEvent) -> input::Result<()> {
        if let MouseEvent::Motion { x, y, relative, .. } = event {
            let (px, py) = if relative {
                (self.position.0 + x, self.position.1 + y)
            } else {
                (x, y)
            };
            let (px, py) = match self.window {
                Some(window) => window.clamp(px, py),
                None => (px, py),
            };
            *self.position = (px, py);

            if self.cursor_visible && !self.relative_mode {
                self.driver.move_cursor(px, py, self.window.as_ref());
            }
        }
        self.sink.send(event)
    }
}

/// Pointer state of one windowing subsystem instance
pub struct MouseSubsystem<S> {
    state: Mutex<MouseState<S>>,
    hooks: Arc<HookRegistry>,
}

impl<S: EventSink> MouseSubsystem<S> {
    /// Initialize the subsystem and show the driver's default cursor
    pub fn new(
        options: TranslatorOptions,
        mut driver: Box<dyn CursorDriver>,
        sink: S,
        hooks: Arc<HookRegistry>,
    ) -> cursor::Result<Self> {
        let default_cursor = driver.default_cursor()?;
        if let Err(e) = driver.show_cursor(Some(&default_cursor)) {
            warn!("Failed to show default cursor: {}", e);
        }

        info!(
            "Mouse subsystem initialized (driver: {}, relative moves: {})",
            driver.name(),
            options.accept_move_relative
        );

        Ok(Self {
            state: Mutex::new(MouseState {
                translator: InputTranslator::new(options),
                driver,
                sink,
                window: None,
                position: (0.0, 0.0),
                cursor_visible: true,
                relative_mode: false,
                default_cursor: Some(default_cursor),
                current_cursor: None,
                live_cursors: Vec::new(),
                shut_down: false,
            }),
            hooks,
        })
    }

    /// Set or clear the window pointer events are addressed to
    pub fn set_window(&self, window: Option<Window>) {
        let mut state = self.state.lock();
        if let Some(window) = window {
            state.position = window.clamp(state.position.0, state.position.1);
        }
        debug!("Mouse focus window: {:?}", window);
        state.window = window;
    }

    /// Current focus window
    pub fn window(&self) -> Option<Window> {
        self.state.lock().window
    }

    /// Deliver a pointer event from the native callback thread
    pub fn on_mouse(&self, event: RawPointerEvent) -> input::Result<()> {
        self.dispatch(event)
    }

    /// Inject a pointer event from any thread.
    ///
    /// Takes the activity lock for the whole translation, so concurrent
    /// injections never interleave their events or lose button state.
    pub fn inject_mouse(
        &self,
        button_mask: u32,
        action: i32,
        x: f32,
        y: f32,
        relative: bool,
    ) -> input::Result<()> {
        self.dispatch(RawPointerEvent::new(button_mask, action, x, y, relative))
    }

    fn dispatch(&self, event: RawPointerEvent) -> input::Result<()> {
        let mut guard = self.state.lock();
        let state = &mut *guard;

        if state.shut_down {
            return Err(InputError::InvalidState(
                "mouse subsystem is shut down".to_string(),
            ));
        }

        trace!("Pointer event {:?}", event);
        let mut tracker = MotionTracker {
            sink: &mut state.sink,
            driver: &mut state.driver,
            window: state.window,
            position: &mut state.position,
            cursor_visible: state.cursor_visible,
            relative_mode: state.relative_mode,
        };
        state
            .translator
            .translate_raw(state.window.map(|w| w.id), event, &mut tracker)
    }

    /// Create a bitmap cursor
    pub fn create_cursor(
        &self,
        surface: &Surface,
        hot_x: i32,
        hot_y: i32,
    ) -> cursor::Result<Cursor> {
        let mut state = self.live_state()?;
        let cursor = state.driver.create_cursor(surface, hot_x, hot_y)?;
        state.live_cursors.push(cursor.view());
        Ok(cursor)
    }

    /// Create a platform cursor shape
    pub fn create_system_cursor(&self, id: SystemCursor) -> cursor::Result<Cursor> {
        let mut state = self.live_state()?;
        let cursor = state.driver.create_system_cursor(id)?;
        state.live_cursors.push(cursor.view());
        Ok(cursor)
    }

    /// Make `cursor` current, showing it unless the pointer is hidden
    pub fn set_cursor(&self, cursor: &Cursor) -> cursor::Result<()> {
        let mut state = self.live_state()?;
        state.current_cursor = Some(cursor.view());
        if state.cursor_visible {
            state.driver.show_cursor(Some(cursor))?;
        }
        Ok(())
    }

    /// Show or hide the pointer
    pub fn show_cursor(&self, visible: bool) -> cursor::Result<()> {
        let mut guard = self.live_state()?;
        let state = &mut *guard;
        state.cursor_visible = visible;

        if !visible {
            return state.driver.show_cursor(None);
        }
        let shown = state
            .current_cursor
            .as_ref()
            .or(state.default_cursor.as_ref());
        state.driver.show_cursor(shown)
    }

    /// Release a cursor; the default cursor takes over if it was current.
    ///
    /// Handles created through the subsystem are already released by
    /// [`shutdown`](Self::shutdown), so freeing them afterwards is a no-op.
    pub fn free_cursor(&self, cursor: Cursor) -> cursor::Result<()> {
        let mut guard = self.state.lock();
        let state = &mut *guard;

        let tracked = state
            .live_cursors
            .iter()
            .position(|live| live.serial() == cursor.serial());
        if let Some(index) = tracked {
            state.live_cursors.swap_remove(index);
        } else if state.shut_down {
            debug!("Cursor {:?} already released at shutdown", cursor.data());
            return Ok(());
        }

        let is_current = state
            .current_cursor
            .as_ref()
            .is_some_and(|current| current.serial() == cursor.serial());
        if is_current {
            state.current_cursor = None;
            if state.cursor_visible {
                if let Err(e) = state.driver.show_cursor(state.default_cursor.as_ref()) {
                    warn!("Failed to restore default cursor: {}", e);
                }
            }
        }
        state.driver.free_cursor(cursor);
        Ok(())
    }

    /// Enable or disable relative pointer reporting
    pub fn set_relative_mode(&self, enabled: bool) -> cursor::Result<()> {
        let mut state = self.live_state()?;
        state.driver.set_relative_mode(enabled)?;
        state.relative_mode = enabled;
        debug!("Relative mouse mode: {}", enabled);
        Ok(())
    }

    fn live_state(&self) -> cursor::Result<parking_lot::MutexGuard<'_, MouseState<S>>> {
        let state = self.state.lock();
        if state.shut_down {
            return Err(CursorError::Unsupported(
                "mouse subsystem is shut down".to_string(),
            ));
        }
        Ok(state)
    }
}

impl<S> MouseSubsystem<S> {
    /// Tracked pointer position in window coordinates
    pub fn position(&self) -> (f32, f32) {
        self.state.lock().position
    }

    /// Whether the pointer is shown
    pub fn is_cursor_visible(&self) -> bool {
        self.state.lock().cursor_visible
    }

    /// Whether relative mode is on
    pub fn relative_mode(&self) -> bool {
        self.state.lock().relative_mode
    }

    /// Pointer events translated so far
    pub fn events_processed(&self) -> u64 {
        self.state.lock().translator.events_processed()
    }

    /// Pointer events dropped so far
    pub fn events_dropped(&self) -> u64 {
        self.state.lock().translator.events_dropped()
    }

    /// Run `f` with the sink while holding the activity lock
    pub fn with_sink<R>(&self, f: impl FnOnce(&mut S) -> R) -> R {
        f(&mut self.state.lock().sink)
    }

    /// Embedder hooks
    pub fn hooks(&self) -> &Arc<HookRegistry> {
        &self.hooks
    }

    /// Release live cursor handles, the default cursor and driver resources.
    ///
    /// Idempotent; also runs on drop.
    pub fn shutdown(&self) {
        let mut guard = self.state.lock();
        let state = &mut *guard;
        if state.shut_down {
            return;
        }
        state.shut_down = true;

        state.current_cursor = None;
        let leftover = state.live_cursors.len();
        for cursor in state.live_cursors.drain(..) {
            state.driver.free_cursor(cursor);
        }
        if leftover > 0 {
            debug!("Released {} cursors left by the application", leftover);
        }
        if let Some(cursor) = state.default_cursor.take() {
            state.driver.free_cursor(cursor);
        }
        state.translator.reset();
        state.driver.shutdown();

        info!("Mouse subsystem shut down ({} driver)", state.driver.name());
    }
}

impl<S> Drop for MouseSubsystem<S> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl<S> std::fmt::Debug for MouseSubsystem<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("MouseSubsystem")
            .field("driver", &state.driver.name())
            .field("window", &state.window)
            .field("position", &state.position)
            .field("cursor_visible", &state.cursor_visible)
            .field("relative_mode", &state.relative_mode)
            .finish()
    }
}
