//! Embedder hooks
//!
//! Lets the embedding application observe pointer visibility, pointer
//! position, keyboard visibility and buffer swaps. Applications implement
//! [`InputHooks`] (every method defaults to doing nothing) or assemble
//! independent closures with [`CallbackHooks`], and install the result in a
//! [`HookRegistry`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, trace};

/// Notifications delivered to the embedding application
pub trait InputHooks: Send + Sync {
    /// Pointer shown (`true`) or hidden (`false`)
    fn on_show_mouse(&self, _visible: bool) {}

    /// Pointer moved; coordinates are fractions of the focused window size
    fn on_mouse_move(&self, _x: f32, _y: f32) {}

    /// Soft keyboard shown or hidden
    fn on_show_keyboard(&self, _visible: bool) {}

    /// Whether a buffer swap really swaps the EGL surface
    fn on_swap_buffers_performs_swap(&self, _performs_swap: bool) {}

    /// Called right before buffers are swapped
    fn on_before_swap(&self) {}
}

/// Hooks that ignore every notification
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHooks;

impl InputHooks for NoopHooks {}

type BoolHook = Box<dyn Fn(bool) + Send + Sync>;
type MoveHook = Box<dyn Fn(f32, f32) + Send + Sync>;
type UnitHook = Box<dyn Fn() + Send + Sync>;

/// Hooks built from optional closures, each set independently
#[derive(Default)]
pub struct CallbackHooks {
    show_mouse: Option<BoolHook>,
    mouse_move: Option<MoveHook>,
    show_keyboard: Option<BoolHook>,
    performs_swap: Option<BoolHook>,
    before_swap: Option<UnitHook>,
}

impl CallbackHooks {
    /// Create with every hook unset
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the show/hide mouse hook
    pub fn show_mouse(mut self, f: impl Fn(bool) + Send + Sync + 'static) -> Self {
        self.show_mouse = Some(Box::new(f));
        self
    }

    /// Set the mouse move hook
    pub fn mouse_move(mut self, f: impl Fn(f32, f32) + Send + Sync + 'static) -> Self {
        self.mouse_move = Some(Box::new(f));
        self
    }

    /// Set the keyboard visibility hook
    pub fn show_keyboard(mut self, f: impl Fn(bool) + Send + Sync + 'static) -> Self {
        self.show_keyboard = Some(Box::new(f));
        self
    }

    /// Set the swap-performs-swap hook
    pub fn swap_buffers_performs_swap(mut self, f: impl Fn(bool) + Send + Sync + 'static) -> Self {
        self.performs_swap = Some(Box::new(f));
        self
    }

    /// Set the before-swap hook
    pub fn before_swap(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.before_swap = Some(Box::new(f));
        self
    }
}

impl std::fmt::Debug for CallbackHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackHooks")
            .field("show_mouse", &self.show_mouse.is_some())
            .field("mouse_move", &self.mouse_move.is_some())
            .field("show_keyboard", &self.show_keyboard.is_some())
            .field("performs_swap", &self.performs_swap.is_some())
            .field("before_swap", &self.before_swap.is_some())
            .finish()
    }
}

impl InputHooks for CallbackHooks {
    fn on_show_mouse(&self, visible: bool) {
        if let Some(f) = &self.show_mouse {
            f(visible);
        }
    }

    fn on_mouse_move(&self, x: f32, y: f32) {
        if let Some(f) = &self.mouse_move {
            f(x, y);
        }
    }

    fn on_show_keyboard(&self, visible: bool) {
        if let Some(f) = &self.show_keyboard {
            f(visible);
        }
    }

    fn on_swap_buffers_performs_swap(&self, performs_swap: bool) {
        if let Some(f) = &self.performs_swap {
            f(performs_swap);
        }
    }

    fn on_before_swap(&self) {
        if let Some(f) = &self.before_swap {
            f();
        }
    }
}

/// Installed hooks plus the buffer swap flags
pub struct HookRegistry {
    hooks: RwLock<Arc<dyn InputHooks>>,

    /// Whether swap buffers actually performs an EGL swap
    performs_swap: AtomicBool,

    /// Set when a new EGL context was created, cleared when read
    new_egl_created: AtomicBool,
}

impl HookRegistry {
    /// Create a registry with [`NoopHooks`] installed
    pub fn new() -> Self {
        Self {
            hooks: RwLock::new(Arc::new(NoopHooks)),
            performs_swap: AtomicBool::new(true),
            new_egl_created: AtomicBool::new(false),
        }
    }

    /// Install hooks, replacing the previous ones
    pub fn set_hooks(&self, hooks: Arc<dyn InputHooks>) {
        *self.hooks.write() = hooks;
        debug!("Input hooks installed");
    }

    /// Go back to [`NoopHooks`]
    pub fn clear_hooks(&self) {
        *self.hooks.write() = Arc::new(NoopHooks);
        debug!("Input hooks cleared");
    }

    fn current(&self) -> Arc<dyn InputHooks> {
        // Clone out so hooks run without the lock held
        self.hooks.read().clone()
    }

    /// Notify pointer visibility
    pub fn show_mouse(&self, visible: bool) {
        trace!("show_mouse({})", visible);
        self.current().on_show_mouse(visible);
    }

    /// Notify pointer position as window fractions
    pub fn mouse_move(&self, x: f32, y: f32) {
        self.current().on_mouse_move(x, y);
    }

    /// Notify soft keyboard visibility
    pub fn show_keyboard(&self, visible: bool) {
        trace!("show_keyboard({})", visible);
        self.current().on_show_keyboard(visible);
    }

    /// Record whether swap buffers performs a real swap and notify the hooks
    pub fn set_swap_buffers_performs_swap(&self, performs_swap: bool) {
        self.performs_swap.store(performs_swap, Ordering::SeqCst);
        self.current().on_swap_buffers_performs_swap(performs_swap);
    }

    /// Whether swap buffers performs a real swap
    pub fn swap_buffers_performs_swap(&self) -> bool {
        self.performs_swap.load(Ordering::SeqCst)
    }

    /// Run the before-swap hook; returns whether the swap should happen
    pub fn before_swap(&self) -> bool {
        self.current().on_before_swap();
        self.swap_buffers_performs_swap()
    }

    /// Record that a new EGL context was created
    pub fn mark_egl_created(&self) {
        self.new_egl_created.store(true, Ordering::SeqCst);
    }

    /// Whether a new EGL context was created since the last call
    pub fn take_new_egl_created(&self) -> bool {
        self.new_egl_created.swap(false, Ordering::SeqCst)
    }
}

impl Default for HookRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookRegistry")
            .field("performs_swap", &self.swap_buffers_performs_swap())
            .field("new_egl_created", &self.new_egl_created.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}
