//! Mouse subsystem integration tests
//!
//! Injection from several threads, the native path, and the channel sink.

use std::sync::Arc;
use std::thread;

use droid_pointer::cursor::{CursorBackend, HeadlessPlatform, PlatformCursorDriver};
use droid_pointer::hooks::HookRegistry;
use droid_pointer::input::{
    ButtonState, MouseButton, MouseEvent, RawPointerEvent, TranslatorOptions, Window, WindowId,
};
use droid_pointer::MouseSubsystem;
use parking_lot::Mutex;

fn subsystem_with_window() -> MouseSubsystem<Vec<MouseEvent>> {
    let subsystem = MouseSubsystem::new(
        TranslatorOptions::default(),
        Box::new(PlatformCursorDriver::new(HeadlessPlatform::default())),
        Vec::new(),
        Arc::new(HookRegistry::new()),
    )
    .unwrap();
    subsystem.set_window(Some(Window::new(3, 1280, 720)));
    subsystem
}

#[test]
fn test_concurrent_injection_keeps_events_grouped() {
    const ITERATIONS: usize = 250;

    let subsystem = Arc::new(subsystem_with_window());
    let handles: Vec<_> = [0x1u32, 0x2u32]
        .into_iter()
        .map(|mask| {
            let subsystem = subsystem.clone();
            thread::spawn(move || {
                for i in 0..ITERATIONS {
                    let x = i as f32;
                    subsystem.inject_mouse(mask, 0, x, 1.0, false).unwrap();
                    subsystem.inject_mouse(0, 1, x, 1.0, false).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let events = subsystem.with_sink(std::mem::take);
    let motions = events
        .iter()
        .filter(|e| matches!(e, MouseEvent::Motion { .. }))
        .count();

    // Every call emits exactly one motion, and no call was lost
    assert_eq!(motions, 2 * 2 * ITERATIONS);
    assert_eq!(subsystem.events_processed(), (2 * 2 * ITERATIONS) as u64);

    // A button event always directly follows the motion of its own call
    for (i, event) in events.iter().enumerate() {
        if matches!(event, MouseEvent::Button { .. }) {
            assert!(i > 0, "button event without preceding motion");
            assert!(matches!(events[i - 1], MouseEvent::Motion { .. }));
        }
    }
}

#[test]
fn test_native_and_injected_events_share_state() {
    let subsystem = subsystem_with_window();

    // Pressed on the native path, released by injection
    subsystem
        .on_mouse(RawPointerEvent::new(0x2, 0, 10.0, 10.0, false))
        .unwrap();
    subsystem.inject_mouse(0, 1, 10.0, 10.0, false).unwrap();

    let events = subsystem.with_sink(std::mem::take);
    assert_eq!(
        events.last(),
        Some(&MouseEvent::Button {
            window: WindowId(3),
            button: MouseButton::Right,
            state: ButtonState::Released,
        })
    );
}

#[test]
fn test_channel_sink_delivers_to_consumer_thread() {
    let (tx, rx) = crossbeam_channel::unbounded();
    let platform = Arc::new(Mutex::new(HeadlessPlatform::default()));
    let hooks = Arc::new(HookRegistry::new());
    let driver = CursorBackend::Platform.build(platform, hooks.clone());
    let subsystem = MouseSubsystem::new(TranslatorOptions::default(), driver, tx, hooks).unwrap();
    subsystem.set_window(Some(Window::new(1, 100, 100)));

    let consumer = thread::spawn(move || rx.iter().take(3).collect::<Vec<_>>());

    subsystem.inject_mouse(0x4, 0, 5.0, 5.0, false).unwrap();
    subsystem.inject_mouse(0, 8, 1.0, 0.0, false).unwrap();

    let received = consumer.join().unwrap();
    assert!(matches!(
        received[1],
        MouseEvent::Button {
            button: MouseButton::Middle,
            state: ButtonState::Pressed,
            ..
        }
    ));
    assert!(matches!(received[2], MouseEvent::Wheel { x, .. } if x == 1.0));
}

#[test]
fn test_disconnected_channel_reports_send_failure() {
    let (tx, rx) = crossbeam_channel::unbounded::<MouseEvent>();
    drop(rx);
    let subsystem = MouseSubsystem::new(
        TranslatorOptions::default(),
        Box::new(PlatformCursorDriver::new(HeadlessPlatform::default())),
        tx,
        Arc::new(HookRegistry::new()),
    )
    .unwrap();
    subsystem.set_window(Some(Window::new(1, 10, 10)));

    let err = subsystem.inject_mouse(0, 2, 1.0, 1.0, false).unwrap_err();
    assert!(matches!(
        err,
        droid_pointer::input::InputError::EventSendFailed
    ));
}

#[test]
fn test_hooks_registry_flags() {
    let subsystem = subsystem_with_window();
    let hooks = subsystem.hooks();

    assert!(hooks.swap_buffers_performs_swap());
    hooks.set_swap_buffers_performs_swap(false);
    assert!(!hooks.swap_buffers_performs_swap());

    hooks.mark_egl_created();
    assert!(hooks.take_new_egl_created());
    assert!(!hooks.take_new_egl_created());
}
