//! Event delivery to the owning event system
//!
//! The translator never queues events itself; every normalized event is handed
//! to an [`EventSink`] as soon as it is produced.

use crossbeam_channel::Sender;
use tracing::warn;

use crate::input::error::{InputError, Result};
use crate::input::mouse::MouseEvent;

/// Consumer of normalized mouse events
pub trait EventSink {
    /// Deliver one event
    fn send(&mut self, event: MouseEvent) -> Result<()>;
}

impl EventSink for Vec<MouseEvent> {
    fn send(&mut self, event: MouseEvent) -> Result<()> {
        self.push(event);
        Ok(())
    }
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn send(&mut self, event: MouseEvent) -> Result<()> {
        (**self).send(event)
    }
}

impl<S: EventSink + ?Sized> EventSink for Box<S> {
    fn send(&mut self, event: MouseEvent) -> Result<()> {
        (**self).send(event)
    }
}

/// Forwards events to a consumer thread
impl EventSink for Sender<MouseEvent> {
    fn send(&mut self, event: MouseEvent) -> Result<()> {
        Sender::send(self, event).map_err(|e| {
            warn!("Event receiver disconnected, dropping {:?}", e.into_inner());
            InputError::EventSendFailed
        })
    }
}

/// Sink that discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn send(&mut self, _event: MouseEvent) -> Result<()> {
        Ok(())
    }
}
