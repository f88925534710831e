//! Bridges store notifications into a queue drained by the controller.

use catalog_core::CatalogListener;
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use shared::events::CatalogEvent;

pub const EVENT_QUEUE_CAPACITY: usize = 64;

pub fn event_queue() -> (EventForwarder, Receiver<CatalogEvent>) {
    let (tx, rx) = bounded(EVENT_QUEUE_CAPACITY);
    (EventForwarder { tx }, rx)
}

/// Store listener that enqueues each event for the controller.
pub struct EventForwarder {
    tx: Sender<CatalogEvent>,
}

impl CatalogListener for EventForwarder {
    fn on_event(&mut self, event: &CatalogEvent) {
        match self.tx.try_send(*event) {
            Ok(()) => tracing::debug!(event = event.name(), "queued catalog event"),
            Err(TrySendError::Full(_)) => {
                tracing::warn!(event = event.name(), "catalog event queue is full; dropping event");
            }
            Err(TrySendError::Disconnected(_)) => {
                tracing::warn!(event = event.name(), "catalog event receiver is gone");
            }
        }
    }
}
