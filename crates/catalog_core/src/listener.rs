use shared::events::CatalogEvent;

use crate::error::SubscribeError;

pub const MAX_LISTENERS: usize = 16;

/// Receives events after the triggering mutation and its persistence sync
/// have completed.
pub trait CatalogListener {
    fn on_event(&mut self, event: &CatalogEvent);
}

impl<F> CatalogListener for F
where
    F: FnMut(&CatalogEvent),
{
    fn on_event(&mut self, event: &CatalogEvent) {
        self(event)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Default)]
pub(crate) struct Listeners {
    next_id: u64,
    entries: Vec<(SubscriptionId, Box<dyn CatalogListener>)>,
}

impl Listeners {
    pub(crate) fn subscribe(
        &mut self,
        listener: Box<dyn CatalogListener>,
    ) -> Result<SubscriptionId, SubscribeError> {
        if self.entries.len() >= MAX_LISTENERS {
            return Err(SubscribeError::LimitReached {
                limit: MAX_LISTENERS,
            });
        }
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, listener));
        Ok(id)
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub(crate) fn notify(&mut self, event: &CatalogEvent) {
        for (_, listener) in &mut self.entries {
            listener.on_event(event);
        }
    }

    pub(crate) fn clear(&mut self) -> usize {
        let released = self.entries.len();
        self.entries.clear();
        released
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
