// Last-request-wins slot for one view. Each request takes a ticket; only the
// newest ticket may publish, so a slow stale response cannot overwrite a
// newer one.
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    pub generation: u64,
}

#[derive(Debug)]
pub struct ViewSlot<T> {
    name: &'static str,
    issued: AtomicU64,
    latest: RwLock<Option<(u64, T)>>,
}

impl<T: Clone> ViewSlot<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            issued: AtomicU64::new(0),
            latest: RwLock::new(None),
        }
    }

    pub fn begin(&self) -> RequestTicket {
        let generation = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        RequestTicket { generation }
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        self.issued.load(Ordering::SeqCst) == ticket.generation
    }

    /// Stores `value` if `ticket` is still the newest request. Returns whether it was stored.
    pub async fn publish(&self, ticket: RequestTicket, value: T) -> bool {
        let mut latest = self.latest.write().await;
        let newer_than_stored = latest
            .as_ref()
            .map_or(true, |(stored, _)| ticket.generation > *stored);
        if self.is_current(ticket) && newer_than_stored {
            *latest = Some((ticket.generation, value));
            true
        } else {
            tracing::warn!(
                view = self.name,
                generation = ticket.generation,
                newest = self.issued.load(Ordering::SeqCst),
                "Discarding stale view response"
            );
            false
        }
    }

    pub async fn latest(&self) -> Option<T> {
        self.latest.read().await.as_ref().map(|(_, value)| value.clone())
    }

    pub async fn latest_generation(&self) -> Option<u64> {
        self.latest.read().await.as_ref().map(|(generation, _)| *generation)
    }
}
