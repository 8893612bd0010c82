//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] carries [`AdminEvent`]s from car cards up to the panel
//! that owns them. It is designed to be shared via `Arc<EventBus>`.

use rental_core::types::DbId;
use serde::Serialize;
use tokio::sync::broadcast;

use crate::notification::Notification;

// ---------------------------------------------------------------------------
// AdminEvent
// ---------------------------------------------------------------------------

/// Something a card wants its parent to know about.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AdminEvent {
    /// Show a notification toast.
    Notify(Notification),

    /// The car list is stale and should be refetched.
    RefreshRequested {
        /// The car whose mutation made the list stale, if any.
        car_id: Option<DbId>,
    },
}

impl AdminEvent {
    pub fn refresh_for(car_id: DbId) -> Self {
        AdminEvent::RefreshRequested {
            car_id: Some(car_id),
        }
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 64;

/// In-process fan-out event bus.
///
/// # Usage
///
/// ```rust
/// use rental_events::{AdminEvent, EventBus, Notification};
///
/// let bus = EventBus::default();
/// let mut rx = bus.subscribe();
///
/// bus.publish(AdminEvent::Notify(Notification::green("Saved")));
/// ```
pub struct EventBus {
    sender: broadcast::Sender<AdminEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed events are dropped
    /// and slow receivers will observe a `Lagged` error.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// If there are no active subscribers the event is silently dropped.
    pub fn publish(&self, event: AdminEvent) {
        if self.sender.send(event).is_err() {
            tracing::debug!("Admin event dropped, no subscribers");
        }
    }

    /// Notification followed by a refresh request, the pair every
    /// accepted mutation emits.
    pub fn publish_mutation(&self, notification: Notification, car_id: Option<DbId>) {
        self.publish(AdminEvent::Notify(notification));
        self.publish(AdminEvent::RefreshRequested { car_id });
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AdminEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
