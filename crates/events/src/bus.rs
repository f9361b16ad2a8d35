//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! Shared as `Arc<EventBus>` through the API state; publishing never
//! blocks a request.

use chrono::{DateTime, Utc};
use sadaqah_core::types::DbId;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// Event types
// ---------------------------------------------------------------------------

pub const CONTACT_SUBMITTED: &str = "contact.submitted";
pub const VOLUNTEER_SUBMITTED: &str = "volunteer.submitted";
pub const TESTIMONIAL_SUBMITTED: &str = "testimonial.submitted";
pub const DONATION_COMPLETED: &str = "donation.completed";

// ---------------------------------------------------------------------------
// PlatformEvent
// ---------------------------------------------------------------------------

/// Something that happened on the platform that admins may care about.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformEvent {
    /// Dot-separated event name, e.g. `"donation.completed"`.
    pub event_type: String,

    /// Table the event is about (e.g. `"contacts"`).
    pub entity: Option<String>,

    pub entity_id: Option<DbId>,

    /// Event-specific summary fields, rendered into notifications.
    pub payload: serde_json::Value,

    pub occurred_at: DateTime<Utc>,
}

impl PlatformEvent {
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            entity: None,
            entity_id: None,
            payload: serde_json::Value::Object(Default::default()),
            occurred_at: Utc::now(),
        }
    }

    pub fn with_entity(mut self, entity: impl Into<String>, id: DbId) -> Self {
        self.entity = Some(entity.into());
        self.entity_id = Some(id);
        self
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

const DEFAULT_CAPACITY: usize = 256;

/// Fan-out bus; every subscriber sees every event published after it
/// subscribed.
pub struct EventBus {
    sender: broadcast::Sender<PlatformEvent>,
}

impl EventBus {
    /// Slow receivers observe `RecvError::Lagged` once `capacity` events
    /// are buffered.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish to all current subscribers. Dropped silently when nobody
    /// is listening.
    pub fn publish(&self, event: PlatformEvent) {
        tracing::debug!(event_type = %event.event_type, entity_id = ?event.entity_id, "Event published");
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PlatformEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
