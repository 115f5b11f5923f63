use chrono::{DateTime, Utc};
use serde_json::Value;
use tokio::sync::broadcast;

/// Fire-and-forget publisher for booking lifecycle events.
///
/// The statistics/analytics subsystem subscribes to pick up `job.completed`
/// facts; nothing in the core ever blocks on or fails because of a consumer.
/// Publishing is infallible: an event with no listeners simply reaches zero
/// subscribers.
#[derive(Debug, Clone)]
pub struct EventPublisher {
    sender: broadcast::Sender<PublishedEvent>,
}

/// Event as seen by subscribers
#[derive(Debug, Clone)]
pub struct PublishedEvent {
    pub name: String,
    pub context: Value,
    pub published_at: DateTime<Utc>,
}

impl EventPublisher {
    /// Create a publisher whose channel buffers up to `capacity` events for
    /// slow subscribers before they start lagging
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event. Returns how many subscribers it reached; zero means
    /// no one is listening, which is not an error.
    pub fn publish(&self, event_name: impl Into<String>, context: Value) -> usize {
        let event = PublishedEvent {
            name: event_name.into(),
            context,
            published_at: Utc::now(),
        };
        self.sender.send(event).unwrap_or(0)
    }

    /// Subscribe to all lifecycle events from this point on
    pub fn subscribe(&self) -> broadcast::Receiver<PublishedEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventPublisher {
    fn default() -> Self {
        Self::new(1000)
    }
}
