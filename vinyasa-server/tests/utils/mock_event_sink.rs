use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;
use vinyasa_core::{ConnectionId, ServerEvent};
use vinyasa_server::EventSink;

/// Mock EventSink that captures every delivered event for verification.
#[derive(Clone, Default)]
pub struct MockEventSink {
    events: Arc<Mutex<Vec<(ConnectionId, ServerEvent)>>>,
}

impl MockEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All captured (target, event) pairs in delivery order.
    pub async fn events(&self) -> Vec<(ConnectionId, ServerEvent)> {
        self.events.lock().await.clone()
    }

    /// Events delivered to one connection, in delivery order.
    pub async fn events_for(&self, target: ConnectionId) -> Vec<ServerEvent> {
        self.events
            .lock()
            .await
            .iter()
            .filter(|(t, _)| *t == target)
            .map(|(_, e)| e.clone())
            .collect()
    }

    pub async fn clear(&self) {
        self.events.lock().await.clear();
    }
}

#[async_trait]
impl EventSink for MockEventSink {
    async fn deliver(&self, target: ConnectionId, event: ServerEvent) -> bool {
        tracing::debug!("[MockEventSink] deliver to {target}: {event:?}");
        self.events.lock().await.push((target, event));
        true
    }
}
