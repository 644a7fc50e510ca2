use crate::signaling::EventSink;
use async_trait::async_trait;
use axum::extract::ws::Message;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, warn};
use vinyasa_core::{ConnectionId, ServerEvent};

struct SignalingInner {
    peers: DashMap<ConnectionId, mpsc::UnboundedSender<Message>>,
}

/// Owns the outbound half of every live WebSocket. Each connection has
/// its own ordered channel, which is what gives per-(sender, target)
/// FIFO delivery: handlers run inbound messages sequentially and pushes
/// onto the target channel preserve that order.
#[derive(Clone)]
pub struct SignalingService {
    inner: Arc<SignalingInner>,
}

impl SignalingService {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(SignalingInner {
                peers: DashMap::new(),
            }),
        }
    }

    pub fn add_peer(&self, handle: ConnectionId, tx: mpsc::UnboundedSender<Message>) {
        self.inner.peers.insert(handle, tx);
    }

    pub fn remove_peer(&self, handle: &ConnectionId) {
        self.inner.peers.remove(handle);
    }

    fn send_event(&self, handle: ConnectionId, event: &ServerEvent) -> bool {
        let Some(peer) = self.inner.peers.get(&handle) else {
            warn!("Attempted to send event to disconnected connection {handle}");
            return false;
        };

        match serde_json::to_string(event) {
            Ok(json) => {
                if let Err(e) = peer.send(Message::Text(json.into())) {
                    error!("Failed to queue WS message for {handle}: {e:?}");
                    return false;
                }
                true
            }
            Err(e) => {
                error!("Failed to serialize server event: {e}");
                false
            }
        }
    }
}

impl Default for SignalingService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventSink for SignalingService {
    async fn deliver(&self, target: ConnectionId, event: ServerEvent) -> bool {
        self.send_event(target, &event)
    }
}
