use crate::registry::ConnectionRegistry;
use crate::room::Rooms;
use crate::signaling::EventSink;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;
use vinyasa_core::{ConnectionId, CoordinationError, ServerEvent, SessionId, SignalKind};

/// Pure envelope router for peer-to-peer negotiation traffic. Payloads
/// are never parsed; the kind tag only selects the outbound event name.
/// Messages are not durable: a target that is gone means a dropped
/// message, and the peers' own negotiation protocol retries.
pub struct SignalingRelay {
    registry: Arc<ConnectionRegistry>,
    rooms: Arc<Rooms>,
    sink: Arc<dyn EventSink>,
}

impl SignalingRelay {
    pub fn new(
        registry: Arc<ConnectionRegistry>,
        rooms: Arc<Rooms>,
        sink: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            registry,
            rooms,
            sink,
        }
    }

    /// Route one envelope to exactly one target connection in the same
    /// session. `TargetNotFound` if either end is no longer registered.
    pub async fn forward(
        &self,
        from: ConnectionId,
        to: ConnectionId,
        kind: SignalKind,
        payload: Value,
    ) -> Result<(), CoordinationError> {
        let sender = self
            .registry
            .connection(from)
            .ok_or(CoordinationError::TargetNotFound)?;
        let target = self
            .registry
            .connection(to)
            .ok_or(CoordinationError::TargetNotFound)?;

        // Handles from another session are not visible to this sender.
        if target.session_id != sender.session_id {
            return Err(CoordinationError::TargetNotFound);
        }

        let event = ServerEvent::relayed(kind, sender.user_id, payload);
        if !self.sink.deliver(to, event).await {
            debug!("Dropped {} envelope for vanished connection {to}", kind.event_name());
        }
        Ok(())
    }

    /// Fan one envelope out to everyone else in the sender's room.
    /// Returns the delivered count.
    pub async fn broadcast_to_room(
        &self,
        from: ConnectionId,
        session_id: &SessionId,
        kind: SignalKind,
        payload: Value,
    ) -> Result<usize, CoordinationError> {
        let sender = self
            .registry
            .connection(from)
            .ok_or(CoordinationError::TargetNotFound)?;
        if sender.session_id != *session_id {
            return Err(CoordinationError::TargetNotFound);
        }

        let event = ServerEvent::relayed(kind, sender.user_id, payload);
        Ok(self.rooms.broadcast(session_id, event, Some(from)).await)
    }
}
