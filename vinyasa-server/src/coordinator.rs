use crate::config::CoordinatorConfig;
use crate::moderation::{AuditSink, ModerationResult, Moderator};
use crate::quality::QualityAdvisor;
use crate::registry::{Connection, ConnectionRegistry};
use crate::relay::SignalingRelay;
use crate::room::Rooms;
use crate::signaling::EventSink;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;
use vinyasa_core::{
    AdaptationDirective, ClientMessage, ConnectionId, CoordinationError, IssueType,
    ModerationAction, Permissions, QualitySample, Role, ServerEvent, SessionId, SignalKind,
    UserId,
};

/// Front door of the coordination core: owns the registry, room state,
/// relay, moderator, and quality advisor, all wired to one event sink
/// and one audit sink. The WebSocket gateway and the tests both drive
/// this object.
pub struct Coordinator {
    registry: Arc<ConnectionRegistry>,
    rooms: Arc<Rooms>,
    relay: SignalingRelay,
    moderator: Moderator,
    advisor: QualityAdvisor,
    sink: Arc<dyn EventSink>,
}

impl Coordinator {
    pub fn new(
        sink: Arc<dyn EventSink>,
        audit: Arc<dyn AuditSink>,
        config: CoordinatorConfig,
    ) -> Self {
        let rooms = Arc::new(Rooms::new(sink.clone(), config.default_max_participants));
        let registry = Arc::new(ConnectionRegistry::new(rooms.clone()));
        let relay = SignalingRelay::new(registry.clone(), rooms.clone(), sink.clone());
        let moderator = Moderator::new(registry.clone(), rooms.clone(), audit, config.clone());
        let advisor = QualityAdvisor::new(rooms.clone(), sink.clone(), config.quality_history);

        Self {
            registry,
            rooms,
            relay,
            moderator,
            advisor,
            sink,
        }
    }

    pub fn registry(&self) -> &ConnectionRegistry {
        &self.registry
    }

    pub fn rooms(&self) -> &Rooms {
        &self.rooms
    }

    // Connection registry surface.

    pub async fn admit(
        &self,
        session_id: SessionId,
        user_id: UserId,
        role_hint: Role,
    ) -> Result<ConnectionId, CoordinationError> {
        self.registry.admit(session_id, user_id, role_hint).await
    }

    pub async fn remove(&self, handle: ConnectionId) {
        if let Some(connection) = self.registry.connection(handle) {
            self.advisor
                .forget(&connection.session_id, &connection.user_id);
        }
        self.registry.remove(handle).await;
    }

    pub fn list_peers(
        &self,
        session_id: &SessionId,
        excluding: Option<ConnectionId>,
    ) -> Vec<ConnectionId> {
        self.registry.list_peers(session_id, excluding)
    }

    pub fn role_of(&self, handle: ConnectionId) -> Result<Role, CoordinationError> {
        self.registry.role_of(handle)
    }

    pub fn connection(&self, handle: ConnectionId) -> Option<Connection> {
        self.registry.connection(handle)
    }

    // Room state surface.

    pub fn current_count(&self, session_id: &SessionId) -> usize {
        self.rooms.current_count(session_id)
    }

    pub fn permissions_of(&self, session_id: &SessionId, user_id: &UserId) -> Option<Permissions> {
        self.rooms.permissions_of(session_id, user_id)
    }

    pub async fn broadcast(
        &self,
        session_id: &SessionId,
        event: ServerEvent,
        excluding: Option<ConnectionId>,
    ) -> usize {
        self.rooms.broadcast(session_id, event, excluding).await
    }

    // Relay surface.

    pub async fn forward(
        &self,
        from: ConnectionId,
        to: ConnectionId,
        kind: SignalKind,
        payload: Value,
    ) -> Result<(), CoordinationError> {
        self.relay.forward(from, to, kind, payload).await
    }

    pub async fn broadcast_to_room(
        &self,
        from: ConnectionId,
        session_id: &SessionId,
        kind: SignalKind,
        payload: Value,
    ) -> Result<usize, CoordinationError> {
        self.relay
            .broadcast_to_room(from, session_id, kind, payload)
            .await
    }

    // Moderation surface.

    pub async fn moderate(
        &self,
        session_id: &SessionId,
        moderator: ConnectionId,
        target: &UserId,
        action: ModerationAction,
        reason: Option<String>,
        duration_minutes: Option<i64>,
    ) -> Result<ModerationResult, CoordinationError> {
        self.moderator
            .moderate(session_id, moderator, target, action, reason, duration_minutes)
            .await
    }

    // Quality surface.

    pub async fn record_sample(
        &self,
        session_id: &SessionId,
        user_id: &UserId,
        sample: QualitySample,
    ) -> u8 {
        self.advisor.record_sample(session_id, user_id, sample).await
    }

    pub async fn adapt(
        &self,
        session_id: &SessionId,
        user_id: &UserId,
        issue: IssueType,
    ) -> AdaptationDirective {
        self.advisor.adapt(session_id, user_id, issue).await
    }

    /// Dispatch one inbound client message from the gateway. Rejections
    /// go back to the sender only; nobody else hears about failures.
    pub async fn handle_message(&self, handle: ConnectionId, message: ClientMessage) {
        let Some(connection) = self.registry.connection(handle) else {
            debug!("Dropping message from unregistered connection {handle}");
            return;
        };

        match message {
            ClientMessage::Signal { to, kind, payload } => {
                let result = match self.rooms.connection_of(&connection.session_id, &to) {
                    Some(target) => self.relay.forward(handle, target, kind, payload).await,
                    None => Err(CoordinationError::TargetNotFound),
                };
                if let Err(e) = result {
                    self.reject(handle, e).await;
                }
            }

            ClientMessage::Broadcast { kind, payload } => {
                if let Err(e) = self
                    .relay
                    .broadcast_to_room(handle, &connection.session_id, kind, payload)
                    .await
                {
                    self.reject(handle, e).await;
                }
            }

            ClientMessage::Moderate {
                target,
                action,
                reason,
                duration_minutes,
            } => {
                if let Err(e) = self
                    .moderator
                    .moderate(
                        &connection.session_id,
                        handle,
                        &target,
                        action,
                        reason,
                        duration_minutes,
                    )
                    .await
                {
                    self.reject(handle, e).await;
                }
            }

            ClientMessage::QualityReport { sample } => {
                self.advisor
                    .record_sample(&connection.session_id, &connection.user_id, sample)
                    .await;
            }

            ClientMessage::Leave => {
                self.remove(handle).await;
            }
        }
    }

    async fn reject(&self, handle: ConnectionId, error: CoordinationError) {
        self.sink
            .deliver(
                handle,
                ServerEvent::Error {
                    message: error.to_string(),
                },
            )
            .await;
    }
}
