use crate::registry::Connection;
use crate::room::Rooms;
use chrono::Utc;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::{info, warn};
use vinyasa_core::{ConnectionId, CoordinationError, Role, ServerEvent, SessionId, UserId};

/// Tracks every live transport connection and which session it belongs
/// to. Admission joins the room (creating it on first use); removal is
/// idempotent and destroys the room when the last connection leaves.
pub struct ConnectionRegistry {
    connections: DashMap<ConnectionId, Connection>,
    rooms: Arc<Rooms>,
}

impl ConnectionRegistry {
    pub fn new(rooms: Arc<Rooms>) -> Self {
        Self {
            connections: DashMap::new(),
            rooms,
        }
    }

    /// Admit a connection for `(session, user)`. The caller has already
    /// authorized the user and checked capacity against the booking
    /// database; the only admission-time rejections here are empty ids
    /// and a ban that has not yet expired.
    pub async fn admit(
        &self,
        session_id: SessionId,
        user_id: UserId,
        role_hint: Role,
    ) -> Result<ConnectionId, CoordinationError> {
        if session_id.is_empty() || user_id.is_empty() {
            return Err(CoordinationError::InvalidSession);
        }

        if let Some(perms) = self.rooms.permissions_of(&session_id, &user_id) {
            if perms.is_banned(Utc::now()) {
                warn!("Rejecting banned user {user_id} for session {session_id}");
                return Err(CoordinationError::AlreadyBanned);
            }
        }

        // A reconnecting user replaces their stale connection.
        if let Some(stale) = self.rooms.connection_of(&session_id, &user_id) {
            info!("Replacing stale connection {stale} for user {user_id}");
            self.remove(stale).await;
        }

        let connection = Connection::new(session_id.clone(), user_id.clone(), role_hint);
        let handle = connection.id;
        self.connections.insert(handle, connection);
        self.rooms.join(&session_id, handle, user_id.clone(), role_hint);

        info!("Admitted {user_id} to session {session_id} as {}", role_hint.name());

        self.rooms
            .broadcast(
                &session_id,
                ServerEvent::ParticipantJoined {
                    session_id: session_id.clone(),
                    user_id,
                    role: role_hint,
                },
                Some(handle),
            )
            .await;

        Ok(handle)
    }

    /// Idempotent: removing an unknown or already-removed handle is a
    /// no-op. Leaves the room and notifies the remaining members.
    pub async fn remove(&self, handle: ConnectionId) {
        let Some((_, connection)) = self.connections.remove(&handle) else {
            return;
        };

        let left = self.rooms.leave(&connection.session_id, handle);
        info!(
            "Removed connection {handle} (user {}) from session {}",
            connection.user_id, connection.session_id
        );

        if left.is_some() {
            self.rooms
                .broadcast(
                    &connection.session_id,
                    ServerEvent::ParticipantLeft {
                        session_id: connection.session_id.clone(),
                        user_id: connection.user_id,
                    },
                    None,
                )
                .await;
        }
    }

    /// Snapshot of the other connections in the session, insertion order.
    pub fn list_peers(
        &self,
        session_id: &SessionId,
        excluding: Option<ConnectionId>,
    ) -> Vec<ConnectionId> {
        self.rooms.peers(session_id, excluding)
    }

    pub fn role_of(&self, handle: ConnectionId) -> Result<Role, CoordinationError> {
        self.connections
            .get(&handle)
            .map(|c| c.role)
            .ok_or(CoordinationError::TargetNotFound)
    }

    pub fn connection(&self, handle: ConnectionId) -> Option<Connection> {
        self.connections.get(&handle).map(|c| c.clone())
    }

    pub fn is_registered(&self, handle: ConnectionId) -> bool {
        self.connections.contains_key(&handle)
    }

    pub(crate) fn set_role(&self, handle: ConnectionId, role: Role) {
        if let Some(mut connection) = self.connections.get_mut(&handle) {
            connection.role = role;
        }
    }
}
