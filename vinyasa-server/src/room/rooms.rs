use crate::room::Room;
use crate::signaling::EventSink;
use chrono::Utc;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::{debug, info};
use vinyasa_core::{ConnectionId, Permissions, Role, ServerEvent, SessionId, UserId};

/// Map of live rooms keyed by session id. Each entry serializes all
/// mutation of that session's membership and permissions; unrelated
/// sessions never contend on a shared lock.
pub struct Rooms {
    map: DashMap<SessionId, Room>,
    sink: Arc<dyn EventSink>,
    default_max_participants: usize,
}

impl Rooms {
    pub fn new(sink: Arc<dyn EventSink>, default_max_participants: usize) -> Self {
        Self {
            map: DashMap::new(),
            sink,
            default_max_participants,
        }
    }

    /// `0` for unknown or destroyed rooms; a missing room is an empty room.
    pub fn current_count(&self, session_id: &SessionId) -> usize {
        self.map.get(session_id).map(|r| r.count()).unwrap_or(0)
    }

    pub fn room_exists(&self, session_id: &SessionId) -> bool {
        self.map.contains_key(session_id)
    }

    /// Insertion-order snapshot of the room's members. Not a live view.
    pub fn peers(&self, session_id: &SessionId, excluding: Option<ConnectionId>) -> Vec<ConnectionId> {
        self.map
            .get(session_id)
            .map(|r| r.members(excluding))
            .unwrap_or_default()
    }

    pub fn permissions_of(&self, session_id: &SessionId, user: &UserId) -> Option<Permissions> {
        self.map
            .get(session_id)?
            .permissions_of(user)
            .cloned()
    }

    pub fn connection_of(&self, session_id: &SessionId, user: &UserId) -> Option<ConnectionId> {
        self.map.get(session_id)?.connection_of(user)
    }

    pub(crate) fn join(&self, session_id: &SessionId, handle: ConnectionId, user: UserId, role: Role) {
        let mut room = self.map.entry(session_id.clone()).or_insert_with(|| {
            info!("Creating room {session_id}");
            Room::new(session_id.clone(), self.default_max_participants)
        });
        room.join(handle, user, role, Utc::now());
    }

    /// Removes the connection from its room; destroys the room (and its
    /// permission records) when the last connection leaves.
    pub(crate) fn leave(&self, session_id: &SessionId, handle: ConnectionId) -> Option<UserId> {
        let user = {
            let mut room = self.map.get_mut(session_id)?;
            room.leave(handle)
        };

        if self
            .map
            .remove_if(session_id, |_, room| room.is_empty())
            .is_some()
        {
            info!("Room {session_id} is empty, destroying");
        }

        user
    }

    /// Run a closure against the room entry, holding its lock for the
    /// duration. This is the serialization point for multi-step state
    /// transitions such as the warn-to-ban cascade.
    pub(crate) fn with_room<R>(
        &self,
        session_id: &SessionId,
        f: impl FnOnce(&mut Room) -> R,
    ) -> Option<R> {
        let mut room = self.map.get_mut(session_id)?;
        Some(f(&mut room))
    }

    /// Best-effort fan-out to every current member except `excluding`.
    /// The member list is snapshotted under the entry lock, then delivery
    /// happens outside it; a peer that vanished in between is skipped.
    pub async fn broadcast(
        &self,
        session_id: &SessionId,
        event: ServerEvent,
        excluding: Option<ConnectionId>,
    ) -> usize {
        let targets = self.peers(session_id, excluding);

        let mut delivered = 0;
        for target in targets {
            if self.sink.deliver(target, event.clone()).await {
                delivered += 1;
            } else {
                debug!("Skipping broadcast to vanished connection {target}");
            }
        }
        delivered
    }
}
