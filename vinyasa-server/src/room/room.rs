use chrono::{DateTime, Utc};
use std::collections::HashMap;
use vinyasa_core::{ConnectionId, ParticipantStatus, Permissions, Role, SessionId, UserId};

/// State of one live session: the connections currently in it plus the
/// per-user permission records. Permissions are keyed by user id, not by
/// connection handle, so a reconnecting user keeps their mute/ban/warning
/// state for as long as the room lives.
pub struct Room {
    session_id: SessionId,
    members: Vec<ConnectionId>,
    users: HashMap<ConnectionId, UserId>,
    permissions: HashMap<UserId, Permissions>,
    max_participants: usize,
    created_at: DateTime<Utc>,
}

impl Room {
    pub(crate) fn new(session_id: SessionId, max_participants: usize) -> Self {
        Self {
            session_id,
            members: Vec::new(),
            users: HashMap::new(),
            permissions: HashMap::new(),
            max_participants,
            created_at: Utc::now(),
        }
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn max_participants(&self) -> usize {
        self.max_participants
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn count(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Members in insertion order, optionally excluding one handle.
    pub fn members(&self, excluding: Option<ConnectionId>) -> Vec<ConnectionId> {
        self.members
            .iter()
            .copied()
            .filter(|m| Some(*m) != excluding)
            .collect()
    }

    pub fn contains(&self, handle: ConnectionId) -> bool {
        self.users.contains_key(&handle)
    }

    pub fn user_of(&self, handle: ConnectionId) -> Option<&UserId> {
        self.users.get(&handle)
    }

    pub fn connection_of(&self, user: &UserId) -> Option<ConnectionId> {
        self.members
            .iter()
            .copied()
            .find(|m| self.users.get(m) == Some(user))
    }

    pub fn permissions_of(&self, user: &UserId) -> Option<&Permissions> {
        self.permissions.get(user)
    }

    /// Permission record for a user, created with role defaults on first
    /// join. Only the moderation state machine mutates it afterwards.
    pub(crate) fn permissions_mut(&mut self, user: &UserId) -> &mut Permissions {
        self.permissions
            .entry(user.clone())
            .or_insert_with(|| Permissions::for_role(Role::Attendee))
    }

    pub(crate) fn join(&mut self, handle: ConnectionId, user: UserId, role: Role, now: DateTime<Utc>) {
        if !self.members.contains(&handle) {
            self.members.push(handle);
        }
        self.users.insert(handle, user.clone());

        let perms = self
            .permissions
            .entry(user)
            .or_insert_with(|| Permissions::for_role(role));

        // Lazy ban expiry: an elapsed ban is cleared on readmission.
        if perms.status == ParticipantStatus::Banned && !perms.is_banned(now) {
            perms.status = ParticipantStatus::Active;
            perms.banned_until = None;
        }
    }

    pub(crate) fn leave(&mut self, handle: ConnectionId) -> Option<UserId> {
        self.members.retain(|m| *m != handle);
        self.users.remove(&handle)
    }
}
