use chrono::{DateTime, Utc};
use vinyasa_core::{ConnectionId, Role, SessionId, UserId};

/// One live transport connection and the identity it represents. Owned
/// exclusively by the registry and destroyed on disconnect; nothing here
/// outlives the process.
#[derive(Debug, Clone)]
pub struct Connection {
    pub id: ConnectionId,
    pub session_id: SessionId,
    pub user_id: UserId,
    pub role: Role,
    pub connected_at: DateTime<Utc>,
}

impl Connection {
    pub(crate) fn new(session_id: SessionId, user_id: UserId, role: Role) -> Self {
        Self {
            id: ConnectionId::new(),
            session_id,
            user_id,
            role,
            connected_at: Utc::now(),
        }
    }
}
