use crate::model::ids::{SessionId, UserId};
use crate::model::quality::AdaptationDirective;
use crate::model::role::Role;
use crate::model::signal::SignalKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Every outbound event the core emits toward connected clients. The
/// embedding transport serializes these however it likes; the bundled
/// WebSocket gateway uses the JSON form below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", content = "d", rename_all = "kebab-case")]
pub enum ServerEvent {
    ParticipantJoined {
        session_id: SessionId,
        user_id: UserId,
        role: Role,
    },
    ParticipantLeft {
        session_id: SessionId,
        user_id: UserId,
    },
    UserMuted {
        session_id: SessionId,
        user_id: UserId,
        muted_until: Option<DateTime<Utc>>,
    },
    UserUnmuted {
        session_id: SessionId,
        user_id: UserId,
    },
    UserKicked {
        session_id: SessionId,
        user_id: UserId,
        reason: Option<String>,
    },
    UserBanned {
        session_id: SessionId,
        user_id: UserId,
        banned_until: Option<DateTime<Utc>>,
        reason: Option<String>,
    },
    UserWarned {
        session_id: SessionId,
        user_id: UserId,
        warning_count: u32,
        reason: Option<String>,
    },
    UserPromoted {
        session_id: SessionId,
        user_id: UserId,
        role: Role,
    },
    QualityAlert {
        session_id: SessionId,
        user_id: UserId,
        score: u8,
    },
    QualityAdaptation {
        session_id: SessionId,
        directive: AdaptationDirective,
    },

    // Relayed signaling envelopes. Payloads pass through untouched.
    Offer {
        from: UserId,
        payload: Value,
    },
    Answer {
        from: UserId,
        payload: Value,
    },
    IceCandidate {
        from: UserId,
        payload: Value,
    },
    ScreenShareStarted {
        from: UserId,
        payload: Value,
    },
    ScreenShareStopped {
        from: UserId,
        payload: Value,
    },
    WhiteboardUpdated {
        from: UserId,
        payload: Value,
    },
    NewChatMessage {
        from: UserId,
        payload: Value,
    },

    /// Rejection surfaced to the failing caller only; other participants
    /// are never notified of a failed action.
    Error {
        message: String,
    },
}

impl ServerEvent {
    /// Wrap an opaque signaling payload in the outbound event matching
    /// its kind.
    pub fn relayed(kind: SignalKind, from: UserId, payload: Value) -> Self {
        match kind {
            SignalKind::Offer => ServerEvent::Offer { from, payload },
            SignalKind::Answer => ServerEvent::Answer { from, payload },
            SignalKind::IceCandidate => ServerEvent::IceCandidate { from, payload },
            SignalKind::ScreenShareStart => ServerEvent::ScreenShareStarted { from, payload },
            SignalKind::ScreenShareStop => ServerEvent::ScreenShareStopped { from, payload },
            SignalKind::WhiteboardUpdate => ServerEvent::WhiteboardUpdated { from, payload },
            SignalKind::ChatMessage => ServerEvent::NewChatMessage { from, payload },
        }
    }
}
