use crate::model::ids::UserId;
use crate::model::moderation::ModerationAction;
use crate::model::quality::QualitySample;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Kinds of peer-to-peer signaling envelopes the relay forwards. The
/// payload is never inspected; the kind only selects the outbound event
/// name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SignalKind {
    Offer,
    Answer,
    IceCandidate,
    ScreenShareStart,
    ScreenShareStop,
    WhiteboardUpdate,
    ChatMessage,
}

impl SignalKind {
    /// Outbound event name for a relayed envelope of this kind.
    pub fn event_name(&self) -> &'static str {
        match self {
            SignalKind::Offer => "offer",
            SignalKind::Answer => "answer",
            SignalKind::IceCandidate => "ice-candidate",
            SignalKind::ScreenShareStart => "screen-share-started",
            SignalKind::ScreenShareStop => "screen-share-stopped",
            SignalKind::WhiteboardUpdate => "whiteboard-updated",
            SignalKind::ChatMessage => "new-chat-message",
        }
    }
}

/// Messages a connected client may send over its socket after admission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", content = "d", rename_all = "kebab-case")]
pub enum ClientMessage {
    /// Relay an opaque envelope to one peer connection.
    Signal {
        to: UserId,
        kind: SignalKind,
        payload: Value,
    },

    /// Relay an opaque envelope to everyone else in the room.
    Broadcast { kind: SignalKind, payload: Value },

    /// Apply a moderation action to a participant of the same session.
    Moderate {
        target: UserId,
        action: ModerationAction,
        reason: Option<String>,
        duration_minutes: Option<i64>,
    },

    /// Periodic connection quality report.
    QualityReport { sample: QualitySample },

    /// Orderly departure; equivalent to closing the socket.
    Leave,
}
