use crate::model::ids::{SessionId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModerationAction {
    Mute,
    Unmute,
    Kick,
    Ban,
    Warn,
    Promote,
}

impl ModerationAction {
    pub fn name(&self) -> &'static str {
        match self {
            ModerationAction::Mute => "mute",
            ModerationAction::Unmute => "unmute",
            ModerationAction::Kick => "kick",
            ModerationAction::Ban => "ban",
            ModerationAction::Warn => "warn",
            ModerationAction::Promote => "promote",
        }
    }
}

/// Audit-log entry: who did what to whom and why. Appended on every
/// successful moderation action and handed to the audit sink; never
/// written for a rejected action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModerationRecord {
    pub session_id: SessionId,
    pub moderator_id: UserId,
    pub target_user_id: UserId,
    pub action: ModerationAction,
    pub reason: Option<String>,
    pub duration_minutes: Option<i64>,
    pub timestamp: DateTime<Utc>,
}
