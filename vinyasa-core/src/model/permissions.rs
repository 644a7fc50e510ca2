use crate::model::role::Role;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParticipantStatus {
    Active,
    Banned,
}

/// Per-(session, user) permission record. Keyed by user id, not by
/// connection handle, so it survives reconnects within the same session.
/// Mutated only by the moderation state machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Permissions {
    pub role: Role,
    pub can_speak: bool,
    pub can_moderate: bool,
    pub can_remove_users: bool,
    pub can_mute_users: bool,
    pub muted_until: Option<DateTime<Utc>>,
    pub banned_until: Option<DateTime<Utc>>,
    pub warning_count: u32,
    pub status: ParticipantStatus,
}

impl Permissions {
    pub fn for_role(role: Role) -> Self {
        let moderating = role.can_moderate();
        Self {
            role,
            can_speak: true,
            can_moderate: moderating,
            can_remove_users: moderating,
            can_mute_users: moderating,
            muted_until: None,
            banned_until: None,
            warning_count: 0,
            status: ParticipantStatus::Active,
        }
    }

    /// Mute state with lazy expiry: a `muted_until` in the past reads as
    /// unmuted. An indefinite mute has `can_speak == false` and no deadline.
    pub fn is_muted(&self, now: DateTime<Utc>) -> bool {
        if self.can_speak {
            return false;
        }
        match self.muted_until {
            Some(until) => until > now,
            None => true,
        }
    }

    /// Ban state with lazy expiry: an elapsed `banned_until` no longer
    /// blocks admission. An indefinite ban has no deadline.
    pub fn is_banned(&self, now: DateTime<Utc>) -> bool {
        if self.status != ParticipantStatus::Banned {
            return false;
        }
        match self.banned_until {
            Some(until) => until > now,
            None => true,
        }
    }
}
