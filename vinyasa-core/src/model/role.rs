use serde::{Deserialize, Serialize};

/// Participant role within one session. Ordering is authority order:
/// a role moderates only if it is Moderator or above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Attendee,
    Panelist,
    Moderator,
    CoHost,
    Host,
}

impl Role {
    pub fn can_moderate(&self) -> bool {
        *self >= Role::Moderator
    }

    pub fn name(&self) -> &'static str {
        match self {
            Role::Host => "HOST",
            Role::CoHost => "CO_HOST",
            Role::Moderator => "MODERATOR",
            Role::Panelist => "PANELIST",
            Role::Attendee => "ATTENDEE",
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::Attendee
    }
}
