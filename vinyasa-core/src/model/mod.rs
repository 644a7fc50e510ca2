mod event;
mod ids;
mod moderation;
mod permissions;
mod quality;
mod role;
mod signal;

pub use event::ServerEvent;
pub use ids::{ConnectionId, SessionId, UserId};
pub use moderation::{ModerationAction, ModerationRecord};
pub use permissions::{ParticipantStatus, Permissions};
pub use quality::{AdaptationAction, AdaptationDirective, IssueType, QualitySample};
pub use role::Role;
pub use signal::{ClientMessage, SignalKind};
