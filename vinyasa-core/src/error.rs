use thiserror::Error;

/// Failures surfaced synchronously to the caller of a coordination
/// operation. Delivery failures are not part of this taxonomy: signaling
/// is best-effort and a dead peer is skipped, never reported.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoordinationError {
    /// Session or user id was empty at admission time.
    #[error("invalid session or user id")]
    InvalidSession,

    /// The target connection or participant is not currently registered.
    #[error("target not found")]
    TargetNotFound,

    /// Caller's role does not permit the requested moderation action.
    #[error("insufficient permissions")]
    InsufficientPermissions,

    /// Admission rejected because a ban for this (session, user) pair
    /// has not yet expired.
    #[error("user is banned from this session")]
    AlreadyBanned,
}
