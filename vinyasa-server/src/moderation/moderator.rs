use crate::config::CoordinatorConfig;
use crate::moderation::AuditSink;
use crate::registry::ConnectionRegistry;
use crate::room::Rooms;
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tracing::{info, warn};
use vinyasa_core::{
    ConnectionId, CoordinationError, ModerationAction, ModerationRecord, ParticipantStatus,
    Role, ServerEvent, SessionId, UserId,
};

/// Outcome of a successful moderation action.
#[derive(Debug, Clone, PartialEq)]
pub struct ModerationResult {
    pub action: ModerationAction,
    pub target: UserId,
    pub warning_count: u32,
    pub escalated_to_ban: bool,
    pub muted_until: Option<DateTime<Utc>>,
    pub banned_until: Option<DateTime<Utc>>,
}

/// Side effects computed under the room entry lock and applied after it
/// is released. Broadcasting and kicking re-enter the room map, so they
/// must not run while the entry is held.
struct Effects {
    events: Vec<ServerEvent>,
    records: Vec<ModerationRecord>,
    kick: Option<ConnectionId>,
    result: ModerationResult,
}

/// Applies mute/unmute/kick/ban/warn/promote transitions to participant
/// permissions. All permission mutation for one action happens under a
/// single room entry borrow, so the warn-to-ban cascade is atomic: no
/// interleaving can observe the threshold reached without the ban set.
pub struct Moderator {
    registry: Arc<ConnectionRegistry>,
    rooms: Arc<Rooms>,
    audit: Arc<dyn AuditSink>,
    config: CoordinatorConfig,
}

impl Moderator {
    pub fn new(
        registry: Arc<ConnectionRegistry>,
        rooms: Arc<Rooms>,
        audit: Arc<dyn AuditSink>,
        config: CoordinatorConfig,
    ) -> Self {
        Self {
            registry,
            rooms,
            audit,
            config,
        }
    }

    /// Apply one moderation action. Failures are all-or-nothing: a
    /// rejected action mutates nothing, broadcasts nothing, and writes
    /// no audit record.
    pub async fn moderate(
        &self,
        session_id: &SessionId,
        moderator: ConnectionId,
        target: &UserId,
        action: ModerationAction,
        reason: Option<String>,
        duration_minutes: Option<i64>,
    ) -> Result<ModerationResult, CoordinationError> {
        let moderator_conn = self
            .registry
            .connection(moderator)
            .ok_or(CoordinationError::TargetNotFound)?;
        if moderator_conn.session_id != *session_id {
            return Err(CoordinationError::TargetNotFound);
        }

        let effects = self
            .rooms
            .with_room(session_id, |room| {
                let moderator_role = room
                    .permissions_of(&moderator_conn.user_id)
                    .map(|p| p.role)
                    .unwrap_or(moderator_conn.role);
                if !moderator_role.can_moderate() {
                    warn!(
                        "{} ({}) denied moderation action {} on {}",
                        moderator_conn.user_id,
                        moderator_role.name(),
                        action.name(),
                        target
                    );
                    return Err(CoordinationError::InsufficientPermissions);
                }

                let target_conn = room
                    .connection_of(target)
                    .ok_or(CoordinationError::TargetNotFound)?;

                Ok(self.apply(
                    room,
                    session_id,
                    &moderator_conn.user_id,
                    target,
                    target_conn,
                    action,
                    reason,
                    duration_minutes,
                ))
            })
            .ok_or(CoordinationError::TargetNotFound)??;

        for record in &effects.records {
            self.audit.append(record.clone());
        }
        for event in effects.events {
            self.rooms.broadcast(session_id, event, None).await;
        }
        if let Some(handle) = effects.kick {
            self.registry.remove(handle).await;
        }

        info!(
            "Moderation {} applied to {target} in session {session_id}",
            effects.result.action.name()
        );
        Ok(effects.result)
    }

    #[allow(clippy::too_many_arguments)]
    fn apply(
        &self,
        room: &mut crate::room::Room,
        session_id: &SessionId,
        moderator_id: &UserId,
        target: &UserId,
        target_conn: ConnectionId,
        action: ModerationAction,
        reason: Option<String>,
        duration_minutes: Option<i64>,
    ) -> Effects {
        let now = Utc::now();
        let mut events = Vec::new();
        let mut records = vec![ModerationRecord {
            session_id: session_id.clone(),
            moderator_id: moderator_id.clone(),
            target_user_id: target.clone(),
            action,
            reason: reason.clone(),
            duration_minutes,
            timestamp: now,
        }];
        let mut kick = None;

        let mut result = ModerationResult {
            action,
            target: target.clone(),
            warning_count: 0,
            escalated_to_ban: false,
            muted_until: None,
            banned_until: None,
        };

        let perms = room.permissions_mut(target);

        match action {
            ModerationAction::Mute => {
                perms.can_speak = false;
                perms.muted_until = duration_minutes.map(|m| now + Duration::minutes(m));
                result.muted_until = perms.muted_until;
                events.push(ServerEvent::UserMuted {
                    session_id: session_id.clone(),
                    user_id: target.clone(),
                    muted_until: perms.muted_until,
                });
            }

            ModerationAction::Unmute => {
                perms.can_speak = true;
                perms.muted_until = None;
                events.push(ServerEvent::UserUnmuted {
                    session_id: session_id.clone(),
                    user_id: target.clone(),
                });
            }

            ModerationAction::Kick => {
                // No ban is set: the user may rejoin immediately.
                kick = Some(target_conn);
                events.push(ServerEvent::UserKicked {
                    session_id: session_id.clone(),
                    user_id: target.clone(),
                    reason: reason.clone(),
                });
            }

            ModerationAction::Ban => {
                perms.status = ParticipantStatus::Banned;
                perms.banned_until = duration_minutes.map(|m| now + Duration::minutes(m));
                result.banned_until = perms.banned_until;
                kick = Some(target_conn);
                events.push(ServerEvent::UserBanned {
                    session_id: session_id.clone(),
                    user_id: target.clone(),
                    banned_until: perms.banned_until,
                    reason: reason.clone(),
                });
            }

            ModerationAction::Warn => {
                perms.warning_count += 1;
                result.warning_count = perms.warning_count;
                events.push(ServerEvent::UserWarned {
                    session_id: session_id.clone(),
                    user_id: target.clone(),
                    warning_count: perms.warning_count,
                    reason: reason.clone(),
                });

                // Auto-escalation happens under the same borrow as the
                // increment, so warning_count can never be observed at
                // the threshold with the user still active.
                if perms.warning_count >= self.config.warn_threshold {
                    let banned_until = now + Duration::minutes(self.config.auto_ban_minutes);
                    perms.status = ParticipantStatus::Banned;
                    perms.banned_until = Some(banned_until);
                    result.escalated_to_ban = true;
                    result.banned_until = Some(banned_until);
                    kick = Some(target_conn);
                    events.push(ServerEvent::UserBanned {
                        session_id: session_id.clone(),
                        user_id: target.clone(),
                        banned_until: Some(banned_until),
                        reason: Some("warning threshold reached".to_string()),
                    });
                    records.push(ModerationRecord {
                        session_id: session_id.clone(),
                        moderator_id: moderator_id.clone(),
                        target_user_id: target.clone(),
                        action: ModerationAction::Ban,
                        reason: Some("warning threshold reached".to_string()),
                        duration_minutes: Some(self.config.auto_ban_minutes),
                        timestamp: now,
                    });
                }
            }

            ModerationAction::Promote => {
                perms.role = Role::Moderator;
                perms.can_moderate = true;
                perms.can_remove_users = true;
                perms.can_mute_users = true;
                events.push(ServerEvent::UserPromoted {
                    session_id: session_id.clone(),
                    user_id: target.clone(),
                    role: Role::Moderator,
                });
            }
        }

        if action == ModerationAction::Promote {
            // Keep the registry's role snapshot in step with the
            // permission record.
            self.registry.set_role(target_conn, Role::Moderator);
        }

        Effects {
            events,
            records,
            kick,
            result,
        }
    }
}
