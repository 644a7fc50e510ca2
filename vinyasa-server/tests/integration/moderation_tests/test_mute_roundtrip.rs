use crate::integration::{create_test_coordinator, init_tracing};
use chrono::Utc;
use vinyasa_core::{ModerationAction, Role, ServerEvent, SessionId, UserId};

#[tokio::test]
async fn test_mute_then_unmute_restores_permissions() {
    init_tracing();
    let (coordinator, _sink, _audit) = create_test_coordinator();
    let session = SessionId::from("s1");
    let target = UserId::from("u2");

    let host = coordinator
        .admit(session.clone(), UserId::from("u1"), Role::Host)
        .await
        .unwrap();
    coordinator
        .admit(session.clone(), target.clone(), Role::Attendee)
        .await
        .unwrap();

    let before = coordinator.permissions_of(&session, &target).unwrap();

    coordinator
        .moderate(&session, host, &target, ModerationAction::Mute, None, Some(5))
        .await
        .unwrap();
    let muted = coordinator.permissions_of(&session, &target).unwrap();
    assert!(!muted.can_speak);
    assert!(muted.muted_until.is_some());
    assert!(muted.is_muted(Utc::now()));

    coordinator
        .moderate(&session, host, &target, ModerationAction::Unmute, None, None)
        .await
        .unwrap();
    let after = coordinator.permissions_of(&session, &target).unwrap();
    assert!(after.can_speak);
    assert!(after.muted_until.is_none());
    assert_eq!(after, before);
}

#[tokio::test]
async fn test_mute_without_duration_is_indefinite() {
    init_tracing();
    let (coordinator, sink, _audit) = create_test_coordinator();
    let session = SessionId::from("s1");
    let target = UserId::from("u2");

    let host = coordinator
        .admit(session.clone(), UserId::from("u1"), Role::Host)
        .await
        .unwrap();
    let target_handle = coordinator
        .admit(session.clone(), target.clone(), Role::Attendee)
        .await
        .unwrap();

    sink.clear().await;
    coordinator
        .moderate(&session, host, &target, ModerationAction::Mute, None, None)
        .await
        .unwrap();

    let perms = coordinator.permissions_of(&session, &target).unwrap();
    assert!(!perms.can_speak);
    assert!(perms.muted_until.is_none());
    assert!(perms.is_muted(Utc::now()));

    // The mute is announced to the whole room, target included.
    for handle in [host, target_handle] {
        let events = sink.events_for(handle).await;
        assert!(matches!(
            events.as_slice(),
            [ServerEvent::UserMuted { user_id, muted_until: None, .. }]
                if *user_id == target
        ));
    }
}

#[tokio::test]
async fn test_promote_grants_moderation_rights() {
    init_tracing();
    let (coordinator, _sink, _audit) = create_test_coordinator();
    let session = SessionId::from("s1");
    let promoted = UserId::from("u2");

    let host = coordinator
        .admit(session.clone(), UserId::from("u1"), Role::Host)
        .await
        .unwrap();
    let promoted_handle = coordinator
        .admit(session.clone(), promoted.clone(), Role::Attendee)
        .await
        .unwrap();
    coordinator
        .admit(session.clone(), UserId::from("u3"), Role::Attendee)
        .await
        .unwrap();

    coordinator
        .moderate(&session, host, &promoted, ModerationAction::Promote, None, None)
        .await
        .unwrap();

    let perms = coordinator.permissions_of(&session, &promoted).unwrap();
    assert_eq!(perms.role, Role::Moderator);
    assert!(perms.can_moderate && perms.can_remove_users && perms.can_mute_users);
    assert_eq!(coordinator.role_of(promoted_handle), Ok(Role::Moderator));

    // A freshly promoted moderator can act immediately.
    coordinator
        .moderate(
            &session,
            promoted_handle,
            &UserId::from("u3"),
            ModerationAction::Mute,
            None,
            None,
        )
        .await
        .unwrap();
    assert!(
        !coordinator
            .permissions_of(&session, &UserId::from("u3"))
            .unwrap()
            .can_speak
    );
}
