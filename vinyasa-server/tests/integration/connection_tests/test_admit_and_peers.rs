use crate::integration::{create_test_coordinator, init_tracing};
use vinyasa_core::{CoordinationError, Role, ServerEvent, SessionId, UserId};

#[tokio::test]
async fn test_two_admissions_share_a_room() {
    init_tracing();
    let (coordinator, _sink, _audit) = create_test_coordinator();
    let session = SessionId::from("s1");

    let host = coordinator
        .admit(session.clone(), UserId::from("u1"), Role::Host)
        .await
        .unwrap();
    let attendee = coordinator
        .admit(session.clone(), UserId::from("u2"), Role::Attendee)
        .await
        .unwrap();

    assert_eq!(coordinator.current_count(&session), 2);
    assert_eq!(coordinator.list_peers(&session, Some(host)), vec![attendee]);
    assert_eq!(coordinator.list_peers(&session, Some(attendee)), vec![host]);
}

#[tokio::test]
async fn test_peers_are_listed_in_insertion_order() {
    init_tracing();
    let (coordinator, _sink, _audit) = create_test_coordinator();
    let session = SessionId::from("s1");

    let mut handles = Vec::new();
    for i in 0..5 {
        let handle = coordinator
            .admit(session.clone(), UserId::from(format!("u{i}")), Role::Attendee)
            .await
            .unwrap();
        handles.push(handle);
    }

    assert_eq!(coordinator.list_peers(&session, None), handles);

    let first = handles.remove(0);
    assert_eq!(coordinator.list_peers(&session, Some(first)), handles);
}

#[tokio::test]
async fn test_empty_ids_are_rejected() {
    init_tracing();
    let (coordinator, _sink, _audit) = create_test_coordinator();

    let result = coordinator
        .admit(SessionId::from(""), UserId::from("u1"), Role::Attendee)
        .await;
    assert_eq!(result, Err(CoordinationError::InvalidSession));

    let result = coordinator
        .admit(SessionId::from("s1"), UserId::from(""), Role::Attendee)
        .await;
    assert_eq!(result, Err(CoordinationError::InvalidSession));

    assert_eq!(coordinator.current_count(&SessionId::from("s1")), 0);
}

#[tokio::test]
async fn test_role_of_follows_connection_lifetime() {
    init_tracing();
    let (coordinator, _sink, _audit) = create_test_coordinator();
    let session = SessionId::from("s1");

    let handle = coordinator
        .admit(session.clone(), UserId::from("u1"), Role::CoHost)
        .await
        .unwrap();
    assert_eq!(coordinator.role_of(handle), Ok(Role::CoHost));

    coordinator.remove(handle).await;
    assert_eq!(
        coordinator.role_of(handle),
        Err(CoordinationError::TargetNotFound)
    );
}

#[tokio::test]
async fn test_join_is_announced_to_existing_members_only() {
    init_tracing();
    let (coordinator, sink, _audit) = create_test_coordinator();
    let session = SessionId::from("s1");

    let first = coordinator
        .admit(session.clone(), UserId::from("u1"), Role::Host)
        .await
        .unwrap();
    let second = coordinator
        .admit(session.clone(), UserId::from("u2"), Role::Attendee)
        .await
        .unwrap();

    let first_events = sink.events_for(first).await;
    assert!(matches!(
        first_events.as_slice(),
        [ServerEvent::ParticipantJoined { user_id, .. }] if *user_id == UserId::from("u2")
    ));

    // The joiner itself is excluded from its own announcement.
    assert!(sink.events_for(second).await.is_empty());
}
