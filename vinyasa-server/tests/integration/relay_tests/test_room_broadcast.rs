use crate::integration::{create_test_coordinator, init_tracing};
use serde_json::json;
use vinyasa_core::{ClientMessage, Role, ServerEvent, SessionId, SignalKind, UserId};

#[tokio::test]
async fn test_broadcast_excludes_the_sender() {
    init_tracing();
    let (coordinator, sink, _audit) = create_test_coordinator();
    let session = SessionId::from("s1");

    let a = coordinator
        .admit(session.clone(), UserId::from("ua"), Role::Host)
        .await
        .unwrap();
    let b = coordinator
        .admit(session.clone(), UserId::from("ub"), Role::Attendee)
        .await
        .unwrap();
    let c = coordinator
        .admit(session.clone(), UserId::from("uc"), Role::Attendee)
        .await
        .unwrap();

    sink.clear().await;
    let delivered = coordinator
        .broadcast_to_room(a, &session, SignalKind::ChatMessage, json!({"text": "hello"}))
        .await
        .unwrap();

    assert_eq!(delivered, 2);
    assert!(sink.events_for(a).await.is_empty());
    for handle in [b, c] {
        let events = sink.events_for(handle).await;
        assert!(matches!(
            events.as_slice(),
            [ServerEvent::NewChatMessage { from, payload }]
                if *from == UserId::from("ua") && payload["text"] == "hello"
        ));
    }
}

#[tokio::test]
async fn test_messages_between_a_pair_stay_in_order() {
    init_tracing();
    let (coordinator, sink, _audit) = create_test_coordinator();
    let session = SessionId::from("s1");

    let a = coordinator
        .admit(session.clone(), UserId::from("ua"), Role::Attendee)
        .await
        .unwrap();
    let b = coordinator
        .admit(session.clone(), UserId::from("ub"), Role::Attendee)
        .await
        .unwrap();

    sink.clear().await;
    for seq in 0..10 {
        coordinator
            .forward(a, b, SignalKind::ChatMessage, json!({"seq": seq}))
            .await
            .unwrap();
    }

    let b_events = sink.events_for(b).await;
    assert_eq!(b_events.len(), 10);
    for (i, event) in b_events.iter().enumerate() {
        assert!(matches!(
            event,
            ServerEvent::NewChatMessage { payload, .. } if payload["seq"] == i
        ));
    }
}

#[tokio::test]
async fn test_gateway_dispatch_rejects_only_the_sender() {
    init_tracing();
    let (coordinator, sink, _audit) = create_test_coordinator();
    let session = SessionId::from("s1");

    let a = coordinator
        .admit(session.clone(), UserId::from("ua"), Role::Attendee)
        .await
        .unwrap();
    let b = coordinator
        .admit(session.clone(), UserId::from("ub"), Role::Attendee)
        .await
        .unwrap();

    sink.clear().await;
    coordinator
        .handle_message(
            a,
            ClientMessage::Signal {
                to: UserId::from("ghost"),
                kind: SignalKind::Offer,
                payload: json!({"sdp": "v=0"}),
            },
        )
        .await;

    // The sender gets the rejection; nobody else hears about it.
    let a_events = sink.events_for(a).await;
    assert!(matches!(a_events.as_slice(), [ServerEvent::Error { .. }]));
    assert!(sink.events_for(b).await.is_empty());
}

#[tokio::test]
async fn test_gateway_dispatch_relays_signals() {
    init_tracing();
    let (coordinator, sink, _audit) = create_test_coordinator();
    let session = SessionId::from("s1");

    let a = coordinator
        .admit(session.clone(), UserId::from("ua"), Role::Attendee)
        .await
        .unwrap();
    let b = coordinator
        .admit(session.clone(), UserId::from("ub"), Role::Attendee)
        .await
        .unwrap();

    sink.clear().await;
    coordinator
        .handle_message(
            a,
            ClientMessage::Signal {
                to: UserId::from("ub"),
                kind: SignalKind::ScreenShareStart,
                payload: json!({"track": "t1"}),
            },
        )
        .await;

    let b_events = sink.events_for(b).await;
    assert!(matches!(
        b_events.as_slice(),
        [ServerEvent::ScreenShareStarted { from, .. }] if *from == UserId::from("ua")
    ));
}
