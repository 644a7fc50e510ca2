use crate::integration::{create_test_coordinator, init_tracing};
use crate::utils::quality_sample;
use vinyasa_core::{Role, ServerEvent, SessionId, UserId};

#[tokio::test]
async fn test_packet_loss_deduction_and_alert() {
    init_tracing();
    let (coordinator, sink, _audit) = create_test_coordinator();
    let session = SessionId::from("s1");
    let reporter = UserId::from("u1");

    let a = coordinator
        .admit(session.clone(), reporter.clone(), Role::Attendee)
        .await
        .unwrap();
    let b = coordinator
        .admit(session.clone(), UserId::from("u2"), Role::Attendee)
        .await
        .unwrap();

    sink.clear().await;

    // 6% packet loss deducts 20 and also trips the alert threshold.
    let score = coordinator
        .record_sample(&session, &reporter, quality_sample(6.0, 100.0, 1000.0, 10.0))
        .await;
    assert_eq!(score, 80);

    for handle in [a, b] {
        let events = sink.events_for(handle).await;
        assert!(matches!(
            events.as_slice(),
            [ServerEvent::QualityAlert { user_id, score: 80, .. }]
                if *user_id == reporter
        ));
    }
}

#[tokio::test]
async fn test_alert_boundary_at_five_percent_loss() {
    init_tracing();
    let (coordinator, sink, _audit) = create_test_coordinator();
    let session = SessionId::from("s1");
    let reporter = UserId::from("u1");

    coordinator
        .admit(session.clone(), reporter.clone(), Role::Attendee)
        .await
        .unwrap();
    sink.clear().await;

    // Exactly 5.0%: neither a deduction nor an alert.
    let score = coordinator
        .record_sample(&session, &reporter, quality_sample(5.0, 100.0, 1000.0, 10.0))
        .await;
    assert_eq!(score, 100);
    assert!(sink.events().await.is_empty());

    // 5.1% crosses the strict boundary: deduction and alert both fire.
    let score = coordinator
        .record_sample(&session, &reporter, quality_sample(5.1, 100.0, 1000.0, 10.0))
        .await;
    assert_eq!(score, 80);
    assert!(!sink.events().await.is_empty());
}

#[tokio::test]
async fn test_degraded_score_without_alert() {
    init_tracing();
    let (coordinator, sink, _audit) = create_test_coordinator();
    let session = SessionId::from("s1");
    let reporter = UserId::from("u1");

    coordinator
        .admit(session.clone(), reporter.clone(), Role::Attendee)
        .await
        .unwrap();
    sink.clear().await;

    // 250ms latency: scored (-15) but below the 300ms alert threshold.
    let score = coordinator
        .record_sample(&session, &reporter, quality_sample(0.0, 250.0, 1000.0, 10.0))
        .await;
    assert_eq!(score, 85);
    assert!(sink.events().await.is_empty());
}

#[tokio::test]
async fn test_clean_sample_scores_100() {
    init_tracing();
    let (coordinator, sink, _audit) = create_test_coordinator();
    let session = SessionId::from("s1");
    let reporter = UserId::from("u1");

    coordinator
        .admit(session.clone(), reporter.clone(), Role::Attendee)
        .await
        .unwrap();
    sink.clear().await;

    let score = coordinator
        .record_sample(&session, &reporter, quality_sample(0.0, 40.0, 2500.0, 5.0))
        .await;
    assert_eq!(score, 100);
    assert!(sink.events().await.is_empty());
}
