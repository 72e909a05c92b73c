//! Integration tests for portfolio aggregation through `PortfolioService`.

use std::sync::Arc;
use std::time::Duration;

use fanpulse::application::{ActionFilter, PortfolioService};
use fanpulse::domain::{
    ActionId, ActionStatus, ArtistRef, HealthStatus, MomentumStatus, SuperfanTier, Urgency,
};
use fanpulse::error::{Error, StatusUpdateError};
use fanpulse::testkit::domain::{action, artist, make_artists, momentum, superfan};
use fanpulse::testkit::portfolio::FakeBackend;

fn service(backend: FakeBackend) -> (PortfolioService<FakeBackend>, Arc<FakeBackend>) {
    let backend = Arc::new(backend);
    (PortfolioService::new(backend.clone(), 5), backend)
}

#[tokio::test]
async fn concrete_scenario_orders_critical_before_high() {
    let backend = FakeBackend::new(vec![ArtistRef::new("a1", "A"), ArtistRef::new("a2", "B")])
        .with_actions("a1", vec![action("x1", Urgency::High, "2024-01-02")])
        .with_actions("a2", vec![action("x2", Urgency::Critical, "2024-01-01")]);
    let (service, _) = service(backend);

    let report = service.actions(&ActionFilter::default()).await.unwrap();

    let order: Vec<(&str, &str)> = report
        .all
        .items()
        .iter()
        .map(|e| (e.artist.id.as_str(), e.item.id.as_str()))
        .collect();
    assert_eq!(order, vec![("a2", "x2"), ("a1", "x1")]);
    assert_eq!(report.stats.by_urgency.critical, 1);
    assert_eq!(report.stats.by_urgency.high, 1);
}

#[tokio::test(start_paused = true)]
async fn aggregation_keeps_artist_order_under_latency() {
    // a0 answers last, a2 first.
    let backend = FakeBackend::new(make_artists(3))
        .with_superfans("a0", vec![superfan("f0", 10.0, SuperfanTier::Bronze)])
        .with_superfans("a1", vec![superfan("f1", 20.0, SuperfanTier::Silver)])
        .with_superfans("a2", vec![superfan("f2", 30.0, SuperfanTier::Gold)])
        .with_latency("a0", Duration::from_millis(300))
        .with_latency("a1", Duration::from_millis(200))
        .with_latency("a2", Duration::from_millis(100));
    let (service, _) = service(backend);

    let report = service.superfans().await.unwrap();

    let artists: Vec<&str> = report
        .superfans
        .items()
        .iter()
        .map(|e| e.artist.id.as_str())
        .collect();
    assert_eq!(artists, vec!["a0", "a1", "a2"]);
    // Top list is by fan value, not artist order.
    let top: Vec<&str> = report.stats.top.iter().map(|e| e.item.name.as_str()).collect();
    assert_eq!(top, vec!["Fan f2", "Fan f1", "Fan f0"]);
}

#[tokio::test(start_paused = true)]
async fn per_artist_fetches_run_concurrently() {
    let mut backend = FakeBackend::new(make_artists(4));
    for id in ["a0", "a1", "a2", "a3"] {
        backend = backend.with_latency(id, Duration::from_secs(1));
    }
    let (service, backend) = service(backend);

    let start = tokio::time::Instant::now();
    service.actions(&ActionFilter::default()).await.unwrap();

    assert!(start.elapsed() < Duration::from_secs(2));
    assert_eq!(backend.fetch_count(), 4);
}

#[tokio::test]
async fn one_failing_artist_does_not_fail_the_view() {
    let backend = FakeBackend::new(make_artists(3))
        .with_actions("a0", vec![action("x0", Urgency::Low, "2024-01-01")])
        .with_actions("a2", vec![action("x2", Urgency::Low, "2024-01-01")])
        .failing("a1", "timeout");
    let (service, _) = service(backend);

    let report = service.actions(&ActionFilter::default()).await.unwrap();

    assert_eq!(report.all.len(), 2);
    assert!(report.all.items().iter().all(|e| e.artist.id.as_str() != "a1"));
    assert_eq!(report.stats.failed_sources, 1);
    assert_eq!(report.all.failures()[0].reason, "timeout");
}

#[tokio::test]
async fn failed_sources_counts_every_failing_artist() {
    let backend = FakeBackend::new(make_artists(5))
        .failing("a1", "boom")
        .failing("a3", "boom")
        .failing("a4", "boom");
    let (service, _) = service(backend);

    let report = service.momentum().await.unwrap();

    assert_eq!(report.stats.failed_sources, 3);
    assert_eq!(report.snapshots.requested(), 5);
}

#[tokio::test]
async fn empty_portfolio_issues_no_fetches() {
    let (service, backend) = service(FakeBackend::new(Vec::new()));

    let report = service.actions(&ActionFilter::default()).await.unwrap();
    let health = service.health().await.unwrap();

    assert!(report.all.is_empty());
    assert_eq!(backend.fetch_count(), 0);
    assert_eq!(health.score(), 0);
    assert_eq!(health.status(), HealthStatus::Poor);
}

#[tokio::test]
async fn directory_failure_is_fatal() {
    let (service, backend) = service(FakeBackend::new(make_artists(2)).directory_down());

    let err = service.superfans().await.unwrap_err();

    assert!(matches!(err, Error::Directory(_)));
    assert_eq!(backend.fetch_count(), 0);
}

#[tokio::test]
async fn filter_narrows_visible_but_not_totals() {
    let backend = FakeBackend::new(vec![artist("a1"), artist("a2")])
        .with_actions(
            "a1",
            vec![
                action("x1", Urgency::Critical, "2024-01-01"),
                action("x2", Urgency::Low, "2024-01-02"),
            ],
        )
        .with_actions("a2", vec![action("x3", Urgency::Critical, "2024-01-03")]);
    let (service, _) = service(backend);

    let filter = ActionFilter::default().urgency(Urgency::Critical).artist("a1");
    let report = service.actions(&filter).await.unwrap();

    assert_eq!(report.stats.total, 3);
    assert_eq!(report.visible.len(), 1);
    assert_eq!(report.visible[0].item.id.as_str(), "x1");
    assert_eq!(report.visible_stats.total, 1);
}

#[tokio::test]
async fn health_reflects_portfolio_momentum() {
    let backend = FakeBackend::new(make_artists(2))
        .with_momentum("a0", momentum(10.0, MomentumStatus::Fire, 150.0))
        .with_momentum("a1", momentum(10.0, MomentumStatus::Growing, 100.0));
    let (service, _) = service(backend);

    let report = service.momentum().await.unwrap();

    assert_eq!(report.stats.health.score(), 100);
    assert_eq!(report.stats.health.status(), HealthStatus::Excellent);
    assert_eq!(report.stats.growing, 2);
}

#[tokio::test]
async fn declining_portfolio_scores_near_zero() {
    let backend = FakeBackend::new(make_artists(3))
        .with_momentum("a0", momentum(0.0, MomentumStatus::Declining, 0.0))
        .with_momentum("a1", momentum(0.0, MomentumStatus::Declining, 1.0))
        .with_momentum("a2", momentum(0.0, MomentumStatus::Declining, 0.0));
    let (service, _) = service(backend);

    let health = service.health().await.unwrap();

    assert!(health.score() <= 1);
    assert_eq!(health.status(), HealthStatus::Poor);
}

#[tokio::test]
async fn status_update_returns_new_collection() {
    let backend = FakeBackend::new(vec![artist("a1")]).with_actions(
        "a1",
        vec![
            action("x1", Urgency::High, "2024-01-01"),
            action("x2", Urgency::Low, "2024-01-01"),
        ],
    );
    let (service, backend) = service(backend);
    let report = service.actions(&ActionFilter::default()).await.unwrap();

    let updated = service
        .update_action_status(&report.all, &ActionId::new("x1"), ActionStatus::Completed)
        .await
        .unwrap();

    assert_eq!(updated.items()[0].item.status, ActionStatus::Completed);
    assert_eq!(updated.items()[1].item.status, ActionStatus::Pending);
    assert_eq!(report.all.items()[0].item.status, ActionStatus::Pending);
    assert_eq!(
        backend.updates(),
        vec![(ActionId::new("x1"), ActionStatus::Completed)]
    );
}

#[tokio::test]
async fn rejected_update_leaves_collection_untouched() {
    let backend = FakeBackend::new(vec![artist("a1")])
        .with_actions("a1", vec![action("x1", Urgency::High, "2024-01-01")])
        .rejecting_updates();
    let (service, _) = service(backend);
    let report = service.actions(&ActionFilter::default()).await.unwrap();
    let before = report.all.clone();

    let err = service
        .update_action_status(&report.all, &ActionId::new("x1"), ActionStatus::Dismissed)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::StatusUpdate(StatusUpdateError::Rejected { .. })
    ));
    assert_eq!(report.all, before);
}

#[tokio::test]
async fn unknown_action_is_not_sent_to_backend() {
    let backend = FakeBackend::new(vec![artist("a1")])
        .with_actions("a1", vec![action("x1", Urgency::High, "2024-01-01")]);
    let (service, backend) = service(backend);
    let report = service.actions(&ActionFilter::default()).await.unwrap();

    let err = service
        .update_action_status(&report.all, &ActionId::new("nope"), ActionStatus::Completed)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::StatusUpdate(StatusUpdateError::NotFound(_))
    ));
    assert!(backend.updates().is_empty());
}
