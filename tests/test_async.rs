//! Async wrapper tests (feature `async`).

#![cfg(feature = "async")]

mod common;

use fare_gauge::{AsyncFareGauge, Tier};

async fn setup_async_gauge() -> (AsyncFareGauge, common::RecordingPresenter, tempfile::TempDir) {
    common::init_logging();
    let tmp_dir = tempfile::tempdir().unwrap();
    let presenter = common::RecordingPresenter::default();
    let gauge = AsyncFareGauge::builder()
        .data_dir(tmp_dir.path())
        .namespace(common::NAMESPACE)
        .presenter(presenter.clone())
        .build()
        .await
        .unwrap();
    (gauge, presenter, tmp_dir)
}

#[tokio::test]
async fn process_offer_runs_on_blocking_pool() {
    let (gauge, presenter, _tmp) = setup_async_gauge().await;

    let outcome = gauge.process_offer(15.50, 5.0).await.unwrap();
    assert!(outcome.recorded);
    assert_eq!(outcome.record.classification(), Tier::High);
    assert_eq!(presenter.shown(), vec![(15.50, Tier::High)]);
}

#[tokio::test]
async fn observe_text_and_history() {
    let (gauge, _presenter, _tmp) = setup_async_gauge().await;

    gauge.observe_text("R$ 6,00 - 6,0 km").await.unwrap();
    gauge.observe_text("R$ 6,00 - 6,0 km").await.unwrap();

    let history = gauge.history().await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].classification(), Tier::Low);
}

#[tokio::test]
async fn run_exposes_sync_gauge() {
    let (gauge, _presenter, _tmp) = setup_async_gauge().await;
    gauge.process_offer(9.0, 5.0).await.unwrap();

    let lines = gauge.run(|g| Ok(g.history_lines())).await.unwrap();
    assert_eq!(lines, vec!["R$ 9.00 - 5.0 km - AMARELO"]);
}
