//! redb metrics store tests

mod common;

use common::FakeSource;
use devmeter::config::ScoringConfig;
use devmeter::pipeline::MetricsPipeline;
use devmeter::store::{MetricsStore, RedbMetricsStore};

#[test]
fn test_pipeline_writes_through_redb() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("metrics.redb");
    let scoring = ScoringConfig::default();

    {
        let store = RedbMetricsStore::open(&path).unwrap();
        let source = FakeSource::default();
        MetricsPipeline::new(&source, &store, &scoring)
            .refresh_at("octocat", common::fixed_now())
            .unwrap();
    }

    let store = RedbMetricsStore::open(&path).unwrap();
    let stored = store.get("583231").unwrap().expect("record persisted");
    assert_eq!(stored.username, "octocat");
    assert_eq!(stored.dev_meter_score, 77);
    assert_eq!(store.list().unwrap().len(), 1);
}

#[test]
fn test_last_write_wins() {
    let dir = tempfile::tempdir().unwrap();
    let store = RedbMetricsStore::open(&dir.path().join("metrics.redb")).unwrap();
    let scoring = ScoringConfig::default();

    let degraded = FakeSource {
        graph: None,
        ..Default::default()
    };
    MetricsPipeline::new(&degraded, &store, &scoring)
        .refresh_at("octocat", common::fixed_now())
        .unwrap();
    assert_eq!(store.get("583231").unwrap().unwrap().dev_meter_score, 23);

    let full = FakeSource::default();
    MetricsPipeline::new(&full, &store, &scoring)
        .refresh_at("octocat", common::fixed_now())
        .unwrap();

    let records = store.list().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].dev_meter_score, 77);
}
