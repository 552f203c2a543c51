use std::time::Duration;

use regio::{AggregateStatus, Regio, RegioError};
use regio_mock::MockRegion;
use regio_mock::fixtures::{car, nested_payload};

use crate::helpers::query;

fn slow(id: &str, delay_ms: u64) -> std::sync::Arc<MockRegion> {
    MockRegion::builder(id)
        .delay(Duration::from_millis(delay_ms))
        .returns(nested_payload(vec![car(&format!("{id}-1"), 1)]))
        .build()
}

#[tokio::test(start_paused = true)]
async fn per_call_timeout_overrides_the_default() {
    let a = slow("a", 100);
    let b = slow("b", 10);
    let regio = Regio::builder()
        .with_region(a.clone())
        .with_region(b.clone())
        .fallback_to_home(false)
        .build()
        .unwrap();

    let env = regio
        .saved_cars(&query().timeout(Duration::from_millis(50)))
        .await
        .unwrap();

    assert_eq!(env.status, AggregateStatus::PartialSuccess);
    let meta = env.multi_region_metadata.unwrap();
    assert_eq!(
        meta.per_region[0].error,
        Some(RegioError::region_timeout("a", Duration::from_millis(50)))
    );
    assert!(meta.per_region[1].success);
}

#[tokio::test(start_paused = true)]
async fn region_default_timeout_applies_without_override() {
    let tight = MockRegion::builder("a")
        .delay(Duration::from_millis(100))
        .default_timeout(Duration::from_millis(30))
        .build();
    let b = slow("b", 60);
    let regio = Regio::builder()
        .with_region(tight.clone())
        .with_region(b.clone())
        .region_timeout(Duration::from_secs(10))
        .build()
        .unwrap();

    let env = regio.enquired_cars(&query()).await.unwrap();
    let meta = env.multi_region_metadata.unwrap();
    assert_eq!(
        meta.per_region[0].error,
        Some(RegioError::region_timeout("a", Duration::from_millis(30)))
    );
    // b falls back to the orchestrator default and answers
    assert!(meta.per_region[1].success);

    // a per-call override wins over the region default
    let env = regio
        .enquired_cars(&query().timeout(Duration::from_millis(500)))
        .await
        .unwrap();
    assert_eq!(env.status, AggregateStatus::Success);
}
