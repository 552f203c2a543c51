use std::time::Duration;

use regio::{AggregateStatus, Regio, RegioError};
use regio_mock::MockRegion;
use regio_mock::fixtures::{car, nested_payload};

use crate::helpers::{m_hang, query};

#[tokio::test(start_paused = true)]
async fn slow_region_times_out_without_delaying_the_others() {
    let fast = MockRegion::builder("a")
        .delay(Duration::from_millis(50))
        .returns(nested_payload(vec![car("a-1", 10)]))
        .build();
    let stuck = m_hang("b");

    let regio = Regio::builder()
        .with_region(fast.clone())
        .with_region(stuck.clone())
        .region_timeout(Duration::from_millis(200))
        .build()
        .unwrap();

    let started = tokio::time::Instant::now();
    let env = regio.saved_cars(&query()).await.unwrap();
    let elapsed = started.elapsed();

    assert!(elapsed >= Duration::from_millis(200), "{elapsed:?}");
    assert!(elapsed < Duration::from_millis(250), "{elapsed:?}");

    assert_eq!(env.status, AggregateStatus::PartialSuccess);
    assert_eq!(env.items().len(), 1);

    let meta = env.multi_region_metadata.as_ref().unwrap();
    assert!(meta.per_region[0].success);
    assert!(meta.per_region[0].latency >= Duration::from_millis(50));
    assert!(meta.per_region[0].latency < Duration::from_millis(200));
    assert_eq!(
        meta.per_region[1].error,
        Some(RegioError::region_timeout("b", Duration::from_millis(200)))
    );
}

#[tokio::test(start_paused = true)]
async fn fallback_timeout_is_appended_to_failure_warnings() {
    let a = m_hang("a");
    let b = m_hang("b");
    let home = m_hang("home");

    let regio = Regio::builder()
        .with_region(home.clone())
        .with_region(a.clone())
        .with_region(b.clone())
        .region_timeout(Duration::from_millis(100))
        .build()
        .unwrap();

    let started = tokio::time::Instant::now();
    let env = regio
        .viewed_cars(&query().regions(["a", "b"]))
        .await
        .unwrap();

    // fan-out deadline plus one fallback deadline
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_millis(200), "{elapsed:?}");
    assert!(elapsed < Duration::from_millis(250), "{elapsed:?}");
    assert_eq!(env.status, AggregateStatus::Failure);
    assert_eq!(env.status_code, 503);
    assert!(env.items().is_empty());
    assert_eq!(home.call_count(), 1);
    assert_eq!(
        env.warnings.last(),
        Some(&RegioError::region_timeout("home", Duration::from_millis(100)))
    );
}
