use std::time::Duration;

use regio::{AggregateStatus, CancellationToken, Collection, RegioError};

use crate::helpers::{m_cars, m_fail, m_hang, query, regio_of};

#[tokio::test(start_paused = true)]
async fn cancel_settles_in_flight_regions_and_keeps_settled_ones() {
    let a = m_cars("a", &[30, 20]);
    let b = m_hang("b");
    let regio = regio_of(&[&a, &b]);

    let q = query();
    let token = CancellationToken::new();
    let trigger = token.clone();
    let (env, ()) = tokio::join!(
        regio.fetch_collection_with_cancel(Collection::Saved, &q, token),
        async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            trigger.cancel();
        }
    );
    let env = env.unwrap();

    assert_eq!(env.status, AggregateStatus::PartialSuccess);
    assert_eq!(env.items().len(), 2);
    let meta = env.multi_region_metadata.unwrap();
    assert!(meta.per_region[0].success);
    assert_eq!(meta.per_region[1].error, Some(RegioError::cancelled("b")));
}

#[tokio::test(start_paused = true)]
async fn cancelled_request_does_not_fall_back() {
    let a = m_hang("a");
    let b = m_hang("b");
    let regio = regio_of(&[&a, &b]);

    let q = query();
    let token = CancellationToken::new();
    let trigger = token.clone();
    let (env, ()) = tokio::join!(
        regio.fetch_collection_with_cancel(Collection::Enquired, &q, token),
        async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            trigger.cancel();
        }
    );
    let env = env.unwrap();

    assert_eq!(env.status, AggregateStatus::Failure);
    assert!(env.multi_region_metadata.is_some());
    assert!(
        env.warnings
            .iter()
            .all(|w| matches!(w, RegioError::Cancelled { .. }))
    );
    // the home region only saw the fan-out call
    assert_eq!(a.call_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn cancel_reaches_an_in_flight_home_fallback() {
    let home = m_hang("home");
    let a = m_fail("a");
    let regio = regio_of(&[&home, &a]);

    let q = query().regions(["a"]);
    let token = CancellationToken::new();
    let trigger = token.clone();
    let started = tokio::time::Instant::now();
    let (env, ()) = tokio::join!(
        regio.fetch_collection_with_cancel(Collection::Saved, &q, token),
        async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            trigger.cancel();
        }
    );
    let env = env.unwrap();

    let elapsed = started.elapsed();
    assert!(elapsed < Duration::from_secs(1), "{elapsed:?}");
    assert_eq!(home.call_count(), 1);
    assert_eq!(env.status, AggregateStatus::Failure);
    assert_eq!(env.warnings.last(), Some(&RegioError::cancelled("home")));
}
