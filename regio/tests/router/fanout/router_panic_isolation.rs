use regio::{AggregateStatus, ErrorKind, RegioError};
use regio_mock::MockRegion;

use crate::helpers::{m_cars, origins, query, regio_of};

#[tokio::test]
async fn panicking_transport_becomes_a_failed_region() {
    let boom = MockRegion::builder("a").panics("socket exploded").build();
    let b = m_cars("b", &[3, 1]);
    let regio = regio_of(&[&boom, &b]);

    let env = regio.saved_cars(&query()).await.unwrap();

    assert_eq!(env.status, AggregateStatus::PartialSuccess);
    assert_eq!(origins(&env), vec!["b", "b"]);
    let meta = env.multi_region_metadata.as_ref().unwrap();
    let err = meta.per_region[0].error.as_ref().unwrap();
    assert_eq!(err.kind(), ErrorKind::Transport);
    match err {
        RegioError::Transport { region, msg } => {
            assert_eq!(region, "a");
            assert!(msg.contains("socket exploded"), "{msg}");
        }
        other => panic!("unexpected: {other:?}"),
    }
}
