use regio::{AggregateStatus, RegioError};
use regio_mock::MockRegion;
use regio_mock::fixtures::{bare_payload, car};
use serde_json::json;

use crate::helpers::{m_cars, origins, query, regio_of};

#[tokio::test]
async fn unexpected_shape_contributes_nothing_but_a_warning() {
    let odd = MockRegion::builder("a")
        .returns(json!({ "result": "not-a-list" }))
        .build();
    let b = m_cars("b", &[2, 1]);
    let regio = regio_of(&[&odd, &b]);

    let env = regio.saved_cars(&query()).await.unwrap();

    // the region answered, so it still counts as succeeded
    assert_eq!(env.status, AggregateStatus::Success);
    assert_eq!(origins(&env), vec!["b", "b"]);
    assert_eq!(
        env.warnings,
        vec![RegioError::UnexpectedShape {
            region: "a".to_string()
        }]
    );
}

#[tokio::test]
async fn every_supported_envelope_is_read() {
    let nested = m_cars("a", &[3]);
    let flat = MockRegion::builder("b")
        .returns(json!({ "result": [car("b-2", 2)] }))
        .build();
    let bare = MockRegion::builder("c")
        .returns(bare_payload(vec![car("c-1", 1)]))
        .build();
    let regio = regio_of(&[&nested, &flat, &bare]);

    let env = regio.viewed_cars(&query()).await.unwrap();
    assert_eq!(origins(&env), vec!["a", "b", "c"]);
    assert!(env.warnings.is_empty());
}

#[tokio::test]
async fn items_are_passed_through_untouched() {
    let raw = json!({ "carId": "x", "actionAt": 5, "extra": { "nested": [1, 2] } });
    let a = MockRegion::builder("a")
        .returns(bare_payload(vec![raw.clone()]))
        .build();
    let regio = regio_of(&[&a]);

    let env = regio.saved_cars(&query()).await.unwrap();
    assert_eq!(env.items()[0].item, raw);
}
