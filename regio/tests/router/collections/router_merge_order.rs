use regio::{AggregateStatus, SortOrder};
use regio_mock::MockRegion;
use regio_mock::fixtures::{bare_payload, flat_payload};
use serde_json::json;

use crate::helpers::{m_cars, origins, query, regio_of, stamps};

#[tokio::test]
async fn merged_items_interleave_by_action_time_desc() {
    let a = m_cars("a", &[5, 3]);
    let b = m_cars("b", &[4, 2]);
    let regio = regio_of(&[&a, &b]);

    let env = regio.saved_cars(&query()).await.unwrap();

    assert_eq!(env.status, AggregateStatus::Success);
    assert_eq!(env.status_code, 200);
    assert_eq!(stamps(&env), vec![5, 4, 3, 2]);
    assert_eq!(origins(&env), vec!["a", "b", "a", "b"]);
    assert_eq!(env.result.total, 4);
}

#[tokio::test]
async fn ascending_order_reverses_the_merge() {
    let a = m_cars("a", &[5, 3]);
    let b = m_cars("b", &[4, 2]);
    let regio = regio_of(&[&a, &b]);

    let env = regio
        .saved_cars(&query().sort_order(SortOrder::Asc))
        .await
        .unwrap();
    assert_eq!(stamps(&env), vec![2, 3, 4, 5]);
}

#[tokio::test]
async fn equal_keys_keep_fan_out_order() {
    let a = m_cars("a", &[7, 7]);
    let b = m_cars("b", &[7]);
    let regio = regio_of(&[&b, &a]);

    let env = regio.viewed_cars(&query()).await.unwrap();
    assert_eq!(origins(&env), vec!["b", "a", "a"]);

    // an explicit subset reorders the tie-break as well
    let env = regio
        .viewed_cars(&query().regions(["a", "b"]))
        .await
        .unwrap();
    assert_eq!(origins(&env), vec!["a", "a", "b"]);
}

#[tokio::test]
async fn collection_specific_fields_and_mixed_envelopes_merge() {
    // no actionAt: falls back to the collection's own timestamp field
    let a = MockRegion::builder("a")
        .returns(flat_payload(vec![
            json!({ "carId": "a1", "enquiredAt": "2024-03-01T10:00:00Z" }),
            json!({ "carId": "a2", "enquiredAt": "2024-01-01" }),
        ]))
        .build();
    let b = MockRegion::builder("b")
        .returns(bare_payload(vec![
            json!({ "carId": "b1", "enquiredAt": "2024-02-01 08:30:00" }),
            json!({ "carId": "b2" }),
        ]))
        .build();
    let regio = regio_of(&[&a, &b]);

    let env = regio.enquired_cars(&query()).await.unwrap();
    let ids: Vec<&str> = env
        .items()
        .iter()
        .map(|t| t.item["carId"].as_str().unwrap())
        .collect();
    // unresolved timestamps go last
    assert_eq!(ids, vec!["a1", "b1", "a2", "b2"]);

    let env = regio
        .enquired_cars(&query().sort_order(SortOrder::Asc))
        .await
        .unwrap();
    let ids: Vec<&str> = env
        .items()
        .iter()
        .map(|t| t.item["carId"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["a2", "b1", "a1", "b2"]);
}
