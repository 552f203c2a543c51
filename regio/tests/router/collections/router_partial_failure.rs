use regio::{AggregateStatus, ErrorKind};

use crate::helpers::{m_cars, m_fail, origins, query, regio_of};

#[tokio::test]
async fn one_failed_region_yields_partial_success() {
    let a = m_cars("a", &[30, 20, 10]);
    let b = m_fail("b");
    let regio = regio_of(&[&a, &b]);

    let env = regio.saved_cars(&query()).await.unwrap();

    assert_eq!(env.status, AggregateStatus::PartialSuccess);
    assert_eq!(env.status_code, 207);
    assert_eq!(env.items().len(), 3);
    assert_eq!(env.result.total, 3);
    assert_eq!(origins(&env), vec!["a", "a", "a"]);
    assert!(env.items().iter().all(|t| t.provenance.display_name == "A"));

    let meta = env.multi_region_metadata.as_ref().unwrap();
    assert_eq!(meta.total_regions, 2);
    assert_eq!(meta.succeeded_regions, 1);
    assert_eq!(meta.failed_regions, 1);
    assert_eq!(meta.per_region[1].region.as_str(), "b");
    assert!(!meta.per_region[1].success);
    assert_eq!(
        meta.per_region[1].error.as_ref().map(regio::RegioError::kind),
        Some(ErrorKind::Transport)
    );
    assert_eq!(env.warnings.len(), 1);
    // partial success never triggers the home-region call
    assert_eq!(a.call_count(), 1);
}

#[tokio::test]
async fn envelope_serializes_with_camel_case_fields() {
    let a = m_cars("a", &[1]);
    let b = m_fail("b");
    let regio = regio_of(&[&a, &b]);

    let env = regio.viewed_cars(&query()).await.unwrap();
    let json = serde_json::to_value(&env).unwrap();

    assert_eq!(json["statusCode"], 207);
    assert_eq!(json["multiRegionMetadata"]["failedRegions"], 1);
    assert_eq!(json["result"]["total"], 1);
    assert_eq!(json["result"]["data"][0]["provenance"]["region"], "a");
}
