use regio::RegioError;

use crate::helpers::{m_cars, query, regio_of};

#[tokio::test]
async fn unknown_region_is_rejected_before_any_call() {
    let a = m_cars("a", &[1]);
    let b = m_cars("b", &[2]);
    let regio = regio_of(&[&a, &b]);

    let err = regio
        .saved_cars(&query().regions(["a", "mars"]))
        .await
        .unwrap_err();

    assert_eq!(err, RegioError::unknown_region("mars"));
    assert!(err.is_configuration());
    assert_eq!(a.call_count(), 0);
    assert_eq!(b.call_count(), 0);
}

#[tokio::test]
async fn invalid_queries_are_rejected_and_never_retried() {
    let a = m_cars("a", &[1]);
    let regio = regio_of(&[&a]);

    for bad in [
        query().page(0),
        query().limit(0),
        regio::CollectionQuery::new(""),
        query().regions(Vec::<&str>::new()),
    ] {
        let err = regio.enquired_cars(&bad).await.unwrap_err();
        assert!(matches!(err, RegioError::InvalidArg(_)), "{err:?}");
    }
    assert_eq!(a.call_count(), 0);
}
