use regio::{Collection, RegionRequest, SortOrder};

use crate::helpers::{USER, m_cars, query, regio_of};

#[tokio::test]
async fn every_region_receives_the_same_request() {
    let a = m_cars("a", &[1]);
    let b = m_cars("b", &[2]);
    let regio = regio_of(&[&a, &b]);

    regio
        .fetch_collection(
            Collection::Enquired,
            &query()
                .page(2)
                .limit(5)
                .sort_order(SortOrder::Asc)
                .is_active(true),
        )
        .await
        .unwrap();

    let expected = RegionRequest::new(format!("/user-cars/enquired/{USER}"))
        .param("page", 2)
        .param("limit", 5)
        .param("sortOrder", "ASC")
        .param("isActive", true);
    assert_eq!(a.requests().await, vec![expected.clone()]);
    assert_eq!(b.requests().await, vec![expected]);
}

#[tokio::test]
async fn page_and_limit_are_echoed_without_truncation() {
    let a = m_cars("a", &[3, 2, 1]);
    let regio = regio_of(&[&a]);

    let env = regio
        .saved_cars(&query().page(4).limit(2))
        .await
        .unwrap();

    assert_eq!(env.result.page, 4);
    assert_eq!(env.result.limit, 2);
    assert_eq!(env.result.total, 3);
    assert_eq!(a.requests().await[0].get("isActive"), None);
}
