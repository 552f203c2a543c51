// Re-export helpers so tests can `use crate::helpers::*;`
#![allow(dead_code)]

use std::sync::Arc;

use regio::{AggregateEnvelope, CollectionQuery, Regio};
use regio_mock::MockRegion;
use regio_mock::fixtures::{car, nested_payload};

pub use regio_mock::MockBehavior;

pub const USER: &str = "u-1001";

/// Default query for `USER`.
pub fn query() -> CollectionQuery {
    CollectionQuery::new(USER)
}

/// Region answering with one car per stamp, ids `"{region}-{stamp}"`.
pub fn m_cars(id: &str, stamps: &[i64]) -> Arc<MockRegion> {
    MockRegion::builder(id)
        .returns(nested_payload(
            stamps
                .iter()
                .map(|s| car(&format!("{id}-{s}"), *s))
                .collect(),
        ))
        .build()
}

/// Region failing with a transport error.
pub fn m_fail(id: &str) -> Arc<MockRegion> {
    MockRegion::builder(id).fails_transport("connection reset").build()
}

/// Region that never answers.
pub fn m_hang(id: &str) -> Arc<MockRegion> {
    MockRegion::builder(id).hangs().build()
}

/// Orchestrator over `regions` in the given order; home is the first one.
pub fn regio_of(regions: &[&Arc<MockRegion>]) -> Regio {
    regions
        .iter()
        .fold(Regio::builder(), |b, r| b.with_region((*r).clone()))
        .build()
        .unwrap()
}

/// `actionAt` of every merged item, in envelope order.
pub fn stamps(env: &AggregateEnvelope) -> Vec<i64> {
    env.items()
        .iter()
        .map(|t| t.item["actionAt"].as_i64().unwrap())
        .collect()
}

/// Source region of every merged item, in envelope order.
pub fn origins(env: &AggregateEnvelope) -> Vec<String> {
    env.items()
        .iter()
        .map(|t| t.provenance.region.to_string())
        .collect()
}
