mod common;
use std::sync::Arc;
use std::time::Duration;

use regio::{CollectionQuery, Regio};
use regio_mock::{FixtureRegion, MockRegion};
use common::init_tracing;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    // 1. One healthy region, one that never answers, one that refuses connections.
    let stalled = MockRegion::builder("us")
        .display_name("United States")
        .hangs()
        .build();
    let refused = MockRegion::builder("uk")
        .display_name("United Kingdom")
        .fails_transport("connection refused")
        .build();

    let regio = Regio::builder()
        .with_region(Arc::new(FixtureRegion::india()))
        .with_region(stalled)
        .with_region(refused)
        .region_timeout(Duration::from_millis(300))
        .build()?;

    // 2. The healthy region's items survive; the others are reported in metadata.
    let envelope = regio.viewed_cars(&CollectionQuery::new("u-1001")).await?;
    println!("{}", serde_json::to_string_pretty(&envelope)?);

    // 3. When every targeted region fails, the home region answers alone.
    let envelope = regio
        .viewed_cars(&CollectionQuery::new("u-1001").regions(["us", "uk"]))
        .await?;
    println!(
        "fallback={} status={} items={}",
        envelope.is_fallback(),
        envelope.status_code,
        envelope.items().len()
    );

    Ok(())
}
