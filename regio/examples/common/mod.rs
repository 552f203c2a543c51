use regio::{RegionConnector, RegionRegistry};
use std::sync::Arc;

/// Regions loaded from the JSON catalog named by `REGIO_EXAMPLES_REGIONS`,
/// or the two fixture regions when the variable is unset.
#[allow(dead_code)]
pub fn get_registry() -> Result<RegionRegistry, Box<dyn std::error::Error>> {
    if let Ok(path) = std::env::var("REGIO_EXAMPLES_REGIONS") {
        let raw = std::fs::read_to_string(path)?;
        let catalog = regio::RegistryConfig::from_json_str(&raw)?;
        Ok(regio_http::registry_from_config(&catalog)?)
    } else {
        println!("--- (Using fixture regions) ---");
        let fixtures: Vec<Arc<dyn RegionConnector>> = vec![
            Arc::new(regio_mock::FixtureRegion::india()),
            Arc::new(regio_mock::FixtureRegion::australia()),
        ];
        Ok(RegionRegistry::new(fixtures)?)
    }
}

/// Install a fmt subscriber honoring `RUST_LOG` (defaults to `regio=debug`).
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("regio=debug"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
