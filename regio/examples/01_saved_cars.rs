mod common;
use regio::{CollectionQuery, Regio};
use common::{get_registry, init_tracing};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    // 1. Load the region catalog (fixtures unless REGIO_EXAMPLES_REGIONS is set).
    let registry = get_registry()?;

    // 2. Build the orchestrator; the first region doubles as the home region.
    let regio = Regio::builder().with_registry(&registry).build()?;

    // 3. Fetch the user's saved vehicles from every region.
    let envelope = regio.saved_cars(&CollectionQuery::new("u-1001")).await?;

    // 4. Print the merged list with its provenance.
    println!(
        "{} ({}): {} items",
        envelope.status_code,
        serde_json::to_string(&envelope.status)?,
        envelope.result.total
    );
    for tagged in envelope.items() {
        println!(
            "  {:<28} {:>15} from {}",
            tagged.item["carId"].as_str().unwrap_or("?"),
            tagged.item["actionAt"],
            tagged.provenance.display_name
        );
    }

    Ok(())
}
