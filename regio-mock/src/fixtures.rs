//! Deterministic vehicle fixtures and a fixture-backed region.

use async_trait::async_trait;
use regio_core::{Region, RegionConnector, RegionRequest, RegioError};
use serde_json::{Value, json};

/// Minimal collection entry with an `actionAt` timestamp in epoch milliseconds.
#[must_use]
pub fn car(car_id: &str, action_at_ms: i64) -> Value {
    json!({
        "carId": car_id,
        "title": format!("Vehicle {car_id}"),
        "actionAt": action_at_ms,
    })
}

/// Body shaped as `{"result": {"data": [...], "total": n}}`.
#[must_use]
pub fn nested_payload(items: Vec<Value>) -> Value {
    let total = items.len();
    json!({ "result": { "data": items, "total": total } })
}

/// Body shaped as `{"result": [...]}`.
#[must_use]
pub fn flat_payload(items: Vec<Value>) -> Value {
    json!({ "result": items })
}

/// Body that is the bare list.
#[must_use]
pub fn bare_payload(items: Vec<Value>) -> Value {
    Value::Array(items)
}

fn collection_of(path: &str) -> Option<(&str, &str)> {
    let rest = path.strip_prefix("/user-cars/")?;
    rest.split_once('/')
}

/// Fixture region serving fixed collections per user.
///
/// User `FAIL` yields a transport error; user `SLOW` sleeps 200ms first.
pub struct FixtureRegion {
    region: Region,
    // distinct per region so merged output interleaves
    base_ms: i64,
}

impl FixtureRegion {
    /// Fixture region "in" (India).
    #[must_use]
    pub fn india() -> Self {
        Self {
            region: Region::new("in", "India"),
            base_ms: 1_700_000_000_000,
        }
    }

    /// Fixture region "au" (Australia).
    #[must_use]
    pub fn australia() -> Self {
        Self {
            region: Region::new("au", "Australia"),
            base_ms: 1_700_000_030_000,
        }
    }

    fn items_for(&self, action: &str, user: &str) -> Vec<Value> {
        let count = match action {
            "saved" => 3,
            "enquired" => 2,
            "viewed" => 4,
            _ => 0,
        };
        (0..count)
            .map(|i| {
                let mut v = car(
                    &format!("{}-{user}-{action}-{i}", self.region.id),
                    self.base_ms - i64::from(i) * 60_000,
                );
                v["region"] = Value::String(self.region.id.to_string());
                v
            })
            .collect()
    }
}

#[async_trait]
impl RegionConnector for FixtureRegion {
    fn region(&self) -> &Region {
        &self.region
    }

    async fn fetch(&self, req: &RegionRequest) -> Result<Value, RegioError> {
        let Some((action, user)) = collection_of(&req.path) else {
            return Err(RegioError::http_status(self.region.id.as_str(), 404));
        };
        match user {
            "FAIL" => Err(RegioError::transport(
                self.region.id.as_str(),
                "forced failure",
            )),
            "SLOW" => {
                tokio::time::sleep(std::time::Duration::from_millis(200)).await;
                Ok(nested_payload(self.items_for(action, user)))
            }
            _ => Ok(nested_payload(self.items_for(action, user))),
        }
    }
}
