//! Test doubles for `RegionConnector`.
//!
//! - [`MockRegion`]: scripted behavior (return, fail, hang, panic) with an
//!   optional delay and a call log, for exercising fan-out semantics.
//! - [`FixtureRegion`]: deterministic per-user collections for examples.
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use regio_core::{Region, RegionConnector, RegionRequest, RegioError};
use serde_json::Value;
use tokio::sync::Mutex;

pub mod fixtures;

pub use fixtures::FixtureRegion;

/// Instruction for how a region call should behave.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Return the provided body.
    Return(Value),
    /// Fail with the provided error.
    Fail(RegioError),
    /// Never settle (simulate a stalled backend).
    Hang,
    /// Panic inside the transport with the provided message.
    Panic(&'static str),
}

/// Region connector whose behavior is scripted by the test.
pub struct MockRegion {
    region: Region,
    delay: Duration,
    default_timeout: Option<Duration>,
    behavior: Mutex<MockBehavior>,
    calls: AtomicUsize,
    requests: Mutex<Vec<RegionRequest>>,
}

impl MockRegion {
    /// Start building a mock for region `id`.
    #[must_use]
    pub fn builder(id: &str) -> MockRegionBuilder {
        MockRegionBuilder::new(id)
    }

    /// Replace the behavior for subsequent calls.
    pub async fn set_behavior(&self, behavior: MockBehavior) {
        *self.behavior.lock().await = behavior;
    }

    /// Number of `fetch` calls received so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Copy of every request received so far.
    pub async fn requests(&self) -> Vec<RegionRequest> {
        self.requests.lock().await.clone()
    }
}

#[async_trait]
impl RegionConnector for MockRegion {
    fn region(&self) -> &Region {
        &self.region
    }

    fn default_timeout(&self) -> Option<Duration> {
        self.default_timeout
    }

    async fn fetch(&self, req: &RegionRequest) -> Result<Value, RegioError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().await.push(req.clone());
        // Snapshot behavior without holding the lock across the delay
        let behavior = self.behavior.lock().await.clone();

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        match behavior {
            MockBehavior::Return(v) => Ok(v),
            MockBehavior::Fail(e) => Err(e),
            MockBehavior::Hang => std::future::pending().await,
            MockBehavior::Panic(msg) => panic!("{msg}"),
        }
    }
}

/// Builder for [`MockRegion`].
pub struct MockRegionBuilder {
    id: String,
    display_name: Option<String>,
    delay: Duration,
    default_timeout: Option<Duration>,
    behavior: MockBehavior,
}

impl MockRegionBuilder {
    fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            display_name: None,
            delay: Duration::ZERO,
            default_timeout: None,
            behavior: MockBehavior::Return(Value::Array(Vec::new())),
        }
    }

    /// Display name; defaults to the uppercased id.
    #[must_use]
    pub fn display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Sleep this long before acting.
    #[must_use]
    pub const fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Region-specific deadline reported through `default_timeout`.
    #[must_use]
    pub const fn default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = Some(timeout);
        self
    }

    /// Answer with `body`.
    #[must_use]
    pub fn returns(mut self, body: Value) -> Self {
        self.behavior = MockBehavior::Return(body);
        self
    }

    /// Fail with `err`.
    #[must_use]
    pub fn fails(mut self, err: RegioError) -> Self {
        self.behavior = MockBehavior::Fail(err);
        self
    }

    /// Fail with a transport error mentioning `msg`.
    #[must_use]
    pub fn fails_transport(self, msg: &str) -> Self {
        let err = RegioError::transport(self.id.clone(), msg);
        self.fails(err)
    }

    /// Never settle.
    #[must_use]
    pub fn hangs(mut self) -> Self {
        self.behavior = MockBehavior::Hang;
        self
    }

    /// Panic with `msg`.
    #[must_use]
    pub fn panics(mut self, msg: &'static str) -> Self {
        self.behavior = MockBehavior::Panic(msg);
        self
    }

    /// Finish building.
    #[must_use]
    pub fn build(self) -> Arc<MockRegion> {
        let display = self
            .display_name
            .unwrap_or_else(|| self.id.to_uppercase());
        Arc::new(MockRegion {
            region: Region::new(self.id, display),
            delay: self.delay,
            default_timeout: self.default_timeout,
            behavior: Mutex::new(self.behavior),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        })
    }
}
