use std::sync::Arc;
use std::time::Duration;

use regio_core::{Region, RegionDescriptor, RegioError};
use url::Url;

use crate::auth::{TokenCache, TokenSource};
use crate::{Auth, HttpRegionConnector};

/// Builder for [`HttpRegionConnector`].
pub struct HttpRegionConnectorBuilder {
    id: String,
    display_name: Option<String>,
    base_url: Option<String>,
    bearer: Option<String>,
    token_source: Option<Arc<dyn TokenSource>>,
    default_timeout: Option<Duration>,
    client: Option<reqwest::Client>,
}

impl HttpRegionConnector {
    /// Returns an unconfigured builder for region `id`.
    ///
    /// A base URL is required; everything else is optional.
    #[must_use]
    pub fn builder(id: impl Into<String>) -> HttpRegionConnectorBuilder {
        HttpRegionConnectorBuilder {
            id: id.into(),
            display_name: None,
            base_url: None,
            bearer: None,
            token_source: None,
            default_timeout: None,
            client: None,
        }
    }

    /// Build a connector from a catalog entry, sharing `client`.
    ///
    /// # Errors
    /// Returns `InvalidArg` if the descriptor's base URL is not a valid
    /// http(s) URL.
    pub fn from_descriptor(
        desc: &RegionDescriptor,
        client: reqwest::Client,
    ) -> Result<Self, RegioError> {
        let mut b = Self::builder(desc.id.as_str())
            .display_name(desc.display_name.clone())
            .base_url(desc.base_url.clone())
            .client(client);
        if let Some(token) = &desc.auth_token {
            b = b.bearer_token(token.clone());
        }
        if let Some(timeout) = desc.timeout() {
            b = b.default_timeout(timeout);
        }
        b.build()
    }
}

impl HttpRegionConnectorBuilder {
    /// Display name; defaults to the region id.
    #[must_use]
    pub fn display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Base endpoint that request paths are appended to.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Static bearer token sent with every request.
    #[must_use]
    pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }

    /// Refreshable token supplier. Takes precedence over a static token.
    #[must_use]
    pub fn token_source(mut self, source: Arc<dyn TokenSource>) -> Self {
        self.token_source = Some(source);
        self
    }

    /// Region-specific deadline reported to the orchestrator.
    #[must_use]
    pub const fn default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = Some(timeout);
        self
    }

    /// Use an existing `reqwest::Client` (connection pool, proxies, TLS).
    #[must_use]
    pub fn client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Finish building.
    ///
    /// # Errors
    /// Returns `InvalidArg` for an empty id, a missing or unparsable base URL,
    /// or a non-http(s) scheme.
    pub fn build(self) -> Result<HttpRegionConnector, RegioError> {
        if self.id.trim().is_empty() {
            return Err(RegioError::InvalidArg("region id must not be empty".to_string()));
        }
        let raw = self.base_url.ok_or_else(|| {
            RegioError::InvalidArg(format!("region {}: base url is required", self.id))
        })?;
        let mut base_url = Url::parse(&raw)
            .map_err(|e| RegioError::InvalidArg(format!("region {}: bad base url: {e}", self.id)))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(RegioError::InvalidArg(format!(
                "region {}: unsupported scheme {}",
                self.id,
                base_url.scheme()
            )));
        }
        // Url::join replaces the last segment unless the base ends with '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let auth = match (self.token_source, self.bearer) {
            (Some(source), _) => Auth::Refreshing(TokenCache::new(source)),
            (None, Some(token)) => Auth::Static(Arc::from(token)),
            (None, None) => Auth::None,
        };
        let display = self.display_name.unwrap_or_else(|| self.id.clone());

        Ok(HttpRegionConnector {
            region: Region::new(self.id, display),
            base_url,
            client: self.client.unwrap_or_default(),
            auth,
            default_timeout: self.default_timeout,
        })
    }
}
