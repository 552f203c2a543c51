//! regio-http
//!
//! Region connector that implements `RegionConnector` over plain HTTP GET with
//! `reqwest`. Supports static bearer tokens and refreshable token sources whose
//! refresh is single-flight, plus building a whole registry from a JSON catalog.
#![warn(missing_docs)]

mod auth;
mod builder;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use regio_core::{
    Region, RegionConnector, RegionRegistry, RegionRequest, RegioError, RegistryConfig,
};
use reqwest::StatusCode;
use serde_json::Value;
use url::Url;

pub use auth::TokenSource;
use auth::{Token, TokenCache};
pub use builder::HttpRegionConnectorBuilder;

pub(crate) enum Auth {
    None,
    Static(Arc<str>),
    Refreshing(TokenCache),
}

/// HTTP-backed region. Construct with [`HttpRegionConnector::builder`] or
/// [`HttpRegionConnector::from_descriptor`].
pub struct HttpRegionConnector {
    region: Region,
    base_url: Url,
    client: reqwest::Client,
    auth: Auth,
    default_timeout: Option<Duration>,
}

impl HttpRegionConnector {
    /// Base endpoint, always ending with `/`.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url_for(&self, req: &RegionRequest) -> Result<Url, RegioError> {
        let segments: Vec<&str> = req.path.split('/').filter(|s| !s.is_empty()).collect();
        if segments.iter().any(|s| matches!(*s, "." | "..")) {
            return Err(RegioError::InvalidArg(format!(
                "bad request path {}: dot segments are not allowed",
                req.path
            )));
        }
        let mut url = self.base_url.clone();
        // each segment is percent-encoded, so ids cannot leak into the query
        url.path_segments_mut()
            .map_err(|()| {
                RegioError::InvalidArg(format!("region {}: base url cannot hold a path", self.region.id))
            })?
            .pop_if_empty()
            .extend(segments);
        if !req.query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(req.query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }
        Ok(url)
    }

    fn normalize_error(&self, e: &reqwest::Error) -> RegioError {
        if e.is_decode() {
            RegioError::Data(format!("{}: {e}", self.region.id))
        } else {
            RegioError::transport(self.region.id.as_str(), e.to_string())
        }
    }

    async fn send(&self, url: &Url, token: Option<&str>) -> Result<reqwest::Response, RegioError> {
        let mut rb = self.client.get(url.clone());
        if let Some(t) = token {
            rb = rb.bearer_auth(t);
        }
        rb.send().await.map_err(|e| self.normalize_error(&e))
    }

    async fn current_token(&self) -> Result<Option<Token>, RegioError> {
        match &self.auth {
            Auth::None => Ok(None),
            Auth::Static(value) => Ok(Some(Token {
                value: Arc::clone(value),
                epoch: 0,
            })),
            Auth::Refreshing(cache) => cache.token().await.map(Some),
        }
    }

    async fn decode(&self, resp: reqwest::Response) -> Result<Value, RegioError> {
        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(RegioError::Unauthorized {
                region: self.region.id.to_string(),
                msg: "credentials rejected".to_string(),
            });
        }
        if !status.is_success() {
            return Err(RegioError::http_status(
                self.region.id.as_str(),
                status.as_u16(),
            ));
        }
        resp.json::<Value>()
            .await
            .map_err(|e| RegioError::Data(format!("{}: {e}", self.region.id)))
    }
}

#[async_trait]
impl RegionConnector for HttpRegionConnector {
    fn region(&self) -> &Region {
        &self.region
    }

    fn default_timeout(&self) -> Option<Duration> {
        self.default_timeout
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "regio_http::fetch",
            skip(self, req),
            fields(region = %self.region.id, path = %req.path),
        )
    )]
    async fn fetch(&self, req: &RegionRequest) -> Result<Value, RegioError> {
        let url = self.url_for(req)?;
        let token = self.current_token().await?;
        let resp = self
            .send(&url, token.as_ref().map(|t| t.value.as_ref()))
            .await?;

        if resp.status() == StatusCode::UNAUTHORIZED
            && let Auth::Refreshing(cache) = &self.auth
        {
            #[cfg(feature = "tracing")]
            tracing::debug!(target: "regio::http", region = %self.region.id, "401; refreshing token");

            let fresh = cache
                .refresh(token.map(|t| t.epoch))
                .await
                .map_err(|e| RegioError::Unauthorized {
                    region: self.region.id.to_string(),
                    msg: format!("token refresh failed: {e}"),
                })?;
            let retry = self.send(&url, Some(fresh.value.as_ref())).await?;
            return self.decode(retry).await;
        }

        self.decode(resp).await
    }
}

/// Build an HTTP connector for every descriptor in `cfg`, in catalog order,
/// sharing one connection pool.
///
/// # Errors
/// Returns `InvalidArg` for an empty catalog, duplicate or empty ids, or an
/// invalid base URL.
pub fn registry_from_config(cfg: &RegistryConfig) -> Result<RegionRegistry, RegioError> {
    cfg.validate()?;
    let client = reqwest::Client::new();
    let connectors = cfg
        .regions
        .iter()
        .map(|d| {
            HttpRegionConnector::from_descriptor(d, client.clone())
                .map(|c| Arc::new(c) as Arc<dyn RegionConnector>)
        })
        .collect::<Result<Vec<_>, _>>()?;
    RegionRegistry::new(connectors)
}
