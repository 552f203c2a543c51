use std::sync::Arc;

use async_trait::async_trait;
use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use regio_core::RegioError;
use tokio::sync::Mutex;

/// Supplier of bearer tokens for a region.
///
/// Called once up front and again whenever the region answers 401.
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// Obtain a fresh token.
    ///
    /// # Errors
    /// Any error is reported as the region's failure for the triggering call.
    async fn fetch_token(&self) -> Result<String, RegioError>;
}

type Refresh = Shared<BoxFuture<'static, Result<Arc<str>, RegioError>>>;

/// A token together with the cache epoch it was issued in.
#[derive(Debug, Clone)]
pub(crate) struct Token {
    pub(crate) value: Arc<str>,
    pub(crate) epoch: u64,
}

struct State {
    token: Option<Arc<str>>,
    epoch: u64,
    inflight: Option<Refresh>,
}

/// Token cache whose refreshes are single-flight: concurrent callers that
/// observed the same stale token await one shared fetch.
pub(crate) struct TokenCache {
    source: Arc<dyn TokenSource>,
    state: Mutex<State>,
}

impl TokenCache {
    pub(crate) fn new(source: Arc<dyn TokenSource>) -> Self {
        Self {
            source,
            state: Mutex::new(State {
                token: None,
                epoch: 0,
                inflight: None,
            }),
        }
    }

    /// Current token, fetching the first one if needed.
    pub(crate) async fn token(&self) -> Result<Token, RegioError> {
        {
            let st = self.state.lock().await;
            if let Some(value) = &st.token {
                return Ok(Token {
                    value: Arc::clone(value),
                    epoch: st.epoch,
                });
            }
        }
        self.refresh(None).await
    }

    /// Replace the token issued in epoch `seen`.
    ///
    /// If another caller already replaced it, the newer token is returned
    /// without a fetch.
    pub(crate) async fn refresh(&self, seen: Option<u64>) -> Result<Token, RegioError> {
        let (fut, epoch) = {
            let mut st = self.state.lock().await;
            if let Some(value) = &st.token
                && seen.is_none_or(|s| s != st.epoch)
            {
                return Ok(Token {
                    value: Arc::clone(value),
                    epoch: st.epoch,
                });
            }
            let source = Arc::clone(&self.source);
            let fut = st
                .inflight
                .get_or_insert_with(|| {
                    async move { source.fetch_token().await.map(Arc::<str>::from) }
                        .boxed()
                        .shared()
                })
                .clone();
            (fut, st.epoch)
        };

        let res = fut.await;

        let mut st = self.state.lock().await;
        // first waiter to wake installs the outcome for everyone
        if st.epoch == epoch {
            st.inflight = None;
            st.token = res.as_ref().ok().cloned();
            st.epoch += 1;

            #[cfg(feature = "tracing")]
            tracing::debug!(
                target: "regio::http",
                epoch = st.epoch,
                ok = res.is_ok(),
                "token refreshed"
            );
        }
        // the shared fetch always lands as `epoch + 1`, even if newer
        // refreshes have been installed since
        res.map(|value| Token {
            value,
            epoch: epoch + 1,
        })
    }
}
