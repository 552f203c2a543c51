use regio_core::{
    AggregateEnvelope, AggregateOutcome, AggregateStatus, Collection, CollectionPage,
    CollectionQuery, RegionRequest, RegioError, SortKey, collapse_region_errors, merge_sorted,
    normalize_payload,
};
use tokio_util::sync::CancellationToken;

use crate::Regio;
use crate::regio_collection_method;
use crate::router::fanout::FanOutOptions;

impl Regio {
    regio_collection_method! {
        /// Fetch the user's saved vehicles from every region.
        ///
        /// Items are merged newest first by default (`actionAt`, then `savedAt`).
        method: saved_cars,
        collection: Collection::Saved
    }

    regio_collection_method! {
        /// Fetch the vehicles the user enquired about from every region.
        method: enquired_cars,
        collection: Collection::Enquired
    }

    regio_collection_method! {
        /// Fetch the user's recently viewed vehicles from every region.
        method: viewed_cars,
        collection: Collection::Viewed
    }

    /// Fetch one collection from every targeted region and merge the results.
    ///
    /// Behavior and trade-offs:
    /// - Regions are called concurrently; a failing or slow region never hides
    ///   the items of the others (`PartialSuccess`, status code 207).
    /// - When every region fails and fallback is enabled, exactly one direct
    ///   call is made against the home region. Its envelope carries no
    ///   multi-region metadata.
    /// - When the fallback fails as well, the `Failure` envelope (empty list,
    ///   metadata present) is returned with the fallback error appended to
    ///   its warnings.
    ///
    /// # Errors
    /// Returns `InvalidArg` for a malformed query and `UnknownRegion` for an
    /// unregistered region in `query.regions`.
    pub async fn fetch_collection(
        &self,
        collection: Collection,
        query: &CollectionQuery,
    ) -> Result<AggregateEnvelope, RegioError> {
        self.run_collection(collection, query, None).await
    }

    /// Same as [`fetch_collection`](Self::fetch_collection), settling every
    /// still-running region as `Cancelled` once `cancel` is triggered.
    ///
    /// A cancelled call never falls back to the home region.
    ///
    /// # Errors
    /// Same as [`fetch_collection`](Self::fetch_collection).
    pub async fn fetch_collection_with_cancel(
        &self,
        collection: Collection,
        query: &CollectionQuery,
        cancel: CancellationToken,
    ) -> Result<AggregateEnvelope, RegioError> {
        self.run_collection(collection, query, Some(cancel)).await
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "regio::router::collection",
            skip(self, query, cancel),
            fields(collection = %collection, user = %query.user_id, page = query.page, limit = query.limit),
        )
    )]
    async fn run_collection(
        &self,
        collection: Collection,
        query: &CollectionQuery,
        cancel: Option<CancellationToken>,
    ) -> Result<AggregateEnvelope, RegioError> {
        query.validate()?;

        let req = RegionRequest::for_collection(collection, query);
        let key = SortKey::for_collection(collection, query.sort_order);
        let opts = FanOutOptions {
            targets: query.regions.clone(),
            timeout: query.timeout,
            cancel,
        };
        let results = self.fan_out(&req, &opts).await?;
        let outcome = AggregateOutcome::from_results(results, &key);

        let cancelled = opts.cancel.as_ref().is_some_and(CancellationToken::is_cancelled);
        if outcome.status != AggregateStatus::Failure || !self.cfg.fallback_to_home || cancelled {
            return Ok(outcome.into_envelope(query.page, query.limit));
        }

        Ok(self
            .home_fallback(collection, &req, &key, query, outcome, opts.cancel.as_ref())
            .await)
    }

    /// Single direct call against the home region after every region failed.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "regio::router::home_fallback",
            skip(self, req, key, query, failed, cancel),
            fields(collection = %collection, home = %self.home.id()),
        )
    )]
    async fn home_fallback(
        &self,
        collection: Collection,
        req: &RegionRequest,
        key: &SortKey,
        query: &CollectionQuery,
        failed: AggregateOutcome,
        cancel: Option<&CancellationToken>,
    ) -> AggregateEnvelope {
        let aggregate = collapse_region_errors(collection.as_str(), failed.region_errors());

        #[cfg(feature = "tracing")]
        tracing::info!(
            target: "regio::router",
            home = %self.home.id(),
            error = %aggregate,
            "all regions failed; calling home region"
        );

        let timeout = self.effective_timeout(self.home.as_ref(), query.timeout);
        let settled = Self::invoke_region(self.home.clone(), req, timeout, cancel).await;
        match settled.outcome {
            Ok(payload) => {
                let normalized = normalize_payload(&settled.region, settled.latency, payload);
                let items = merge_sorted([normalized.items], key);
                let mut warnings = vec![aggregate];
                warnings.extend(normalized.warning);
                AggregateEnvelope {
                    status: AggregateStatus::Success,
                    status_code: AggregateStatus::Success.status_code(),
                    result: CollectionPage::new(items, query.page, query.limit),
                    multi_region_metadata: None,
                    warnings,
                }
            }
            Err(e) => {
                let mut envelope = failed.into_envelope(query.page, query.limit);
                envelope.warnings.push(e);
                envelope
            }
        }
    }
}
