/// Generate a collection adapter method that forwards to
/// [`Regio::fetch_collection`](crate::Regio::fetch_collection) for a fixed
/// collection.
///
/// Notes on `collection`:
/// - Pass a `Collection` variant path (e.g., `Collection::Saved`).
/// - The variant decides the backend path segment and the sort-key fields.
#[macro_export]
macro_rules! regio_collection_method {
    (
        $(#[$meta:meta])*
        method: $name:ident,
        collection: $collection:expr
    ) => {
        $(#[$meta])*
        #[cfg_attr(
            feature = "tracing",
            tracing::instrument(
                target = "regio::router",
                skip(self, query),
                fields(collection = %$collection, user = %query.user_id),
            )
        )]
        ///
        /// # Errors
        /// Returns an error only for invalid arguments or an unknown region in
        /// an explicit subset. Region failures surface in the envelope.
        pub async fn $name(
            &self,
            query: &regio_core::CollectionQuery,
        ) -> Result<regio_core::AggregateEnvelope, regio_core::RegioError> {
            self.fetch_collection($collection, query).await
        }
    };
}
