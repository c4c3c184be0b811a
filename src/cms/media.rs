use futures::{StreamExt, TryStreamExt, stream};
use log::info;
use serde_json::Value;

use crate::errors::FetchError;
use crate::http::DocumentSource;
use crate::pagination::{PaginationConfig, within_deadline};

/// Resolve media documents by id, in the order given
pub async fn fetch_media<S: DocumentSource>(
    source: &S,
    config: &PaginationConfig,
    collection: &str,
    ids: &[String],
) -> Result<Vec<Value>, FetchError> {
    info!("Fetching {} documents from {}", ids.len(), collection);

    let lookups = stream::iter(ids)
        .map(|id| source.get_document(collection, id))
        .buffered(config.max_concurrent_resolutions.max(1))
        .try_collect();

    within_deadline(config.deadline, lookups).await
}
