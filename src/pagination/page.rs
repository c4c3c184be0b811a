use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::FetchError;

/// One page of a paginated collection listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub docs: Vec<T>,
    #[serde(default)]
    pub total_docs: Option<u64>,
    pub has_next_page: bool,
}

/// Validate a listing body. `docs` and `hasNextPage` are mandatory.
pub fn parse_page(url: &str, body: Value) -> Result<PageResponse<Value>, FetchError> {
    if !body.is_object() {
        return Err(FetchError::bad_shape(url, "page body is not a JSON object"));
    }

    serde_json::from_value(body).map_err(|e| FetchError::bad_shape(url, e.to_string()))
}
