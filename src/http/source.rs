use serde_json::Value;
use std::future::Future;

use crate::errors::FetchError;

/// Anything that can serve CMS JSON documents by URL.
pub trait DocumentSource: Sync {
    /// Root of the REST API, e.g. `https://cms.example.org/api`
    fn api_root(&self) -> &str;

    /// GET a JSON body; non-success statuses are errors.
    fn get_json(&self, url: &str) -> impl Future<Output = Result<Value, FetchError>> + Send;

    /// GET `<api_root>/<collection>/<id>`
    fn get_document(
        &self,
        collection: &str,
        id: &str,
    ) -> impl Future<Output = Result<Value, FetchError>> + Send {
        let url = format!(
            "{}/{}/{}",
            self.api_root(),
            collection,
            urlencoding::encode(id)
        );
        async move { self.get_json(&url).await }
    }
}
