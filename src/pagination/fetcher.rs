use log::{debug, info};
use serde_json::Value;
use std::future::Future;
use std::time::Duration;
use tokio::time::timeout;

use super::config::PaginationConfig;
use super::iterator::PageIterator;
use super::page::{PageResponse, parse_page};
use super::query::CollectionQuery;
use super::urls::build_page_url;
use crate::errors::FetchError;
use crate::http::DocumentSource;
use crate::resolve::ReferenceResolver;

/// Pulls every page of a collection listing and returns the resolved items in order
pub struct PagedFetcher<'a, S> {
    source: &'a S,
    config: PaginationConfig,
}

impl<'a, S: DocumentSource> PagedFetcher<'a, S> {
    pub fn new(source: &'a S, config: PaginationConfig) -> Self {
        Self { source, config }
    }

    /// Fetch all pages of `query`, resolving references with `resolver` when given.
    /// Any failure aborts the fetch; nothing partial is returned.
    pub async fn fetch_all(
        &self,
        query: &CollectionQuery,
        resolver: Option<&ReferenceResolver>,
    ) -> Result<Vec<Value>, FetchError> {
        self.with_deadline(self.fetch_pages(query, resolver)).await
    }

    /// Fetch a single page without following `hasNextPage`
    pub async fn fetch_page(
        &self,
        query: &CollectionQuery,
        page: usize,
    ) -> Result<PageResponse<Value>, FetchError> {
        self.with_deadline(self.request_page(query, page)).await
    }

    async fn with_deadline<T, F>(&self, fetch: F) -> Result<T, FetchError>
    where
        F: Future<Output = Result<T, FetchError>>,
    {
        within_deadline(self.config.deadline, fetch).await
    }

    async fn request_page(
        &self,
        query: &CollectionQuery,
        page: usize,
    ) -> Result<PageResponse<Value>, FetchError> {
        let url = build_page_url(self.source.api_root(), query, self.config.page_size, page);
        let body = self.source.get_json(&url).await?;
        parse_page(&url, body)
    }

    async fn fetch_pages(
        &self,
        query: &CollectionQuery,
        resolver: Option<&ReferenceResolver>,
    ) -> Result<Vec<Value>, FetchError> {
        info!("Fetching all of {}", query);

        let mut pages = PageIterator::new(self.config.max_pages);
        let mut accumulator = Vec::new();

        loop {
            if pages.has_reached_max() {
                return Err(FetchError::PaginationLimit {
                    max_pages: self.config.max_pages,
                });
            }

            let page = self.request_page(query, pages.current_page()).await?;
            let mut docs = page.docs;

            if let Some(resolver) = resolver {
                let resolved = resolver
                    .resolve_page(self.source, &mut docs, self.config.max_concurrent_resolutions)
                    .await?;
                debug!("  → Page {}: resolved {} references", pages.current_page(), resolved);
            }

            debug!("  → Page {}: {} items", pages.current_page(), docs.len());
            accumulator.extend(docs);

            if !page.has_next_page {
                break;
            }

            pages.advance();
        }

        info!(
            "Fetched {} items of {} across {} pages",
            accumulator.len(),
            query.collection,
            pages.current_page()
        );
        Ok(accumulator)
    }
}

/// Run `fetch` to completion, or fail with `DeadlineExceeded` once `deadline` elapses
pub async fn within_deadline<T, F>(deadline: Option<Duration>, fetch: F) -> Result<T, FetchError>
where
    F: Future<Output = Result<T, FetchError>>,
{
    match deadline {
        Some(deadline) => timeout(deadline, fetch)
            .await
            .map_err(|_| FetchError::DeadlineExceeded { deadline })?,
        None => fetch.await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::ReferenceSpec;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory source answering page URLs by their `page=` number
    struct FakeSource {
        pages: Vec<Result<Value, u16>>,
        documents: HashMap<String, Value>,
        always_more: bool,
        requested: Mutex<Vec<String>>,
    }

    impl FakeSource {
        fn new(pages: Vec<Result<Value, u16>>) -> Self {
            Self {
                pages,
                documents: HashMap::new(),
                always_more: false,
                requested: Mutex::new(Vec::new()),
            }
        }

        fn with_document(mut self, id: &str, doc: Value) -> Self {
            self.documents.insert(id.to_string(), doc);
            self
        }

        fn page_requests(&self) -> usize {
            self.requested
                .lock()
                .unwrap()
                .iter()
                .filter(|url| url.contains("page="))
                .count()
        }

        fn page_number(url: &str) -> usize {
            url.rsplit("page=").next().unwrap().parse().unwrap()
        }
    }

    impl DocumentSource for FakeSource {
        fn api_root(&self) -> &str {
            "http://fake/api"
        }

        async fn get_json(&self, url: &str) -> Result<Value, FetchError> {
            self.requested.lock().unwrap().push(url.to_string());

            if self.always_more {
                return Ok(json!({ "docs": [{ "id": "x" }], "hasNextPage": true }));
            }

            if url.contains("page=") {
                return match &self.pages[Self::page_number(url) - 1] {
                    Ok(body) => Ok(body.clone()),
                    Err(_) => Err(FetchError::transport(url, std::io::Error::other("connection reset"))),
                };
            }

            let id = url.rsplit('/').next().unwrap();
            self.documents
                .get(id)
                .cloned()
                .ok_or_else(|| FetchError::from_status(url, reqwest::StatusCode::NOT_FOUND))
        }
    }

    fn page(ids: &[&str], more: bool) -> Result<Value, u16> {
        let docs: Vec<Value> = ids.iter().map(|id| json!({ "id": id })).collect();
        Ok(json!({ "docs": docs, "hasNextPage": more }))
    }

    #[tokio::test]
    async fn test_fetches_every_page() {
        let source = FakeSource::new(vec![
            page(&["a", "b"], true),
            page(&["c", "d", "e"], true),
            page(&["f"], false),
        ]);
        let fetcher = PagedFetcher::new(&source, PaginationConfig::new());

        let items = fetcher.fetch_all(&CollectionQuery::new("things"), None).await.unwrap();

        assert_eq!(source.page_requests(), 3);
        assert_eq!(items.len(), 6);
        assert_eq!(items[0]["id"], "a");
        assert_eq!(items[5]["id"], "f");
    }

    #[tokio::test]
    async fn test_failed_middle_page_returns_no_partial_result() {
        let source = FakeSource::new(vec![page(&["a"], true), Err(503), page(&["c"], false)]);
        let fetcher = PagedFetcher::new(&source, PaginationConfig::new());

        let result = fetcher.fetch_all(&CollectionQuery::new("things"), None).await;

        assert!(matches!(result, Err(FetchError::Transport { .. })));
        assert_eq!(source.page_requests(), 2);
    }

    #[tokio::test]
    async fn test_endless_pagination_hits_ceiling() {
        let mut source = FakeSource::new(Vec::new());
        source.always_more = true;
        let fetcher = PagedFetcher::new(&source, PaginationConfig::new().with_max_pages(5));

        let result = fetcher.fetch_all(&CollectionQuery::new("things"), None).await;

        assert!(matches!(result, Err(FetchError::PaginationLimit { max_pages: 5 })));
        assert_eq!(source.page_requests(), 5);
    }

    #[tokio::test]
    async fn test_resolves_references_before_appending() {
        let source = FakeSource::new(vec![
            Ok(json!({ "docs": [{ "id": "a" }, { "id": "b", "ref": "m1" }], "hasNextPage": true })),
            page(&["c"], false),
        ])
        .with_document("m1", json!({ "id": "m1", "url": "x.png" }));
        let resolver = ReferenceResolver::new().with(ReferenceSpec::field("ref", "media"));
        let fetcher = PagedFetcher::new(&source, PaginationConfig::new());

        let items = fetcher
            .fetch_all(&CollectionQuery::new("things"), Some(&resolver))
            .await
            .unwrap();

        assert_eq!(
            Value::Array(items),
            json!([
                { "id": "a" },
                { "id": "b", "ref": { "id": "m1", "url": "x.png" } },
                { "id": "c" }
            ])
        );
    }

    #[tokio::test]
    async fn test_failed_reference_aborts_fetch() {
        let source = FakeSource::new(vec![Ok(
            json!({ "docs": [{ "id": "a", "ref": "missing" }], "hasNextPage": false }),
        )]);
        let resolver = ReferenceResolver::new().with(ReferenceSpec::field("ref", "media"));
        let fetcher = PagedFetcher::new(&source, PaginationConfig::new());

        let result = fetcher
            .fetch_all(&CollectionQuery::new("things"), Some(&resolver))
            .await;

        assert!(matches!(result, Err(FetchError::Rejected { .. })));
    }

    #[tokio::test]
    async fn test_fetch_page_does_not_follow_next() {
        let source = FakeSource::new(vec![page(&["a"], true), page(&["b"], false)]);
        let fetcher = PagedFetcher::new(&source, PaginationConfig::new());

        let first = fetcher.fetch_page(&CollectionQuery::new("things"), 1).await.unwrap();

        assert!(first.has_next_page);
        assert_eq!(source.page_requests(), 1);
    }

    struct StalledSource;

    impl DocumentSource for StalledSource {
        fn api_root(&self) -> &str {
            "http://stalled/api"
        }

        async fn get_json(&self, _url: &str) -> Result<Value, FetchError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(json!({ "docs": [], "hasNextPage": false }))
        }
    }

    #[tokio::test]
    async fn test_deadline_exceeded() {
        let config = PaginationConfig::new().with_deadline(Duration::from_millis(20));
        let fetcher = PagedFetcher::new(&StalledSource, config);

        let result = fetcher.fetch_all(&CollectionQuery::new("things"), None).await;

        assert!(matches!(result, Err(FetchError::DeadlineExceeded { .. })));
    }

    #[tokio::test]
    async fn test_single_page_respects_deadline() {
        let config = PaginationConfig::new().with_deadline(Duration::from_millis(20));
        let fetcher = PagedFetcher::new(&StalledSource, config);

        let result = fetcher.fetch_page(&CollectionQuery::new("things"), 1).await;

        assert!(matches!(result, Err(FetchError::DeadlineExceeded { .. })));
    }
}
