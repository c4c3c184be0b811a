use log::info;
use serde_json::Value;

use super::models::ProjectRef;
use super::{SUBMISSION_MEDIA, SUBMISSIONS};
use crate::errors::FetchError;
use crate::http::DocumentSource;
use crate::pagination::{CollectionQuery, FilterOp, PagedFetcher, PaginationConfig};
use crate::resolve::{ReferenceResolver, ReferenceSpec};

/// Unpopulated listing of a project's submissions
pub fn submission_query(project: &ProjectRef) -> CollectionQuery {
    CollectionQuery::new(SUBMISSIONS)
        .filter("project", FilterOp::Equals, project.id.as_str())
        .depth(0)
}

/// The icon and every image-typed media entry point into `submission-media`
pub fn submission_references() -> ReferenceResolver {
    ReferenceResolver::new()
        .with(ReferenceSpec::field("srcIcon", SUBMISSION_MEDIA))
        .with(ReferenceSpec::array_field("media", "image", SUBMISSION_MEDIA).when("type", "image"))
}

/// Every submission of `project`, with icons and images resolved to media documents
pub async fn fetch_submissions<S: DocumentSource>(
    source: &S,
    config: &PaginationConfig,
    project: &ProjectRef,
) -> Result<Vec<Value>, FetchError> {
    info!("Fetching submissions for project {} ({})", project.slug, project.id);

    let fetcher = PagedFetcher::new(source, config.clone());
    let submissions = fetcher
        .fetch_all(&submission_query(project), Some(&submission_references()))
        .await?;

    info!("  → {} submissions for {}", submissions.len(), project.slug);
    Ok(submissions)
}
