use log::{info, warn};

use super::models::{Project, ProjectStatus};
use super::{FALLBACK_LOCALE, PROJECTS};
use crate::errors::FetchError;
use crate::http::DocumentSource;
use crate::pagination::{
    CollectionQuery, FilterOp, PagedFetcher, PaginationConfig, build_collection_url, build_page_url,
};

fn project_query(locale: &str) -> CollectionQuery {
    CollectionQuery::new(PROJECTS)
        .depth(2)
        .locale(locale, FALLBACK_LOCALE)
}

/// Look a project up by slug in `locale`. `None` when the CMS has no match.
pub async fn fetch_project<S: DocumentSource>(
    source: &S,
    config: &PaginationConfig,
    slug: &str,
    locale: &str,
) -> Result<Option<Project>, FetchError> {
    info!("Fetching project '{}' ({})", slug, locale);

    let query = project_query(locale).filter("slug", FilterOp::Like, slug);
    let fetcher = PagedFetcher::new(source, config.clone());
    let page = fetcher.fetch_page(&query, 1).await?;

    if page.total_docs == Some(0) {
        return Ok(None);
    }
    let Some(document) = page.docs.into_iter().next() else {
        return Ok(None);
    };

    if page.total_docs.is_some_and(|total| total > 1) {
        warn!("Slug '{}' matched {:?} projects, using the first", slug, page.total_docs);
    }

    let url = build_page_url(source.api_root(), &query, config.page_size, 1);
    Project::from_document(document)
        .map(Some)
        .map_err(|e| FetchError::bad_shape(&url, e.to_string()))
}

/// Every project in `locale`, populated two levels deep
pub async fn fetch_projects<S: DocumentSource>(
    source: &S,
    config: &PaginationConfig,
    locale: &str,
) -> Result<Vec<Project>, FetchError> {
    let query = project_query(locale);
    let fetcher = PagedFetcher::new(source, config.clone());
    let documents = fetcher.fetch_all(&query, None).await?;
    let url = build_collection_url(source.api_root(), &query);

    documents
        .into_iter()
        .map(|doc| Project::from_document(doc).map_err(|e| FetchError::bad_shape(&url, e.to_string())))
        .collect()
}

/// Split into (ongoing, past); projects with any other status are skipped
pub fn partition_by_status(projects: &[Project]) -> (Vec<&Project>, Vec<&Project>) {
    let ongoing = projects
        .iter()
        .filter(|p| p.status == ProjectStatus::Ongoing)
        .collect();
    let past = projects
        .iter()
        .filter(|p| p.status == ProjectStatus::Past)
        .collect();
    (ongoing, past)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_partition_by_status() {
        let projects: Vec<Project> = [("a", "ongoing"), ("b", "past"), ("c", "draft"), ("d", "ongoing")]
            .iter()
            .map(|(slug, status)| {
                Project::from_document(json!({ "id": slug, "slug": slug, "status": status })).unwrap()
            })
            .collect();

        let (ongoing, past) = partition_by_status(&projects);

        let slugs = |list: &[&Project]| list.iter().map(|p| p.slug.clone()).collect::<Vec<_>>();
        assert_eq!(slugs(&ongoing), vec!["a", "d"]);
        assert_eq!(slugs(&past), vec!["b"]);
    }

    #[test]
    fn test_project_query_params() {
        let query = project_query("jp").filter("slug", FilterOp::Like, "kronii");
        let params = query.params();
        assert!(params.contains(&("depth".to_string(), "2".to_string())));
        assert!(params.contains(&("locale".to_string(), "jp".to_string())));
        assert!(params.contains(&("fallback-locale".to_string(), "en".to_string())));
    }
}
