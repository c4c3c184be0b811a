use anyhow::{Context, Result};
use log::{info, warn};
use std::path::{Path, PathBuf};

use crate::cms::{self, ProjectRef};
use crate::config::AppConfig;
use crate::http::CmsClient;
use crate::pagination::PaginationConfig;
use crate::store::JsonStore;

/// Pulls collections out of the CMS and writes them to the export directory
pub struct ExportService {
    client: CmsClient,
    store: JsonStore,
    pagination: PaginationConfig,
}

impl ExportService {
    pub fn new(config: AppConfig, out_dir: &Path) -> Result<Self> {
        let client = CmsClient::new(&config.cms).context("Failed to set up CMS client")?;
        let store = JsonStore::new(out_dir)?;

        Ok(Self {
            client,
            store,
            pagination: config.pagination,
        })
    }

    pub async fn export_projects(&self, locale: &str) -> Result<PathBuf> {
        info!("=== Exporting projects ({}) ===", locale);

        let projects = cms::fetch_projects(&self.client, &self.pagination, locale)
            .await
            .context("Failed to fetch projects")?;

        let (ongoing, past) = cms::partition_by_status(&projects);
        info!("  → {} ongoing, {} past, {} total", ongoing.len(), past.len(), projects.len());

        self.store.save(&format!("projects-{}", locale), &projects)
    }

    /// `Ok(None)` when no project has this slug
    pub async fn export_project(&self, slug: &str, locale: &str) -> Result<Option<PathBuf>> {
        info!("=== Exporting project {} ({}) ===", slug, locale);

        let project = cms::fetch_project(&self.client, &self.pagination, slug, locale)
            .await
            .with_context(|| format!("Failed to fetch project '{}'", slug))?;

        let Some(project) = project else {
            warn!("No project found for slug '{}'", slug);
            return Ok(None);
        };

        info!("  → {} uses the {:?} experience", project.slug, project.experience);
        self.store
            .save(&format!("project-{}-{}", project.slug, locale), &project)
            .map(Some)
    }

    pub async fn export_submissions(&self, project: &ProjectRef) -> Result<PathBuf> {
        info!("=== Exporting submissions of {} ===", project.slug);

        let submissions = cms::fetch_submissions(&self.client, &self.pagination, project)
            .await
            .with_context(|| format!("Failed to fetch submissions for project {}", project.id))?;

        self.store.save(&format!("submissions-{}", project.slug), &submissions)
    }

    pub async fn export_media(&self, collection: &str, ids: &[String]) -> Result<PathBuf> {
        info!("=== Exporting {} documents from {} ===", ids.len(), collection);

        let media = cms::fetch_media(&self.client, &self.pagination, collection, ids)
            .await
            .with_context(|| format!("Failed to fetch media from {}", collection))?;

        self.store.save(collection, &media)
    }
}
