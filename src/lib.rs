pub mod cli;
pub mod cms;
pub mod config;
pub mod errors;
pub mod http;
pub mod pagination;
pub mod rate_limiter;
pub mod resolve;
pub mod services;
pub mod store;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use std::path::Path;
use tokio::runtime::Runtime;

use crate::cli::Cli;
use crate::cms::ProjectRef;
use crate::config::{AppConfig, CmsSettings};
use crate::pagination::PaginationConfig;
use crate::services::ExportService;

pub fn interpret() -> Cli {
    Cli::parse()
}

pub fn handle_projects(out: &Path, pagination: PaginationConfig, lang: &str) -> Result<()> {
    let service = build_service(out, pagination)?;
    build_runtime()?.block_on(service.export_projects(lang))?;
    Ok(())
}

pub fn handle_project(out: &Path, pagination: PaginationConfig, slug: &str, lang: &str) -> Result<()> {
    let service = build_service(out, pagination)?;
    if build_runtime()?.block_on(service.export_project(slug, lang))?.is_none() {
        anyhow::bail!("Project '{}' not found", slug);
    }
    Ok(())
}

pub fn handle_submissions(
    out: &Path,
    pagination: PaginationConfig,
    project_id: &str,
    slug: Option<&str>,
) -> Result<()> {
    let project = ProjectRef::new(project_id, slug.unwrap_or(project_id));
    let service = build_service(out, pagination)?;
    build_runtime()?.block_on(service.export_submissions(&project))?;
    Ok(())
}

pub fn handle_media(out: &Path, pagination: PaginationConfig, collection: &str, ids: &[String]) -> Result<()> {
    let service = build_service(out, pagination)?;
    build_runtime()?.block_on(service.export_media(collection, ids))?;
    Ok(())
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}

fn build_service(out: &Path, pagination: PaginationConfig) -> Result<ExportService> {
    let config = AppConfig::new(CmsSettings::from_env()?, pagination);
    ExportService::new(config, out)
}

fn build_runtime() -> Result<Runtime> {
    Ok(Runtime::new()?)
}
