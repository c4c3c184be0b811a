use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use std::time::Duration;

use crate::cms::FALLBACK_LOCALE;
use crate::pagination::PaginationConfig;

#[derive(Parser, Debug)]
#[command(author, version, about = "holoen-cms export tool")]
pub struct Cli {
    /// Directory exported JSON files are written to
    #[arg(short, long, global = true, default_value = "export")]
    pub out: PathBuf,

    #[command(flatten)]
    pub pagination: PaginationArgs,

    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct PaginationArgs {
    /// Items requested per page
    #[arg(long, global = true, default_value_t = 100)]
    pub page_size: usize,

    /// Give up when a listing is still not exhausted after this many pages
    #[arg(long, global = true, default_value_t = 1000)]
    pub max_pages: usize,

    /// Give up when a listing takes longer than this many seconds
    #[arg(long, global = true)]
    pub deadline_secs: Option<u64>,

    /// Reference lookups allowed in flight at once
    #[arg(long, global = true, default_value_t = 8)]
    pub concurrency: usize,
}

impl PaginationArgs {
    pub fn to_config(&self) -> PaginationConfig {
        let config = PaginationConfig::new()
            .with_page_size(self.page_size)
            .with_max_pages(self.max_pages)
            .with_max_concurrent_resolutions(self.concurrency);

        match self.deadline_secs {
            Some(secs) => config.with_deadline(Duration::from_secs(secs)),
            None => config,
        }
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Export every project
    Projects {
        /// Locale, untranslated fields fall back to English
        #[arg(short, long, default_value = FALLBACK_LOCALE)]
        lang: String,
    },
    /// Export a single project by slug
    Project {
        slug: String,
        /// Locale, untranslated fields fall back to English
        #[arg(short, long, default_value = FALLBACK_LOCALE)]
        lang: String,
    },
    /// Export every submission of a project, with media resolved
    Submissions {
        /// Project document id
        project_id: String,
        /// Project slug, used to name the export (defaults to the id)
        #[arg(long)]
        slug: Option<String>,
    },
    /// Export media documents by id
    Media {
        /// Media collection, e.g. submission-media
        collection: String,
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Print shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}
