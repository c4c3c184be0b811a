pub mod media;
pub mod models;
pub mod projects;
pub mod submissions;

pub use media::fetch_media;
pub use models::{Project, ProjectExperience, ProjectRef, ProjectStatus};
pub use projects::{fetch_project, fetch_projects, partition_by_status};
pub use submissions::{fetch_submissions, submission_references};

pub const PROJECTS: &str = "projects";
pub const SUBMISSIONS: &str = "submissions";
pub const SUBMISSION_MEDIA: &str = "submission-media";

/// Locale the CMS falls back to for untranslated fields
pub const FALLBACK_LOCALE: &str = "en";
