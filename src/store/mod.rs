use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory of pretty-printed JSON exports, one file per key
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    /// Create the store, creating its directory if needed
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create export directory {}", dir.display()))?;

        Ok(Self { dir })
    }

    /// Save data under `key`, replacing any previous export
    pub fn save<T: Serialize>(&self, key: &str, data: &T) -> Result<PathBuf> {
        let file_path = self.build_path(key);
        let json = serde_json::to_string_pretty(data).context("Failed to serialize export")?;

        fs::write(&file_path, json)
            .with_context(|| format!("Failed to write {}", file_path.display()))?;

        info!("Saved export: {}", file_path.display());
        Ok(file_path)
    }

    /// Load a previous export
    pub fn load<T: for<'de> Deserialize<'de>>(&self, key: &str) -> Result<Option<T>> {
        let file_path = self.build_path(key);
        if !file_path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&file_path).context("Failed to read export file")?;
        let data = serde_json::from_str(&json).with_context(|| {
            format!(
                "Failed to parse JSON from {:?}. First 200 chars: {}",
                file_path,
                json.chars().take(200).collect::<String>()
            )
        })?;
        Ok(Some(data))
    }

    pub fn exists(&self, key: &str) -> bool {
        self.build_path(key).exists()
    }

    // --- Helper Methods ---

    fn build_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", sanitize_key(key)))
    }
}

/// Keys come from slugs and ids; keep them to a single safe path segment
fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}
