//! File-based backend.
//!
//! Serves each resource from a JSON file in a directory, for offline use and
//! demos.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::{MetricsBackend, Resource};
use crate::error::FetchError;

/// A backend that reads resource responses from JSON files.
///
/// The directory is expected to contain `health.json`, `cpu.json`,
/// `uptime.json` and `httptrace.json`. Files are re-read on every fetch, so
/// editing them and pressing refresh shows the new content.
#[derive(Debug, Clone)]
pub struct FixtureBackend {
    dir: PathBuf,
    description: String,
}

impl FixtureBackend {
    /// Create a new fixture backend for the given directory.
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref().to_path_buf();
        let description = format!("fixtures: {}", dir.display());
        Self { dir, description }
    }

    /// Returns the directory being served.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing a resource.
    pub fn path(&self, resource: Resource) -> PathBuf {
        self.dir.join(format!("{}.json", resource.name()))
    }
}

#[async_trait]
impl MetricsBackend for FixtureBackend {
    async fn fetch(&self, resource: Resource) -> Result<serde_json::Value, FetchError> {
        let path = self.path(resource);
        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| FetchError::Io(format!("{}: {}", path.display(), e)))?;
        Ok(serde_json::from_str(&content)?)
    }

    fn description(&self) -> &str {
        &self.description
    }
}
