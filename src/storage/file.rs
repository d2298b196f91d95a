use super::SnapshotStore;
use crate::list::SnapshotError;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Storage key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "MinimalList";

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(dir: &Path, key: &str) -> Self {
        Self {
            path: dir.join(format!("{}.json", key)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Move an unreadable snapshot aside so the next save does not overwrite
    /// it. Returns the new location, or `None` if there was nothing to move.
    pub fn quarantine(&self) -> Result<Option<PathBuf>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let target = self.path.with_extension("json.corrupt");
        fs::rename(&self.path, &target).with_context(|| {
            format!(
                "Failed to move {} to {}",
                self.path.display(),
                target.display()
            )
        })?;
        info!(from = %self.path.display(), to = %target.display(), "quarantined corrupt snapshot");
        Ok(Some(target))
    }
}

impl SnapshotStore for FileStore {
    fn load(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no snapshot file");
            return Ok(None);
        }
        let bytes = fs::read(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let content = String::from_utf8(bytes).map_err(|e| {
            SnapshotError::corrupt(format!("{} is not valid UTF-8: {}", self.path.display(), e))
        })?;
        Ok(Some(content))
    }

    fn save(&mut self, snapshot: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, snapshot)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        debug!(path = %self.path.display(), bytes = snapshot.len(), "saved snapshot");
        Ok(())
    }
}
