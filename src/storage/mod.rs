pub mod file;

pub use file::FileStore;

use anyhow::Result;

/// Blob store holding the latest snapshot.
pub trait SnapshotStore {
    /// The previously saved snapshot, or `None` if nothing was saved yet.
    fn load(&self) -> Result<Option<String>>;

    fn save(&mut self, snapshot: &str) -> Result<()>;
}

/// In-memory store, used by tests and embedders that persist elsewhere.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    snapshot: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: impl Into<String>) -> Self {
        Self {
            snapshot: Some(snapshot.into()),
        }
    }

    pub fn snapshot(&self) -> Option<&str> {
        self.snapshot.as_deref()
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.snapshot.clone())
    }

    fn save(&mut self, snapshot: &str) -> Result<()> {
        self.snapshot = Some(snapshot.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_starts_empty() {
        let store = MemoryStore::new();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_memory_store_save_replaces() {
        let mut store = MemoryStore::with_snapshot("[]");
        store.save("[1]").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("[1]"));
        assert_eq!(store.snapshot(), Some("[1]"));
    }
}
