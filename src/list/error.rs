use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListError {
    #[error("list item text must not be empty")]
    EmptyText,
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The stored snapshot could not be decoded. The list falls back to empty.
    #[error("corrupt snapshot: {details}")]
    Corrupt { details: String },

    #[error("failed to encode snapshot: {0}")]
    Encode(#[source] serde_json::Error),
}

impl SnapshotError {
    pub fn corrupt(details: impl Into<String>) -> Self {
        Self::Corrupt {
            details: details.into(),
        }
    }

    pub fn is_corrupt(&self) -> bool {
        matches!(self, Self::Corrupt { .. })
    }
}
