pub mod bulk;
pub mod engine;
pub mod error;
pub mod item;
pub mod snapshot;
pub mod state;

pub use bulk::{BulkAction, BulkActionStatus};
pub use engine::ListEngine;
pub use error::{ListError, SnapshotError};
pub use item::{ItemId, ListItem};
pub use snapshot::SnapshotRecord;
pub use state::LifecycleState;
