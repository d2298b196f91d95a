use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of a list item.
///
/// `Deleted` never appears on an item in the live collection. It marks items
/// handed back by a bulk delete after they have been removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LifecycleState {
    #[default]
    Active,
    Completed,
    Deleted,
}

impl LifecycleState {
    /// States that survive a save/load cycle.
    pub fn is_persistent(self) -> bool {
        !matches!(self, LifecycleState::Deleted)
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifecycleState::Active => write!(f, "Active"),
            LifecycleState::Completed => write!(f, "Completed"),
            LifecycleState::Deleted => write!(f, "Deleted"),
        }
    }
}
