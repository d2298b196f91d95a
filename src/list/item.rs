use super::error::ListError;
use super::snapshot::SnapshotRecord;
use super::state::LifecycleState;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque identifier of a list item.
///
/// Fresh ids are UUID v4 in simple (hyphenless) form. Any string is accepted
/// when reading a snapshot so ids written by older versions survive a reload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First eight characters, used for display.
    pub fn short(&self) -> &str {
        self.0.get(..8).unwrap_or(&self.0)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ItemId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    id: ItemId,
    text: String,
    lifecycle_state: LifecycleState,
    selected: bool,
}

impl ListItem {
    /// Create an active, unselected item with a fresh id.
    pub fn create(text: impl Into<String>) -> Result<Self, ListError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ListError::EmptyText);
        }
        Ok(Self::restore(ItemId::generate(), text))
    }

    /// Rebuild an active, unselected item from saved data. The text is taken
    /// as is: an item edited down to nothing still comes back.
    pub(crate) fn restore(id: ItemId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            lifecycle_state: LifecycleState::Active,
            selected: false,
        }
    }

    pub fn id(&self) -> &ItemId {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn lifecycle_state(&self) -> LifecycleState {
        self.lifecycle_state
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn is_active(&self) -> bool {
        self.lifecycle_state == LifecycleState::Active
    }

    pub fn is_completed(&self) -> bool {
        self.lifecycle_state == LifecycleState::Completed
    }

    pub fn is_deleted(&self) -> bool {
        self.lifecycle_state == LifecycleState::Deleted
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    pub fn mark_completed(&mut self) {
        self.lifecycle_state = LifecycleState::Completed;
    }

    pub(crate) fn mark_deleted(&mut self) {
        self.lifecycle_state = LifecycleState::Deleted;
    }

    pub fn serialize(&self) -> SnapshotRecord {
        SnapshotRecord {
            id: self.id.clone(),
            text: self.text.clone(),
            lifecycle_state: self.lifecycle_state,
            selected: self.selected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_defaults() {
        let item = ListItem::create("buy milk").unwrap();
        assert_eq!(item.text(), "buy milk");
        assert_eq!(item.lifecycle_state(), LifecycleState::Active);
        assert!(!item.is_selected());
        assert!(!item.id().as_str().is_empty());
    }

    #[test]
    fn test_create_rejects_empty_and_whitespace() {
        assert_eq!(ListItem::create(""), Err(ListError::EmptyText));
        assert_eq!(ListItem::create("   \t\n"), Err(ListError::EmptyText));
    }

    #[test]
    fn test_create_keeps_text_verbatim() {
        let item = ListItem::create("  padded  ").unwrap();
        assert_eq!(item.text(), "  padded  ");
    }

    #[test]
    fn test_ids_are_unique() {
        let a = ListItem::create("a").unwrap();
        let b = ListItem::create("b").unwrap();
        assert_ne!(a.id(), b.id());
        assert_eq!(a.id().as_str().len(), 32);
    }

    #[test]
    fn test_mark_completed_is_idempotent() {
        let mut item = ListItem::create("task").unwrap();
        item.mark_completed();
        item.mark_completed();
        assert!(item.is_completed());
    }

    #[test]
    fn test_selection_is_independent_of_lifecycle() {
        let mut item = ListItem::create("task").unwrap();
        item.set_selected(true);
        item.mark_completed();
        assert!(item.is_selected());
        item.set_selected(false);
        assert!(!item.is_selected());
        assert!(item.is_completed());
    }

    #[test]
    fn test_serialize() {
        let mut item = ListItem::restore(ItemId::from("_abc123"), "walk dog");
        item.set_selected(true);
        let record = item.serialize();
        assert_eq!(record.id.as_str(), "_abc123");
        assert_eq!(record.text, "walk dog");
        assert_eq!(record.lifecycle_state, LifecycleState::Active);
        assert!(record.selected);
    }

    #[test]
    fn test_restore_accepts_empty_text() {
        let item = ListItem::restore(ItemId::from("e1"), "");
        assert_eq!(item.text(), "");
        assert!(item.is_active());
        assert!(!item.is_selected());
    }

    #[test]
    fn test_short_id() {
        assert_eq!(ItemId::from("0123456789abcdef").short(), "01234567");
        assert_eq!(ItemId::from("_ab").short(), "_ab");
    }
}
