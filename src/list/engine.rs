use super::bulk::{BulkAction, BulkActionStatus};
use super::error::SnapshotError;
use super::item::{ItemId, ListItem};
use super::snapshot::{self, SnapshotRecord};
use super::state::LifecycleState;
use crate::render::Renderer;
use std::collections::HashSet;
use tracing::{debug, trace, warn};

/// Owns the live collection and keeps the renderer and the bulk-action
/// controls in step with it.
///
/// Items are stored in creation order. Display order is the renderer's
/// business.
#[derive(Debug)]
pub struct ListEngine<R: Renderer> {
    items: Vec<ListItem>,
    renderer: R,
    bulk_status: BulkActionStatus,
    editing: HashSet<ItemId>,
}

impl<R: Renderer> ListEngine<R> {
    pub fn new(renderer: R) -> Self {
        Self {
            items: Vec::new(),
            renderer,
            bulk_status: BulkActionStatus::default(),
            editing: HashSet::new(),
        }
    }

    /// Rebuild state from a prior snapshot.
    ///
    /// Active records come back active, completed records are added and then
    /// completed, deleted records are dropped. Selection is not restored. On a
    /// corrupt snapshot the list stays empty and the error is returned.
    pub fn initialize(&mut self, snapshot: Option<&str>) -> Result<(), SnapshotError> {
        let Some(raw) = snapshot.filter(|s| !s.trim().is_empty()) else {
            debug!("no prior snapshot, starting empty");
            self.recompute_bulk_actions();
            return Ok(());
        };

        let records = match snapshot::decode(raw) {
            Ok(records) => records,
            Err(err) => {
                self.recompute_bulk_actions();
                return Err(err);
            }
        };

        let record_count = records.len();
        for record in records {
            self.restore(record);
        }
        self.recompute_bulk_actions();

        debug!(
            records = record_count,
            restored = self.items.len(),
            "initialized list from snapshot"
        );
        Ok(())
    }

    fn restore(&mut self, record: SnapshotRecord) {
        if !record.lifecycle_state.is_persistent() {
            trace!(id = %record.id, state = %record.lifecycle_state, "skipping record");
            return;
        }
        if self.position(&record.id).is_some() {
            warn!(id = %record.id, "duplicate id in snapshot, keeping the first");
            return;
        }
        trace!(id = %record.id, state = %record.lifecycle_state, "restoring record");

        let item = ListItem::restore(record.id, record.text);
        let id = item.id().clone();
        self.insert(item);
        if record.lifecycle_state == LifecycleState::Completed {
            self.complete_item(&id);
        }
    }

    fn insert(&mut self, item: ListItem) {
        self.renderer.render_new(&item);
        self.items.push(item);
    }

    fn position(&self, id: &ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    fn get_mut(&mut self, id: &ItemId) -> Option<&mut ListItem> {
        self.items.iter_mut().find(|item| item.id() == id)
    }

    /// Add an item. Empty or whitespace-only text is ignored.
    pub fn add_item(&mut self, text: impl Into<String>) -> Option<&ListItem> {
        let item = match ListItem::create(text) {
            Ok(item) => item,
            Err(err) => {
                debug!(error = %err, "ignoring add");
                return None;
            }
        };

        debug!(id = %item.id(), "added list item");
        self.insert(item);
        self.recompute_bulk_actions();
        self.items.last()
    }

    /// Remove an item. Deleting an unknown id only recomputes the controls.
    pub fn delete_item(&mut self, id: &ItemId) -> Option<ListItem> {
        let removed = self.position(id).map(|index| self.items.remove(index));
        if removed.is_some() {
            self.editing.remove(id);
            self.renderer.remove_row(id);
        }
        self.recompute_bulk_actions();

        debug!(id = %id, removed = removed.is_some(), "removing list item");
        removed
    }

    pub fn update_text(&mut self, id: &ItemId, text: impl Into<String>) -> bool {
        match self.get_mut(id) {
            Some(item) => {
                item.set_text(text);
                debug!(id = %id, "updated list item text");
                true
            }
            None => false,
        }
    }

    /// Complete a single item.
    ///
    /// The bulk-action controls are left as they are on this path; only the
    /// batch operations recompute them.
    pub fn complete_item(&mut self, id: &ItemId) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        self.renderer.apply_completed_style(id);
        self.items[index].mark_completed();
        debug!(id = %id, "completed list item");
        true
    }

    pub fn set_checked(&mut self, id: &ItemId, checked: bool) -> bool {
        let Some(item) = self.get_mut(id) else {
            return false;
        };
        item.set_selected(checked);
        self.renderer.set_selected_style(id, checked);
        self.recompute_bulk_actions();
        true
    }

    pub fn select_all(&mut self) {
        self.set_all_selected(true);
    }

    pub fn deselect_all(&mut self) {
        self.set_all_selected(false);
    }

    fn set_all_selected(&mut self, selected: bool) {
        for item in self.items.iter_mut().filter(|item| !item.is_deleted()) {
            item.set_selected(selected);
            self.renderer.set_selected_style(item.id(), selected);
        }
        self.recompute_bulk_actions();
        debug!(selected, count = self.items.len(), "toggled all list items");
    }

    /// Complete every selected item, then clear the selection.
    pub fn complete_selected(&mut self) -> usize {
        let ids = self.selected_ids();
        for id in &ids {
            self.complete_item(id);
        }
        self.deselect_all();
        ids.len()
    }

    /// Delete every selected item. The removed items come back marked deleted.
    pub fn delete_selected(&mut self) -> Vec<ListItem> {
        self.selected_ids()
            .iter()
            .filter_map(|id| self.delete_item(id))
            .map(|mut item| {
                item.mark_deleted();
                item
            })
            .collect()
    }

    fn selected_ids(&self) -> Vec<ItemId> {
        self.selected_items()
            .into_iter()
            .map(|item| item.id().clone())
            .collect()
    }

    /// Selected, non-deleted items in storage order.
    pub fn selected_items(&self) -> Vec<&ListItem> {
        self.items
            .iter()
            .filter(|item| item.is_selected() && !item.is_deleted())
            .collect()
    }

    pub fn compute_bulk_action_status(&self) -> BulkActionStatus {
        BulkActionStatus::compute(self.items.len(), self.selected_items().len())
    }

    /// Recompute the controls and push every flag to the renderer.
    pub fn recompute_bulk_actions(&mut self) -> BulkActionStatus {
        let status = self.compute_bulk_action_status();
        for action in BulkAction::ALL {
            self.renderer
                .set_button_enabled(action, status.is_enabled(action));
        }
        self.bulk_status = status;
        trace!(?status, "recomputed bulk actions");
        status
    }

    /// Put an item into edit mode. Returns false if the id is unknown or the
    /// item is already being edited.
    pub fn begin_edit(&mut self, id: &ItemId) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        if !self.editing.insert(id.clone()) {
            return false;
        }
        self.renderer.begin_edit(id, self.items[index].text());
        debug!(id = %id, "editing list item");
        true
    }

    /// Leave edit mode, committing `text` to the item.
    pub fn end_edit(&mut self, id: &ItemId, text: &str) -> bool {
        if !self.editing.remove(id) {
            return false;
        }
        self.renderer.end_edit(id, text);
        self.update_text(id, text)
    }

    pub fn is_editing(&self, id: &ItemId) -> bool {
        self.editing.contains(id)
    }

    pub fn records(&self) -> Vec<SnapshotRecord> {
        self.items.iter().map(ListItem::serialize).collect()
    }

    pub fn serialize_all(&self) -> Result<String, SnapshotError> {
        snapshot::encode(&self.records())
    }

    /// Log every item at debug level.
    pub fn dump_entries(&self) {
        for record in self.records() {
            debug!(?record, "list entry");
        }
    }

    pub fn items(&self) -> &[ListItem] {
        &self.items
    }

    pub fn get(&self, id: &ItemId) -> Option<&ListItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Controls as of the last recompute.
    pub fn bulk_status(&self) -> BulkActionStatus {
        self.bulk_status
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }
}
