//! Renderer collaborators.
//!
//! The engine drives a [`Renderer`] one way: it never reads anything back.

pub mod view;

pub use view::ListView;

use crate::list::{BulkAction, ItemId, ListItem};

pub trait Renderer {
    /// Show a row for a newly added item. Rows are prepended.
    fn render_new(&mut self, item: &ListItem);

    fn remove_row(&mut self, id: &ItemId);

    fn apply_completed_style(&mut self, id: &ItemId);

    fn set_selected_style(&mut self, id: &ItemId, selected: bool);

    fn begin_edit(&mut self, id: &ItemId, current_text: &str);

    fn end_edit(&mut self, id: &ItemId, new_text: &str);

    fn set_button_enabled(&mut self, action: BulkAction, enabled: bool);
}

/// One instruction sent to a renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderCommand {
    RenderNew { id: ItemId, text: String },
    RemoveRow { id: ItemId },
    ApplyCompletedStyle { id: ItemId },
    SetSelectedStyle { id: ItemId, selected: bool },
    BeginEdit { id: ItemId, current_text: String },
    EndEdit { id: ItemId, new_text: String },
    SetButtonEnabled { action: BulkAction, enabled: bool },
}

/// Keeps every instruction it receives, in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    commands: Vec<RenderCommand>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Drain the log, returning what was recorded since the last call.
    pub fn take(&mut self) -> Vec<RenderCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl Renderer for RecordingRenderer {
    fn render_new(&mut self, item: &ListItem) {
        self.commands.push(RenderCommand::RenderNew {
            id: item.id().clone(),
            text: item.text().to_string(),
        });
    }

    fn remove_row(&mut self, id: &ItemId) {
        self.commands
            .push(RenderCommand::RemoveRow { id: id.clone() });
    }

    fn apply_completed_style(&mut self, id: &ItemId) {
        self.commands
            .push(RenderCommand::ApplyCompletedStyle { id: id.clone() });
    }

    fn set_selected_style(&mut self, id: &ItemId, selected: bool) {
        self.commands.push(RenderCommand::SetSelectedStyle {
            id: id.clone(),
            selected,
        });
    }

    fn begin_edit(&mut self, id: &ItemId, current_text: &str) {
        self.commands.push(RenderCommand::BeginEdit {
            id: id.clone(),
            current_text: current_text.to_string(),
        });
    }

    fn end_edit(&mut self, id: &ItemId, new_text: &str) {
        self.commands.push(RenderCommand::EndEdit {
            id: id.clone(),
            new_text: new_text.to_string(),
        });
    }

    fn set_button_enabled(&mut self, action: BulkAction, enabled: bool) {
        self.commands
            .push(RenderCommand::SetButtonEnabled { action, enabled });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_renderer_take_drains() {
        let mut renderer = RecordingRenderer::new();
        let item = ListItem::create("a").unwrap();
        renderer.render_new(&item);
        renderer.remove_row(item.id());

        let taken = renderer.take();
        assert_eq!(taken.len(), 2);
        assert_eq!(
            taken[1],
            RenderCommand::RemoveRow {
                id: item.id().clone()
            }
        );
        assert!(renderer.commands().is_empty());
    }
}
