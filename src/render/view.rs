use super::Renderer;
use crate::list::{BulkAction, BulkActionStatus, ItemId, ListItem};
use std::fmt::Write;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub id: ItemId,
    pub text: String,
    pub completed: bool,
    pub selected: bool,
    /// Text in the edit box while the row is being edited.
    pub editing: Option<String>,
}

/// Plain-text view of the list in display order (newest first).
#[derive(Debug, Clone, Default)]
pub struct ListView {
    rows: Vec<Row>,
    buttons: BulkActionStatus,
}

impl ListView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn buttons(&self) -> BulkActionStatus {
        self.buttons
    }

    fn row_mut(&mut self, id: &ItemId) -> Option<&mut Row> {
        self.rows.iter_mut().find(|row| &row.id == id)
    }

    pub fn render(&self, show_buttons: bool) -> String {
        let mut out = String::new();

        if self.rows.is_empty() {
            out.push_str("  (no items)\n");
        }

        for row in &self.rows {
            let check = if row.selected { "[x]" } else { "[ ]" };
            let text = match &row.editing {
                Some(buffer) => format!("{}_", buffer),
                None if row.completed => format!("~{}~", row.text.trim()),
                None => row.text.trim().to_string(),
            };
            let _ = writeln!(out, "{} {}  #{}", check, text, row.id.short());
        }

        if show_buttons {
            let bar: Vec<String> = self
                .buttons
                .iter()
                .map(|(action, enabled)| {
                    if enabled {
                        format!("[{}]", action.label())
                    } else {
                        format!("({})", action.label())
                    }
                })
                .collect();
            let _ = writeln!(out, "{}", bar.join(" "));
        }

        out
    }
}

impl Renderer for ListView {
    fn render_new(&mut self, item: &ListItem) {
        self.rows.insert(
            0,
            Row {
                id: item.id().clone(),
                text: item.text().to_string(),
                completed: item.is_completed(),
                selected: item.is_selected(),
                editing: None,
            },
        );
    }

    fn remove_row(&mut self, id: &ItemId) {
        self.rows.retain(|row| &row.id != id);
    }

    fn apply_completed_style(&mut self, id: &ItemId) {
        if let Some(row) = self.row_mut(id) {
            row.completed = true;
        }
    }

    fn set_selected_style(&mut self, id: &ItemId, selected: bool) {
        if let Some(row) = self.row_mut(id) {
            row.selected = selected;
        }
    }

    fn begin_edit(&mut self, id: &ItemId, current_text: &str) {
        if let Some(row) = self.row_mut(id) {
            row.editing = Some(current_text.trim().to_string());
        }
    }

    fn end_edit(&mut self, id: &ItemId, new_text: &str) {
        if let Some(row) = self.row_mut(id) {
            row.editing = None;
            row.text = new_text.to_string();
        }
    }

    fn set_button_enabled(&mut self, action: BulkAction, enabled: bool) {
        self.buttons.set(action, enabled);
    }
}
