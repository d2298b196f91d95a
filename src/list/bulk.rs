use std::fmt;

/// The four bulk-action controls kept in sync with the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BulkAction {
    SelectAll,
    DeselectAll,
    MarkComplete,
    DeleteSelected,
}

impl BulkAction {
    pub const ALL: [BulkAction; 4] = [
        BulkAction::SelectAll,
        BulkAction::DeselectAll,
        BulkAction::MarkComplete,
        BulkAction::DeleteSelected,
    ];

    /// Control name as addressed by a renderer.
    pub fn name(self) -> &'static str {
        match self {
            BulkAction::SelectAll => "bulk-select-all",
            BulkAction::DeselectAll => "bulk-deselect-all",
            BulkAction::MarkComplete => "bulk-mark-complete",
            BulkAction::DeleteSelected => "bulk-delete-selected",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BulkAction::SelectAll => "select all",
            BulkAction::DeselectAll => "deselect all",
            BulkAction::MarkComplete => "mark complete",
            BulkAction::DeleteSelected => "delete selected",
        }
    }
}

impl fmt::Display for BulkAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Enabled flag for each bulk action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BulkActionStatus {
    pub select_all: bool,
    pub deselect_all: bool,
    pub mark_complete: bool,
    pub delete_selected: bool,
}

impl BulkActionStatus {
    /// Derive the control state from the live item count and the selected count.
    ///
    /// Nothing selected only enables "select all"; everything selected enables
    /// all but "select all"; a partial selection enables all four. An empty
    /// list disables everything.
    pub fn compute(total: usize, selected: usize) -> Self {
        if total == 0 {
            return Self::default();
        }
        if selected == 0 {
            return Self {
                select_all: true,
                ..Self::default()
            };
        }
        let all_selected = selected >= total;
        Self {
            select_all: !all_selected,
            deselect_all: true,
            mark_complete: true,
            delete_selected: true,
        }
    }

    pub fn is_enabled(&self, action: BulkAction) -> bool {
        match action {
            BulkAction::SelectAll => self.select_all,
            BulkAction::DeselectAll => self.deselect_all,
            BulkAction::MarkComplete => self.mark_complete,
            BulkAction::DeleteSelected => self.delete_selected,
        }
    }

    pub fn set(&mut self, action: BulkAction, enabled: bool) {
        match action {
            BulkAction::SelectAll => self.select_all = enabled,
            BulkAction::DeselectAll => self.deselect_all = enabled,
            BulkAction::MarkComplete => self.mark_complete = enabled,
            BulkAction::DeleteSelected => self.delete_selected = enabled,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (BulkAction, bool)> + '_ {
        BulkAction::ALL
            .into_iter()
            .map(move |action| (action, self.is_enabled(action)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(status: BulkActionStatus) -> [bool; 4] {
        [
            status.select_all,
            status.deselect_all,
            status.mark_complete,
            status.delete_selected,
        ]
    }

    #[test]
    fn test_empty_list_disables_everything() {
        for selected in [0, 1, 5] {
            assert_eq!(flags(BulkActionStatus::compute(0, selected)), [false; 4]);
        }
    }

    #[test]
    fn test_nothing_selected() {
        assert_eq!(
            flags(BulkActionStatus::compute(3, 0)),
            [true, false, false, false]
        );
    }

    #[test]
    fn test_all_selected() {
        assert_eq!(
            flags(BulkActionStatus::compute(3, 3)),
            [false, true, true, true]
        );
        assert_eq!(
            flags(BulkActionStatus::compute(1, 1)),
            [false, true, true, true]
        );
    }

    #[test]
    fn test_partial_selection() {
        assert_eq!(flags(BulkActionStatus::compute(3, 1)), [true; 4]);
        assert_eq!(flags(BulkActionStatus::compute(3, 2)), [true; 4]);
    }

    #[test]
    fn test_compute_is_pure() {
        assert_eq!(
            BulkActionStatus::compute(4, 2),
            BulkActionStatus::compute(4, 2)
        );
    }

    #[test]
    fn test_set_and_iter() {
        let mut status = BulkActionStatus::default();
        status.set(BulkAction::MarkComplete, true);
        let enabled: Vec<BulkAction> = status
            .iter()
            .filter(|(_, on)| *on)
            .map(|(action, _)| action)
            .collect();
        assert_eq!(enabled, vec![BulkAction::MarkComplete]);
    }

    #[test]
    fn test_names() {
        assert_eq!(BulkAction::SelectAll.to_string(), "bulk-select-all");
        assert_eq!(BulkAction::DeleteSelected.name(), "bulk-delete-selected");
        assert_eq!(BulkAction::MarkComplete.label(), "mark complete");
    }
}
