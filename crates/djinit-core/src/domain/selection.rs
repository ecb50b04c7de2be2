//! Interactive feature selection as a plain state machine.
//!
//! The terminal front-end turns key presses into [`SelectionEvent`]s and
//! feeds them to [`SelectionState::apply`]; everything here is testable
//! without a terminal.

use std::collections::BTreeSet;

use super::catalog::FeatureCatalog;
use super::entities::FeatureId;

/// A discrete input to the selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionEvent {
    Up,
    Down,
    Toggle,
    SelectAll,
    SelectNone,
    Commit,
    Cancel,
}

/// Result of applying one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// Keep reading events.
    Pending,
    /// The user confirmed; ids are in catalog order.
    Committed(Vec<FeatureId>),
    /// The user aborted; nothing was chosen.
    Cancelled,
}

/// Cursor position plus checked items over a fixed list of features.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    items: Vec<FeatureId>,
    cursor: usize,
    selected: BTreeSet<usize>,
}

impl SelectionState {
    /// One item per catalog feature, in declaration order, nothing checked.
    pub fn new(catalog: &FeatureCatalog) -> Self {
        Self::from_items(catalog.ids().cloned().collect())
    }

    pub fn from_items(items: Vec<FeatureId>) -> Self {
        Self {
            items,
            cursor: 0,
            selected: BTreeSet::new(),
        }
    }

    /// Pre-check items, e.g. from configured defaults. Unknown ids are ignored.
    pub fn with_selected<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for id in ids {
            if let Some(pos) = self.items.iter().position(|item| item.as_str() == id.as_ref()) {
                self.selected.insert(pos);
            }
        }
        self
    }

    pub fn items(&self) -> &[FeatureId] {
        &self.items
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.contains(&index)
    }

    /// Checked ids in list order.
    pub fn selected_ids(&self) -> Vec<FeatureId> {
        self.selected.iter().map(|&i| self.items[i].clone()).collect()
    }

    /// Apply one event. The cursor wraps at both ends.
    pub fn apply(&mut self, event: SelectionEvent) -> SelectionOutcome {
        let len = self.items.len();

        match event {
            SelectionEvent::Up if len > 0 => {
                self.cursor = (self.cursor + len - 1) % len;
            }
            SelectionEvent::Down if len > 0 => {
                self.cursor = (self.cursor + 1) % len;
            }
            SelectionEvent::Toggle if len > 0 => {
                if !self.selected.remove(&self.cursor) {
                    self.selected.insert(self.cursor);
                }
            }
            SelectionEvent::SelectAll => {
                self.selected = (0..len).collect();
            }
            SelectionEvent::SelectNone => {
                self.selected.clear();
            }
            SelectionEvent::Commit => {
                return SelectionOutcome::Committed(self.selected_ids());
            }
            SelectionEvent::Cancel => {
                self.selected.clear();
                return SelectionOutcome::Cancelled;
            }
            SelectionEvent::Up | SelectionEvent::Down | SelectionEvent::Toggle => {}
        }

        SelectionOutcome::Pending
    }
}
