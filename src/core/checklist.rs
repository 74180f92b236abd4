//! Ordered checklist editing with stable row identity.
//!
//! Rows are addressed by a [`RowKey`] handed out when the row is created, never
//! by position, so removing a row cannot shift edits onto its neighbours. Keys
//! are never reused within one editor.

use crate::{core::booking::FieldError, core::booking::check_item_description, entities::ChecklistItem};

/// Stable identity of a checklist row within one editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowKey(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
struct Row {
    key: RowKey,
    item: ChecklistItem,
    touched: bool,
}

/// Editable, ordered list of checklist rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistEditor {
    /// Field name used in error paths, e.g. `technical_needs`
    field: &'static str,
    rows: Vec<Row>,
    next_key: u64,
}

impl ChecklistEditor {
    /// Creates an empty editor.
    #[must_use]
    pub const fn new(field: &'static str) -> Self {
        Self {
            field,
            rows: Vec::new(),
            next_key: 0,
        }
    }

    /// Creates an editor pre-filled with saved items. Pre-filled rows count as untouched.
    #[must_use]
    pub fn with_items(field: &'static str, items: Vec<ChecklistItem>) -> Self {
        let mut editor = Self::new(field);
        for item in items {
            let key = editor.allocate_key();
            editor.rows.push(Row {
                key,
                item,
                touched: false,
            });
        }
        editor
    }

    fn allocate_key(&mut self) -> RowKey {
        let key = RowKey(self.next_key);
        self.next_key += 1;
        key
    }

    fn row_mut(&mut self, key: RowKey) -> Option<&mut Row> {
        self.rows.iter_mut().find(|row| row.key == key)
    }

    /// Appends a blank, not-completed row and returns its key.
    pub fn append(&mut self) -> RowKey {
        let key = self.allocate_key();
        self.rows.push(Row {
            key,
            item: ChecklistItem::open(String::new()),
            touched: false,
        });
        key
    }

    /// Appends a row with the given description.
    pub fn append_with(&mut self, description: impl Into<String>) -> RowKey {
        let key = self.append();
        self.set_description(key, description);
        key
    }

    /// Removes a row. Returns `false` if the key is unknown.
    pub fn remove(&mut self, key: RowKey) -> bool {
        let before = self.rows.len();
        self.rows.retain(|row| row.key != key);
        self.rows.len() != before
    }

    /// Sets a row's description and marks it touched.
    pub fn set_description(&mut self, key: RowKey, description: impl Into<String>) -> bool {
        self.row_mut(key).is_some_and(|row| {
            row.item.description = description.into();
            row.touched = true;
            true
        })
    }

    /// Flips a row's completed flag and marks it touched.
    pub fn toggle(&mut self, key: RowKey) -> bool {
        self.row_mut(key).is_some_and(|row| {
            row.item.completed = !row.item.completed;
            row.touched = true;
            true
        })
    }

    /// Key of the row currently shown at `position` (zero-based).
    #[must_use]
    pub fn key_at(&self, position: usize) -> Option<RowKey> {
        self.rows.get(position).map(|row| row.key)
    }

    /// Keys in display order.
    #[must_use]
    pub fn keys(&self) -> Vec<RowKey> {
        self.rows.iter().map(|row| row.key).collect()
    }

    /// Item for a key.
    #[must_use]
    pub fn get(&self, key: RowKey) -> Option<&ChecklistItem> {
        self.rows
            .iter()
            .find(|row| row.key == key)
            .map(|row| &row.item)
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Errors for rows the operator has edited. Untouched rows stay quiet.
    #[must_use]
    pub fn touched_errors(&self) -> Vec<(RowKey, FieldError)> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.touched)
            .filter_map(|(index, row)| {
                check_item_description(&row.item.description)
                    .map(|message| (row.key, FieldError::new(format!("{}.{index}", self.field), message)))
            })
            .collect()
    }

    /// Current items in display order.
    #[must_use]
    pub fn items(&self) -> Vec<ChecklistItem> {
        self.rows.iter().map(|row| row.item.clone()).collect()
    }
}

/// Set of selected crew ids in selection order, without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrewSelection {
    ids: Vec<String>,
}

impl CrewSelection {
    /// Builds a selection, dropping repeated ids.
    #[must_use]
    pub fn from_ids(ids: impl IntoIterator<Item = String>) -> Self {
        let mut selection = Self::default();
        for id in ids {
            selection.select(id);
        }
        selection
    }

    /// Adds an id if it is not already selected.
    pub fn select(&mut self, id: String) {
        if !self.contains(&id) {
            self.ids.push(id);
        }
    }

    /// Removes an id if selected.
    pub fn deselect(&mut self, id: &str) {
        self.ids.retain(|selected| selected != id);
    }

    /// Checkbox behaviour: selects when absent, deselects when present.
    /// Returns whether the id is selected afterwards.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.contains(id) {
            self.deselect(id);
            false
        } else {
            self.ids.push(id.to_string());
            true
        }
    }

    /// Whether `id` is selected.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|selected| selected == id)
    }

    /// Selected ids in selection order.
    #[must_use]
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Consumes the selection.
    #[must_use]
    pub fn into_ids(self) -> Vec<String> {
        self.ids
    }
}
