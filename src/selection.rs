//! Selection and bulk-edit state over a working copy of the result list.

use std::sync::Arc;

/// A list entry with a unique integer identity.
pub trait Record: Clone {
    fn id(&self) -> u64;
    /// Copy of `self` carrying a different id.
    fn with_id(&self, id: u64) -> Self;
}

/// Working list, selected ids, and the edit-mode switch.
///
/// The working list is reseeded from the upstream source whenever the
/// source list changes identity; local duplicates and deletions are then
/// discarded and the selection is cleared.
#[derive(Clone, Debug)]
pub struct SelectionStore<T: Record> {
    source: Option<Arc<Vec<T>>>,
    working_list: Vec<T>,
    selected_ids: Vec<u64>,
    edit_mode: bool,
}

impl<T: Record> SelectionStore<T> {
    pub fn new(edit_mode: bool) -> Self {
        Self {
            source: None,
            working_list: Vec::new(),
            selected_ids: Vec::new(),
            edit_mode,
        }
    }

    /// Reseed from `source` if it is a different list than the last one seen.
    /// Returns whether a reseed happened.
    pub fn sync_source(&mut self, source: &Arc<Vec<T>>) -> bool {
        if let Some(current) = &self.source {
            if Arc::ptr_eq(current, source) {
                return false;
            }
        }
        self.source = Some(Arc::clone(source));
        self.reseed(source.as_ref().clone());
        true
    }

    pub fn reseed(&mut self, list: Vec<T>) {
        self.working_list = list;
        self.selected_ids.clear();
    }

    pub fn working_list(&self) -> &[T] {
        &self.working_list
    }

    pub fn selected_ids(&self) -> &[u64] {
        &self.selected_ids
    }

    pub fn selected_count(&self) -> usize {
        self.selected_ids.len()
    }

    pub fn is_selected(&self, id: u64) -> bool {
        self.selected_ids.contains(&id)
    }

    pub fn edit_mode(&self) -> bool {
        self.edit_mode
    }

    pub fn toggle_select(&mut self, record: &T) {
        let id = record.id();
        if let Some(pos) = self.selected_ids.iter().position(|s| *s == id) {
            self.selected_ids.remove(pos);
        } else {
            self.selected_ids.push(id);
        }
    }

    pub fn is_all_selected(&self) -> bool {
        !self.working_list.is_empty()
            && self.working_list.iter().all(|r| self.is_selected(r.id()))
    }

    pub fn toggle_select_all(&mut self) {
        if self.is_all_selected() {
            self.selected_ids.clear();
        } else {
            self.selected_ids = self.working_list.iter().map(Record::id).collect();
        }
    }

    pub fn delete_selected(&mut self) {
        if self.selected_ids.is_empty() {
            return;
        }
        let selected = &self.selected_ids;
        self.working_list.retain(|r| !selected.contains(&r.id()));
        self.selected_ids.clear();
    }

    /// Append a copy of every selected record, in list order, with fresh ids
    /// counting up from the current maximum. The selection is left as is.
    pub fn duplicate_selected(&mut self) {
        if self.selected_ids.is_empty() || self.working_list.is_empty() {
            return;
        }
        let max_id = self.working_list.iter().map(Record::id).max().unwrap_or(0);
        let copies: Vec<T> = self
            .working_list
            .iter()
            .filter(|r| self.is_selected(r.id()))
            .zip(1..)
            .map(|(r, offset)| r.with_id(max_id + offset))
            .collect();
        self.working_list.extend(copies);
    }

    pub fn toggle_edit_mode(&mut self) {
        self.edit_mode = !self.edit_mode;
    }
}

impl<T: Record> Default for SelectionStore<T> {
    fn default() -> Self {
        Self::new(true)
    }
}
