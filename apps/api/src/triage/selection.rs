#![allow(dead_code)]

//! Batch-selection state — a small state machine over applicant identifiers.
//!
//! The set is deliberately NOT reconciled against the visible applicant
//! collection: ids that scroll out of view after a filter edit stay
//! selected until explicitly cleared or toggled, so a transient search does
//! not wipe an in-progress batch selection. Consumers that need the visible
//! subset intersect with the current view themselves.

use std::collections::HashSet;

/// The working set of applicant identifiers chosen for a batch action.
#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    ids: HashSet<String>,
}

impl SelectionSet {
    /// Adds `id` if absent, removes it if present. Two toggles cancel.
    pub fn toggle(&mut self, id: impl Into<String>) {
        let id = id.into();
        if !self.ids.remove(&id) {
            self.ids.insert(id);
        }
    }

    /// Empties the set unconditionally.
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Replaces the set with exactly `ids` — not a union.
    pub fn select_all<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ids = ids.into_iter().map(Into::into).collect();
    }

    /// True iff every element of `ids` is currently selected. Selected ids
    /// outside the reference list are ignored; an empty reference list is
    /// vacuously all-selected.
    pub fn is_all_selected<'a, I>(&self, ids: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        ids.into_iter().all(|id| self.ids.contains(id))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Sorted snapshot of the selected ids, for deterministic dispatch and
    /// display.
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.ids.iter().cloned().collect();
        ids.sort();
        ids
    }
}
