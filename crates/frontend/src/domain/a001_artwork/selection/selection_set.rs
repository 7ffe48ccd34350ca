use contracts::domain::a001_artwork::{Artwork, ArtworkId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Identifiers the user has checked, valid across pages.
///
/// Serialises as a JSON array of integers in ascending order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionSet(BTreeSet<ArtworkId>);

/// Checkbox state of a set of visible rows against a selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverageState {
    Unchecked,
    Checked,
    Indeterminate,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items<'a>(items: impl IntoIterator<Item = &'a Artwork>) -> Self {
        items.into_iter().map(|a| a.id).collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, id: ArtworkId) -> bool {
        self.0.contains(&id)
    }

    pub fn insert(&mut self, id: ArtworkId) -> bool {
        self.0.insert(id)
    }

    /// Insert when `checked`, remove otherwise
    pub fn set(&mut self, id: ArtworkId, checked: bool) {
        if checked {
            self.0.insert(id);
        } else {
            self.0.remove(&id);
        }
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = ArtworkId> + '_ {
        self.0.iter().copied()
    }

    pub fn extend(&mut self, ids: impl IntoIterator<Item = ArtworkId>) {
        self.0.extend(ids);
    }

    /// Members of `self` that appear in `ids`
    pub fn intersect_ids(&self, ids: impl IntoIterator<Item = ArtworkId>) -> SelectionSet {
        ids.into_iter().filter(|id| self.0.contains(id)).collect()
    }

    /// Exact membership of every id, never a count comparison.
    pub fn coverage(&self, ids: impl IntoIterator<Item = ArtworkId>) -> CoverageState {
        let mut seen = 0usize;
        let mut selected = 0usize;
        for id in ids {
            seen += 1;
            if self.0.contains(&id) {
                selected += 1;
            }
        }
        if seen == 0 || selected == 0 {
            CoverageState::Unchecked
        } else if selected == seen {
            CoverageState::Checked
        } else {
            CoverageState::Indeterminate
        }
    }

    pub fn to_vec(&self) -> Vec<ArtworkId> {
        self.0.iter().copied().collect()
    }
}

impl FromIterator<ArtworkId> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = ArtworkId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
