//! Set of currently selected tissue ids.

use std::collections::BTreeSet;

use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::record::TissueId;

/// Selected tissue ids, kept valid against a catalog on every access.
///
/// The selection outlives catalog changes: ids that fall out of range after
/// the catalog shrinks are hidden on read, not reported as errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: BTreeSet<TissueId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected ids that are valid in `catalog`.
    pub fn selected(&self, catalog: &Catalog) -> BTreeSet<TissueId> {
        self.ids
            .iter()
            .copied()
            .filter(|&id| catalog.is_valid(id))
            .collect()
    }

    /// Replace the selection when every id is valid in `catalog`.
    ///
    /// Returns `false` and keeps the previous selection otherwise.
    pub fn select(&mut self, catalog: &Catalog, ids: BTreeSet<TissueId>) -> bool {
        if let Some(&invalid) = ids.iter().find(|&&id| !catalog.is_valid(id)) {
            debug!(id = invalid, max_id = catalog.max_id(), "selection rejected");
            return false;
        }
        info!(count = ids.len(), "selected tissues");
        self.ids = ids;
        true
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, TissueRecord};

    fn catalog(count: usize) -> Catalog {
        let mut catalog = Catalog::new();
        for idx in 0..count {
            catalog
                .add(TissueRecord::new(format!("T{idx}"), Color::RED))
                .unwrap();
        }
        catalog
    }

    #[test]
    fn test_stale_ids_are_filtered_on_read() {
        let mut live = catalog(5);
        let mut selection = SelectionSet::new();
        assert!(selection.select(&live, BTreeSet::from([1, 2, 5])));

        live.remove_many(&BTreeSet::from([4, 5])).unwrap();
        assert_eq!(live.max_id(), 3);
        assert_eq!(selection.selected(&live), BTreeSet::from([1, 2]));
    }

    #[test]
    fn test_invalid_proposal_keeps_previous_selection() {
        let live = catalog(3);
        let mut selection = SelectionSet::new();
        assert!(selection.select(&live, BTreeSet::from([2])));
        assert!(!selection.select(&live, BTreeSet::from([1, 7])));
        assert_eq!(selection.selected(&live), BTreeSet::from([2]));
    }

    #[test]
    fn test_background_is_selectable() {
        let live = catalog(0);
        let mut selection = SelectionSet::new();
        assert!(selection.select(&live, BTreeSet::from([0])));
        assert_eq!(selection.selected(&live), BTreeSet::from([0]));
    }
}
