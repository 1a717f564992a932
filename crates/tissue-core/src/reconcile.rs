//! Merging an imported candidate list into the live catalog.
//!
//! An import may reorder, rename, drop or add tissues. Tissues of the live
//! catalog that the candidate does not mention are never dropped: they are
//! carried over in front of the candidate records and reported through
//! [`Reconciliation::removed_range`], so the caller can decide whether to
//! purge them. Tissues that keep their name but change position are
//! reported through an [`IndexRemap`] that the label volume must apply
//! before the new catalog becomes visible.

use std::collections::BTreeSet;

use tracing::{debug, info, warn};

use tissue_model::{Catalog, TISSUES_SIZE_MAX, TissueId, TissueRecord};

use crate::error::Result;
use crate::volume::{IndexRemap, LabelVolume};

/// The merged catalog and what changed relative to the live one.
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
    /// Merged catalog: background, carried-over tissues, candidate records.
    pub catalog: Catalog,
    /// Number of carried-over tissues at ids `1..=removed_range`.
    pub removed_range: usize,
    /// Old id to new id for every tissue of the live catalog.
    pub remap: IndexRemap,
}

/// Outcome of a committed reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileSummary {
    pub removed_range: usize,
    pub remap: IndexRemap,
    /// Whether the label volume was notified.
    pub relabeled: bool,
}

/// Merge `candidate` (background excluded) into `live`.
///
/// Candidate records are matched to live tissues by case-insensitive name.
/// When the merged list would exceed the id limit, trailing candidate
/// records are dropped until it fits.
pub fn reconcile(live: &Catalog, mut candidate: Vec<TissueRecord>) -> Result<Reconciliation> {
    let limit = usize::from(TISSUES_SIZE_MAX) + 1;

    let mut missing = missing_ids(live, &candidate);
    while missing.len() + candidate.len() > limit {
        let keep = limit - missing.len();
        warn!(
            dropped = candidate.len() - keep,
            limit = TISSUES_SIZE_MAX,
            "imported tissues truncated"
        );
        candidate.truncate(keep);
        missing = missing_ids(live, &candidate);
    }

    let removed_range = missing.len() - 1;
    if removed_range > 0 {
        warn!(
            count = removed_range,
            "tissues absent from the import were carried over"
        );
    }

    let mut records = Vec::with_capacity(missing.len() + candidate.len());
    records.extend(
        missing
            .iter()
            .filter_map(|&id| live.get(id))
            .cloned(),
    );
    records.extend(candidate);

    let mut remap = IndexRemap::identity(live.max_id());
    for (new_id, record) in records.iter().enumerate().skip(1) {
        let old_id = live.lookup(&record.name);
        // records is capped at the id limit above
        let new_id = new_id as TissueId;
        if old_id > 0 && old_id != new_id {
            remap.set(old_id, new_id);
        }
    }

    let catalog = Catalog::from_records(records)?;
    debug!(
        count = catalog.count(),
        removed_range,
        moved = remap.changes().count(),
        "reconciled tissue list"
    );
    Ok(Reconciliation {
        catalog,
        removed_range,
        remap,
    })
}

/// Ids of `live` (background included) not matched by any candidate name.
fn missing_ids(live: &Catalog, candidate: &[TissueRecord]) -> BTreeSet<TissueId> {
    let mut missing: BTreeSet<TissueId> = (0..=live.max_id()).collect();
    for record in candidate {
        let id = live.lookup(&record.name);
        if id > 0 {
            missing.remove(&id);
        }
    }
    missing
}

impl Reconciliation {
    /// Notify `volume` of a non-identity remap, then replace `store`.
    pub fn commit<V: LabelVolume + ?Sized>(
        self,
        store: &mut Catalog,
        volume: &mut V,
    ) -> ReconcileSummary {
        let relabeled = !self.remap.is_identity();
        if relabeled {
            volume.remap_labels(&self.remap);
        }
        *store = self.catalog;
        info!(
            count = store.count(),
            removed_range = self.removed_range,
            relabeled,
            "imported tissue list"
        );
        ReconcileSummary {
            removed_range: self.removed_range,
            remap: self.remap,
            relabeled,
        }
    }
}

#[cfg(test)]
mod tests {
    use tissue_model::Color;

    use super::*;

    fn catalog(names: &[&str]) -> Catalog {
        let mut catalog = Catalog::new();
        for name in names {
            catalog.add(TissueRecord::new(*name, Color::RED)).unwrap();
        }
        catalog
    }

    fn records(names: &[&str]) -> Vec<TissueRecord> {
        names
            .iter()
            .map(|name| TissueRecord::new(*name, Color::RED))
            .collect()
    }

    fn names(catalog: &Catalog) -> Vec<&str> {
        catalog.iter().map(|(_, r)| r.name.as_str()).collect()
    }

    #[test]
    fn test_self_import_is_identity() {
        let live = catalog(&["A", "B", "C"]);
        let candidate: Vec<TissueRecord> = live.iter().map(|(_, r)| r.clone()).collect();
        let result = reconcile(&live, candidate).unwrap();
        assert_eq!(result.removed_range, 0);
        assert!(result.remap.is_identity());
        assert_eq!(result.catalog, live);
    }

    #[test]
    fn test_unmatched_tissues_are_prepended() {
        let mut live = catalog(&["A", "B", "C"]);
        live.set_locked(2, true).unwrap();
        let result = reconcile(&live, records(&["c", "D"])).unwrap();

        assert_eq!(names(&result.catalog), vec!["A", "B", "c", "D"]);
        assert_eq!(result.removed_range, 2);
        assert!(result.catalog.is_locked(2));
        assert_eq!(result.remap.as_slice(), &[0, 1, 2, 3]);
    }

    #[test]
    fn test_permutation_remap() {
        let live = catalog(&["A", "B", "C"]);
        let result = reconcile(&live, records(&["B", "A", "C"])).unwrap();
        assert_eq!(result.removed_range, 0);
        assert_eq!(result.remap.as_slice(), &[0, 2, 1, 3]);
    }

    #[test]
    fn test_carried_over_tissue_moves_forward() {
        let live = catalog(&["A", "B", "C"]);
        let result = reconcile(&live, records(&["A", "B"])).unwrap();
        assert_eq!(names(&result.catalog), vec!["C", "A", "B"]);
        assert_eq!(result.removed_range, 1);
        assert_eq!(result.remap.as_slice(), &[0, 2, 3, 1]);
    }

    #[test]
    fn test_empty_candidate_keeps_everything() {
        let live = catalog(&["A", "B"]);
        let result = reconcile(&live, Vec::new()).unwrap();
        assert_eq!(result.removed_range, 2);
        assert_eq!(result.catalog, live);
        assert!(result.remap.is_identity());
    }

    #[test]
    fn test_background_is_kept_from_live() {
        let mut live = catalog(&["A"]);
        live.background_mut().opacity = 0.2;
        let result = reconcile(&live, records(&["A"])).unwrap();
        assert_eq!(result.catalog.background().opacity, 0.2);
    }

    #[test]
    fn test_oversized_candidate_is_truncated() {
        let live = catalog(&["A"]);
        let candidate: Vec<TissueRecord> = (0..usize::from(TISSUES_SIZE_MAX) + 5)
            .map(|idx| TissueRecord::new(format!("N{idx}"), Color::RED))
            .collect();
        let result = reconcile(&live, candidate).unwrap();
        assert_eq!(result.catalog.count(), TISSUES_SIZE_MAX);
        assert_eq!(result.catalog.name(1), "A");
        assert_eq!(result.removed_range, 1);
    }

    #[test]
    fn test_commit_skips_identity_notification() {
        struct Counting(usize);
        impl LabelVolume for Counting {
            fn remap_labels(&mut self, _remap: &IndexRemap) {
                self.0 += 1;
            }
        }

        let mut store = catalog(&["A", "B"]);
        let mut volume = Counting(0);
        let result = reconcile(&store, records(&["A", "B", "C"])).unwrap();
        let summary = result.commit(&mut store, &mut volume);
        assert!(!summary.relabeled);
        assert_eq!(volume.0, 0);
        assert_eq!(store.count(), 3);

        let result = reconcile(&store, records(&["C", "B", "A"])).unwrap();
        let summary = result.commit(&mut store, &mut volume);
        assert!(summary.relabeled);
        assert_eq!(volume.0, 1);
        assert_eq!(store.lookup("c"), 1);
    }
}
