//! Label volume collaborator and the id remap tables sent to it.

use std::collections::BTreeSet;

use tissue_model::TissueId;

/// Table mapping every old tissue id to its new id.
///
/// The table covers ids `0..=old_max`. Entry 0 is always 0. Ids that no
/// longer exist map to 0 (background).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexRemap {
    table: Vec<TissueId>,
}

impl IndexRemap {
    /// Identity table for ids `0..=max_id`.
    pub fn identity(max_id: TissueId) -> Self {
        Self {
            table: (0..=max_id).collect(),
        }
    }

    /// Table for removing `removed` from a catalog whose largest id is
    /// `max_id`: removed ids map to 0, survivors shift down.
    pub fn for_removal(max_id: TissueId, removed: &BTreeSet<TissueId>) -> Self {
        let mut table = Vec::with_capacity(usize::from(max_id) + 1);
        let mut next: TissueId = 0;
        for old in 0..=max_id {
            if old != 0 && removed.contains(&old) {
                table.push(0);
            } else {
                table.push(next);
                next = next.saturating_add(1);
            }
        }
        Self { table }
    }

    pub(crate) fn set(&mut self, old: TissueId, new: TissueId) {
        if let Some(slot) = self.table.get_mut(usize::from(old)) {
            *slot = new;
        }
    }

    /// New id for `old`; ids outside the table are returned unchanged.
    pub fn get(&self, old: TissueId) -> TissueId {
        self.table.get(usize::from(old)).copied().unwrap_or(old)
    }

    pub fn as_slice(&self) -> &[TissueId] {
        &self.table
    }

    pub fn is_identity(&self) -> bool {
        self.table
            .iter()
            .enumerate()
            .all(|(old, &new)| usize::from(new) == old)
    }

    /// Entries whose id changes, as `(old, new)` pairs.
    pub fn changes(&self) -> impl Iterator<Item = (TissueId, TissueId)> + '_ {
        self.table
            .iter()
            .enumerate()
            .filter(|&(old, &new)| usize::from(new) != old)
            .map(|(old, &new)| (old as TissueId, new))
    }
}

/// Owner of voxel labels that reference tissue ids.
///
/// Whenever tissue ids change meaning, the owner receives the full remap
/// table before the catalog is replaced.
pub trait LabelVolume {
    fn remap_labels(&mut self, remap: &IndexRemap);
}

/// Volume stand-in for sessions with no labeled data attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoVolume;

impl LabelVolume for NoVolume {
    fn remap_labels(&mut self, _remap: &IndexRemap) {}
}

/// A flat buffer of voxel labels.
impl LabelVolume for Vec<TissueId> {
    fn remap_labels(&mut self, remap: &IndexRemap) {
        for label in self.iter_mut() {
            *label = remap.get(*label);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity() {
        let remap = IndexRemap::identity(3);
        assert_eq!(remap.as_slice(), &[0, 1, 2, 3]);
        assert!(remap.is_identity());
        assert_eq!(remap.changes().count(), 0);
    }

    #[test]
    fn test_for_removal_shifts_survivors() {
        let removed = BTreeSet::from([2, 4]);
        let remap = IndexRemap::for_removal(5, &removed);
        assert_eq!(remap.as_slice(), &[0, 1, 0, 2, 0, 3]);
        assert!(!remap.is_identity());
    }

    #[test]
    fn test_voxel_buffer_remap() {
        let mut remap = IndexRemap::identity(3);
        remap.set(1, 2);
        remap.set(2, 1);
        let mut voxels: Vec<TissueId> = vec![0, 1, 2, 3, 1, 9];
        voxels.remap_labels(&remap);
        assert_eq!(voxels, vec![0, 2, 1, 3, 2, 9]);
        assert_eq!(remap.changes().collect::<Vec<_>>(), vec![(1, 2), (2, 1)]);
    }
}
