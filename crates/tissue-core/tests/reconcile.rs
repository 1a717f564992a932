//! Reconciliation properties against the public session API.

use std::collections::BTreeSet;

use proptest::prelude::*;
use tissue_core::{ImportSource, IndexRemap, LabelVolume, NoVolume, TissueSession, reconcile};
use tissue_model::{Catalog, Color, TissueId, TissueRecord};

/// Records every remap table it receives.
#[derive(Default)]
struct RecordingVolume {
    calls: Vec<Vec<TissueId>>,
}

impl LabelVolume for RecordingVolume {
    fn remap_labels(&mut self, remap: &IndexRemap) {
        self.calls.push(remap.as_slice().to_vec());
    }
}

fn catalog(names: &[&str]) -> Catalog {
    let mut catalog = Catalog::new();
    for (idx, name) in names.iter().enumerate() {
        let shade = idx as f32 / 10.0;
        catalog
            .add(TissueRecord::new(*name, Color::new(shade, 0.5, 1.0 - shade)))
            .unwrap();
    }
    catalog
}

fn records(names: &[&str]) -> Vec<TissueRecord> {
    names
        .iter()
        .map(|name| TissueRecord::new(*name, Color::RED))
        .collect()
}

#[test]
fn test_permutation_notifies_volume_once() {
    let mut session = TissueSession::with_catalog(catalog(&["A", "B", "C"]));
    let mut volume = RecordingVolume::default();

    let report = session
        .import_records(ImportSource::Readable, records(&["B", "A", "C"]), &mut volume)
        .unwrap();

    assert_eq!(report.removed_range, 0);
    assert_eq!(report.remap.as_slice(), &[0, 2, 1, 3]);
    assert_eq!(volume.calls, vec![vec![0, 2, 1, 3]]);
    assert_eq!(session.catalog().lookup("a"), 2);
    assert_eq!(session.catalog().lookup("b"), 1);
}

#[test]
fn test_relabeled_voxels_follow_their_tissue() {
    let mut session = TissueSession::with_catalog(catalog(&["A", "B", "C"]));
    let mut voxels: Vec<TissueId> = vec![0, 1, 2, 3, 3];

    session
        .import_records(ImportSource::Readable, records(&["C", "A"]), &mut voxels)
        .unwrap();

    // B is carried over to id 1, then C and A follow.
    let catalog = session.catalog();
    let names: Vec<&str> = voxels.iter().map(|&id| catalog.name(id)).collect();
    assert_eq!(names, vec!["", "A", "B", "C", "C"]);
}

#[test]
fn test_self_import_changes_nothing() {
    let live = Catalog::clinical_defaults();
    let candidate: Vec<TissueRecord> = live.iter().map(|(_, r)| r.clone()).collect();
    let result = reconcile(&live, candidate).unwrap();

    assert_eq!(result.removed_range, 0);
    assert!(result.remap.is_identity());
    assert_eq!(result.catalog, live);
}

#[test]
fn test_purge_carried_over() {
    let mut session = TissueSession::with_catalog(catalog(&["A", "B", "C"]));
    let mut voxels: Vec<TissueId> = vec![1, 2, 3];
    let report = session
        .import_records(ImportSource::Readable, records(&["C", "D"]), &mut voxels)
        .unwrap();
    assert_eq!(report.removed_range, 2);
    assert_eq!(voxels, vec![1, 2, 3]);

    let removed = session
        .purge_carried_over(report.removed_range, &mut voxels)
        .unwrap();
    assert_eq!(removed, 2);
    assert_eq!(session.catalog().name(1), "C");
    assert_eq!(session.catalog().name(2), "D");
    assert_eq!(voxels, vec![0, 0, 1]);
}

#[test]
fn test_selection_survives_shrinking_import() {
    let mut session = TissueSession::with_catalog(catalog(&["A", "B", "C", "D", "E"]));
    assert!(session.select(BTreeSet::from([1, 2, 5])));

    let ids = BTreeSet::from([4, 5]);
    session.remove_tissues(&ids, &mut NoVolume).unwrap();
    assert_eq!(session.selected(), BTreeSet::from([1, 2]));

    assert!(!session.select(BTreeSet::from([1, 7])));
    assert_eq!(session.selected(), BTreeSet::from([1, 2]));
}

fn name_set() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::btree_set("[a-z]{1,6}", 1..12)
        .prop_map(|names| names.into_iter().collect())
}

proptest! {
    #[test]
    fn prop_missing_tissues_are_preserved(
        live_names in name_set(),
        candidate_names in name_set(),
    ) {
        let mut live = Catalog::new();
        for (idx, name) in live_names.iter().enumerate() {
            let record = TissueRecord::new(name.clone(), Color::new(0.1, 0.2, 0.3))
                .with_opacity(0.9)
                .with_locked(idx % 2 == 0);
            live.add(record).unwrap();
        }
        let candidate: Vec<TissueRecord> = candidate_names
            .iter()
            .map(|name| TissueRecord::new(name.clone(), Color::RED))
            .collect();

        let result = reconcile(&live, candidate).unwrap();

        let absent: Vec<&TissueRecord> = live
            .iter()
            .map(|(_, record)| record)
            .filter(|record| !candidate_names.contains(&record.name))
            .collect();
        prop_assert_eq!(result.removed_range, absent.len());
        for (offset, record) in absent.iter().enumerate() {
            prop_assert_eq!(result.catalog.get((offset + 1) as TissueId), Some(*record));
        }
        prop_assert_eq!(
            usize::from(result.catalog.count()),
            absent.len() + candidate_names.len()
        );

        // every live tissue ends up where the remap says
        for (old_id, record) in live.iter() {
            let new_id = result.remap.get(old_id);
            prop_assert_eq!(result.catalog.name(new_id), record.name.as_str());
        }
    }
}
