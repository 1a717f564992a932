//! File-backed session loads and saves.

use rand::SeedableRng;
use rand::rngs::StdRng;
use tissue_codec::{
    BinaryWriterOptions, HierarchicalWriterOptions, MemoryGroupStore, ReadableWriterOptions,
};
use tissue_core::{ImportSource, NoVolume, TissueSession};
use tissue_model::{Catalog, Color, TissueRecord};

fn small_session() -> TissueSession {
    let mut catalog = Catalog::new();
    for name in ["Bone", "Fat", "Skin"] {
        catalog.add(TissueRecord::new(name, Color::RED)).unwrap();
    }
    TissueSession::with_catalog(catalog)
}

#[test]
fn test_binary_and_lock_files() {
    let dir = tempfile::tempdir().unwrap();
    let tissues = dir.path().join("tissues.bin");
    let locks = dir.path().join("tissues.lock");

    let mut session = small_session();
    session.catalog_mut().set_locked(2, true).unwrap();
    session
        .save_binary(&tissues, BinaryWriterOptions::default())
        .unwrap();
    session.save_locks(&locks).unwrap();

    let mut reloaded = TissueSession::new();
    reloaded.load_binary(&tissues, 5).unwrap();
    assert_eq!(reloaded.catalog(), session.catalog());

    reloaded.catalog_mut().set_all_locked(false);
    reloaded.load_locks(&locks).unwrap();
    assert!(reloaded.catalog().is_locked(2));
    assert!(!reloaded.catalog().is_locked(1));
}

#[test]
fn test_failed_load_keeps_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.bin");
    std::fs::write(&path, [3u8, 0]).unwrap();

    let mut session = small_session();
    let before = session.catalog().clone();
    let err = session.load_binary(&path, 5).unwrap_err();
    assert!(err.is_format_violation());
    assert_eq!(session.catalog(), &before);
}

#[test]
fn test_or_defaults_falls_back_to_clinical_palette() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = small_session();

    assert!(!session.load_binary_or_defaults(&dir.path().join("absent.bin"), 5));
    assert_eq!(session.catalog(), &Catalog::clinical_defaults());

    let mut session = small_session();
    assert!(!session.load_hierarchical_or_defaults(&MemoryGroupStore::new()));
    assert_eq!(session.catalog().count(), 82);
}

#[test]
fn test_readable_or_defaults_falls_back_on_every_failure() {
    let dir = tempfile::tempdir().unwrap();
    let malformed = dir.path().join("malformed.txt");
    std::fs::write(&malformed, "V5\nN1\nC0 zero 1 0.5 Skin\n").unwrap();
    let unrecognized = dir.path().join("unrecognized.txt");
    std::fs::write(&unrecognized, "1\tBone\t255\t255\t255\t255\n").unwrap();

    for path in [dir.path().join("absent.txt"), malformed, unrecognized] {
        let mut session = small_session();
        let mut voxels = vec![1u16, 2, 3];
        assert!(session.load_readable_or_defaults(&path, &mut voxels).is_none());
        assert_eq!(session.catalog(), &Catalog::clinical_defaults());
        assert_eq!(voxels, vec![1, 2, 3]);
    }
}

#[test]
fn test_readable_or_defaults_returns_report() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("list.txt");
    std::fs::write(&path, "V5\nN1\nC0 1 0 0.5 Bone\n").unwrap();

    let mut session = small_session();
    let report = session
        .load_readable_or_defaults(&path, &mut NoVolume)
        .unwrap();
    assert_eq!(report.source, ImportSource::Readable);
    assert_eq!(report.removed_range, 2);
    assert_eq!(session.catalog().count(), 3);
}

#[test]
fn test_readable_import_reconciles() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("edited.txt");
    std::fs::write(
        &path,
        "V5\nN3\nC0 0 1 0.5 Skin\nC0 1 0 0.5 Bone\nC1 1 0 0.5 Muscle\n",
    )
    .unwrap();

    let mut session = small_session();
    let mut voxels = vec![1u16, 2, 3];
    let report = session.load_readable(&path, &mut voxels).unwrap();

    assert_eq!(report.source, ImportSource::Readable);
    assert_eq!(report.removed_range, 1);
    let names: Vec<&str> = session.catalog().iter().map(|(_, r)| r.name.as_str()).collect();
    assert_eq!(names, vec!["Fat", "Skin", "Bone", "Muscle"]);
    assert_eq!(voxels, vec![3, 1, 2]);
}

#[test]
fn test_foreign_table_import() {
    let mut session = small_session();
    let text = "0\tUnknown\t0\t0\t0\t0\n1\tBone\t255\t255\t255\t255\n3\tCSF\t0\t0\t255\t255\n";
    let mut rng = StdRng::seed_from_u64(3);

    let report = session.import_text(text, &mut NoVolume, &mut rng).unwrap();
    assert_eq!(report.source, ImportSource::ForeignTable);
    assert_eq!(report.removed_range, 2);
    assert_eq!(session.catalog().name(3), "Bone");
    assert_eq!(session.catalog().name(4), "DummyTissue1");
    assert_eq!(session.catalog().color(3), Color::new(1.0, 1.0, 1.0));
}

#[test]
fn test_unrecognized_text_leaves_catalog() {
    let mut session = small_session();
    let before = session.catalog().clone();
    let mut rng = StdRng::seed_from_u64(3);
    let err = session
        .import_text("hello world\n", &mut NoVolume, &mut rng)
        .unwrap_err();
    assert!(!err.is_format_violation());
    assert_eq!(session.catalog(), &before);
}

#[test]
fn test_readable_save_then_import_is_stable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("list.txt");
    let mut session = TissueSession::new();
    session
        .save_readable(&path, &ReadableWriterOptions::default())
        .unwrap();

    let before = session.catalog().clone();
    let report = session.load_readable(&path, &mut NoVolume).unwrap();
    assert_eq!(report.removed_range, 0);
    assert!(report.remap.is_identity());
    assert_eq!(session.catalog(), &before);
}

#[test]
fn test_default_list_missing_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = small_session();
    session
        .load_default_list(&dir.path().join("absent.txt"))
        .unwrap();
    assert_eq!(session.catalog(), &Catalog::clinical_defaults());

    let path = dir.path().join("defaults.txt");
    small_session().save_default_list(&path).unwrap();
    session.load_default_list(&path).unwrap();
    assert_eq!(session.catalog().count(), 3);
    assert_eq!(session.catalog().name(3), "Skin");
}

#[test]
fn test_hierarchical_store_roundtrip() {
    let session = small_session();
    let mut store = MemoryGroupStore::new();
    session
        .save_hierarchical(&mut store, None, &HierarchicalWriterOptions::default())
        .unwrap();

    let mut reloaded = TissueSession::new();
    reloaded.load_hierarchical(&store).unwrap();
    assert_eq!(reloaded.catalog(), session.catalog());
}
