//! Group-per-tissue container format.
//!
//! Layout inside a [`GroupStore`]:
//!
//! ```text
//! /Tissues/version          int[1]
//! /Tissues/bkg_rgbo         float[4]   background color + opacity
//! /Tissues/<name>/rgbo      float[4]
//! /Tissues/<name>/index     int[1]     1-based catalog position
//! /Tissues/<name>/path      attribute  hierarchy folders of the tissue
//! ```
//!
//! Group names are tissue names with `/` and `\` replaced by `_`. When two
//! tissues map to the same group name only the first is written. On load
//! the stored `index` decides the catalog position, not enumeration order.

use std::collections::HashMap;

use tracing::{debug, info, info_span, warn};

use tissue_model::{
    Catalog, Color, DEFAULT_OPACITY, HierarchyItem, TISSUES_SIZE_MAX, TissueRecord,
};

use crate::error::{CodecError, Result};
use crate::options::HierarchicalWriterOptions;
use crate::store::GroupStore;

pub const TISSUES_GROUP: &str = "/Tissues";
pub const VERSION_ENTRY: &str = "version";
pub const BACKGROUND_ENTRY: &str = "bkg_rgbo";

/// Group name used for a tissue.
pub fn group_name(tissue_name: &str) -> String {
    tissue_name.replace(['\\', '/'], "_")
}

/// Write `catalog` under `/Tissues`.
///
/// When `hierarchy` is given, each tissue that is a leaf of the tree gets
/// its folder path as the `path` attribute; all others get an empty string.
pub fn write_hierarchical<S: GroupStore + ?Sized>(
    store: &mut S,
    catalog: &Catalog,
    hierarchy: Option<&HierarchyItem>,
    options: &HierarchicalWriterOptions,
) -> Result<()> {
    let _span = info_span!("save_hierarchical", count = catalog.count()).entered();
    let paths = hierarchy.map(HierarchyItem::leaf_paths).unwrap_or_default();

    store.create_group(TISSUES_GROUP)?;
    store.write_ints(&format!("{TISSUES_GROUP}/{VERSION_ENTRY}"), &[options.version])?;
    store.write_floats(
        &format!("{TISSUES_GROUP}/{BACKGROUND_ENTRY}"),
        &rgbo(catalog.background()),
    )?;

    for (id, record) in catalog.iter() {
        let name = group_name(&record.name);
        let group = format!("{TISSUES_GROUP}/{name}");
        if store.contains(&group) {
            warn!(id, group = %group, "tissue group name already taken, skipping");
            continue;
        }
        store.create_group(&group)?;
        let path = paths.get(&name).map_or("", String::as_str);
        store.write_attribute(&format!("{group}/path"), path)?;
        store.write_floats(&format!("{group}/rgbo"), &rgbo(record))?;
        store.write_ints(&format!("{group}/index"), &[i32::from(id)])?;
    }

    info!(count = catalog.count(), "saved hierarchical tissue list");
    Ok(())
}

/// Read a catalog from `/Tissues`.
///
/// Every member other than `version` and `bkg_rgbo` is one tissue. The
/// catalog is sized to the largest stored index; unclaimed positions hold
/// unnamed default records and a repeated index keeps the group listed
/// last. A container without tissue groups yields a single red `Tissue1`.
pub fn read_hierarchical<S: GroupStore + ?Sized>(store: &S) -> Result<Catalog> {
    let _span = info_span!("load_hierarchical").entered();
    let members = store.list_group(TISSUES_GROUP)?;

    let mut background = TissueRecord::default();
    let mut placed: HashMap<usize, TissueRecord> = HashMap::new();
    let mut max_index = 0usize;

    for member in members {
        if member == VERSION_ENTRY {
            let version = store.read_ints(&format!("{TISSUES_GROUP}/{VERSION_ENTRY}"))?;
            debug!(?version, "hierarchical tissue list version");
            continue;
        }
        if member == BACKGROUND_ENTRY {
            let values = store.read_floats(&format!("{TISSUES_GROUP}/{BACKGROUND_ENTRY}"))?;
            apply_rgbo(&mut background, &values, BACKGROUND_ENTRY)?;
            continue;
        }

        let group = format!("{TISSUES_GROUP}/{member}");
        let index = read_index(store, &group)?;
        let mut record = TissueRecord::new(member.clone(), Color::default());
        apply_rgbo(&mut record, &store.read_floats(&format!("{group}/rgbo"))?, &group)?;

        if placed.insert(index, record).is_some() {
            warn!(index, group = %group, "repeated tissue index, keeping the later group");
        }
        max_index = max_index.max(index);
    }

    if placed.is_empty() {
        warn!("no tissue groups found, using a single default tissue");
        let fallback = TissueRecord::new("Tissue1", Color::RED).with_opacity(DEFAULT_OPACITY);
        return Ok(Catalog::from_records(vec![background, fallback])?);
    }

    let mut records = Vec::with_capacity(max_index + 1);
    records.push(background);
    for index in 1..=max_index {
        let record = placed.remove(&index).unwrap_or_else(|| {
            warn!(index, "no tissue group for index, using a default record");
            TissueRecord::default()
        });
        records.push(record);
    }

    let catalog = Catalog::from_records(records)?;
    info!(count = catalog.count(), "loaded hierarchical tissue list");
    Ok(catalog)
}

fn read_index<S: GroupStore + ?Sized>(store: &S, group: &str) -> Result<usize> {
    let values = store.read_ints(&format!("{group}/index"))?;
    let index = values
        .first()
        .copied()
        .ok_or_else(|| CodecError::format_violation(format!("{group}/index is empty")))?;
    usize::try_from(index)
        .ok()
        .filter(|&idx| (1..=usize::from(TISSUES_SIZE_MAX)).contains(&idx))
        .ok_or_else(|| {
            CodecError::format_violation(format!("{group}/index {index} is out of range"))
        })
}

fn rgbo(record: &TissueRecord) -> [f32; 4] {
    let [r, g, b] = record.color.to_array();
    [r, g, b, record.opacity]
}

fn apply_rgbo(record: &mut TissueRecord, values: &[f32], path: &str) -> Result<()> {
    let &[r, g, b, opacity] = values else {
        return Err(CodecError::format_violation(format!(
            "{path}: expected 4 rgbo values, found {}",
            values.len()
        )));
    };
    record.color = Color::new(r, g, b);
    record.opacity = opacity;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryGroupStore;

    #[test]
    fn test_group_name_sanitizes_separators() {
        assert_eq!(group_name(r"a/b\c"), "a_b_c");
        assert_eq!(group_name("Bone"), "Bone");
    }

    #[test]
    fn test_empty_container_yields_default_tissue() {
        let mut store = MemoryGroupStore::new();
        store.create_group(TISSUES_GROUP).unwrap();
        store.write_ints("/Tissues/version", &[1]).unwrap();
        store
            .write_floats("/Tissues/bkg_rgbo", &[0.1, 0.2, 0.3, 0.4])
            .unwrap();

        let catalog = read_hierarchical(&store).unwrap();
        assert_eq!(catalog.count(), 1);
        assert_eq!(catalog.name(1), "Tissue1");
        assert_eq!(catalog.color(1), Color::RED);
        assert_eq!(catalog.opacity(1), 0.5);
        assert_eq!(catalog.background().opacity, 0.4);
    }

    #[test]
    fn test_gap_in_indices_is_filled_with_default_records() {
        let mut store = MemoryGroupStore::new();
        store.create_group(TISSUES_GROUP).unwrap();
        store.create_group("/Tissues/Bone").unwrap();
        store.write_ints("/Tissues/Bone/index", &[3]).unwrap();
        store.write_floats("/Tissues/Bone/rgbo", &[1.0; 4]).unwrap();

        let catalog = read_hierarchical(&store).unwrap();
        assert_eq!(catalog.count(), 3);
        assert_eq!(catalog.get(1), Some(&TissueRecord::default()));
        assert_eq!(catalog.get(2), Some(&TissueRecord::default()));
        assert_eq!(catalog.name(3), "Bone");
        assert_eq!(catalog.opacity(3), 1.0);
    }

    #[test]
    fn test_repeated_index_keeps_later_group() {
        let mut store = MemoryGroupStore::new();
        store.create_group(TISSUES_GROUP).unwrap();
        for name in ["Bone", "Fat"] {
            let group = format!("/Tissues/{name}");
            store.create_group(&group).unwrap();
            store.write_ints(&format!("{group}/index"), &[1]).unwrap();
            store.write_floats(&format!("{group}/rgbo"), &[0.5; 4]).unwrap();
        }

        let catalog = read_hierarchical(&store).unwrap();
        assert_eq!(catalog.count(), 1);
        assert_eq!(catalog.name(1), "Fat");
    }

    #[test]
    fn test_bad_rgbo_length_is_rejected() {
        let mut store = MemoryGroupStore::new();
        store.create_group(TISSUES_GROUP).unwrap();
        store.create_group("/Tissues/Bone").unwrap();
        store.write_ints("/Tissues/Bone/index", &[1]).unwrap();
        store.write_floats("/Tissues/Bone/rgbo", &[1.0; 3]).unwrap();

        assert!(read_hierarchical(&store).is_err());
    }

    #[test]
    fn test_missing_tissues_group() {
        let store = MemoryGroupStore::new();
        assert!(matches!(
            read_hierarchical(&store),
            Err(CodecError::MissingEntry { .. })
        ));
    }
}
