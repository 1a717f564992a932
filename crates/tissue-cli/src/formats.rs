//! File format selection and whole-catalog load/save for the CLI.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use tissue_codec::{
    BinaryWriterOptions, HierarchicalWriterOptions, MemoryGroupStore, ReadableWriterOptions,
};
use tissue_core::{ImportReport, NoVolume, TissueSession};
use tissue_model::{Catalog, HierarchyItem};

/// On-disk catalog formats understood by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    /// Legacy binary stream with trailing lock flags.
    Binary,
    /// Readable `V`/`N`/`C` list (foreign lookup tables are accepted on load).
    Readable,
    /// `name r g b opacity` default list.
    DefaultList,
    /// Group-per-tissue container stored as JSON.
    Hierarchical,
}

impl CatalogFormat {
    /// Guess the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "bin" | "dat" => Some(Self::Binary),
            "txt" | "ctbl" => Some(Self::Readable),
            "list" | "defaults" => Some(Self::DefaultList),
            "json" => Some(Self::Hierarchical),
            _ => None,
        }
    }

    /// Explicit format, else the one implied by `path`.
    pub fn resolve(explicit: Option<Self>, path: &Path) -> Result<Self> {
        match explicit.or_else(|| Self::from_path(path)) {
            Some(format) => Ok(format),
            None => bail!(
                "cannot infer the tissue list format of {}; pass it explicitly",
                path.display()
            ),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Binary => "binary",
            Self::Readable => "readable",
            Self::DefaultList => "default-list",
            Self::Hierarchical => "hierarchical",
        }
    }
}

/// Load a complete catalog from `path`.
///
/// Readable lists and foreign tables are imported into an empty catalog, so
/// the result holds exactly the records of the file.
pub fn load_catalog(path: &Path, format: CatalogFormat, version: u16) -> Result<TissueSession> {
    if !path.exists() {
        bail!("file not found: {}", path.display());
    }
    let mut session = TissueSession::with_catalog(Catalog::new());
    match format {
        CatalogFormat::Binary => session
            .load_binary(path, version)
            .with_context(|| format!("load binary tissue list {}", path.display()))?,
        CatalogFormat::Readable => {
            session
                .load_readable(path, &mut NoVolume)
                .with_context(|| format!("load readable tissue list {}", path.display()))?;
        }
        CatalogFormat::DefaultList => session
            .load_default_list(path)
            .with_context(|| format!("load default tissue list {}", path.display()))?,
        CatalogFormat::Hierarchical => {
            let store = MemoryGroupStore::load_json(path)
                .with_context(|| format!("read container {}", path.display()))?;
            session
                .load_hierarchical(&store)
                .with_context(|| format!("load hierarchical tissue list {}", path.display()))?;
        }
    }
    Ok(session)
}

/// Save the session catalog to `path`.
///
/// `hierarchy` only affects the hierarchical container.
pub fn save_catalog(
    session: &TissueSession,
    path: &Path,
    format: CatalogFormat,
    version: u16,
    hierarchy: Option<&HierarchyItem>,
) -> Result<()> {
    let context = || format!("write {} tissue list {}", format.name(), path.display());
    match format {
        CatalogFormat::Binary => session
            .save_binary(path, BinaryWriterOptions::default().with_version(version))
            .with_context(context),
        CatalogFormat::Readable => session
            .save_readable(path, &ReadableWriterOptions::default().with_version(version))
            .with_context(context),
        CatalogFormat::DefaultList => session.save_default_list(path).with_context(context),
        CatalogFormat::Hierarchical => {
            let mut store = MemoryGroupStore::new();
            session
                .save_hierarchical(&mut store, hierarchy, &HierarchicalWriterOptions::default())
                .with_context(context)?;
            store.save_json(path).with_context(context)
        }
    }
}

/// Read a tissue hierarchy tree from a JSON file.
pub fn load_hierarchy(path: &Path) -> Result<HierarchyItem> {
    let text =
        fs::read_to_string(path).with_context(|| format!("read hierarchy {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse hierarchy {}", path.display()))
}

/// Merge an edited list into `session`, optionally dropping carried-over
/// tissues afterwards.
pub fn import_list(session: &mut TissueSession, list: &Path, purge: bool) -> Result<ImportReport> {
    let report = session
        .load_readable(list, &mut NoVolume)
        .with_context(|| format!("import tissue list {}", list.display()))?;
    if purge && report.removed_range > 0 {
        session
            .purge_carried_over(report.removed_range, &mut NoVolume)
            .context("remove carried-over tissues")?;
    }
    Ok(report)
}
