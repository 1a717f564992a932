//! A catalog with its selection, plus load and save in every format.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use rand::Rng;
use tracing::{info, info_span, warn};

use tissue_codec::{
    BinaryReader, BinaryWriter, BinaryWriterOptions, CodecError, ForeignTableOptions, GroupStore,
    HierarchicalWriterOptions, ReadableWriterOptions, import_foreign_table, parse_default_list,
    parse_readable, read_binary, read_hierarchical, read_text, write_binary, write_default_list,
    write_hierarchical, write_readable,
};
use tissue_model::{Catalog, HierarchyItem, SelectionSet, TissueId, TissueRecord};

use crate::error::Result;
use crate::reconcile::reconcile;
use crate::volume::{IndexRemap, LabelVolume};

/// Which parser produced an imported list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportSource {
    Readable,
    ForeignTable,
}

/// Result of importing a text list into a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReport {
    pub source: ImportSource,
    /// Tissues kept from the previous catalog at ids `1..=removed_range`.
    pub removed_range: usize,
    pub remap: IndexRemap,
}

/// Owns the live catalog and the tissue selection.
///
/// Loads that produce a complete catalog (binary, hierarchical, default
/// list) replace it outright. Text imports go through reconciliation and
/// may relabel an attached [`LabelVolume`]. A failed load leaves the
/// session untouched; the `*_or_defaults` variants reset it to the
/// clinical defaults instead.
#[derive(Debug, Clone, PartialEq)]
pub struct TissueSession {
    catalog: Catalog,
    selection: SelectionSet,
}

impl Default for TissueSession {
    fn default() -> Self {
        Self::new()
    }
}

impl TissueSession {
    /// Session holding the clinical default catalog.
    pub fn new() -> Self {
        Self::with_catalog(Catalog::clinical_defaults())
    }

    pub fn with_catalog(catalog: Catalog) -> Self {
        Self {
            catalog,
            selection: SelectionSet::new(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut Catalog {
        &mut self.catalog
    }

    pub fn into_catalog(self) -> Catalog {
        self.catalog
    }

    /// Selected ids that exist in the current catalog.
    pub fn selected(&self) -> BTreeSet<TissueId> {
        self.selection.selected(&self.catalog)
    }

    /// Replace the selection; rejected unless every id is valid.
    pub fn select(&mut self, ids: BTreeSet<TissueId>) -> bool {
        self.selection.select(&self.catalog, ids)
    }

    pub fn reset_to_defaults(&mut self) {
        self.catalog = Catalog::clinical_defaults();
    }

    // ========================================================================
    // Binary
    // ========================================================================

    /// Load tissues and their lock flags from one binary file.
    pub fn load_binary(&mut self, path: &Path, stream_version: u16) -> Result<()> {
        self.catalog = read_binary(path, stream_version)?;
        Ok(())
    }

    pub fn load_binary_or_defaults(&mut self, path: &Path, stream_version: u16) -> bool {
        let result = self.load_binary(path, stream_version);
        self.fallback(result, "binary")
    }

    pub fn save_binary(&self, path: &Path, options: BinaryWriterOptions) -> Result<()> {
        write_binary(path, &self.catalog, options)?;
        Ok(())
    }

    /// Load lock flags from a separate lock file.
    pub fn load_locks(&mut self, path: &Path) -> Result<()> {
        let _span = info_span!("load_locks", path = %path.display()).entered();
        let file = File::open(path).map_err(|e| CodecError::from_open(e, path))?;
        let mut catalog = self.catalog.clone();
        BinaryReader::new(BufReader::new(file), 0).read_locks(&mut catalog)?;
        self.catalog = catalog;
        info!(count = self.catalog.count(), "loaded lock flags");
        Ok(())
    }

    pub fn save_locks(&self, path: &Path) -> Result<()> {
        let _span = info_span!("save_locks", path = %path.display()).entered();
        let file = File::create(path).map_err(CodecError::from)?;
        let mut writer = BinaryWriter::new(BufWriter::new(file));
        writer.write_locks(&self.catalog)?;
        writer.finish()?;
        Ok(())
    }

    // ========================================================================
    // Hierarchical
    // ========================================================================

    pub fn load_hierarchical<S: GroupStore + ?Sized>(&mut self, store: &S) -> Result<()> {
        self.catalog = read_hierarchical(store)?;
        Ok(())
    }

    pub fn load_hierarchical_or_defaults<S: GroupStore + ?Sized>(&mut self, store: &S) -> bool {
        let result = self.load_hierarchical(store);
        self.fallback(result, "hierarchical")
    }

    pub fn save_hierarchical<S: GroupStore + ?Sized>(
        &self,
        store: &mut S,
        hierarchy: Option<&HierarchyItem>,
        options: &HierarchicalWriterOptions,
    ) -> Result<()> {
        write_hierarchical(store, &self.catalog, hierarchy, options)?;
        Ok(())
    }

    // ========================================================================
    // Readable text and foreign tables
    // ========================================================================

    /// Import a readable list, or a foreign lookup table when the file has
    /// no count line, and reconcile it with the current catalog.
    pub fn load_readable<V: LabelVolume + ?Sized>(
        &mut self,
        path: &Path,
        volume: &mut V,
    ) -> Result<ImportReport> {
        let _span = info_span!("load_readable", path = %path.display()).entered();
        let text = read_text(path)?;
        self.import_text(&text, volume, &mut rand::rng())
    }

    /// [`Self::load_readable`], resetting to the clinical defaults when the
    /// file is missing, malformed or not recognized as any list format.
    pub fn load_readable_or_defaults<V: LabelVolume + ?Sized>(
        &mut self,
        path: &Path,
        volume: &mut V,
    ) -> Option<ImportReport> {
        let mut report = None;
        let result = self
            .load_readable(path, volume)
            .map(|imported| report = Some(imported));
        self.fallback(result, "readable");
        report
    }

    /// Import list text; placeholder colors for foreign tables come from `rng`.
    pub fn import_text<V: LabelVolume + ?Sized, R: Rng + ?Sized>(
        &mut self,
        text: &str,
        volume: &mut V,
        rng: &mut R,
    ) -> Result<ImportReport> {
        let (source, candidate) = match parse_readable(text) {
            Ok(list) => (ImportSource::Readable, list.records),
            Err(err) if err.is_detection_failure() => {
                let records = import_foreign_table(text, &ForeignTableOptions::default(), rng)?;
                (ImportSource::ForeignTable, records)
            }
            Err(err) => return Err(err.into()),
        };
        self.import_records(source, candidate, volume)
    }

    /// Reconcile `candidate` into the catalog.
    pub fn import_records<V: LabelVolume + ?Sized>(
        &mut self,
        source: ImportSource,
        candidate: Vec<TissueRecord>,
        volume: &mut V,
    ) -> Result<ImportReport> {
        let summary = reconcile(&self.catalog, candidate)?.commit(&mut self.catalog, volume);
        Ok(ImportReport {
            source,
            removed_range: summary.removed_range,
            remap: summary.remap,
        })
    }

    pub fn save_readable(&self, path: &Path, options: &ReadableWriterOptions) -> Result<()> {
        let _span = info_span!("save_readable", path = %path.display()).entered();
        let mut writer = BufWriter::new(File::create(path).map_err(CodecError::from)?);
        write_readable(&mut writer, &self.catalog, options)?;
        writer.flush().map_err(CodecError::from)?;
        info!(count = self.catalog.count(), "saved readable tissue list");
        Ok(())
    }

    // ========================================================================
    // Default list
    // ========================================================================

    /// Load an application default list.
    ///
    /// A missing file resets the catalog to the clinical defaults.
    pub fn load_default_list(&mut self, path: &Path) -> Result<()> {
        let _span = info_span!("load_default_list", path = %path.display()).entered();
        let text = match read_text(path) {
            Ok(text) => text,
            Err(CodecError::FileNotFound { .. }) => {
                warn!("default tissue list not found, using clinical defaults");
                self.reset_to_defaults();
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        };
        self.catalog = parse_default_list(&text)?;
        info!(count = self.catalog.count(), "loaded default tissue list");
        Ok(())
    }

    pub fn save_default_list(&self, path: &Path) -> Result<()> {
        let _span = info_span!("save_default_list", path = %path.display()).entered();
        let mut writer = BufWriter::new(File::create(path).map_err(CodecError::from)?);
        write_default_list(&mut writer, &self.catalog)?;
        writer.flush().map_err(CodecError::from)?;
        Ok(())
    }

    // ========================================================================
    // Structural edits
    // ========================================================================

    /// Remove tissues, relabeling the volume first.
    ///
    /// Voxels of removed tissues become background.
    pub fn remove_tissues<V: LabelVolume + ?Sized>(
        &mut self,
        ids: &BTreeSet<TissueId>,
        volume: &mut V,
    ) -> Result<usize> {
        let mut catalog = self.catalog.clone();
        let removed = catalog.remove_many(ids)?;
        volume.remap_labels(&IndexRemap::for_removal(self.catalog.max_id(), ids));
        self.catalog = catalog;
        Ok(removed)
    }

    /// Remove the tissues an import carried over at ids `1..=removed_range`.
    pub fn purge_carried_over<V: LabelVolume + ?Sized>(
        &mut self,
        removed_range: usize,
        volume: &mut V,
    ) -> Result<usize> {
        let ids: BTreeSet<TissueId> = self
            .catalog
            .iter()
            .map(|(id, _)| id)
            .take(removed_range)
            .collect();
        if ids.is_empty() {
            return Ok(0);
        }
        self.remove_tissues(&ids, volume)
    }

    fn fallback(&mut self, result: Result<()>, format: &str) -> bool {
        match result {
            Ok(()) => true,
            Err(err) => {
                warn!(format, error = %err, "load failed, using clinical defaults");
                self.reset_to_defaults();
                false
            }
        }
    }
}
