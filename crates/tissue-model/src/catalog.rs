//! The catalog store: ordered tissue records plus a derived name index.

use std::collections::{BTreeSet, HashMap};

use tracing::debug;

use crate::color::Color;
use crate::error::{ModelError, Result};
use crate::palette::CLINICAL_PALETTE;
use crate::record::{DEFAULT_OPACITY, TISSUES_SIZE_MAX, TissueId, TissueRecord, name_key};

/// Ordered registry of tissues.
///
/// Index 0 always holds the background record; tissues occupy ids
/// `1..=count()` without gaps. The name index maps lowercased names to ids
/// and is rebuilt from the records after every structural change. When two
/// tissues share a lowercased name the index resolves to the one inserted
/// last, and the other cannot be found by name.
///
/// Accessors come in two flavors: the `*_or_default`-style getters
/// ([`Catalog::name`], [`Catalog::color`], [`Catalog::opacity`],
/// [`Catalog::is_locked`]) return a documented fallback for out-of-range
/// ids, while setters and structural operations return [`ModelError`].
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    records: Vec<TissueRecord>,
    name_index: HashMap<String, TissueId>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    /// Create a catalog holding only the background record.
    pub fn new() -> Self {
        Self {
            records: vec![TissueRecord::default()],
            name_index: HashMap::new(),
        }
    }

    /// Create the clinical default catalog (82 reference tissues).
    pub fn clinical_defaults() -> Self {
        let mut records = Vec::with_capacity(CLINICAL_PALETTE.len() + 1);
        records.push(TissueRecord::default());
        records.extend(
            CLINICAL_PALETTE
                .iter()
                .map(|&(name, r, g, b)| TissueRecord::new(name, Color::new(r, g, b))),
        );
        Self::from_parts(records)
    }

    /// Build a catalog from records where `records[0]` is the background.
    ///
    /// An empty vector yields a background-only catalog.
    pub fn from_records(records: Vec<TissueRecord>) -> Result<Self> {
        let limit = usize::from(TISSUES_SIZE_MAX) + 1;
        if records.len() > limit {
            return Err(ModelError::CapacityExceeded {
                requested: records.len().saturating_sub(1),
                limit: usize::from(TISSUES_SIZE_MAX),
            });
        }
        if records.is_empty() {
            return Ok(Self::new());
        }
        Ok(Self::from_parts(records))
    }

    fn from_parts(records: Vec<TissueRecord>) -> Self {
        let mut catalog = Self {
            records,
            name_index: HashMap::new(),
        };
        catalog.rebuild_index();
        catalog
    }

    /// Replace every record, keeping this store instance.
    pub fn replace_all(&mut self, records: Vec<TissueRecord>) -> Result<()> {
        *self = Self::from_records(records)?;
        Ok(())
    }

    /// Number of tissues, background excluded. Also the largest valid id.
    pub fn count(&self) -> TissueId {
        // from_records caps the length, so the cast cannot truncate
        (self.records.len() - 1) as TissueId
    }

    pub fn max_id(&self) -> TissueId {
        self.count()
    }

    pub fn is_empty(&self) -> bool {
        self.records.len() == 1
    }

    /// Whether `id` addresses a record (background included).
    pub fn is_valid(&self, id: TissueId) -> bool {
        id <= self.max_id()
    }

    pub fn get(&self, id: TissueId) -> Option<&TissueRecord> {
        self.records.get(usize::from(id))
    }

    pub fn background(&self) -> &TissueRecord {
        &self.records[0]
    }

    pub fn background_mut(&mut self) -> &mut TissueRecord {
        &mut self.records[0]
    }

    /// All records, background first.
    pub fn records(&self) -> &[TissueRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<TissueRecord> {
        self.records
    }

    /// Non-background tissues with their ids.
    pub fn iter(&self) -> impl Iterator<Item = (TissueId, &TissueRecord)> {
        self.records
            .iter()
            .enumerate()
            .skip(1)
            .map(|(idx, record)| (idx as TissueId, record))
    }

    /// Tissue name, or `""` for an out-of-range id.
    pub fn name(&self, id: TissueId) -> &str {
        self.get(id).map_or("", |record| record.name.as_str())
    }

    /// Tissue color, or black for an out-of-range id.
    pub fn color(&self, id: TissueId) -> Color {
        self.get(id).map_or_else(Color::default, |record| record.color)
    }

    /// Tissue opacity, or [`DEFAULT_OPACITY`] for an out-of-range id.
    pub fn opacity(&self, id: TissueId) -> f32 {
        self.get(id).map_or(DEFAULT_OPACITY, |record| record.opacity)
    }

    /// Lock flag, or `false` for an out-of-range id.
    pub fn is_locked(&self, id: TissueId) -> bool {
        self.get(id).is_some_and(|record| record.locked)
    }

    /// 8-bit color, or black for an out-of-range id.
    pub fn color_u8(&self, id: TissueId) -> [u8; 3] {
        self.color(id).to_u8()
    }

    /// Color blended against a gray `offset` by the tissue opacity.
    ///
    /// Each channel is `offset + opacity * (255 * c - offset)`, truncated.
    pub fn blended_rgb(&self, id: TissueId, offset: u8) -> Result<[u8; 3]> {
        let record = self.get_checked(id)?;
        let offset = f32::from(offset);
        let blend = |channel: f32| (offset + record.opacity * (255.0 * channel - offset)) as u8;
        Ok([
            blend(record.color.r),
            blend(record.color.g),
            blend(record.color.b),
        ])
    }

    fn get_checked(&self, id: TissueId) -> Result<&TissueRecord> {
        let max = self.max_id();
        self.get(id).ok_or_else(|| ModelError::invalid_id(id, max))
    }

    fn get_checked_mut(&mut self, id: TissueId) -> Result<&mut TissueRecord> {
        let max = self.max_id();
        self.records
            .get_mut(usize::from(id))
            .ok_or_else(|| ModelError::invalid_id(id, max))
    }

    pub fn set_color(&mut self, id: TissueId, color: Color) -> Result<()> {
        self.get_checked_mut(id)?.color = color;
        Ok(())
    }

    pub fn set_opacity(&mut self, id: TissueId, opacity: f32) -> Result<()> {
        self.get_checked_mut(id)?.opacity = opacity;
        Ok(())
    }

    pub fn set_locked(&mut self, id: TissueId, locked: bool) -> Result<()> {
        self.get_checked_mut(id)?.locked = locked;
        Ok(())
    }

    /// Set the lock flag of every tissue except the background.
    pub fn set_all_locked(&mut self, locked: bool) {
        for record in self.records.iter_mut().skip(1) {
            record.locked = locked;
        }
    }

    pub fn rename(&mut self, id: TissueId, name: impl Into<String>) -> Result<()> {
        self.get_checked_mut(id)?.name = name.into();
        self.rebuild_index();
        Ok(())
    }

    /// Append a tissue and return its id.
    pub fn add(&mut self, record: TissueRecord) -> Result<TissueId> {
        if self.count() == TISSUES_SIZE_MAX {
            return Err(ModelError::CapacityExceeded {
                requested: usize::from(TISSUES_SIZE_MAX) + 1,
                limit: usize::from(TISSUES_SIZE_MAX),
            });
        }
        let key = record.name_key();
        self.records.push(record);
        let id = self.count();
        self.name_index.insert(key, id);
        Ok(id)
    }

    /// Remove one tissue; later ids shift down by one.
    pub fn remove(&mut self, id: TissueId) -> Result<TissueRecord> {
        if id == 0 {
            return Err(ModelError::BackgroundRemoval);
        }
        self.get_checked(id)?;
        let removed = self.records.remove(usize::from(id));
        self.rebuild_index();
        Ok(removed)
    }

    /// Remove several tissues at once.
    ///
    /// Every id is validated before anything is removed. Removal runs from
    /// the highest id down so each pending id still addresses its original
    /// record when its turn comes.
    pub fn remove_many(&mut self, ids: &BTreeSet<TissueId>) -> Result<usize> {
        if ids.contains(&0) {
            return Err(ModelError::BackgroundRemoval);
        }
        if let Some(&highest) = ids.last() {
            self.get_checked(highest)?;
        }
        for &id in ids.iter().rev() {
            self.records.remove(usize::from(id));
        }
        self.rebuild_index();
        debug!(removed = ids.len(), remaining = self.count(), "removed tissues");
        Ok(ids.len())
    }

    /// Reset to the single background record.
    pub fn clear(&mut self) {
        self.records.clear();
        self.records.push(TissueRecord::default());
        self.name_index.clear();
    }

    /// Case-insensitive lookup; returns 0 when the name is unknown.
    ///
    /// 0 is also the background id, so callers that care about "not found"
    /// must treat 0 specially or use [`Catalog::find`].
    pub fn lookup(&self, name: &str) -> TissueId {
        self.find(name).unwrap_or(0)
    }

    pub fn find(&self, name: &str) -> Option<TissueId> {
        self.name_index.get(&name_key(name)).copied()
    }

    fn rebuild_index(&mut self) {
        self.name_index.clear();
        for (idx, record) in self.records.iter().enumerate().skip(1) {
            self.name_index.insert(record.name_key(), idx as TissueId);
        }
    }
}
