//! Import of foreign color lookup tables.
//!
//! A foreign table has one `label name r g b a` row per label, separated by
//! tabs, with 0-255 integer channels. Lines that do not parse as such a row
//! (comments, headers) are ignored. The format is recognized by a row with
//! label 0 named `Unknown`.
//!
//! Rows are parsed once into a [`ForeignTable`], then three passes run over
//! them: detection, maximum label, and candidate construction.

use std::collections::BTreeMap;

use rand::Rng;
use tracing::{debug, info, warn};

use tissue_model::{Color, DEFAULT_OPACITY, TissueRecord};

use crate::error::{CodecError, Result};
use crate::options::ForeignTableOptions;

/// Name of the label-0 row that identifies a foreign table.
pub const UNKNOWN_LABEL_NAME: &str = "Unknown";

/// Prefix of placeholder tissues synthesized for label gaps.
pub const DUMMY_PREFIX: &str = "DummyTissue";

/// A parsed `label name r g b a` row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignRow {
    pub label: i64,
    pub name: String,
    pub rgba: [i64; 4],
}

impl ForeignRow {
    fn parse(line: &str) -> Option<Self> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        let [label, name, r, g, b, a] = fields.get(..6)? else {
            return None;
        };
        Some(Self {
            label: label.parse().ok()?,
            name: (*name).to_string(),
            rgba: [r.parse().ok()?, g.parse().ok()?, b.parse().ok()?, a.parse().ok()?],
        })
    }

    fn to_record(&self) -> TissueRecord {
        let [r, g, b, a] = self.rgba.map(channel);
        TissueRecord::new(self.name.clone(), Color::new(r, g, b)).with_opacity(a)
    }
}

fn channel(value: i64) -> f32 {
    value.clamp(0, 255) as f32 / 255.0
}

/// All well-formed rows of a lookup table, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForeignTable {
    rows: Vec<ForeignRow>,
}

impl ForeignTable {
    pub fn parse(text: &str) -> Self {
        Self {
            rows: text.lines().filter_map(ForeignRow::parse).collect(),
        }
    }

    pub fn rows(&self) -> &[ForeignRow] {
        &self.rows
    }

    /// Whether a `0 Unknown` row is present.
    pub fn is_detected(&self) -> bool {
        self.rows
            .iter()
            .any(|row| row.label == 0 && row.name == UNKNOWN_LABEL_NAME)
    }

    /// Largest label in the table (0 when there are no positive labels).
    pub fn max_label(&self) -> u64 {
        self.rows
            .iter()
            .filter_map(|row| u64::try_from(row.label).ok())
            .max()
            .unwrap_or(0)
    }

    /// Build contiguous candidate records for labels `1..=min(max_label, max_id)`.
    ///
    /// Labels present in the table are copied; gaps become
    /// `DummyTissue<k>` placeholders with a random color and default
    /// opacity. The first row of a repeated label wins.
    pub fn build_candidate<R: Rng + ?Sized>(
        &self,
        options: &ForeignTableOptions,
        rng: &mut R,
    ) -> Vec<TissueRecord> {
        let max_label = self.max_label();
        let limit = u64::from(options.max_id);
        if max_label > limit {
            warn!(max_label, limit, "foreign table labels above the limit dropped");
        }
        let count = max_label.min(limit) as usize;

        let mut by_label: BTreeMap<usize, &ForeignRow> = BTreeMap::new();
        for row in &self.rows {
            if let Ok(label) = usize::try_from(row.label)
                && (1..=count).contains(&label)
            {
                by_label.entry(label).or_insert(row);
            }
        }

        let mut dummy_index = 1usize;
        let mut records = Vec::with_capacity(count);
        for label in 1..=count {
            match by_label.get(&label) {
                Some(row) => records.push(row.to_record()),
                None => {
                    let color = Color::new(rng.random(), rng.random(), rng.random());
                    let name = format!("{DUMMY_PREFIX}{dummy_index}");
                    dummy_index += 1;
                    records.push(TissueRecord::new(name, color).with_opacity(DEFAULT_OPACITY));
                }
            }
        }

        debug!(
            count,
            placeholders = dummy_index - 1,
            "built candidate from foreign table"
        );
        records
    }
}

/// Detect and import a foreign lookup table as candidate records.
///
/// Returns [`CodecError::NotForeignTable`] when the `0 Unknown` row is
/// absent.
pub fn import_foreign_table<R: Rng + ?Sized>(
    text: &str,
    options: &ForeignTableOptions,
    rng: &mut R,
) -> Result<Vec<TissueRecord>> {
    let table = ForeignTable::parse(text);
    if !table.is_detected() {
        return Err(CodecError::NotForeignTable);
    }
    let records = table.build_candidate(options, rng);
    info!(count = records.len(), "imported foreign lookup table");
    Ok(records)
}
