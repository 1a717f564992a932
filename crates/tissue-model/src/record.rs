//! Tissue records and id limits.

use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Position of a tissue in the catalog. Id 0 is the background.
pub type TissueId = u16;

/// Largest representable tissue id.
pub const TISSUES_SIZE_MAX: TissueId = TissueId::MAX;

/// Opacity assigned when a format does not carry one.
pub const DEFAULT_OPACITY: f32 = 0.5;

/// Longest tissue name accepted by the legacy binary format.
pub const MAX_NAME_LEN: usize = 99;

/// A named, colored segmentation label class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TissueRecord {
    pub name: String,
    pub color: Color,
    pub opacity: f32,
    pub locked: bool,
}

impl Default for TissueRecord {
    fn default() -> Self {
        Self {
            name: String::new(),
            color: Color::default(),
            opacity: DEFAULT_OPACITY,
            locked: false,
        }
    }
}

impl TissueRecord {
    /// Create an unlocked record with the default opacity.
    pub fn new(name: impl Into<String>, color: Color) -> Self {
        Self {
            name: name.into(),
            color,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    #[must_use]
    pub fn with_locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    /// Key used by the case-insensitive name index.
    pub fn name_key(&self) -> String {
        name_key(&self.name)
    }
}

/// Normalize a tissue name for case-insensitive comparison.
pub fn name_key(name: &str) -> String {
    name.to_ascii_lowercase()
}
