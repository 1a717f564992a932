//! Reader and writer options.

use tissue_model::{TISSUES_SIZE_MAX, TissueId};

/// Magic float written before the background color by versioned binary
/// streams. Compared bit-for-bit on load.
pub const FORMAT_SENTINEL: f32 = 1.2345;

/// First format version that stores per-tissue opacity.
pub const OPACITY_VERSION: u16 = 5;

/// Options for writing the legacy binary stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinaryWriterOptions {
    /// Caller-level format version (default: 5).
    ///
    /// 0 writes a one-byte tissue count; 5 and above add the format
    /// sentinel and opacity fields.
    pub version: u16,
}

impl Default for BinaryWriterOptions {
    fn default() -> Self {
        Self {
            version: OPACITY_VERSION,
        }
    }
}

impl BinaryWriterOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_version(mut self, version: u16) -> Self {
        self.version = version;
        self
    }

    /// Whether opacity fields are written.
    #[must_use]
    pub const fn writes_opacity(self) -> bool {
        self.version >= OPACITY_VERSION
    }
}

/// Options for writing the readable text list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadableWriterOptions {
    /// Format version (default: 5). Below 5 no `V` header or opacity column
    /// is written.
    pub version: u16,
}

impl Default for ReadableWriterOptions {
    fn default() -> Self {
        Self {
            version: OPACITY_VERSION,
        }
    }
}

impl ReadableWriterOptions {
    #[must_use]
    pub fn with_version(mut self, version: u16) -> Self {
        self.version = version;
        self
    }
}

/// Options for writing the hierarchical container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HierarchicalWriterOptions {
    /// Value stored under `/Tissues/version` (default: 1).
    pub version: i32,
}

impl Default for HierarchicalWriterOptions {
    fn default() -> Self {
        Self { version: 1 }
    }
}

impl HierarchicalWriterOptions {
    #[must_use]
    pub fn with_version(mut self, version: i32) -> Self {
        self.version = version;
        self
    }
}

/// Options for importing a foreign lookup table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForeignTableOptions {
    /// Labels above this id are dropped (default: [`TISSUES_SIZE_MAX`]).
    pub max_id: TissueId,
}

impl Default for ForeignTableOptions {
    fn default() -> Self {
        Self {
            max_id: TISSUES_SIZE_MAX,
        }
    }
}

impl ForeignTableOptions {
    #[must_use]
    pub fn with_max_id(mut self, max_id: TissueId) -> Self {
        self.max_id = max_id;
        self
    }
}
