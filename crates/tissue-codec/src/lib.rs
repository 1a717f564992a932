//! Tissue catalog file formats.
//!
//! Five formats grew over the life of the catalog:
//!
//! - [`binary`]: fixed-layout legacy stream, version-gated, with a separate
//!   lock-flag stream
//! - [`hierarchical`]: group-per-tissue container written through a
//!   [`GroupStore`]
//! - [`readable`]: line-oriented, human-editable list
//! - [`default_list`]: `name r g b opacity` application defaults
//! - [`foreign`]: externally authored `label name r g b a` lookup tables
//!
//! Binary and hierarchical loads produce a complete [`tissue_model::Catalog`].
//! Readable and foreign loads produce candidate records that are merged into
//! the live catalog by the reconciliation step in `tissue-core`.
//!
//! # Example
//!
//! ```
//! use std::io::Cursor;
//! use tissue_codec::{BinaryReader, BinaryWriter};
//! use tissue_model::Catalog;
//!
//! let catalog = Catalog::clinical_defaults();
//! let mut writer = BinaryWriter::new(Vec::new());
//! writer.write_tissues(&catalog).unwrap();
//! let bytes = writer.finish().unwrap();
//!
//! let decoded = BinaryReader::new(Cursor::new(bytes), 5)
//!     .read_tissues()
//!     .unwrap();
//! assert_eq!(decoded.count(), 82);
//! ```

pub mod binary;
pub mod default_list;
mod error;
pub mod foreign;
pub mod hierarchical;
mod options;
pub mod readable;
pub mod store;

use std::fs;
use std::path::Path;

// Re-export error types
pub use error::{CodecError, Result};

// Re-export options
pub use options::{
    BinaryWriterOptions, FORMAT_SENTINEL, ForeignTableOptions, HierarchicalWriterOptions,
    OPACITY_VERSION, ReadableWriterOptions,
};

// Re-export codec entry points
pub use binary::{BinaryReader, BinaryWriter, StreamLayout, read_binary, sniff_layout, write_binary};
pub use default_list::{parse_default_list, write_default_list};
pub use foreign::{ForeignRow, ForeignTable, import_foreign_table};
pub use hierarchical::{read_hierarchical, write_hierarchical};
pub use readable::{ReadableList, parse_readable, write_readable};
pub use store::{GroupStore, MemoryGroupStore, StoreEntry};

/// Read a whole text file, reporting a missing file as
/// [`CodecError::FileNotFound`].
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| CodecError::from_open(e, path))
}
