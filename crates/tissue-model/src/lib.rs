//! Tissue catalog data model.
//!
//! A tissue is a named, colored segmentation label class. The [`Catalog`]
//! holds every tissue of a project in id order, with id 0 reserved for the
//! background. Ids are contiguous and are referenced by an external label
//! volume, so every structural edit keeps them gap-free.
//!
//! # Example
//!
//! ```
//! use tissue_model::{Catalog, Color, TissueRecord};
//!
//! let mut catalog = Catalog::new();
//! let id = catalog
//!     .add(TissueRecord::new("Liver", Color::new(0.48, 0.26, 0.14)))
//!     .unwrap();
//! assert_eq!(id, 1);
//! assert_eq!(catalog.lookup("LIVER"), 1);
//! assert_eq!(catalog.lookup("Spleen"), 0);
//! ```

pub mod catalog;
pub mod color;
pub mod error;
pub mod hierarchy;
mod palette;
pub mod record;
pub mod selection;

pub use catalog::Catalog;
pub use color::Color;
pub use error::{ModelError, Result};
pub use hierarchy::HierarchyItem;
pub use palette::CLINICAL_PALETTE;
pub use record::{DEFAULT_OPACITY, MAX_NAME_LEN, TISSUES_SIZE_MAX, TissueId, TissueRecord};
pub use selection::SelectionSet;
