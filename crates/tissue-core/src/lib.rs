//! Tissue catalog sessions and import reconciliation.
//!
//! [`TissueSession`] owns a [`tissue_model::Catalog`] and its selection and
//! loads or saves it in every supported format. Text imports are merged by
//! [`reconcile`], which never drops a known tissue and reports id changes
//! to the [`LabelVolume`] before the merged catalog replaces the old one.
//!
//! # Example
//!
//! ```
//! use tissue_core::{ImportSource, NoVolume, TissueSession};
//! use tissue_model::{Catalog, Color, TissueRecord};
//!
//! let mut catalog = Catalog::new();
//! catalog.add(TissueRecord::new("Bone", Color::RED)).unwrap();
//! let mut session = TissueSession::with_catalog(catalog);
//!
//! let candidate = vec![TissueRecord::new("Fat", Color::new(1.0, 1.0, 0.0))];
//! let report = session
//!     .import_records(ImportSource::Readable, candidate, &mut NoVolume)
//!     .unwrap();
//! assert_eq!(report.removed_range, 1);
//! assert_eq!(session.catalog().name(1), "Bone");
//! ```

mod error;
pub mod reconcile;
pub mod session;
pub mod volume;

pub use error::{CoreError, Result};
pub use reconcile::{ReconcileSummary, Reconciliation, reconcile};
pub use session::{ImportReport, ImportSource, TissueSession};
pub use volume::{IndexRemap, LabelVolume, NoVolume};
