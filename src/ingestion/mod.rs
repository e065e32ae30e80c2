//! Dataset loading: CSV reading, type normalization, key indexing.
//!
//! Most callers should use [`load_dataset`] (from [`dataset`]), which runs the
//! full pipeline for one [`DatasetSpec`]:
//!
//! - reads the dataset's CSV file (blank cells and the `\N` sentinel become
//!   nulls)
//! - normalizes column types, tolerating per-column failures
//! - promotes the natural key to the row index (or keeps a positional index)
//! - optionally reports success/diagnostics/alerts to a [`LoadObserver`]
//!
//! Stage-specific functions are also available under [`csv`] and
//! [`normalize`].

pub mod csv;
pub mod dataset;
pub mod normalize;
pub mod observability;

pub use dataset::{load_dataset, DatasetSpec, LoadOptions};
pub use normalize::{normalize_columns, CoercionFailure};
pub use observability::{
    CompositeObserver, FileObserver, LoadContext, LoadObserver, LoadSeverity, LoadStats,
    StdErrObserver,
};
