//! Correlation engine: release dates, release ordering, and per-release issues

pub mod catalog;
pub mod date_index;
pub mod window;

pub use catalog::{ReleaseCatalog, ReleaseWindow};
pub use date_index::CommitDateIndex;
pub use window::{ReleaseReport, ReleaseWindowExtractor};
