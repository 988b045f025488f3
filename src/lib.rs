//! Drill Hole QAQC Library
//!
//! Inserts quality-control samples (blanks, reference standards and
//! duplicates) into drill hole sample lists and assigns stable,
//! depth-ordered sample names.
//!
//! This library provides tools for:
//! - Inserting QC samples at configured per-type frequencies
//! - Rotating through reference standards with a repeating tail
//! - Naming uncommitted samples while leaving committed names untouched
//! - Keeping duplicate-to-parent links consistent after renaming
//! - Validating finished sample lists and reporting QC statistics
//! - Reading and writing sample tables as CSV or Parquet

pub mod config;
pub mod constants;
pub mod error;
pub mod io;
pub mod models;
pub mod qaqc;

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use config::QaqcConfig;
pub use error::{QaqcError, Result};
pub use models::{QaqcInsertionRule, Sample, SampleClassification, StandardSequenceEntry};
pub use qaqc::{
    QaqcPipeline, StandardRotationCycler, get_qaqc_statistics, insert_qaqc_samples,
    preview_qaqc_insertion, renumber_samples, validate_qaqc_insertion,
};
