//! QAQC insertion and sample naming core
//!
//! Pure, synchronous transforms over in-memory sample lists. Nothing here
//! performs I/O; file handling lives in [`crate::io`].
//!
//! # Architecture
//!
//! - [`rotation`] - Cycles through reference standards with a repeating tail
//! - [`insertion`] - Inserts blanks, standards and duplicates at configured frequencies
//! - [`numbering`] - Assigns depth-ordered names and keeps duplicate links in sync
//! - [`validation`] - Diagnostic checks over a finished sample list
//! - [`stats`] - Counts, percentages and dry-run previews
//! - [`pipeline`] - Runs the stages above for one hole
//!
//! # Example Usage
//!
//! ```rust
//! use drillhole_qaqc::models::{QaqcInsertionRule, Sample};
//! use drillhole_qaqc::qaqc::{insert_qaqc_samples, renumber_samples};
//!
//! # fn example() -> drillhole_qaqc::Result<()> {
//! let regular: Vec<Sample> = (0..10)
//!     .map(|i| Sample::new(format!("id-{i}"), i as f64, i as f64 + 1.0))
//!     .collect();
//! let rule = QaqcInsertionRule::default().with_standard_frequency(3);
//!
//! let inserted = insert_qaqc_samples(regular, &rule, &[], None)?;
//! assert_eq!(inserted.summary.standards, 3);
//!
//! let named = renumber_samples(inserted.samples, "S", 1, "DH1-");
//! assert_eq!(named.samples[0].sample_nm, "SDH1-00001");
//! # Ok(())
//! # }
//! ```

pub mod insertion;
pub mod numbering;
pub mod pipeline;
pub mod rotation;
pub mod stats;
pub mod validation;

#[cfg(test)]
pub mod tests;

pub use insertion::{InsertionSummary, QaqcInsertionResult, build_qc_sample, insert_qaqc_samples};
pub use numbering::{
    NumberingResult, SampleNameGenerator, assign_sample_names, extract_sequence,
    find_max_sequence, renumber_samples, validate_sample_id,
};
pub use pipeline::{PipelineResult, QaqcPipeline, remove_generated_qc};
pub use rotation::StandardRotationCycler;
pub use stats::{
    QaqcPreview, QaqcStatistics, QcBreakdown, get_qaqc_statistics, preview_qaqc_insertion,
};
pub use validation::{ValidationReport, validate_qaqc_insertion};
