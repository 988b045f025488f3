//! Tests for the QAQC core
//!
//! Unit and scenario tests for rotation, insertion, naming, validation,
//! statistics and the per-hole pipeline.

pub mod insertion_tests;
pub mod rotation_tests;

// Test helper functions and fixtures
use crate::models::{Sample, SampleClassification, StandardSequenceEntry};

/// Create `count` regular samples one metre apart, starting at 0m
pub fn regular_samples(count: usize) -> Vec<Sample> {
    (0..count).map(regular_sample).collect()
}

/// Create one regular sample covering `index`..`index + 1` metres
pub fn regular_sample(index: usize) -> Sample {
    let mut sample = Sample::new(
        format!("R{:03}", index),
        index as f64,
        index as f64 + 1.0,
    );
    sample.hole_id = Some("DH001".to_string());
    sample.sampled_by = Some("JS".to_string());
    sample.sample_method = Some("Half core".to_string());
    sample.weight = Some(2.5);
    sample
}

/// Create an unnamed QC sample at a depth
pub fn qc_sample(id: &str, classification: SampleClassification, depth: f64) -> Sample {
    Sample {
        sample_id: id.to_string(),
        depth_from: Some(depth),
        sample_classification: Some(classification),
        hole_id: Some("DH001".to_string()),
        ..Default::default()
    }
}

/// Mark a sample as committed under the given name
pub fn persisted(mut sample: Sample, name: &str) -> Sample {
    sample.sample_nm = name.to_string();
    sample.revision = Some("1".to_string());
    sample
}

/// Rotation `A, B, C, D` with `C` flagged as repeat start, given out of order
pub fn standards_with_repeat() -> Vec<StandardSequenceEntry> {
    vec![
        StandardSequenceEntry::new("STD-D", 4),
        StandardSequenceEntry::new("STD-A", 1),
        StandardSequenceEntry::new("STD-C", 3).repeat_start(),
        StandardSequenceEntry::new("STD-B", 2),
    ]
}

/// Classification codes of a sample list, in order
pub fn codes(samples: &[Sample]) -> Vec<&'static str> {
    samples
        .iter()
        .map(|sample| sample.classification().code())
        .collect()
}

/// Depths of a sample list, in order
pub fn depths(samples: &[Sample]) -> Vec<f64> {
    samples
        .iter()
        .map(|sample| sample.depth_from.unwrap_or(f64::NAN))
        .collect()
}
