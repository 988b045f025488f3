//! QAQC statistics and insertion preview
//!
//! Descriptive counts over a sample list, and a dry-run estimate of how many
//! QC samples a rule would generate for a given number of regular samples.

use crate::constants::QC_INSERTION_PRIORITY;
use crate::models::{QaqcInsertionRule, Sample, SampleClassification};
use serde::Serialize;
use std::collections::BTreeMap;

/// Count of QC samples per QC type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct QcBreakdown {
    pub blanks: usize,
    pub standards: usize,
    pub prep_duplicates: usize,
    pub field_duplicates: usize,
}

impl QcBreakdown {
    /// Add one sample of the given type; regular samples are ignored
    pub fn increment(&mut self, classification: SampleClassification) {
        match classification {
            SampleClassification::Original => {}
            SampleClassification::Blank => self.blanks += 1,
            SampleClassification::Standard => self.standards += 1,
            SampleClassification::PrepDuplicate => self.prep_duplicates += 1,
            SampleClassification::FieldDuplicate => self.field_duplicates += 1,
        }
    }

    pub fn get(&self, classification: SampleClassification) -> usize {
        match classification {
            SampleClassification::Original => 0,
            SampleClassification::Blank => self.blanks,
            SampleClassification::Standard => self.standards,
            SampleClassification::PrepDuplicate => self.prep_duplicates,
            SampleClassification::FieldDuplicate => self.field_duplicates,
        }
    }

    /// Preparation plus field duplicates
    pub fn duplicates(&self) -> usize {
        self.prep_duplicates + self.field_duplicates
    }

    pub fn total(&self) -> usize {
        self.blanks + self.standards + self.duplicates()
    }

    /// Counts keyed by classification code
    pub fn by_code(&self) -> BTreeMap<&'static str, usize> {
        QC_INSERTION_PRIORITY
            .iter()
            .map(|qc_type| (qc_type.code(), self.get(*qc_type)))
            .collect()
    }
}

/// Descriptive statistics over a sample list
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QaqcStatistics {
    pub total_samples: usize,
    pub regular_samples: usize,
    pub qc_samples: usize,
    /// QC samples as a percentage of all samples
    pub qc_percentage: f64,
    pub by_type: QcBreakdown,
}

impl QaqcStatistics {
    /// Get summary of QAQC statistics
    pub fn summary(&self) -> String {
        format!(
            "QAQC Summary: {} samples | {} regular | {} QC ({:.1}%) | \
             STD: {} | BLK: {} | FDUP: {} | PREPDUP: {}",
            self.total_samples,
            self.regular_samples,
            self.qc_samples,
            self.qc_percentage,
            self.by_type.standards,
            self.by_type.blanks,
            self.by_type.field_duplicates,
            self.by_type.prep_duplicates
        )
    }
}

/// Count regular and QC samples in a list
pub fn get_qaqc_statistics(samples: &[Sample]) -> QaqcStatistics {
    let mut by_type = QcBreakdown::default();
    for sample in samples {
        by_type.increment(sample.classification());
    }

    let total_samples = samples.len();
    let qc_samples = by_type.total();

    QaqcStatistics {
        total_samples,
        regular_samples: total_samples - qc_samples,
        qc_samples,
        qc_percentage: percentage(qc_samples, total_samples),
        by_type,
    }
}

/// Expected QC counts for a rule, without generating samples
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QaqcPreview {
    pub regular_samples: usize,
    pub expected_qc_samples: usize,
    pub expected_total_samples: usize,
    pub expected_qc_percentage: f64,
    pub by_type: QcBreakdown,
}

/// Estimate QC counts from a regular-sample count and a rule
///
/// Each enabled type contributes `regular_count / frequency` samples
/// (integer division). This matches a real insertion run when no existing
/// QC samples are supplied.
pub fn preview_qaqc_insertion(regular_count: usize, rule: &QaqcInsertionRule) -> QaqcPreview {
    let mut by_type = QcBreakdown::default();
    for qc_type in QC_INSERTION_PRIORITY {
        if let Some(frequency) = rule.frequency(qc_type) {
            let expected = regular_count / frequency as usize;
            match qc_type {
                SampleClassification::Blank => by_type.blanks = expected,
                SampleClassification::Standard => by_type.standards = expected,
                SampleClassification::PrepDuplicate => by_type.prep_duplicates = expected,
                SampleClassification::FieldDuplicate => by_type.field_duplicates = expected,
                SampleClassification::Original => {}
            }
        }
    }

    let expected_qc_samples = by_type.total();
    let expected_total_samples = regular_count + expected_qc_samples;

    QaqcPreview {
        regular_samples: regular_count,
        expected_qc_samples,
        expected_total_samples,
        expected_qc_percentage: percentage(expected_qc_samples, expected_total_samples),
        by_type,
    }
}

fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        (part as f64 / whole as f64) * 100.0
    }
}
