//! QAQC insertion engine
//!
//! Walks regular samples in depth order and, after each one, inserts the QC
//! sample types whose frequency has been reached. Existing committed QC
//! samples are only used to reset frequency counters; they are never copied
//! into the output, so merging them back is left to the caller.
//!
//! # Insertion Order
//!
//! QC samples triggered by the same regular sample are emitted immediately
//! after it in the order `STD, BLK, FDUP, PREPDUP`, each at the parent depth
//! plus [`QC_DEPTH_OFFSET`].

use crate::constants::{DEPTH_KEY_DECIMALS, QC_DEPTH_OFFSET, QC_INSERTION_PRIORITY};
use crate::error::{QaqcError, Result};
use crate::models::{QaqcInsertionRule, Sample, SampleClassification, compare_depth};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};
use uuid::Uuid;

use super::rotation::StandardRotationCycler;
use super::stats::QcBreakdown;

/// Depth rounded to the QC key precision, as an integer number of centimetres
pub type DepthKey = i64;

/// Newly generated samples interleaved with the regular samples, plus counts
#[derive(Debug, Clone)]
pub struct QaqcInsertionResult {
    /// Regular samples in depth order with new QC samples inserted
    pub samples: Vec<Sample>,
    /// Counts of newly generated QC samples
    pub summary: InsertionSummary,
}

/// Counts of QC samples generated by one insertion run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InsertionSummary {
    pub by_type: QcBreakdown,
    pub blanks: usize,
    pub standards: usize,
    /// Preparation plus field duplicates
    pub duplicates: usize,
}

impl InsertionSummary {
    fn from_breakdown(by_type: QcBreakdown) -> Self {
        Self {
            blanks: by_type.blanks,
            standards: by_type.standards,
            duplicates: by_type.duplicates(),
            by_type,
        }
    }

    /// Total number of generated QC samples
    pub fn total(&self) -> usize {
        self.by_type.total()
    }
}

/// Per-type "regular count at last insertion" bookkeeping
#[derive(Debug, Default)]
struct FrequencyCounters {
    regular_count: usize,
    last_insertion: HashMap<SampleClassification, usize>,
}

impl FrequencyCounters {
    fn reset(&mut self, qc_type: SampleClassification) {
        self.last_insertion.insert(qc_type, self.regular_count);
    }

    fn due(&self, qc_type: SampleClassification, frequency: u32) -> bool {
        let last = self.last_insertion.get(&qc_type).copied().unwrap_or(0);
        self.regular_count - last >= frequency as usize
    }
}

/// Round a depth to the QC key precision
pub fn round_depth(depth: f64) -> f64 {
    let scale = 10f64.powi(DEPTH_KEY_DECIMALS);
    (depth * scale).round() / scale
}

/// Key a depth for existing-QC lookups
pub fn depth_key(depth: f64) -> DepthKey {
    let scale = 10f64.powi(DEPTH_KEY_DECIMALS);
    (depth * scale).round() as DepthKey
}

/// Sort regular samples by depth, ties broken by name
///
/// Samples without `DepthFrom` sort last.
pub fn sort_regular_samples(samples: &mut [Sample]) {
    samples.sort_by(|a, b| {
        compare_depth(a.depth_from, b.depth_from).then_with(|| a.sample_nm.cmp(&b.sample_nm))
    });
}

/// Index existing QC samples by rounded depth
pub fn index_existing_qc(existing_qc: &[Sample]) -> HashMap<DepthKey, HashSet<SampleClassification>> {
    let mut index: HashMap<DepthKey, HashSet<SampleClassification>> = HashMap::new();

    for sample in existing_qc {
        let classification = sample.classification();
        if !classification.is_qc() {
            continue;
        }
        if let Some(depth) = sample.depth_from {
            index
                .entry(depth_key(depth))
                .or_default()
                .insert(classification);
        }
    }

    index
}

/// Build one QC sample from its triggering regular sample
///
/// Fails when asked to build a regular (`ORIG`) sample.
pub fn build_qc_sample(
    parent: &Sample,
    classification: SampleClassification,
    standard_id: Option<String>,
) -> Result<Sample> {
    let (standard_id, weight, original_sample_id, original_sample_nm) = match classification {
        SampleClassification::Original => {
            return Err(QaqcError::unsupported_qc_type(classification.code()));
        }
        SampleClassification::Standard => {
            (standard_id.filter(|id| !id.is_empty()), None, None, None)
        }
        SampleClassification::Blank => (None, None, None, None),
        SampleClassification::PrepDuplicate | SampleClassification::FieldDuplicate => (
            None,
            parent.weight,
            Some(parent.sample_id.clone()),
            Some(parent.sample_nm.clone()).filter(|name| !name.is_empty()),
        ),
    };

    Ok(Sample {
        sample_id: Uuid::new_v4().to_string(),
        sample_nm: String::new(),
        hole_id: parent.hole_id.clone(),
        depth_from: parent
            .depth_from
            .map(|depth| round_depth(depth + QC_DEPTH_OFFSET)),
        depth_to: None,
        sample_classification: Some(classification),
        original_sample_id,
        original_sample_nm,
        revision: None,
        sampled_by: parent.sampled_by.clone(),
        sample_method: parent.sample_method.clone(),
        weight,
        standard_id,
        comments: Some(format!(
            "{} inserted after {}",
            classification,
            parent.display_name()
        )),
    })
}

/// Interleave new QC samples among regular samples
///
/// # Arguments
///
/// * `regular_samples` - Regular samples for one hole, in any order
/// * `rule` - QC frequencies for the hole
/// * `existing_qc` - Already committed QC samples; used only to reset counters
/// * `cycler` - Standard rotation; standards get no id when absent
///
/// # Returns
///
/// The regular samples in depth order with generated QC samples inserted,
/// and the number of QC samples generated per type
pub fn insert_qaqc_samples(
    mut regular_samples: Vec<Sample>,
    rule: &QaqcInsertionRule,
    existing_qc: &[Sample],
    mut cycler: Option<&mut StandardRotationCycler>,
) -> Result<QaqcInsertionResult> {
    sort_regular_samples(&mut regular_samples);
    let existing_index = index_existing_qc(existing_qc);

    let active_types: Vec<(SampleClassification, u32)> = QC_INSERTION_PRIORITY
        .iter()
        .filter_map(|qc_type| rule.frequency(*qc_type).map(|f| (*qc_type, f)))
        .collect();

    info!(
        "Inserting QAQC samples among {} regular samples ({} QC types active, {} existing QC positions)",
        regular_samples.len(),
        active_types.len(),
        existing_index.len()
    );

    let mut counters = FrequencyCounters::default();
    let mut by_type = QcBreakdown::default();
    let mut output = Vec::with_capacity(regular_samples.len() + regular_samples.len() / 4);

    for mut sample in regular_samples {
        if sample.sample_classification.is_none() {
            sample.sample_classification = Some(SampleClassification::Original);
        }
        counters.regular_count += 1;

        if let Some(depth) = sample.depth_from {
            if let Some(found) = existing_index.get(&depth_key(depth + QC_DEPTH_OFFSET)) {
                for qc_type in found {
                    counters.reset(*qc_type);
                }
                debug!(
                    "Existing QC at {:.2} after {}: {:?}",
                    depth + QC_DEPTH_OFFSET,
                    sample.display_name(),
                    found
                );
            }
        }

        let mut due = Vec::new();
        for (qc_type, frequency) in &active_types {
            if counters.due(*qc_type, *frequency) {
                due.push(*qc_type);
                counters.reset(*qc_type);
            }
        }

        let mut generated = Vec::with_capacity(due.len());
        for qc_type in due {
            let standard_id = if qc_type == SampleClassification::Standard {
                Some(
                    cycler
                        .as_deref_mut()
                        .and_then(|c| c.next_standard())
                        .unwrap_or_default(),
                )
            } else {
                None
            };
            generated.push(build_qc_sample(&sample, qc_type, standard_id)?);
            by_type.increment(qc_type);
        }

        output.push(sample);
        output.extend(generated);
    }

    let summary = InsertionSummary::from_breakdown(by_type);
    info!(
        "QAQC insertion complete: {} standards, {} blanks, {} duplicates ({} samples total)",
        summary.standards,
        summary.blanks,
        summary.duplicates,
        output.len()
    );

    Ok(QaqcInsertionResult {
        samples: output,
        summary,
    })
}
