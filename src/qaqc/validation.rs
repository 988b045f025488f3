//! Post-insertion checks
//!
//! Every check returns human-readable findings and never fails; the caller
//! decides whether a finding blocks a commit. Unassigned standards are only
//! a warning because standard ids may be filled in by a user later.

use crate::models::{Sample, SampleClassification};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Findings from all checks over one sample list
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// True when no errors were found; warnings do not count
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn issue_count(&self) -> usize {
        self.errors.len() + self.warnings.len()
    }
}

/// Report every sample name used more than once
///
/// Unnamed samples are ignored.
pub fn check_duplicate_names(samples: &[Sample]) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order = Vec::new();

    for sample in samples {
        if sample.sample_nm.is_empty() {
            continue;
        }
        let count = counts.entry(sample.sample_nm.as_str()).or_insert(0);
        if *count == 0 {
            order.push(sample.sample_nm.as_str());
        }
        *count += 1;
    }

    order
        .into_iter()
        .filter_map(|name| {
            let count = counts[name];
            (count > 1).then(|| format!("Duplicate sample name '{}' used {} times", name, count))
        })
        .collect()
}

/// Report duplicates that do not reference a parent sample
pub fn check_orphaned_duplicates(samples: &[Sample]) -> Vec<String> {
    samples
        .iter()
        .filter(|sample| sample.is_duplicate() && sample.parent_id().is_none())
        .map(|sample| {
            format!(
                "{} sample '{}' has no OriginalSampleId",
                sample.classification(),
                sample.display_name()
            )
        })
        .collect()
}

/// Single aggregate warning when standards have no standard id
pub fn check_unassigned_standards(samples: &[Sample]) -> Vec<String> {
    let unassigned = samples
        .iter()
        .filter(|sample| sample.classification() == SampleClassification::Standard)
        .filter(|sample| sample.standard_id.as_deref().is_none_or(str::is_empty))
        .count();

    if unassigned == 0 {
        Vec::new()
    } else {
        vec![format!(
            "{} standard sample(s) have no StandardId assigned",
            unassigned
        )]
    }
}

/// Report samples shallower than the sample before them, in list order
///
/// Samples without `DepthFrom` are skipped.
pub fn check_depth_order(samples: &[Sample]) -> Vec<String> {
    let mut findings = Vec::new();
    let mut previous: Option<(&Sample, f64)> = None;

    for sample in samples {
        let Some(depth) = sample.depth_from else {
            continue;
        };
        if let Some((previous_sample, previous_depth)) = previous {
            if depth < previous_depth {
                findings.push(format!(
                    "Sample '{}' at {:.2}m is out of depth order (follows '{}' at {:.2}m)",
                    sample.display_name(),
                    depth,
                    previous_sample.display_name(),
                    previous_depth
                ));
            }
        }
        previous = Some((sample, depth));
    }

    findings
}

/// Run every check over a sample list
pub fn validate_qaqc_insertion(samples: &[Sample]) -> ValidationReport {
    let mut report = ValidationReport::default();

    report.errors.extend(check_duplicate_names(samples));
    report.errors.extend(check_orphaned_duplicates(samples));
    report.errors.extend(check_depth_order(samples));
    report.warnings.extend(check_unassigned_standards(samples));

    if report.is_valid() {
        debug!(
            "Validation passed for {} samples ({} warnings)",
            samples.len(),
            report.warnings.len()
        );
    } else {
        warn!(
            "Validation found {} errors and {} warnings in {} samples",
            report.errors.len(),
            report.warnings.len(),
            samples.len()
        );
    }

    report
}
