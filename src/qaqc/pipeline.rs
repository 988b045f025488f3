//! Per-hole QAQC pipeline orchestration
//!
//! Composes the core stages for one hole:
//!
//! 1. Split the hole's samples into regular samples and committed QC samples
//! 2. Insert new QC samples among the regular samples
//! 3. Merge the committed QC samples back in, in depth order
//! 4. Assign names to every sample not yet committed
//! 5. Validate the result and collect statistics

use crate::config::QaqcConfig;
use crate::error::Result;
use crate::models::{Sample, compare_depth};
use tracing::{debug, info};

use super::insertion::{InsertionSummary, insert_qaqc_samples};
use super::numbering::{NumberingResult, SampleNameGenerator, assign_sample_names};
use super::rotation::StandardRotationCycler;
use super::stats::{QaqcStatistics, get_qaqc_statistics};
use super::validation::{ValidationReport, validate_qaqc_insertion};

/// Result of running the pipeline over one hole
#[derive(Debug, Clone)]
pub struct PipelineResult {
    /// Regular, committed QC and new QC samples in depth order
    pub samples: Vec<Sample>,
    /// QC samples generated by this run
    pub insertion: InsertionSummary,
    /// Number of samples given a new name
    pub renamed: usize,
    /// Number of duplicate parent references refreshed
    pub links_updated: usize,
    pub report: ValidationReport,
    pub statistics: QaqcStatistics,
}

impl PipelineResult {
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    pub fn is_valid(&self) -> bool {
        self.report.is_valid()
    }

    pub fn summary(&self) -> String {
        format!(
            "{} | {} new QC samples | {} renamed",
            self.statistics.summary(),
            self.insertion.total(),
            self.renamed
        )
    }
}

/// QAQC pipeline for a single hole configuration
#[derive(Debug, Clone)]
pub struct QaqcPipeline {
    config: QaqcConfig,
}

impl QaqcPipeline {
    pub fn new(config: QaqcConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &QaqcConfig {
        &self.config
    }

    /// Run insertion, naming and validation over one hole's samples
    pub fn process_hole(&self, samples: Vec<Sample>) -> Result<PipelineResult> {
        let (regular, existing_qc) = split_samples(samples);
        info!(
            "Processing hole: {} regular samples, {} existing QC samples",
            regular.len(),
            existing_qc.len()
        );

        let mut cycler = self.standard_cycler();
        let insertion = insert_qaqc_samples(
            regular,
            &self.config.rule,
            &existing_qc,
            cycler.as_mut(),
        )?;

        let combined = merge_existing_qc(insertion.samples, existing_qc);

        let (samples, renamed, links_updated) = if self.config.renumber {
            let numbering = self.assign_names(combined);
            let renamed = numbering.renamed.len();
            (numbering.samples, renamed, numbering.links_updated)
        } else {
            debug!("Renumbering disabled, keeping existing names");
            (combined, 0, 0)
        };

        let report = validate_qaqc_insertion(&samples);
        let statistics = get_qaqc_statistics(&samples);

        Ok(PipelineResult {
            samples,
            insertion: insertion.summary,
            renamed,
            links_updated,
            report,
            statistics,
        })
    }

    /// Assign names only, without inserting QC samples
    pub fn assign_names(&self, samples: Vec<Sample>) -> NumberingResult {
        let mut generator = self.name_generator(&samples);
        assign_sample_names(samples, &mut generator)
    }

    /// Name generator for a hole, resuming after persisted names unless a
    /// start sequence is configured
    pub fn name_generator(&self, samples: &[Sample]) -> SampleNameGenerator {
        match self.config.start_sequence {
            Some(start) => SampleNameGenerator::new(
                self.config.rule.prefix.as_str(),
                self.config.hole_token.as_str(),
                start,
            ),
            None => SampleNameGenerator::resume_from(
                self.config.rule.prefix.as_str(),
                self.config.hole_token.as_str(),
                samples
                    .iter()
                    .filter(|sample| sample.is_persisted())
                    .map(|sample| sample.sample_nm.as_str()),
            ),
        }
    }

    fn standard_cycler(&self) -> Option<StandardRotationCycler> {
        if self.config.standards.is_empty() {
            None
        } else {
            Some(StandardRotationCycler::new(self.config.standards.clone()))
        }
    }
}

/// Separate regular samples from QC samples
pub fn split_samples(samples: Vec<Sample>) -> (Vec<Sample>, Vec<Sample>) {
    samples.into_iter().partition(|sample| !sample.is_qc())
}

/// Combine engine output with committed QC samples, in depth order
pub fn merge_existing_qc(generated: Vec<Sample>, existing_qc: Vec<Sample>) -> Vec<Sample> {
    let mut merged = generated;
    merged.extend(existing_qc);
    merged.sort_by(|a, b| compare_depth(a.depth_from, b.depth_from));
    merged
}

/// Drop QC samples that have not been committed
///
/// Regular samples and committed QC samples are kept, so the pipeline can be
/// rerun after a rule change.
pub fn remove_generated_qc(samples: Vec<Sample>) -> Vec<Sample> {
    let before = samples.len();
    let kept: Vec<Sample> = samples
        .into_iter()
        .filter(|sample| !sample.is_qc() || sample.is_persisted())
        .collect();
    debug!("Removed {} generated QC samples", before - kept.len());
    kept
}
