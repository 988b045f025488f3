//! Core data structures for drill hole sampling and QAQC insertion.
//!
//! Defines the sample record, its classification, the per-hole insertion
//! rule and the standard rotation entries consumed by the core.

use crate::constants::{DEFAULT_SAMPLE_PREFIX, classification_codes};
use crate::error::{QaqcError, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Sample classification: one regular type and four QC types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SampleClassification {
    #[serde(rename = "ORIG")]
    Original,
    #[serde(rename = "BLK")]
    Blank,
    #[serde(rename = "STD")]
    Standard,
    #[serde(rename = "PREPDUP")]
    PrepDuplicate,
    #[serde(rename = "FDUP")]
    FieldDuplicate,
}

impl SampleClassification {
    /// Code as stored in sample tables
    pub fn code(&self) -> &'static str {
        match self {
            SampleClassification::Original => classification_codes::ORIGINAL,
            SampleClassification::Blank => classification_codes::BLANK,
            SampleClassification::Standard => classification_codes::STANDARD,
            SampleClassification::PrepDuplicate => classification_codes::PREP_DUPLICATE,
            SampleClassification::FieldDuplicate => classification_codes::FIELD_DUPLICATE,
        }
    }

    /// True for blanks, standards and duplicates
    pub fn is_qc(&self) -> bool {
        !matches!(self, SampleClassification::Original)
    }

    /// True for preparation and field duplicates
    pub fn is_duplicate(&self) -> bool {
        matches!(
            self,
            SampleClassification::PrepDuplicate | SampleClassification::FieldDuplicate
        )
    }
}

impl fmt::Display for SampleClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for SampleClassification {
    type Err = QaqcError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            classification_codes::ORIGINAL => Ok(SampleClassification::Original),
            classification_codes::BLANK => Ok(SampleClassification::Blank),
            classification_codes::STANDARD => Ok(SampleClassification::Standard),
            classification_codes::PREP_DUPLICATE => Ok(SampleClassification::PrepDuplicate),
            classification_codes::FIELD_DUPLICATE => Ok(SampleClassification::FieldDuplicate),
            _ => Err(QaqcError::unknown_classification(s)),
        }
    }
}

/// A depth interval belonging to a drill hole
///
/// `sample_id` is permanent. `sample_nm` is only ever written by the
/// identifier assigner, and only for samples without a revision marker.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Sample {
    pub sample_id: String,
    #[serde(default)]
    pub sample_nm: String,
    #[serde(default)]
    pub hole_id: Option<String>,
    #[serde(default)]
    pub depth_from: Option<f64>,
    #[serde(default)]
    pub depth_to: Option<f64>,
    #[serde(default)]
    pub sample_classification: Option<SampleClassification>,
    #[serde(default)]
    pub original_sample_id: Option<String>,
    #[serde(default)]
    pub original_sample_nm: Option<String>,
    /// Persistence revision marker; present once the sample has been committed
    #[serde(default, rename = "rv")]
    pub revision: Option<String>,
    #[serde(default)]
    pub sampled_by: Option<String>,
    #[serde(default)]
    pub sample_method: Option<String>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub standard_id: Option<String>,
    #[serde(default)]
    pub comments: Option<String>,
}

impl Sample {
    /// Create a sample with an identity and a depth interval
    pub fn new(sample_id: impl Into<String>, depth_from: f64, depth_to: f64) -> Self {
        Self {
            sample_id: sample_id.into(),
            depth_from: Some(depth_from),
            depth_to: Some(depth_to),
            ..Default::default()
        }
    }

    /// Classification, defaulting to a regular sample when unset
    pub fn classification(&self) -> SampleClassification {
        self.sample_classification
            .unwrap_or(SampleClassification::Original)
    }

    /// True once the sample has been committed to storage
    pub fn is_persisted(&self) -> bool {
        self.revision.as_deref().is_some_and(|rv| !rv.is_empty())
    }

    pub fn is_qc(&self) -> bool {
        self.classification().is_qc()
    }

    pub fn is_duplicate(&self) -> bool {
        self.classification().is_duplicate()
    }

    /// Name if assigned, otherwise the permanent id; used in diagnostics
    pub fn display_name(&self) -> &str {
        if self.sample_nm.is_empty() {
            &self.sample_id
        } else {
            &self.sample_nm
        }
    }

    /// Parent id for duplicates, treating empty strings as absent
    pub fn parent_id(&self) -> Option<&str> {
        self.original_sample_id
            .as_deref()
            .filter(|id| !id.is_empty())
    }
}

/// Compare optional depths ascending, with missing depths sorting last
pub fn compare_depth(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Per-hole QAQC insertion configuration
///
/// A frequency of `n` inserts one QC sample of that type after every `n`
/// regular samples. Missing or zero frequencies disable the type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct QaqcInsertionRule {
    #[serde(default)]
    pub blank_frequency: Option<u32>,
    #[serde(default)]
    pub standard_frequency: Option<u32>,
    #[serde(default)]
    pub prep_dup_frequency: Option<u32>,
    #[serde(default)]
    pub f_dup_frequency: Option<u32>,
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

fn default_prefix() -> String {
    DEFAULT_SAMPLE_PREFIX.to_string()
}

impl Default for QaqcInsertionRule {
    fn default() -> Self {
        Self {
            blank_frequency: None,
            standard_frequency: None,
            prep_dup_frequency: None,
            f_dup_frequency: None,
            prefix: default_prefix(),
        }
    }
}

impl QaqcInsertionRule {
    pub fn with_blank_frequency(mut self, frequency: u32) -> Self {
        self.blank_frequency = Some(frequency);
        self
    }

    pub fn with_standard_frequency(mut self, frequency: u32) -> Self {
        self.standard_frequency = Some(frequency);
        self
    }

    pub fn with_prep_dup_frequency(mut self, frequency: u32) -> Self {
        self.prep_dup_frequency = Some(frequency);
        self
    }

    pub fn with_f_dup_frequency(mut self, frequency: u32) -> Self {
        self.f_dup_frequency = Some(frequency);
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Effective frequency for a QC type; `None` when disabled
    pub fn frequency(&self, classification: SampleClassification) -> Option<u32> {
        let frequency = match classification {
            SampleClassification::Original => None,
            SampleClassification::Blank => self.blank_frequency,
            SampleClassification::Standard => self.standard_frequency,
            SampleClassification::PrepDuplicate => self.prep_dup_frequency,
            SampleClassification::FieldDuplicate => self.f_dup_frequency,
        };
        frequency.filter(|f| *f > 0)
    }

    /// True when at least one QC type is enabled
    pub fn has_any_frequency(&self) -> bool {
        crate::constants::QC_INSERTION_PRIORITY
            .iter()
            .any(|qc_type| self.frequency(*qc_type).is_some())
    }
}

/// One entry in the reference standard rotation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StandardSequenceEntry {
    pub standard_id: String,
    pub sort_order: i32,
    #[serde(default)]
    pub is_repeat_start: bool,
}

impl StandardSequenceEntry {
    pub fn new(standard_id: impl Into<String>, sort_order: i32) -> Self {
        Self {
            standard_id: standard_id.into(),
            sort_order,
            is_repeat_start: false,
        }
    }

    /// Mark this entry as the start of the repeating tail
    pub fn repeat_start(mut self) -> Self {
        self.is_repeat_start = true;
        self
    }
}
