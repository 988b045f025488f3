//! Sample name assignment and renumbering
//!
//! Names have the shape `prefix + hole token + zero-padded sequence`, for
//! example `S-DH001-00042`. Samples carrying a revision marker keep their
//! names; every other sample is renamed in depth order. Duplicates keep
//! pointing at their parent through the permanent `OriginalSampleId`, and
//! their displayed `OriginalSampleNm` is refreshed after renaming.

use crate::constants::{FIRST_SEQUENCE, SEQUENCE_PAD_WIDTH};
use crate::models::{Sample, compare_depth};
use regex::Regex;
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::{debug, info};

/// Hands out sequential, hole-scoped sample names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleNameGenerator {
    prefix: String,
    hole_token: String,
    next_sequence: u32,
}

impl SampleNameGenerator {
    pub fn new(prefix: impl Into<String>, hole_token: impl Into<String>, start_sequence: u32) -> Self {
        Self {
            prefix: prefix.into(),
            hole_token: hole_token.into(),
            next_sequence: start_sequence,
        }
    }

    /// Continue numbering after the highest sequence found in existing names
    ///
    /// Starts at 1 when no existing name matches the prefix and hole token.
    pub fn resume_from<'a, I>(prefix: impl Into<String>, hole_token: impl Into<String>, names: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut generator = Self::new(prefix, hole_token, FIRST_SEQUENCE);
        if let Some(max) = find_max_sequence(names, &generator.full_prefix()) {
            generator.next_sequence = max.saturating_add(1);
        }
        generator
    }

    /// Prefix and hole token as they appear in names
    pub fn full_prefix(&self) -> String {
        format!("{}{}", self.prefix, self.hole_token)
    }

    /// Sequence number the next name will use
    pub fn next_sequence(&self) -> u32 {
        self.next_sequence
    }

    /// Name the next call to [`Self::next_name`] will return
    pub fn peek(&self) -> String {
        format_sample_name(&self.full_prefix(), self.next_sequence)
    }

    pub fn next_name(&mut self) -> String {
        let name = self.peek();
        self.next_sequence = self.next_sequence.saturating_add(1);
        name
    }
}

/// Outcome of a naming pass
#[derive(Debug, Clone, Default)]
pub struct NumberingResult {
    /// All samples, in depth order
    pub samples: Vec<Sample>,
    /// Permanent sample id -> newly assigned name
    pub renamed: HashMap<String, String>,
    /// Number of duplicates whose parent name reference was refreshed
    pub links_updated: usize,
}

/// Format a name from a full prefix and a sequence number
pub fn format_sample_name(full_prefix: &str, sequence: u32) -> String {
    format!("{full_prefix}{sequence:0width$}", width = SEQUENCE_PAD_WIDTH)
}

fn sequence_pattern(full_prefix: &str) -> Option<Regex> {
    Regex::new(&format!(r"^{}(\d+)$", regex::escape(full_prefix))).ok()
}

fn capture_sequence(pattern: &Regex, name: &str) -> Option<u32> {
    pattern
        .captures(name)
        .and_then(|captures| captures.get(1))
        .and_then(|digits| digits.as_str().parse().ok())
}

/// Sequence number of a name with the given prefix, if it has that shape
pub fn extract_sequence(name: &str, full_prefix: &str) -> Option<u32> {
    let pattern = sequence_pattern(full_prefix)?;
    capture_sequence(&pattern, name)
}

/// True when a name is `full_prefix` followed only by digits
pub fn validate_sample_id(name: &str, full_prefix: &str) -> bool {
    extract_sequence(name, full_prefix).is_some()
}

/// Highest sequence number among names with the given prefix
pub fn find_max_sequence<'a, I>(names: I, full_prefix: &str) -> Option<u32>
where
    I: IntoIterator<Item = &'a str>,
{
    let pattern = sequence_pattern(full_prefix)?;
    names
        .into_iter()
        .filter_map(|name| capture_sequence(&pattern, name))
        .max()
}

/// Ordering used before numbering: depth, then name, then classification code
fn numbering_order(a: &Sample, b: &Sample) -> Ordering {
    compare_depth(a.depth_from, b.depth_from)
        .then_with(|| a.sample_nm.cmp(&b.sample_nm))
        .then_with(|| classification_code(a).cmp(classification_code(b)))
}

fn classification_code(sample: &Sample) -> &'static str {
    sample
        .sample_classification
        .map(|classification| classification.code())
        .unwrap_or("")
}

/// Assign names to every sample without a revision marker
///
/// Persisted samples keep their names. New names are handed out in
/// `(DepthFrom, SampleNm, SampleClassification)` order, the list is returned
/// in depth order, and duplicates whose parent was renamed get their
/// `OriginalSampleNm` refreshed. A duplicate whose parent is not in the list
/// is left unchanged.
pub fn assign_sample_names(
    mut samples: Vec<Sample>,
    generator: &mut SampleNameGenerator,
) -> NumberingResult {
    samples.sort_by(numbering_order);

    let (mut persisted, mut pending): (Vec<Sample>, Vec<Sample>) =
        samples.into_iter().partition(Sample::is_persisted);

    debug!(
        "Naming {} new samples ({} persisted samples keep their names), starting at {}",
        pending.len(),
        persisted.len(),
        generator.peek()
    );

    let mut renamed = HashMap::with_capacity(pending.len());
    for sample in &mut pending {
        let name = generator.next_name();
        renamed.insert(sample.sample_id.clone(), name.clone());
        sample.sample_nm = name;
    }

    persisted.append(&mut pending);
    let mut samples = persisted;
    samples.sort_by(|a, b| compare_depth(a.depth_from, b.depth_from));

    let links_updated = refresh_parent_names(&mut samples, &renamed);

    info!(
        "Sample naming complete: {} renamed, {} duplicate links updated",
        renamed.len(),
        links_updated
    );

    NumberingResult {
        samples,
        renamed,
        links_updated,
    }
}

/// Rename a hole's samples starting from an explicit sequence number
pub fn renumber_samples(
    samples: Vec<Sample>,
    prefix: &str,
    start_sequence: u32,
    hole_token: &str,
) -> NumberingResult {
    let mut generator = SampleNameGenerator::new(prefix, hole_token, start_sequence);
    assign_sample_names(samples, &mut generator)
}

/// Point duplicates at their parents' new names; returns the number updated
pub fn refresh_parent_names(samples: &mut [Sample], renamed: &HashMap<String, String>) -> usize {
    let mut updated = 0;
    for sample in samples.iter_mut() {
        let Some(new_name) = sample.parent_id().and_then(|id| renamed.get(id)) else {
            continue;
        };
        sample.original_sample_nm = Some(new_name.clone());
        updated += 1;
    }
    updated
}
