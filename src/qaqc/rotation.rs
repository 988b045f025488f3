//! Reference standard rotation
//!
//! Hands out standard identifiers in `SortOrder`. After the first full pass
//! the rotation loops forever over the tail starting at the entry flagged
//! as repeat start, or over the whole list when no entry is flagged.

use crate::models::StandardSequenceEntry;
use tracing::debug;

/// Stateful cycler over an ordered list of reference standards
///
/// Calls are order dependent; a single cycler must not be shared between
/// holes that should rotate independently.
#[derive(Debug, Clone)]
pub struct StandardRotationCycler {
    standards: Vec<String>,
    repeat_start: Option<usize>,
    cursor: usize,
    completed_first_cycle: bool,
}

impl StandardRotationCycler {
    /// Build a cycler, sorting entries by `SortOrder`
    pub fn new(mut entries: Vec<StandardSequenceEntry>) -> Self {
        entries.sort_by_key(|entry| entry.sort_order);
        let repeat_start = entries.iter().position(|entry| entry.is_repeat_start);

        debug!(
            "Standard rotation: {} entries, repeat start {:?}",
            entries.len(),
            repeat_start
        );

        Self {
            standards: entries.into_iter().map(|entry| entry.standard_id).collect(),
            repeat_start,
            cursor: 0,
            completed_first_cycle: false,
        }
    }

    /// Next standard id, or `None` when the rotation is empty
    pub fn next_standard(&mut self) -> Option<String> {
        let standard = self.standards.get(self.cursor)?.clone();
        self.cursor += 1;

        if self.cursor >= self.standards.len() {
            self.cursor = match self.repeat_start {
                Some(start) => {
                    self.completed_first_cycle = true;
                    start
                }
                None => 0,
            };
        }

        Some(standard)
    }

    /// Restart from the first entry of the full list
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.completed_first_cycle = false;
    }

    pub fn len(&self) -> usize {
        self.standards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.standards.is_empty()
    }

    /// Index of the repeat-start entry after sorting
    pub fn repeat_start(&self) -> Option<usize> {
        self.repeat_start
    }

    /// True once the full list has been handed out and the tail loop begun
    pub fn completed_first_cycle(&self) -> bool {
        self.completed_first_cycle
    }
}

impl Iterator for StandardRotationCycler {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        self.next_standard()
    }
}
