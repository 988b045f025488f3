//! Configuration management and validation.
//!
//! A [`QaqcConfig`] holds everything needed to process one hole: the QAQC
//! insertion rule, the standard rotation, and the naming settings used by
//! the identifier assigner.

use crate::constants::{CONFIG_DIR_NAME, CONFIG_FILE_NAME};
use crate::error::{QaqcError, Result};
use crate::models::{QaqcInsertionRule, StandardSequenceEntry};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Per-hole QAQC processing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QaqcConfig {
    /// QC frequencies and identifier prefix
    #[serde(default)]
    pub rule: QaqcInsertionRule,

    /// Reference standard rotation; empty means standards get no id
    #[serde(default)]
    pub standards: Vec<StandardSequenceEntry>,

    /// Hole-specific token placed between prefix and sequence number
    #[serde(default)]
    pub hole_token: String,

    /// First sequence number for new names; resumed from persisted names when absent
    #[serde(default)]
    pub start_sequence: Option<u32>,

    /// Assign names after insertion
    #[serde(default = "default_renumber")]
    pub renumber: bool,
}

fn default_renumber() -> bool {
    true
}

impl Default for QaqcConfig {
    fn default() -> Self {
        Self {
            rule: QaqcInsertionRule::default(),
            standards: Vec::new(),
            hole_token: String::new(),
            start_sequence: None,
            renumber: true,
        }
    }
}

impl QaqcConfig {
    /// Load and validate configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            QaqcError::configuration(format!(
                "Failed to read configuration file {}: {}",
                path.display(),
                e
            ))
        })?;

        let config: QaqcConfig = serde_json::from_str(&content)?;
        config.validate()?;

        debug!(
            "Loaded configuration from {} ({} standards, prefix '{}')",
            path.display(),
            config.standards.len(),
            config.rule.prefix
        );

        Ok(config)
    }

    /// Load from an explicit path, falling back to the default location,
    /// then to built-in defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }

        match Self::default_path() {
            Some(default_path) if default_path.exists() => Self::load(&default_path),
            _ => {
                debug!("No configuration file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Default configuration file location under the user config directory
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Check the configuration is usable
    pub fn validate(&self) -> Result<()> {
        if self.rule.prefix.trim().is_empty() {
            return Err(QaqcError::configuration(
                "Sample name prefix must not be empty",
            ));
        }

        if self.start_sequence == Some(0) {
            return Err(QaqcError::configuration(
                "Start sequence must be a positive integer",
            ));
        }

        let repeat_markers = self
            .standards
            .iter()
            .filter(|entry| entry.is_repeat_start)
            .count();
        if repeat_markers > 1 {
            debug!(
                "{} standards flagged as repeat start; the first in sort order is used",
                repeat_markers
            );
        }

        Ok(())
    }

    /// Set the insertion rule
    pub fn with_rule(mut self, rule: QaqcInsertionRule) -> Self {
        self.rule = rule;
        self
    }

    /// Set the standard rotation
    pub fn with_standards(mut self, standards: Vec<StandardSequenceEntry>) -> Self {
        self.standards = standards;
        self
    }

    /// Set the hole token used in generated names
    pub fn with_hole_token(mut self, hole_token: impl Into<String>) -> Self {
        self.hole_token = hole_token.into();
        self
    }

    /// Set an explicit starting sequence number
    pub fn with_start_sequence(mut self, start_sequence: u32) -> Self {
        self.start_sequence = Some(start_sequence);
        self
    }

    /// Skip the naming stage
    pub fn without_renumbering(mut self) -> Self {
        self.renumber = false;
        self
    }

    /// Name prefix including the hole token
    pub fn name_prefix(&self) -> String {
        format!("{}{}", self.rule.prefix, self.hole_token)
    }
}
