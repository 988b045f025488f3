//! Error handling for QAQC insertion and sample naming.
//!
//! Data-quality findings (duplicate names, orphaned duplicates, unassigned
//! standards, depth-order violations) are not errors; they are reported as
//! diagnostic strings by [`crate::qaqc::validation`]. The variants here cover
//! programming invariant violations, bad configuration and tabular I/O.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QaqcError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Classification {classification} is not a QC sample type")]
    UnsupportedQcType { classification: String },

    #[error("Unknown sample classification: '{value}'")]
    UnknownClassification { value: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Data validation error: {message}")]
    DataValidation { message: String },

    #[error("Unsupported sample file format: {}", .path.display())]
    UnsupportedFormat { path: PathBuf },
}

impl QaqcError {
    /// Create an unsupported QC type error
    pub fn unsupported_qc_type(classification: impl Into<String>) -> Self {
        Self::UnsupportedQcType {
            classification: classification.into(),
        }
    }

    /// Create an unknown classification error
    pub fn unknown_classification(value: impl Into<String>) -> Self {
        Self::UnknownClassification {
            value: value.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a data validation error
    pub fn data_validation(message: impl Into<String>) -> Self {
        Self::DataValidation {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, QaqcError>;
