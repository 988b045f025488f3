//! Application constants for QAQC insertion
//!
//! Classification codes, depth offsets, naming widths and the tabular column
//! names shared by the core and the file reader/writer.

use crate::models::SampleClassification;

// =============================================================================
// Classification Codes
// =============================================================================

/// Sample classification codes as stored in sample tables
pub mod classification_codes {
    /// Regular (original) sample
    pub const ORIGINAL: &str = "ORIG";

    /// Blank - no analyte expected
    pub const BLANK: &str = "BLK";

    /// Certified reference standard
    pub const STANDARD: &str = "STD";

    /// Preparation duplicate
    pub const PREP_DUPLICATE: &str = "PREPDUP";

    /// Field duplicate
    pub const FIELD_DUPLICATE: &str = "FDUP";

    /// All known codes
    pub const ALL: &[&str] = &[
        ORIGINAL,
        BLANK,
        STANDARD,
        PREP_DUPLICATE,
        FIELD_DUPLICATE,
    ];
}

// =============================================================================
// Insertion Constants
// =============================================================================

/// Depth offset (metres) between a triggering sample and its QC siblings
pub const QC_DEPTH_OFFSET: f64 = 0.01;

/// Decimal places used when keying QC positions by depth
pub const DEPTH_KEY_DECIMALS: i32 = 2;

/// Order in which QC samples triggered by the same regular sample are emitted.
/// Standards and blanks precede duplicates.
pub const QC_INSERTION_PRIORITY: [SampleClassification; 4] = [
    SampleClassification::Standard,
    SampleClassification::Blank,
    SampleClassification::FieldDuplicate,
    SampleClassification::PrepDuplicate,
];

// =============================================================================
// Naming Constants
// =============================================================================

/// Zero-padded width of the sequence part of a sample name
pub const SEQUENCE_PAD_WIDTH: usize = 5;

/// Identifier prefix used when a rule does not specify one
pub const DEFAULT_SAMPLE_PREFIX: &str = "S";

/// First sequence number handed out for a hole with no named samples
pub const FIRST_SEQUENCE: u32 = 1;

// =============================================================================
// Tabular Column Names
// =============================================================================

/// Column names used when reading and writing sample tables
pub mod columns {
    pub const SAMPLE_ID: &str = "SampleId";
    pub const SAMPLE_NM: &str = "SampleNm";
    pub const HOLE_ID: &str = "HoleId";
    pub const DEPTH_FROM: &str = "DepthFrom";
    pub const DEPTH_TO: &str = "DepthTo";
    pub const CLASSIFICATION: &str = "SampleClassification";
    pub const ORIGINAL_SAMPLE_ID: &str = "OriginalSampleId";
    pub const ORIGINAL_SAMPLE_NM: &str = "OriginalSampleNm";
    pub const REVISION: &str = "rv";
    pub const SAMPLED_BY: &str = "SampledBy";
    pub const SAMPLE_METHOD: &str = "SampleMethod";
    pub const WEIGHT: &str = "Weight";
    pub const STANDARD_ID: &str = "StandardId";
    pub const COMMENTS: &str = "Comments";

    /// Columns that must be present in every input table
    pub const REQUIRED: &[&str] = &[SAMPLE_ID, DEPTH_FROM];
}

// =============================================================================
// File Handling
// =============================================================================

/// Sample file extensions recognised when scanning a directory
pub const SAMPLE_FILE_EXTENSIONS: &[&str] = &["csv", "parquet"];

/// Application directory name under the user config directory
pub const CONFIG_DIR_NAME: &str = "drillhole-qaqc";

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Default logging verbosity
pub const DEFAULT_LOG_LEVEL: &str = "warn";
