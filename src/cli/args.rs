//! Command-line argument definitions for the QAQC tool
//!
//! Defines the CLI interface using the clap derive API. Every command reads
//! the per-hole configuration from a JSON file (`--config`), falling back to
//! the user config directory and then to built-in defaults.

use crate::config::QaqcConfig;
use crate::constants::DEFAULT_LOG_LEVEL;
use crate::error::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

/// CLI arguments for the drill hole QAQC tool
///
/// Inserts blanks, standards and duplicates into drill hole sample lists
/// and assigns depth-ordered sample names.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "drillhole-qaqc",
    version,
    about = "Insert QAQC samples into drill hole sample lists and assign sample names",
    long_about = "Reads drill hole sample intervals from CSV or Parquet files, inserts blank, \
                  standard and duplicate QC samples at configured frequencies, assigns stable \
                  depth-ordered sample names to uncommitted samples, and validates the result."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Insert QAQC samples and assign names (main command)
    Insert(InsertArgs),
    /// Assign names to uncommitted samples without inserting QC samples
    Renumber(RenumberArgs),
    /// Check a sample list for naming, linkage and ordering problems
    Validate(ValidateArgs),
    /// Estimate QC sample counts for a number of regular samples
    Preview(PreviewArgs),
}

/// Options shared by every command
#[derive(Debug, Clone, clap::Args)]
pub struct GlobalOptions {
    /// Path to configuration file
    ///
    /// JSON file holding the insertion rule, standard rotation and naming
    /// settings. If not specified, looks for
    /// <config dir>/drillhole-qaqc/config.json
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (JSON format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    /// Output format for reports
    #[arg(
        long = "format",
        value_enum,
        default_value = "human",
        help = "Output format for reports"
    )]
    pub output_format: OutputFormat,
}

impl GlobalOptions {
    /// Log level implied by the verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => DEFAULT_LOG_LEVEL,
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    /// Load the configuration these options point at
    pub fn load_config(&self) -> Result<QaqcConfig> {
        QaqcConfig::load_or_default(self.config_file.as_deref())
    }
}

/// Naming overrides shared by insert and renumber
#[derive(Debug, Clone, clap::Args)]
pub struct NamingOptions {
    /// Hole token placed between the prefix and the sequence number
    #[arg(long = "hole-token", value_name = "TOKEN")]
    pub hole_token: Option<String>,

    /// First sequence number for new names
    ///
    /// If not specified, numbering resumes after the highest sequence found
    /// in committed sample names, or starts at 1.
    #[arg(long = "start-sequence", value_name = "N")]
    pub start_sequence: Option<u32>,

    /// Identifier prefix, overriding the configured one
    #[arg(long = "prefix", value_name = "PREFIX")]
    pub prefix: Option<String>,
}

impl NamingOptions {
    /// Apply command-line overrides on top of a loaded configuration
    pub fn apply(&self, mut config: QaqcConfig) -> Result<QaqcConfig> {
        if let Some(token) = &self.hole_token {
            config.hole_token = token.clone();
        }
        if let Some(start) = self.start_sequence {
            config.start_sequence = Some(start);
        }
        if let Some(prefix) = &self.prefix {
            config.rule.prefix = prefix.clone();
        }
        config.validate()?;
        Ok(config)
    }
}

/// Arguments for the insert command
#[derive(Debug, Clone, Parser)]
pub struct InsertArgs {
    /// Sample file (CSV or Parquet) or a directory with one file per hole
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output file, or output directory when the input is a directory
    ///
    /// Defaults to <input stem>_qaqc.<ext> next to an input file, or a
    /// qaqc/ subdirectory of an input directory.
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Insert QC samples but keep existing names
    #[arg(long = "no-renumber", help = "Insert QC samples without assigning names")]
    pub no_renumber: bool,

    /// Show expected QC counts without writing output
    #[arg(long = "dry-run", help = "Show what would be inserted without writing output")]
    pub dry_run: bool,

    #[command(flatten)]
    pub naming: NamingOptions,

    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Arguments for the renumber command
#[derive(Debug, Clone, Parser)]
pub struct RenumberArgs {
    /// Sample file (CSV or Parquet) or a directory with one file per hole
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output file, or output directory when the input is a directory
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub naming: NamingOptions,

    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Arguments for the validate command
#[derive(Debug, Clone, Parser)]
pub struct ValidateArgs {
    /// Sample file (CSV or Parquet) or a directory with one file per hole
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Exit with an error when warnings are found, not only errors
    #[arg(long = "strict")]
    pub strict: bool,

    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Arguments for the preview command
#[derive(Debug, Clone, Parser)]
pub struct PreviewArgs {
    /// Number of regular samples in the hole
    #[arg(short = 'n', long = "count", value_name = "COUNT")]
    pub count: usize,

    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Output format options for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
    /// CSV format for data analysis
    Csv,
}

/// Default output path for a single input file
pub fn default_output_file(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_else(|| "samples".to_string());
    let extension = input
        .extension()
        .map(|ext| ext.to_string_lossy().to_string())
        .unwrap_or_else(|| "csv".to_string());
    input.with_file_name(format!("{stem}_qaqc.{extension}"))
}

/// Default output directory for a directory input
pub fn default_output_dir(input: &Path) -> PathBuf {
    input.join("qaqc")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_insert_command() {
        let args = Args::try_parse_from([
            "drillhole-qaqc",
            "insert",
            "hole.csv",
            "--hole-token",
            "DH7-",
            "--start-sequence",
            "10",
            "-vv",
        ])
        .unwrap();

        match args.command {
            Some(Commands::Insert(insert)) => {
                assert_eq!(insert.input, PathBuf::from("hole.csv"));
                assert_eq!(insert.naming.hole_token.as_deref(), Some("DH7-"));
                assert_eq!(insert.naming.start_sequence, Some(10));
                assert_eq!(insert.global.get_log_level(), "debug");
                assert!(!insert.dry_run);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        let result =
            Args::try_parse_from(["drillhole-qaqc", "validate", "hole.csv", "-q", "-v"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_preview_json() {
        let args = Args::try_parse_from([
            "drillhole-qaqc",
            "preview",
            "--count",
            "120",
            "--format",
            "json",
        ])
        .unwrap();
        match args.command {
            Some(Commands::Preview(preview)) => {
                assert_eq!(preview.count, 120);
                assert_eq!(preview.global.output_format, OutputFormat::Json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_default_output_file_keeps_extension() {
        assert_eq!(
            default_output_file(Path::new("/data/DH001.parquet")),
            PathBuf::from("/data/DH001_qaqc.parquet")
        );
        assert_eq!(
            default_output_file(Path::new("holes/DH002.csv")),
            PathBuf::from("holes/DH002_qaqc.csv")
        );
    }

    #[test]
    fn test_naming_overrides_applied() {
        let naming = NamingOptions {
            hole_token: Some("X-".to_string()),
            start_sequence: Some(5),
            prefix: Some("QC".to_string()),
        };
        let config = naming.apply(QaqcConfig::default()).unwrap();
        assert_eq!(config.name_prefix(), "QCX-");
        assert_eq!(config.start_sequence, Some(5));
    }
}
