//! Command implementations for the QAQC CLI
//!
//! Dispatches subcommands, sets up logging, resolves input/output paths and
//! drives progress reporting for multi-hole runs.

pub mod insert;
pub mod preview;
pub mod report;
pub mod validate;

use crate::cli::args::{Args, Commands, GlobalOptions, default_output_dir, default_output_file};
use crate::io::discover_sample_files;
use anyhow::{Context, Result, bail};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Main command runner
pub fn run(args: Args) -> Result<()> {
    match args.command {
        Some(Commands::Insert(insert_args)) => {
            setup_logging(&insert_args.global)?;
            insert::run_insert(&insert_args)
        }
        Some(Commands::Renumber(renumber_args)) => {
            setup_logging(&renumber_args.global)?;
            insert::run_renumber(&renumber_args)
        }
        Some(Commands::Validate(validate_args)) => {
            setup_logging(&validate_args.global)?;
            validate::run_validate(&validate_args)
        }
        Some(Commands::Preview(preview_args)) => {
            setup_logging(&preview_args.global)?;
            preview::run_preview(&preview_args)
        }
        None => bail!("No command given; run with --help for usage"),
    }
}

/// Set up structured logging to stderr
pub fn setup_logging(options: &GlobalOptions) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = options.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("drillhole_qaqc={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init()
        .context("Failed to initialise logging")?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// One hole file to process and where its result goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoleJob {
    pub input: PathBuf,
    pub output: PathBuf,
}

/// Resolve an input file or directory into per-hole jobs
pub fn resolve_jobs(input: &Path, output: Option<&Path>) -> Result<Vec<HoleJob>> {
    if input.is_dir() {
        let output_dir = output
            .map(Path::to_path_buf)
            .unwrap_or_else(|| default_output_dir(input));
        let files = discover_sample_files(input)
            .with_context(|| format!("Failed to scan {}", input.display()))?;
        if files.is_empty() {
            bail!("No CSV or Parquet sample files found in {}", input.display());
        }

        Ok(files
            .into_iter()
            .map(|file| {
                let name = file.file_name().map(|n| n.to_os_string()).unwrap_or_default();
                HoleJob {
                    output: output_dir.join(name),
                    input: file,
                }
            })
            .collect())
    } else if input.is_file() {
        Ok(vec![HoleJob {
            input: input.to_path_buf(),
            output: output
                .map(Path::to_path_buf)
                .unwrap_or_else(|| default_output_file(input)),
        }])
    } else {
        bail!("Input not found: {}", input.display())
    }
}

/// Progress bar for multi-hole runs; hidden for a single hole or quiet mode
pub fn create_progress_bar(total: usize, options: &GlobalOptions) -> ProgressBar {
    if total <= 1 || options.quiet {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(total as u64);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} holes {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    pb.set_style(style);
    pb
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_jobs_for_directory() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("DH002.csv"), "SampleId,DepthFrom\n").unwrap();
        fs::write(temp_dir.path().join("DH001.csv"), "SampleId,DepthFrom\n").unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "ignored").unwrap();

        let jobs = resolve_jobs(temp_dir.path(), None).unwrap();
        assert_eq!(jobs.len(), 2);
        assert!(jobs[0].input.ends_with("DH001.csv"));
        assert_eq!(jobs[0].output, temp_dir.path().join("qaqc").join("DH001.csv"));
    }

    #[test]
    fn test_resolve_jobs_for_file() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("DH001.csv");
        fs::write(&input, "SampleId,DepthFrom\n").unwrap();

        let jobs = resolve_jobs(&input, None).unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].output, temp_dir.path().join("DH001_qaqc.csv"));
    }

    #[test]
    fn test_resolve_jobs_missing_input() {
        let temp_dir = TempDir::new().unwrap();
        assert!(resolve_jobs(&temp_dir.path().join("missing.csv"), None).is_err());
    }

    #[test]
    fn test_resolve_jobs_empty_directory() {
        let temp_dir = TempDir::new().unwrap();
        assert!(resolve_jobs(temp_dir.path(), None).is_err());
    }
}
