//! Validate command implementation

use crate::cli::args::ValidateArgs;
use crate::cli::commands::report::{HoleReport, print_hole_reports};
use crate::cli::commands::resolve_jobs;
use crate::io::read_samples;
use crate::qaqc::{get_qaqc_statistics, validate_qaqc_insertion};
use anyhow::{Context, Result, bail};
use tracing::info;

/// Validate one sample file or every sample file in a directory
///
/// Fails when any hole has errors, or warnings in strict mode.
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    let jobs = resolve_jobs(&args.input, None)?;
    let mut reports = Vec::with_capacity(jobs.len());

    for job in &jobs {
        let samples = read_samples(&job.input)
            .with_context(|| format!("Failed to read {}", job.input.display()))?;
        let report = validate_qaqc_insertion(&samples);
        info!(
            "{}: {} errors, {} warnings",
            job.input.display(),
            report.errors.len(),
            report.warnings.len()
        );

        let label = job
            .input
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| job.input.display().to_string());
        reports.push(HoleReport::from_validation(
            label,
            get_qaqc_statistics(&samples),
            report,
        ));
    }

    if !args.global.quiet {
        print_hole_reports("QAQC Validation", &reports, args.global.output_format)?;
    }

    let errors: usize = reports.iter().map(|r| r.errors.len()).sum();
    let warnings: usize = reports.iter().map(|r| r.warnings.len()).sum();
    if errors > 0 {
        bail!("Validation failed with {} errors", errors);
    }
    if args.strict && warnings > 0 {
        bail!("Validation failed with {} warnings (strict mode)", warnings);
    }
    Ok(())
}
