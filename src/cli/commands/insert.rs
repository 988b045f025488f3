//! Insert and renumber command implementations

use crate::cli::args::{InsertArgs, OutputFormat, RenumberArgs};
use crate::cli::commands::report::{HoleReport, print_hole_reports, print_preview};
use crate::cli::commands::{HoleJob, create_progress_bar, resolve_jobs};
use crate::io::{read_samples, write_samples};
use crate::models::QaqcInsertionRule;
use crate::qaqc::{QaqcPipeline, get_qaqc_statistics, preview_qaqc_insertion, validate_qaqc_insertion};
use anyhow::{Context, Result};
use colored::*;
use tracing::{info, warn};

/// Insert QC samples into every hole and write the results
pub fn run_insert(args: &InsertArgs) -> Result<()> {
    let mut config = args
        .naming
        .apply(args.global.load_config().context("Failed to load configuration")?)
        .context("Invalid naming options")?;
    if args.no_renumber {
        config.renumber = false;
    }
    if !config.rule.has_any_frequency() {
        warn!("No QC frequencies configured; samples will only be renamed");
    }

    let jobs = resolve_jobs(&args.input, args.output.as_deref())?;

    if args.dry_run {
        return preview_jobs(&jobs, &config.rule, args);
    }

    let pipeline = QaqcPipeline::new(config);
    let pb = create_progress_bar(jobs.len(), &args.global);
    let mut reports = Vec::with_capacity(jobs.len());

    for job in &jobs {
        pb.set_message(file_label(job));
        let samples = read_samples(&job.input)
            .with_context(|| format!("Failed to read {}", job.input.display()))?;
        let result = pipeline
            .process_hole(samples)
            .with_context(|| format!("QAQC insertion failed for {}", job.input.display()))?;

        write_samples(&job.output, &result.samples)
            .with_context(|| format!("Failed to write {}", job.output.display()))?;
        info!("{} -> {}: {}", job.input.display(), job.output.display(), result.summary());

        reports.push(HoleReport::from_pipeline(file_label(job), &result));
        pb.inc(1);
    }
    pb.finish_and_clear();

    if !args.global.quiet {
        print_hole_reports("QAQC Insertion Complete", &reports, args.global.output_format)?;
    }
    Ok(())
}

fn preview_jobs(
    jobs: &[HoleJob],
    rule: &QaqcInsertionRule,
    args: &InsertArgs,
) -> Result<()> {
    for job in jobs {
        let samples = read_samples(&job.input)
            .with_context(|| format!("Failed to read {}", job.input.display()))?;
        let regular = samples.iter().filter(|sample| !sample.is_qc()).count();
        let preview = preview_qaqc_insertion(regular, rule);

        if args.global.output_format == OutputFormat::Human {
            println!(
                "\n{} {}",
                "Dry run:".yellow().bold(),
                job.input.display().to_string().bright_white()
            );
        }
        print_preview(&preview, args.global.output_format)?;
    }
    Ok(())
}

/// Assign names to uncommitted samples without inserting QC samples
pub fn run_renumber(args: &RenumberArgs) -> Result<()> {
    let config = args
        .naming
        .apply(args.global.load_config().context("Failed to load configuration")?)
        .context("Invalid naming options")?;
    let pipeline = QaqcPipeline::new(config);

    let jobs = resolve_jobs(&args.input, args.output.as_deref())?;
    let pb = create_progress_bar(jobs.len(), &args.global);
    let mut reports = Vec::with_capacity(jobs.len());

    for job in &jobs {
        pb.set_message(file_label(job));
        let samples = read_samples(&job.input)
            .with_context(|| format!("Failed to read {}", job.input.display()))?;

        let numbering = pipeline.assign_names(samples);
        write_samples(&job.output, &numbering.samples)
            .with_context(|| format!("Failed to write {}", job.output.display()))?;

        let mut report = HoleReport::from_validation(
            file_label(job),
            get_qaqc_statistics(&numbering.samples),
            validate_qaqc_insertion(&numbering.samples),
        );
        report.renamed = numbering.renamed.len();
        report.links_updated = numbering.links_updated;
        reports.push(report);
        pb.inc(1);
    }
    pb.finish_and_clear();

    if !args.global.quiet {
        print_hole_reports("Renumbering Complete", &reports, args.global.output_format)?;
    }
    Ok(())
}

fn file_label(job: &HoleJob) -> String {
    job.input
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| job.input.display().to_string())
}
