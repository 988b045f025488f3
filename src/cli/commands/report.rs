//! Report rendering for CLI commands
//!
//! Per-hole results are collected into [`HoleReport`]s and printed as
//! human-readable text, JSON or CSV.

use crate::cli::args::OutputFormat;
use crate::qaqc::{PipelineResult, QaqcPreview, QaqcStatistics, QcBreakdown, ValidationReport};
use anyhow::Result;
use chrono::Utc;
use colored::*;
use serde::Serialize;

/// Outcome of one command for one hole
#[derive(Debug, Clone, Serialize)]
pub struct HoleReport {
    pub file: String,
    pub statistics: QaqcStatistics,
    /// QC samples generated by this run
    pub inserted: QcBreakdown,
    pub renamed: usize,
    pub links_updated: usize,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl HoleReport {
    pub fn from_pipeline(file: impl Into<String>, result: &PipelineResult) -> Self {
        Self {
            file: file.into(),
            statistics: result.statistics.clone(),
            inserted: result.insertion.by_type,
            renamed: result.renamed,
            links_updated: result.links_updated,
            errors: result.report.errors.clone(),
            warnings: result.report.warnings.clone(),
        }
    }

    pub fn from_validation(
        file: impl Into<String>,
        statistics: QaqcStatistics,
        report: ValidationReport,
    ) -> Self {
        Self {
            file: file.into(),
            statistics,
            inserted: QcBreakdown::default(),
            renamed: 0,
            links_updated: 0,
            errors: report.errors,
            warnings: report.warnings,
        }
    }
}

/// Print per-hole reports in the requested format
pub fn print_hole_reports(title: &str, reports: &[HoleReport], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Human => print_human_reports(title, reports),
        OutputFormat::Json => print_json(&serde_json::json!({
            "generated_at": Utc::now().to_rfc3339(),
            "holes": reports,
        })),
        OutputFormat::Csv => {
            print_csv_reports(reports);
            Ok(())
        }
    }
}

fn print_human_reports(title: &str, reports: &[HoleReport]) -> Result<()> {
    println!("\n{}", title.bright_green().bold());

    for report in reports {
        let stats = &report.statistics;
        println!("\n  {}", report.file.bright_white().bold());
        println!(
            "  {} {} ({} regular, {} QC, {:.1}%)",
            "Samples:".bright_cyan(),
            stats.total_samples.to_string().bright_white(),
            stats.regular_samples,
            stats.qc_samples,
            stats.qc_percentage
        );
        println!(
            "  {} STD {} | BLK {} | FDUP {} | PREPDUP {}",
            "QC by type:".bright_cyan(),
            stats.by_type.standards,
            stats.by_type.blanks,
            stats.by_type.field_duplicates,
            stats.by_type.prep_duplicates
        );
        if report.inserted.total() > 0 {
            println!(
                "  {} {}",
                "Inserted:".bright_cyan(),
                report.inserted.total().to_string().bright_white().bold()
            );
        }
        if report.renamed > 0 {
            println!(
                "  {} {} ({} duplicate links updated)",
                "Renamed:".bright_cyan(),
                report.renamed.to_string().bright_white(),
                report.links_updated
            );
        }
        for error in &report.errors {
            println!("  {} {}", "error:".bright_red().bold(), error);
        }
        for warning in &report.warnings {
            println!("  {} {}", "warning:".yellow(), warning);
        }
    }

    let errors: usize = reports.iter().map(|r| r.errors.len()).sum();
    let warnings: usize = reports.iter().map(|r| r.warnings.len()).sum();
    println!();
    if errors == 0 {
        println!(
            "{} {} holes, {} warnings",
            "OK".bright_green().bold(),
            reports.len(),
            warnings
        );
    } else {
        println!(
            "{} {} errors, {} warnings across {} holes",
            "FAILED".bright_red().bold(),
            errors,
            warnings,
            reports.len()
        );
    }

    Ok(())
}

fn print_csv_reports(reports: &[HoleReport]) {
    println!(
        "file,total_samples,regular_samples,qc_samples,qc_percentage,standards,blanks,field_duplicates,prep_duplicates,inserted,renamed,errors,warnings"
    );
    for report in reports {
        let stats = &report.statistics;
        println!(
            "{},{},{},{},{:.2},{},{},{},{},{},{},{},{}",
            report.file,
            stats.total_samples,
            stats.regular_samples,
            stats.qc_samples,
            stats.qc_percentage,
            stats.by_type.standards,
            stats.by_type.blanks,
            stats.by_type.field_duplicates,
            stats.by_type.prep_duplicates,
            report.inserted.total(),
            report.renamed,
            report.errors.len(),
            report.warnings.len()
        );
    }
}

/// Print an insertion preview in the requested format
pub fn print_preview(preview: &QaqcPreview, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Human => {
            println!("\n{}", "QAQC Insertion Preview".bright_green().bold());
            println!(
                "  {} {}",
                "Regular samples:".bright_cyan(),
                preview.regular_samples.to_string().bright_white()
            );
            for (code, count) in preview.by_type.by_code() {
                println!("  {:<17}{}", format!("{code}:").bright_cyan(), count);
            }
            println!(
                "  {} {} ({:.1}% of {} total)",
                "Expected QC:".bright_cyan(),
                preview.expected_qc_samples.to_string().bright_white().bold(),
                preview.expected_qc_percentage,
                preview.expected_total_samples
            );
            Ok(())
        }
        OutputFormat::Json => print_json(&serde_json::json!({
            "generated_at": Utc::now().to_rfc3339(),
            "preview": preview,
        })),
        OutputFormat::Csv => {
            println!("metric,value");
            println!("regular_samples,{}", preview.regular_samples);
            for (code, count) in preview.by_type.by_code() {
                println!("{},{}", code, count);
            }
            println!("expected_qc_samples,{}", preview.expected_qc_samples);
            println!("expected_total_samples,{}", preview.expected_total_samples);
            println!("expected_qc_percentage,{:.2}", preview.expected_qc_percentage);
            Ok(())
        }
    }
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
