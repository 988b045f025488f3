//! Preview command implementation

use crate::cli::args::PreviewArgs;
use crate::cli::commands::report::print_preview;
use crate::qaqc::preview_qaqc_insertion;
use anyhow::{Context, Result};

/// Print expected QC counts for a number of regular samples
pub fn run_preview(args: &PreviewArgs) -> Result<()> {
    let config = args
        .global
        .load_config()
        .context("Failed to load configuration")?;
    let preview = preview_qaqc_insertion(args.count, &config.rule);
    print_preview(&preview, args.global.output_format)
}
