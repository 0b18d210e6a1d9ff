//! The conversion workflow: read, transform, summarise, write.

use crate::analysis::BatchSummary;
use crate::error::ConvertError;
use crate::profiles::{read_donors, write_records};
use crate::transform::{convert_batch, TransformOptions};
use indicatif::ProgressBar;
use std::path::PathBuf;
use tracing::info;

/// Everything needed to run one batch.
#[derive(Debug, Clone)]
pub struct BatchPlan {
    pub input: PathBuf,
    pub output: PathBuf,
    pub options: TransformOptions,
    /// Pretty-print the output file.
    pub pretty: bool,
    /// Skip writing the output file.
    pub dry_run: bool,
}

/// Runs a batch end to end.
///
/// Any read, decode, transform or write failure aborts the run; the output
/// file is only written once every record has been converted.
pub fn run_batch(plan: &BatchPlan, progress: &ProgressBar) -> Result<BatchSummary, ConvertError> {
    let donors = read_donors(&plan.input)?;
    info!(
        "Loaded {} donor profiles from {}",
        donors.len(),
        plan.input.display()
    );

    let records = convert_batch(&donors, &plan.options, progress)?;
    let summary = BatchSummary::from_batch(&donors, &records);

    if plan.dry_run {
        info!("Dry run: not writing {}", plan.output.display());
    } else {
        write_records(&records, &plan.output, plan.pretty)?;
        info!(
            "Wrote {} records to {}",
            records.len(),
            plan.output.display()
        );
    }

    Ok(summary)
}
