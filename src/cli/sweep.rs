//! Flag and threshold sweep commands

use crate::models::{SuppressionOption, Threshold};
use crate::sweep::{
    run_flag_sweep, run_threshold_sweep, ProcessRunner, Reporter, SweepSettings, ThresholdScan,
};
use anyhow::Result;
use std::io;
use tracing::info;

/// Power set of `options` at a single reporting threshold
pub fn run_flags(
    mut runner: ProcessRunner,
    settings: &SweepSettings,
    options: Vec<SuppressionOption>,
    reporting_threshold: Threshold,
) -> Result<()> {
    let stdout = io::stdout();
    let mut reporter = Reporter::new(stdout.lock());

    let table = run_flag_sweep(
        &mut runner,
        &mut reporter,
        options,
        reporting_threshold,
        settings,
    )?;
    if !settings.dry_run {
        reporter.table("Results", &table)?;
    }
    Ok(())
}

/// Fixed flags across a range of reporting thresholds
pub fn run_threshold(
    mut runner: ProcessRunner,
    settings: &SweepSettings,
    scan: &ThresholdScan,
) -> Result<()> {
    let stdout = io::stdout();
    let mut reporter = Reporter::new(stdout.lock());

    let visited = run_threshold_sweep(&mut runner, &mut reporter, scan, settings)?;
    info!("Threshold scan finished after {} thresholds", visited);
    Ok(())
}
