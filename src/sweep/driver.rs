//! Sweep loops
//!
//! Each outer iteration builds a fresh [`ResultsTable`] and hands it back to
//! its caller, which prints and drops it.

use super::command::render_args;
use super::options::{fixed_flag_configurations, threshold_scan, PowerSet};
use super::report::{Reporter, ResultsTable};
use super::runner::ToolRunner;
use super::scrape::scrape_counts;
use super::{FailurePolicy, SweepError, SweepSettings};
use crate::models::{Configuration, SuppressionOption, Threshold, TrialCounts};
use anyhow::{Context, Result};
use std::io::Write;
use tracing::{debug, info, warn};

/// Fixed flags scanned across reporting thresholds `step * i`, `i` in
/// `start..end`
#[derive(Debug, Clone)]
pub struct ThresholdScan {
    pub enabled: Vec<SuppressionOption>,
    pub step: f64,
    pub start: i64,
    pub end: i64,
    /// Trials per threshold; repeats share a key, so the last one is kept
    pub repeat: u32,
}

impl ThresholdScan {
    pub fn thresholds(&self) -> Result<Vec<Threshold>, SweepError> {
        threshold_scan(self.step, self.start, self.end)
    }
}

/// Run one configuration and record it unless nothing was reported.
///
/// Returns the recorded counts, or `None` when the trial was skipped.
fn run_trial<R: ToolRunner, W: Write>(
    runner: &mut R,
    reporter: &mut Reporter<W>,
    config: &Configuration,
    settings: &SweepSettings,
    show_threshold: bool,
    table: &mut ResultsTable,
) -> Result<Option<TrialCounts>> {
    let args = render_args(config, &settings.directory);

    if settings.dry_run {
        reporter.dry_run(&runner.describe(&args))?;
        return Ok(None);
    }

    let output = runner.run(&args)?;
    if !output.succeeded() {
        let code = output.return_code.unwrap_or(-1);
        match settings.on_failure {
            FailurePolicy::Ignore => {
                warn!("{} exited with status {}; using its output anyway", runner.name(), code);
            }
            FailurePolicy::Skip => {
                warn!("{} exited with status {}; skipping trial", runner.name(), code);
                return Ok(None);
            }
            FailurePolicy::Abort => {
                return Err(SweepError::ToolFailed {
                    tool: runner.name().to_string(),
                    code,
                    command: runner.describe(&args),
                }
                .into());
            }
        }
    }
    if !output.stderr.trim().is_empty() {
        debug!("{} stderr: {}", runner.name(), output.stderr.trim_end());
    }

    let counts = scrape_counts(&output.stdout);
    let key = config.option_string();
    if counts.total() == 0 {
        debug!("No positives reported for {:?}, skipping", key);
        return Ok(None);
    }

    reporter.trial(config, &counts, show_threshold)?;
    table.insert(key, counts);
    Ok(Some(counts))
}

fn warn_out_of_range(thresholds: &[Threshold]) {
    if let Some(t) = thresholds.iter().find(|t| !t.is_within_tool_range()) {
        warn!(
            "Reporting threshold {} is outside 0-100; ExceLint will clamp it",
            t
        );
    }
}

/// Try every on/off combination of `options` at a single threshold.
///
/// This is one outer iteration; the caller owns the returned table.
pub fn run_flag_sweep<R: ToolRunner, W: Write>(
    runner: &mut R,
    reporter: &mut Reporter<W>,
    options: Vec<SuppressionOption>,
    reporting_threshold: Threshold,
    settings: &SweepSettings,
) -> Result<ResultsTable> {
    warn_out_of_range(&[reporting_threshold]);
    let power_set = PowerSet::new(options, reporting_threshold, settings.max_categories)?;
    info!(
        "Sweeping {} flag combinations at reporting threshold {}",
        power_set.total(),
        reporting_threshold
    );

    let mut table = ResultsTable::new();
    for config in power_set {
        run_trial(runner, reporter, &config, settings, false, &mut table)
            .with_context(|| format!("Trial {:?} failed", config.option_string()))?;
    }
    info!("Recorded {} configurations", table.len());
    Ok(table)
}

/// One threshold value of a threshold scan
pub fn run_threshold_iteration<R: ToolRunner, W: Write>(
    runner: &mut R,
    reporter: &mut Reporter<W>,
    config: &Configuration,
    repeat: u32,
    settings: &SweepSettings,
) -> Result<ResultsTable> {
    let mut table = ResultsTable::new();
    for _ in 0..repeat.max(1) {
        run_trial(runner, reporter, config, settings, true, &mut table).with_context(|| {
            format!(
                "Trial at reporting threshold {} failed",
                config.reporting_threshold
            )
        })?;
    }
    Ok(table)
}

/// Hold the flag set fixed and scan reporting thresholds.
///
/// Prints and discards each threshold's table as soon as it is done.
/// Returns the number of thresholds visited.
pub fn run_threshold_sweep<R: ToolRunner, W: Write>(
    runner: &mut R,
    reporter: &mut Reporter<W>,
    scan: &ThresholdScan,
    settings: &SweepSettings,
) -> Result<usize> {
    let thresholds = scan.thresholds()?;
    warn_out_of_range(&thresholds);
    info!(
        "Scanning {} reporting thresholds with {} fixed flags",
        thresholds.len(),
        scan.enabled.len()
    );

    let configs = fixed_flag_configurations(&scan.enabled, &thresholds, settings.max_categories);
    for config in &configs {
        let table = run_threshold_iteration(runner, reporter, config, scan.repeat, settings)?;
        if !settings.dry_run {
            reporter.table(
                &format!("Results at reporting threshold {}", config.reporting_threshold),
                &table,
            )?;
        }
    }
    Ok(configs.len())
}
