//! Parameter sweeps over ExceLint
//!
//! A sweep enumerates [`Configuration`]s, renders each one to an argument
//! list, runs the analyzer once per configuration and scrapes its true/false
//! positive counts. Everything runs sequentially; each child process is
//! waited on before the next configuration is built.
//!
//! - [`options`] - known flags and the two enumerators
//! - [`command`] - argv rendering
//! - [`scrape`] - pure text to counts extraction
//! - [`runner`] - subprocess invocation behind the [`ToolRunner`] trait
//! - [`report`] - results tables and console output
//! - [`driver`] - per-iteration routines tying it together
//!
//! [`Configuration`]: crate::models::Configuration

pub mod command;
pub mod driver;
pub mod options;
pub mod report;
pub mod runner;
pub mod scrape;

pub use driver::{run_flag_sweep, run_threshold_sweep, ThresholdScan};
pub use report::{Reporter, ResultsTable};
pub use runner::{ProcessRunner, ToolOutput, ToolRunner};

use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Errors that stop a sweep
#[derive(Error, Debug)]
pub enum SweepError {
    #[error("Too many options to sweep: {0} (power set needs fewer than 64)")]
    TooManyOptions(usize),

    #[error("Empty threshold range: start step {start} must be below end step {end}")]
    EmptyThresholdRange { start: i64, end: i64 },

    #[error("Failed to run {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} exited with status {code}: {command}")]
    ToolFailed { tool: String, code: i32, command: String },
}

/// What to do when the analyzer exits with a non-zero status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Scrape whatever was printed anyway
    #[default]
    Ignore,
    /// Drop the trial
    Skip,
    /// Stop the sweep
    Abort,
}

impl FromStr for FailurePolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ignore" => Ok(FailurePolicy::Ignore),
            "skip" => Ok(FailurePolicy::Skip),
            "abort" => Ok(FailurePolicy::Abort),
            _ => Err(anyhow::anyhow!(
                "Unknown failure policy '{}'. Valid policies: ignore, skip, abort",
                s
            )),
        }
    }
}

impl std::fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailurePolicy::Ignore => write!(f, "ignore"),
            FailurePolicy::Skip => write!(f, "skip"),
            FailurePolicy::Abort => write!(f, "abort"),
        }
    }
}

/// Settings shared by every trial of a sweep
#[derive(Debug, Clone)]
pub struct SweepSettings {
    /// Subjects directory handed to the analyzer unopened
    pub directory: PathBuf,
    pub max_categories: u32,
    pub on_failure: FailurePolicy,
    /// Print argument lists instead of running the analyzer
    pub dry_run: bool,
}

impl Default for SweepSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(options::DEFAULT_SUBJECTS_DIR),
            max_categories: options::DEFAULT_MAX_CATEGORIES,
            on_failure: FailurePolicy::default(),
            dry_run: false,
        }
    }
}
