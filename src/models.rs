//! Core data models for the sweep harness
//!
//! These models describe one point in the sweep (a [`Configuration`]) and
//! what the analyzer reported for it (a [`TrialCounts`]).

use std::fmt;

/// A named boolean suppression flag understood by ExceLint.
///
/// Names are passed through verbatim; no validation is performed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SuppressionOption(String);

impl SuppressionOption {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    /// The command-line token that enables this flag (`--<name>=1`)
    pub fn enable_flag(&self) -> String {
        format!("--{}=1", self.0)
    }
}

impl fmt::Display for SuppressionOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SuppressionOption {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for SuppressionOption {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Reporting threshold passed to the analyzer.
///
/// Renders in its natural decimal form: integral values keep a single
/// trailing `.0` (`23.0`), fractional values use the shortest round-trip
/// representation (`22.5`).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Threshold(f64);

impl Threshold {
    pub fn new(value: f64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// The analyzer clamps thresholds to this range
    pub fn is_within_tool_range(&self) -> bool {
        (0.0..=100.0).contains(&self.0)
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0.0 {
            // covers -0.0
            f.write_str("0.0")
        } else if self.0.is_finite() && self.0.fract() == 0.0 {
            write!(f, "{:.1}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// One point of the sweep: the enabled suppression flags plus the numeric
/// settings handed to the analyzer.
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    /// Enabled flags, in the order of the option list they were drawn from
    pub enabled: Vec<SuppressionOption>,
    pub reporting_threshold: Threshold,
    pub max_categories: u32,
}

impl Configuration {
    /// Render the enabled flags as the key used in results tables.
    ///
    /// Each flag is preceded by a single space: `" --a=1 --b=1"`.
    /// No enabled flags renders as the empty string.
    pub fn option_string(&self) -> String {
        self.enabled
            .iter()
            .map(|opt| format!(" {}", opt.enable_flag()))
            .collect()
    }

    pub fn is_enabled(&self, name: &str) -> bool {
        self.enabled.iter().any(|opt| opt.name() == name)
    }
}

/// True/false positive counts scraped from one analyzer run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrialCounts {
    pub true_positives: u64,
    pub false_positives: u64,
}

impl TrialCounts {
    pub fn new(true_positives: u64, false_positives: u64) -> Self {
        Self {
            true_positives,
            false_positives,
        }
    }

    /// Total reported positives
    pub fn total(&self) -> u64 {
        self.true_positives + self.false_positives
    }

    /// `tp / (tp + fp)`, or `None` when nothing was reported
    pub fn effectiveness(&self) -> Option<f64> {
        match self.total() {
            0 => None,
            total => Some(self.true_positives as f64 / total as f64),
        }
    }
}
