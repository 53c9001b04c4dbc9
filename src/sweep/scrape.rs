//! Extract true/false positive counts from analyzer output
//!
//! The analyzer prints human-readable summary lines such as
//! `ExceLint true positives: 7`. A line containing a marker contributes the
//! first run of decimal digits found anywhere on it. Every line is scanned,
//! so a later marker line overrides an earlier one.

use crate::models::TrialCounts;
use regex::Regex;
use std::sync::OnceLock;
use tracing::warn;

pub const TRUE_POSITIVES_MARKER: &str = "ExceLint true positives";
pub const FALSE_POSITIVES_MARKER: &str = "ExceLint false positives";

static DIGITS: OnceLock<Regex> = OnceLock::new();

fn digits() -> &'static Regex {
    DIGITS.get_or_init(|| Regex::new(r"[0-9]+").unwrap())
}

/// First maximal run of digits on a line, if it parses as a count
fn first_number(line: &str) -> Option<u64> {
    let found = digits().find(line)?;
    match found.as_str().parse() {
        Ok(n) => Some(n),
        Err(e) => {
            warn!("Ignoring unparseable count '{}': {}", found.as_str(), e);
            None
        }
    }
}

/// Scrape both counters from captured output.
///
/// Missing markers leave the counter at zero.
pub fn scrape_counts(output: &str) -> TrialCounts {
    let mut counts = TrialCounts::default();
    for line in output.lines() {
        if line.contains(TRUE_POSITIVES_MARKER) {
            if let Some(n) = first_number(line) {
                counts.true_positives = n;
            }
        }
        if line.contains(FALSE_POSITIVES_MARKER) {
            if let Some(n) = first_number(line) {
                counts.false_positives = n;
            }
        }
    }
    counts
}
