//! Results tables and console reporting
//!
//! Each recorded trial prints one line that is flushed right away, so a long
//! sweep can be followed while it runs. At the end of an outer iteration the
//! whole [`ResultsTable`] is dumped, followed by the best configuration.

use crate::models::{Configuration, TrialCounts};
use anyhow::Result;
use console::style;
use std::collections::BTreeMap;
use std::io::Write;

/// Trial counts keyed by rendered option string.
///
/// Inserting an existing key replaces its counts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultsTable {
    entries: BTreeMap<String, TrialCounts>,
}

impl ResultsTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record counts, returning the ones they replaced
    pub fn insert(&mut self, key: impl Into<String>, counts: TrialCounts) -> Option<TrialCounts> {
        self.entries.insert(key.into(), counts)
    }

    pub fn get(&self, key: &str) -> Option<&TrialCounts> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TrialCounts)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Entry with the highest effectiveness.
    ///
    /// Ties go to more true positives, then to the smaller key.
    pub fn best(&self) -> Option<(&str, &TrialCounts)> {
        let mut best: Option<(&str, &TrialCounts, f64)> = None;
        for (key, counts) in self.iter() {
            let Some(eff) = counts.effectiveness() else {
                continue;
            };
            let better = match best {
                None => true,
                Some((_, b, b_eff)) => {
                    eff > b_eff || (eff == b_eff && counts.true_positives > b.true_positives)
                }
            };
            if better {
                best = Some((key, counts, eff));
            }
        }
        best.map(|(key, counts, _)| (key, counts))
    }
}

/// Writes sweep progress to a sink (stdout in the CLI)
pub struct Reporter<W: Write> {
    out: W,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// One recorded trial: effectiveness, threshold (when swept), option
    /// string, true positives, false positives
    pub fn trial(
        &mut self,
        config: &Configuration,
        counts: &TrialCounts,
        show_threshold: bool,
    ) -> Result<()> {
        let eff = counts.effectiveness().unwrap_or(0.0);
        if show_threshold {
            writeln!(
                self.out,
                "{:.4} {} {:?} {} {}",
                eff,
                config.reporting_threshold,
                config.option_string(),
                counts.true_positives,
                counts.false_positives
            )?;
        } else {
            writeln!(
                self.out,
                "{:.4} {:?} {} {}",
                eff,
                config.option_string(),
                counts.true_positives,
                counts.false_positives
            )?;
        }
        self.out.flush()?;
        Ok(())
    }

    /// Command that would run, for `--dry-run`
    pub fn dry_run(&mut self, command: &str) -> Result<()> {
        writeln!(self.out, "{}", command)?;
        self.out.flush()?;
        Ok(())
    }

    /// Dump a finished iteration's table and its best entry
    pub fn table(&mut self, title: &str, table: &ResultsTable) -> Result<()> {
        writeln!(
            self.out,
            "\n{} ({} configurations)",
            style(title).bold(),
            table.len()
        )?;
        for (key, counts) in table.iter() {
            writeln!(
                self.out,
                "  {:?}: [{}, {}]",
                key, counts.true_positives, counts.false_positives
            )?;
        }
        if let Some((key, counts)) = table.best() {
            writeln!(
                self.out,
                "{} {:.4} {:?} ({} TP, {} FP)",
                style("Best:").green().bold(),
                counts.effectiveness().unwrap_or(0.0),
                key,
                counts.true_positives,
                counts.false_positives
            )?;
        }
        self.out.flush()?;
        Ok(())
    }
}
