//! Suppression flags and configuration enumerators
//!
//! Two ways of producing configurations:
//! - [`PowerSet`] walks every on/off assignment of an ordered flag list,
//!   most significant bit first (the first flag is the high bit)
//! - [`threshold_scan`] + [`fixed_flag_configurations`] hold one flag set
//!   constant across a range of reporting thresholds

use super::SweepError;
use crate::models::{Configuration, SuppressionOption, Threshold};

pub const DEFAULT_SUBJECTS_DIR: &str = "subjects_xlsx";
pub const DEFAULT_MAX_CATEGORIES: u32 = 3;
pub const DEFAULT_REPORTING_THRESHOLD: f64 = 2.0;
pub const DEFAULT_THRESHOLD_STEP: f64 = 0.5;
pub const DEFAULT_THRESHOLD_START: i64 = 45;
pub const DEFAULT_THRESHOLD_END: i64 = 55;

/// Every suppression flag the analyzer accepts
pub const KNOWN_OPTIONS: &[&str] = &[
    "suppressFatFix",
    "suppressDifferentReferentCount",
    "suppressRecurrentFormula",
    "suppressOneExtraConstant",
    "suppressNumberOfConstantsMismatch",
    "suppressBothConstants",
    "suppressOneIsAllConstants",
    "suppressR1C1Mismatch",
    "suppressAbsoluteRefMismatch",
    "suppressOffAxisReference",
];

/// Flags swept when none are given
pub const DEFAULT_SWEPT_OPTIONS: &[&str] = &[
    "suppressRecurrentFormula",
    "suppressOneExtraConstant",
    "suppressNumberOfConstantsMismatch",
    "suppressBothConstants",
    "suppressOneIsAllConstants",
];

pub fn default_swept_options() -> Vec<SuppressionOption> {
    DEFAULT_SWEPT_OPTIONS.iter().map(|&name| name.into()).collect()
}

pub fn known_options() -> Vec<SuppressionOption> {
    KNOWN_OPTIONS.iter().map(|&name| name.into()).collect()
}

/// Iterator over all 2^N flag assignments of an option list.
///
/// Index `i` is read as an N-bit binary number; bit `N-1-b` enables
/// option `b`. An empty list still yields one (empty) configuration.
#[derive(Debug, Clone)]
pub struct PowerSet {
    options: Vec<SuppressionOption>,
    reporting_threshold: Threshold,
    max_categories: u32,
    next: u64,
    total: u64,
}

impl PowerSet {
    pub fn new(
        options: Vec<SuppressionOption>,
        reporting_threshold: Threshold,
        max_categories: u32,
    ) -> Result<Self, SweepError> {
        if options.len() >= 64 {
            return Err(SweepError::TooManyOptions(options.len()));
        }
        let total = 1u64 << options.len();
        Ok(Self {
            options,
            reporting_threshold,
            max_categories,
            next: 0,
            total,
        })
    }

    /// Number of configurations this enumerator yields in total
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Build the configuration for one index
    pub fn configuration(&self, index: u64) -> Configuration {
        let n = self.options.len();
        let enabled = self
            .options
            .iter()
            .enumerate()
            .filter(|(b, _)| (index >> (n - 1 - b)) & 1 == 1)
            .map(|(_, opt)| opt.clone())
            .collect();
        Configuration {
            enabled,
            reporting_threshold: self.reporting_threshold,
            max_categories: self.max_categories,
        }
    }
}

impl Iterator for PowerSet {
    type Item = Configuration;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.total {
            return None;
        }
        let config = self.configuration(self.next);
        self.next += 1;
        Some(config)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.total - self.next) as usize;
        (remaining, Some(remaining))
    }
}

/// Thresholds `step * i` for every integer `i` in `start..end`.
///
/// Multiplying instead of accumulating keeps values such as `22.5` exact.
pub fn threshold_scan(step: f64, start: i64, end: i64) -> Result<Vec<Threshold>, SweepError> {
    if start >= end {
        return Err(SweepError::EmptyThresholdRange { start, end });
    }
    Ok((start..end).map(|i| Threshold::new(step * i as f64)).collect())
}

/// One configuration per threshold, all with the same enabled flags
pub fn fixed_flag_configurations(
    enabled: &[SuppressionOption],
    thresholds: &[Threshold],
    max_categories: u32,
) -> Vec<Configuration> {
    thresholds
        .iter()
        .map(|&reporting_threshold| Configuration {
            enabled: enabled.to_vec(),
            reporting_threshold,
            max_categories,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn opts(names: &[&str]) -> Vec<SuppressionOption> {
        names.iter().map(|&n| n.into()).collect()
    }

    #[test]
    fn test_power_set_size() {
        for n in 0..6 {
            let names: Vec<String> = (0..n).map(|i| format!("opt{}", i)).collect();
            let options = names
                .iter()
                .map(|s| SuppressionOption::from(s.as_str()))
                .collect();
            let configs: Vec<_> = PowerSet::new(options, Threshold::new(2.0), 3)
                .unwrap()
                .collect();
            assert_eq!(configs.len(), 1 << n);

            let distinct: HashSet<String> = configs.iter().map(|c| c.option_string()).collect();
            assert_eq!(distinct.len(), 1 << n);
        }
    }

    #[test]
    fn test_power_set_empty_list_yields_one() {
        let configs: Vec<_> = PowerSet::new(vec![], Threshold::new(2.0), 3)
            .unwrap()
            .collect();
        assert_eq!(configs.len(), 1);
        assert!(configs[0].enabled.is_empty());
        assert_eq!(configs[0].option_string(), "");
    }

    #[test]
    fn test_power_set_msb_first() {
        let configs: Vec<_> = PowerSet::new(opts(&["a", "b", "c"]), Threshold::new(2.0), 3)
            .unwrap()
            .collect();
        // 000, 001, 010, ... the last option is the low bit
        assert!(configs[0].enabled.is_empty());
        assert_eq!(configs[1].enabled, opts(&["c"]));
        assert_eq!(configs[2].enabled, opts(&["b"]));
        assert_eq!(configs[4].enabled, opts(&["a"]));
        assert_eq!(configs[5].enabled, opts(&["a", "c"]));
        assert_eq!(configs[7].enabled, opts(&["a", "b", "c"]));
    }

    #[test]
    fn test_power_set_keeps_names_verbatim() {
        let configs: Vec<_> = PowerSet::new(opts(&["", "with space"]), Threshold::new(1.0), 3)
            .unwrap()
            .collect();
        assert_eq!(configs[3].option_string(), " --=1 --with space=1");
    }

    #[test]
    fn test_power_set_rejects_64_options() {
        let names: Vec<String> = (0..64).map(|i| format!("opt{}", i)).collect();
        let options = names
            .iter()
            .map(|s| SuppressionOption::from(s.as_str()))
            .collect();
        let err = PowerSet::new(options, Threshold::new(2.0), 3).unwrap_err();
        assert!(matches!(err, SweepError::TooManyOptions(64)));
    }

    #[test]
    fn test_power_set_size_hint() {
        let mut set = PowerSet::new(opts(&["a", "b"]), Threshold::new(2.0), 3).unwrap();
        assert_eq!(set.total(), 4);
        set.next();
        assert_eq!(set.size_hint(), (3, Some(3)));
    }

    #[test]
    fn test_threshold_scan_default_range() {
        let thresholds = threshold_scan(
            DEFAULT_THRESHOLD_STEP,
            DEFAULT_THRESHOLD_START,
            DEFAULT_THRESHOLD_END,
        )
        .unwrap();
        let rendered: Vec<String> = thresholds.iter().map(|t| t.to_string()).collect();
        assert_eq!(
            rendered,
            vec![
                "22.5", "23.0", "23.5", "24.0", "24.5", "25.0", "25.5", "26.0", "26.5", "27.0"
            ]
        );
    }

    #[test]
    fn test_threshold_scan_empty_range() {
        assert!(matches!(
            threshold_scan(0.5, 10, 10),
            Err(SweepError::EmptyThresholdRange { start: 10, end: 10 })
        ));
    }

    #[test]
    fn test_fixed_flag_configurations() {
        let thresholds = threshold_scan(0.5, 45, 48).unwrap();
        let configs = fixed_flag_configurations(&opts(&["x", "y"]), &thresholds, 4);
        assert_eq!(configs.len(), 3);
        for (config, threshold) in configs.iter().zip(&thresholds) {
            assert_eq!(config.enabled, opts(&["x", "y"]));
            assert_eq!(config.reporting_threshold, *threshold);
            assert_eq!(config.max_categories, 4);
        }
    }

    #[test]
    fn test_default_options_are_known() {
        for name in DEFAULT_SWEPT_OPTIONS {
            assert!(KNOWN_OPTIONS.contains(name));
        }
        assert_eq!(default_swept_options().len(), 5);
        assert_eq!(known_options().len(), 10);
    }
}
