//! CLI command definitions and handlers

mod list_options;
mod sweep;

use crate::models::{SuppressionOption, Threshold};
use crate::sweep::options::{
    default_swept_options, known_options, DEFAULT_REPORTING_THRESHOLD, DEFAULT_SUBJECTS_DIR,
    DEFAULT_THRESHOLD_END, DEFAULT_THRESHOLD_START, DEFAULT_THRESHOLD_STEP,
};
use crate::sweep::{FailurePolicy, ProcessRunner, SweepSettings, ThresholdScan};
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

const DEFAULT_TOOL: &str = "node";
const DEFAULT_TOOL_SCRIPT: &str = "../dist/excelint-cli.js";

/// Parse a finite floating point value (rejects NaN and infinities)
fn parse_finite(s: &str) -> Result<f64, String> {
    let v: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if v.is_finite() {
        Ok(v)
    } else {
        Err(format!("'{}' must be a finite number", s))
    }
}

/// Parse the trial repeat count (at least 1)
fn parse_repeat(s: &str) -> Result<u32, String> {
    let n: u32 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if n == 0 {
        Err("repeat must be at least 1".to_string())
    } else {
        Ok(n)
    }
}

/// ExceLint sweep - measure true/false positive trade-offs across settings
#[derive(Parser, Debug)]
#[command(name = "excelint-sweep")]
#[command(
    version,
    about = "Sweep ExceLint suppression flags and reporting thresholds, reporting true/false positives per configuration",
    long_about = "Runs the ExceLint analyzer once per configuration against a labeled corpus, \
scrapes the true and false positive counts it prints, and reports \
effectiveness (TP / (TP + FP)) for each configuration.\n\n\
Trials run one at a time. Configurations with no reported positives are skipped.",
    after_help = "\
Examples:
  excelint-sweep flags                                Power set of the default suppression flags
  excelint-sweep flags --options suppressFatFix,suppressR1C1Mismatch
  excelint-sweep flags --all-options                  Every known flag (1024 runs)
  excelint-sweep threshold                            Reporting thresholds 22.5 to 27.0
  excelint-sweep threshold --step 1 --start 10 --end 20
  excelint-sweep flags --dry-run                      Print commands without running them
  excelint-sweep list-options                         Show known suppression flags"
)]
pub struct Cli {
    /// Analyzer executable
    #[arg(long, global = true, env = "EXCELINT_TOOL", default_value = DEFAULT_TOOL)]
    pub tool: String,

    /// Argument placed before the sweep arguments (repeatable).
    /// Defaults to the ExceLint script only when the tool is `node`
    #[arg(long = "tool-arg", global = true, allow_hyphen_values = true)]
    pub tool_args: Vec<String>,

    /// Subjects directory passed to the analyzer
    #[arg(long, global = true, env = "EXCELINT_SUBJECTS", default_value = DEFAULT_SUBJECTS_DIR)]
    pub directory: PathBuf,

    /// Maximum number of categories for reported errors
    #[arg(long, global = true, default_value = "3")]
    pub max_categories: u32,

    /// What to do when the analyzer exits non-zero: ignore, skip, abort
    #[arg(long, global = true, default_value = "ignore", value_parser = ["ignore", "skip", "abort"])]
    pub on_failure: String,

    /// Print the commands that would run instead of running them
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Try every on/off combination of a list of suppression flags
    Flags {
        /// Comma-separated flags to sweep (default: the five constant-related flags)
        #[arg(long, value_delimiter = ',', conflicts_with = "all_options")]
        options: Vec<String>,

        /// Sweep every suppression flag ExceLint knows
        #[arg(long)]
        all_options: bool,

        /// Reporting threshold used for every run
        #[arg(long, default_value_t = DEFAULT_REPORTING_THRESHOLD, value_parser = parse_finite, allow_negative_numbers = true)]
        reporting_threshold: f64,
    },

    /// Hold a flag set fixed and scan reporting thresholds step * i, i in [start, end)
    Threshold {
        /// Comma-separated flags enabled in every run (default: the five constant-related flags)
        #[arg(long, value_delimiter = ',')]
        enable: Vec<String>,

        /// Threshold increment
        #[arg(long, default_value_t = DEFAULT_THRESHOLD_STEP, value_parser = parse_finite, allow_negative_numbers = true)]
        step: f64,

        /// First multiplier (inclusive)
        #[arg(long, default_value_t = DEFAULT_THRESHOLD_START, allow_negative_numbers = true)]
        start: i64,

        /// Last multiplier (exclusive)
        #[arg(long, default_value_t = DEFAULT_THRESHOLD_END, allow_negative_numbers = true)]
        end: i64,

        /// Runs per threshold; only the last result is kept
        #[arg(long, default_value = "1", value_parser = parse_repeat)]
        repeat: u32,
    },

    /// List the suppression flags ExceLint understands
    ListOptions,
}

impl Cli {
    /// Arguments placed before the per-configuration arguments
    fn leading_args(&self) -> Vec<String> {
        if self.tool_args.is_empty() && self.tool == DEFAULT_TOOL {
            vec![DEFAULT_TOOL_SCRIPT.to_string()]
        } else {
            self.tool_args.clone()
        }
    }

    fn settings(&self) -> Result<SweepSettings> {
        Ok(SweepSettings {
            directory: self.directory.clone(),
            max_categories: self.max_categories,
            on_failure: self.on_failure.parse::<FailurePolicy>()?,
            dry_run: self.dry_run,
        })
    }
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    let settings = cli.settings()?;
    let runner = ProcessRunner::new(cli.tool.clone(), cli.leading_args());

    match cli.command {
        Commands::Flags {
            options,
            all_options,
            reporting_threshold,
        } => {
            let options = if all_options {
                known_options()
            } else if options.is_empty() {
                default_swept_options()
            } else {
                options.into_iter().map(SuppressionOption::from).collect()
            };
            sweep::run_flags(runner, &settings, options, Threshold::new(reporting_threshold))
        }

        Commands::Threshold {
            enable,
            step,
            start,
            end,
            repeat,
        } => {
            let enabled = if enable.is_empty() {
                default_swept_options()
            } else {
                enable.into_iter().map(SuppressionOption::from).collect()
            };
            let scan = ThresholdScan {
                enabled,
                step,
                start,
                end,
                repeat,
            };
            sweep::run_threshold(runner, &settings, &scan)
        }

        Commands::ListOptions => list_options::run(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sweep::ToolRunner;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["excelint-sweep", "flags"]).unwrap();
        assert_eq!(cli.tool, "node");
        assert!(cli.tool_args.is_empty());
        assert_eq!(cli.leading_args(), vec!["../dist/excelint-cli.js"]);
        assert_eq!(cli.directory, PathBuf::from("subjects_xlsx"));
        assert_eq!(cli.max_categories, 3);

        let settings = cli.settings().unwrap();
        assert_eq!(settings.on_failure, FailurePolicy::Ignore);
        match cli.command {
            Commands::Flags {
                options,
                all_options,
                reporting_threshold,
            } => {
                assert!(options.is_empty());
                assert!(!all_options);
                assert_eq!(reporting_threshold, 2.0);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_direct_tool_has_no_leading_args() {
        let cli = Cli::try_parse_from([
            "excelint-sweep",
            "flags",
            "--tool",
            "/usr/local/bin/excelint",
        ])
        .unwrap();
        assert!(cli.tool_args.is_empty());
        assert!(cli.leading_args().is_empty());

        let runner = ProcessRunner::new(cli.tool.clone(), cli.leading_args());
        assert_eq!(
            runner.describe(&["--maxCategories".into(), "3".into()]),
            "/usr/local/bin/excelint --maxCategories 3"
        );
    }

    #[test]
    fn test_node_with_explicit_script() {
        let cli = Cli::try_parse_from([
            "excelint-sweep",
            "flags",
            "--tool-arg",
            "dist/excelint-cli.js",
        ])
        .unwrap();
        assert_eq!(cli.leading_args(), vec!["dist/excelint-cli.js"]);
    }

    #[test]
    fn test_options_are_comma_separated() {
        let cli = Cli::try_parse_from(["excelint-sweep", "flags", "--options", "a,b,c"]).unwrap();
        match cli.command {
            Commands::Flags { options, .. } => assert_eq!(options, vec!["a", "b", "c"]),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_options_conflict_with_all_options() {
        let res = Cli::try_parse_from([
            "excelint-sweep",
            "flags",
            "--options",
            "a",
            "--all-options",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn test_threshold_defaults() {
        let cli = Cli::try_parse_from(["excelint-sweep", "threshold"]).unwrap();
        match cli.command {
            Commands::Threshold {
                enable,
                step,
                start,
                end,
                repeat,
            } => {
                assert!(enable.is_empty());
                assert_eq!(step, 0.5);
                assert_eq!((start, end), (45, 55));
                assert_eq!(repeat, 1);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(Cli::try_parse_from(["excelint-sweep", "threshold", "--step", "NaN"]).is_err());
        assert!(Cli::try_parse_from(["excelint-sweep", "threshold", "--repeat", "0"]).is_err());
        assert!(
            Cli::try_parse_from(["excelint-sweep", "flags", "--on-failure", "retry"]).is_err()
        );
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "excelint-sweep",
            "flags",
            "--tool",
            "sh",
            "--tool-arg",
            "stub.sh",
            "--directory",
            "corpus",
            "--on-failure",
            "abort",
        ])
        .unwrap();
        assert_eq!(cli.tool, "sh");
        assert_eq!(cli.tool_args, vec!["stub.sh"]);
        assert_eq!(cli.leading_args(), vec!["stub.sh"]);
        assert_eq!(cli.directory, PathBuf::from("corpus"));
        assert_eq!(cli.settings().unwrap().on_failure, FailurePolicy::Abort);
    }
}
