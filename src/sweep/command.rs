//! Argument rendering for analyzer invocations
//!
//! Arguments are built as discrete argv tokens and never passed through a
//! shell, so flag names and paths need no quoting.

use crate::models::Configuration;
use std::path::Path;

/// Render a configuration to the analyzer's argument list.
///
/// Leading arguments are fixed: `--maxCategories`, `--reportingThreshold`,
/// `--directory`. Each enabled flag follows as `--<name>=1`; disabled flags
/// are omitted.
pub fn render_args(config: &Configuration, directory: &Path) -> Vec<String> {
    let mut args = vec![
        "--maxCategories".to_string(),
        config.max_categories.to_string(),
        "--reportingThreshold".to_string(),
        config.reporting_threshold.to_string(),
        "--directory".to_string(),
        directory.to_string_lossy().into_owned(),
    ];
    args.extend(config.enabled.iter().map(|opt| opt.enable_flag()));
    args
}

/// Human-readable command line, for logs and dry runs only
pub fn display_command(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}
