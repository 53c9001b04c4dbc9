//! excelint-sweep - parameter sweep harness for ExceLint
//!
//! Runs the ExceLint analyzer across combinations of suppression flags and
//! reporting thresholds, scrapes the true/false positive counts it prints,
//! and reports the accuracy trade-off of each configuration.

pub mod cli;
pub mod models;
pub mod sweep;
