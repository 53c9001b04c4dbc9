//! List-options command - show the suppression flags ExceLint accepts

use crate::sweep::options::{DEFAULT_SWEPT_OPTIONS, KNOWN_OPTIONS};
use anyhow::Result;
use console::style;

pub fn run() -> Result<()> {
    println!("{}\n", style("ExceLint suppression flags").bold());
    for name in KNOWN_OPTIONS {
        if DEFAULT_SWEPT_OPTIONS.contains(name) {
            println!("  {} {}", style("*").green(), name);
        } else {
            println!("    {}", name);
        }
    }
    println!("\n  {} swept by default", style("*").green());
    Ok(())
}
