//! Split command implementation

use std::path::Path;

use colored::Colorize;
use marks_core::{Resolver, SplitOptions, split};

use crate::error::Result;

/// Run the split command
pub fn run_split(input: &Path, root: &Path, normalize: bool, resolver: &mut dyn Resolver) -> Result<()> {
    println!(
        "{} Splitting {}...",
        "=>".blue().bold(),
        input.display().to_string().cyan()
    );

    let report = split(input, root, SplitOptions { normalize }, resolver)?;

    for path in &report.written {
        println!("   {} {}", "+".green(), path.display());
    }
    println!(
        "{} Wrote {} local storage(s): {} file(s), {} mark(s).",
        "OK".green().bold(),
        report.written.len(),
        report.kept_files,
        report.marks
    );
    if report.skipped_files > 0 || report.skipped_dirs > 0 {
        println!(
            "{} Left out {} file(s) and {} directory(ies).",
            "SKIPPED".yellow().bold(),
            report.skipped_files,
            report.skipped_dirs
        );
    }
    Ok(())
}
