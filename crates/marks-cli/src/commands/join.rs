//! Join command implementation

use std::path::Path;

use colored::Colorize;
use marks_core::{Resolver, join};

use crate::error::Result;

/// Run the join command
pub fn run_join(dir: &Path, resolver: &mut dyn Resolver) -> Result<()> {
    println!(
        "{} Joining local storages under {}...",
        "=>".blue().bold(),
        dir.display().to_string().cyan()
    );

    let report = join(dir, resolver)?;

    for path in &report.ignored {
        println!("   {} {}", "ignored".yellow(), path.display());
    }
    println!(
        "{} Wrote {} from {} local storage(s): {} file(s), {} mark(s).",
        "OK".green().bold(),
        report.output.display(),
        report.sources.len(),
        report.files,
        report.marks
    );
    Ok(())
}
