use std::io::Write;

use intake_core::PaperRecord;
use owo_colors::OwoColorize;

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

/// Print the start-of-run line.
pub fn print_start(
    w: &mut dyn Write,
    issue_number: &str,
    issue_title: &str,
    color: ColorMode,
) -> std::io::Result<()> {
    if color.enabled() {
        writeln!(
            w,
            "{} {}",
            format!("Processing issue #{}:", issue_number).bold(),
            issue_title
        )
    } else {
        writeln!(w, "Processing issue #{}: {}", issue_number, issue_title)
    }
}

/// Print the end-of-run summary for a stored record.
pub fn print_summary(
    w: &mut dyn Write,
    record: &PaperRecord,
    color: ColorMode,
) -> std::io::Result<()> {
    let file = record.json_filename();
    if color.enabled() {
        writeln!(
            w,
            "{} {}",
            "Successfully processed submission:".green(),
            file
        )?;
    } else {
        writeln!(w, "Successfully processed submission: {}", file)?;
    }
    writeln!(w, "Paper: {}", record.title)?;
    writeln!(w, "Authors: {}", record.authors.join(", "))?;
    writeln!(w, "Year: {}", record.year)?;
    writeln!(w, "Venue: {}", record.venue)?;
    Ok(())
}

/// Print the record that would be written, for `--dry-run`.
pub fn print_dry_run(
    w: &mut dyn Write,
    record: &PaperRecord,
    target: &std::path::Path,
    color: ColorMode,
) -> anyhow::Result<()> {
    if color.enabled() {
        writeln!(
            w,
            "{} would write {}",
            "DRY RUN:".bold().cyan(),
            target.display()
        )?;
    } else {
        writeln!(w, "DRY RUN: would write {}", target.display())?;
    }
    writeln!(w, "{}", record.to_json_pretty()?)?;
    Ok(())
}
