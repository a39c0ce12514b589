//! CLI output formatting for plans and run reports.
//!
//! Each view has a `format_*` function returning `Vec<String>` for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.

use crate::plan::Plan;
use crate::run::{Outcome, RunReport};

/// Render a dry-run plan.
pub fn format_plan(plan: &Plan) -> Vec<String> {
    let mut lines = Vec::new();

    if !plan.deletions.is_empty() {
        lines.push(format!("Delete ({})", plan.deletions.len()));
        for path in &plan.deletions {
            lines.push(format!("    {}", path.display()));
        }
    }

    if !plan.generations.is_empty() {
        lines.push(format!("Generate ({})", plan.generations.len()));
        for generation in &plan.generations {
            lines.push(format!(
                "    {} → {}",
                generation.source.display(),
                generation.output.display()
            ));
        }
    }

    if !plan.skips.is_empty() {
        lines.push(format!("Skip ({})", plan.skips.len()));
        for skip in &plan.skips {
            lines.push(format!("    {} (exists)", skip.output.display()));
        }
    }

    if lines.is_empty() {
        lines.push("Nothing to do".to_string());
    }

    lines
}

/// Render the per-file outcomes of a completed run plus a summary line.
pub fn format_report(report: &RunReport) -> Vec<String> {
    let mut lines = Vec::new();

    for record in &report.records {
        let line = match &record.outcome {
            Outcome::Created => format!("created  {}", record.output.display()),
            Outcome::Deleted => format!("deleted  {}", record.output.display()),
            Outcome::Skipped { reason } => {
                format!("skipped  {} ({})", record.output.display(), reason)
            }
            Outcome::Failed { error } => {
                format!("failed   {}: {}", record.output.display(), error)
            }
        };
        lines.push(line);
    }

    lines.push(format!(
        "{} created, {} skipped, {} deleted, {} failed",
        report.created(),
        report.skipped(),
        report.deleted(),
        report.failed()
    ));

    lines
}

pub fn print_plan(plan: &Plan) {
    for line in format_plan(plan) {
        println!("{line}");
    }
}

pub fn print_report(report: &RunReport) {
    for line in format_report(report) {
        println!("{line}");
    }
}
