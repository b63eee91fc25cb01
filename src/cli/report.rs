//! Progress and summary output for the CLI.
//!
//! Progress goes to stdout, warnings to stderr. Every printer has a `_to`
//! variant taking a writer so output can be tested.

use std::io::{self, Write};

use colored::Colorize;

use crate::{
    core::{
        Progress, UpdateContext,
        emit::{FileState, OutputStatus},
        merge::MergeOutcome,
    },
    issues::Diagnostic,
};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print one progress line for a pipeline stage.
pub fn print_progress(ctx: &UpdateContext, progress: Progress<'_>) {
    print_progress_to(ctx, progress, &mut io::stdout().lock());
}

pub fn print_progress_to<W: Write>(ctx: &UpdateContext, progress: Progress<'_>, writer: &mut W) {
    let line = match progress {
        Progress::Scanning { scan_root } => {
            format!("Scanning {}...", display_dir(&ctx.relative(scan_root)))
        }
        Progress::Scanned { elements, files } => format!(
            "Found {} exported {} in {} {}.",
            elements,
            plural(elements, "element", "elements"),
            files,
            plural(files, "file", "files")
        ),
        Progress::Loading { map_path } => {
            format!("Loading existing map from {}...", ctx.relative(map_path))
        }
        Progress::Merging => "Merging data...".to_string(),
    };
    let _ = writeln!(writer, "{}", line);
}

/// Print the "Writing ..." lines shown before both outputs are written.
pub fn print_writing(ctx: &UpdateContext) {
    print_writing_to(ctx, &mut io::stdout().lock());
}

pub fn print_writing_to<W: Write>(ctx: &UpdateContext, writer: &mut W) {
    let _ = writeln!(writer, "Writing to {}...", ctx.relative(&ctx.map_path()));
    let _ = writeln!(
        writer,
        "Generating module at {}...",
        ctx.relative(&ctx.module_path())
    );
}

/// Print warnings to stderr.
///
/// Skipped source files are summarized in one line unless `verbose` is set;
/// other warnings are always printed.
pub fn print_diagnostics(diagnostics: &[&Diagnostic], verbose: bool) {
    print_diagnostics_to(diagnostics, verbose, &mut io::stderr().lock());
}

pub fn print_diagnostics_to<W: Write>(diagnostics: &[&Diagnostic], verbose: bool, writer: &mut W) {
    let mut skipped = 0;
    for diagnostic in diagnostics {
        if diagnostic.is_skipped_source() && !verbose {
            skipped += 1;
            continue;
        }
        let _ = writeln!(writer, "{} {}", "warning:".bold().yellow(), diagnostic);
    }

    if skipped > 0 {
        let _ = writeln!(
            writer,
            "{} {} file(s) could not be read (use {} for details)",
            "warning:".bold().yellow(),
            skipped,
            "-v".cyan()
        );
    }
}

/// Print what the merge did. Removed names are always listed.
pub fn print_merge_summary(outcome: &MergeOutcome, verbose: bool) {
    print_merge_summary_to(outcome, verbose, &mut io::stdout().lock());
}

pub fn print_merge_summary_to<W: Write>(outcome: &MergeOutcome, verbose: bool, writer: &mut W) {
    let _ = writeln!(
        writer,
        "  {} added, {} updated, {} unchanged, {} removed",
        outcome.added.len(),
        outcome.changed.len(),
        outcome.unchanged,
        outcome.removed.len()
    );

    if verbose {
        print_names(writer, "added:", &outcome.added);
        print_names(writer, "updated:", &outcome.changed);
    }

    if !outcome.removed.is_empty() {
        let _ = writeln!(
            writer,
            "  {} {} (no longer found in source)",
            "removed:".yellow(),
            outcome.removed.join(", ")
        );
    }
}

fn print_names<W: Write>(writer: &mut W, label: &str, names: &[String]) {
    if !names.is_empty() {
        let _ = writeln!(writer, "  {} {}", label.dimmed(), names.join(", "));
    }
}

/// Print the final success line of an update.
pub fn print_complete(element_count: usize) {
    print_complete_to(element_count, &mut io::stdout().lock());
}

pub fn print_complete_to<W: Write>(element_count: usize, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Update complete ({} {})",
            element_count,
            plural(element_count, "element", "elements")
        )
        .green()
    );
}

/// Print the result of `check`.
pub fn print_check_status(ctx: &UpdateContext, status: &OutputStatus) {
    print_check_status_to(ctx, status, &mut io::stdout().lock());
}

pub fn print_check_status_to<W: Write>(ctx: &UpdateContext, status: &OutputStatus, writer: &mut W) {
    if status.is_up_to_date() {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            "Codebase map is up to date".green()
        );
        return;
    }

    for (path, state) in [
        (ctx.map_path(), status.map),
        (ctx.module_path(), status.module),
    ] {
        let label = match state {
            FileState::UpToDate => continue,
            FileState::Stale => "out of date",
            FileState::Missing => "missing",
        };
        let _ = writeln!(
            writer,
            "{} {} is {}",
            FAILURE_MARK.red(),
            ctx.relative(&path),
            label
        );
    }
    let _ = writeln!(
        writer,
        "Run {} to regenerate it.",
        env!("CARGO_PKG_NAME").cyan()
    );
}

fn display_dir(rel: &str) -> &str {
    if rel.is_empty() { "." } else { rel }
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}
