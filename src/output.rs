//! CLI output formatting for batch conversion.
//!
//! # Output Format
//!
//! ## Human (default)
//!
//! One progress line per file as it finishes, then a summary:
//!
//! ```text
//! Converting 3 files from photos to web
//!
//! [1/3] beach.heic → web/beach.webp (182 KB)
//! [2/3] corrupt.jpg: decode failed: broken header
//! [3/3] logo.png: skipped, web/logo.webp already exists
//!
//! Converted 1 of 3 files (1 skipped, 1 failed)
//! Failed:
//!     corrupt.jpg: decode failed: broken header
//! ```
//!
//! ## JSON (`--report json`)
//!
//! A single object printed after the run, with per-file entries in
//! processing order:
//!
//! ```text
//! {
//!   "total": 3,
//!   "converted": 1,
//!   "skipped": 1,
//!   "failed": 1,
//!   "files": [
//!     { "source": "photos/beach.heic", "status": "converted",
//!       "output": "web/beach.webp", "kilobytes": 182 },
//!     ...
//!   ]
//! }
//! ```
//!
//! # Architecture
//!
//! Each piece has a `format_*` function (returns `String` or `Vec<String>`)
//! for testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure, no I/O.

use crate::batch::{BatchReport, FileOutcome, FileStatus};
use crate::formats;
use clap::ValueEnum;
use serde::Serialize;
use std::path::Path;

/// Report style selected with `--report`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Per-file progress lines plus a summary, printed as the run proceeds.
    Human,
    /// One JSON object printed after the run finishes.
    Json,
}

// ============================================================================
// Human-readable lines
// ============================================================================

/// Format the opening line of a run.
pub fn format_batch_header(count: usize, input_dir: &Path, output_dir: &Path) -> String {
    format!(
        "Converting {} files from {} to {}",
        count,
        input_dir.display(),
        output_dir.display()
    )
}

/// Format the notice shown when discovery finds nothing to convert.
pub fn format_empty_notice(input_dir: &Path) -> String {
    format!(
        "No convertible files found in {} (accepted: {})",
        input_dir.display(),
        formats::accepted_extensions().join(", ")
    )
}

/// Format one file's progress line.
///
/// `index` is 1-based. Converted files show the output path and its size in
/// whole kilobytes; skipped and failed files show why on the same line.
pub fn format_file_line(index: usize, total: usize, outcome: &FileOutcome) -> String {
    let prefix = format!("[{}/{}] {}", index, total, outcome.file_name());
    match &outcome.status {
        FileStatus::Converted(record) => {
            format!(
                "{} \u{2192} {} ({} KB)",
                prefix,
                record.path.display(),
                record.kilobytes()
            )
        }
        FileStatus::SkippedExisting { output } => {
            format!("{}: skipped, {} already exists", prefix, output.display())
        }
        FileStatus::Failed(err) => format!("{}: {}", prefix, err),
    }
}

/// Format the end-of-run summary.
///
/// The parenthetical only mentions skipped and failed counts when they are
/// non-zero, and failed files are repeated with their errors so they are
/// visible without scrolling back through the progress lines.
pub fn format_summary(report: &BatchReport) -> Vec<String> {
    let mut lines = Vec::new();

    let mut notes = Vec::new();
    if report.skipped() > 0 {
        notes.push(format!("{} skipped", report.skipped()));
    }
    if report.failed() > 0 {
        notes.push(format!("{} failed", report.failed()));
    }
    let suffix = if notes.is_empty() {
        String::new()
    } else {
        format!(" ({})", notes.join(", "))
    };
    lines.push(format!(
        "Converted {} of {} files{}",
        report.converted(),
        report.total(),
        suffix
    ));

    if report.failed() > 0 {
        lines.push("Failed:".to_string());
        for outcome in &report.outcomes {
            if let FileStatus::Failed(err) = &outcome.status {
                lines.push(format!("    {}: {}", outcome.file_name(), err));
            }
        }
    }

    lines
}

/// Print one file's progress line to stdout.
pub fn print_file_line(index: usize, total: usize, outcome: &FileOutcome) {
    println!("{}", format_file_line(index, total, outcome));
}

/// Print the end-of-run summary to stdout.
pub fn print_summary(report: &BatchReport) {
    for line in format_summary(report) {
        println!("{}", line);
    }
}

// ============================================================================
// JSON report
// ============================================================================

#[derive(Serialize)]
struct JsonReport {
    total: usize,
    converted: usize,
    skipped: usize,
    failed: usize,
    files: Vec<JsonFile>,
}

#[derive(Serialize)]
struct JsonFile {
    source: String,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    kilobytes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn json_file(outcome: &FileOutcome) -> JsonFile {
    let source = outcome.source.display().to_string();
    match &outcome.status {
        FileStatus::Converted(record) => JsonFile {
            source,
            status: "converted",
            output: Some(record.path.display().to_string()),
            kilobytes: Some(record.kilobytes()),
            error: None,
        },
        FileStatus::SkippedExisting { output } => JsonFile {
            source,
            status: "skipped",
            output: Some(output.display().to_string()),
            kilobytes: None,
            error: None,
        },
        FileStatus::Failed(err) => JsonFile {
            source,
            status: "failed",
            output: None,
            kilobytes: None,
            error: Some(err.to_string()),
        },
    }
}

/// Serialize the whole run as a pretty-printed JSON object.
pub fn format_report_json(report: &BatchReport) -> serde_json::Result<String> {
    let view = JsonReport {
        total: report.total(),
        converted: report.converted(),
        skipped: report.skipped(),
        failed: report.failed(),
        files: report.outcomes.iter().map(json_file).collect(),
    };
    serde_json::to_string_pretty(&view)
}

// ============================================================================
// Tests
// ============================================================================
