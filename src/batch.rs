//! Batch conversion driver.
//!
//! Two stage functions: [`discover`] enumerates eligible files, [`run`] (or
//! [`run_with_backend`]) converts them in order. Discovery is non-recursive
//! and sorts by path, so processing and reporting order are stable across
//! platforms and reruns.
//!
//! Each file runs inside its own failure boundary: a decode, encode, or
//! write error becomes a recorded [`FileStatus::Failed`] and the run
//! continues with the next file. Only two conditions abort the whole run:
//! a missing input directory and failure to create the output directory.

use crate::emit::{self, EmitError, OutputRecord};
use crate::formats::SourceFormat;
use crate::imaging::{BackendError, ImageBackend, Quality, ResizeLimits, RustBackend, fit_within};
use clap::ValueEnum;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that abort the whole batch.
#[derive(Error, Debug)]
pub enum BatchError {
    #[error("input directory not found: {0}")]
    InputDirMissing(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error that failed one file's conversion without stopping the batch.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error(transparent)]
    Emit(#[from] EmitError),
}

/// What to do when the output file already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum IfExists {
    /// Replace the existing file.
    Overwrite,
    /// Leave it untouched and record the file as skipped.
    Skip,
    /// Record the file as failed.
    Fail,
}

/// One eligible input file, as found by [`discover`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub format: SourceFormat,
}

/// Settings for one batch run.
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    pub output_dir: PathBuf,
    pub quality: Quality,
    pub limits: ResizeLimits,
    pub if_exists: IfExists,
}

/// Per-file result.
#[derive(Debug)]
pub enum FileStatus {
    Converted(OutputRecord),
    SkippedExisting { output: PathBuf },
    Failed(ConvertError),
}

/// One file's outcome, in processing order.
#[derive(Debug)]
pub struct FileOutcome {
    pub source: PathBuf,
    pub status: FileStatus,
}

impl FileOutcome {
    /// Source file name for display.
    pub fn file_name(&self) -> String {
        self.source
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.source.display().to_string())
    }
}

/// Accumulated outcomes of a batch run, in processing order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<FileOutcome>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn converted(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, FileStatus::Converted(_)))
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, FileStatus::SkippedExisting { .. }))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, FileStatus::Failed(_)))
            .count()
    }

    /// True when no file failed. Skipped files are not failures.
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }
}

/// Enumerate eligible files in `input_dir`, sorted by path.
///
/// Non-recursive: subdirectories are ignored. Eligibility is decided by the
/// extension alone, case-insensitively (see [`SourceFormat`]).
pub fn discover(input_dir: &Path) -> Result<Vec<SourceFile>, BatchError> {
    if !input_dir.is_dir() {
        return Err(BatchError::InputDirMissing(input_dir.to_path_buf()));
    }

    let mut files: Vec<SourceFile> = fs::read_dir(input_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter_map(|path| {
            SourceFormat::from_path(&path).map(|format| SourceFile { path, format })
        })
        .collect();

    files.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(files)
}

/// Convert `files` sequentially with the production backend.
pub fn run(
    files: &[SourceFile],
    config: &ConvertConfig,
    on_file: impl FnMut(usize, usize, &FileOutcome),
) -> Result<BatchReport, BatchError> {
    run_with_backend(&RustBackend::new(), files, config, on_file)
}

/// Convert `files` sequentially with the given backend.
///
/// Creates the output directory, then runs decode → fit → resample → encode
/// → write for each file. Per-file errors are recorded, not propagated.
/// `on_file` is invoked after every file with the 1-based index, the total
/// count, and the outcome; the progress display hangs off this hook.
pub fn run_with_backend(
    backend: &impl ImageBackend,
    files: &[SourceFile],
    config: &ConvertConfig,
    mut on_file: impl FnMut(usize, usize, &FileOutcome),
) -> Result<BatchReport, BatchError> {
    fs::create_dir_all(&config.output_dir)?;

    let total = files.len();
    let mut report = BatchReport::default();
    for (i, file) in files.iter().enumerate() {
        let status = convert_file(backend, file, config).unwrap_or_else(FileStatus::Failed);
        let outcome = FileOutcome {
            source: file.path.clone(),
            status,
        };
        on_file(i + 1, total, &outcome);
        report.outcomes.push(outcome);
    }
    Ok(report)
}

/// One file's pipeline. Errors are per-file; the caller records them.
///
/// The existence check runs before the decode so a skipped file costs no
/// pixel work.
fn convert_file(
    backend: &impl ImageBackend,
    file: &SourceFile,
    config: &ConvertConfig,
) -> Result<FileStatus, ConvertError> {
    let output = emit::output_path(&config.output_dir, &file.path);
    if output.exists() {
        match config.if_exists {
            IfExists::Overwrite => {}
            IfExists::Skip => return Ok(FileStatus::SkippedExisting { output }),
            IfExists::Fail => return Err(EmitError::AlreadyExists(output).into()),
        }
    }

    let mut image = backend.decode(&file.path, file.format)?;
    if let Some((width, height)) = fit_within((image.width(), image.height()), &config.limits) {
        image = backend.resample(image, width, height);
    }
    let encoded = backend.encode(&image, config.quality)?;
    let record = emit::write_output(&output, &encoded)?;
    Ok(FileStatus::Converted(record))
}
