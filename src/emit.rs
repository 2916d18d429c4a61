//! Output naming and file emission.
//!
//! Converted files keep their source base name with the extension replaced
//! by `webp`, and land flat in the output directory regardless of case or
//! original format. Size reporting reads the written file; whole kilobytes
//! floor-divide by 1024, so a 1023-byte file reports 0 KB.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EmitError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("output already exists: {0}")]
    AlreadyExists(PathBuf),
}

/// Extension given to every converted file.
pub const OUTPUT_EXTENSION: &str = "webp";

/// Compute the output path for a source file: the source base name with its
/// extension replaced by [`OUTPUT_EXTENSION`], inside `output_dir`.
pub fn output_path(output_dir: &Path, source: &Path) -> PathBuf {
    let file_name = source.file_name().unwrap_or(source.as_os_str());
    output_dir.join(Path::new(file_name).with_extension(OUTPUT_EXTENSION))
}

/// Record of one successfully written output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRecord {
    pub path: PathBuf,
    pub bytes: u64,
}

impl OutputRecord {
    /// Whole kilobytes, floor-divided.
    pub fn kilobytes(&self) -> u64 {
        self.bytes / 1024
    }
}

/// Write encoded bytes to `path` and report the written size.
pub fn write_output(path: &Path, encoded: &[u8]) -> Result<OutputRecord, EmitError> {
    fs::write(path, encoded)?;
    let bytes = fs::metadata(path)?.len();
    Ok(OutputRecord {
        path: path.to_path_buf(),
        bytes,
    })
}
