//! Input format identification.
//!
//! Eligibility is decided by the file extension alone, matched ASCII
//! case-insensitively against a fixed accepted set. There is no content
//! sniffing: a `.png` holding JPEG bytes is dispatched as PNG and fails at
//! decode time, which is reported per file.

use std::path::Path;

/// Accepted input extensions and the format each one maps to.
const ACCEPTED: &[(&str, SourceFormat)] = &[
    ("heic", SourceFormat::Heic),
    ("jpg", SourceFormat::Jpeg),
    ("jpeg", SourceFormat::Jpeg),
    ("png", SourceFormat::Png),
];

/// Source image format, derived from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Heic,
    Jpeg,
    Png,
}

impl SourceFormat {
    /// Match an extension (without the dot) against the accepted set.
    pub fn from_extension(ext: &str) -> Option<Self> {
        ACCEPTED
            .iter()
            .find(|(accepted, _)| ext.eq_ignore_ascii_case(accepted))
            .map(|(_, format)| *format)
    }

    /// Derive the format from a path's extension, if it is accepted.
    ///
    /// A file named exactly `.jpg` has no extension under `Path` semantics
    /// and is not eligible.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }
}

/// The accepted input extensions, lowercase, without dots.
pub fn accepted_extensions() -> Vec<&'static str> {
    ACCEPTED.iter().map(|(ext, _)| *ext).collect()
}
