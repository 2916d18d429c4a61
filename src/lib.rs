//! # Webpify
//!
//! A batch converter that turns a folder of HEIC, JPEG, and PNG photos into
//! lossy WebP, optionally scaled down to fit a bounding box. Point it at an
//! input folder and an output folder; every eligible image comes out as
//! `<stem>.webp` with a per-file progress line showing the output path and
//! size.
//!
//! # Architecture: Per-File Pipeline
//!
//! A run is a discovery pass followed by one independent pipeline per file:
//!
//! ```text
//! discover   input/        →  [SourceFile]     (extension filter, sorted by name)
//! decode     SourceFile    →  DynamicImage     (format picked by extension)
//! fit        (w, h)        →  Option<(w, h)>   (pure arithmetic, None = keep size)
//! resample   DynamicImage  →  DynamicImage     (Lanczos3, only when fit says so)
//! encode     DynamicImage  →  Vec<u8>          (lossy WebP)
//! write      Vec<u8>       →  OutputRecord     (path + size on disk)
//! ```
//!
//! Files are processed strictly in sorted order, and each file runs inside
//! its own failure boundary: a corrupt input is recorded and reported, and
//! the batch moves on. The process exits non-zero if any file failed.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`formats`] | Accepted input extensions and the [`formats::SourceFormat`] they map to |
//! | [`imaging`] | Pixel work: the [`imaging::ImageBackend`] trait, its production implementation, fit arithmetic, quality/limit parameters |
//! | [`emit`] | Output naming (`<stem>.webp`), writing, and on-disk size measurement |
//! | [`batch`] | Discovery and the sequential driver with per-file failure isolation |
//! | [`output`] | CLI report formatting, human lines or a JSON object |
//!
//! # Design Decisions
//!
//! ## WebP-Only Output
//!
//! All outputs are lossy WebP. The format has had [universal browser support
//! since 2020](https://caniuse.com/webp) and typically lands at a fraction of
//! the equivalent JPEG's size, which is the point of running this tool on a
//! photo folder bound for the web. A single output format also keeps the
//! output directory self-describing: every file in it is `<stem>.webp`.
//!
//! ## Extension-Pinned Decoding
//!
//! The file extension alone decides both eligibility and decoder, with no
//! content sniffing. A mislabelled file fails its decode and is reported as
//! failed, which surfaces the mislabelling instead of silently papering over
//! it.
//!
//! ## Per-File Failure Isolation
//!
//! One corrupt photo must not sink a 400-file conversion. Decode, encode,
//! and write errors are captured per file ([`batch::FileStatus::Failed`]),
//! the run continues, and the summary repeats every failure so none scroll
//! out of sight. Only a missing input directory or an uncreatable output
//! directory aborts the run.
//!
//! ## Backend Seam
//!
//! Decode, resample, and encode sit behind the [`imaging::ImageBackend`]
//! trait. The driver and its tests run against a recording mock, so ordering
//! and policy logic (skip/overwrite, resample-only-when-needed) are tested
//! without encoding a single pixel. The production [`imaging::RustBackend`]
//! uses the `image` crate for JPEG/PNG, `libheif-rs` for HEIC, and the
//! `webp` crate for encoding.

pub mod batch;
pub mod emit;
pub mod formats;
pub mod imaging;
pub mod output;
