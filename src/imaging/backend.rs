//! Image pipeline backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the three operations the conversion
//! pipeline needs: decode, resample, and encode. The production
//! implementation is [`RustBackend`](super::rust_backend::RustBackend); the
//! trait exists so the batch driver can be exercised against a recording
//! mock without touching real codecs.

use super::params::Quality;
use crate::formats::SourceFormat;
use image::DynamicImage;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("decode failed: {0}")]
    Decode(String),
    #[error("encode failed: {0}")]
    Encode(String),
}

/// Trait for image decode/resample/encode implementations.
///
/// Every backend must implement all three operations so the batch driver is
/// backend-agnostic.
pub trait ImageBackend {
    /// Decode an image file into memory. The format was derived from the
    /// file extension at discovery; backends must not sniff content.
    fn decode(&self, path: &Path, format: SourceFormat) -> Result<DynamicImage, BackendError>;

    /// Resample an image to exactly `width` x `height`, consuming the input.
    fn resample(&self, image: DynamicImage, width: u32, height: u32) -> DynamicImage;

    /// Encode an image as lossy WebP at the given quality.
    fn encode(&self, image: &DynamicImage, quality: Quality) -> Result<Vec<u8>, BackendError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    /// Length of the byte buffer the mock encoder returns (1 KB when floored).
    pub const MOCK_ENCODED_LEN: usize = 1536;

    /// Mock backend that records operations and serves queued decode results.
    ///
    /// RefCell gives interior mutability through `&self`; the driver under
    /// test is single-threaded.
    #[derive(Default)]
    pub struct MockBackend {
        pub decode_results: RefCell<VecDeque<Option<(u32, u32)>>>,
        pub operations: RefCell<Vec<RecordedOp>>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedOp {
        Decode(String),
        Resample { width: u32, height: u32 },
        Encode { quality: u32 },
    }

    impl MockBackend {
        pub fn new() -> Self {
            Self::default()
        }

        /// Queue decode results in call order; `None` makes that decode fail.
        pub fn with_decodes(results: Vec<Option<(u32, u32)>>) -> Self {
            Self {
                decode_results: RefCell::new(results.into()),
                operations: RefCell::new(Vec::new()),
            }
        }

        pub fn get_operations(&self) -> Vec<RecordedOp> {
            self.operations.borrow().clone()
        }
    }

    impl ImageBackend for MockBackend {
        fn decode(&self, path: &Path, _format: SourceFormat) -> Result<DynamicImage, BackendError> {
            self.operations
                .borrow_mut()
                .push(RecordedOp::Decode(path.to_string_lossy().to_string()));

            match self.decode_results.borrow_mut().pop_front() {
                Some(Some((width, height))) => Ok(DynamicImage::new_rgb8(width, height)),
                Some(None) => Err(BackendError::Decode("mock decode failure".to_string())),
                None => Err(BackendError::Decode("no mock image queued".to_string())),
            }
        }

        fn resample(&self, _image: DynamicImage, width: u32, height: u32) -> DynamicImage {
            self.operations
                .borrow_mut()
                .push(RecordedOp::Resample { width, height });
            DynamicImage::new_rgb8(width, height)
        }

        fn encode(&self, _image: &DynamicImage, quality: Quality) -> Result<Vec<u8>, BackendError> {
            self.operations.borrow_mut().push(RecordedOp::Encode {
                quality: quality.value(),
            });
            Ok(vec![0u8; MOCK_ENCODED_LEN])
        }
    }

    #[test]
    fn mock_records_decode_and_serves_queued_dimensions() {
        let backend = MockBackend::with_decodes(vec![Some((800, 600))]);

        let image = backend
            .decode(Path::new("/test/image.jpg"), SourceFormat::Jpeg)
            .unwrap();
        assert_eq!((image.width(), image.height()), (800, 600));

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 1);
        assert!(matches!(&ops[0], RecordedOp::Decode(p) if p == "/test/image.jpg"));
    }

    #[test]
    fn mock_fails_decode_on_queued_none() {
        let backend = MockBackend::with_decodes(vec![None]);
        let result = backend.decode(Path::new("/test/broken.png"), SourceFormat::Png);
        assert!(matches!(result, Err(BackendError::Decode(_))));
    }

    #[test]
    fn mock_fails_decode_on_empty_queue() {
        let backend = MockBackend::new();
        let result = backend.decode(Path::new("/test/extra.jpg"), SourceFormat::Jpeg);
        assert!(matches!(result, Err(BackendError::Decode(_))));
    }

    #[test]
    fn mock_records_resample_and_encode() {
        let backend = MockBackend::new();

        let resampled = backend.resample(DynamicImage::new_rgb8(100, 50), 80, 40);
        assert_eq!((resampled.width(), resampled.height()), (80, 40));

        let bytes = backend.encode(&resampled, Quality::new(90)).unwrap();
        assert_eq!(bytes.len(), MOCK_ENCODED_LEN);

        let ops = backend.get_operations();
        assert_eq!(
            ops,
            vec![
                RecordedOp::Resample {
                    width: 80,
                    height: 40
                },
                RecordedOp::Encode { quality: 90 },
            ]
        );
    }
}
