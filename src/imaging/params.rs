//! Parameter types for the conversion pipeline.
//!
//! These types describe *what* to do, not *how* to do it. They are the
//! interface between the [`batch`](crate::batch) driver (which decides what
//! to convert) and the [`backend`](super::backend) (which does the actual
//! pixel work).
//!
//! ## Types
//!
//! - [`Quality`]: lossy WebP quality (0-100, default 80), clamped on construction.
//! - [`ResizeLimits`]: optional maximum width/height the output must fit within.

/// Quality setting for lossy WebP encoding (0-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.min(100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(80)
    }
}

/// Optional dimension caps the converted image must fit within.
///
/// No cap on either axis means "never resize". The caps shrink only: an
/// image already inside the limits is left at its original size. How the
/// caps combine is defined by [`fit_within`](super::calculations::fit_within).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResizeLimits {
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
}

impl ResizeLimits {
    pub fn new(max_width: Option<u32>, max_height: Option<u32>) -> Self {
        Self {
            max_width,
            max_height,
        }
    }

    /// True when no cap is set on either axis.
    pub fn is_unbounded(&self) -> bool {
        self.max_width.is_none() && self.max_height.is_none()
    }
}
