//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

use super::params::ResizeLimits;

/// Compute the dimensions an image must be resized to so it fits within the
/// given limits, preserving aspect ratio.
///
/// Returns `None` when the image already fits, including when no limit is
/// set at all. Both caps only ever shrink; an image is never enlarged.
///
/// The width cap is applied first, then the height cap on top of the
/// width-capped result. The aspect ratio used throughout derives from the
/// *original* dimensions, and fractional results truncate toward zero, so a
/// capped axis lands exactly on its limit while the derived axis can
/// undershoot the ideal value by up to one pixel. Derived dimensions are
/// floored at 1 pixel.
///
/// # Examples
/// ```
/// use webpify::imaging::{ResizeLimits, fit_within};
///
/// // Width cap only: 1600x1200 into max width 800
/// let limits = ResizeLimits::new(Some(800), None);
/// assert_eq!(fit_within((1600, 1200), &limits), Some((800, 600)));
///
/// // Both caps: the width cap gives 800x600, the height cap then 533x400
/// let limits = ResizeLimits::new(Some(800), Some(400));
/// assert_eq!(fit_within((1600, 1200), &limits), Some((533, 400)));
///
/// // Already inside the limits: no resize
/// let limits = ResizeLimits::new(Some(800), None);
/// assert_eq!(fit_within((640, 480), &limits), None);
/// ```
pub fn fit_within(original: (u32, u32), limits: &ResizeLimits) -> Option<(u32, u32)> {
    if limits.is_unbounded() {
        return None;
    }

    let (orig_w, orig_h) = original;
    let aspect = orig_w as f64 / orig_h as f64;
    let (mut w, mut h) = (orig_w, orig_h);

    if let Some(max_w) = limits.max_width
        && orig_w > max_w
    {
        w = max_w;
        h = ((w as f64 / aspect) as u32).max(1);
    }

    if let Some(max_h) = limits.max_height
        && h > max_h
    {
        h = max_h;
        w = ((h as f64 * aspect) as u32).max(1);
    }

    if (w, h) == (orig_w, orig_h) {
        None
    } else {
        Some((w, h))
    }
}
