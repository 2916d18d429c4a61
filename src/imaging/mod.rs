//! Image decode, resize math, and WebP encode.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode JPEG/PNG** | `image` crate, extension-driven reader |
//! | **Decode HEIC** | `libheif-rs`, interleaved plane → pixel buffer |
//! | **Fit calculation** | [`fit_within`] (pure, no I/O) |
//! | **Resample** | `resize_exact` + Lanczos3 |
//! | **Encode WebP** | `webp` crate advanced API |
//!
//! The module is split into:
//! - **Calculations**: pure functions for dimension math (unit testable)
//! - **Params**: [`Quality`] and [`ResizeLimits`]
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]

pub mod backend;
mod calculations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, ImageBackend};
pub use calculations::fit_within;
pub use params::{Quality, ResizeLimits};
pub use rust_backend::RustBackend;
