//! Image primitives used by the `otsu-seg` segmentation pipeline.
//!
//! Everything here is deliberately generic: row-major 8-bit image views,
//! luminance conversion, masked 256-bin histograms and single-threshold
//! Otsu binarization. The adaptive decision logic lives in `otsu-seg`.

mod error;
mod gray;
mod histogram;
mod image;
mod logger;
mod otsu;

pub use error::ImageError;
pub use gray::to_grayscale;
pub use histogram::{histogram, intensity_counts, Histogram, BINS, NORMALIZED_MAX};
pub use image::{GrayImage, GrayImageView, Image, ImageView};
pub use otsu::{otsu_level, threshold_binary};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
