//! 256-bin intensity histograms.
//!
//! Raw counts are min-max normalized to `[0, 256]` so that peak heights are
//! comparable across images of different sizes. A histogram whose bins are
//! all equal normalizes to all zeros.

use crate::{GrayImageView, ImageError};
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Number of intensity bins.
pub const BINS: usize = 256;

/// Upper end of the normalized bin range.
pub const NORMALIZED_MAX: f32 = BINS as f32;

/// Normalized 256-bin intensity histogram.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f32>", into = "Vec<f32>")]
pub struct Histogram {
    bins: Vec<f32>,
}

impl Histogram {
    /// Build from raw counts with min-max normalization to `[0, 256]`.
    pub fn from_counts(counts: &[u32; BINS]) -> Self {
        let min = counts.iter().copied().min().unwrap_or(0) as f64;
        let max = counts.iter().copied().max().unwrap_or(0) as f64;
        let range = max - min;
        let scale = if range > 0.0 {
            NORMALIZED_MAX as f64 / range
        } else {
            0.0
        };
        let bins = counts
            .iter()
            .map(|&c| ((c as f64 - min) * scale) as f32)
            .collect();
        Self { bins }
    }

    /// Wrap explicit bin values without normalizing them.
    pub fn from_bins(bins: [f32; BINS]) -> Self {
        Self {
            bins: bins.to_vec(),
        }
    }

    #[inline]
    pub fn bins(&self) -> &[f32] {
        &self.bins
    }

    #[inline]
    pub fn get(&self, intensity: u8) -> f32 {
        self.bins[intensity as usize]
    }

    pub fn sum(&self) -> f64 {
        self.bins.iter().map(|&v| v as f64).sum()
    }

    /// True if no bin holds a positive value.
    pub fn is_empty(&self) -> bool {
        self.bins.iter().all(|&v| v <= 0.0)
    }
}

impl TryFrom<Vec<f32>> for Histogram {
    type Error = String;

    fn try_from(bins: Vec<f32>) -> Result<Self, Self::Error> {
        if bins.len() != BINS {
            return Err(format!("histogram needs {BINS} bins, got {}", bins.len()));
        }
        Ok(Self { bins })
    }
}

impl From<Histogram> for Vec<f32> {
    fn from(hist: Histogram) -> Self {
        hist.bins
    }
}

/// Count pixel intensities, optionally restricted to pixels where `mask` is nonzero.
#[cfg_attr(
    feature = "tracing",
    instrument(
        level = "debug",
        skip(img, mask),
        fields(width = img.width, height = img.height, masked = mask.is_some())
    )
)]
pub fn intensity_counts(
    img: &GrayImageView<'_>,
    mask: Option<&GrayImageView<'_>>,
) -> Result<[u32; BINS], ImageError> {
    let mut counts = [0u32; BINS];
    match mask {
        None => {
            for &v in img.data {
                counts[v as usize] += 1;
            }
        }
        Some(mask) => {
            if !img.same_size(mask) {
                return Err(ImageError::MaskSizeMismatch {
                    width: img.width,
                    height: img.height,
                    mask_width: mask.width,
                    mask_height: mask.height,
                });
            }
            for (&v, &m) in img.data.iter().zip(mask.data) {
                if m != 0 {
                    counts[v as usize] += 1;
                }
            }
        }
    }
    Ok(counts)
}

/// Normalized histogram of `img`, optionally restricted to `mask`.
pub fn histogram(
    img: &GrayImageView<'_>,
    mask: Option<&GrayImageView<'_>>,
) -> Result<Histogram, ImageError> {
    intensity_counts(img, mask).map(|counts| Histogram::from_counts(&counts))
}
