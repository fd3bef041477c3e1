//! Turn a threshold plan into a two-valued image.
//!
//! Output convention: background pixels are 0, foreground pixels are 255.

use crate::dual_otsu::DualThresholds;
use crate::polarity::{BackgroundTone, BandPlacement};
use otsu_seg_core::{threshold_binary, GrayImage, GrayImageView};
use serde::{Deserialize, Serialize};

pub const BACKGROUND: u8 = 0;
pub const FOREGROUND: u8 = 255;

/// Resolved thresholds together with their polarity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ThresholdPlan {
    /// One Otsu level; pixels `> level` are on the light side.
    Single { level: u8, background: BackgroundTone },
    /// Two cuts; pixels strictly between them form the band.
    Dual {
        low: u8,
        high: u8,
        background: BandPlacement,
    },
}

impl ThresholdPlan {
    pub fn dual(thresholds: DualThresholds, background: BandPlacement) -> Self {
        Self::Dual {
            low: thresholds.low,
            high: thresholds.high,
            background,
        }
    }
}

/// Binarize with one level. A light background inverts the output.
pub fn classify_single(img: &GrayImageView<'_>, level: u8, background: BackgroundTone) -> GrayImage {
    threshold_binary(img, level, background == BackgroundTone::Light)
}

/// Binarize by band membership: `low < v < high` is inside, the rest outside.
pub fn classify_dual(
    img: &GrayImageView<'_>,
    thresholds: DualThresholds,
    background: BandPlacement,
) -> GrayImage {
    let (inside, outside) = match background {
        BandPlacement::Inside => (BACKGROUND, FOREGROUND),
        BandPlacement::Outside => (FOREGROUND, BACKGROUND),
    };
    GrayImage {
        width: img.width,
        height: img.height,
        data: img
            .data
            .iter()
            .map(|&v| {
                if thresholds.contains_strict(v) {
                    inside
                } else {
                    outside
                }
            })
            .collect(),
    }
}

/// Apply a plan to a grayscale image.
pub fn classify(img: &GrayImageView<'_>, plan: &ThresholdPlan) -> GrayImage {
    match *plan {
        ThresholdPlan::Single { level, background } => classify_single(img, level, background),
        ThresholdPlan::Dual {
            low,
            high,
            background,
        } => match DualThresholds::new(low, high) {
            Some(t) => classify_dual(img, t, background),
            // An empty band leaves every pixel outside.
            None => {
                let outside = match background {
                    BandPlacement::Inside => FOREGROUND,
                    BandPlacement::Outside => BACKGROUND,
                };
                GrayImage::filled(img.width, img.height, outside)
            }
        },
    }
}
