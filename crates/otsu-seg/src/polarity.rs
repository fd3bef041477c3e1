//! Decide which side of the threshold(s) holds the background.
//!
//! The decision is a heuristic, so it sits behind the `PolarityPolicy`
//! trait; `BorderPeakPolicy` is the default used by the segmenter.

use crate::dual_otsu::DualThresholds;
use crate::peaks::PeakSet;
use serde::{Deserialize, Serialize};

/// Default mean border-peak intensity up to which the background counts as dark.
pub const DEFAULT_DARK_CUTOFF: u8 = 136;

/// Background tone for a single threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackgroundTone {
    /// Background lies at or below the threshold.
    Dark,
    /// Background lies above the threshold.
    Light,
}

/// Where the background lies relative to a `(low, high)` band.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BandPlacement {
    /// Strictly between `low` and `high`.
    Inside,
    /// At or below `low`, or at or above `high`.
    Outside,
}

/// Strategy deciding output polarity from peak information.
pub trait PolarityPolicy {
    fn single(&self, image_peaks: &PeakSet, background_peaks: &PeakSet) -> BackgroundTone;

    fn dual(&self, thresholds: DualThresholds, background_peaks: &PeakSet) -> BandPlacement;
}

/// Polarity from the border peaks.
///
/// Single threshold: if every border peak is also an image peak, the
/// background is dark when the integer mean of the border peak intensities
/// is at most `dark_cutoff`, light otherwise. Any mismatch, or no border
/// peaks at all, falls back to dark.
///
/// Dual threshold: the background is inside the band iff every border peak
/// lies strictly between the cuts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorderPeakPolicy {
    pub dark_cutoff: u8,
}

impl Default for BorderPeakPolicy {
    fn default() -> Self {
        Self {
            dark_cutoff: DEFAULT_DARK_CUTOFF,
        }
    }
}

impl PolarityPolicy for BorderPeakPolicy {
    fn single(&self, image_peaks: &PeakSet, background_peaks: &PeakSet) -> BackgroundTone {
        if background_peaks.is_empty() {
            return BackgroundTone::Dark;
        }
        let all_matched = background_peaks
            .iter()
            .all(|p| image_peaks.contains_intensity(p.intensity));
        if !all_matched {
            log::debug!("border peaks do not line up with image peaks, assuming dark background");
            return BackgroundTone::Dark;
        }

        let sum: usize = background_peaks.iter().map(|p| p.intensity as usize).sum();
        let mean = sum / background_peaks.len();
        if mean <= self.dark_cutoff as usize {
            BackgroundTone::Dark
        } else {
            BackgroundTone::Light
        }
    }

    fn dual(&self, thresholds: DualThresholds, background_peaks: &PeakSet) -> BandPlacement {
        if background_peaks
            .iter()
            .all(|p| thresholds.contains_strict(p.intensity))
        {
            BandPlacement::Inside
        } else {
            BandPlacement::Outside
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(intensities: &[u8]) -> PeakSet {
        PeakSet::from_intensities(intensities)
    }

    #[test]
    fn dark_border_matching_image_is_dark() {
        let policy = BorderPeakPolicy::default();
        assert_eq!(policy.single(&set(&[20, 200]), &set(&[20])), BackgroundTone::Dark);
    }

    #[test]
    fn light_border_matching_image_is_light() {
        let policy = BorderPeakPolicy::default();
        assert_eq!(policy.single(&set(&[20, 200]), &set(&[200])), BackgroundTone::Light);
    }

    #[test]
    fn cutoff_is_inclusive_on_integer_mean() {
        let policy = BorderPeakPolicy::default();
        // (136 + 137) / 2 = 136 in integer arithmetic.
        let image = set(&[136, 137, 250]);
        assert_eq!(policy.single(&image, &set(&[136, 137])), BackgroundTone::Dark);
        assert_eq!(policy.single(&image, &set(&[137])), BackgroundTone::Light);
    }

    #[test]
    fn mismatch_or_empty_falls_back_to_dark() {
        let policy = BorderPeakPolicy::default();
        assert_eq!(policy.single(&set(&[20, 200]), &set(&[201])), BackgroundTone::Dark);
        assert_eq!(policy.single(&set(&[20, 200]), &set(&[200, 201])), BackgroundTone::Dark);
        assert_eq!(policy.single(&set(&[20, 200]), &set(&[])), BackgroundTone::Dark);
    }

    #[test]
    fn custom_cutoff() {
        let policy = BorderPeakPolicy { dark_cutoff: 250 };
        assert_eq!(policy.single(&set(&[20, 200]), &set(&[200])), BackgroundTone::Dark);
    }

    #[test]
    fn band_placement_requires_all_peaks_strictly_inside() {
        let policy = BorderPeakPolicy::default();
        let t = DualThresholds::new(60, 180).unwrap();
        assert_eq!(policy.dual(t, &set(&[120])), BandPlacement::Inside);
        assert_eq!(policy.dual(t, &set(&[100, 150])), BandPlacement::Inside);
        assert_eq!(policy.dual(t, &set(&[60])), BandPlacement::Outside);
        assert_eq!(policy.dual(t, &set(&[120, 180])), BandPlacement::Outside);
        assert_eq!(policy.dual(t, &set(&[30, 220])), BandPlacement::Outside);
        assert_eq!(policy.dual(t, &set(&[])), BandPlacement::Inside);
    }
}
