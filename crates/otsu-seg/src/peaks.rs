//! Statistical peak detection on 256-bin histograms.
//!
//! A bin is "high" when it exceeds `min(5μ, μ + σ)`, where μ and σ are the
//! mean and population standard deviation of all bins. Every maximal run of
//! high bins contributes exactly one peak: its tallest bin.

use otsu_seg_core::Histogram;
use serde::{Deserialize, Serialize};

/// Tallest bin of a run of above-threshold bins.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Peak {
    pub intensity: u8,
    pub height: f32,
}

/// Peaks ordered by strictly ascending intensity.
///
/// Serialized as a plain array; deserialization re-sorts and dedups it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Peak>", into = "Vec<Peak>")]
pub struct PeakSet {
    peaks: Vec<Peak>,
}

impl PeakSet {
    /// Build a set from arbitrary peaks, sorting by intensity and keeping the
    /// first peak seen for a repeated intensity.
    pub fn from_peaks(mut peaks: Vec<Peak>) -> Self {
        peaks.sort_by_key(|p| p.intensity);
        peaks.dedup_by_key(|p| p.intensity);
        Self { peaks }
    }

    /// Peaks at the given intensities with zero height.
    pub fn from_intensities(intensities: &[u8]) -> Self {
        Self::from_peaks(
            intensities
                .iter()
                .map(|&intensity| Peak {
                    intensity,
                    height: 0.0,
                })
                .collect(),
        )
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.peaks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.peaks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Peak> {
        self.peaks.iter()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Peak] {
        &self.peaks
    }

    pub fn intensities(&self) -> Vec<u8> {
        self.peaks.iter().map(|p| p.intensity).collect()
    }

    /// Exact intensity match; neighbouring bins do not count.
    pub fn contains_intensity(&self, intensity: u8) -> bool {
        self.peaks
            .binary_search_by_key(&intensity, |p| p.intensity)
            .is_ok()
    }
}

impl From<Vec<Peak>> for PeakSet {
    fn from(peaks: Vec<Peak>) -> Self {
        Self::from_peaks(peaks)
    }
}

impl From<PeakSet> for Vec<Peak> {
    fn from(set: PeakSet) -> Self {
        set.peaks
    }
}

impl<'a> IntoIterator for &'a PeakSet {
    type Item = &'a Peak;
    type IntoIter = std::slice::Iter<'a, Peak>;

    fn into_iter(self) -> Self::IntoIter {
        self.peaks.iter()
    }
}

/// Minimum height a bin must exceed to belong to a peak run.
pub fn peak_height_threshold(hist: &Histogram) -> f64 {
    let bins = hist.bins();
    let n = bins.len() as f64;
    let mean = bins.iter().map(|&v| v as f64).sum::<f64>() / n;
    let variance = bins
        .iter()
        .map(|&v| {
            let d = v as f64 - mean;
            d * d
        })
        .sum::<f64>()
        / n;
    (5.0 * mean).min(mean + variance.sqrt())
}

/// Find one peak per maximal run of bins above `peak_height_threshold`.
///
/// Within a run the first of several equally tall bins wins. A run still
/// open at bin 255 is closed there.
pub fn detect_peaks(hist: &Histogram) -> PeakSet {
    let min_height = peak_height_threshold(hist);
    let mut peaks = Vec::new();
    let mut current: Option<Peak> = None;

    for (i, &v) in hist.bins().iter().enumerate() {
        if (v as f64) > min_height {
            let candidate = Peak {
                intensity: i as u8,
                height: v,
            };
            match current {
                Some(best) if v > best.height => current = Some(candidate),
                Some(_) => {}
                None => current = Some(candidate),
            }
        } else if let Some(best) = current.take() {
            peaks.push(best);
        }
    }
    peaks.extend(current);

    PeakSet { peaks }
}
