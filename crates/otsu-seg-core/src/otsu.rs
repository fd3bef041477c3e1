//! Single-threshold Otsu binarization.

use crate::histogram::BINS;
use crate::{GrayImage, GrayImageView};

/// Compute the Otsu threshold from raw intensity counts.
///
/// Pixels `<= level` form the lower class. An empty histogram yields 127, a
/// single populated intensity yields that intensity, and two populated
/// intensities yield their midpoint.
pub fn otsu_level(hist: &[u32; BINS]) -> u8 {
    let mut populated = hist
        .iter()
        .enumerate()
        .filter(|&(_, &h)| h > 0)
        .map(|(i, _)| i);
    let Some(first) = populated.next() else {
        return 127;
    };
    let last = populated.next_back().unwrap_or(first);
    if populated.next().is_none() {
        // At most two populated intensities.
        return ((first + last) / 2) as u8;
    }

    let n: u64 = hist.iter().map(|&h| h as u64).sum();
    let total_moment: u64 = hist
        .iter()
        .enumerate()
        .map(|(i, &h)| i as u64 * h as u64)
        .sum();

    let mut below = 0u64;
    let mut below_moment = 0u64;
    let mut best = (f64::NEG_INFINITY, first as u8);

    for t in first..last {
        below += hist[t] as u64;
        below_moment += t as u64 * hist[t] as u64;
        let above = n - below;

        let (wb, wa) = (below as f64, above as f64);
        let mean_diff = below_moment as f64 / wb - (total_moment - below_moment) as f64 / wa;
        let score = wb * wa * mean_diff * mean_diff;
        if score > best.0 {
            best = (score, t as u8);
        }
    }

    best.1
}

/// Binarize with a fixed level: `> level` becomes 255, the rest 0.
///
/// With `invert` the output values are swapped.
pub fn threshold_binary(img: &GrayImageView<'_>, level: u8, invert: bool) -> GrayImage {
    let (above, below) = if invert { (0u8, 255u8) } else { (255u8, 0u8) };
    GrayImage {
        width: img.width,
        height: img.height,
        data: img
            .data
            .iter()
            .map(|&v| if v > level { above } else { below })
            .collect(),
    }
}
