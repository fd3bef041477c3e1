//! Debug rendering of the intensity histogram.
//!
//! The plot is an RGB raster, 300 x 256 pixels: black bars growing upward
//! from the bottom edge, red vertical lines at the dual Otsu cuts and blue
//! vertical lines at the detected peaks.

use crate::dual_otsu::DualThresholds;
use crate::peaks::PeakSet;
use otsu_seg_core::{Histogram, BINS};

pub const PLOT_WIDTH: usize = 300;
pub const PLOT_HEIGHT: usize = 256;

const WHITE: [u8; 3] = [255, 255, 255];
const BAR: [u8; 3] = [0, 0, 0];
const CUT: [u8; 3] = [255, 0, 0];
const PEAK: [u8; 3] = [0, 0, 255];

const BAR_THICKNESS: usize = 3;
const CUT_THICKNESS: usize = 2;

/// Interleaved RGB raster.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistogramPlot {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>, // row-major, RGB, len = w*h*3
}

impl HistogramPlot {
    fn blank(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: WHITE.repeat(width * height),
        }
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        let i = (y * self.width + x) * 3;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    fn put(&mut self, x: usize, y: usize, color: [u8; 3]) {
        if x < self.width && y < self.height {
            let i = (y * self.width + x) * 3;
            self.data[i..i + 3].copy_from_slice(&color);
        }
    }

    fn vline(&mut self, x: usize, thickness: usize, color: [u8; 3]) {
        for dx in 0..thickness {
            for y in 0..self.height {
                self.put(x + dx, y, color);
            }
        }
    }
}

/// Everything the segmenter exposes when debug artifacts are requested.
#[derive(Clone, Debug)]
pub struct DebugArtifacts {
    /// Normalized full-image histogram.
    pub histogram: Histogram,
    /// Peaks of `histogram`.
    pub peaks: PeakSet,
    /// Dual Otsu cuts of `histogram`, computed whatever plan was chosen.
    pub dual_thresholds: Option<DualThresholds>,
    pub plot: HistogramPlot,
}

/// Render bars, cut lines and peak lines. Bar heights are bin values
/// clamped to the plot height.
pub fn render_histogram_plot(
    hist: &Histogram,
    peaks: &PeakSet,
    cuts: Option<DualThresholds>,
) -> HistogramPlot {
    let mut plot = HistogramPlot::blank(PLOT_WIDTH, PLOT_HEIGHT);

    for (i, &v) in hist.bins().iter().enumerate().take(BINS) {
        let top = (v.max(0.0).round() as usize).min(plot.height);
        let x0 = i.saturating_sub(BAR_THICKNESS / 2);
        for x in x0..=i + BAR_THICKNESS / 2 {
            for k in 0..top {
                plot.put(x, plot.height - 1 - k, BAR);
            }
        }
    }

    if let Some(t) = cuts {
        plot.vline(t.low as usize, CUT_THICKNESS, CUT);
        plot.vline(t.high as usize, CUT_THICKNESS, CUT);
    }

    for p in peaks {
        plot.vline(p.intensity as usize, 1, PEAK);
    }

    plot
}

/// Collect the debug bundle for a histogram.
pub fn debug_artifacts(hist: &Histogram, peaks: &PeakSet) -> DebugArtifacts {
    let dual_thresholds = crate::dual_otsu::solve_dual_otsu(hist);
    DebugArtifacts {
        histogram: hist.clone(),
        peaks: peaks.clone(),
        dual_thresholds,
        plot: render_histogram_plot(hist, peaks, dual_thresholds),
    }
}
