//! Adaptive single/dual Otsu foreground segmentation.
//!
//! The segmenter looks at the peaks of an image's intensity histogram and at
//! the peaks of a thin border ring, which is assumed to show background. From
//! how the two peak sets interleave it decides between:
//! - one global Otsu threshold, with polarity picked from the border tone,
//! - two thresholds from a dual (three-class) Otsu search, with the
//!   background either inside or outside the band,
//! - passing the image through untouched when the histogram is degenerate.
//!
//! ## Quickstart
//!
//! ```
//! use otsu_seg::{Segmenter, SegmenterParams};
//! use otsu_seg::core::GrayImage;
//!
//! let mut img = GrayImage::filled(32, 32, 210);
//! img.fill_rect(10, 10, 21, 21, 40);
//!
//! let segmenter = Segmenter::new(SegmenterParams::default());
//! let result = segmenter.segment_gray(&img.view()).unwrap();
//! assert!(!result.is_passthrough());
//! let mask = result.image.as_gray().unwrap();
//! assert_eq!(mask.get(0, 0), otsu_seg::BACKGROUND);
//! assert_eq!(mask.get(15, 15), otsu_seg::FOREGROUND);
//! ```
//!
//! ## API map
//! - `peaks`: peak detection on normalized histograms.
//! - `background`: border-ring sampling of background peaks.
//! - `planner`: single vs. dual threshold decision.
//! - `dual_otsu`: exhaustive two-threshold Otsu search.
//! - `polarity`: which class is background.
//! - `classify`: per-pixel labelling from a `ThresholdPlan`.
//! - `images` (feature `image`): helpers for `image` crate buffers.

pub mod background;
pub mod classify;
pub mod debug;
pub mod dual_otsu;
pub mod io;
pub mod peaks;
pub mod planner;
pub mod polarity;
mod segmenter;

#[cfg(feature = "image")]
pub mod images;

pub use otsu_seg_core as core;

pub use classify::{ThresholdPlan, BACKGROUND, FOREGROUND};
pub use debug::{DebugArtifacts, HistogramPlot};
pub use dual_otsu::DualThresholds;
pub use io::{SegmentConfig, SegmentIoError, SegmentReport};
pub use peaks::{Peak, PeakSet};
pub use planner::{PeakRole, ThresholdCount};
pub use polarity::{BackgroundTone, BandPlacement, BorderPeakPolicy, PolarityPolicy};
pub use segmenter::{
    PassthroughReason, SegmentError, SegmentationResult, Segmenter, SegmenterParams,
};
