//! End-to-end segmentation pipeline.
//!
//! Histogram and border sampling feed the threshold planner; the plan is
//! resolved with a polarity policy and applied by the classifier.

mod error;
mod params;
mod pipeline;
mod result;

pub use error::{PassthroughReason, SegmentError};
pub use params::SegmenterParams;
pub use pipeline::Segmenter;
pub use result::SegmentationResult;
