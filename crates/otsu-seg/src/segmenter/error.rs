use otsu_seg_core::ImageError;
use serde::{Deserialize, Serialize};

/// Why an image was returned unmodified instead of being thresholded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PassthroughReason {
    /// The normalized histogram has no positive bin.
    EmptyHistogram,
    /// More than two peaks, none of which lines up with a border peak.
    NoBackgroundMatch,
    /// Two thresholds were requested but no three-class split exists.
    NoDualSplit,
}

impl std::fmt::Display for PassthroughReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            Self::EmptyHistogram => "histogram has no populated bins",
            Self::NoBackgroundMatch => "no image peak matches a border peak",
            Self::NoDualSplit => "no valid dual-threshold split",
        };
        f.write_str(msg)
    }
}

/// Errors returned by the segmenter.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SegmentError {
    #[error("unsupported channel count {channels} (expected 1, 3 or 4)")]
    InvalidChannelCount { channels: usize },
    #[error("image {width}x{height} is too small for a {border_width}px border sample")]
    InvalidImageSize {
        width: usize,
        height: usize,
        border_width: usize,
    },
    #[error("degenerate histogram: {0}")]
    DegenerateHistogram(PassthroughReason),
    #[error(transparent)]
    Image(ImageError),
}

impl From<ImageError> for SegmentError {
    fn from(err: ImageError) -> Self {
        match err {
            ImageError::InvalidChannelCount { channels } => Self::InvalidChannelCount { channels },
            other => Self::Image(other),
        }
    }
}
