use crate::background::DEFAULT_BORDER_WIDTH;
use crate::polarity::DEFAULT_DARK_CUTOFF;
use serde::{Deserialize, Serialize};

/// Configuration for the segmenter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmenterParams {
    /// Width in pixels of the border ring sampled for background peaks.
    ///
    /// Images must be wider and taller than twice this value.
    pub border_width: usize,
    /// Mean border-peak intensity up to which a single-threshold background
    /// counts as dark. Only used by the default polarity policy.
    pub dark_cutoff: u8,
    /// Attach a `DebugArtifacts` bundle (histogram, peaks, plot) to results.
    pub emit_debug_artifacts: bool,
}

impl Default for SegmenterParams {
    fn default() -> Self {
        Self {
            border_width: DEFAULT_BORDER_WIDTH,
            dark_cutoff: DEFAULT_DARK_CUTOFF,
            emit_debug_artifacts: false,
        }
    }
}
