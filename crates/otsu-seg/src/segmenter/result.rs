use super::PassthroughReason;
use crate::classify::ThresholdPlan;
use crate::debug::DebugArtifacts;
use crate::peaks::PeakSet;
use otsu_seg_core::Image;

/// Output of a segmentation run.
#[derive(Clone, Debug)]
pub struct SegmentationResult {
    /// Single-channel segmented image (background 0, foreground 255), or a
    /// copy of the caller's input, channels included, when `passthrough` is
    /// set.
    pub image: Image,
    /// Plan that produced `image`; `None` on passthrough.
    pub plan: Option<ThresholdPlan>,
    pub passthrough: Option<PassthroughReason>,
    /// Peaks of the full-image histogram.
    pub peaks: PeakSet,
    /// Peaks of the border-ring histogram.
    pub background_peaks: PeakSet,
    pub debug: Option<DebugArtifacts>,
}

impl SegmentationResult {
    #[inline]
    pub fn is_passthrough(&self) -> bool {
        self.passthrough.is_some()
    }
}
