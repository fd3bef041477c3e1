use super::{PassthroughReason, SegmentError, SegmentationResult, SegmenterParams};
use crate::background::{background_peaks, check_border_fits};
use crate::classify::{classify, ThresholdPlan};
use crate::debug::debug_artifacts;
use crate::dual_otsu::solve_dual_otsu;
use crate::peaks::{detect_peaks, PeakSet};
use crate::planner::{plan_threshold_count, ThresholdCount};
use crate::polarity::{BorderPeakPolicy, PolarityPolicy};
use otsu_seg_core::{
    intensity_counts, otsu_level, to_grayscale, GrayImageView, Histogram, Image, ImageView, BINS,
};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Adaptive single/dual Otsu segmenter.
pub struct Segmenter<P = BorderPeakPolicy> {
    params: SegmenterParams,
    policy: P,
}

impl Segmenter<BorderPeakPolicy> {
    /// Segmenter with the default border-peak polarity policy.
    pub fn new(params: SegmenterParams) -> Self {
        let policy = BorderPeakPolicy {
            dark_cutoff: params.dark_cutoff,
        };
        Self { params, policy }
    }
}

impl Default for Segmenter<BorderPeakPolicy> {
    fn default() -> Self {
        Self::new(SegmenterParams::default())
    }
}

struct Analysis {
    histogram: Histogram,
    peaks: PeakSet,
    background_peaks: PeakSet,
    plan: Result<ThresholdPlan, PassthroughReason>,
}

impl<P: PolarityPolicy> Segmenter<P> {
    /// Segmenter with a custom polarity policy.
    pub fn with_policy(params: SegmenterParams, policy: P) -> Self {
        Self { params, policy }
    }

    #[inline]
    pub fn params(&self) -> &SegmenterParams {
        &self.params
    }

    #[inline]
    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Convert a 1/3/4-channel image to grayscale and segment it.
    ///
    /// On passthrough the result holds the input exactly as given.
    #[cfg_attr(
        feature = "tracing",
        instrument(
            level = "info",
            skip(self, img),
            fields(width = img.width, height = img.height, channels = img.channels)
        )
    )]
    pub fn segment(&self, img: &ImageView<'_>) -> Result<SegmentationResult, SegmentError> {
        if !matches!(img.channels, 1 | 3 | 4) {
            return Err(SegmentError::InvalidChannelCount {
                channels: img.channels,
            });
        }
        check_border_fits(img.width, img.height, self.params.border_width)?;
        let gray = to_grayscale(img)?;
        let mut res = self.segment_gray(&gray.view())?;
        if res.is_passthrough() && img.channels != 1 {
            res.image = img.to_owned_image();
        }
        Ok(res)
    }

    /// Segment a grayscale image.
    ///
    /// Degenerate histograms are not an error here: the input is returned
    /// unmodified with `passthrough` set.
    #[cfg_attr(
        feature = "tracing",
        instrument(
            level = "info",
            skip(self, img),
            fields(width = img.width, height = img.height)
        )
    )]
    pub fn segment_gray(
        &self,
        img: &GrayImageView<'_>,
    ) -> Result<SegmentationResult, SegmentError> {
        let analysis = self.analyze_inner(img)?;

        let debug = self
            .params
            .emit_debug_artifacts
            .then(|| debug_artifacts(&analysis.histogram, &analysis.peaks));

        let (image, plan, passthrough) = match analysis.plan {
            Ok(plan) => (Image::from(classify(img, &plan)), Some(plan), None),
            Err(reason) => {
                log::warn!("passing image through unmodified: {reason}");
                (Image::from(img.to_owned_image()), None, Some(reason))
            }
        };

        Ok(SegmentationResult {
            image,
            plan,
            passthrough,
            peaks: analysis.peaks,
            background_peaks: analysis.background_peaks,
            debug,
        })
    }

    /// Compute the threshold plan without classifying pixels.
    ///
    /// Degenerate histograms surface as `SegmentError::DegenerateHistogram`.
    pub fn analyze(&self, img: &GrayImageView<'_>) -> Result<ThresholdPlan, SegmentError> {
        self.analyze_inner(img)?
            .plan
            .map_err(SegmentError::DegenerateHistogram)
    }

    fn analyze_inner(&self, img: &GrayImageView<'_>) -> Result<Analysis, SegmentError> {
        check_border_fits(img.width, img.height, self.params.border_width)?;

        let counts = intensity_counts(img, None)?;
        let histogram = Histogram::from_counts(&counts);
        let peaks = detect_peaks(&histogram);
        let background_peaks = background_peaks(img, self.params.border_width)?;
        log::debug!(
            "image peaks: {:?}, background peaks: {:?}",
            peaks.intensities(),
            background_peaks.intensities()
        );

        let plan = self.plan(&counts, &histogram, &peaks, &background_peaks);
        if let Ok(plan) = &plan {
            log::debug!("threshold plan: {plan:?}");
        }

        Ok(Analysis {
            histogram,
            peaks,
            background_peaks,
            plan,
        })
    }

    fn plan(
        &self,
        counts: &[u32; BINS],
        histogram: &Histogram,
        peaks: &PeakSet,
        background: &PeakSet,
    ) -> Result<ThresholdPlan, PassthroughReason> {
        if histogram.is_empty() {
            return Err(PassthroughReason::EmptyHistogram);
        }

        match plan_threshold_count(peaks, background) {
            ThresholdCount::None => Err(PassthroughReason::NoBackgroundMatch),
            ThresholdCount::Single => Ok(ThresholdPlan::Single {
                level: otsu_level(counts),
                background: self.policy.single(peaks, background),
            }),
            ThresholdCount::Dual => {
                let cuts = solve_dual_otsu(histogram).ok_or(PassthroughReason::NoDualSplit)?;
                Ok(ThresholdPlan::dual(cuts, self.policy.dual(cuts, background)))
            }
        }
    }
}
