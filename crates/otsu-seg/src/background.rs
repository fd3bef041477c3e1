//! Background sampling from a ring along the image border.
//!
//! The outer frame of a scanned page or photographed object is assumed to
//! show background only. Peaks of a histogram restricted to that frame are
//! the "background peaks" used by the planner and the polarity policy.

use crate::peaks::{detect_peaks, PeakSet};
use crate::SegmentError;
use otsu_seg_core::{histogram, GrayImage, GrayImageView};

/// Default width of the sampled border ring, in pixels.
pub const DEFAULT_BORDER_WIDTH: usize = 3;

const MASK_ON: u8 = 255;
const MASK_OFF: u8 = 0;

/// Check that a non-empty inner rectangle remains inside the ring.
pub fn check_border_fits(
    width: usize,
    height: usize,
    border_width: usize,
) -> Result<(), SegmentError> {
    if border_width == 0 || width <= 2 * border_width || height <= 2 * border_width {
        return Err(SegmentError::InvalidImageSize {
            width,
            height,
            border_width,
        });
    }
    Ok(())
}

/// Mask selecting a ring of `border_width` pixels along every edge.
///
/// The inner rectangle `[b, w-b-1] × [b, h-b-1]` is cleared.
pub fn border_mask(
    width: usize,
    height: usize,
    border_width: usize,
) -> Result<GrayImage, SegmentError> {
    check_border_fits(width, height, border_width)?;
    let mut mask = GrayImage::filled(width, height, MASK_ON);
    mask.fill_rect(
        border_width,
        border_width,
        width - border_width - 1,
        height - border_width - 1,
        MASK_OFF,
    );
    Ok(mask)
}

/// Peaks of the histogram of the border ring.
pub fn background_peaks(
    img: &GrayImageView<'_>,
    border_width: usize,
) -> Result<PeakSet, SegmentError> {
    let mask = border_mask(img.width, img.height, border_width)?;
    let hist = histogram(img, Some(&mask.view()))?;
    let peaks = detect_peaks(&hist);
    log::debug!("background peaks: {:?}", peaks.intensities());
    Ok(peaks)
}
