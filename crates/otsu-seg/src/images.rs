//! Adapters between `image` crate buffers and the segmenter.

use crate::core::{GrayImageView, Image, ImageView};
use crate::debug::HistogramPlot;
use crate::{PolarityPolicy, SegmentError, SegmentationResult, Segmenter};
use ::image::DynamicImage;

/// Borrow an `image::GrayImage` as a core view.
pub fn gray_view(img: &::image::GrayImage) -> GrayImageView<'_> {
    GrayImageView {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw(),
    }
}

/// Segment a decoded image of any pixel format.
///
/// 8-bit luma, RGB and RGBA buffers are used as-is; every other format is
/// converted to RGBA8 first.
pub fn segment_dynamic_image<P: PolarityPolicy>(
    img: &DynamicImage,
    segmenter: &Segmenter<P>,
) -> Result<SegmentationResult, SegmentError> {
    let (w, h) = (img.width() as usize, img.height() as usize);
    match img {
        DynamicImage::ImageLuma8(buf) => segmenter.segment(&ImageView::new(w, h, 1, buf.as_raw())?),
        DynamicImage::ImageRgb8(buf) => segmenter.segment(&ImageView::new(w, h, 3, buf.as_raw())?),
        DynamicImage::ImageRgba8(buf) => {
            segmenter.segment(&ImageView::new(w, h, 4, buf.as_raw())?)
        }
        other => {
            let rgba = other.to_rgba8();
            segmenter.segment(&ImageView::new(w, h, 4, rgba.as_raw())?)
        }
    }
}

/// Move a core image into a `DynamicImage` with the same channel layout.
///
/// Returns `None` if the dimensions do not fit in `u32` or the channel count
/// has no 8-bit `image` counterpart.
pub fn to_dynamic_image(img: Image) -> Option<DynamicImage> {
    let w = u32::try_from(img.width).ok()?;
    let h = u32::try_from(img.height).ok()?;
    match img.channels {
        1 => ::image::GrayImage::from_raw(w, h, img.data).map(DynamicImage::ImageLuma8),
        3 => ::image::RgbImage::from_raw(w, h, img.data).map(DynamicImage::ImageRgb8),
        4 => ::image::RgbaImage::from_raw(w, h, img.data).map(DynamicImage::ImageRgba8),
        _ => None,
    }
}

/// Copy a histogram plot into an `image::RgbImage`.
pub fn plot_to_rgb(plot: &HistogramPlot) -> Option<::image::RgbImage> {
    let w = u32::try_from(plot.width).ok()?;
    let h = u32::try_from(plot.height).ok()?;
    ::image::RgbImage::from_raw(w, h, plot.data.clone())
}
