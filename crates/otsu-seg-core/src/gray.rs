//! Color to luminance conversion.

use crate::{GrayImage, ImageError, ImageView};

// BT.601 luma weights in 14-bit fixed point.
const R_W: u32 = 4899;
const G_W: u32 = 9617;
const B_W: u32 = 1868;
const SHIFT: u32 = 14;

#[inline]
fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((R_W * r as u32 + G_W * g as u32 + B_W * b as u32 + (1 << (SHIFT - 1))) >> SHIFT) as u8
}

/// Convert an interleaved image to a single-channel luminance image.
///
/// One-channel input is copied unchanged. Three channels are read as RGB,
/// four as RGBA with the alpha channel ignored.
pub fn to_grayscale(src: &ImageView<'_>) -> Result<GrayImage, ImageError> {
    let expected = src.width * src.height * src.channels;
    if src.data.len() != expected {
        return Err(ImageError::InvalidBufferLength {
            expected,
            got: src.data.len(),
        });
    }

    let data = match src.channels {
        1 => src.data.to_vec(),
        3 | 4 => src
            .data
            .chunks_exact(src.channels)
            .map(|px| luma(px[0], px[1], px[2]))
            .collect(),
        channels => return Err(ImageError::InvalidChannelCount { channels }),
    };

    Ok(GrayImage {
        width: src.width,
        height: src.height,
        data,
    })
}
