/// Errors raised by the image and histogram helpers.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
    #[error("unsupported channel count {channels} (expected 1, 3 or 4)")]
    InvalidChannelCount { channels: usize },
    #[error("invalid image buffer length (expected {expected} bytes, got {got})")]
    InvalidBufferLength { expected: usize, got: usize },
    #[error("mask is {mask_width}x{mask_height}, image is {width}x{height}")]
    MaskSizeMismatch {
        width: usize,
        height: usize,
        mask_width: usize,
        mask_height: usize,
    },
}
