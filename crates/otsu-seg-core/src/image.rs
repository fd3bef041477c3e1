use crate::ImageError;

/// Borrowed single-channel 8-bit image.
#[derive(Clone, Copy, Debug)]
pub struct GrayImageView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u8], // row-major, len = w*h
}

impl<'a> GrayImageView<'a> {
    /// Wrap a row-major buffer, checking its length against the dimensions.
    pub fn new(width: usize, height: usize, data: &'a [u8]) -> Result<Self, ImageError> {
        let expected = width * height;
        if data.len() != expected {
            return Err(ImageError::InvalidBufferLength {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.width + x]
    }

    #[inline]
    pub fn same_size(&self, other: &GrayImageView<'_>) -> bool {
        self.width == other.width && self.height == other.height
    }

    pub fn to_owned_image(&self) -> GrayImage {
        GrayImage {
            width: self.width,
            height: self.height,
            data: self.data.to_vec(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrayImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl GrayImage {
    /// Image of the given size with every pixel set to `fill`.
    pub fn filled(width: usize, height: usize, fill: u8) -> Self {
        Self {
            width,
            height,
            data: vec![fill; width * height],
        }
    }

    #[inline]
    pub fn view(&self) -> GrayImageView<'_> {
        GrayImageView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }

    /// Fill the inclusive rectangle `[x0, x1] × [y0, y1]`, clipped to the image.
    pub fn fill_rect(&mut self, x0: usize, y0: usize, x1: usize, y1: usize, value: u8) {
        if self.width == 0 || self.height == 0 || x0 > x1 || y0 > y1 {
            return;
        }
        let x1 = x1.min(self.width - 1);
        let y1 = y1.min(self.height - 1);
        for y in y0..=y1 {
            let row = y * self.width;
            for x in x0..=x1 {
                self.data[row + x] = value;
            }
        }
    }
}

/// Borrowed interleaved 8-bit image with 1, 3 (RGB) or 4 (RGBA) channels.
#[derive(Clone, Copy, Debug)]
pub struct ImageView<'a> {
    pub width: usize,
    pub height: usize,
    pub channels: usize,
    pub data: &'a [u8], // row-major, interleaved, len = w*h*channels
}

impl<'a> ImageView<'a> {
    pub fn new(
        width: usize,
        height: usize,
        channels: usize,
        data: &'a [u8],
    ) -> Result<Self, ImageError> {
        if !matches!(channels, 1 | 3 | 4) {
            return Err(ImageError::InvalidChannelCount { channels });
        }
        let expected = width * height * channels;
        if data.len() != expected {
            return Err(ImageError::InvalidBufferLength {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Copy the pixels, keeping every channel.
    pub fn to_owned_image(&self) -> Image {
        Image {
            width: self.width,
            height: self.height,
            channels: self.channels,
            data: self.data.to_vec(),
        }
    }
}

impl<'a> From<GrayImageView<'a>> for ImageView<'a> {
    fn from(view: GrayImageView<'a>) -> Self {
        Self {
            width: view.width,
            height: view.height,
            channels: 1,
            data: view.data,
        }
    }
}

/// Owned interleaved 8-bit image with 1, 3 or 4 channels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    pub width: usize,
    pub height: usize,
    pub channels: usize,
    pub data: Vec<u8>,
}

impl Image {
    #[inline]
    pub fn view(&self) -> ImageView<'_> {
        ImageView {
            width: self.width,
            height: self.height,
            channels: self.channels,
            data: &self.data,
        }
    }

    /// Single-channel view, or `None` for color images.
    pub fn as_gray(&self) -> Option<GrayImageView<'_>> {
        (self.channels == 1).then(|| GrayImageView {
            width: self.width,
            height: self.height,
            data: &self.data,
        })
    }
}

impl From<GrayImage> for Image {
    fn from(img: GrayImage) -> Self {
        Self {
            width: img.width,
            height: img.height,
            channels: 1,
            data: img.data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_rejects_short_buffer() {
        let data = [0u8; 5];
        let err = GrayImageView::new(3, 2, &data).unwrap_err();
        assert!(matches!(
            err,
            ImageError::InvalidBufferLength {
                expected: 6,
                got: 5
            }
        ));
    }

    #[test]
    fn color_view_rejects_two_channels() {
        let data = [0u8; 8];
        let err = ImageView::new(2, 2, 2, &data).unwrap_err();
        assert!(matches!(err, ImageError::InvalidChannelCount { channels: 2 }));
    }

    #[test]
    fn fill_rect_is_inclusive_and_clipped() {
        let mut img = GrayImage::filled(5, 4, 0);
        img.fill_rect(1, 1, 10, 2, 9);
        let view = img.view();
        assert_eq!(view.get(0, 1), 0);
        assert_eq!(view.get(1, 1), 9);
        assert_eq!(view.get(4, 2), 9);
        assert_eq!(view.get(4, 3), 0);
        assert_eq!(img.data.iter().filter(|&&v| v == 9).count(), 8);
    }

    #[test]
    fn owned_color_copy_keeps_channels() {
        let data: Vec<u8> = (0..2 * 2 * 3).collect();
        let owned = ImageView::new(2, 2, 3, &data).unwrap().to_owned_image();
        assert_eq!(owned.channels, 3);
        assert_eq!(owned.data, data);
        assert!(owned.as_gray().is_none());
        assert_eq!(owned.view().data, &data[..]);
    }

    #[test]
    fn gray_image_converts_to_single_channel() {
        let img = Image::from(GrayImage::filled(3, 2, 7));
        assert_eq!((img.width, img.height, img.channels), (3, 2, 1));
        assert_eq!(img.as_gray().unwrap().get(2, 1), 7);
    }

    #[test]
    fn fill_rect_ignores_inverted_rectangle() {
        let mut img = GrayImage::filled(4, 4, 1);
        img.fill_rect(3, 3, 2, 2, 0);
        assert!(img.data.iter().all(|&v| v == 1));
    }
}
