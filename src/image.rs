use crate::bmp::BmpHeader;
use crate::error::{ArgumentError, BmpEditError};
use crate::pixel::PixelBuffer;
use crate::transform::Transform;

/// A decoded bitmap: header plus top-down pixel buffer.
///
/// The buffer's width and height always equal the header's `width` and
/// `abs(height)`. Cloning deep-copies both.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    header: BmpHeader,
    pixels: PixelBuffer,
}

impl Image {
    /// Wrap `pixels` with a canonical 24-bit header.
    pub fn new(pixels: PixelBuffer) -> Result<Self, BmpEditError> {
        let header = BmpHeader::for_buffer(&pixels)?;
        Ok(Self { header, pixels })
    }

    /// Pair an existing header with a buffer of matching dimensions.
    pub fn from_parts(header: BmpHeader, pixels: PixelBuffer) -> Result<Self, BmpEditError> {
        let matches = usize::try_from(header.width).ok() == Some(pixels.width())
            && usize::try_from(header.abs_height()).ok() == Some(pixels.height());
        if !matches {
            return Err(ArgumentError::InvalidDimensions {
                width: pixels.width() as i64,
                height: pixels.height() as i64,
            }
            .into());
        }
        Ok(Self { header, pixels })
    }

    pub fn header(&self) -> &BmpHeader {
        &self.header
    }

    pub fn pixels(&self) -> &PixelBuffer {
        &self.pixels
    }

    /// Mutable pixel access. Dimensions cannot change through a slice.
    pub fn pixels_mut(&mut self) -> &mut [crate::Pixel] {
        self.pixels.pixels_mut()
    }

    pub fn width(&self) -> usize {
        self.pixels.width()
    }

    pub fn height(&self) -> usize {
        self.pixels.height()
    }

    pub fn into_parts(self) -> (BmpHeader, PixelBuffer) {
        (self.header, self.pixels)
    }

    /// Run `transform` over this image's pixels, consuming the image so the
    /// transform owns the buffer exclusively.
    ///
    /// A transform that changes the buffer's size is rejected.
    pub fn transformed(self, transform: &dyn Transform, param: i32) -> Result<Self, BmpEditError> {
        let (w, h) = (self.width(), self.height());
        let pixels = transform.apply(self.pixels, param);
        if pixels.width() != w || pixels.height() != h {
            return Err(ArgumentError::InvalidDimensions {
                width: pixels.width() as i64,
                height: pixels.height() as i64,
            }
            .into());
        }
        Ok(Self {
            header: self.header,
            pixels,
        })
    }
}
