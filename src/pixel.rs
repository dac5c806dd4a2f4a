use imgref::{ImgRef, ImgVec};
use rgb::AsPixels as _;
use rgb::ComponentBytes as _;

use crate::error::ArgumentError;

/// One 8-bit RGB pixel. No alpha.
pub type Pixel = rgb::RGB8;

/// The value missing or unreadable cells are filled with.
pub const BLACK: Pixel = Pixel { r: 0, g: 0, b: 0 };

/// Rectangular grid of [`Pixel`]s, row-major and always stored top-down.
///
/// Cloning is a deep copy; two buffers never share pixel storage.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Pixel>,
}

impl PixelBuffer {
    /// A `width` x `height` buffer filled with black.
    ///
    /// # Panics
    ///
    /// If `width * height` overflows or cannot be allocated. Use
    /// [`try_new`](Self::try_new) for untrusted dimensions.
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, BLACK)
    }

    /// Like [`new`](Self::new), but reports overflowing or unallocatable
    /// dimensions as an error instead of panicking.
    pub fn try_new(width: usize, height: usize) -> Result<Self, ArgumentError> {
        let invalid = || ArgumentError::InvalidDimensions {
            width: width as i64,
            height: height as i64,
        };
        let len = width.checked_mul(height).ok_or_else(invalid)?;
        let mut pixels = Vec::new();
        pixels.try_reserve_exact(len).map_err(|_| invalid())?;
        pixels.resize(len, BLACK);
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// A `width` x `height` buffer with every cell set to `pixel`.
    ///
    /// # Panics
    ///
    /// Same conditions as [`new`](Self::new).
    pub fn filled(width: usize, height: usize, pixel: Pixel) -> Self {
        Self {
            width,
            height,
            pixels: vec![pixel; width * height],
        }
    }

    /// Build from row-major pixels.
    ///
    /// A short `pixels` vector is padded with black and excess entries are
    /// dropped, so the buffer is always fully populated.
    ///
    /// # Panics
    ///
    /// Same conditions as [`new`](Self::new).
    pub fn from_vec(mut pixels: Vec<Pixel>, width: usize, height: usize) -> Self {
        pixels.resize(width * height, BLACK);
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Build from packed `R,G,B` bytes. Trailing partial pixels are ignored.
    pub fn from_rgb_bytes(bytes: &[u8], width: usize, height: usize) -> Self {
        let whole = bytes.len() / 3 * 3;
        let pixels: &[Pixel] = bytes[..whole].as_pixels();
        Self::from_vec(pixels.to_vec(), width, height)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Pixel at column `x`, row `y` (row 0 is the top), if in bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<Pixel> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(y * self.width + x).copied()
    }

    /// Overwrite one cell. Returns false if `(x, y)` is out of bounds.
    pub fn set(&mut self, x: usize, y: usize, pixel: Pixel) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        match self.pixels.get_mut(y * self.width + x) {
            Some(cell) => {
                *cell = pixel;
                true
            }
            None => false,
        }
    }

    /// One row, top-down. Empty if `y` is out of bounds.
    pub fn row(&self, y: usize) -> &[Pixel] {
        if y >= self.height {
            return &[];
        }
        self.pixels
            .get(y * self.width..(y + 1) * self.width)
            .unwrap_or(&[])
    }

    pub(crate) fn row_mut(&mut self, y: usize) -> &mut [Pixel] {
        if y >= self.height {
            return &mut [];
        }
        let w = self.width;
        self.pixels
            .get_mut(y * w..(y + 1) * w)
            .unwrap_or(&mut [])
    }

    /// Rows from top to bottom.
    pub fn rows(&self) -> impl DoubleEndedIterator<Item = &[Pixel]> + '_ {
        (0..self.height).map(move |y| self.row(y))
    }

    /// All pixels, row-major.
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [Pixel] {
        &mut self.pixels
    }

    /// Packed `R,G,B` bytes, row-major.
    pub fn as_rgb_bytes(&self) -> &[u8] {
        self.pixels.as_bytes()
    }

    /// Borrowed 2D view. `None` for a zero-width buffer, which `imgref`
    /// cannot represent.
    pub fn as_imgref(&self) -> Option<ImgRef<'_, Pixel>> {
        if self.width == 0 {
            return None;
        }
        Some(ImgRef::new(self.pixels.as_slice(), self.width, self.height))
    }

    /// Apply `f` to every pixel in place.
    pub fn map_in_place(&mut self, mut f: impl FnMut(Pixel) -> Pixel) {
        for p in self.pixels.iter_mut() {
            *p = f(*p);
        }
    }
}

impl From<ImgVec<Pixel>> for PixelBuffer {
    fn from(img: ImgVec<Pixel>) -> Self {
        let (w, h) = (img.width(), img.height());
        let mut pixels = Vec::with_capacity(w * h);
        for row in img.as_ref().rows() {
            pixels.extend_from_slice(row);
        }
        Self::from_vec(pixels, w, h)
    }
}
