//! The 14-byte BITMAPFILEHEADER plus 40-byte BITMAPINFOHEADER.

use super::cursor::Cursor;
use crate::error::{ArgumentError, BmpEditError, FormatError};
use crate::pixel::PixelBuffer;

/// Length of the file header (signature through pixel data offset).
pub const FILE_HEADER_LEN: u32 = 14;
/// Length of the BITMAPINFOHEADER.
pub const INFO_HEADER_LEN: u32 = 40;
/// Total bytes decoded and encoded by [`BmpHeader`].
pub const HEADER_LEN: u32 = FILE_HEADER_LEN + INFO_HEADER_LEN;

/// 2835 pixels per meter is 72 DPI.
const DEFAULT_PIXELS_PER_METER: i32 = 2835;

/// Vertical order of rows on disk, given by the sign of the height field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowOrder {
    /// Positive height: the first stored row is the bottom of the image.
    BottomUp,
    /// Negative height: the first stored row is the top of the image.
    TopDown,
}

/// Every field of the 54-byte BMP header, in file order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BmpHeader {
    pub signature: [u8; 2],
    pub file_size: u32,
    pub reserved1: u16,
    pub reserved2: u16,
    pub pixel_data_offset: u32,
    pub header_size: u32,
    pub width: i32,
    /// Positive for bottom-up storage, negative for top-down.
    pub height: i32,
    pub planes: u16,
    pub bits_per_pixel: u16,
    pub compression: u32,
    /// Byte length of the pixel data, padding included.
    pub image_size: u32,
    pub x_pixels_per_meter: i32,
    pub y_pixels_per_meter: i32,
    pub colors_in_color_table: u32,
    pub important_colors: u32,
}

/// Bytes per stored row of a 24-bit image: `width * 3` rounded up to a
/// multiple of 4.
pub fn stride_bytes(width: usize) -> Option<usize> {
    width
        .checked_mul(3)
        .and_then(|r| r.checked_add(3))
        .map(|r| r & !3)
}

impl BmpHeader {
    /// Canonical header for a 24-bit bottom-up image of the given size.
    pub fn for_dimensions(width: usize, height: usize) -> Result<Self, BmpEditError> {
        let mut header = Self {
            signature: *b"BM",
            file_size: 0,
            reserved1: 0,
            reserved2: 0,
            pixel_data_offset: 0,
            header_size: 0,
            width: 0,
            height: 0,
            planes: 0,
            bits_per_pixel: 24,
            compression: 0,
            image_size: 0,
            x_pixels_per_meter: DEFAULT_PIXELS_PER_METER,
            y_pixels_per_meter: DEFAULT_PIXELS_PER_METER,
            colors_in_color_table: 0,
            important_colors: 0,
        };
        header.recompute_layout(width, height)?;
        Ok(header)
    }

    /// Canonical header sized to `pixels`.
    pub fn for_buffer(pixels: &PixelBuffer) -> Result<Self, BmpEditError> {
        Self::for_dimensions(pixels.width(), pixels.height())
    }

    /// Overwrite the size, offset and encoding fields so they describe a
    /// 24-bit uncompressed bottom-up image of `width` x `height`.
    ///
    /// Reserved fields, resolution and color counts are kept.
    pub fn recompute_layout(&mut self, width: usize, height: usize) -> Result<(), BmpEditError> {
        let invalid = || ArgumentError::InvalidDimensions {
            width: width as i64,
            height: height as i64,
        };
        let w = i32::try_from(width).map_err(|_| invalid())?;
        let h = i32::try_from(height).map_err(|_| invalid())?;
        let image_size = stride_bytes(width)
            .and_then(|s| s.checked_mul(height))
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(invalid)?;
        let file_size = image_size.checked_add(HEADER_LEN).ok_or_else(invalid)?;

        self.signature = *b"BM";
        self.width = w;
        self.height = h;
        self.planes = 1;
        self.bits_per_pixel = 24;
        self.compression = 0;
        self.header_size = INFO_HEADER_LEN;
        self.pixel_data_offset = HEADER_LEN;
        self.image_size = image_size;
        self.file_size = file_size;
        Ok(())
    }

    /// Decode the 54 header bytes at the cursor.
    ///
    /// Only the signature is validated here; bit depth, compression and
    /// dimensions are left to the caller. Input too short to hold both
    /// signature bytes is a bad signature, not a truncated header.
    pub(crate) fn decode(c: &mut Cursor<'_>) -> Result<Self, FormatError> {
        use FormatError::TruncatedHeader as T;

        let signature = [c.read_u8(), c.read_u8()];
        let [Some(b'B'), Some(b'M')] = signature else {
            return Err(FormatError::BadSignature);
        };
        let signature = *b"BM";
        Ok(Self {
            signature,
            file_size: c.read_u32_le().ok_or(T)?,
            reserved1: c.read_u16_le().ok_or(T)?,
            reserved2: c.read_u16_le().ok_or(T)?,
            pixel_data_offset: c.read_u32_le().ok_or(T)?,
            header_size: c.read_u32_le().ok_or(T)?,
            width: c.read_i32_le().ok_or(T)?,
            height: c.read_i32_le().ok_or(T)?,
            planes: c.read_u16_le().ok_or(T)?,
            bits_per_pixel: c.read_u16_le().ok_or(T)?,
            compression: c.read_u32_le().ok_or(T)?,
            image_size: c.read_u32_le().ok_or(T)?,
            x_pixels_per_meter: c.read_i32_le().ok_or(T)?,
            y_pixels_per_meter: c.read_i32_le().ok_or(T)?,
            colors_in_color_table: c.read_u32_le().ok_or(T)?,
            important_colors: c.read_u32_le().ok_or(T)?,
        })
    }

    /// Append the 54 header bytes to `out`, fields written as stored.
    pub fn encode(&self, out: &mut Vec<u8>) {
        // File header (14 bytes)
        out.extend_from_slice(&self.signature);
        out.extend_from_slice(&self.file_size.to_le_bytes());
        out.extend_from_slice(&self.reserved1.to_le_bytes());
        out.extend_from_slice(&self.reserved2.to_le_bytes());
        out.extend_from_slice(&self.pixel_data_offset.to_le_bytes());

        // DIB header (BITMAPINFOHEADER, 40 bytes)
        out.extend_from_slice(&self.header_size.to_le_bytes());
        out.extend_from_slice(&self.width.to_le_bytes());
        out.extend_from_slice(&self.height.to_le_bytes());
        out.extend_from_slice(&self.planes.to_le_bytes());
        out.extend_from_slice(&self.bits_per_pixel.to_le_bytes());
        out.extend_from_slice(&self.compression.to_le_bytes());
        out.extend_from_slice(&self.image_size.to_le_bytes());
        out.extend_from_slice(&self.x_pixels_per_meter.to_le_bytes());
        out.extend_from_slice(&self.y_pixels_per_meter.to_le_bytes());
        out.extend_from_slice(&self.colors_in_color_table.to_le_bytes());
        out.extend_from_slice(&self.important_colors.to_le_bytes());
    }

    pub fn row_order(&self) -> RowOrder {
        if self.height < 0 {
            RowOrder::TopDown
        } else {
            RowOrder::BottomUp
        }
    }

    /// Number of rows regardless of storage order.
    pub fn abs_height(&self) -> u32 {
        self.height.unsigned_abs()
    }

    /// 24 bits per pixel, uncompressed.
    pub fn is_supported_encoding(&self) -> bool {
        self.bits_per_pixel == 24 && self.compression == 0
    }

    /// Row stride in bytes for this header's width, if the width is positive.
    pub fn stride(&self) -> Option<usize> {
        usize::try_from(self.width)
            .ok()
            .filter(|&w| w > 0)
            .and_then(stride_bytes)
    }

    /// Zero bytes appended to each stored row.
    pub fn padding(&self) -> Option<usize> {
        let w = usize::try_from(self.width).ok()?;
        Some(self.stride()? - w * 3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stride_rounds_up_to_four() {
        assert_eq!(stride_bytes(1), Some(4));
        assert_eq!(stride_bytes(4), Some(12));
        assert_eq!(stride_bytes(5), Some(16));
        assert_eq!(stride_bytes(0), Some(0));
        assert_eq!(stride_bytes(usize::MAX), None);
    }

    #[test]
    fn canonical_header_satisfies_size_invariants() {
        let h = BmpHeader::for_dimensions(5, 3).unwrap();
        assert_eq!(h.stride(), Some(16));
        assert_eq!(h.padding(), Some(1));
        assert_eq!(h.image_size, 48);
        assert_eq!(h.pixel_data_offset, 54);
        assert_eq!(h.file_size, h.pixel_data_offset + h.image_size);
        assert_eq!(h.row_order(), RowOrder::BottomUp);
    }

    #[test]
    fn encode_then_decode_preserves_every_field() {
        let mut h = BmpHeader::for_dimensions(2, 2).unwrap();
        h.height = -2;
        h.reserved1 = 7;
        h.reserved2 = 0xbeef;
        h.colors_in_color_table = 3;
        let mut bytes = Vec::new();
        h.encode(&mut bytes);
        assert_eq!(bytes.len(), HEADER_LEN as usize);

        let mut c = Cursor::new(&bytes);
        assert_eq!(BmpHeader::decode(&mut c).unwrap(), h);
        assert_eq!(c.position(), 54);
    }

    #[test]
    fn bad_signature() {
        let mut bytes = Vec::new();
        BmpHeader::for_dimensions(1, 1).unwrap().encode(&mut bytes);
        bytes[0] = b'X';
        assert_eq!(
            BmpHeader::decode(&mut Cursor::new(&bytes)),
            Err(FormatError::BadSignature)
        );
    }

    #[test]
    fn truncated_mid_field() {
        let mut bytes = Vec::new();
        BmpHeader::for_dimensions(1, 1).unwrap().encode(&mut bytes);
        for len in [2, 5, 30, 53] {
            assert_eq!(
                BmpHeader::decode(&mut Cursor::new(&bytes[..len])),
                Err(FormatError::TruncatedHeader),
                "len {len}"
            );
        }
    }

    #[test]
    fn missing_signature_bytes_are_a_bad_signature() {
        let inputs: [&[u8]; 3] = [b"", b"B", b"X"];
        for input in inputs {
            assert_eq!(
                BmpHeader::decode(&mut Cursor::new(input)),
                Err(FormatError::BadSignature),
                "{input:?}"
            );
        }
    }

    #[test]
    fn decode_does_not_validate_encoding() {
        let mut h = BmpHeader::for_dimensions(1, 1).unwrap();
        h.bits_per_pixel = 8;
        h.compression = 1;
        let mut bytes = Vec::new();
        h.encode(&mut bytes);
        let decoded = BmpHeader::decode(&mut Cursor::new(&bytes)).unwrap();
        assert!(!decoded.is_supported_encoding());
    }

    #[test]
    fn recompute_keeps_metadata() {
        let mut h = BmpHeader::for_dimensions(1, 1).unwrap();
        h.x_pixels_per_meter = 100;
        h.reserved2 = 9;
        h.height = -1;
        h.recompute_layout(3, 2).unwrap();
        assert_eq!((h.width, h.height), (3, 2));
        assert_eq!(h.x_pixels_per_meter, 100);
        assert_eq!(h.reserved2, 9);
        assert_eq!(h.image_size, 24);
    }

    #[test]
    fn oversized_dimensions_rejected() {
        assert!(matches!(
            BmpHeader::for_dimensions(1 << 31, 1),
            Err(BmpEditError::Argument(ArgumentError::InvalidDimensions { .. }))
        ));
        assert!(BmpHeader::for_dimensions(40_000, 40_000).is_err());
    }
}
