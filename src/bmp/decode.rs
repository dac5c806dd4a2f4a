//! 24-bit uncompressed BMP decoder.

use enough::Stop;

use super::cursor::Cursor;
use super::header::{BmpHeader, RowOrder, stride_bytes};
use crate::error::{ArgumentError, BmpEditError, FormatError, IoError};
use crate::image::Image;
use crate::limits::Limits;
use crate::pixel::{Pixel, PixelBuffer};

/// Decode a whole BMP file held in memory.
///
/// The returned header is exactly what was decoded; the buffer is top-down
/// whatever the on-disk row order was. Nothing partial is returned on error.
pub(crate) fn decode_bmp(
    data: &[u8],
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<Image, BmpEditError> {
    let mut cursor = Cursor::new(data);
    let header = BmpHeader::decode(&mut cursor)?;
    log::debug!(
        "BMP header: {}x{} {}bpp compression={} offset={}",
        header.width,
        header.height,
        header.bits_per_pixel,
        header.compression,
        header.pixel_data_offset
    );

    skip_to_pixel_data(&mut cursor, &header)?;

    if !header.is_supported_encoding() {
        return Err(FormatError::UnsupportedEncoding {
            bits_per_pixel: header.bits_per_pixel,
            compression: header.compression,
        }
        .into());
    }

    let (width, height) = dimensions(&header)?;
    if let Some(limits) = limits {
        limits.check(width as u32, height as u32)?;
        limits.check_memory(width as u64 * height as u64 * 3)?;
    }
    stop.check()?;

    let pixels = decode_pixels(&mut cursor, &header, width, height, stop)?;
    Image::from_parts(header, pixels)
}

/// Advance from the end of the 54-byte header to `pixel_data_offset`,
/// passing over any extension fields or palette in between.
fn skip_to_pixel_data(cursor: &mut Cursor<'_>, header: &BmpHeader) -> Result<(), BmpEditError> {
    let consumed = cursor.position();
    let offset = header.pixel_data_offset as usize;
    if offset < consumed {
        log::warn!(
            "pixel data offset {offset} points inside the {consumed}-byte header; reading pixels from {consumed}"
        );
        return Ok(());
    }
    let requested = offset - consumed;
    cursor.skip(requested).ok_or(IoError::ShortSkip {
        requested,
        available: cursor.remaining(),
    })?;
    Ok(())
}

/// Width and row count as buffer dimensions. Width must be positive.
fn dimensions(header: &BmpHeader) -> Result<(usize, usize), BmpEditError> {
    let invalid = || ArgumentError::InvalidDimensions {
        width: i64::from(header.width),
        height: i64::from(header.height),
    };
    let width = usize::try_from(header.width)
        .ok()
        .filter(|&w| w > 0)
        .ok_or_else(invalid)?;
    let height = usize::try_from(header.abs_height()).map_err(|_| invalid())?;
    Ok((width, height))
}

fn decode_pixels(
    cursor: &mut Cursor<'_>,
    header: &BmpHeader,
    width: usize,
    height: usize,
    stop: &dyn Stop,
) -> Result<PixelBuffer, BmpEditError> {
    let invalid = || ArgumentError::InvalidDimensions {
        width: i64::from(header.width),
        height: i64::from(header.height),
    };
    let stride = stride_bytes(width).ok_or_else(invalid)?;
    let row_bytes = width * 3;
    let padding = stride - row_bytes;

    // Reject short input before allocating, reporting the row the
    // row-by-row read would have failed on.
    let needed = stride.checked_mul(height).ok_or_else(invalid)?;
    if cursor.remaining() < needed {
        return Err(IoError::TruncatedPixelData {
            row: cursor.remaining() / stride,
        }
        .into());
    }

    let mut pixels = PixelBuffer::try_new(width, height)?;
    let bottom_up = header.row_order() == RowOrder::BottomUp;

    for i in 0..height {
        if i % 16 == 0 {
            stop.check()?;
        }
        let target = if bottom_up { height - 1 - i } else { i };
        let src = cursor
            .take(row_bytes)
            .ok_or(IoError::TruncatedPixelData { row: i })?;
        for (dst, bgr) in pixels.row_mut(target).iter_mut().zip(src.chunks_exact(3)) {
            *dst = Pixel::new(bgr[2], bgr[1], bgr[0]);
        }
        cursor
            .skip(padding)
            .ok_or(IoError::TruncatedPixelData { row: i })?;
    }

    Ok(pixels)
}
