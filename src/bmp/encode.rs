//! BMP encoder: uncompressed 24-bit, always stored bottom-up.

use enough::Stop;

use super::header::BmpHeader;
use crate::error::{ArgumentError, BmpEditError};
use crate::image::Image;
use crate::pixel::BLACK;

/// Encode `image` to a complete BMP file in one contiguous buffer.
///
/// Size, offset and encoding fields are regenerated from the pixel buffer;
/// the stored header contributes only its reserved, resolution and color
/// count fields.
pub(crate) fn encode_bmp(image: &Image, stop: &dyn Stop) -> Result<Vec<u8>, BmpEditError> {
    let bpp = image.header().bits_per_pixel;
    if bpp != 24 {
        return Err(ArgumentError::UnsupportedBitDepth(bpp).into());
    }

    let pixels = image.pixels();
    let mut header: BmpHeader = image.header().clone();
    header.recompute_layout(pixels.width(), pixels.height())?;

    let w = pixels.width();
    let pad_bytes = header.padding().unwrap_or(0);

    let mut out = Vec::with_capacity(header.file_size as usize);
    header.encode(&mut out);

    stop.check()?;
    for (n, row) in pixels.rows().rev().enumerate() {
        if n % 16 == 0 {
            stop.check()?;
        }
        for x in 0..w {
            let p = row.get(x).copied().unwrap_or(BLACK);
            out.push(p.b);
            out.push(p.g);
            out.push(p.r);
        }
        out.extend(core::iter::repeat_n(0u8, pad_bytes));
    }

    Ok(out)
}
