//! 24-bit uncompressed BMP codec.
//!
//! Decoding accepts either row order and always produces a top-down buffer.
//! Encoding always writes bottom-up with a freshly computed header.

mod cursor;
mod decode;
mod encode;
mod header;

pub use header::{BmpHeader, FILE_HEADER_LEN, HEADER_LEN, INFO_HEADER_LEN, RowOrder, stride_bytes};

use crate::error::BmpEditError;
use crate::image::Image;
use crate::limits::Limits;
use enough::Stop;

/// Decode only the 54-byte header, without checking encoding or reading pixels.
pub fn probe_header(data: &[u8]) -> Result<BmpHeader, BmpEditError> {
    Ok(BmpHeader::decode(&mut cursor::Cursor::new(data))?)
}

/// Decode a BMP held in memory.
pub fn decode_bmp(data: &[u8], stop: impl Stop) -> Result<Image, BmpEditError> {
    decode::decode_bmp(data, None, &stop)
}

/// Encode `image` as a bottom-up 24-bit BMP.
pub fn encode_bmp(image: &Image, stop: impl Stop) -> Result<Vec<u8>, BmpEditError> {
    encode::encode_bmp(image, &stop)
}

pub(crate) fn decode_with_limits(
    data: &[u8],
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<Image, BmpEditError> {
    decode::decode_bmp(data, limits, stop)
}
