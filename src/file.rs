//! Loading and saving BMP files by path.
//!
//! Both directions hold the whole file in memory: a load reads every byte
//! before decoding, a save encodes completely and then issues one write.
//! Neither can be interrupted.

use std::path::Path;

use enough::Unstoppable;

use crate::bmp;
use crate::decode::DecodeRequest;
use crate::error::{BmpEditError, IoError};
use crate::image::Image;
use crate::limits::Limits;

/// Read and decode the BMP at `path`.
pub fn load_image(path: impl AsRef<Path>) -> Result<Image, BmpEditError> {
    load_image_with_limits(path, &Limits::default())
}

/// Read and decode the BMP at `path`, rejecting images beyond `limits`.
pub fn load_image_with_limits(
    path: impl AsRef<Path>,
    limits: &Limits,
) -> Result<Image, BmpEditError> {
    let path = path.as_ref();
    let data = std::fs::read(path).map_err(|source| IoError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let image = DecodeRequest::new(&data)
        .with_limits(limits)
        .decode(Unstoppable)?;
    log::info!(
        "loaded {} ({}x{})",
        path.display(),
        image.width(),
        image.height()
    );
    Ok(image)
}

/// Encode `image` as a bottom-up 24-bit BMP and write it to `path`.
///
/// Nothing is written if encoding fails.
pub fn save_image(path: impl AsRef<Path>, image: &Image) -> Result<(), BmpEditError> {
    let path = path.as_ref();
    let bytes = bmp::encode_bmp(image, Unstoppable)?;
    std::fs::write(path, &bytes).map_err(|source| IoError::WriteFailure {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!(
        "saved {} ({}x{}, {} bytes)",
        path.display(),
        image.width(),
        image.height(),
        bytes.len()
    );
    Ok(())
}
