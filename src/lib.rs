//! # bmpedit
//!
//! 24-bit BMP codec and non-destructive image editing.
//!
//! ## Codec
//!
//! Decodes uncompressed 24-bit BMP files with either row order into a
//! top-down [`PixelBuffer`], and encodes back to bottom-up 24-bit BMP with a
//! header regenerated from the buffer. Each row is padded to a 4-byte
//! boundary on disk.
//!
//! ## Editing
//!
//! [`EditSession`] holds a committed [`Image`] and previews one
//! [`TransformKind`] at a time. Previews are always recomputed from a
//! snapshot of the committed image, so parameter changes never compound,
//! and nothing is committed until [`EditSession::apply`].
//!
//! ## Non-Goals
//!
//! - RLE, bitfield and palette BMP variants, and any bit depth other than 24
//! - Multi-frame formats
//! - Display, scaling and rendering
//!
//! ## Usage
//!
//! ```no_run
//! use bmpedit::{EditSession, TransformKind};
//!
//! let mut session = EditSession::new();
//! session.open("photo.bmp")?;
//! session.select_transform(TransformKind::Threshold)?;
//! session.reparameterize(90)?;
//! session.apply()?;
//! session.save("photo-threshold.bmp")?;
//! # Ok::<(), bmpedit::BmpEditError>(())
//! ```

#![forbid(unsafe_code)]

mod error;
mod file;
mod image;
mod limits;
mod pixel;

pub mod bmp;
pub mod session;
pub mod transform;

mod decode;

// Re-exports
pub use bmp::{BmpHeader, RowOrder, decode_bmp, encode_bmp};
pub use decode::DecodeRequest;
pub use enough::{Stop, Unstoppable};
pub use error::{ArgumentError, BmpEditError, FormatError, IoError, StateError};
pub use file::{load_image, load_image_with_limits, save_image};
pub use image::Image;
pub use limits::Limits;
pub use pixel::{BLACK, Pixel, PixelBuffer};
pub use session::EditSession;
pub use transform::{Transform, TransformKind};
