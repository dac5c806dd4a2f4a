use std::path::PathBuf;

use enough::StopReason;

use crate::transform::TransformKind;

/// Errors from BMP decoding, encoding and the edit session.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BmpEditError {
    #[error("invalid BMP data: {0}")]
    Format(#[from] FormatError),

    #[error("I/O failure: {0}")]
    Io(#[from] IoError),

    #[error("invalid argument: {0}")]
    Argument(#[from] ArgumentError),

    #[error("invalid session state: {0}")]
    State(#[from] StateError),

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for BmpEditError {
    fn from(r: StopReason) -> Self {
        BmpEditError::Cancelled(r)
    }
}

/// The byte stream is not a BMP this crate can decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum FormatError {
    #[error("signature is not 'BM'")]
    BadSignature,

    #[error("header ends before all 54 bytes were read")]
    TruncatedHeader,

    #[error("unsupported encoding: {bits_per_pixel} bits per pixel, compression {compression}")]
    UnsupportedEncoding { bits_per_pixel: u16, compression: u32 },
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum IoError {
    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("pixel data offset skips {requested} bytes but only {available} remain")]
    ShortSkip { requested: usize, available: usize },

    #[error("pixel data ends early in row {row}")]
    TruncatedPixelData { row: usize },

    #[error("cannot write {}: {source}", path.display())]
    WriteFailure {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ArgumentError {
    #[error("only 24-bit images can be written, got {0} bits per pixel")]
    UnsupportedBitDepth(u16),

    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: i64, height: i64 },

    #[error("{kind:?} parameter {value} outside {min}..={max}")]
    ParameterOutOfRange {
        kind: TransformKind,
        value: i32,
        min: i32,
        max: i32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum StateError {
    #[error("no image loaded")]
    NoImageLoaded,

    #[error("no transform is being previewed")]
    NoActiveTransform,
}
