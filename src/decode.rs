use enough::Stop;

use crate::bmp;
use crate::error::BmpEditError;
use crate::image::Image;
use crate::limits::Limits;

/// Builder for decoding BMP bytes with optional resource limits.
///
/// ```
/// use bmpedit::{DecodeRequest, Limits, Unstoppable};
///
/// let data: &[u8] = b"not a bitmap";
/// let limits = Limits { max_pixels: Some(1 << 24), ..Default::default() };
/// assert!(DecodeRequest::new(data).with_limits(&limits).decode(Unstoppable).is_err());
/// ```
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, limits: None }
    }

    /// Reject images whose dimensions or buffer size exceed `limits`.
    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn decode(self, stop: impl Stop) -> Result<Image, BmpEditError> {
        bmp::decode_with_limits(self.data, self.limits, &stop)
    }
}
