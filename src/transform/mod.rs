//! Pixel transforms and the contract every one of them satisfies.
//!
//! A transform takes exclusive ownership of a [`PixelBuffer`] plus an integer
//! parameter and returns a buffer of the same size. Given equal inputs it
//! returns equal outputs. Transforms without a parameter ignore it; callers
//! pass 0.

mod convolve;
mod filters;

pub use convolve::{Convolution, Kernel};
pub use filters::{Greyscale, HueShift, Negative, Posterize, SaturationShift, Threshold, ValueShift};

use core::ops::RangeInclusive;

use crate::error::ArgumentError;
use crate::pixel::PixelBuffer;

/// A deterministic, size-preserving operation on a pixel buffer.
pub trait Transform {
    fn apply(&self, buffer: PixelBuffer, param: i32) -> PixelBuffer;
}

impl<T: Transform + ?Sized> Transform for &T {
    fn apply(&self, buffer: PixelBuffer, param: i32) -> PixelBuffer {
        (**self).apply(buffer, param)
    }
}

impl<T: Transform + ?Sized> Transform for Box<T> {
    fn apply(&self, buffer: PixelBuffer, param: i32) -> PixelBuffer {
        (**self).apply(buffer, param)
    }
}

/// Every transform the edit session can preview.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransformKind {
    Greyscale,
    Negative,
    /// Parameter: number of levels per channel.
    Posterize,
    /// Parameter: luma cutoff.
    Threshold,
    /// Parameter: degrees of hue rotation.
    Hue,
    /// Parameter: percent added to saturation.
    Saturation,
    /// Parameter: percent added to value (brightness).
    Value,
    StrongBlur,
    Sharpen,
    Emboss,
    /// Greyscale, posterize and emboss chained together.
    Comic,
}

impl TransformKind {
    pub const ALL: [TransformKind; 11] = [
        Self::Greyscale,
        Self::Negative,
        Self::Posterize,
        Self::Threshold,
        Self::Hue,
        Self::Saturation,
        Self::Value,
        Self::StrongBlur,
        Self::Sharpen,
        Self::Emboss,
        Self::Comic,
    ];

    /// Accepted parameter values, or `None` if the parameter is ignored.
    pub fn param_range(self) -> Option<RangeInclusive<i32>> {
        match self {
            Self::Posterize => Some(2..=20),
            Self::Threshold => Some(0..=255),
            Self::Hue => Some(-180..=180),
            Self::Saturation | Self::Value => Some(-100..=100),
            Self::Greyscale
            | Self::Negative
            | Self::StrongBlur
            | Self::Sharpen
            | Self::Emboss
            | Self::Comic => None,
        }
    }

    /// Parameter used for the first preview after selecting this kind.
    pub fn default_param(self) -> i32 {
        match self {
            Self::Posterize => 4,
            Self::Threshold => 127,
            _ => 0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Greyscale => "Greyscale",
            Self::Negative => "Negative",
            Self::Posterize => "Posterize (levels)",
            Self::Threshold => "Threshold",
            Self::Hue => "Hue (deg)",
            Self::Saturation => "Saturation (%)",
            Self::Value => "Value (%)",
            Self::StrongBlur => "Blur (strong 9x9)",
            Self::Sharpen => "Sharpen",
            Self::Emboss => "Emboss",
            Self::Comic => "Comic effect",
        }
    }

    /// Check `param` against [`param_range`](Self::param_range).
    /// Parameterless kinds accept any value.
    pub fn validate(self, param: i32) -> Result<i32, ArgumentError> {
        match self.param_range() {
            Some(range) if !range.contains(&param) => Err(ArgumentError::ParameterOutOfRange {
                kind: self,
                value: param,
                min: *range.start(),
                max: *range.end(),
            }),
            _ => Ok(param),
        }
    }
}

impl Transform for TransformKind {
    fn apply(&self, buffer: PixelBuffer, param: i32) -> PixelBuffer {
        match self {
            Self::Greyscale => Greyscale.apply(buffer, param),
            Self::Negative => Negative.apply(buffer, param),
            Self::Posterize => Posterize.apply(buffer, param),
            Self::Threshold => Threshold.apply(buffer, param),
            Self::Hue => HueShift.apply(buffer, param),
            Self::Saturation => SaturationShift.apply(buffer, param),
            Self::Value => ValueShift.apply(buffer, param),
            Self::StrongBlur => Convolution::new(Kernel::strong_blur()).apply(buffer, param),
            Self::Sharpen => Convolution::new(Kernel::sharpen()).apply(buffer, param),
            Self::Emboss => Convolution::new(Kernel::emboss()).apply(buffer, param),
            Self::Comic => comic().apply(buffer, param),
        }
    }
}

fn comic() -> Chain {
    Chain::new()
        .then(Greyscale, 0)
        .then(Posterize, 4)
        .then(Convolution::new(Kernel::emboss()), 0)
}

/// Transforms applied in order, each with a fixed parameter.
///
/// The chain's own parameter is ignored.
#[derive(Default)]
pub struct Chain {
    steps: Vec<(Box<dyn Transform + Send + Sync>, i32)>,
}

impl Chain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then(mut self, transform: impl Transform + Send + Sync + 'static, param: i32) -> Self {
        self.steps.push((Box::new(transform), param));
        self
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl Transform for Chain {
    fn apply(&self, buffer: PixelBuffer, _param: i32) -> PixelBuffer {
        self.steps
            .iter()
            .fold(buffer, |buf, (step, param)| step.apply(buf, *param))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::Pixel;

    fn gradient(w: usize, h: usize) -> PixelBuffer {
        let pixels = (0..w * h)
            .map(|i| {
                let v = (i * 37 % 256) as u8;
                Pixel::new(v, v.wrapping_mul(3), 255 - v)
            })
            .collect();
        PixelBuffer::from_vec(pixels, w, h)
    }

    #[test]
    fn every_kind_preserves_dimensions_and_is_deterministic() {
        let input = gradient(7, 5);
        for kind in TransformKind::ALL {
            let param = kind.default_param();
            let a = kind.apply(input.clone(), param);
            let b = kind.apply(input.clone(), param);
            assert_eq!((a.width(), a.height()), (7, 5), "{kind:?}");
            assert_eq!(a, b, "{kind:?}");
        }
    }

    #[test]
    fn every_kind_handles_empty_buffers() {
        for kind in TransformKind::ALL {
            let out = kind.apply(PixelBuffer::new(0, 3), kind.default_param());
            assert_eq!((out.width(), out.height()), (0, 3), "{kind:?}");
        }
    }

    #[test]
    fn default_params_are_in_range() {
        for kind in TransformKind::ALL {
            assert_eq!(kind.validate(kind.default_param()), Ok(kind.default_param()));
        }
    }

    #[test]
    fn labels_are_distinct_and_name_their_units() {
        let labels: Vec<&str> = TransformKind::ALL.iter().map(|k| k.label()).collect();
        for (i, label) in labels.iter().enumerate() {
            assert!(!label.is_empty());
            assert!(!labels[..i].contains(label), "duplicate label {label}");
        }
        assert_eq!(TransformKind::Hue.label(), "Hue (deg)");
        assert_eq!(TransformKind::Posterize.label(), "Posterize (levels)");
    }

    #[test]
    fn validate_rejects_out_of_range() {
        assert_eq!(
            TransformKind::Posterize.validate(1),
            Err(ArgumentError::ParameterOutOfRange {
                kind: TransformKind::Posterize,
                value: 1,
                min: 2,
                max: 20
            })
        );
        assert!(TransformKind::Hue.validate(181).is_err());
        assert!(TransformKind::Threshold.validate(255).is_ok());
        assert_eq!(TransformKind::Negative.validate(-999), Ok(-999));
    }

    #[test]
    fn chain_applies_in_order() {
        let input = PixelBuffer::filled(2, 2, Pixel::new(10, 20, 30));
        let chain = Chain::new().then(Negative, 0).then(Negative, 0);
        assert_eq!(chain.len(), 2);
        assert_eq!(chain.apply(input.clone(), 0), input);

        let once = Chain::new().then(Negative, 0).apply(input, 0);
        assert_eq!(once.get(0, 0), Some(Pixel::new(245, 235, 225)));
    }

    #[test]
    fn comic_matches_its_steps() {
        let input = gradient(6, 6);
        let manual = Convolution::new(Kernel::emboss())
            .apply(Posterize.apply(Greyscale.apply(input.clone(), 0), 4), 0);
        assert_eq!(TransformKind::Comic.apply(input, 0), manual);
    }
}
