//! Square-kernel convolution with clamp-to-edge sampling.

use super::Transform;
use crate::pixel::{Pixel, PixelBuffer};

/// Odd-sized square kernel of integer weights.
///
/// Each output channel is `round(sum(weight * sample) / divisor) + bias`,
/// clamped to `0..=255`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Kernel {
    size: usize,
    weights: Vec<i32>,
    divisor: i32,
    bias: i32,
}

/// Binomial coefficients C(8, k): one row of a 9-tap Gaussian.
const BINOMIAL_9: [i32; 9] = [1, 8, 28, 56, 70, 56, 28, 8, 1];

impl Kernel {
    /// `weights` must hold `size * size` values with `size` odd, and
    /// `divisor` must be non-zero.
    pub fn new(size: usize, weights: Vec<i32>, divisor: i32, bias: i32) -> Option<Self> {
        if size % 2 == 0 || weights.len() != size * size || divisor == 0 {
            return None;
        }
        Some(Self {
            size,
            weights,
            divisor,
            bias,
        })
    }

    pub fn sharpen() -> Self {
        Self {
            size: 3,
            weights: vec![0, -1, 0, -1, 5, -1, 0, -1, 0],
            divisor: 1,
            bias: 0,
        }
    }

    pub fn emboss() -> Self {
        Self {
            size: 3,
            weights: vec![-2, -1, 0, -1, 1, 1, 0, 1, 2],
            divisor: 1,
            bias: 0,
        }
    }

    /// 9x9 Gaussian built from the outer product of binomial rows.
    pub fn strong_blur() -> Self {
        let weights = BINOMIAL_9
            .iter()
            .flat_map(|&a| BINOMIAL_9.iter().map(move |&b| a * b))
            .collect();
        Self {
            size: 9,
            weights,
            divisor: 256 * 256,
            bias: 0,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }
}

/// Applies a fixed [`Kernel`]. The parameter is ignored.
#[derive(Clone, Debug)]
pub struct Convolution {
    kernel: Kernel,
}

impl Convolution {
    pub fn new(kernel: Kernel) -> Self {
        Self { kernel }
    }
}

impl Transform for Convolution {
    fn apply(&self, buffer: PixelBuffer, _param: i32) -> PixelBuffer {
        convolve(&self.kernel, &buffer).unwrap_or(buffer)
    }
}

/// `None` for an empty buffer, which is returned unchanged.
fn convolve(k: &Kernel, buffer: &PixelBuffer) -> Option<PixelBuffer> {
    if buffer.height() == 0 {
        return None;
    }
    let src = buffer.as_imgref()?;
    let (w, h) = (src.width(), src.height());
    let rows: Vec<&[Pixel]> = src.rows().collect();
    let radius = (k.size / 2) as isize;
    let clamp_x = |x: isize| x.clamp(0, w as isize - 1) as usize;
    let clamp_y = |y: isize| y.clamp(0, h as isize - 1) as usize;
    let channel = |sum: i64| {
        let v = div_round(sum, i64::from(k.divisor)) + i64::from(k.bias);
        v.clamp(0, 255) as u8
    };

    let mut out = Vec::with_capacity(w * h);
    for y in 0..h as isize {
        for x in 0..w as isize {
            let mut acc = [0i64; 3];
            for (ky, weights) in k.weights.chunks_exact(k.size).enumerate() {
                let row = rows[clamp_y(y + ky as isize - radius)];
                for (kx, &weight) in weights.iter().enumerate() {
                    if weight == 0 {
                        continue;
                    }
                    let p = row[clamp_x(x + kx as isize - radius)];
                    let weight = i64::from(weight);
                    acc[0] += weight * i64::from(p.r);
                    acc[1] += weight * i64::from(p.g);
                    acc[2] += weight * i64::from(p.b);
                }
            }
            out.push(Pixel::new(channel(acc[0]), channel(acc[1]), channel(acc[2])));
        }
    }
    Some(PixelBuffer::from_vec(out, w, h))
}

/// Division rounding half away from zero.
fn div_round(n: i64, d: i64) -> i64 {
    let (q, r) = (n / d, n % d);
    if 2 * r.abs() >= d.abs() {
        if (n < 0) != (d < 0) { q - 1 } else { q + 1 }
    } else {
        q
    }
}
