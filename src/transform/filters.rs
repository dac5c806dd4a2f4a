//! Per-pixel filters.

use super::Transform;
use crate::pixel::{Pixel, PixelBuffer};

const WHITE: Pixel = Pixel {
    r: 255,
    g: 255,
    b: 255,
};

/// Rec. 601 luma, rounded.
pub(crate) fn luma(p: Pixel) -> u8 {
    let y = 299 * u32::from(p.r) + 587 * u32::from(p.g) + 114 * u32::from(p.b);
    ((y + 500) / 1000) as u8
}

/// Replaces each pixel with its luma on all three channels.
#[derive(Clone, Copy, Debug, Default)]
pub struct Greyscale;

impl Transform for Greyscale {
    fn apply(&self, mut buffer: PixelBuffer, _param: i32) -> PixelBuffer {
        buffer.map_in_place(|p| {
            let y = luma(p);
            Pixel::new(y, y, y)
        });
        buffer
    }
}

/// `255 - channel` on every channel.
#[derive(Clone, Copy, Debug, Default)]
pub struct Negative;

impl Transform for Negative {
    fn apply(&self, mut buffer: PixelBuffer, _param: i32) -> PixelBuffer {
        buffer.map_in_place(|p| Pixel::new(255 - p.r, 255 - p.g, 255 - p.b));
        buffer
    }
}

/// Quantizes each channel to `param` evenly spaced levels (clamped to 2..=20).
#[derive(Clone, Copy, Debug, Default)]
pub struct Posterize;

impl Transform for Posterize {
    fn apply(&self, mut buffer: PixelBuffer, param: i32) -> PixelBuffer {
        let steps = param.clamp(2, 20) as u32 - 1;
        let quantize = |c: u8| {
            let level = (u32::from(c) * steps + 127) / 255;
            ((level * 255 + steps / 2) / steps) as u8
        };
        buffer.map_in_place(|p| Pixel::new(quantize(p.r), quantize(p.g), quantize(p.b)));
        buffer
    }
}

/// White where luma is at least `param` (clamped to 0..=255), black elsewhere.
#[derive(Clone, Copy, Debug, Default)]
pub struct Threshold;

impl Transform for Threshold {
    fn apply(&self, mut buffer: PixelBuffer, param: i32) -> PixelBuffer {
        let cutoff = param.clamp(0, 255) as u8;
        buffer.map_in_place(|p| {
            if luma(p) >= cutoff {
                WHITE
            } else {
                crate::pixel::BLACK
            }
        });
        buffer
    }
}

/// Rotates hue by `param` degrees (clamped to -180..=180).
#[derive(Clone, Copy, Debug, Default)]
pub struct HueShift;

impl Transform for HueShift {
    fn apply(&self, buffer: PixelBuffer, param: i32) -> PixelBuffer {
        let degrees = param.clamp(-180, 180) as f32;
        map_hsv(buffer, degrees == 0.0, |hsv| Hsv {
            h: (hsv.h + degrees).rem_euclid(360.0),
            ..hsv
        })
    }
}

/// Adds `param` percent (clamped to -100..=100) to saturation.
#[derive(Clone, Copy, Debug, Default)]
pub struct SaturationShift;

impl Transform for SaturationShift {
    fn apply(&self, buffer: PixelBuffer, param: i32) -> PixelBuffer {
        let delta = param.clamp(-100, 100) as f32 / 100.0;
        map_hsv(buffer, param == 0, |hsv| Hsv {
            s: (hsv.s + delta).clamp(0.0, 1.0),
            ..hsv
        })
    }
}

/// Adds `param` percent (clamped to -100..=100) to value.
#[derive(Clone, Copy, Debug, Default)]
pub struct ValueShift;

impl Transform for ValueShift {
    fn apply(&self, buffer: PixelBuffer, param: i32) -> PixelBuffer {
        let delta = param.clamp(-100, 100) as f32 / 100.0;
        map_hsv(buffer, param == 0, |hsv| Hsv {
            v: (hsv.v + delta).clamp(0.0, 1.0),
            ..hsv
        })
    }
}

/// Hue in degrees `[0, 360)`, saturation and value in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Hsv {
    h: f32,
    s: f32,
    v: f32,
}

fn map_hsv(mut buffer: PixelBuffer, identity: bool, f: impl Fn(Hsv) -> Hsv) -> PixelBuffer {
    // Skip the float round trip when it cannot change anything.
    if identity {
        return buffer;
    }
    buffer.map_in_place(|p| hsv_to_rgb(f(rgb_to_hsv(p))));
    buffer
}

fn rgb_to_hsv(p: Pixel) -> Hsv {
    let r = f32::from(p.r) / 255.0;
    let g = f32::from(p.g) / 255.0;
    let b = f32::from(p.b) / 255.0;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let h = if delta == 0.0 {
        0.0
    } else if max == r {
        60.0 * ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };
    let s = if max == 0.0 { 0.0 } else { delta / max };
    Hsv { h, s, v: max }
}

fn hsv_to_rgb(hsv: Hsv) -> Pixel {
    let c = hsv.v * hsv.s;
    let sector = hsv.h.rem_euclid(360.0) / 60.0;
    let x = c * (1.0 - (sector.rem_euclid(2.0) - 1.0).abs());
    let m = hsv.v - c;
    let (r, g, b) = match sector as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let to_byte = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    Pixel::new(to_byte(r), to_byte(g), to_byte(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one(p: Pixel) -> PixelBuffer {
        PixelBuffer::filled(1, 1, p)
    }

    fn first(buf: &PixelBuffer) -> Pixel {
        buf.get(0, 0).unwrap()
    }

    #[test]
    fn greyscale_uses_luma() {
        assert_eq!(first(&Greyscale.apply(one(Pixel::new(255, 0, 0)), 0)), Pixel::new(76, 76, 76));
        assert_eq!(first(&Greyscale.apply(one(WHITE), 0)), WHITE);
    }

    #[test]
    fn negative_inverts() {
        let out = Negative.apply(one(Pixel::new(0, 100, 255)), 0);
        assert_eq!(first(&out), Pixel::new(255, 155, 0));
    }

    #[test]
    fn posterize_two_levels_is_binary_per_channel() {
        let out = Posterize.apply(one(Pixel::new(10, 130, 250)), 2);
        assert_eq!(first(&out), Pixel::new(0, 255, 255));
    }

    #[test]
    fn posterize_keeps_extremes() {
        for levels in 2..=20 {
            let out = Posterize.apply(one(Pixel::new(0, 255, 0)), levels);
            assert_eq!(first(&out), Pixel::new(0, 255, 0), "levels {levels}");
        }
    }

    #[test]
    fn threshold_cutoff_is_inclusive() {
        let grey = Pixel::new(100, 100, 100);
        assert_eq!(first(&Threshold.apply(one(grey), 100)), WHITE);
        assert_eq!(first(&Threshold.apply(one(grey), 101)), crate::pixel::BLACK);
    }

    #[test]
    fn hue_rotation() {
        let red = Pixel::new(255, 0, 0);
        assert_eq!(first(&HueShift.apply(one(red), 120)), Pixel::new(0, 255, 0));
        assert_eq!(first(&HueShift.apply(one(red), -120)), Pixel::new(0, 0, 255));
        assert_eq!(first(&HueShift.apply(one(red), 0)), red);
    }

    #[test]
    fn saturation_and_value() {
        let red = Pixel::new(255, 0, 0);
        assert_eq!(
            first(&SaturationShift.apply(one(red), -100)),
            Pixel::new(255, 255, 255)
        );
        assert_eq!(first(&ValueShift.apply(one(red), -100)), crate::pixel::BLACK);
        assert_eq!(first(&ValueShift.apply(one(red), 100)), red);
    }

    #[test]
    fn hsv_round_trip_primaries() {
        for p in [
            Pixel::new(255, 0, 0),
            Pixel::new(0, 255, 0),
            Pixel::new(0, 0, 255),
            Pixel::new(128, 128, 128),
            Pixel::new(255, 255, 0),
        ] {
            assert_eq!(hsv_to_rgb(rgb_to_hsv(p)), p);
        }
    }
}
