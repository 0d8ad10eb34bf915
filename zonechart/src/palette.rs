// Copyright 2025 the Zonechart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Zone colour palette.
//!
//! Pure functions only: a palette is derived from a base colour every time it
//! is asked for.

extern crate alloc;

use alloc::vec::Vec;

use peniko::Color;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// Channel multiplier for one brightening step.
const BRIGHTER_STEP: f64 = 0.7;
/// Channels below this are lifted before brightening so dark colours still move.
const BRIGHTER_FLOOR: f64 = 30.0;

/// Returns `count` colours running from `base` to `base` brightened `count` times.
///
/// The ramp interpolates linearly in sRGB. A `count` of one yields `[base]`.
pub fn palette(base: Color, count: usize) -> Vec<Color> {
    if count == 0 {
        return Vec::new();
    }
    let start = channels(base);
    let end = brighter(start, count as f64);
    if count == 1 {
        return alloc::vec![base];
    }
    let last = (count - 1) as f64;
    (0..count)
        .map(|i| {
            let t = i as f64 / last;
            let c = [
                lerp(start[0], end[0], t),
                lerp(start[1], end[1], t),
                lerp(start[2], end[2], t),
            ];
            to_color(c)
        })
        .collect()
}

/// The preset swatches offered by the zone editor: three shades each of green,
/// yellow and red.
pub fn zone_presets() -> Vec<Color> {
    let mut out = Vec::with_capacity(9);
    for base in [
        Color::from_rgb8(25, 150, 0),
        Color::from_rgb8(245, 195, 0),
        Color::from_rgb8(207, 57, 53),
    ] {
        out.extend(palette(base, 3));
    }
    out
}

/// Returns `color` with its alpha replaced by `opacity` (clamped to `0..=1`).
pub fn zone_color_at_opacity(color: Color, opacity: f32) -> Color {
    color.with_alpha(opacity.clamp(0.0, 1.0))
}

fn channels(color: Color) -> [f64; 3] {
    let rgba = color.to_rgba8();
    [f64::from(rgba.r), f64::from(rgba.g), f64::from(rgba.b)]
}

fn brighter(rgb: [f64; 3], k: f64) -> [f64; 3] {
    let [r, g, b] = rgb;
    if r == 0.0 && g == 0.0 && b == 0.0 {
        return [BRIGHTER_FLOOR; 3];
    }
    let factor = BRIGHTER_STEP.powf(k);
    let lift = |v: f64| {
        let v = if v != 0.0 && v < BRIGHTER_FLOOR {
            BRIGHTER_FLOOR
        } else {
            v
        };
        (v / factor).min(255.0)
    };
    [lift(r), lift(g), lift(b)]
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

fn to_color(rgb: [f64; 3]) -> Color {
    let ch = |v: f64| {
        let v = v.round().clamp(0.0, 255.0);
        #[allow(
            clippy::cast_possible_truncation,
            reason = "rounded and clamped to the u8 range"
        )]
        {
            v as u8
        }
    };
    Color::from_rgb8(ch(rgb[0]), ch(rgb[1]), ch(rgb[2]))
}
