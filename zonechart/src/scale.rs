// Copyright 2025 the Zonechart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scales for the control chart.
//!
//! The horizontal scale is index based: point `i` sits at `x(i)` regardless of
//! its label. The vertical scale covers the value extent plus a buffer so the
//! line never touches the plot edge.

extern crate alloc;

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::layout::Margins;

/// Default vertical padding, as a percentage of the value spread.
pub const DEFAULT_BUFFER_PCT: f64 = 10.0;

/// A linear mapping from a continuous domain to a pixel range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLinear {
    domain: (f64, f64),
    range: (f64, f64),
}

impl ScaleLinear {
    /// Creates a new scale mapping `domain` values to `range` values.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Maps a value from domain space into range space.
    ///
    /// A zero-width domain maps everything to the start of the range.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = d1 - d0;
        if denom == 0.0 || !denom.is_finite() {
            return r0;
        }
        let t = (x - d0) / denom;
        r0 + t * (r1 - r0)
    }

    /// Maps a range value back into the domain.
    pub fn invert(&self, px: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = r1 - r0;
        if denom == 0.0 {
            return d0;
        }
        let t = (px - r0) / denom;
        d0 + t * (d1 - d0)
    }

    /// The domain as `(start, end)`.
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// The pixel range as `(start, end)`.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Returns the minimum of the configured domain (as authored).
    pub fn domain_min(&self) -> f64 {
        self.domain.0
    }

    /// Returns the maximum of the configured domain (as authored).
    pub fn domain_max(&self) -> f64 {
        self.domain.1
    }

    /// Returns “nice-ish” tick values for the domain.
    ///
    /// Ticks outside the domain are dropped.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (mut lo, mut hi) = self.domain;
        if lo > hi {
            core::mem::swap(&mut lo, &mut hi);
        }
        let eps = (hi - lo).abs() * 1.0e-9;
        nice_ticks(lo, hi, count)
            .into_iter()
            .filter(|t| *t >= lo - eps && *t <= hi + eps)
            .collect()
    }
}

/// The `{min, max}` of a value series.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Extent {
    /// Smallest value.
    pub min: f64,
    /// Largest value.
    pub max: f64,
}

impl Extent {
    /// The extent of an empty series: `{+inf, -inf}`.
    pub const EMPTY: Self = Self {
        min: f64::INFINITY,
        max: f64::NEG_INFINITY,
    };

    /// Whether `min > max`, which is what an empty series produces.
    pub fn is_degenerate(&self) -> bool {
        self.min > self.max
    }

    /// Expands the extent by `buffer_pct` percent of its spread on each side.
    pub fn buffered(&self, buffer_pct: f64) -> (f64, f64) {
        let buffer = (self.max - self.min) * (buffer_pct / 100.0);
        (self.min - buffer, self.max + buffer)
    }
}

/// Computes the value extent; non-finite values are ignored.
pub fn value_extent(values: impl IntoIterator<Item = f64>) -> Extent {
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(Extent::EMPTY, |e, v| Extent {
            min: e.min.min(v),
            max: e.max.max(v),
        })
}

/// The horizontal scale: `[0, count]` onto the plot's horizontal span.
pub fn build_x_scale(count: usize, width: f64, margins: &Margins) -> ScaleLinear {
    ScaleLinear::new((0.0, count as f64), margins.x_range(width))
}

/// The vertical scale: the buffered value extent onto the plot's vertical span.
///
/// An empty series produces an infinite, inverted domain; callers check
/// [`Extent::is_degenerate`] first and substitute a default domain.
pub fn build_y_scale(
    values: impl IntoIterator<Item = f64>,
    height: f64,
    margins: &Margins,
    buffer_pct: f64,
) -> ScaleLinear {
    y_scale_for_extent(value_extent(values), height, margins, buffer_pct)
}

pub(crate) fn y_scale_for_extent(
    extent: Extent,
    height: f64,
    margins: &Margins,
    buffer_pct: f64,
) -> ScaleLinear {
    ScaleLinear::new(extent.buffered(buffer_pct), margins.y_range(height))
}

fn nice_ticks(mut min: f64, mut max: f64, count: usize) -> Vec<f64> {
    if count == 0 || !min.is_finite() || !max.is_finite() {
        return Vec::new();
    }
    if min == max {
        return alloc::vec![min];
    }
    if min > max {
        core::mem::swap(&mut min, &mut max);
    }
    let span = max - min;
    let step = nice_step(span / count.max(1) as f64);
    if step == 0.0 {
        return alloc::vec![min, max];
    }

    let start = (min / step).floor() * step;
    let stop = (max / step).ceil() * step;

    let n_f = ((stop - start) / step).round();
    let n = if n_f.is_finite() && n_f >= 0.0 {
        let n_f = n_f.min(10_000.0);
        #[allow(
            clippy::cast_possible_truncation,
            reason = "guarded by finite/non-negative checks and capped at 10k"
        )]
        {
            n_f as u64
        }
    } else {
        0
    };
    (0..=n).map(|i| start + step * i as f64).collect()
}

/// Rounds a raw step to 1, 2, 5 or 10 times a power of ten.
pub(crate) fn nice_step(step: f64) -> f64 {
    if !step.is_finite() || step <= 0.0 {
        return 0.0;
    }
    let power = step.log10().floor();
    let base = 10_f64.powf(power);
    let error = step / base;
    let nice = if error >= 7.5 {
        10.0
    } else if error >= 3.5 {
        5.0
    } else if error >= 1.5 {
        2.0
    } else {
        1.0
    };
    nice * base
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn x_scale_maps_index_domain_onto_margins() {
        let s = build_x_scale(3, 950.0, &Margins::default());
        assert_eq!(s.domain(), (0.0, 3.0));
        assert!(approx(s.map(0.0), 75.0));
        assert!(approx(s.map(3.0), 925.0));
    }

    #[test]
    fn y_scale_buffers_and_inverts() {
        let m = Margins::default();
        let s = build_y_scale([100.0, 125.0, 75.0], 600.0, &m, DEFAULT_BUFFER_PCT);
        let (d0, d1) = s.domain();
        assert!(approx(d0, 70.0));
        assert!(approx(d1, 130.0));
        // Larger values sit higher, which is a smaller pixel y.
        assert!(s.map(125.0) < s.map(75.0));
        assert!(approx(s.map(d0), 500.0));
        assert!(approx(s.map(d1), 50.0));
    }

    #[test]
    fn buffered_domain_contains_every_value() {
        let values = [3.5, -2.0, 17.25, 0.0, 9.0];
        for pct in [0.0, 1.0, 10.0, 50.0] {
            let s = build_y_scale(values, 400.0, &Margins::default(), pct);
            let (d0, d1) = s.domain();
            assert!(d0 <= -2.0 && d1 >= 17.25);
            if pct == 0.0 {
                assert_eq!((d0, d1), (-2.0, 17.25));
            } else {
                assert!(d0 < -2.0 && d1 > 17.25);
            }
        }
    }

    #[test]
    fn empty_series_is_degenerate() {
        let e = value_extent(core::iter::empty());
        assert!(e.is_degenerate());
        assert_eq!(e, Extent::EMPTY);
        assert!(!value_extent([1.0]).is_degenerate());
    }

    #[test]
    fn zero_width_domain_maps_to_range_start() {
        let s = ScaleLinear::new((5.0, 5.0), (500.0, 50.0));
        assert_eq!(s.map(5.0), 500.0);
        assert_eq!(s.map(9.0), 500.0);
    }

    #[test]
    fn invert_round_trips_map() {
        let s = ScaleLinear::new((70.0, 130.0), (500.0, 50.0));
        assert!(approx(s.invert(s.map(101.0)), 101.0));
    }

    #[test]
    fn ticks_stay_inside_domain() {
        let s = ScaleLinear::new((70.0, 130.0), (500.0, 50.0));
        let ticks = s.ticks(10);
        assert_eq!(ticks.first().copied(), Some(70.0));
        assert!(ticks.iter().all(|t| *t >= 70.0 && *t <= 130.0));
        assert!(ticks.len() >= 5);
    }
}
