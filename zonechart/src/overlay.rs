// Copyright 2025 the Zonechart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Zone overlays in pixel space.
//!
//! Range zones become translucent bands spanning the full index domain; level
//! zones become full-width threshold lines. Output order follows input order,
//! so later zones paint over earlier ones.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::{Line, Point, Rect};
use peniko::Color;

use crate::palette::zone_color_at_opacity;
use crate::scale::ScaleLinear;
use crate::zone::Zone;

/// Default opacity of zone bands.
pub const DEFAULT_ZONE_OPACITY: f32 = 0.5;

/// A zone band.
///
/// `y0` is the pixel position of `range[0]` and `y1` of `range[1]`. They are
/// not reordered, so `y1 < y0` is possible; use [`ZoneRect::rect`] for a
/// normalized rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoneRect {
    /// Left edge, `x(0)`.
    pub x0: f64,
    /// Right edge, `x(count)`.
    pub x1: f64,
    /// `y(range[0])`.
    pub y0: f64,
    /// `y(range[1])`.
    pub y1: f64,
    /// Fill, with the band opacity applied.
    pub color: Color,
}

impl ZoneRect {
    /// The band as a rectangle with non-negative width and height.
    pub fn rect(&self) -> Rect {
        Rect::new(self.x0, self.y0, self.x1, self.y1).abs()
    }
}

/// A threshold line, before placement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoneLine {
    /// Threshold value.
    pub level: f64,
    /// Stroke colour.
    pub color: Color,
}

/// A threshold line placed across the plot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoneRule {
    /// The line from `(x(0), y(level))` to `(x(count), y(level))`.
    pub line: Line,
    /// Stroke colour.
    pub color: Color,
    /// Threshold value.
    pub level: f64,
}

impl ZoneLine {
    /// Places the line across the full index domain.
    pub fn rule(&self, x: &ScaleLinear, y: &ScaleLinear, data_count: usize) -> ZoneRule {
        let py = y.map(self.level);
        ZoneRule {
            line: Line::new(
                Point::new(x.map(0.0), py),
                Point::new(x.map(data_count as f64), py),
            ),
            color: self.color,
            level: self.level,
        }
    }
}

/// Builds one band per zone that has both range bounds.
pub fn build_zone_rects(
    zones: &[Zone],
    x: &ScaleLinear,
    y: &ScaleLinear,
    data_count: usize,
    opacity: f32,
) -> Vec<ZoneRect> {
    let x0 = x.map(0.0);
    let x1 = x.map(data_count as f64);
    zones
        .iter()
        .filter_map(|zone| {
            let (first, second) = zone.full_range()?;
            Some(ZoneRect {
                x0,
                x1,
                y0: y.map(first),
                y1: y.map(second),
                color: zone_color_at_opacity(zone.color, opacity),
            })
        })
        .collect()
}

/// Builds one threshold line per zone that has a level.
pub fn build_zone_lines(zones: &[Zone]) -> Vec<ZoneLine> {
    zones
        .iter()
        .filter_map(|zone| {
            zone.level().map(|level| ZoneLine {
                level,
                color: zone.color,
            })
        })
        .collect()
}
