// Copyright 2025 the Zonechart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The render descriptor: everything a backend needs to draw one frame.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::{Circle, Line, Rect};
use peniko::Brush;
use peniko::color::palette::css;

use crate::axis::{AxisSpec, StrokeStyle};
use crate::error::Diagnostic;
use crate::layout::{Margins, Size};
use crate::overlay::{ZoneRect, ZoneRule};
use crate::table::Scalar;

/// One segment of the data line.
pub type PathSegment = Line;

/// A data point.
#[derive(Clone, Debug, PartialEq)]
pub struct DataPoint {
    /// Position in the series; the horizontal scale maps this.
    pub index: usize,
    /// The dimension cell, used for the tick label only.
    pub x_value: Scalar,
    /// The metric value.
    pub value: f64,
}

/// Styling of the data line and its markers.
#[derive(Clone, Debug, PartialEq)]
pub struct SeriesStyle {
    /// Stroke of the line between points.
    pub line: StrokeStyle,
    /// Marker radius.
    pub marker_radius: f64,
    /// Marker outline.
    pub marker_stroke: StrokeStyle,
    /// Marker fill.
    pub marker_fill: Brush,
    /// Width of zone threshold lines.
    pub zone_line_width: f64,
}

impl Default for SeriesStyle {
    fn default() -> Self {
        Self {
            line: StrokeStyle::solid(peniko::Color::from_rgb8(85, 85, 85), 4.0),
            marker_radius: 2.0,
            marker_stroke: StrokeStyle::solid(peniko::Color::from_rgb8(70, 130, 180), 2.0),
            marker_fill: Brush::Solid(css::WHITE),
            zone_line_width: 2.0,
        }
    }
}

/// Immutable chart geometry, rebuilt on every render.
///
/// Draw order is: zone bands, zone lines, data line, markers, axes.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderDescriptor {
    /// The viewport.
    pub view: Size,
    /// The plot rectangle inside the margins.
    pub plot: Rect,
    /// Data points in series order.
    pub points: Vec<DataPoint>,
    /// One marker per point, in pixels.
    pub markers: Vec<Circle>,
    /// Segments between consecutive points.
    pub lines: Vec<PathSegment>,
    /// Zone bands.
    pub zone_rects: Vec<ZoneRect>,
    /// Zone threshold lines.
    pub zone_lines: Vec<ZoneRule>,
    /// Bottom axis.
    pub x_axis: AxisSpec,
    /// Vertical axis.
    pub y_axis: AxisSpec,
    /// Final margins, with the computed bottom.
    pub margins: Margins,
    /// Line and marker styling.
    pub series_style: SeriesStyle,
    /// Problems recovered from while building.
    pub diagnostics: Vec<Diagnostic>,
}

impl RenderDescriptor {
    /// Whether anything was recovered from.
    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}
