// Copyright 2025 the Zonechart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Control chart configuration and assembly.
//!
//! [`ChartAssembler::assemble`] runs the whole pipeline for one render:
//!
//! 1. pivot the table and resolve the dimension, metric and zone columns,
//! 2. build data points, skipping rows without a numeric metric,
//! 3. pick the zones (a per-row zone string overrides the chart setting),
//! 4. horizontal scale, then bottom axis layout, which fixes the bottom margin,
//! 5. vertical scale and axis inside the final margins,
//! 6. zone overlays, data line and markers.
//!
//! Everything is derived from the inputs; nothing is cached between calls.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Circle, Line, Point};

use crate::TextMeasurer;
use crate::axis::{AxisConfig, YAxisSide, layout_x_axis, layout_y_axis};
use crate::codec::{DecodePolicy, ZoneCodec, ZoneDecode};
use crate::descriptor::{DataPoint, RenderDescriptor, SeriesStyle};
use crate::error::{ConfigurationError, Diagnostic, GeometryError};
use crate::layout::{Margins, Size};
use crate::overlay::{DEFAULT_ZONE_OPACITY, build_zone_lines, build_zone_rects};
use crate::scale::{
    DEFAULT_BUFFER_PCT, ScaleLinear, build_x_scale, value_extent, y_scale_for_extent,
};
use crate::settings::Settings;
use crate::table::{DataTable, Scalar};
use crate::zone::{Zone, ZoneCompleteness};

/// Value domain used when the series has no numeric values.
const EMPTY_DOMAIN: (f64, f64) = (0.0, 1.0);

/// Layout and styling configuration for a control chart.
///
/// Host settings choose the data; this chooses how it is drawn.
#[derive(Clone, Debug, PartialEq)]
pub struct ControlChartSpec {
    /// Initial margins; `bottom` is replaced by the measured axis height.
    pub margins: Margins,
    /// Vertical padding as a percentage of the value spread.
    pub buffer_pct: f64,
    /// Space between the tallest x tick and the viewport bottom.
    pub label_gap: f64,
    /// Bottom axis ticks and styling.
    pub x_axis: AxisConfig,
    /// Vertical axis ticks and styling.
    pub y_axis: AxisConfig,
    /// Which margin carries the vertical axis.
    pub y_axis_side: YAxisSide,
    /// Data line and markers.
    pub series_style: SeriesStyle,
    /// Opacity of zone bands.
    pub zone_opacity: f32,
    /// Tolerance for malformed zone records.
    pub decode_policy: DecodePolicy,
    /// What makes a zone drawable.
    pub completeness: ZoneCompleteness,
}

impl Default for ControlChartSpec {
    fn default() -> Self {
        Self {
            margins: Margins::default(),
            buffer_pct: DEFAULT_BUFFER_PCT,
            label_gap: 25.0,
            x_axis: AxisConfig::default(),
            y_axis: AxisConfig::default(),
            y_axis_side: YAxisSide::Left,
            series_style: SeriesStyle::default(),
            zone_opacity: DEFAULT_ZONE_OPACITY,
            decode_policy: DecodePolicy::Lenient,
            completeness: ZoneCompleteness::LevelOrRange,
        }
    }
}

impl ControlChartSpec {
    /// Creates a spec with default layout and styling.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the initial margins.
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    /// Sets the vertical buffer percentage.
    pub fn with_buffer_pct(mut self, buffer_pct: f64) -> Self {
        self.buffer_pct = buffer_pct.max(0.0);
        self
    }

    /// Sets the gap below the x tick labels.
    pub fn with_label_gap(mut self, label_gap: f64) -> Self {
        self.label_gap = label_gap;
        self
    }

    /// Sets the bottom axis configuration.
    pub fn with_x_axis(mut self, axis: AxisConfig) -> Self {
        self.x_axis = axis;
        self
    }

    /// Sets the vertical axis configuration.
    pub fn with_y_axis(mut self, axis: AxisConfig) -> Self {
        self.y_axis = axis;
        self
    }

    /// Moves the vertical axis to the given side.
    pub fn with_y_axis_side(mut self, side: YAxisSide) -> Self {
        self.y_axis_side = side;
        self
    }

    /// Sets the data line and marker styling.
    pub fn with_series_style(mut self, style: SeriesStyle) -> Self {
        self.series_style = style;
        self
    }

    /// Sets the zone band opacity.
    pub fn with_zone_opacity(mut self, opacity: f32) -> Self {
        self.zone_opacity = opacity;
        self
    }

    /// Sets the zone decode policy.
    pub fn with_decode_policy(mut self, policy: DecodePolicy) -> Self {
        self.decode_policy = policy;
        self
    }

    /// Sets the zone completeness policy.
    pub fn with_completeness(mut self, completeness: ZoneCompleteness) -> Self {
        self.completeness = completeness;
        self
    }
}

/// Turns a table and settings into a [`RenderDescriptor`].
#[derive(Clone, Copy)]
pub struct ChartAssembler<'a> {
    spec: &'a ControlChartSpec,
    measurer: &'a dyn TextMeasurer,
}

impl core::fmt::Debug for ChartAssembler<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ChartAssembler")
            .field("spec", &self.spec)
            .finish_non_exhaustive()
    }
}

impl<'a> ChartAssembler<'a> {
    /// Creates an assembler measuring labels with `measurer`.
    pub fn new(spec: &'a ControlChartSpec, measurer: &'a dyn TextMeasurer) -> Self {
        Self { spec, measurer }
    }

    /// Builds the descriptor for one render.
    ///
    /// Fails only when the dimension or metric column is missing. Every other
    /// problem is recovered from and listed in `diagnostics`.
    pub fn assemble(
        &self,
        table: &DataTable,
        settings: &Settings,
        view: Size,
    ) -> Result<RenderDescriptor, ConfigurationError> {
        let spec = self.spec;
        let frame = table.frame();

        let dimension = settings.dimension();
        let metric = settings.metric();
        let xs = frame
            .get(dimension)
            .ok_or_else(|| ConfigurationError::MissingDimension(String::from(dimension)))?;
        let ys = frame
            .get(metric)
            .ok_or_else(|| ConfigurationError::MissingMetric(String::from(metric)))?;
        let zone_cells = settings.zone_column().and_then(|name| frame.get(name));

        let mut diagnostics = Vec::new();

        let mut points = Vec::with_capacity(frame.len());
        let mut skipped = 0_usize;
        for (x_value, y_value) in xs.iter().zip(ys) {
            match y_value.as_f64() {
                Some(value) => points.push(DataPoint {
                    index: points.len(),
                    x_value: (*x_value).clone(),
                    value,
                }),
                None => skipped += 1,
            }
        }
        if skipped > 0 {
            let e = GeometryError::NonNumericValues { count: skipped };
            log::warn!("{e}");
            diagnostics.push(Diagnostic::from(e));
        }

        let codec = ZoneCodec::new(spec.decode_policy);
        let ZoneDecode { zones, errors } = match zone_cells.and_then(first_zone_string) {
            Some(stored) => codec.decode_with_diagnostics(stored),
            None => settings.chart_zones(&codec),
        };
        for e in errors {
            log::warn!("dropping stored zone data: {e}");
            diagnostics.push(Diagnostic::from(e));
        }
        let zones: Vec<Zone> = zones
            .into_iter()
            .filter(|z| z.is_complete(spec.completeness))
            .collect();

        let count = points.len();
        let x = build_x_scale(count, view.width, &spec.margins);
        let labels: Vec<String> = points.iter().map(|p| p.x_value.label()).collect();
        let x_layout = layout_x_axis(
            &labels,
            &x,
            view,
            &spec.margins,
            &spec.x_axis,
            spec.label_gap,
            settings.x_axis_title(),
            self.measurer,
        );
        let margins = spec.margins.with_bottom(x_layout.bottom_margin);

        let extent = value_extent(points.iter().map(|p| p.value));
        let y = if extent.is_degenerate() {
            let e = GeometryError::EmptySeries;
            log::warn!("{e}");
            diagnostics.push(Diagnostic::from(e));
            ScaleLinear::new(EMPTY_DOMAIN, margins.y_range(view.height))
        } else {
            y_scale_for_extent(extent, view.height, &margins, spec.buffer_pct)
        };
        let y_axis = layout_y_axis(
            &y,
            view,
            &margins,
            spec.y_axis_side,
            &spec.y_axis,
            settings.y_axis_title(),
            self.measurer,
        );

        let zone_rects = build_zone_rects(&zones, &x, &y, count, spec.zone_opacity);
        let zone_lines = build_zone_lines(&zones)
            .iter()
            .map(|l| l.rule(&x, &y, count))
            .collect();

        let pixels: Vec<Point> = points
            .iter()
            .map(|p| Point::new(x.map(p.index as f64), y.map(p.value)))
            .collect();
        let markers = pixels
            .iter()
            .map(|&p| Circle::new(p, spec.series_style.marker_radius))
            .collect();
        let lines = pixels.windows(2).map(|w| Line::new(w[0], w[1])).collect();

        Ok(RenderDescriptor {
            view,
            plot: margins.plot_rect(view),
            points,
            markers,
            lines,
            zone_rects,
            zone_lines,
            x_axis: x_layout.axis,
            y_axis,
            margins,
            series_style: spec.series_style.clone(),
            diagnostics,
        })
    }
}

/// The first non-blank zone string in the zone column.
fn first_zone_string<'s>(cells: &[&'s Scalar]) -> Option<&'s str> {
    cells
        .iter()
        .copied()
        .filter_map(Scalar::as_str)
        .find(|s| !s.trim().is_empty())
}
