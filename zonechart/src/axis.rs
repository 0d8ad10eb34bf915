// Copyright 2025 the Zonechart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis layout.
//!
//! The bottom axis is measured before the vertical scale exists: its tick
//! labels decide a shared rotation angle, and the rotated labels decide the
//! bottom margin. The vertical axis sits in a fixed margin and never rotates.
//!
//! Both axes produce an [`AxisSpec`], a plain description of tick positions,
//! labels and styling for the drawing backend.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use kurbo::Point;
use peniko::Brush;
use peniko::color::palette::css;

use crate::format::format_tick_with_step;
use crate::layout::{Margins, Size};
use crate::scale::ScaleLinear;
use crate::{TextMeasurer, TextStyle};

/// A paint + width pair for stroked paths (axis lines, ticks, series lines).
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Stroke paint.
    pub brush: Brush,
    /// Stroke width in pixels.
    pub stroke_width: f64,
}

impl StrokeStyle {
    /// Convenience for a solid stroke.
    pub fn solid(brush: impl Into<Brush>, stroke_width: f64) -> Self {
        Self {
            brush: brush.into(),
            stroke_width,
        }
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::solid(css::BLACK, 1.0)
    }
}

/// Axis styling defaults.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisStyle {
    /// Style for the axis line and tick marks.
    pub rule: StrokeStyle,
    /// Fill paint for tick labels.
    pub label_fill: Brush,
    /// Font size for tick labels.
    pub label_font_size: f64,
    /// Fill paint for the axis title.
    pub title_fill: Brush,
    /// Font size for the axis title.
    pub title_font_size: f64,
}

impl Default for AxisStyle {
    fn default() -> Self {
        let rule = StrokeStyle::default();
        Self {
            rule: rule.clone(),
            label_fill: rule.brush.clone(),
            label_font_size: 10.0,
            title_fill: rule.brush,
            title_font_size: 11.0,
        }
    }
}

/// Axis orientation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AxisOrient {
    /// Horizontal axis below the plot.
    Bottom,
    /// Vertical axis left of the plot.
    Left,
    /// Vertical axis right of the plot.
    Right,
}

/// Which side of the plot carries the vertical axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum YAxisSide {
    /// In the left margin.
    #[default]
    Left,
    /// In the right margin.
    Right,
}

impl YAxisSide {
    fn orient(self) -> AxisOrient {
        match self {
            Self::Left => AxisOrient::Left,
            Self::Right => AxisOrient::Right,
        }
    }
}

/// Horizontal text alignment relative to the label anchor point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextAnchor {
    /// Text starts at the anchor.
    Start,
    /// Text is centred on the anchor.
    #[default]
    Middle,
    /// Text ends at the anchor.
    End,
}

impl TextAnchor {
    /// The anchor for a label rotated by `angle` degrees.
    pub fn for_angle(angle: f64) -> Self {
        if angle < 0.0 {
            Self::End
        } else if angle > 0.0 {
            Self::Start
        } else {
            Self::Middle
        }
    }
}

/// Unrotated size of a measured tick label.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AxisLabelMetrics {
    /// Advance width in pixels.
    pub width: f64,
    /// Line height in pixels.
    pub height: f64,
}

impl AxisLabelMetrics {
    /// Measures `text` at `font_size`.
    pub fn measure(measurer: &dyn TextMeasurer, text: &str, font_size: f64) -> Self {
        let (width, height) = measurer.measure(text, TextStyle::new(font_size)).bounds();
        Self { width, height }
    }

    /// Vertical extent after rotating by `angle` degrees.
    pub fn rotated_height(&self, angle: f64) -> f64 {
        let theta = angle.to_radians();
        theta.sin().abs() * self.width + theta.cos().abs() * self.height
    }
}

/// The one rotation shared by every label on the bottom axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LabelRotation {
    /// Labels fit side by side.
    #[default]
    Horizontal,
    /// Some label is at least as wide as a tick slot: −45°.
    Diagonal,
    /// Some label is also at least as tall as a tick slot: −90°.
    Vertical,
}

impl LabelRotation {
    /// Decides the rotation for a set of measured labels.
    ///
    /// The result only depends on the set of labels, not their order.
    pub fn for_labels(metrics: &[AxisLabelMetrics], tick_width: f64) -> Self {
        if !metrics.iter().any(|m| m.width >= tick_width) {
            return Self::Horizontal;
        }
        if metrics.iter().any(|m| m.height >= tick_width) {
            Self::Vertical
        } else {
            Self::Diagonal
        }
    }

    /// The rotation in degrees.
    pub fn angle(self) -> f64 {
        match self {
            Self::Horizontal => 0.0,
            Self::Diagonal => -45.0,
            Self::Vertical => -90.0,
        }
    }
}

/// A placed tick.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisTick {
    /// Tick value in domain space (a point index on the bottom axis).
    pub value: f64,
    /// Pixel position along the axis.
    pub position: f64,
    /// Label text.
    pub label: String,
    /// Unrotated label size.
    pub metrics: AxisLabelMetrics,
    /// Horizontal label shift applied before rotation.
    pub dx: f64,
}

/// An axis title.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisTitle {
    /// Title text.
    pub text: String,
    /// Anchor point, centred on the text.
    pub pos: Point,
    /// Rotation in degrees.
    pub angle: f64,
}

/// Tick and style configuration shared by both axes.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisConfig {
    /// Desired number of ticks.
    pub tick_count: usize,
    /// Tick line length.
    pub tick_size: f64,
    /// Gap between the tick line and its label.
    pub tick_padding: f64,
    /// Styling.
    pub style: AxisStyle,
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self {
            tick_count: 10,
            tick_size: 2.0,
            tick_padding: 3.0,
            style: AxisStyle::default(),
        }
    }
}

impl AxisConfig {
    /// Sets the desired tick count.
    pub fn with_tick_count(mut self, tick_count: usize) -> Self {
        self.tick_count = tick_count;
        self
    }

    /// Sets the tick line length.
    pub fn with_tick_size(mut self, tick_size: f64) -> Self {
        self.tick_size = tick_size;
        self
    }

    /// Sets the gap between tick line and label.
    pub fn with_tick_padding(mut self, tick_padding: f64) -> Self {
        self.tick_padding = tick_padding;
        self
    }

    /// Sets the axis styling.
    pub fn with_style(mut self, style: AxisStyle) -> Self {
        self.style = style;
        self
    }

    /// Full height of a tick whose label is rotated by `angle` degrees.
    fn tick_height(&self, metrics: AxisLabelMetrics, angle: f64) -> f64 {
        self.tick_size.abs() + self.tick_padding.max(0.0) + metrics.rotated_height(angle)
    }
}

/// A laid out axis, ready for drawing.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisSpec {
    /// Placement relative to the plot.
    pub orient: AxisOrient,
    /// The scale the ticks were placed with.
    pub scale: ScaleLinear,
    /// Cross-axis offset: `y` of a bottom axis, `x` of a vertical one.
    pub position: f64,
    /// Placed ticks.
    pub ticks: Vec<AxisTick>,
    /// Tick line length.
    pub tick_size: f64,
    /// Gap between tick line and label.
    pub tick_padding: f64,
    /// Label rotation in degrees.
    pub label_angle: f64,
    /// Label alignment.
    pub label_anchor: TextAnchor,
    /// Optional title.
    pub title: Option<AxisTitle>,
    /// Styling.
    pub style: AxisStyle,
}

/// The bottom axis plus the margin it reserved.
#[derive(Clone, Debug, PartialEq)]
pub struct XAxisLayout {
    /// The laid out axis.
    pub axis: AxisSpec,
    /// Chosen label rotation.
    pub rotation: LabelRotation,
    /// The bottom margin the rotated labels need.
    pub bottom_margin: f64,
}

/// Picks which point indices carry a tick.
///
/// The step is the smallest 1/2/5 × 10ⁿ integer at least `count / desired`.
pub fn x_tick_indices(count: usize, desired: usize) -> Vec<usize> {
    if count == 0 {
        return Vec::new();
    }
    let raw = count as f64 / desired.max(1) as f64;
    let step = nice_step_at_least(raw).max(1.0);
    #[allow(
        clippy::cast_possible_truncation,
        reason = "a step of at least one that never exceeds 10 × count"
    )]
    let step = step.round() as usize;
    (0..count).step_by(step.max(1)).collect()
}

fn nice_step_at_least(raw: f64) -> f64 {
    if !raw.is_finite() || raw <= 0.0 {
        return 1.0;
    }
    let base = 10_f64.powf(raw.log10().floor());
    for m in [1.0, 2.0, 5.0] {
        if m * base >= raw * (1.0 - 1.0e-12) {
            return m * base;
        }
    }
    10.0 * base
}

/// Lays out the bottom axis and computes the bottom margin.
///
/// `labels[i]` is the label of point `i`. `margins.bottom` is ignored; the
/// result reports the margin the labels need, with `label_gap` added below the
/// tallest tick.
pub fn layout_x_axis(
    labels: &[String],
    x: &ScaleLinear,
    view: Size,
    margins: &Margins,
    config: &AxisConfig,
    label_gap: f64,
    title: Option<&str>,
    measurer: &dyn TextMeasurer,
) -> XAxisLayout {
    let font_size = config.style.label_font_size;
    let indices = x_tick_indices(labels.len(), config.tick_count);
    let measured: Vec<(usize, AxisLabelMetrics)> = indices
        .iter()
        .map(|&i| {
            (
                i,
                AxisLabelMetrics::measure(measurer, &labels[i], font_size),
            )
        })
        .collect();

    let (x0, x1) = margins.x_range(view.width);
    let plot_width = (x1 - x0).max(0.0);
    let tick_width = if measured.len() > 1 {
        plot_width / (measured.len() - 1) as f64
    } else {
        plot_width
    };

    let metrics: Vec<AxisLabelMetrics> = measured.iter().map(|(_, m)| *m).collect();
    let rotation = LabelRotation::for_labels(&metrics, tick_width);
    let angle = rotation.angle();

    let mut max_tick_height = 0.0_f64;
    let ticks = measured
        .into_iter()
        .map(|(i, m)| {
            max_tick_height = max_tick_height.max(config.tick_height(m, angle));
            let value = i as f64;
            AxisTick {
                value,
                position: x.map(value),
                label: labels[i].clone(),
                metrics: m,
                dx: m.height / 2.0 * (angle / 90.0),
            }
        })
        .collect();

    let bottom_margin = max_tick_height + label_gap;
    log::debug!(
        "x axis: tick width {tick_width:.1}, label angle {angle}, bottom margin {bottom_margin:.1}"
    );

    let title = title.filter(|t| !t.is_empty()).map(|t| AxisTitle {
        text: String::from(t),
        pos: Point::new(view.width / 2.0, view.height - 10.0),
        angle: 0.0,
    });

    XAxisLayout {
        axis: AxisSpec {
            orient: AxisOrient::Bottom,
            scale: *x,
            position: view.height - bottom_margin,
            ticks,
            tick_size: config.tick_size,
            tick_padding: config.tick_padding,
            label_angle: angle,
            label_anchor: TextAnchor::for_angle(angle),
            title,
            style: config.style.clone(),
        },
        rotation,
        bottom_margin,
    }
}

/// Lays out the vertical axis in its fixed margin.
///
/// Tick values come from the scale's nice ticks and are labelled with the raw
/// value, trimmed to the tick step's precision.
pub fn layout_y_axis(
    y: &ScaleLinear,
    view: Size,
    margins: &Margins,
    side: YAxisSide,
    config: &AxisConfig,
    title: Option<&str>,
    measurer: &dyn TextMeasurer,
) -> AxisSpec {
    let values = y.ticks(config.tick_count);
    let step = tick_step(&values);
    let font_size = config.style.label_font_size;
    let ticks = values
        .into_iter()
        .map(|v| {
            let label = format_tick_with_step(v, step);
            let metrics = AxisLabelMetrics::measure(measurer, &label, font_size);
            AxisTick {
                value: v,
                position: y.map(v),
                label,
                metrics,
                dx: 0.0,
            }
        })
        .collect();

    let position = match side {
        YAxisSide::Left => margins.left,
        YAxisSide::Right => view.width - margins.right,
    };

    // Rotated −90° and pushed one em in from the left edge.
    let title = title.filter(|t| !t.is_empty()).map(|t| AxisTitle {
        text: String::from(t),
        pos: Point::new(config.style.title_font_size, view.height / 2.0),
        angle: -90.0,
    });

    AxisSpec {
        orient: side.orient(),
        scale: *y,
        position,
        ticks,
        tick_size: config.tick_size,
        tick_padding: config.tick_padding,
        label_angle: 0.0,
        label_anchor: match side {
            YAxisSide::Left => TextAnchor::End,
            YAxisSide::Right => TextAnchor::Start,
        },
        title,
        style: config.style.clone(),
    }
}

fn tick_step(ticks: &[f64]) -> f64 {
    let step = ticks
        .windows(2)
        .map(|w| (w[1] - w[0]).abs())
        .fold(f64::INFINITY, f64::min);
    if step.is_finite() { step } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use alloc::format;
    use alloc::vec;

    use super::*;
    use crate::HeuristicTextMeasurer;
    use crate::scale::build_x_scale;

    fn m(width: f64, height: f64) -> AxisLabelMetrics {
        AxisLabelMetrics { width, height }
    }

    fn labels(n: usize, prefix: &str) -> Vec<String> {
        (0..n).map(|i| format!("{prefix}{i}")).collect()
    }

    #[test]
    fn rotation_escalates_monotonically() {
        assert_eq!(
            LabelRotation::for_labels(&[m(5.0, 10.0), m(8.0, 10.0)], 20.0),
            LabelRotation::Horizontal
        );
        assert_eq!(
            LabelRotation::for_labels(&[m(5.0, 10.0), m(25.0, 10.0)], 20.0),
            LabelRotation::Diagonal
        );
        assert_eq!(
            LabelRotation::for_labels(&[m(25.0, 10.0), m(5.0, 22.0)], 20.0),
            LabelRotation::Vertical
        );
        // Tall labels alone do not rotate.
        assert_eq!(
            LabelRotation::for_labels(&[m(5.0, 30.0)], 20.0),
            LabelRotation::Horizontal
        );
        assert!(LabelRotation::Horizontal < LabelRotation::Diagonal);
        assert!(LabelRotation::Diagonal < LabelRotation::Vertical);
    }

    #[test]
    fn rotation_ignores_label_order() {
        let a = [m(5.0, 22.0), m(25.0, 10.0), m(1.0, 1.0)];
        let mut b = a;
        b.reverse();
        assert_eq!(
            LabelRotation::for_labels(&a, 20.0),
            LabelRotation::for_labels(&b, 20.0)
        );
    }

    #[test]
    fn anchor_follows_angle_sign() {
        assert_eq!(TextAnchor::for_angle(-45.0), TextAnchor::End);
        assert_eq!(TextAnchor::for_angle(30.0), TextAnchor::Start);
        assert_eq!(TextAnchor::for_angle(0.0), TextAnchor::Middle);
    }

    #[test]
    fn tick_indices_use_integer_nice_steps() {
        assert_eq!(x_tick_indices(3, 10), vec![0, 1, 2]);
        assert_eq!(x_tick_indices(0, 10), Vec::<usize>::new());
        let many = x_tick_indices(45, 10);
        assert_eq!(many[1] - many[0], 5);
        assert_eq!(many.len(), 9);
        assert_eq!(x_tick_indices(12, 10)[1], 2);
    }

    #[test]
    fn short_labels_stay_horizontal() {
        let view = Size::new(950.0, 600.0);
        let margins = Margins::default();
        let x = build_x_scale(3, view.width, &margins);
        let out = layout_x_axis(
            &labels(3, ""),
            &x,
            view,
            &margins,
            &AxisConfig::default(),
            25.0,
            None,
            &HeuristicTextMeasurer,
        );
        assert_eq!(out.rotation, LabelRotation::Horizontal);
        assert_eq!(out.axis.label_anchor, TextAnchor::Middle);
        // 2 (tick) + 3 (padding) + 10 (line height) + 25 (gap).
        assert!((out.bottom_margin - 40.0).abs() < 1e-9);
        assert!((out.axis.position - 560.0).abs() < 1e-9);
        assert_eq!(out.axis.ticks.len(), 3);
        assert!((out.axis.ticks[2].position - x.map(2.0)).abs() < 1e-9);
        assert!(out.axis.ticks.iter().all(|t| t.dx == 0.0));
    }

    #[test]
    fn crowded_labels_rotate_and_grow_the_margin() {
        let view = Size::new(300.0, 400.0);
        let margins = Margins::default();
        let names = labels(20, "2024-01-");
        let x = build_x_scale(names.len(), view.width, &margins);
        let config = AxisConfig::default();
        let out = layout_x_axis(
            &names,
            &x,
            view,
            &margins,
            &config,
            25.0,
            Some("Day"),
            &HeuristicTextMeasurer,
        );
        assert_ne!(out.rotation, LabelRotation::Horizontal);
        assert_eq!(out.axis.label_anchor, TextAnchor::End);
        assert!(out.bottom_margin > 40.0);
        let t = &out.axis.ticks[0];
        assert!((t.dx - t.metrics.height / 2.0 * (out.axis.label_angle / 90.0)).abs() < 1e-9);
        let title = out.axis.title.expect("x title");
        assert_eq!(title.pos, Point::new(150.0, 390.0));
    }

    #[test]
    fn empty_axis_only_reserves_the_gap() {
        let view = Size::new(950.0, 600.0);
        let margins = Margins::default();
        let x = build_x_scale(0, view.width, &margins);
        let out = layout_x_axis(
            &[],
            &x,
            view,
            &margins,
            &AxisConfig::default(),
            25.0,
            None,
            &HeuristicTextMeasurer,
        );
        assert!(out.axis.ticks.is_empty());
        assert_eq!(out.bottom_margin, 25.0);
    }

    #[test]
    fn y_axis_sits_in_the_chosen_margin() {
        let view = Size::new(950.0, 600.0);
        let margins = Margins::default();
        let y = ScaleLinear::new((70.0, 130.0), (560.0, 50.0));
        let config = AxisConfig::default();
        let left = layout_y_axis(
            &y,
            view,
            &margins,
            YAxisSide::Left,
            &config,
            Some("Value"),
            &HeuristicTextMeasurer,
        );
        assert_eq!(left.orient, AxisOrient::Left);
        assert_eq!(left.position, 75.0);
        assert_eq!(left.ticks[0].label, "70");
        assert!(left.ticks.iter().all(|t| t.value >= 70.0 && t.value <= 130.0));
        let title = left.title.expect("y title");
        assert_eq!(title.angle, -90.0);
        assert_eq!(title.pos.y, 300.0);

        let right = layout_y_axis(
            &y,
            view,
            &margins,
            YAxisSide::Right,
            &config,
            None,
            &HeuristicTextMeasurer,
        );
        assert_eq!(right.position, 925.0);
        assert!(right.title.is_none());
    }

    #[test]
    fn rotated_extent_matches_trig() {
        let metrics = m(40.0, 10.0);
        assert!((metrics.rotated_height(0.0) - 10.0).abs() < 1e-9);
        assert!((metrics.rotated_height(-90.0) - 40.0).abs() < 1e-9);
        let diag = metrics.rotated_height(-45.0);
        assert!((diag - 50.0 * core::f64::consts::FRAC_1_SQRT_2).abs() < 1e-9);
    }
}
