// Copyright 2025 the Zonechart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Control chart geometry.
//!
//! A control chart is an index-ordered line of measured values overlaid with
//! threshold *zones*: coloured bands and level lines that flag out-of-control
//! points. This crate turns a host query result and its display settings into
//! a [`RenderDescriptor`], an immutable description of every shape to draw.
//!
//! The pipeline:
//! - **Zones** are decoded from editor settings or from the legacy string
//!   stored with saved queries ([`ZoneCodec`]).
//! - **Scales** map point indices and values to pixels ([`ScaleLinear`]).
//! - **Axes** measure their labels through a [`TextMeasurer`]; the bottom axis
//!   picks one shared label rotation and reserves the margin it needs.
//! - **Overlays** place zone bands and threshold lines.
//!
//! Drawing is out of scope: backends consume the descriptor.
//!
//! ```
//! use zonechart::{ChartKind, DataTable, HeuristicTextMeasurer, Settings, Size};
//!
//! let table = DataTable::from_json(
//!     r#"{"cols": [{"name": "x"}, {"name": "y"}], "rows": [[1, 100], [2, 125], [3, 75]]}"#,
//! )
//! .unwrap();
//! let chart = ChartKind::default()
//!     .render(&table, &Settings::default(), Size::new(950.0, 600.0), &HeuristicTextMeasurer)
//!     .unwrap();
//! assert_eq!(chart.lines.len(), 2);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod axis;
mod chart;
mod codec;
mod descriptor;
mod error;
#[cfg(not(feature = "std"))]
mod float;
mod format;
mod layout;
mod overlay;
mod palette;
mod scale;
mod settings;
mod table;
mod visualization;
mod zone;

pub use axis::{
    AxisConfig, AxisLabelMetrics, AxisOrient, AxisSpec, AxisStyle, AxisTick, AxisTitle,
    LabelRotation, StrokeStyle, TextAnchor, XAxisLayout, YAxisSide, layout_x_axis, layout_y_axis,
    x_tick_indices,
};
pub use chart::{ChartAssembler, ControlChartSpec};
pub use codec::{DecodePolicy, ZoneCodec, ZoneDecode, decode, encode};
pub use descriptor::{DataPoint, PathSegment, RenderDescriptor, SeriesStyle};
pub use error::{ConfigurationError, DecodeError, Diagnostic, GeometryError};
pub use format::format_number;
pub use layout::{Margins, Size};
pub use overlay::{
    DEFAULT_ZONE_OPACITY, ZoneLine, ZoneRect, ZoneRule, build_zone_lines, build_zone_rects,
};
pub use palette::{palette, zone_color_at_opacity, zone_presets};
pub use scale::{
    DEFAULT_BUFFER_PCT, Extent, ScaleLinear, build_x_scale, build_y_scale, value_extent,
};
pub use settings::{DEFAULT_DIMENSION, DEFAULT_METRIC, Settings, ZoneSetting};
pub use table::{Column, ColumnFrame, DataTable, Scalar};
pub use visualization::{ChartKind, GridSize, SeriesColumns};
pub use zone::{Zone, ZoneCompleteness, ZoneFieldError, color_to_hex};
pub use zonechart_text::{
    AdvanceTableMeasurer, FontWeight, HeuristicTextMeasurer, TextMeasurer, TextMetrics, TextStyle,
};
