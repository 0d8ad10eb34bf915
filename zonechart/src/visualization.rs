// Copyright 2025 the Zonechart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart kinds offered to the host.
//!
//! The host asks each kind whether it makes sense for a result, whether the
//! current settings can render, and finally for the geometry. The set of kinds
//! is closed; each variant carries its own configuration.

use crate::TextMeasurer;
use crate::chart::{ChartAssembler, ControlChartSpec};
use crate::descriptor::RenderDescriptor;
use crate::error::ConfigurationError;
use crate::layout::Size;
use crate::settings::Settings;
use crate::table::{Column, DataTable};

/// Minimum dashboard footprint, in grid cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridSize {
    /// Columns.
    pub width: u32,
    /// Rows.
    pub height: u32,
}

/// A chart kind and its configuration.
#[derive(Clone, Debug, PartialEq)]
pub enum ChartKind {
    /// Index-ordered line with threshold zones.
    Control(ControlChartSpec),
}

impl Default for ChartKind {
    fn default() -> Self {
        Self::Control(ControlChartSpec::default())
    }
}

impl ChartKind {
    /// Stable identifier stored in saved questions.
    pub fn identifier(&self) -> &'static str {
        match self {
            Self::Control(_) => "control",
        }
    }

    /// Name shown in the chart picker.
    pub fn ui_name(&self) -> &'static str {
        match self {
            Self::Control(_) => "Control",
        }
    }

    /// Smallest dashboard card that still reads.
    pub fn min_size(&self) -> GridSize {
        match self {
            Self::Control(_) => GridSize {
                width: 4,
                height: 3,
            },
        }
    }

    /// Whether the result has the shape this chart needs: more than one row,
    /// at least two columns and a numeric column to plot.
    pub fn is_sensible(&self, table: &DataTable) -> bool {
        match self {
            Self::Control(_) => {
                table.row_count() > 1
                    && table.cols.len() >= 2
                    && table.cols.iter().any(Column::is_numeric)
            }
        }
    }

    /// Checks that the configured columns exist.
    pub fn check_renderable(
        &self,
        table: &DataTable,
        settings: &Settings,
    ) -> Result<(), ConfigurationError> {
        match self {
            Self::Control(_) => {
                let dimension = settings.dimension();
                if table.column(dimension).is_none() {
                    return Err(ConfigurationError::MissingDimension(dimension.into()));
                }
                let metric = settings.metric();
                if table.column(metric).is_none() {
                    return Err(ConfigurationError::MissingMetric(metric.into()));
                }
                Ok(())
            }
        }
    }

    /// Builds the geometry for one render.
    pub fn render(
        &self,
        table: &DataTable,
        settings: &Settings,
        view: Size,
        measurer: &dyn TextMeasurer,
    ) -> Result<RenderDescriptor, ConfigurationError> {
        match self {
            Self::Control(spec) => {
                ChartAssembler::new(spec, measurer).assemble(table, settings, view)
            }
        }
    }

    /// Whether two results can share one chart.
    ///
    /// Both need a dimension and a metric, every metric must be numeric, and
    /// the primary dimensions must agree on being dates (and, unless both are
    /// dates, on being numeric).
    pub fn series_are_compatible(&self, a: &SeriesColumns<'_>, b: &SeriesColumns<'_>) -> bool {
        match self {
            Self::Control(_) => {
                let (Some(da), Some(db)) = (a.dimensions.first(), b.dimensions.first()) else {
                    return false;
                };
                if a.metrics.is_empty() || b.metrics.is_empty() {
                    return false;
                }
                if !a.metrics.iter().chain(b.metrics).all(|c| c.is_numeric()) {
                    return false;
                }
                if da.is_date() != db.is_date() {
                    return false;
                }
                da.is_date() || da.is_numeric() == db.is_numeric()
            }
        }
    }
}

/// The dimension and metric columns of one result.
#[derive(Clone, Copy, Debug)]
pub struct SeriesColumns<'a> {
    /// Dimension columns, primary first.
    pub dimensions: &'a [&'a Column],
    /// Metric columns.
    pub metrics: &'a [&'a Column],
}

impl<'a> SeriesColumns<'a> {
    /// Creates a view over the given columns.
    pub fn new(dimensions: &'a [&'a Column], metrics: &'a [&'a Column]) -> Self {
        Self {
            dimensions,
            metrics,
        }
    }
}
