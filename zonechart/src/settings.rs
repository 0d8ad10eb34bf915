// Copyright 2025 the Zonechart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host display settings.
//!
//! The host keeps settings in a flat dictionary with dotted keys
//! (`graph.dimensions`, `control.zones`, ...). [`Settings`] is the typed view
//! of the keys the control chart reads; everything else is ignored.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use serde::Deserialize;
use serde_json::Value;

use crate::codec::{ZoneCodec, ZoneDecode};
use crate::zone::Zone;

/// Column used for labels when no dimension is configured.
pub const DEFAULT_DIMENSION: &str = "x";
/// Column used for values when no metric is configured.
pub const DEFAULT_METRIC: &str = "y";

/// A zone-valued setting.
///
/// Depending on where it came from, a zone setting holds editor zones, names
/// of a column that carries per-row zones, or the legacy zone string.
///
/// A list the editor is still filling in may hold records that are not zones
/// yet; it lands in [`ZoneSetting::Records`] so the rest of the settings still
/// load.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ZoneSetting {
    /// Zones from the settings editor.
    Zones(Vec<Zone>),
    /// Column names; the first one carries per-row zone strings.
    Columns(Vec<Option<String>>),
    /// Editor records, at least one of which is not a valid zone.
    Records(Vec<Value>),
    /// The legacy encoded string.
    Legacy(String),
}

impl ZoneSetting {
    /// Resolves the setting to zones, decoding the legacy string if needed.
    ///
    /// Column lists hold no zones and resolve to `None`.
    pub fn zones(&self, codec: &ZoneCodec) -> Option<ZoneDecode> {
        match self {
            Self::Zones(zones) => Some(ZoneDecode {
                zones: zones.clone(),
                errors: Vec::new(),
            }),
            Self::Records(records) => Some(codec.decode_records(records)),
            Self::Legacy(s) => Some(codec.decode_with_diagnostics(s)),
            Self::Columns(_) => None,
        }
    }
}

/// The control chart's view of the host settings.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Dimension (label) columns; only the first is used.
    #[serde(rename = "graph.dimensions")]
    pub dimensions: Vec<Option<String>>,
    /// Metric (value) columns; only the first is used.
    #[serde(rename = "graph.metrics")]
    pub metrics: Vec<Option<String>>,
    /// Zone column names, or zones.
    #[serde(rename = "graph.zones")]
    pub graph_zones: Option<ZoneSetting>,
    /// Chart-level zones.
    #[serde(rename = "control.zones")]
    pub control_zones: Option<ZoneSetting>,
    /// Whether the x axis title is shown.
    #[serde(rename = "graph.x_axis.labels_enabled")]
    pub x_labels_enabled: bool,
    /// The x axis title.
    #[serde(rename = "graph.x_axis.title_text")]
    pub x_title: Option<String>,
    /// Whether the y axis title is shown.
    #[serde(rename = "graph.y_axis.labels_enabled")]
    pub y_labels_enabled: bool,
    /// The y axis title.
    #[serde(rename = "graph.y_axis.title_text")]
    pub y_title: Option<String>,
}

impl Settings {
    /// Parses the host's settings dictionary.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Sets the dimension column.
    pub fn with_dimension(mut self, name: impl Into<String>) -> Self {
        self.dimensions = alloc::vec![Some(name.into())];
        self
    }

    /// Sets the metric column.
    pub fn with_metric(mut self, name: impl Into<String>) -> Self {
        self.metrics = alloc::vec![Some(name.into())];
        self
    }

    /// Sets the chart-level zones.
    pub fn with_zones(mut self, zones: Vec<Zone>) -> Self {
        self.control_zones = Some(ZoneSetting::Zones(zones));
        self
    }

    /// Names the column carrying per-row zone strings.
    pub fn with_zone_column(mut self, name: impl Into<String>) -> Self {
        self.graph_zones = Some(ZoneSetting::Columns(alloc::vec![Some(name.into())]));
        self
    }

    /// Enables the x axis title.
    pub fn with_x_title(mut self, title: impl Into<String>) -> Self {
        self.x_labels_enabled = true;
        self.x_title = Some(title.into());
        self
    }

    /// Enables the y axis title.
    pub fn with_y_title(mut self, title: impl Into<String>) -> Self {
        self.y_labels_enabled = true;
        self.y_title = Some(title.into());
        self
    }

    /// The configured dimension column, if any.
    pub fn configured_dimension(&self) -> Option<&str> {
        first_name(&self.dimensions)
    }

    /// The configured metric column, if any.
    pub fn configured_metric(&self) -> Option<&str> {
        first_name(&self.metrics)
    }

    /// The dimension column, falling back to `x`.
    pub fn dimension(&self) -> &str {
        self.configured_dimension().unwrap_or(DEFAULT_DIMENSION)
    }

    /// The metric column, falling back to `y`.
    pub fn metric(&self) -> &str {
        self.configured_metric().unwrap_or(DEFAULT_METRIC)
    }

    /// The column carrying per-row zone strings, if configured.
    pub fn zone_column(&self) -> Option<&str> {
        match &self.graph_zones {
            Some(ZoneSetting::Columns(names)) => first_name(names),
            _ => None,
        }
    }

    /// Chart-level zones: `control.zones`, else `graph.zones` when it holds zones.
    pub fn chart_zones(&self, codec: &ZoneCodec) -> ZoneDecode {
        self.control_zones
            .as_ref()
            .and_then(|s| s.zones(codec))
            .or_else(|| self.graph_zones.as_ref().and_then(|s| s.zones(codec)))
            .unwrap_or_default()
    }

    /// The x axis title, when enabled.
    pub fn x_axis_title(&self) -> Option<&str> {
        self.x_labels_enabled
            .then_some(self.x_title.as_deref())
            .flatten()
    }

    /// The y axis title, when enabled.
    pub fn y_axis_title(&self) -> Option<&str> {
        self.y_labels_enabled
            .then_some(self.y_title.as_deref())
            .flatten()
    }
}

fn first_name(names: &[Option<String>]) -> Option<&str> {
    names
        .first()
        .and_then(Option::as_deref)
        .filter(|n| !n.is_empty())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::zone::color_to_hex;

    #[test]
    fn dotted_keys_deserialize() {
        let settings: Settings = serde_json::from_value(json!({
            "graph.dimensions": ["day"],
            "graph.metrics": ["count"],
            "graph.zones": ["zones"],
            "graph.x_axis.labels_enabled": true,
            "graph.x_axis.title_text": "Day",
            "graph.y_axis.labels_enabled": false,
            "graph.y_axis.title_text": "Count",
            "card.title": "ignored",
        }))
        .expect("valid settings");
        assert_eq!(settings.dimension(), "day");
        assert_eq!(settings.metric(), "count");
        assert_eq!(settings.zone_column(), Some("zones"));
        assert_eq!(settings.x_axis_title(), Some("Day"));
        assert_eq!(settings.y_axis_title(), None);
    }

    #[test]
    fn missing_names_fall_back() {
        let settings = Settings::from_json(r#"{"graph.dimensions": [null], "graph.metrics": [""]}"#)
            .expect("valid settings");
        assert_eq!(settings.dimension(), DEFAULT_DIMENSION);
        assert_eq!(settings.metric(), DEFAULT_METRIC);
        assert_eq!(settings.configured_metric(), None);
        assert_eq!(Settings::default().zone_column(), None);
    }

    #[test]
    fn zone_settings_take_every_shape() {
        let editor: Settings = serde_json::from_value(json!({
            "control.zones": [{"color": "#7bb31f", "level": "", "range": ["110", "70"]}],
        }))
        .expect("editor zones");
        let zones = editor.chart_zones(&ZoneCodec::default()).zones;
        assert_eq!(zones.len(), 1);
        assert_eq!(color_to_hex(zones[0].color), "#7bb31f");

        let legacy: Settings = serde_json::from_value(json!({
            "control.zones": r##"{"{\"color\": \"#cf3935\", \"line\": \"0\", \"upper\": \"20\", \"lower\": \"-20\"}"}"##,
        }))
        .expect("legacy zones");
        assert_eq!(legacy.chart_zones(&ZoneCodec::default()).zones[0].level, Some(0.0));

        let graph: Settings = serde_json::from_value(json!({
            "graph.zones": [{"color": "red", "level": 3}],
        }))
        .expect("graph zones");
        assert_eq!(graph.chart_zones(&ZoneCodec::default()).zones.len(), 1);
        assert_eq!(graph.zone_column(), None);
    }

    #[test]
    fn unfinished_editor_zone_keeps_the_rest_of_the_settings() {
        let settings = Settings::from_json(
            r##"{
                "graph.dimensions": ["day"],
                "graph.metrics": ["count"],
                "control.zones": [
                    {"color": "#cf3935", "level": 10},
                    {"color": "#7bb31f", "level": "1-"},
                    {"color": null, "level": 2}
                ]
            }"##,
        )
        .expect("settings load despite a bad zone");
        assert_eq!(settings.dimension(), "day");
        assert_eq!(settings.metric(), "count");

        let decoded = settings.chart_zones(&ZoneCodec::default());
        assert_eq!(decoded.zones.len(), 1);
        assert_eq!(decoded.zones[0].level, Some(10.0));
        assert_eq!(decoded.errors.len(), 2);
    }

    #[test]
    fn null_zone_column_is_no_zone_column() {
        let settings = Settings::from_json(r#"{"graph.zones": [null]}"#).expect("valid settings");
        assert_eq!(settings.graph_zones, Some(ZoneSetting::Columns(alloc::vec![None])));
        assert_eq!(settings.zone_column(), None);
        assert_eq!(settings.chart_zones(&ZoneCodec::default()), ZoneDecode::default());
    }
}
