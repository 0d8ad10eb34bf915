// Copyright 2025 the Zonechart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Zone model.
//!
//! A zone is either a coloured band between two values, a single threshold
//! line, or both. Zones come from the settings editor or from stored queries,
//! where numeric fields are frequently strings (`"20"`) or empty (`""`) while
//! the user is still typing, so deserialization is lenient about the shape of
//! each number and strict about its content.

extern crate alloc;

use alloc::format;
use alloc::string::String;

use peniko::Color;
use peniko::color::{Srgb, parse_color};
use serde::Deserialize;
use thiserror::Error;

use crate::format::format_number;

/// How much of a zone must be filled in before it is drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ZoneCompleteness {
    /// A level, or both range bounds, is enough.
    #[default]
    LevelOrRange,
    /// Both range bounds and a level are required.
    LevelAndRange,
}

/// A threshold band and/or level line.
///
/// `range` is stored as `[upper, lower]` when it comes from the legacy
/// encoding, so callers must not assume `range[0] <= range[1]`.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(try_from = "RawZone")]
pub struct Zone {
    /// Band and line colour.
    pub color: Color,
    /// Threshold line value.
    pub level: Option<f64>,
    /// Band bounds.
    pub range: [Option<f64>; 2],
}

impl Zone {
    /// Creates an empty zone with the given colour.
    pub fn new(color: Color) -> Self {
        Self {
            color,
            level: None,
            range: [None, None],
        }
    }

    /// Sets the threshold line value.
    pub fn with_level(mut self, level: f64) -> Self {
        self.level = Some(level);
        self
    }

    /// Sets the band bounds, in stored order.
    pub fn with_range(mut self, first: f64, second: f64) -> Self {
        self.range = [Some(first), Some(second)];
        self
    }

    /// Returns the level if it is present and finite.
    pub fn level(&self) -> Option<f64> {
        self.level.filter(|v| v.is_finite())
    }

    /// Returns both range bounds, in stored order, if both are present and finite.
    pub fn full_range(&self) -> Option<(f64, f64)> {
        match self.range {
            [Some(a), Some(b)] if a.is_finite() && b.is_finite() => Some((a, b)),
            _ => None,
        }
    }

    /// Whether the zone is filled in enough to draw under `policy`.
    pub fn is_complete(&self, policy: ZoneCompleteness) -> bool {
        let level = self.level().is_some();
        let range = self.full_range().is_some();
        match policy {
            ZoneCompleteness::LevelOrRange => level || range,
            ZoneCompleteness::LevelAndRange => level && range,
        }
    }
}

/// A zone field that could not be interpreted.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ZoneFieldError {
    /// The colour does not parse as a CSS colour.
    #[error("unrecognized color `{0}`")]
    Color(String),
    /// A numeric field holds text that is not a finite number.
    #[error("`{0}` is not a finite number")]
    NotANumber(String),
}

/// A numeric zone field as stored: a JSON number or a string.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawBound {
    Number(f64),
    Text(String),
}

pub(crate) fn parse_bound(raw: Option<RawBound>) -> Result<Option<f64>, ZoneFieldError> {
    match raw {
        None => Ok(None),
        Some(RawBound::Number(v)) => Ok(Some(v)),
        Some(RawBound::Text(s)) => {
            let t = s.trim();
            if t.is_empty() {
                return Ok(None);
            }
            match t.parse::<f64>() {
                Ok(v) if v.is_finite() => Ok(Some(v)),
                _ => Err(ZoneFieldError::NotANumber(s)),
            }
        }
    }
}

pub(crate) fn parse_zone_color(text: &str) -> Result<Color, ZoneFieldError> {
    parse_color(text.trim())
        .map(|c| c.to_alpha_color::<Srgb>())
        .map_err(|_| ZoneFieldError::Color(String::from(text)))
}

/// Formats a colour as `#rrggbb`, dropping alpha.
pub fn color_to_hex(color: Color) -> String {
    let rgba = color.to_rgba8();
    format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b)
}

/// Formats an optional zone value the way the editor stores it.
pub(crate) fn format_bound(v: Option<f64>) -> String {
    v.map(format_number).unwrap_or_default()
}

/// The editor's zone shape: `{color, level, range: [upper, lower]}`.
#[derive(Debug, Deserialize)]
pub(crate) struct RawZone {
    color: String,
    #[serde(default)]
    level: Option<RawBound>,
    #[serde(default)]
    range: Option<[Option<RawBound>; 2]>,
}

impl TryFrom<RawZone> for Zone {
    type Error = ZoneFieldError;

    fn try_from(raw: RawZone) -> Result<Self, Self::Error> {
        let color = parse_zone_color(&raw.color)?;
        let level = parse_bound(raw.level)?;
        let range = match raw.range {
            Some([a, b]) => [parse_bound(a)?, parse_bound(b)?],
            None => [None, None],
        };
        Ok(Self {
            color,
            level,
            range,
        })
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    #[test]
    fn completeness_policies_differ_on_partial_zones() {
        let red = Color::from_rgb8(207, 57, 53);
        let level_only = Zone::new(red).with_level(150.0);
        let range_only = Zone::new(red).with_range(150.0, 130.0);
        let both = Zone::new(red).with_range(150.0, 130.0).with_level(130.0);
        let empty = Zone::new(red);

        assert!(level_only.is_complete(ZoneCompleteness::LevelOrRange));
        assert!(range_only.is_complete(ZoneCompleteness::LevelOrRange));
        assert!(!empty.is_complete(ZoneCompleteness::LevelOrRange));

        assert!(!level_only.is_complete(ZoneCompleteness::LevelAndRange));
        assert!(!range_only.is_complete(ZoneCompleteness::LevelAndRange));
        assert!(both.is_complete(ZoneCompleteness::LevelAndRange));
    }

    #[test]
    fn half_range_is_not_a_range() {
        let mut z = Zone::new(Color::from_rgb8(0, 0, 0));
        z.range = [Some(10.0), None];
        assert_eq!(z.full_range(), None);
        assert!(!z.is_complete(ZoneCompleteness::LevelOrRange));
    }

    #[test]
    fn editor_zones_accept_strings_numbers_and_blanks() {
        let zones: Vec<Zone> = serde_json::from_str(
            r##"[
                {"color": "#7bb31f", "level": 90, "range": [110, 70]},
                {"color": "#fde455", "level": "", "range": ["130", "110"]},
                {"color": "#ff0400", "level": 150},
                {"color": "#CF3935", "range": ["", ""]}
            ]"##,
        )
        .expect("valid zones");
        assert_eq!(zones.len(), 4);
        assert_eq!(zones[0].level, Some(90.0));
        assert_eq!(zones[0].range, [Some(110.0), Some(70.0)]);
        assert_eq!(zones[1].level, None);
        assert_eq!(zones[1].range, [Some(130.0), Some(110.0)]);
        assert_eq!(zones[2].range, [None, None]);
        assert!(!zones[3].is_complete(ZoneCompleteness::LevelOrRange));
        assert_eq!(color_to_hex(zones[3].color), "#cf3935");
    }

    #[test]
    fn non_numeric_text_is_rejected() {
        let err = serde_json::from_str::<Zone>(r##"{"color": "#000000", "level": "high"}"##);
        assert!(err.is_err());
        let err = serde_json::from_str::<Zone>(r#"{"color": "not-a-color", "level": 1}"#);
        assert!(err.is_err());
    }
}
