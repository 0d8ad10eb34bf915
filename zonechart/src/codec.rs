// Copyright 2025 the Zonechart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Legacy zone string codec.
//!
//! Stored queries carry zones as a brace-wrapped list of quoted, escaped JSON
//! objects:
//!
//! ```text
//! {"{\"color\": \"#cf3935\", \"line\": \"0\", \"upper\": \"20\", \"lower\": \"-20\"}","{...}"}
//! ```
//!
//! Each object is a `{color, line, upper, lower}` record. The grammar is kept
//! exactly as stored so existing queries keep reading back; only fragment
//! tolerance is configurable, via [`DecodePolicy`].

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use serde::Deserialize;
use serde_json::Value;

use crate::error::DecodeError;
use crate::zone::{
    RawBound, RawZone, Zone, ZoneFieldError, color_to_hex, format_bound, parse_bound,
    parse_zone_color,
};

/// Separator between embedded objects once the outer quotes are removed.
///
/// U+001F cannot appear in a JSON string unescaped, so it never collides with
/// payload text.
const FRAGMENT_DELIMITER: &str = "\u{1f}";

/// What to do with zone records that fail to parse.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DecodePolicy {
    /// Skip bad records and keep the rest.
    #[default]
    Lenient,
    /// Any bad record discards the whole list.
    Strict,
}

/// Zones decoded from a legacy string, plus anything that was dropped.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ZoneDecode {
    /// Successfully decoded zones, in stored order.
    pub zones: Vec<Zone>,
    /// One entry per dropped fragment (or a single wrapper error).
    pub errors: Vec<DecodeError>,
}

/// Encoder/decoder for the legacy zone string.
#[derive(Clone, Copy, Debug, Default)]
pub struct ZoneCodec {
    /// Fragment tolerance.
    pub policy: DecodePolicy,
}

/// A stored `{color, line, upper, lower}` record.
#[derive(Debug, Deserialize)]
struct LegacyZone {
    color: String,
    #[serde(default)]
    line: Option<RawBound>,
    #[serde(default)]
    upper: Option<RawBound>,
    #[serde(default)]
    lower: Option<RawBound>,
}

impl LegacyZone {
    fn into_zone(self) -> Result<Zone, ZoneFieldError> {
        Ok(Zone {
            color: parse_zone_color(&self.color)?,
            level: parse_bound(self.line)?,
            range: [parse_bound(self.upper)?, parse_bound(self.lower)?],
        })
    }
}

impl ZoneCodec {
    /// Creates a codec with the given fragment tolerance.
    pub fn new(policy: DecodePolicy) -> Self {
        Self { policy }
    }

    /// Decodes a legacy zone string, logging and dropping anything malformed.
    ///
    /// Never fails: a corrupt record yields fewer zones (or none), not an error.
    pub fn decode(&self, serialized: &str) -> Vec<Zone> {
        let ZoneDecode { zones, errors } = self.decode_with_diagnostics(serialized);
        for e in &errors {
            log::warn!("dropping stored zone data: {e}");
        }
        zones
    }

    /// Decodes a legacy zone string and returns what was dropped alongside it.
    pub fn decode_with_diagnostics(&self, serialized: &str) -> ZoneDecode {
        let s = serialized.trim();
        if s.is_empty() || s == "{}" {
            return ZoneDecode::default();
        }
        let Some(payload) = s
            .strip_prefix("{\"")
            .and_then(|rest| rest.strip_suffix("\"}"))
        else {
            return ZoneDecode {
                zones: Vec::new(),
                errors: alloc::vec![DecodeError::Wrapper],
            };
        };

        let mut delimited = payload.replace("\",\"", FRAGMENT_DELIMITER);
        delimited.retain(|c| c != '\\');

        let out = delimited
            .split(FRAGMENT_DELIMITER)
            .enumerate()
            .map(|(index, fragment)| decode_fragment(index, fragment))
            .collect();
        self.apply_policy(out)
    }

    /// Decodes editor zone records one by one.
    ///
    /// A record that is not a zone (a `null`, an unparsable colour, a level of
    /// `"1-"`) is dropped and reported; the others are kept.
    pub fn decode_records(&self, records: &[Value]) -> ZoneDecode {
        let out = records
            .iter()
            .enumerate()
            .map(|(index, record)| decode_record(index, record))
            .collect();
        self.apply_policy(out)
    }

    fn apply_policy(&self, mut out: ZoneDecode) -> ZoneDecode {
        if self.policy == DecodePolicy::Strict && !out.errors.is_empty() {
            out.zones.clear();
        }
        out
    }

    /// Encodes zones into the legacy string form.
    ///
    /// Numbers are written as quoted strings and absent values as `""`, which
    /// is how the stored queries hold them.
    pub fn encode(&self, zones: &[Zone]) -> String {
        let mut out = String::from("{");
        for (i, zone) in zones.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            out.push('"');
            out.push_str("{\\\"color\\\": \\\"");
            out.push_str(&color_to_hex(zone.color));
            push_field(&mut out, "line", zone.level);
            push_field(&mut out, "upper", zone.range[0]);
            push_field(&mut out, "lower", zone.range[1]);
            out.push_str("\\\"}");
            out.push('"');
        }
        out.push('}');
        out
    }
}

fn push_field(out: &mut String, key: &str, value: Option<f64>) {
    out.push_str("\\\", \\\"");
    out.push_str(key);
    out.push_str("\\\": \\\"");
    out.push_str(&format_bound(value));
}

impl FromIterator<Result<Zone, DecodeError>> for ZoneDecode {
    fn from_iter<I: IntoIterator<Item = Result<Zone, DecodeError>>>(iter: I) -> Self {
        let mut out = Self::default();
        for item in iter {
            match item {
                Ok(zone) => out.zones.push(zone),
                Err(e) => out.errors.push(e),
            }
        }
        out
    }
}

fn decode_fragment(index: usize, fragment: &str) -> Result<Zone, DecodeError> {
    let record: LegacyZone =
        serde_json::from_str(fragment).map_err(|e| malformed(index, &e))?;
    record.into_zone().map_err(|e| field_error(index, e))
}

fn decode_record(index: usize, record: &Value) -> Result<Zone, DecodeError> {
    let raw = RawZone::deserialize(record).map_err(|e| malformed(index, &e))?;
    Zone::try_from(raw).map_err(|e| field_error(index, e))
}

fn malformed(index: usize, e: &dyn core::fmt::Display) -> DecodeError {
    DecodeError::Fragment {
        index,
        message: alloc::format!("{e}"),
    }
}

fn field_error(index: usize, e: ZoneFieldError) -> DecodeError {
    match e {
        ZoneFieldError::Color(color) => DecodeError::Color { index, color },
        ZoneFieldError::NotANumber(_) => malformed(index, &e),
    }
}

/// Decodes with the default, lenient policy.
pub fn decode(serialized: &str) -> Vec<Zone> {
    ZoneCodec::default().decode(serialized)
}

/// Encodes with the default codec.
pub fn encode(zones: &[Zone]) -> String {
    ZoneCodec::default().encode(zones)
}
