// Copyright 2025 the Zonechart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Number formatting for tick labels and the legacy zone encoding.

extern crate alloc;

use alloc::format;
use alloc::string::String;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// Formats a raw value the way a JavaScript host would print it.
///
/// Integral values print without a fractional part (`20`, not `20.0`).
/// Non-finite values format as an empty string.
pub fn format_number(v: f64) -> String {
    if !v.is_finite() {
        return String::new();
    }
    if v == v.round() && v.abs() < 1.0e15 {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "integral and bounded well inside the i64 range"
        )]
        let i = v as i64;
        return format!("{i}");
    }
    format!("{v}")
}

/// Formats a tick value with a decimal count derived from the tick step.
///
/// Ticks computed as `start + step * i` carry float noise
/// (`70.00000000000001`); rounding to the step's precision removes it.
pub(crate) fn format_tick_with_step(v: f64, step: f64) -> String {
    if !v.is_finite() {
        return String::new();
    }
    if !(step.is_finite() && step > 0.0) {
        return format_number(v);
    }
    let decimals = (-step.log10().floor()).max(0.0).min(12.0);
    #[allow(
        clippy::cast_possible_truncation,
        reason = "clamped to 0..=12 above"
    )]
    let decimals = decimals as usize;
    if decimals == 0 {
        return format_number(v.round());
    }
    let s = format!("{v:.decimals$}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        return String::from("0");
    }
    String::from(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_values_drop_the_fraction() {
        assert_eq!(format_number(20.0), "20");
        assert_eq!(format_number(-20.0), "-20");
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(f64::NAN), "");
    }

    #[test]
    fn tick_format_hides_float_noise() {
        assert_eq!(format_tick_with_step(70.000_000_000_000_01, 10.0), "70");
        assert_eq!(format_tick_with_step(0.1 + 0.2, 0.1), "0.3");
        assert_eq!(format_tick_with_step(-0.000_000_1, 0.5), "0");
        assert_eq!(format_tick_with_step(1.5, 0.5), "1.5");
        assert_eq!(format_tick_with_step(10.0, 0.2), "10");
    }
}
