// Copyright 2025 the Zonechart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error taxonomy for a render pass.
//!
//! Only [`ConfigurationError`] is fatal. Zone decoding and geometry problems are
//! recovered where they happen and reported as [`Diagnostic`]s on the render
//! descriptor.

extern crate alloc;

use alloc::string::String;

use thiserror::Error;

/// The chart cannot be rendered until the host fixes its settings.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// The dimension (x) column named in the settings is not in the table.
    #[error("dimension column `{0}` is not present in the result")]
    MissingDimension(String),
    /// The metric (y) column named in the settings is not in the table.
    #[error("metric column `{0}` is not present in the result")]
    MissingMetric(String),
}

/// A legacy zone string could not be decoded, in whole or in part.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The string is not wrapped in `{"` and `"}`.
    #[error("zone string is not a brace-wrapped list of quoted objects")]
    Wrapper,
    /// A fragment is not a valid zone record.
    #[error("zone fragment {index} is not a valid zone record: {message}")]
    Fragment {
        /// Position of the fragment in the list.
        index: usize,
        /// Parser message.
        message: String,
    },
    /// A fragment names a colour that does not parse.
    #[error("zone fragment {index} has an unrecognized color `{color}`")]
    Color {
        /// Position of the fragment in the list.
        index: usize,
        /// The colour text as stored.
        color: String,
    },
}

/// The data cannot produce a meaningful value domain.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// No numeric values; the value domain fell back to `[0, 1]`.
    #[error("series has no numeric values; using the default value domain")]
    EmptySeries,
    /// Rows whose metric cell was not numeric were left out of the series.
    #[error("{count} row(s) with a non-numeric metric were skipped")]
    NonNumericValues {
        /// Number of skipped rows.
        count: usize,
    },
}

/// A recovered, non-fatal problem recorded during a render pass.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Diagnostic {
    /// Zone decoding problem.
    #[error(transparent)]
    Decode(#[from] DecodeError),
    /// Geometry problem.
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn diagnostics_display_their_source() {
        let d = Diagnostic::from(DecodeError::Fragment {
            index: 2,
            message: "EOF while parsing".into(),
        });
        assert_eq!(
            d.to_string(),
            "zone fragment 2 is not a valid zone record: EOF while parsing"
        );
        let g = Diagnostic::from(GeometryError::NonNumericValues { count: 3 });
        assert!(g.to_string().starts_with("3 row(s)"));
    }
}
