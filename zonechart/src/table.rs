// Copyright 2025 the Zonechart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host query results.
//!
//! The host hands over a row-major table with loosely typed cells. The chart
//! reads it column-wise, so [`DataTable::frame`] pivots it once into a
//! [`ColumnFrame`] keyed by column name.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;
use serde::Deserialize;

use crate::format::format_number;

/// A single table cell.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    /// Missing value.
    #[default]
    Null,
    /// Boolean.
    Bool(bool),
    /// Any JSON number.
    Number(f64),
    /// Text, including dates and numbers the host serialized as strings.
    Text(String),
}

static NULL: Scalar = Scalar::Null;

impl Scalar {
    /// The cell as a finite number.
    ///
    /// Numeric text (`"12.5"`) counts; booleans, blanks and `null` do not.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v).filter(|v| v.is_finite()),
            Self::Text(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            Self::Null | Self::Bool(_) => None,
        }
    }

    /// The cell as display text.
    pub fn label(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Bool(b) => String::from(if *b { "true" } else { "false" }),
            Self::Number(v) => format_number(*v),
            Self::Text(s) => s.clone(),
        }
    }

    /// The cell as text, if it is text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Whether the cell is `null` or blank text.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Self::Text(String::from(s))
    }
}

/// Column metadata.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Column {
    /// Column name, used by the settings to refer to it.
    pub name: String,
    /// Host type tag, such as `type/Integer` or `type/DateTime`.
    #[serde(default)]
    pub base_type: Option<String>,
}

impl Column {
    /// Creates a column.
    pub fn new(name: impl Into<String>, base_type: Option<&str>) -> Self {
        Self {
            name: name.into(),
            base_type: base_type.map(String::from),
        }
    }

    /// Whether the host types this column as a number.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self.base_type.as_deref(),
            Some(
                "type/Integer"
                    | "type/Float"
                    | "type/Decimal"
                    | "type/BigInteger"
                    | "type/Number"
            )
        )
    }

    /// Whether the host types this column as a date, datetime or time.
    pub fn is_date(&self) -> bool {
        self.base_type
            .as_deref()
            .is_some_and(|t| t.starts_with("type/Date") || t.starts_with("type/Time"))
    }
}

/// A row-major query result.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct DataTable {
    /// Column metadata, in row cell order.
    pub cols: Vec<Column>,
    /// Rows of cells.
    pub rows: Vec<Vec<Scalar>>,
}

impl DataTable {
    /// Creates a table.
    pub fn new(cols: Vec<Column>, rows: Vec<Vec<Scalar>>) -> Self {
        Self { cols, rows }
    }

    /// Parses the host's `{cols, rows}` JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// The column named `name`. With duplicate names the last one wins.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.cols.iter().rev().find(|c| c.name == name)
    }

    /// Pivots the rows into columns keyed by name.
    pub fn frame(&self) -> ColumnFrame<'_> {
        let mut columns: HashMap<&str, Vec<&Scalar>> = HashMap::with_capacity(self.cols.len());
        for (i, col) in self.cols.iter().enumerate() {
            let values = self
                .rows
                .iter()
                .map(|row| row.get(i).unwrap_or(&NULL))
                .collect();
            // Later duplicates overwrite earlier ones.
            columns.insert(col.name.as_str(), values);
        }
        ColumnFrame {
            columns,
            len: self.rows.len(),
        }
    }
}

/// Column-major view of a [`DataTable`].
///
/// Every column has exactly one cell per row; short rows read as `null`.
#[derive(Clone, Debug)]
pub struct ColumnFrame<'a> {
    columns: HashMap<&'a str, Vec<&'a Scalar>>,
    len: usize,
}

impl<'a> ColumnFrame<'a> {
    /// The cells of column `name`.
    pub fn get(&self, name: &str) -> Option<&[&'a Scalar]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    /// Whether a column named `name` exists.
    pub fn contains(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn host_json_deserializes() {
        let table = DataTable::from_json(
            r#"{
                "cols": [
                    {"name": "day", "base_type": "type/Date"},
                    {"name": "count", "base_type": "type/Integer"},
                    {"name": "note"}
                ],
                "rows": [["2024-01-01", 3, null], ["2024-01-02", 4.5, true]]
            }"#,
        )
        .expect("valid table");
        assert_eq!(table.row_count(), 2);
        assert!(table.cols[0].is_date());
        assert!(table.cols[1].is_numeric());
        assert!(!table.cols[2].is_numeric());
        assert_eq!(table.rows[0][2], Scalar::Null);
        assert_eq!(table.rows[1][2], Scalar::Bool(true));
        assert_eq!(table.rows[1][1].as_f64(), Some(4.5));
    }

    #[test]
    fn frame_pivots_and_later_duplicates_win() {
        let table = DataTable::new(
            vec![
                Column::new("x", None),
                Column::new("y", None),
                Column::new("x", None),
            ],
            vec![
                vec![1.0.into(), 10.0.into(), "a".into()],
                vec![2.0.into(), 20.0.into()],
            ],
        );
        let frame = table.frame();
        assert_eq!(frame.len(), 2);
        let x = frame.get("x").expect("x column");
        assert_eq!(x[0], &Scalar::Text("a".into()));
        // The second row is short.
        assert_eq!(x[1], &Scalar::Null);
        assert_eq!(frame.get("y").map(<[_]>::len), Some(2));
        assert!(!frame.contains("z"));
        assert_eq!(table.column("x"), Some(&table.cols[2]));
    }

    #[test]
    fn scalar_conversions() {
        assert_eq!(Scalar::from("12.5").as_f64(), Some(12.5));
        assert_eq!(Scalar::from("n/a").as_f64(), None);
        assert_eq!(Scalar::Bool(true).as_f64(), None);
        assert_eq!(Scalar::Number(f64::NAN).as_f64(), None);
        assert_eq!(Scalar::Number(3.0).label(), "3");
        assert_eq!(Scalar::Null.label(), "");
        assert!(Scalar::from("  ").is_empty());
        assert!(!Scalar::Number(0.0).is_empty());
    }

    #[test]
    fn date_and_time_types_classify_as_dates() {
        for t in ["type/DateTime", "type/DateTimeWithTZ", "type/Time", "type/Date"] {
            assert!(Column::new("c", Some(t)).is_date(), "{t}");
        }
        assert!(!Column::new("c", Some("type/Text")).is_date());
        assert!(!Column::new("c", None).is_numeric());
    }
}
