use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::columns::ResolvedColumns;
use crate::series::{Sample, Series};

#[derive(Debug, Error)]
pub enum TableError {
    #[error("invalid table payload: {0}")]
    Json(#[from] serde_path_to_error::Error<serde_json::Error>),
    #[error("row {row} has {found} values, expected {expected}")]
    RaggedRow {
        row: usize,
        found: usize,
        expected: usize,
    },
}

/// An in-memory table in the "split" layout: one header list and row-major
/// numeric cells. Null cells are kept as `None`.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub data: Vec<Vec<Option<f64>>>,
}

impl Table {
    pub fn from_json_vec(payload: &[u8]) -> Result<Self, TableError> {
        let d = &mut serde_json::Deserializer::from_slice(payload);
        let table: Table = serde_path_to_error::deserialize(d)?;
        table.validate()?;
        Ok(table)
    }

    pub fn from_json_str(payload: &str) -> Result<Self, TableError> {
        Self::from_json_vec(payload.as_bytes())
    }

    fn validate(&self) -> Result<(), TableError> {
        let expected = self.columns.len();
        match self
            .data
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != expected)
        {
            Some((row, values)) => Err(TableError::RaggedRow {
                row,
                found: values.len(),
                expected,
            }),
            None => Ok(()),
        }
    }

    /// Extracts the resolved time and voltage columns. Null cells become NaN.
    pub fn series(&self, columns: &ResolvedColumns) -> Series {
        self.data
            .iter()
            .map(|row| Sample {
                time: cell(row, columns.time),
                voltage: cell(row, columns.voltage),
            })
            .collect::<Vec<Sample>>()
            .into()
    }
}

fn cell(row: &[Option<f64>], index: usize) -> f64 {
    row.get(index).copied().flatten().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{Table, TableError};
    use crate::columns::ResolvedColumns;

    #[test]
    fn test_table_from_json() {
        let payload = include_bytes!("../tests/fixtures/tables/Data_1001-2000.json");
        let r = Table::from_json_vec(payload);
        assert!(r.is_ok(), "{:#?}", r);
        let table = r.unwrap();
        assert_eq!(
            table.columns,
            vec!["Index".to_string(), "Time (min)".to_string(), "Voltage (V)".to_string()]
        );
        assert_eq!(table.data.len(), 11);
    }

    #[test]
    fn test_table_with_string_cell() {
        let r = Table::from_json_str(r#"{"columns": ["Time", "Voltage"], "data": [[0.0, "high"]]}"#);
        match r {
            Err(TableError::Json(e)) => assert_eq!(e.path().to_string(), "data[0][1]"),
            other => panic!("expected a json error, got {:?}", other),
        }
    }

    #[test]
    fn test_table_with_ragged_row() {
        let r = Table::from_json_str(
            r#"{"columns": ["Time", "Voltage"], "data": [[0.0, 0.1], [1.0]]}"#,
        );
        assert_eq!(
            r.unwrap_err().to_string(),
            "row 1 has 1 values, expected 2"
        );
    }

    #[test]
    fn test_series_with_null_cells() {
        let table = Table::from_json_str(
            r#"{"columns": ["Voltage", "Time"], "data": [[0.9, 0.0], [null, 1.0]]}"#,
        )
        .unwrap();
        let series = table.series(&ResolvedColumns {
            time: 1,
            voltage: 0,
        });
        assert_eq!(series.samples[0].voltage, 0.9);
        assert_eq!(series.samples[1].time, 1.0);
        assert!(series.samples[1].voltage.is_nan());
    }
}
