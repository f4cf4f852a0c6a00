use pyo3::{pyclass, pymethods};
use serde::Serialize;

use crate::error::AnalysisError;

/// One numbered discharge cycle of one source.
#[pyclass(get_all)]
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CycleRecord {
    pub source_id: String,
    pub cycle_number: u64,
    pub duration_seconds: f64,
}

#[pymethods]
impl CycleRecord {
    fn __repr__(&self) -> String {
        format!(
            "CycleRecord(source_id={:?}, cycle_number={}, duration_seconds={})",
            self.source_id, self.cycle_number, self.duration_seconds
        )
    }
}

/// Per-file totals shown next to the detailed records.
#[pyclass(get_all)]
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct FileSummary {
    pub source_id: String,
    pub cycles_found: usize,
    pub first_cycle: Option<u64>,
    pub last_cycle: Option<u64>,
    /// NaN when no cycle was found, written as `null` in JSON.
    pub mean_duration_seconds: f64,
}

impl FileSummary {
    pub fn from_records(source_id: &str, records: &[CycleRecord]) -> Self {
        let mean_duration_seconds = if records.is_empty() {
            f64::NAN
        } else {
            records.iter().map(|r| r.duration_seconds).sum::<f64>() / records.len() as f64
        };

        FileSummary {
            source_id: source_id.to_string(),
            cycles_found: records.len(),
            first_cycle: records.iter().map(|r| r.cycle_number).min(),
            last_cycle: records.iter().map(|r| r.cycle_number).max(),
            mean_duration_seconds,
        }
    }
}

#[pymethods]
impl FileSummary {
    /// `"first - last"`, or `"-"` for a file without cycles.
    pub fn range_label(&self) -> String {
        match (self.first_cycle, self.last_cycle) {
            (Some(first), Some(last)) => format!("{} - {}", first, last),
            _ => "-".to_string(),
        }
    }

    /// Mean duration rounded to two decimals, `"nan"` when undefined.
    pub fn mean_label(&self) -> String {
        if self.mean_duration_seconds.is_nan() {
            "nan".to_string()
        } else {
            format!("{:.2}", self.mean_duration_seconds)
        }
    }
}

/// Records, summaries and per-file errors of one batch run.
#[pyclass]
#[derive(Serialize, Debug, Clone, PartialEq, Default)]
pub struct BatchResult {
    pub records: Vec<CycleRecord>,
    pub summaries: Vec<FileSummary>,
    pub errors: Vec<AnalysisError>,
}

#[pymethods]
impl BatchResult {
    #[getter]
    fn records(&self) -> Vec<CycleRecord> {
        self.records.clone()
    }

    #[getter]
    fn summaries(&self) -> Vec<FileSummary> {
        self.summaries.clone()
    }

    /// Messages of the files that were skipped.
    pub fn errors(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.to_string()).collect()
    }

    /// Stable sort of the records by cycle number.
    pub fn sort_by_cycle_number(&mut self) {
        self.records.sort_by_key(|r| r.cycle_number);
    }

    pub fn to_json(&self) -> Result<String, pyo3::PyErr> {
        serde_json::to_string(self)
            .map_err(|e| pyo3::PyErr::new::<pyo3::exceptions::PyValueError, _>(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{BatchResult, CycleRecord, FileSummary};
    use crate::error::AnalysisError;

    fn record(source_id: &str, cycle_number: u64, duration_seconds: f64) -> CycleRecord {
        CycleRecord {
            source_id: source_id.to_string(),
            cycle_number,
            duration_seconds,
        }
    }

    #[test]
    fn test_summary_from_records() {
        let summary = FileSummary::from_records(
            "a.csv",
            &[record("a.csv", 4, 90.0), record("a.csv", 5, 60.0)],
        );
        assert_eq!(summary.cycles_found, 2);
        assert_eq!(summary.range_label(), "4 - 5");
        assert_eq!(summary.mean_duration_seconds, 75.0);
        assert_eq!(summary.mean_label(), "75.00");
    }

    #[test]
    fn test_summary_without_cycles() {
        let summary = FileSummary::from_records("flat.csv", &[]);
        assert_eq!(summary.cycles_found, 0);
        assert_eq!(summary.first_cycle, None);
        assert_eq!(summary.range_label(), "-");
        assert!(summary.mean_duration_seconds.is_nan());
        assert_eq!(summary.mean_label(), "nan");
    }

    #[test]
    fn test_sort_by_cycle_number() {
        let mut result = BatchResult {
            records: vec![
                record("b.csv", 3, 1.0),
                record("a.csv", 1, 2.0),
                record("c.csv", 1, 3.0),
                record("a.csv", 2, 4.0),
            ],
            ..Default::default()
        };
        result.sort_by_cycle_number();
        let order: Vec<(&str, u64)> = result
            .records
            .iter()
            .map(|r| (r.source_id.as_str(), r.cycle_number))
            .collect();
        assert_eq!(order, vec![("a.csv", 1), ("c.csv", 1), ("a.csv", 2), ("b.csv", 3)]);
    }

    #[test]
    fn test_batch_result_to_json() {
        let result = BatchResult {
            records: vec![record("a.csv", 1, 90.0)],
            summaries: vec![
                FileSummary::from_records("a.csv", &[record("a.csv", 1, 90.0)]),
                FileSummary::from_records("flat.csv", &[]),
            ],
            errors: vec![AnalysisError::Ingestion {
                source_id: "corrupt.csv".to_string(),
                cause: "expected value at line 1 column 1".to_string(),
            }],
        };

        let json: serde_json::Value = serde_json::from_str(&result.to_json().unwrap()).unwrap();
        assert_eq!(json["records"][0]["cycle_number"], 1);
        assert_eq!(json["records"][0]["duration_seconds"], 90.0);
        assert_eq!(json["summaries"][0]["mean_duration_seconds"], 90.0);
        assert_eq!(json["summaries"][1]["cycles_found"], 0);
        assert!(json["summaries"][1]["first_cycle"].is_null());
        assert!(json["summaries"][1]["mean_duration_seconds"].is_null());
        assert_eq!(
            json["errors"][0],
            serde_json::json!({
                "kind": "ingestion",
                "source_id": "corrupt.csv",
                "cause": "expected value at line 1 column 1",
            })
        );
    }
}
