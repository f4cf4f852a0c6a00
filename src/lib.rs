use pyo3::prelude::*;

use batch::SourceTable;
use config::AnalyzerConfig;
use numbering::NumberingState;
use series::Series;
use types::{BatchResult, CycleRecord};

mod batch;
mod columns;
mod config;
mod detector;
mod error;
mod numbering;
mod series;
mod table;
mod types;

fn value_error<E: ToString>(e: E) -> PyErr {
    PyErr::new::<pyo3::exceptions::PyValueError, _>(e.to_string())
}

fn load_config(config: Option<&str>) -> PyResult<AnalyzerConfig> {
    match config {
        Some(config) => AnalyzerConfig::from_json_str(config).map_err(value_error),
        None => Ok(AnalyzerConfig::default()),
    }
}

#[pyfunction]
fn analyze_series(source_id: &str, times: Vec<f64>, voltages: Vec<f64>) -> PyResult<Vec<CycleRecord>> {
    if times.len() != voltages.len() {
        return Err(value_error(format!(
            "{}: got {} timestamps and {} voltages",
            source_id,
            times.len(),
            voltages.len()
        )));
    }
    let cycles = detector::detect_cycles(Series::from_columns(&times, &voltages));
    let sequential = AnalyzerConfig::default();
    let (records, _) =
        batch::number_cycles(source_id, &cycles, &sequential, NumberingState::default());
    Ok(records)
}

#[pyfunction]
#[pyo3(signature = (source_id, payload, config=None))]
fn analyze_table_json(
    source_id: &str,
    payload: &str,
    config: Option<&str>,
) -> PyResult<Vec<CycleRecord>> {
    let config = load_config(config)?;
    let source = SourceTable::from_json_str(source_id, payload).map_err(value_error)?;
    let cycles = source.detect(&config).map_err(value_error)?;
    let (records, _) =
        batch::number_cycles(source_id, &cycles, &config, NumberingState::default());
    Ok(records)
}

#[pyfunction]
#[pyo3(signature = (files, config=None))]
fn analyze_batch_json(files: Vec<(String, String)>, config: Option<&str>) -> PyResult<BatchResult> {
    let config = load_config(config)?;
    let inputs = files
        .iter()
        .map(|(source_id, payload)| SourceTable::from_json_str(source_id, payload))
        .collect();
    Ok(batch::run_batch(&config, inputs))
}

#[pyfunction]
fn extract_offset(identifier: &str) -> u64 {
    numbering::extract_offset(identifier)
}

/// Discharge cycle detection for battery voltage logs.
#[pymodule]
fn discharge_cycles(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<CycleRecord>()?;
    m.add_class::<types::FileSummary>()?;
    m.add_class::<BatchResult>()?;
    m.add_function(wrap_pyfunction!(analyze_series, m)?)?;
    m.add_function(wrap_pyfunction!(analyze_table_json, m)?)?;
    m.add_function(wrap_pyfunction!(analyze_batch_json, m)?)?;
    m.add_function(wrap_pyfunction!(extract_offset, m)?)?;
    Ok(())
}
