use log::{info, warn};

use crate::config::AnalyzerConfig;
use crate::detector::{detect, Cycle};
use crate::error::AnalysisError;
use crate::numbering::{assign, NumberingState};
use crate::table::Table;
use crate::types::{BatchResult, CycleRecord, FileSummary};

/// A successfully ingested table and the identifier of the file it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceTable {
    pub source_id: String,
    pub table: Table,
}

impl SourceTable {
    pub fn from_json_str(source_id: &str, payload: &str) -> Result<Self, AnalysisError> {
        Table::from_json_str(payload)
            .map(|table| SourceTable {
                source_id: source_id.to_string(),
                table,
            })
            .map_err(|e| AnalysisError::ingestion(source_id, &e))
    }

    /// Resolves the time and voltage columns and runs the detector.
    pub fn detect(&self, config: &AnalyzerConfig) -> Result<Vec<Cycle>, AnalysisError> {
        let columns = config
            .columns
            .resolve(&self.table.columns)
            .map_err(|e| AnalysisError::configuration(&self.source_id, &e))?;
        Ok(detect(self.table.series(&columns)).cycles())
    }
}

/// Detected cycles of one file, before numbering.
struct FileCycles {
    source_id: String,
    cycles: Vec<Cycle>,
}

/// Numbers the cycles of one file and advances the batch state.
pub fn number_cycles(
    source_id: &str,
    cycles: &[Cycle],
    config: &AnalyzerConfig,
    state: NumberingState,
) -> (Vec<CycleRecord>, NumberingState) {
    let (numbers, next) = assign(cycles.len(), config.numbering, source_id, state);
    let records = cycles
        .iter()
        .zip(numbers)
        .map(|(cycle, cycle_number)| CycleRecord {
            source_id: source_id.to_string(),
            cycle_number,
            duration_seconds: cycle.duration_seconds(),
        })
        .collect();
    (records, next)
}

/// Analyzes every input of a batch.
///
/// Inputs that failed ingestion and files whose columns cannot be resolved
/// are reported in `errors` and never advance the continuous counter. The
/// remaining files are processed in `config.file_order()`: detection runs per
/// file, then numbering folds over the results in that order.
pub fn run_batch(
    config: &AnalyzerConfig,
    inputs: Vec<Result<SourceTable, AnalysisError>>,
) -> BatchResult {
    let mut result = BatchResult::default();
    let mut sources = Vec::with_capacity(inputs.len());

    for input in inputs {
        match input {
            Ok(source) => sources.push(source),
            Err(e) => {
                warn!("skipping {}: {}", e.source_id(), e);
                result.errors.push(e);
            }
        }
    }

    config
        .file_order()
        .sort(&mut sources, |s| s.source_id.as_str());

    let detected: Vec<FileCycles> = sources
        .iter()
        .filter_map(|source| match source.detect(config) {
            Ok(cycles) => Some(FileCycles {
                source_id: source.source_id.clone(),
                cycles,
            }),
            Err(e) => {
                warn!("skipping {}: {}", source.source_id, e);
                result.errors.push(e);
                None
            }
        })
        .collect();

    let (_, result) = detected.into_iter().fold(
        (NumberingState::default(), result),
        |(state, mut result), file| {
            let (records, next) = number_cycles(&file.source_id, &file.cycles, config, state);
            let summary = FileSummary::from_records(&file.source_id, &records);
            info!(
                "{}: {} cycle(s), range {}",
                file.source_id,
                summary.cycles_found,
                summary.range_label()
            );
            result.records.extend(records);
            result.summaries.push(summary);
            (next, result)
        },
    );

    result
}
