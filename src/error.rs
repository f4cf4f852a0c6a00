use serde::Serialize;
use thiserror::Error;

use crate::columns::UnresolvedColumn;
use crate::table::TableError;

/// A failure that skips one file of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalysisError {
    #[error("{source_id}: {cause}")]
    Configuration { source_id: String, cause: String },
    #[error("{source_id}: failed to read table: {cause}")]
    Ingestion { source_id: String, cause: String },
}

impl AnalysisError {
    pub fn configuration(source_id: &str, err: &UnresolvedColumn) -> Self {
        AnalysisError::Configuration {
            source_id: source_id.to_string(),
            cause: err.to_string(),
        }
    }

    pub fn ingestion(source_id: &str, err: &TableError) -> Self {
        AnalysisError::Ingestion {
            source_id: source_id.to_string(),
            cause: err.to_string(),
        }
    }

    pub fn source_id(&self) -> &str {
        match self {
            AnalysisError::Configuration { source_id, .. }
            | AnalysisError::Ingestion { source_id, .. } => source_id,
        }
    }
}
