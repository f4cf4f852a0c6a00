use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::columns::ColumnResolver;
use crate::numbering::{FileOrder, NumberingMode};

#[derive(Debug, Error)]
#[error("invalid analyzer config: {0}")]
pub struct ConfigError(#[from] serde_path_to_error::Error<serde_json::Error>);

/// Settings for one analysis run. Every field is optional in JSON.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub numbering: NumberingMode,

    /// Processing order. Falls back to the numbering mode's default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<FileOrder>,

    pub columns: ColumnResolver,
}

impl AnalyzerConfig {
    pub fn from_json_str(config: &str) -> Result<Self, ConfigError> {
        let d = &mut serde_json::Deserializer::from_str(config);
        Ok(serde_path_to_error::deserialize(d)?)
    }

    pub fn file_order(&self) -> FileOrder {
        self.order.unwrap_or_else(|| self.numbering.default_order())
    }
}
