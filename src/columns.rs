use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A rule recognising a column header.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ColumnMatcher {
    /// Header contains the given text, case-sensitive.
    Contains(String),
    /// Header is exactly the given text.
    Exact(String),
}

impl ColumnMatcher {
    pub fn matches(&self, header: &str) -> bool {
        match self {
            ColumnMatcher::Contains(needle) => header.contains(needle.as_str()),
            ColumnMatcher::Exact(name) => header == name,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRole {
    Time,
    Voltage,
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnRole::Time => write!(f, "time"),
            ColumnRole::Voltage => write!(f, "voltage"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("could not detect a {role} column, found: {available:?}")]
pub struct UnresolvedColumn {
    pub role: ColumnRole,
    pub available: Vec<String>,
}

/// Indices of the resolved columns within a table header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedColumns {
    pub time: usize,
    pub voltage: usize,
}

/// Finds the time and voltage columns of a table by header name.
///
/// Each role has a list of matchers. A role resolves to the first column, in
/// header order, that any of its matchers accepts.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ColumnResolver {
    pub time: Vec<ColumnMatcher>,
    pub voltage: Vec<ColumnMatcher>,
}

impl Default for ColumnResolver {
    fn default() -> Self {
        ColumnResolver {
            time: vec![ColumnMatcher::Contains("ime".to_string())],
            voltage: vec![
                ColumnMatcher::Contains("oltage".to_string()),
                ColumnMatcher::Contains("otential".to_string()),
            ],
        }
    }
}

impl ColumnResolver {
    pub fn resolve<S: AsRef<str>>(&self, headers: &[S]) -> Result<ResolvedColumns, UnresolvedColumn> {
        let time = find_column(headers, &self.time, ColumnRole::Time)?;
        let voltage = find_column(headers, &self.voltage, ColumnRole::Voltage)?;
        Ok(ResolvedColumns { time, voltage })
    }
}

fn find_column<S: AsRef<str>>(
    headers: &[S],
    matchers: &[ColumnMatcher],
    role: ColumnRole,
) -> Result<usize, UnresolvedColumn> {
    headers
        .iter()
        .position(|header| matchers.iter().any(|m| m.matches(header.as_ref())))
        .ok_or_else(|| UnresolvedColumn {
            role,
            available: headers.iter().map(|h| h.as_ref().to_string()).collect(),
        })
}
