use serde::{Deserialize, Serialize};

mod offset;

pub use offset::extract_offset;

/// How cycle numbers are assigned across the files of a batch.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "snake_case")]
pub enum NumberingMode {
    /// Every file starts again at 1.
    #[default]
    Sequential,
    /// Numbers continue from the previous file in processing order.
    Continuous,
    /// Every file starts at the offset found in its identifier.
    NameDerived,
}

impl NumberingMode {
    pub fn default_order(&self) -> FileOrder {
        match self {
            NumberingMode::NameDerived => FileOrder::Offset,
            NumberingMode::Sequential | NumberingMode::Continuous => FileOrder::Lexical,
        }
    }
}

/// Order in which the files of a batch are processed and presented.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum FileOrder {
    Lexical,
    Offset,
}

impl FileOrder {
    /// Stable sort of `items` by their source identifier. Offset ties keep
    /// lexical order.
    pub fn sort<T, F>(&self, items: &mut [T], source_id: F)
    where
        F: Fn(&T) -> &str,
    {
        items.sort_by(|a, b| source_id(a).cmp(source_id(b)));
        if *self == FileOrder::Offset {
            items.sort_by_key(|item| extract_offset(source_id(item)));
        }
    }
}

/// Running state of a batch. Only `Continuous` reads or advances it.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct NumberingState {
    pub running_total: u64,
}

/// Assigns cycle numbers to the `cycle_count` cycles detected in one file.
pub fn assign(
    cycle_count: usize,
    mode: NumberingMode,
    source_id: &str,
    state: NumberingState,
) -> (Vec<u64>, NumberingState) {
    let count = cycle_count as u64;
    match mode {
        NumberingMode::Sequential => (ordinals(1, count), state),
        NumberingMode::Continuous => {
            let start = state.running_total.saturating_add(1);
            let next = NumberingState {
                running_total: state.running_total.saturating_add(count),
            };
            (ordinals(start, count), next)
        }
        NumberingMode::NameDerived => (ordinals(extract_offset(source_id), count), state),
    }
}

fn ordinals(start: u64, count: u64) -> Vec<u64> {
    (0..count).map(|k| start.saturating_add(k)).collect()
}
