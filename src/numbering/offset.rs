use once_cell::sync::Lazy;
use regex::Regex;

pub const DEFAULT_OFFSET: u64 = 1;

static DIGIT_RUN_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+").unwrap());

/// Returns the first run of ASCII digits in `identifier` as a starting cycle
/// number, or `DEFAULT_OFFSET` when there is none.
///
/// `Data_1001-2000.csv` starts at 1001. Runs too large for a `u64` saturate.
pub fn extract_offset(identifier: &str) -> u64 {
    DIGIT_RUN_REGEX
        .find(identifier)
        .map(|m| m.as_str().parse::<u64>().unwrap_or(u64::MAX))
        .unwrap_or(DEFAULT_OFFSET)
}
