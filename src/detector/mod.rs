use log::{debug, warn};

use crate::series::{Sample, Series};

// Constants
pub const PEAK_THRESHOLD: f64 = 0.5;
pub const ZERO_THRESHOLD: f64 = 0.05;
pub const SECONDS_PER_MINUTE: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Seeking {
    Peak,
    Zero,
}

/// One discharge event: a peak and the zero-crossing that follows it.
/// Timestamps are in minutes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cycle {
    pub t_peak: f64,
    pub t_zero: f64,
}

impl Cycle {
    /// Discharge duration in seconds. Negative values are returned as is.
    pub fn duration_seconds(&self) -> f64 {
        (self.t_zero - self.t_peak) * SECONDS_PER_MINUTE
    }
}

/// Raw peak and zero-crossing timestamps found by a single scan.
///
/// Peaks and zero-crossings strictly alternate, starting with a peak, so
/// `zero_crossings.len()` is always `peaks.len()` or `peaks.len() - 1`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Detection {
    pub peaks: Vec<f64>,
    pub zero_crossings: Vec<f64>,
}

impl Detection {
    /// Pairs the k-th peak with the k-th zero-crossing. Unpaired trailing
    /// entries are dropped.
    pub fn cycles(&self) -> Vec<Cycle> {
        if self.peaks.len() > self.zero_crossings.len() {
            debug!(
                "dropping {} unmatched trailing peak(s), last at t={}",
                self.peaks.len() - self.zero_crossings.len(),
                self.peaks[self.peaks.len() - 1]
            );
        }

        let cycles: Vec<Cycle> = self
            .peaks
            .iter()
            .zip(&self.zero_crossings)
            .map(|(&t_peak, &t_zero)| Cycle { t_peak, t_zero })
            .collect();

        for cycle in cycles.iter().filter(|c| c.duration_seconds() < 0.0) {
            warn!(
                "negative discharge duration: peak at t={} after zero-crossing at t={}",
                cycle.t_peak, cycle.t_zero
            );
        }

        cycles
    }
}

fn is_peak(prev: &Sample, current: &Sample, next: &Sample) -> bool {
    current.voltage > prev.voltage
        && current.voltage > next.voltage
        && current.voltage > PEAK_THRESHOLD
}

fn is_zero(sample: &Sample) -> bool {
    sample.voltage <= ZERO_THRESHOLD
}

/// Scans a series for peak-then-zero discharge patterns.
///
/// The series is sorted by time first. The scan alternates between looking
/// for a local maximum above `PEAK_THRESHOLD` and looking for a sample at or
/// below `ZERO_THRESHOLD`. Both endpoints lack a neighbour on one side, so
/// they are handled separately: the first sample counts as a peak when the
/// series opens on a falling edge above the threshold, and the last sample
/// closes a pending cycle when it sits at zero.
///
/// NaN voltages fail every comparison and never produce an event.
pub fn detect(series: Series) -> Detection {
    let samples = series.into_sorted();
    let mut detection = Detection::default();
    let mut seeking = Seeking::Peak;

    let nan_count = samples.iter().filter(|s| s.voltage.is_nan()).count();
    if nan_count > 0 {
        warn!("series contains {} NaN voltage sample(s)", nan_count);
    }

    if let [first, second, ..] = samples.as_slice() {
        if first.voltage > PEAK_THRESHOLD && first.voltage > second.voltage {
            detection.peaks.push(first.time);
            seeking = Seeking::Zero;
        }
    }

    for window in samples.windows(3) {
        let (prev, current, next) = (&window[0], &window[1], &window[2]);
        match seeking {
            Seeking::Peak => {
                if is_peak(prev, current, next) {
                    detection.peaks.push(current.time);
                    seeking = Seeking::Zero;
                }
            }
            Seeking::Zero => {
                if is_zero(current) {
                    detection.zero_crossings.push(current.time);
                    seeking = Seeking::Peak;
                }
            }
        }
    }

    if seeking == Seeking::Zero {
        if let Some(last) = samples.last() {
            if is_zero(last) {
                detection.zero_crossings.push(last.time);
            }
        }
    }

    detection
}

/// Convenience wrapper returning the paired cycles directly.
pub fn detect_cycles(series: Series) -> Vec<Cycle> {
    detect(series).cycles()
}
