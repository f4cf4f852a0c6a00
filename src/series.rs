/// One reading of a voltage log. `time` is in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Sample {
    pub time: f64,
    pub voltage: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Series {
    pub samples: Vec<Sample>,
}

impl Series {
    pub fn new(samples: Vec<Sample>) -> Self {
        Series { samples }
    }

    /// Zips a time column with a voltage column. Callers are expected to pass
    /// columns of equal length; extra values in the longer one are ignored.
    pub fn from_columns(times: &[f64], voltages: &[f64]) -> Self {
        let samples = times
            .iter()
            .zip(voltages)
            .map(|(&time, &voltage)| Sample { time, voltage })
            .collect();
        Series { samples }
    }

    /// Returns the samples sorted ascending by time.
    ///
    /// The sort is stable, so samples sharing a timestamp keep their input
    /// order. NaN timestamps of either sign sort after every finite time.
    pub fn into_sorted(mut self) -> Vec<Sample> {
        self.samples.sort_by(|a, b| {
            a.time
                .is_nan()
                .cmp(&b.time.is_nan())
                .then_with(|| a.time.total_cmp(&b.time))
        });
        self.samples
    }
}

impl From<Vec<Sample>> for Series {
    fn from(samples: Vec<Sample>) -> Self {
        Series::new(samples)
    }
}
