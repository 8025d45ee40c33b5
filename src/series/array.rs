//! Time series storing every timestamp

use super::{binary_search_index, TimeSeries};

/// Linear correction steps tried before falling back to binary search
const MAX_CORRECTION_STEPS: usize = 64;

/// Explicit timestamp per sample.
///
/// Lookup guesses the index by interpolating between the first and last
/// timestamp, walks a few steps to correct the guess, and falls back to a
/// binary search when the data is too irregular for the guess to be close.
#[derive(Debug, Clone, Default)]
pub struct TimeSeriesArray {
    times: Vec<f64>,
}

impl TimeSeriesArray {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            times: Vec::with_capacity(capacity),
        }
    }
}

impl TimeSeries for TimeSeriesArray {
    fn set_value(&mut self, index: usize, time: f64) {
        debug_assert_eq!(index, self.times.len(), "time series only supports appending");
        debug_assert!(
            self.times.last().map_or(true, |&last| time >= last),
            "time went backwards: {} after {:?}",
            time,
            self.times.last()
        );
        self.times.push(time);
    }

    fn value(&self, index: usize) -> f64 {
        match self.times.get(index) {
            Some(&t) => t,
            None => self.times.last().copied().unwrap_or(0.0),
        }
    }

    fn len(&self) -> usize {
        self.times.len()
    }

    fn find_time_index(&self, time: f64) -> usize {
        let Some(last) = self.maximum_index() else {
            return 0;
        };
        let (first_time, last_time) = (self.times[0], self.times[last]);
        if time < first_time || last == 0 {
            return 0;
        }
        if time >= last_time {
            return last;
        }

        let span = last_time - first_time;
        let mut index = if span > 0.0 {
            (((time - first_time) / span) * last as f64) as usize
        } else {
            0
        }
        .min(last);

        for _ in 0..MAX_CORRECTION_STEPS {
            if self.times[index] > time {
                index -= 1;
            } else if index < last && self.times[index + 1] <= time {
                index += 1;
            } else {
                return index;
            }
        }

        tracing::trace!("Interpolation search for t={} fell back to bisection", time);
        binary_search_index(0, last, time, |i| self.times[i])
    }
}
