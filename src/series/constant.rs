//! Time series with a fixed step

use super::TimeSeries;

/// Timestamps `t0 + i * dt`.
///
/// `t0` is taken from the first appended sample and `dt` from the second;
/// later samples are expected to follow the grid.
#[derive(Debug, Clone, Default)]
pub struct TimeSeriesConstantDt {
    start: f64,
    dt: f64,
    len: usize,
}

impl TimeSeriesConstantDt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Series with known start time and step, still empty
    pub fn with_step(start: f64, dt: f64) -> Self {
        debug_assert!(dt >= 0.0, "negative time step {}", dt);
        Self { start, dt, len: 0 }
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }
}

impl TimeSeries for TimeSeriesConstantDt {
    fn set_value(&mut self, index: usize, time: f64) {
        debug_assert_eq!(index, self.len, "time series only supports appending");
        match self.len {
            0 if self.dt == 0.0 => self.start = time,
            0 => {
                debug_assert!(
                    (time - self.start).abs() <= 1e-9 * self.dt.max(self.start.abs()),
                    "first sample {} off the grid starting at {}",
                    time,
                    self.start
                );
            }
            1 if self.dt == 0.0 => {
                debug_assert!(time >= self.start, "time went backwards");
                self.dt = time - self.start;
            }
            n => {
                debug_assert!(
                    (time - (self.start + n as f64 * self.dt)).abs()
                        <= 1e-6 * self.dt.max(f64::MIN_POSITIVE),
                    "sample {} at {} breaks constant step {}",
                    n,
                    time,
                    self.dt
                );
            }
        }
        self.len += 1;
    }

    fn value(&self, index: usize) -> f64 {
        let index = index.min(self.len.saturating_sub(1));
        self.start + index as f64 * self.dt
    }

    fn len(&self) -> usize {
        self.len
    }

    fn find_time_index(&self, time: f64) -> usize {
        let Some(last) = self.maximum_index() else {
            return 0;
        };
        if time < self.start || last == 0 {
            return 0;
        }
        if self.dt <= 0.0 {
            return last;
        }

        let estimate = ((time - self.start) / self.dt).floor();
        let mut index = if estimate >= last as f64 {
            last
        } else {
            estimate.max(0.0) as usize
        };
        // floating point can put the estimate one step off
        while index < last && self.value(index + 1) <= time {
            index += 1;
        }
        while index > 0 && self.value(index) > time {
            index -= 1;
        }
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(n: usize, start: f64, dt: f64) -> TimeSeriesConstantDt {
        let mut s = TimeSeriesConstantDt::new();
        for i in 0..n {
            s.set_value(i, start + i as f64 * dt);
        }
        s
    }

    #[test]
    fn test_values_follow_grid() {
        let s = series(10, 1.0, 0.25);
        assert_eq!(s.value(0), 1.0);
        assert_eq!(s.value(4), 2.0);
        assert_eq!(s.value(100), s.value(9));
        assert_eq!(s.dt(), 0.25);
    }

    #[test]
    fn test_find_time_index_clamps() {
        let s = series(10, 1.0, 0.25);
        assert_eq!(s.find_time_index(-5.0), 0);
        assert_eq!(s.find_time_index(1.0), 0);
        assert_eq!(s.find_time_index(1.3), 1);
        assert_eq!(s.find_time_index(100.0), 9);
    }

    #[test]
    fn test_find_time_index_roundtrip() {
        let s = series(1000, 0.0, 0.1);
        for i in 0..1000 {
            assert_eq!(s.find_time_index(s.value(i)), i);
        }
    }

    #[test]
    fn test_with_step() {
        let mut s = TimeSeriesConstantDt::with_step(2.0, 0.5);
        s.set_value(0, 2.0);
        s.set_value(1, 2.5);
        s.set_value(2, 3.0);
        assert_eq!(s.find_time_index(2.9), 1);
        assert_eq!(s.last_time_interval(), Some(0.5));
    }
}
