//! Time series made of constant-step blocks
//!
//! Simulation output usually runs at a fixed step for long stretches and
//! changes step only occasionally. Each stretch is stored as one
//! [`DataBlock`] (start index, start time, step, length), so memory grows with
//! the number of step changes rather than the number of samples.
//!
//! Blocks are indexed twice, by start index and by start time, in ordered
//! maps. A lookup is one map search plus O(1) arithmetic inside the block.

use super::TimeSeries;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Relative tolerance for a sample to continue the current block's grid
pub const BLOCK_REL_TOLERANCE: f64 = 1e-10;

/// A run of samples with a constant step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataBlock {
    pub start_index: usize,
    pub start_time: f64,
    pub dt: f64,
    pub len: usize,
}

impl DataBlock {
    fn new(start_index: usize, start_time: f64) -> Self {
        Self {
            start_index,
            start_time,
            dt: 0.0,
            len: 1,
        }
    }

    fn time_at(&self, local: usize) -> f64 {
        self.start_time + local as f64 * self.dt
    }

    fn last_local(&self) -> usize {
        self.len - 1
    }

    /// Whether `time` is the next grid point of this block
    fn accepts(&self, time: f64) -> bool {
        if self.len == 1 {
            return time >= self.start_time;
        }
        let expected = self.time_at(self.len);
        let tolerance = BLOCK_REL_TOLERANCE * expected.abs().max(self.dt.abs());
        (time - expected).abs() <= tolerance
    }

    /// Greatest local index with time `<= time`; `time >= start_time` assumed
    fn local_index(&self, time: f64) -> usize {
        let last = self.last_local();
        if last == 0 || self.dt <= 0.0 {
            return last;
        }
        let estimate = ((time - self.start_time) / self.dt).floor();
        let mut local = if estimate >= last as f64 {
            last
        } else {
            estimate.max(0.0) as usize
        };
        while local < last && self.time_at(local + 1) <= time {
            local += 1;
        }
        while local > 0 && self.time_at(local) > time {
            local -= 1;
        }
        local
    }
}

/// Totally ordered f64 map key
#[derive(Debug, Clone, Copy)]
struct TimeKey(f64);

impl PartialEq for TimeKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(&other.0) == Ordering::Equal
    }
}

impl Eq for TimeKey {}

impl PartialOrd for TimeKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimeKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Piecewise constant-step time series
#[derive(Debug, Clone, Default)]
pub struct TimeSeriesBlock {
    blocks: Vec<DataBlock>,
    by_start_index: BTreeMap<usize, usize>,
    by_start_time: BTreeMap<TimeKey, usize>,
    len: usize,
}

impl TimeSeriesBlock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of constant-step blocks stored
    pub fn num_blocks(&self) -> usize {
        self.blocks.len()
    }

    pub fn blocks(&self) -> &[DataBlock] {
        &self.blocks
    }

    fn open_block(&mut self, index: usize, time: f64) {
        let slot = self.blocks.len();
        self.blocks.push(DataBlock::new(index, time));
        self.by_start_index.insert(index, slot);
        self.by_start_time.insert(TimeKey(time), slot);
    }

    fn block_for_index(&self, index: usize) -> Option<&DataBlock> {
        self.by_start_index
            .range(..=index)
            .next_back()
            .map(|(_, &slot)| &self.blocks[slot])
    }
}

impl TimeSeries for TimeSeriesBlock {
    fn set_value(&mut self, index: usize, time: f64) {
        debug_assert_eq!(index, self.len, "time series only supports appending");
        debug_assert!(
            self.len == 0 || time >= self.value(self.len - 1),
            "time went backwards at index {}",
            index
        );

        match self.blocks.last_mut() {
            Some(block) if block.accepts(time) => {
                if block.len == 1 {
                    block.dt = time - block.start_time;
                }
                block.len += 1;
            }
            _ => self.open_block(index, time),
        }
        self.len += 1;
    }

    fn value(&self, index: usize) -> f64 {
        let index = index.min(self.len.saturating_sub(1));
        match self.block_for_index(index) {
            Some(block) => block.time_at(index - block.start_index),
            None => 0.0,
        }
    }

    fn len(&self) -> usize {
        self.len
    }

    fn find_time_index(&self, time: f64) -> usize {
        if self.len == 0 || time.is_nan() {
            return 0;
        }
        match self.by_start_time.range(..=TimeKey(time)).next_back() {
            Some((_, &slot)) => {
                let block = &self.blocks[slot];
                block.start_index + block.local_index(time)
            }
            None => 0,
        }
    }
}
