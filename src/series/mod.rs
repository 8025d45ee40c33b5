//! Append-only time axes
//!
//! A time series maps a sample index to its timestamp. Samples are appended
//! in order and timestamps never decrease. The painters only ever ask two
//! questions: "what is the time of sample `i`" and "which sample is at or
//! before time `t`", and the latter must be sub-linear so that loading a
//! view never scans the whole history.
//!
//! # Main Types
//!
//! - [`TimeSeries`] - The trait all strategies implement
//! - [`TimeSeriesConstantDt`] - Fixed step, O(1) lookup
//! - [`TimeSeriesArray`] - Stored timestamps, interpolation search
//! - [`TimeSeriesBlock`] - Runs of constant step coalesced into blocks
//! - [`TimeSeriesKind`] - Strategy selector used by configuration

pub mod array;
pub mod block;
pub mod constant;

pub use array::TimeSeriesArray;
pub use block::TimeSeriesBlock;
pub use constant::TimeSeriesConstantDt;

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Index → timestamp mapping with fast reverse lookup
pub trait TimeSeries: Send + Sync + Debug {
    /// Append the timestamp of sample `index`.
    ///
    /// Only appending is supported: `index` must equal [`len`](Self::len) and
    /// `time` must not be smaller than the previous timestamp.
    fn set_value(&mut self, index: usize, time: f64);

    /// Timestamp of sample `index`; indices past the end are clamped
    fn value(&self, index: usize) -> f64;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Index of the last sample, `None` while empty
    fn maximum_index(&self) -> Option<usize> {
        self.len().checked_sub(1)
    }

    /// Greatest index whose timestamp is `<= time`, clamped to `[0, maximum_index]`
    fn find_time_index(&self, time: f64) -> usize;

    /// Step between the last two samples
    fn last_time_interval(&self) -> Option<f64> {
        let last = self.maximum_index()?;
        if last == 0 {
            return None;
        }
        Some(self.value(last) - self.value(last - 1))
    }
}

/// Which time series strategy a data container creates for new rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimeSeriesKind {
    /// Fixed step; appended times must follow it
    ConstantDt,
    /// Every timestamp stored
    Array,
    /// Piecewise constant step
    #[default]
    Block,
}

impl TimeSeriesKind {
    pub fn create(self) -> Box<dyn TimeSeries> {
        match self {
            TimeSeriesKind::ConstantDt => Box::new(TimeSeriesConstantDt::new()),
            TimeSeriesKind::Array => Box::new(TimeSeriesArray::new()),
            TimeSeriesKind::Block => Box::new(TimeSeriesBlock::new()),
        }
    }
}

/// Greatest index in `lo..=hi` whose time is `<= time`, by binary search.
/// Assumes `value(lo) <= time`.
pub(crate) fn binary_search_index(
    lo: usize,
    hi: usize,
    time: f64,
    value: impl Fn(usize) -> f64,
) -> usize {
    let (mut lo, mut hi) = (lo, hi);
    while lo < hi {
        let mid = lo + (hi - lo + 1) / 2;
        if value(mid) <= time {
            lo = mid;
        } else {
            hi = mid - 1;
        }
    }
    lo
}
