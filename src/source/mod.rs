//! Data sources feeding the scope
//!
//! A data source is a set of rows (signals), each a sequence of samples with
//! its own time axis. The painters only talk to the [`DataSource`] trait, so
//! hosts can plug in their own storage; [`DataContainer`] is the in-memory
//! implementation used by the demo, the tests and the benches.
//!
//! # Main Types
//!
//! - [`DataSource`] - Read interface used by the loaders and diagrams
//! - [`ContainerId`] - Identity of a container, changes when the data is replaced
//! - [`DataContainer`] - Multi-row in-memory storage
//! - [`SignalPattern`] - Synthetic waveforms for demos and tests
//!
//! # Interval Semantics
//!
//! [`DataSource::data_value_in_interval`] aggregates the samples whose time lies
//! in the half-open interval `(t_start, t_stop]`. Adjacent pixel columns
//! therefore never share a sample.

pub mod container;
pub mod generator;
pub mod summary;

pub use container::DataContainer;
pub use generator::{SignalGenerator, SignalPattern};
pub use summary::MinMaxSummary;

use crate::error::{Result, ScopeError};
use crate::types::{ContainerStatus, DataValue, HiLoData};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Global counter for generating unique container IDs
static NEXT_CONTAINER_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a data container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContainerId(u64);

impl ContainerId {
    /// Allocate a fresh, never reused id
    pub fn next() -> Self {
        ContainerId(NEXT_CONTAINER_ID.fetch_add(1, Ordering::SeqCst))
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// Read access to multi-row time-series data
#[cfg_attr(test, mockall::automock)]
pub trait DataSource: Send + Sync {
    fn container_id(&self) -> ContainerId;

    fn row_count(&self) -> usize;

    /// Index of the last sample of `row`, `None` while the row is empty
    fn maximum_time_index(&self, row: usize) -> Option<usize>;

    /// Timestamp of sample `index` of `row`
    fn time_value(&self, index: usize, row: usize) -> f64;

    /// Sample value
    fn value(&self, row: usize, index: usize) -> f64;

    /// Greatest index of `row` whose time is `<= time`, clamped to the valid range
    fn find_time_index(&self, time: f64, row: usize) -> usize;

    /// Min/max of samples `first..=last` of `row`; `HiLoData::EMPTY` if none is finite
    fn value_range(&self, row: usize, first: usize, last: usize) -> HiLoData;

    /// Min/max over all samples of `row`
    fn absolute_min_max(&self, row: usize) -> Option<HiLoData>;

    fn status(&self) -> ContainerStatus;

    fn signal_name(&self, row: usize) -> String;

    /// Aggregate the samples of `row` with time in `(t_start, t_stop]`.
    ///
    /// `None` if there is no sample in the interval, a scalar for exactly one
    /// sample and an envelope otherwise.
    fn data_value_in_interval(&self, t_start: f64, t_stop: f64, row: usize) -> Option<DataValue> {
        let (first, last) = samples_in_interval(self, t_start, t_stop, row)?;
        if first == last {
            Some(DataValue::Scalar(self.value(row, first)))
        } else {
            Some(DataValue::Envelope(self.value_range(row, first, last)))
        }
    }
}

/// Index range `first..=last` of the samples of `row` with time in `(t_start, t_stop]`
pub fn samples_in_interval<S: DataSource + ?Sized>(
    source: &S,
    t_start: f64,
    t_stop: f64,
    row: usize,
) -> Option<(usize, usize)> {
    if !(t_stop > t_start) {
        return None;
    }
    let max = source.maximum_time_index(row)?;
    let first = if source.time_value(0, row) > t_start {
        0
    } else {
        source.find_time_index(t_start, row) + 1
    };
    let stop = source.find_time_index(t_stop, row);
    if source.time_value(stop, row) > t_stop || first > stop || first > max {
        return None;
    }
    Some((first, stop))
}

/// A container shared between the producer, the UI and the update worker
pub type SharedContainer = Arc<RwLock<DataContainer>>;

/// Read-lock a shared container
pub fn read_shared(container: &SharedContainer) -> Result<RwLockReadGuard<'_, DataContainer>> {
    container
        .read()
        .map_err(|e| ScopeError::poisoned("data container", e))
}

/// Write-lock a shared container
pub fn write_shared(container: &SharedContainer) -> Result<RwLockWriteGuard<'_, DataContainer>> {
    container
        .write()
        .map_err(|e| ScopeError::poisoned("data container", e))
}
