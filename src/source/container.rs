//! In-memory multi-row data container

use super::{ContainerId, DataSource, MinMaxSummary};
use crate::axis::limits::sanitize;
use crate::axis::nice_scale::nice_limits;
use crate::error::{Result, ScopeError};
use crate::series::{TimeSeries, TimeSeriesKind};
use crate::types::{ContainerStatus, HiLoData};

/// One signal: samples, their time axis and running statistics
#[derive(Debug)]
struct Row {
    name: String,
    values: Vec<f32>,
    time: Box<dyn TimeSeries>,
    summary: MinMaxSummary,
    absolute: Option<HiLoData>,
}

impl Row {
    fn new(name: String, kind: TimeSeriesKind) -> Self {
        Self {
            name,
            values: Vec::new(),
            time: kind.create(),
            summary: MinMaxSummary::new(),
            absolute: None,
        }
    }

    fn push(&mut self, value: f32, time: f64) {
        let index = self.values.len();
        self.time.set_value(index, time);
        self.values.push(value);
        self.summary.push(index, value as f64);
        if value.is_finite() {
            self.absolute = Some(HiLoData::merge_from_value(self.absolute, value as f64));
        }
    }

    fn last_time(&self) -> Option<f64> {
        self.time.maximum_index().map(|i| self.time.value(i))
    }
}

/// Rows of `f32` samples, each with its own time series.
///
/// Producers append with [`insert_values_at_end`](Self::insert_values_at_end)
/// (one sample per row at a shared time) or
/// [`insert_value_at_end`](Self::insert_value_at_end) (one row).
#[derive(Debug)]
pub struct DataContainer {
    id: ContainerId,
    rows: Vec<Row>,
    kind: TimeSeriesKind,
    status: ContainerStatus,
}

impl DataContainer {
    /// Container with `row_count` unnamed rows
    pub fn new(row_count: usize, kind: TimeSeriesKind) -> Self {
        let names = (0..row_count).map(|i| format!("signal {}", i));
        Self::with_signal_names(names, kind)
    }

    pub fn with_signal_names<I, S>(names: I, kind: TimeSeriesKind) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: ContainerId::next(),
            rows: names.into_iter().map(|n| Row::new(n.into(), kind)).collect(),
            kind,
            status: ContainerStatus::NotStarted,
        }
    }

    pub fn id(&self) -> ContainerId {
        self.id
    }

    pub fn set_status(&mut self, status: ContainerStatus) {
        if status != self.status {
            tracing::debug!("Container {:?}: {:?} -> {:?}", self.id, self.status, status);
        }
        self.status = status;
    }

    pub fn set_signal_name(&mut self, row: usize, name: impl Into<String>) -> Result<()> {
        let rows = self.rows.len();
        let r = self
            .rows
            .get_mut(row)
            .ok_or(ScopeError::InvalidRow { row, rows })?;
        r.name = name.into();
        Ok(())
    }

    /// Append one sample to every row at `time`
    pub fn insert_values_at_end(&mut self, values: &[f32], time: f64) -> Result<()> {
        if values.len() != self.rows.len() {
            return Err(ScopeError::InvalidData(format!(
                "expected {} values, got {}",
                self.rows.len(),
                values.len()
            )));
        }
        for row in 0..self.rows.len() {
            self.check_append_time(row, time)?;
        }
        for (row, &v) in self.rows.iter_mut().zip(values) {
            row.push(v, time);
        }
        if self.status == ContainerStatus::NotStarted {
            self.set_status(ContainerStatus::Running);
        }
        Ok(())
    }

    /// Append one sample to `row` at `time`
    pub fn insert_value_at_end(&mut self, row: usize, value: f32, time: f64) -> Result<()> {
        self.check_append_time(row, time)?;
        self.rows[row].push(value, time);
        if self.status == ContainerStatus::NotStarted {
            self.set_status(ContainerStatus::Running);
        }
        Ok(())
    }

    fn check_append_time(&self, row: usize, time: f64) -> Result<()> {
        let r = self.rows.get(row).ok_or(ScopeError::InvalidRow {
            row,
            rows: self.rows.len(),
        })?;
        if !time.is_finite() {
            return Err(ScopeError::InvalidData(format!("non-finite time {}", time)));
        }
        if let Some(last) = r.last_time() {
            if time < last {
                return Err(ScopeError::InvalidData(format!(
                    "time {} before last sample {} in row {}",
                    time, last, row
                )));
            }
        }
        Ok(())
    }

    /// Drop all samples but keep the identity, as a restarted producer would
    pub fn clear(&mut self) {
        for row in self.rows.iter_mut() {
            *row = Row::new(std::mem::take(&mut row.name), self.kind);
        }
        self.status = ContainerStatus::NotStarted;
        tracing::debug!("Container {:?} cleared", self.id);
    }

    /// First and last timestamp over all rows
    pub fn time_range(&self) -> Option<HiLoData> {
        let mut range: Option<HiLoData> = None;
        for row in &self.rows {
            if let Some(last) = row.time.maximum_index() {
                let r = HiLoData::new(row.time.value(0), row.time.value(last));
                range = Some(range.map_or(r, |acc| HiLoData::merge(acc, r)));
            }
        }
        range
    }

    /// Upper end of the nice-scaled time range, for fitting the x axis.
    ///
    /// A single-instant range is widened the same way axis limits are.
    pub fn nice_maximum_x_value(&self) -> Option<f64> {
        self.time_range()
            .map(|range| nice_limits(sanitize(range)).hi())
    }

    /// Number of samples in `row`
    pub fn row_len(&self, row: usize) -> usize {
        self.rows.get(row).map_or(0, |r| r.values.len())
    }
}

impl DataSource for DataContainer {
    fn container_id(&self) -> ContainerId {
        self.id
    }

    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn maximum_time_index(&self, row: usize) -> Option<usize> {
        self.rows.get(row)?.time.maximum_index()
    }

    fn time_value(&self, index: usize, row: usize) -> f64 {
        self.rows.get(row).map_or(f64::NAN, |r| r.time.value(index))
    }

    fn value(&self, row: usize, index: usize) -> f64 {
        self.rows
            .get(row)
            .and_then(|r| r.values.get(index))
            .map_or(f64::NAN, |&v| v as f64)
    }

    fn find_time_index(&self, time: f64, row: usize) -> usize {
        self.rows.get(row).map_or(0, |r| r.time.find_time_index(time))
    }

    fn value_range(&self, row: usize, first: usize, last: usize) -> HiLoData {
        match self.rows.get(row) {
            Some(r) => r.summary.query(&r.values, first, last),
            None => HiLoData::EMPTY,
        }
    }

    fn absolute_min_max(&self, row: usize) -> Option<HiLoData> {
        self.rows.get(row)?.absolute
    }

    fn status(&self) -> ContainerStatus {
        self.status
    }

    fn signal_name(&self, row: usize) -> String {
        self.rows.get(row).map(|r| r.name.clone()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_read_back() {
        let mut c = DataContainer::with_signal_names(["u", "i"], TimeSeriesKind::Block);
        c.insert_values_at_end(&[1.0, -1.0], 0.0).unwrap();
        c.insert_values_at_end(&[2.0, -2.0], 0.1).unwrap();
        assert_eq!(c.row_count(), 2);
        assert_eq!(c.maximum_time_index(1), Some(1));
        assert_eq!(c.value(1, 1), -2.0);
        assert_eq!(c.time_value(1, 0), 0.1);
        assert_eq!(c.signal_name(0), "u");
        assert_eq!(c.signal_name(5), "");
        assert_eq!(c.status(), ContainerStatus::Running);
    }

    #[test]
    fn test_rejects_wrong_width_and_backwards_time() {
        let mut c = DataContainer::new(2, TimeSeriesKind::Array);
        assert!(matches!(
            c.insert_values_at_end(&[1.0], 0.0),
            Err(ScopeError::InvalidData(_))
        ));
        c.insert_values_at_end(&[1.0, 1.0], 1.0).unwrap();
        assert!(c.insert_values_at_end(&[1.0, 1.0], 0.5).is_err());
        assert!(matches!(
            c.insert_value_at_end(7, 1.0, 2.0),
            Err(ScopeError::InvalidRow { row: 7, rows: 2 })
        ));
        assert_eq!(c.row_len(0), 1);
    }

    #[test]
    fn test_absolute_min_max_ignores_nan() {
        let mut c = DataContainer::new(1, TimeSeriesKind::Block);
        assert_eq!(c.absolute_min_max(0), None);
        for (i, v) in [3.0f32, f32::NAN, -4.0, 10.0].into_iter().enumerate() {
            c.insert_values_at_end(&[v], i as f64).unwrap();
        }
        assert_eq!(c.absolute_min_max(0), Some(HiLoData::new(-4.0, 10.0)));
    }

    #[test]
    fn test_rows_have_independent_time_axes() {
        let mut c = DataContainer::new(2, TimeSeriesKind::Array);
        c.insert_value_at_end(0, 1.0, 0.0).unwrap();
        c.insert_value_at_end(0, 2.0, 1.0).unwrap();
        c.insert_value_at_end(1, 5.0, 0.5).unwrap();
        assert_eq!(c.maximum_time_index(0), Some(1));
        assert_eq!(c.maximum_time_index(1), Some(0));
        assert_eq!(c.time_range(), Some(HiLoData::new(0.0, 1.0)));
        assert_eq!(c.nice_maximum_x_value(), Some(1.0));
    }

    #[test]
    fn test_nice_maximum_of_single_instant() {
        let mut c = DataContainer::new(1, TimeSeriesKind::Block);
        assert_eq!(c.nice_maximum_x_value(), None);
        c.insert_values_at_end(&[1.0], 0.0).unwrap();
        assert_eq!(c.nice_maximum_x_value(), Some(1.0));

        let mut c = DataContainer::new(1, TimeSeriesKind::Array);
        c.insert_values_at_end(&[1.0], 5.0).unwrap();
        let hi = c.nice_maximum_x_value().unwrap();
        assert!((hi - 5.5).abs() < 1e-9, "got {}", hi);
    }

    #[test]
    fn test_clear_keeps_identity() {
        let mut c = DataContainer::new(1, TimeSeriesKind::Block);
        let id = c.id();
        c.insert_values_at_end(&[1.0], 0.0).unwrap();
        c.clear();
        assert_eq!(c.id(), id);
        assert_eq!(c.maximum_time_index(0), None);
        assert_eq!(c.status(), ContainerStatus::NotStarted);
        assert_eq!(c.signal_name(0), "signal 0");
    }
}
