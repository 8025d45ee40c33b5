//! One curve: reload decisions, decimation and the published geometry
//!
//! [`CurvePainter::load_required_data`] runs on whichever thread owns the
//! painter (the update worker in a live scope). It brings the chain up to
//! date and swaps a fresh [`CurveGeometry`] into a shared slot. Painting only
//! clones the `Arc` out of that slot, so a paint never waits for a reload.

use super::data_loader::{DataLoader, Extent, LoadRequest};
use super::pixel_chain::{PixelChain, LEFT_ANCHOR_COLUMN};
use super::signal_chain::SignalChain;
use super::{Columns, CurveGeometry, RenderSurface};
use crate::axis::{Axis, AxisTransform};
use crate::config::{CurveKind, CurveSettings, RenderSettings};
use crate::source::DataSource;
use crate::types::{DataValue, PixelPoint};
use std::sync::{Arc, RwLock};

/// Latest geometry of a curve, readable from any thread
pub type GeometrySlot = Arc<RwLock<Arc<CurveGeometry>>>;

/// Aggregate of one loaded column, kept for digital curves
#[derive(Debug, Clone, Copy, PartialEq)]
struct ColumnSample {
    column: i64,
    value: DataValue,
}

#[derive(Debug)]
pub struct CurvePainter {
    row: usize,
    settings: CurveSettings,
    render: RenderSettings,
    loader: DataLoader,
    chain: PixelChain,
    signal_columns: Vec<ColumnSample>,
    slot: GeometrySlot,
}

impl CurvePainter {
    pub fn new(row: usize, settings: CurveSettings, render: RenderSettings) -> Self {
        Self {
            row,
            chain: PixelChain::new(&render),
            settings,
            render,
            loader: DataLoader::new(),
            signal_columns: Vec::new(),
            slot: Arc::new(RwLock::new(Arc::new(CurveGeometry::default()))),
        }
    }

    /// Data container row this curve shows
    pub fn row(&self) -> usize {
        self.row
    }

    pub fn settings(&self) -> &CurveSettings {
        &self.settings
    }

    /// Change display settings. A change of curve kind reloads on the next frame.
    pub fn set_settings(&mut self, settings: CurveSettings) {
        if settings.kind != self.settings.kind {
            self.loader.invalidate();
        }
        self.settings = settings;
    }

    pub fn chain(&self) -> &PixelChain {
        &self.chain
    }

    /// Handle to the published geometry, for readers on other threads
    pub fn geometry_slot(&self) -> GeometrySlot {
        Arc::clone(&self.slot)
    }

    /// The latest published geometry
    pub fn geometry(&self) -> Arc<CurveGeometry> {
        match self.slot.read() {
            Ok(geometry) => Arc::clone(&geometry),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    /// Forget what was loaded; the next load is a full reload
    pub fn invalidate(&mut self) {
        self.loader.invalidate();
    }

    /// Bring the curve up to date with `source` and the axes.
    ///
    /// Returns what was done. `force` reloads even if nothing seems to have
    /// changed, for sources that mutate samples in place.
    pub fn load_required_data<S: DataSource + ?Sized>(
        &mut self,
        source: &S,
        x_axis: &Axis,
        y_axis: &Axis,
        force: bool,
    ) -> LoadRequest {
        let request = self.loader.plan(source, self.row, x_axis, y_axis, force);
        let columns = Columns::new(
            x_axis.transform(),
            x_axis.origin().x,
            x_axis.length_px() as usize,
        );
        let y = y_axis.transform();

        let extent = match &request {
            LoadRequest::Unchanged => return LoadRequest::Unchanged,
            LoadRequest::Full(extent) => {
                self.chain.clear();
                self.signal_columns.clear();
                if let Some(index) = extent.left_anchor {
                    self.push_anchor(source, LEFT_ANCHOR_COLUMN, index, &columns, &y);
                }
                self.load_columns(source, extent.columns.clone(), &columns, &y);
                extent
            }
            LoadRequest::Extend {
                from_column,
                extent,
            } => {
                let from = *from_column as i64;
                self.chain.truncate_from(from);
                let keep = self.signal_columns.partition_point(|c| c.column < from);
                self.signal_columns.truncate(keep);
                self.load_columns(source, *from_column..extent.columns.end, &columns, &y);
                extent
            }
        };
        if let Some(index) = extent.right_anchor {
            self.push_anchor(source, columns.width() as i64, index, &columns, &y);
        }

        let geometry = self.build_geometry(source, extent, &columns, &y);
        tracing::trace!(
            "Row {} loaded: {} nodes, {} polylines",
            self.row,
            geometry.node_count,
            geometry.polylines.len()
        );
        self.publish(geometry);
        request
    }

    fn load_columns<S: DataSource + ?Sized>(
        &mut self,
        source: &S,
        range: std::ops::Range<usize>,
        columns: &Columns,
        y: &AxisTransform,
    ) {
        for column in range {
            let (t_start, t_stop) = columns.interval(column);
            if let Some(value) = source.data_value_in_interval(t_start, t_stop, self.row) {
                self.push_value(column as i64, columns.center(column), value, y);
            }
        }
    }

    fn push_anchor<S: DataSource + ?Sized>(
        &mut self,
        source: &S,
        column: i64,
        index: usize,
        columns: &Columns,
        y: &AxisTransform,
    ) {
        let x = columns.pixel(source.time_value(index, self.row));
        let value = DataValue::Scalar(source.value(self.row, index));
        match self.settings.kind {
            CurveKind::Analog => self.chain.push_anchor(column, x, value, y),
            CurveKind::Signal => self.signal_columns.push(ColumnSample { column, value }),
        }
    }

    fn push_value(&mut self, column: i64, x: f64, value: DataValue, y: &AxisTransform) {
        match self.settings.kind {
            CurveKind::Analog => self.chain.push_value(column, x, value, y),
            CurveKind::Signal => self.signal_columns.push(ColumnSample { column, value }),
        }
    }

    fn build_geometry<S: DataSource + ?Sized>(
        &self,
        source: &S,
        extent: &Extent,
        columns: &Columns,
        y: &AxisTransform,
    ) -> CurveGeometry {
        let mut geometry = match self.settings.kind {
            CurveKind::Analog => self.chain.geometry(),
            CurveKind::Signal => {
                let mut chain = SignalChain::new();
                for sample in &self.signal_columns {
                    chain.push(sample.column, sample.value);
                }
                chain.geometry(columns, y)
            }
        };
        if self.settings.show_symbols {
            geometry.symbols = self.symbol_positions(source, extent, columns, y);
        }
        geometry
    }

    /// Exact positions of every n-th visible sample
    fn symbol_positions<S: DataSource + ?Sized>(
        &self,
        source: &S,
        extent: &Extent,
        columns: &Columns,
        y: &AxisTransform,
    ) -> Vec<PixelPoint> {
        let Some(max) = source.maximum_time_index(self.row) else {
            return Vec::new();
        };
        if extent.columns.is_empty() {
            return Vec::new();
        }
        let first = extent.left_anchor.map_or(0, |i| i + 1);
        let last = extent
            .right_anchor
            .map_or(max, |i| i.saturating_sub(1))
            .min(max);
        if first > last {
            return Vec::new();
        }
        let cap = self.render.symbol_cap_factor * columns.width();
        (first..=last)
            .step_by(self.settings.symbol_skip.max(1))
            .take(cap)
            .filter_map(|i| {
                let v = source.value(self.row, i);
                v.is_finite().then(|| {
                    PixelPoint::new(columns.pixel(source.time_value(i, self.row)), y.pixel_from_value(v))
                })
            })
            .collect()
    }

    fn publish(&self, geometry: CurveGeometry) {
        let geometry = Arc::new(geometry);
        match self.slot.write() {
            Ok(mut slot) => *slot = geometry,
            Err(poisoned) => {
                tracing::warn!("Geometry slot of row {} was poisoned, replacing", self.row);
                *poisoned.into_inner() = geometry;
            }
        }
    }

    /// Draw the latest geometry
    pub fn paint_component(&self, surface: &mut dyn RenderSurface) {
        self.geometry().paint(surface, &self.settings);
    }
}
