//! Three-state chain of a digital (on/off) curve
//!
//! Each loaded column is classified as off, on, or transitional (the column
//! holds both levels). Consecutive columns in the same state coalesce into one
//! [`SignalRun`]; a state change closes the run. A run holds its level until
//! the next run starts, so columns without samples never break the curve. Only
//! a gap (non-finite data) does.

use super::{Columns, CurveGeometry};
use crate::axis::AxisTransform;
use crate::types::{DataValue, PixelPoint};

/// Values at or above this are "on"
pub const SIGNAL_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalState {
    Off,
    On,
    /// Both levels inside one column
    Transitional,
}

impl SignalState {
    /// Classify a column aggregate; `None` for a gap
    pub fn from_value(value: DataValue) -> Option<Self> {
        if value.is_gap() {
            return None;
        }
        let range = value.as_hilo();
        Some(if range.lo() >= SIGNAL_THRESHOLD {
            SignalState::On
        } else if range.hi() < SIGNAL_THRESHOLD {
            SignalState::Off
        } else {
            SignalState::Transitional
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalRun {
    pub state: SignalState,
    pub first_column: i64,
    pub last_column: i64,
    /// A vertical off/on edge is drawn where the run starts
    pub edge_before: bool,
    /// The run follows a gap and does not continue its predecessor
    pub after_gap: bool,
}

#[derive(Debug, Clone, Default)]
pub struct SignalChain {
    runs: Vec<SignalRun>,
    pending_gap: bool,
}

impl SignalChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn runs(&self) -> &[SignalRun] {
        &self.runs
    }

    /// Append the aggregate of `column`; columns must increase
    pub fn push(&mut self, column: i64, value: DataValue) {
        let Some(state) = SignalState::from_value(value) else {
            self.pending_gap = true;
            return;
        };
        let after_gap = std::mem::take(&mut self.pending_gap);

        if let Some(run) = self.runs.last_mut() {
            if !after_gap && run.state == state {
                run.last_column = column;
                return;
            }
        }
        let edge_before = !after_gap
            && state != SignalState::Transitional
            && self
                .runs
                .last()
                .map_or(false, |r| r.state != SignalState::Transitional);
        self.runs.push(SignalRun {
            state,
            first_column: column,
            last_column: column,
            edge_before,
            after_gap,
        });
    }

    pub(crate) fn geometry(&self, columns: &Columns, y: &AxisTransform) -> CurveGeometry {
        let mut geometry = CurveGeometry {
            node_count: self.runs.len(),
            ..Default::default()
        };
        let y_off = y.pixel_from_value(0.0);
        let y_on = y.pixel_from_value(1.0);
        let (x_min, x_max) = (columns.left(0), columns.left(columns.width() as i64));

        for (i, run) in self.runs.iter().enumerate() {
            let end_column = match self.runs.get(i + 1) {
                Some(next) if !next.after_gap => next.first_column,
                _ => run.last_column + 1,
            };
            let x_start = columns.left(run.first_column).clamp(x_min, x_max);
            let x_end = columns.left(end_column).clamp(x_min, x_max);
            if x_end <= x_start {
                continue;
            }

            match run.state {
                SignalState::Off | SignalState::On => {
                    let level = if run.state == SignalState::On { y_on } else { y_off };
                    geometry
                        .segments
                        .push((PixelPoint::new(x_start, level), PixelPoint::new(x_end, level)));
                }
                SignalState::Transitional => {
                    geometry.fills.push((
                        PixelPoint::new(x_start, y_on.min(y_off)),
                        PixelPoint::new(x_end, y_on.max(y_off)),
                    ));
                }
            }
            if run.edge_before {
                geometry
                    .segments
                    .push((PixelPoint::new(x_start, y_off), PixelPoint::new(x_start, y_on)));
            }
        }
        geometry
    }
}
