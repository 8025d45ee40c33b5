//! Curve rendering: decimation, simplification and painting
//!
//! Everything between a [`DataSource`](crate::source::DataSource) and the
//! pixels on screen. A [`CurvePainter`] asks its [`DataLoader`] which pixel
//! columns need (re)loading, aggregates each column into one node of a
//! [`PixelChain`] (or one state of a [`SignalChain`] for digital curves) and
//! turns the chain into an immutable [`CurveGeometry`] that any
//! [`RenderSurface`] can draw.
//!
//! # Main Types
//!
//! - [`RenderSurface`] - Drawing primitives the geometry is painted with
//! - [`CurveGeometry`] - Decimated, simplified drawable snapshot of one curve
//! - [`CurvePainter`] - Loader + chain orchestration for one curve
//! - [`DataLoader`] - Viewport-diff reload decisions
//! - [`EguiSurface`] - [`RenderSurface`] on top of an `egui::Painter`
//!
//! # Columns
//!
//! Column `c` of an X axis covers the times in
//! `(value_from_pixel(origin + c), value_from_pixel(origin + c + 1)]`, so a
//! `W` pixel wide axis has columns `0..W` and no sample falls into two of them.

pub mod curve_painter;
pub mod data_loader;
pub mod egui_surface;
pub mod pixel_chain;
pub mod signal_chain;
pub mod simplify;

pub use curve_painter::CurvePainter;
pub use data_loader::{DataLoader, Extent, LoadRequest};
pub use egui_surface::EguiSurface;
pub use pixel_chain::{NodeKind, PixelChain, PixelNode};
pub use signal_chain::{SignalChain, SignalRun, SignalState};

use crate::axis::AxisTransform;
use crate::config::{CurveSettings, SymbolShape};
use crate::types::{PixelPoint, Rgba};

/// Drawing primitives needed to paint curves, grids and labels
#[cfg_attr(test, mockall::automock)]
pub trait RenderSurface {
    /// Open polyline through `points`
    fn polyline(&mut self, points: &[PixelPoint], color: Rgba, width: f32);

    fn segment(&mut self, from: PixelPoint, to: PixelPoint, color: Rgba, width: f32);

    /// Sample marker centered on `at`
    fn marker(&mut self, at: PixelPoint, shape: SymbolShape, size: f32, color: Rgba);

    fn filled_rect(&mut self, min: PixelPoint, max: PixelPoint, color: Rgba);

    fn text(&mut self, at: PixelPoint, text: &str, color: Rgba);
}

/// Vertical min/max bar of one pixel column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    pub x: f64,
    pub top: f64,
    pub bottom: f64,
}

/// Drawable snapshot of one curve, in device pixels
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CurveGeometry {
    /// Joined runs of nodes
    pub polylines: Vec<Vec<PixelPoint>>,
    /// Envelopes drawn on their own
    pub bars: Vec<Bar>,
    /// Isolated single points
    pub dots: Vec<PixelPoint>,
    /// Straight pieces of digital curves (levels and edges)
    pub segments: Vec<(PixelPoint, PixelPoint)>,
    /// Transitional areas of digital curves, as `(min, max)` corners
    pub fills: Vec<(PixelPoint, PixelPoint)>,
    /// Exact sample positions for the marker overlay
    pub symbols: Vec<PixelPoint>,
    /// Chain nodes the geometry was built from
    pub node_count: usize,
}

/// Alpha applied to the fill of transitional signal areas
const FILL_ALPHA: u8 = 96;

impl CurveGeometry {
    pub fn is_empty(&self) -> bool {
        self.polylines.is_empty()
            && self.bars.is_empty()
            && self.dots.is_empty()
            && self.segments.is_empty()
            && self.fills.is_empty()
    }

    /// Number of vertices over all polylines
    pub fn vertex_count(&self) -> usize {
        self.polylines.iter().map(Vec::len).sum()
    }

    /// Paint with the colors and marker settings of `settings`
    pub fn paint(&self, surface: &mut dyn RenderSurface, settings: &CurveSettings) {
        let color = settings.color;
        let width = settings.line_width;

        for (min, max) in &self.fills {
            let [r, g, b, _] = color;
            surface.filled_rect(*min, *max, [r, g, b, FILL_ALPHA]);
        }
        for line in &self.polylines {
            surface.polyline(line, color, width);
        }
        for bar in &self.bars {
            surface.segment(
                PixelPoint::new(bar.x, bar.top),
                PixelPoint::new(bar.x, bar.bottom),
                color,
                width,
            );
        }
        for (from, to) in &self.segments {
            surface.segment(*from, *to, color, width);
        }
        for dot in &self.dots {
            let half = (width as f64 / 2.0).max(0.5);
            surface.filled_rect(
                PixelPoint::new(dot.x - half, dot.y - half),
                PixelPoint::new(dot.x + half, dot.y + half),
                color,
            );
        }
        if settings.show_symbols {
            for at in &self.symbols {
                surface.marker(*at, settings.symbol_shape, settings.symbol_size, color);
            }
        }
    }
}

/// Pixel columns of an X axis
#[derive(Debug, Clone, Copy)]
pub(crate) struct Columns {
    transform: AxisTransform,
    origin: f64,
    width: usize,
}

impl Columns {
    pub(crate) fn new(transform: AxisTransform, origin: f64, width: usize) -> Self {
        Self {
            transform,
            origin,
            width,
        }
    }

    pub(crate) fn width(&self) -> usize {
        self.width
    }

    /// Left pixel edge of column `c`
    pub(crate) fn left(&self, column: i64) -> f64 {
        self.origin + column as f64
    }

    pub(crate) fn center(&self, column: usize) -> f64 {
        self.origin + column as f64 + 0.5
    }

    /// Time interval `(start, stop]` covered by column `c`
    pub(crate) fn interval(&self, column: usize) -> (f64, f64) {
        (
            self.transform.value_from_pixel(self.left(column as i64)),
            self.transform.value_from_pixel(self.left(column as i64 + 1)),
        )
    }

    /// Visible time range `(start, stop]`
    pub(crate) fn visible(&self) -> (f64, f64) {
        (
            self.transform.value_from_pixel(self.origin),
            self.transform.value_from_pixel(self.origin + self.width as f64),
        )
    }

    pub(crate) fn pixel(&self, time: f64) -> f64 {
        self.transform.pixel_from_value(time)
    }

    /// Column whose interval should hold `time`, clamped to `0..width`
    pub(crate) fn column_of(&self, time: f64) -> usize {
        let offset = self.pixel(time) - self.origin;
        let column = offset.ceil() - 1.0;
        if !(column > 0.0) {
            0
        } else {
            (column as usize).min(self.width.saturating_sub(1))
        }
    }
}
