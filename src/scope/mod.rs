//! Diagrams and the scope that groups them
//!
//! A [`Diagram`] is one plot area: an x axis, a left and a right y axis, and
//! the curves drawn against them. A [`Scope`] is a stack of diagrams that
//! share one data source and one time range.
//!
//! # Main Types
//!
//! - [`Diagram`] - Axes, curves, layout, fitting and painting of one plot
//! - [`Scope`] - All diagrams of a view
//! - [`AxisConnection`] - Which y axis a curve is drawn against
//! - [`DiagramFrame`] / [`ScopeFrame`] - Immutable snapshots handed to the UI
//! - [`ScopeWorker`] - Background update loop (see [`worker`])

pub mod worker;

pub use worker::{ScopeCommand, ScopeHandle, ScopeWorker};

use crate::axis::{Axis, AxisScale, Direction, Tick};
use crate::config::{CurveSettings, RenderSettings, ScopeConfig};
use crate::render::{CurveGeometry, CurvePainter, LoadRequest, RenderSurface};
use crate::source::DataSource;
use crate::types::{HiLoData, PaletteCursor, PixelPoint, Rgba};
use std::sync::Arc;

/// Space left of the plot for y1 labels
pub const MARGIN_LEFT: u32 = 60;
/// Space right of the plot for y2 labels
pub const MARGIN_RIGHT: u32 = 60;
pub const MARGIN_TOP: u32 = 10;
/// Space below the plot for x labels
pub const MARGIN_BOTTOM: u32 = 30;

const LABEL_COLOR: Rgba = [200, 200, 200, 255];

/// The y axis a curve is drawn against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxisConnection {
    /// Not drawn
    None,
    #[default]
    Y1,
    Y2,
}

/// A curve placed in a diagram
#[derive(Debug)]
pub struct Curve {
    pub painter: CurvePainter,
    pub connection: AxisConnection,
    /// Samples may be rewritten in place; reload on every update
    pub external: bool,
}

/// One plot area
#[derive(Debug)]
pub struct Diagram {
    pub x_axis: Axis,
    pub y1_axis: Axis,
    pub y2_axis: Axis,
    curves: Vec<Curve>,
    render: RenderSettings,
    size: (u32, u32),
}

impl Default for Diagram {
    fn default() -> Self {
        Self::new(&ScopeConfig::default())
    }
}

impl Diagram {
    /// Empty diagram with axis defaults from `config`
    pub fn new(config: &ScopeConfig) -> Self {
        let make_axis = |direction| {
            let mut axis = Axis::with_limits(
                direction,
                crate::axis::AxisLimits::with_history_depth(config.history_depth),
            );
            axis.tick_settings = config.axis_ticks.clone();
            axis.grid_settings = config.axis_grid.clone();
            axis
        };
        let mut diagram = Self {
            x_axis: make_axis(Direction::X),
            y1_axis: make_axis(Direction::Y),
            y2_axis: make_axis(Direction::Y),
            curves: Vec::new(),
            render: config.render.clone(),
            size: (0, 0),
        };
        diagram.set_axis_positions(
            MARGIN_LEFT + MARGIN_RIGHT + 1,
            MARGIN_TOP + MARGIN_BOTTOM + 1,
        );
        diagram
    }

    /// Add a curve for `row`, taking its color from `palette`. Returns the curve index.
    pub fn add_curve(
        &mut self,
        row: usize,
        connection: AxisConnection,
        settings: CurveSettings,
        palette: &mut PaletteCursor,
    ) -> usize {
        let settings = settings.with_color(palette.next_color());
        self.curves.push(Curve {
            painter: CurvePainter::new(row, settings, self.render.clone()),
            connection,
            external: false,
        });
        self.curves.len() - 1
    }

    pub fn curves(&self) -> &[Curve] {
        &self.curves
    }

    pub fn curves_mut(&mut self) -> &mut [Curve] {
        &mut self.curves
    }

    /// Diagram size in pixels, margins included
    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    /// Lay the axes out for a `width` x `height` pixel area
    pub fn set_axis_positions(&mut self, width: u32, height: u32) {
        let plot_width = width.saturating_sub(MARGIN_LEFT + MARGIN_RIGHT).max(1);
        let plot_height = height.saturating_sub(MARGIN_TOP + MARGIN_BOTTOM).max(1);
        let left = MARGIN_LEFT as f64;
        let bottom = (MARGIN_TOP + plot_height) as f64;

        self.x_axis.set_origin(PixelPoint::new(left, bottom));
        self.x_axis.set_length_px(plot_width);
        self.y1_axis.set_origin(PixelPoint::new(left, bottom));
        self.y1_axis.set_length_px(plot_height);
        self.y2_axis
            .set_origin(PixelPoint::new(left + plot_width as f64, bottom));
        self.y2_axis.set_length_px(plot_height);
        self.size = (width, height);
    }

    /// Whether `pixel` lies inside the plot area
    pub fn contains(&self, pixel: PixelPoint) -> bool {
        let (x0, x1) = self.x_axis.pixel_span();
        let (y0, y1) = self.y1_axis.pixel_span();
        x0 <= pixel.x && pixel.x <= x1 && y1 <= pixel.y && pixel.y <= y0
    }

    fn y_axis(&self, connection: AxisConnection) -> Option<&Axis> {
        match connection {
            AxisConnection::None => None,
            AxisConnection::Y1 => Some(&self.y1_axis),
            AxisConnection::Y2 => Some(&self.y2_axis),
        }
    }

    /// Fit both y axes to the absolute min/max of their curves' rows.
    ///
    /// Returns whether any axis mapping changed.
    pub fn fit_y_ranges_from_global_data<S: DataSource + ?Sized>(
        &mut self,
        source: &S,
        nice: bool,
    ) -> bool {
        let mut changed = false;
        for connection in [AxisConnection::Y1, AxisConnection::Y2] {
            let range = HiLoData::merged_from_iter(
                self.curves
                    .iter()
                    .filter(|c| c.connection == connection)
                    .filter_map(|c| source.absolute_min_max(c.painter.row())),
            );
            let Some(range) = range else {
                continue;
            };
            let axis = match connection {
                AxisConnection::Y2 => &mut self.y2_axis,
                _ => &mut self.y1_axis,
            };
            let before = axis.axis_hash();
            axis.axis_limits_mut().set_global_auto_scale_values(range);
            axis.set_nice_scale(nice);
            axis.axis_limits_mut().global_fit();
            changed |= axis.axis_hash() != before;
        }
        changed
    }

    /// Fit the x axis to `[start, end]`
    pub fn fit_x_range(&mut self, range: HiLoData, nice: bool) -> bool {
        let before = self.x_axis.axis_hash();
        self.x_axis.axis_limits_mut().set_global_auto_scale_values(range);
        self.x_axis.set_nice_scale(nice);
        self.x_axis.axis_limits_mut().global_fit();
        self.x_axis.axis_hash() != before
    }

    /// Update every connected curve from `source`. Returns how many curves reloaded.
    pub fn load_data_from_container<S: DataSource + ?Sized>(
        &mut self,
        source: &S,
        force: bool,
    ) -> usize {
        let mut loaded = 0;
        for curve in &mut self.curves {
            let y_axis = match curve.connection {
                AxisConnection::None => continue,
                AxisConnection::Y1 => &self.y1_axis,
                AxisConnection::Y2 => &self.y2_axis,
            };
            let request =
                curve
                    .painter
                    .load_required_data(source, &self.x_axis, y_axis, force || curve.external);
            if request != LoadRequest::Unchanged {
                loaded += 1;
            }
        }
        loaded
    }

    /// Undo the last zoom on all axes
    pub fn pop_history_stack(&mut self) {
        self.x_axis.pop_history_stack();
        self.y1_axis.pop_history_stack();
        self.y2_axis.pop_history_stack();
    }

    /// Snapshot for painting on another thread
    pub fn frame(&self) -> DiagramFrame {
        DiagramFrame {
            size: self.size,
            plot_min: PixelPoint::new(self.x_axis.pixel_span().0, self.y1_axis.pixel_span().1),
            plot_max: PixelPoint::new(self.x_axis.pixel_span().1, self.y1_axis.pixel_span().0),
            x_limits: self.x_axis.limits(),
            y1_limits: self.y1_axis.limits(),
            y2_limits: self.y2_axis.limits(),
            x_ticks: self.x_axis.ticks(),
            y1_ticks: self.y1_axis.ticks(),
            x_grid: self.x_axis.grid_settings.clone(),
            y_grid: self.y1_axis.grid_settings.clone(),
            y1_zero_line: self
                .y1_axis
                .zero_line_pixel()
                .filter(|_| self.y1_axis.scale() == AxisScale::Linear),
            curves: self
                .curves
                .iter()
                .filter(|c| self.y_axis(c.connection).is_some())
                .map(|c| CurveFrame {
                    row: c.painter.row(),
                    settings: c.painter.settings().clone(),
                    geometry: c.painter.geometry(),
                })
                .collect(),
        }
    }

    /// Grid, zero line, curves and labels
    pub fn paint(&self, surface: &mut dyn RenderSurface) {
        self.frame().paint(surface);
    }
}

/// Geometry and look of one curve at one point in time
#[derive(Debug, Clone)]
pub struct CurveFrame {
    pub row: usize,
    pub settings: CurveSettings,
    pub geometry: Arc<CurveGeometry>,
}

/// Everything needed to paint one diagram
#[derive(Debug, Clone)]
pub struct DiagramFrame {
    pub size: (u32, u32),
    pub plot_min: PixelPoint,
    pub plot_max: PixelPoint,
    pub x_limits: HiLoData,
    pub y1_limits: HiLoData,
    pub y2_limits: HiLoData,
    pub x_ticks: Vec<Tick>,
    pub y1_ticks: Vec<Tick>,
    pub x_grid: crate::config::AxisGridSettings,
    pub y_grid: crate::config::AxisGridSettings,
    pub y1_zero_line: Option<f64>,
    pub curves: Vec<CurveFrame>,
}

impl DiagramFrame {
    pub fn paint(&self, surface: &mut dyn RenderSurface) {
        let (min, max) = (self.plot_min, self.plot_max);

        for tick in &self.x_ticks {
            if let Some(color) = grid_color(&self.x_grid, tick) {
                surface.segment(
                    PixelPoint::new(tick.pixel, min.y),
                    PixelPoint::new(tick.pixel, max.y),
                    color,
                    1.0,
                );
            }
        }
        for tick in &self.y1_ticks {
            if let Some(color) = grid_color(&self.y_grid, tick) {
                surface.segment(
                    PixelPoint::new(min.x, tick.pixel),
                    PixelPoint::new(max.x, tick.pixel),
                    color,
                    1.0,
                );
            }
        }
        if let Some(y) = self.y1_zero_line.filter(|_| self.y_grid.show_zero_line) {
            surface.segment(
                PixelPoint::new(min.x, y),
                PixelPoint::new(max.x, y),
                self.y_grid.color_zero_line,
                1.0,
            );
        }

        for curve in &self.curves {
            curve.geometry.paint(surface, &curve.settings);
        }

        for tick in self.x_ticks.iter().filter(|t| t.is_major()) {
            surface.text(PixelPoint::new(tick.pixel, max.y + 4.0), &tick.label, LABEL_COLOR);
        }
        for tick in self.y1_ticks.iter().filter(|t| t.is_major()) {
            surface.text(PixelPoint::new(min.x - 30.0, tick.pixel - 6.0), &tick.label, LABEL_COLOR);
        }
    }
}

fn grid_color(grid: &crate::config::AxisGridSettings, tick: &Tick) -> Option<Rgba> {
    match (tick.is_major(), grid.show_major, grid.show_minor) {
        (true, true, _) => Some(grid.color_major),
        (false, _, true) => Some(grid.color_minor),
        _ => None,
    }
}

/// Snapshot of all diagrams
#[derive(Debug, Clone, Default)]
pub struct ScopeFrame {
    /// Increases with every published frame
    pub sequence: u64,
    pub diagrams: Vec<DiagramFrame>,
}

/// Diagrams sharing one data source and one time range
#[derive(Debug, Default)]
pub struct Scope {
    diagrams: Vec<Diagram>,
    palette: PaletteCursor,
    config: ScopeConfig,
}

impl Scope {
    pub fn new(config: ScopeConfig) -> Self {
        Self {
            diagrams: Vec::new(),
            palette: PaletteCursor::new(),
            config,
        }
    }

    pub fn config(&self) -> &ScopeConfig {
        &self.config
    }

    /// Append an empty diagram, returning its index
    pub fn add_diagram(&mut self) -> usize {
        self.diagrams.push(Diagram::new(&self.config));
        self.diagrams.len() - 1
    }

    /// Add a curve for `row` to diagram `diagram` with the configured curve defaults
    pub fn add_curve(&mut self, diagram: usize, row: usize, connection: AxisConnection) -> Option<usize> {
        let settings = self.config.curve.clone();
        let target = self.diagrams.get_mut(diagram)?;
        Some(target.add_curve(row, connection, settings, &mut self.palette))
    }

    pub fn diagrams(&self) -> &[Diagram] {
        &self.diagrams
    }

    pub fn diagram_mut(&mut self, index: usize) -> Option<&mut Diagram> {
        self.diagrams.get_mut(index)
    }

    /// Give every diagram the same pixel size
    pub fn set_size(&mut self, width: u32, height: u32) {
        for diagram in &mut self.diagrams {
            diagram.set_axis_positions(width, height);
        }
    }

    /// Fit all x axes to the simulated time range
    pub fn set_simulation_time_boundaries(&mut self, start: f64, end: f64, nice: bool) {
        if !(start.is_finite() && end.is_finite()) || end < start {
            tracing::warn!("Ignoring invalid time boundaries ({}, {})", start, end);
            return;
        }
        for diagram in &mut self.diagrams {
            diagram.fit_x_range(HiLoData::new(start, end), nice);
        }
    }

    /// Fit all y axes to the data. Returns whether anything changed.
    pub fn fit_y_ranges<S: DataSource + ?Sized>(&mut self, source: &S, nice: bool) -> bool {
        let mut changed = false;
        for diagram in &mut self.diagrams {
            changed |= diagram.fit_y_ranges_from_global_data(source, nice);
        }
        changed
    }

    /// Update all curves. Returns how many reloaded.
    pub fn load<S: DataSource + ?Sized>(&mut self, source: &S, force: bool) -> usize {
        self.diagrams
            .iter_mut()
            .map(|d| d.load_data_from_container(source, force))
            .sum()
    }

    /// Snapshot of every diagram
    pub fn frame(&self, sequence: u64) -> ScopeFrame {
        ScopeFrame {
            sequence,
            diagrams: self.diagrams.iter().map(Diagram::frame).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::MockRenderSurface;
    use crate::series::TimeSeriesKind;
    use crate::source::{ContainerId, DataContainer, MockDataSource};

    fn two_row_container() -> DataContainer {
        let mut c = DataContainer::new(2, TimeSeriesKind::Block);
        for i in 0..100 {
            let t = i as f64 * 0.01;
            c.insert_values_at_end(&[i as f32, -(i as f32) * 2.0], t).unwrap();
        }
        c
    }

    #[test]
    fn test_layout() {
        let mut d = Diagram::default();
        d.set_axis_positions(800, 400);
        assert_eq!(d.x_axis.length_px(), 680);
        assert_eq!(d.y1_axis.length_px(), 360);
        assert_eq!(d.x_axis.origin(), PixelPoint::new(60.0, 370.0));
        assert_eq!(d.y2_axis.origin(), PixelPoint::new(740.0, 370.0));
        assert!(d.contains(PixelPoint::new(100.0, 100.0)));
        assert!(!d.contains(PixelPoint::new(10.0, 100.0)));
    }

    #[test]
    fn test_fit_y_ranges_from_global_data() {
        let c = two_row_container();
        let mut scope = Scope::new(ScopeConfig::default());
        let d = scope.add_diagram();
        scope.add_curve(d, 0, AxisConnection::Y1);
        scope.add_curve(d, 1, AxisConnection::Y2);

        assert!(scope.fit_y_ranges(&c, false));
        let diagram = &scope.diagrams()[d];
        assert_eq!(diagram.y1_axis.limits(), HiLoData::new(0.0, 99.0));
        assert_eq!(diagram.y2_axis.limits(), HiLoData::new(-198.0, 0.0));
        // same data again: nothing moves
        assert!(!scope.fit_y_ranges(&c, false));
    }

    #[test]
    fn test_fit_with_mock_source() {
        let mut source = MockDataSource::new();
        source
            .expect_absolute_min_max()
            .returning(|row| (row == 0).then(|| HiLoData::new(-3.3, 7.2)));
        let mut d = Diagram::default();
        let mut palette = PaletteCursor::new();
        d.add_curve(0, AxisConnection::Y1, CurveSettings::default(), &mut palette);
        d.add_curve(1, AxisConnection::Y2, CurveSettings::default(), &mut palette);

        assert!(d.fit_y_ranges_from_global_data(&source, true));
        assert_eq!(d.y1_axis.limits(), HiLoData::new(-4.0, 8.0));
        assert_eq!(d.y2_axis.limits(), HiLoData::ZERO_ONE);
        assert_ne!(d.curves()[0].painter.settings().color, d.curves()[1].painter.settings().color);
    }

    #[test]
    fn test_load_skips_unconnected_curves() {
        let c = two_row_container();
        let mut d = Diagram::default();
        d.set_axis_positions(400, 300);
        let mut palette = PaletteCursor::new();
        d.add_curve(0, AxisConnection::Y1, CurveSettings::default(), &mut palette);
        d.add_curve(1, AxisConnection::None, CurveSettings::default(), &mut palette);
        d.fit_x_range(HiLoData::new(0.0, 1.0), false);

        assert_eq!(d.load_data_from_container(&c, false), 1);
        assert_eq!(d.load_data_from_container(&c, false), 0);
        d.curves_mut()[0].external = true;
        assert_eq!(d.load_data_from_container(&c, false), 1);
        assert_eq!(d.frame().curves.len(), 1);
    }

    #[test]
    fn test_simulation_time_boundaries() {
        let mut scope = Scope::new(ScopeConfig::default());
        scope.add_diagram();
        scope.add_diagram();
        scope.set_simulation_time_boundaries(0.0, 9.3, true);
        for d in scope.diagrams() {
            assert_eq!(d.x_axis.limits(), HiLoData::new(0.0, 10.0));
        }
        scope.set_simulation_time_boundaries(5.0, f64::NAN, true);
        assert_eq!(scope.diagrams()[0].x_axis.limits(), HiLoData::new(0.0, 10.0));
    }

    #[test]
    fn test_paint_draws_grid_curves_and_labels() {
        let c = two_row_container();
        let mut scope = Scope::new(ScopeConfig::default());
        let d = scope.add_diagram();
        scope.add_curve(d, 0, AxisConnection::Y1);
        scope.set_size(400, 300);
        scope.set_simulation_time_boundaries(0.0, 1.0, false);
        scope.fit_y_ranges(&c, true);
        assert_eq!(scope.load(&c, false), 1);

        let mut surface = MockRenderSurface::new();
        surface.expect_segment().return_const(());
        surface.expect_filled_rect().return_const(());
        surface.expect_polyline().times(1).return_const(());
        surface.expect_text().times(1..).return_const(());
        scope.diagrams()[d].paint(&mut surface);

        let frame = scope.frame(7);
        assert_eq!(frame.sequence, 7);
        assert_eq!(frame.diagrams.len(), 1);
    }

    #[test]
    fn test_container_identity_from_mock() {
        let id = ContainerId::next();
        let mut source = MockDataSource::new();
        source.expect_container_id().return_const(id);
        source.expect_maximum_time_index().returning(|_| None);
        let mut d = Diagram::default();
        d.add_curve(0, AxisConnection::Y1, CurveSettings::default(), &mut PaletteCursor::new());
        assert_eq!(d.load_data_from_container(&source, false), 1);
        assert_eq!(d.load_data_from_container(&source, false), 0);
    }
}
