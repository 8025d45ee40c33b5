//! Test data builders for containers and axes

use scopevis_rs::source::generator::fill_container;
use scopevis_rs::{
    Axis, AxisScale, DataContainer, Direction, HiLoData, PixelPoint, SignalGenerator,
    SignalPattern, TimeSeriesKind,
};

/// Builder for single- or multi-row containers filled from generators
pub struct ContainerBuilder {
    kind: TimeSeriesKind,
    patterns: Vec<SignalPattern>,
    dt: f64,
    samples: usize,
}

impl ContainerBuilder {
    pub fn new() -> Self {
        Self {
            kind: TimeSeriesKind::Block,
            patterns: Vec::new(),
            dt: 1e-3,
            samples: 0,
        }
    }

    pub fn kind(mut self, kind: TimeSeriesKind) -> Self {
        self.kind = kind;
        self
    }

    /// Add one row generated by `pattern`
    pub fn row(mut self, pattern: SignalPattern) -> Self {
        self.patterns.push(pattern);
        self
    }

    pub fn dt(mut self, dt: f64) -> Self {
        self.dt = dt;
        self
    }

    pub fn samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    /// Generators for the configured rows, to keep appending after `build`
    pub fn generators(&self) -> Vec<SignalGenerator> {
        self.patterns.iter().map(|p| SignalGenerator::new(*p)).collect()
    }

    pub fn build(self) -> DataContainer {
        let mut container = DataContainer::new(self.patterns.len().max(1), self.kind);
        let mut generators = self.generators();
        if generators.is_empty() {
            generators.push(SignalGenerator::new(SignalPattern::default()));
        }
        fill_container(&mut container, &mut generators, 0.0, self.dt, self.samples)
            .expect("generated samples are valid");
        container
    }
}

/// Builder for axes with fixed limits
pub struct AxisBuilder {
    direction: Direction,
    length_px: u32,
    origin: PixelPoint,
    limits: HiLoData,
    scale: AxisScale,
}

impl AxisBuilder {
    pub fn x() -> Self {
        Self {
            direction: Direction::X,
            length_px: 800,
            origin: PixelPoint::new(0.0, 0.0),
            limits: HiLoData::ZERO_ONE,
            scale: AxisScale::Linear,
        }
    }

    /// Y axis whose origin sits at the bottom of its pixel range
    pub fn y() -> Self {
        Self {
            direction: Direction::Y,
            length_px: 400,
            origin: PixelPoint::new(0.0, 400.0),
            ..Self::x()
        }
    }

    pub fn length(mut self, length_px: u32) -> Self {
        self.length_px = length_px;
        if self.direction == Direction::Y {
            self.origin = PixelPoint::new(self.origin.x, length_px as f64);
        }
        self
    }

    pub fn origin(mut self, origin: PixelPoint) -> Self {
        self.origin = origin;
        self
    }

    pub fn limits(mut self, lo: f64, hi: f64) -> Self {
        self.limits = HiLoData::new(lo, hi);
        self
    }

    pub fn logarithmic(mut self) -> Self {
        self.scale = AxisScale::Logarithmic;
        self
    }

    pub fn build(self) -> Axis {
        let mut axis = Axis::new(self.direction);
        axis.set_scale(self.scale);
        axis.set_origin(self.origin);
        axis.set_length_px(self.length_px);
        axis.axis_limits_mut()
            .set_global_auto_scale_values(self.limits);
        axis
    }
}
