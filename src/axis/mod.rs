//! Axis model: value ↔ pixel transform, ticks, zoom and pan
//!
//! An [`Axis`] maps data values onto a pixel interval that starts at its
//! origin pixel and extends `length_px` pixels to the right (X) or upwards (Y).
//!
//! # Main Types
//!
//! - [`Axis`] - One axis with its limits, scale, origin and tick settings
//! - [`AxisScale`] - Linear or logarithmic mapping
//! - [`Direction`] - Horizontal or vertical
//! - [`AxisLimits`] - Visible-range state machine (re-exported)
//! - [`NiceScale`] - Rounded interval computation (re-exported)
//!
//! # Mapping
//!
//! ```text
//! linear: pixel = sign * (v - lo) * length / (hi - lo) + origin
//! log:    pixel = sign * length / log10(hi' / lo) * log10(v / lo) + origin
//! ```
//!
//! `sign` is `+1` for X and `-1` for Y (pixel rows grow downwards). A
//! logarithmic axis maps up to `hi' = 1.5 * hi` to leave room above the top
//! decade. Values `<= 0` are clamped to the smallest positive float; a lower
//! limit `<= 0` is replaced by one six decades below the upper limit.

pub mod limits;
pub mod nice_scale;
pub mod ticks;

pub use limits::{AxisLimits, Clipping};
pub use nice_scale::NiceScale;
pub use ticks::{Tick, TickKind};

use crate::config::{AxisGridSettings, AxisTickSettings};
use crate::types::{HiLoData, PixelPoint};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use ticks::{format_decade, format_engineering, MAX_MAJOR_TICKS};

/// Zoom factor applied per mouse wheel notch
pub const MOUSE_WHEEL_ZOOM: f64 = 1.1;

/// Axes shorter than this get only two auto ticks
pub const SHORT_AXIS_THRES: u32 = 50;

/// Axes longer than this get twice the auto ticks
pub const LONG_AXIS_THRES: u32 = 800;

/// Number of auto ticks on a normal-length axis
pub const AUTO_TICK_COUNT: f64 = 5.0;

/// Decades added around the visible log range when generating major ticks
pub const MIN_LOG_TICKS: i32 = 3;

/// Minimum pixel distance between log majors before minors are drawn
pub const MINOR_LOG_TICK_MIN_DIST: u32 = 25;

/// Head-room factor above the top decade of a logarithmic axis
pub const LOG_HEADROOM: f64 = 1.5;

/// Lower limit of a log axis whose limits reach zero or below, relative to the upper one
pub const LOG_FALLBACK_SPAN: f64 = 1e-6;

/// Minor intervals per decade on a new logarithmic axis
pub const DEFAULT_LOG_MINOR_TICKS: u32 = 10;

/// Minor intervals per major on a new linear axis
pub const DEFAULT_LIN_MINOR_TICKS: u32 = 2;

/// Pseudo ticks placed on a log axis spanning less than three decades
const LOG_PSEUDO_TICKS: usize = 5;

/// Significant digits in tick labels
const LABEL_DIGITS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    X,
    Y,
}

impl Direction {
    fn sign(self) -> f64 {
        match self {
            Direction::X => 1.0,
            Direction::Y => -1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AxisScale {
    #[default]
    Linear,
    Logarithmic,
}

impl AxisScale {
    pub fn default_minor_ticks(self) -> u32 {
        match self {
            AxisScale::Linear => DEFAULT_LIN_MINOR_TICKS,
            AxisScale::Logarithmic => DEFAULT_LOG_MINOR_TICKS,
        }
    }
}

/// Frozen value ↔ pixel mapping of an axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisTransform {
    kind: AxisScale,
    sign: f64,
    origin: f64,
    lo: f64,
    scale: f64,
}

impl AxisTransform {
    pub fn pixel_from_value(&self, value: f64) -> f64 {
        match self.kind {
            AxisScale::Linear => self.sign * (value - self.lo) * self.scale + self.origin,
            AxisScale::Logarithmic => {
                self.sign * self.scale * (clamp_positive(value) / self.lo).log10() + self.origin
            }
        }
    }

    pub fn value_from_pixel(&self, pixel: f64) -> f64 {
        let offset = self.sign * (pixel - self.origin) / self.scale;
        match self.kind {
            AxisScale::Linear => self.lo + offset,
            AxisScale::Logarithmic => self.lo * 10f64.powf(offset),
        }
    }
}

/// One axis of a diagram
#[derive(Debug, Clone)]
pub struct Axis {
    direction: Direction,
    origin: PixelPoint,
    length_px: u32,
    scale: AxisScale,
    limits: AxisLimits,
    panning_origin: Option<HiLoData>,
    pub tick_settings: AxisTickSettings,
    pub grid_settings: AxisGridSettings,
}

impl Axis {
    pub fn new(direction: Direction) -> Self {
        Self::with_limits(direction, AxisLimits::new())
    }

    pub fn with_limits(direction: Direction, limits: AxisLimits) -> Self {
        Self {
            direction,
            origin: PixelPoint::default(),
            length_px: 1,
            scale: AxisScale::Linear,
            limits,
            panning_origin: None,
            tick_settings: AxisTickSettings::default(),
            grid_settings: AxisGridSettings::default(),
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn origin(&self) -> PixelPoint {
        self.origin
    }

    pub fn set_origin(&mut self, origin: PixelPoint) {
        self.origin = origin;
    }

    pub fn length_px(&self) -> u32 {
        self.length_px
    }

    /// Set the pixel length. Zero is a caller bug and is bumped to one pixel.
    pub fn set_length_px(&mut self, length_px: u32) {
        debug_assert!(length_px > 0, "axis length must be positive");
        self.length_px = length_px.max(1);
    }

    pub fn scale(&self) -> AxisScale {
        self.scale
    }

    /// Switch between linear and logarithmic mapping.
    ///
    /// Resets the minor tick count to the new scale's default; a logarithmic
    /// axis never nice-scales.
    pub fn set_scale(&mut self, scale: AxisScale) {
        if scale == self.scale {
            return;
        }
        self.scale = scale;
        self.tick_settings.minor_ticks = scale.default_minor_ticks();
        if scale == AxisScale::Logarithmic {
            self.limits.set_nice_scale(false);
        }
    }

    /// Enable nice-scaling of autoscaled limits. Ignored on logarithmic axes.
    pub fn set_nice_scale(&mut self, nice: bool) {
        self.limits
            .set_nice_scale(nice && self.scale == AxisScale::Linear);
    }

    /// Visible limits
    pub fn limits(&self) -> HiLoData {
        self.limits.limits()
    }

    pub fn axis_limits(&self) -> &AxisLimits {
        &self.limits
    }

    pub fn axis_limits_mut(&mut self) -> &mut AxisLimits {
        &mut self.limits
    }

    /// Limits used for the pixel mapping; differ from `limits()` on log axes
    pub fn mapping_limits(&self) -> HiLoData {
        let limits = self.limits.limits();
        match self.scale {
            AxisScale::Linear => limits,
            AxisScale::Logarithmic => {
                let hi = limits.hi() * LOG_HEADROOM;
                let hi = if hi > 0.0 { hi } else { 1.0 };
                let lo = if limits.lo() > 0.0 {
                    limits.lo()
                } else {
                    hi * LOG_FALLBACK_SPAN
                };
                HiLoData::new(lo, hi)
            }
        }
    }

    /// Pixels per value unit (linear) or per decade (log)
    pub fn scale_factor(&self) -> f64 {
        self.transform().scale
    }

    fn direction_origin(&self) -> f64 {
        match self.direction {
            Direction::X => self.origin.x,
            Direction::Y => self.origin.y,
        }
    }

    /// Snapshot of the current mapping, cheap to apply many times
    pub fn transform(&self) -> AxisTransform {
        let limits = self.mapping_limits();
        let length = self.length_px as f64;
        let scale = match self.scale {
            AxisScale::Linear => length / limits.interval_range(),
            AxisScale::Logarithmic => length / (limits.hi() / limits.lo()).log10(),
        };
        AxisTransform {
            kind: self.scale,
            sign: self.direction.sign(),
            origin: self.direction_origin(),
            lo: limits.lo(),
            scale,
        }
    }

    pub fn pixel_from_value(&self, value: f64) -> f64 {
        self.transform().pixel_from_value(value)
    }

    pub fn value_from_pixel(&self, pixel: f64) -> f64 {
        self.transform().value_from_pixel(pixel)
    }

    /// Pixel positions of the axis start and end along its direction
    pub fn pixel_span(&self) -> (f64, f64) {
        let start = self.direction_origin();
        (start, start + self.direction.sign() * self.length_px as f64)
    }

    /// Digest of everything that changes the value ↔ pixel mapping
    pub fn axis_hash(&self) -> u64 {
        let limits = self.limits.limits();
        let mut hasher = DefaultHasher::new();
        self.scale_factor().to_bits().hash(&mut hasher);
        self.length_px.hash(&mut hasher);
        limits.hash(&mut hasher);
        self.scale.hash(&mut hasher);
        self.direction_origin().to_bits().hash(&mut hasher);
        hasher.finish()
    }

    // ==================== Ticks ====================

    /// Major tick spacing derived from the axis length
    pub fn auto_tick_spacing(&self) -> f64 {
        let range = self.limits.limits().interval_range();
        if self.length_px < SHORT_AXIS_THRES {
            return range / 2.0;
        }
        let spacing = range / AUTO_TICK_COUNT;
        if self.length_px > LONG_AXIS_THRES {
            spacing / 2.0
        } else {
            spacing
        }
    }

    /// Effective major tick spacing
    pub fn tick_spacing(&self) -> f64 {
        if self.tick_settings.auto_tick_spacing {
            self.auto_tick_spacing()
        } else {
            self.tick_settings.tick_spacing
        }
    }

    /// Major and minor ticks inside the visible limits, majors first
    pub fn ticks(&self) -> Vec<Tick> {
        let majors = match self.scale {
            AxisScale::Linear => self.linear_major_values(),
            AxisScale::Logarithmic => self.log_major_values(),
        };
        let minors = match self.scale {
            AxisScale::Linear => self.interpolated_minor_values(&majors),
            AxisScale::Logarithmic => self.log_minor_values(&majors),
        };

        let transform = self.transform();
        let major_label = |v: f64| match self.scale {
            AxisScale::Linear => format_engineering(v, LABEL_DIGITS),
            AxisScale::Logarithmic => format_decade(v),
        };

        let mut ticks: Vec<Tick> = majors
            .iter()
            .map(|&v| Tick {
                value: v,
                pixel: transform.pixel_from_value(v),
                kind: TickKind::Major,
                label: major_label(v),
            })
            .collect();
        ticks.extend(minors.into_iter().map(|v| Tick {
            value: v,
            pixel: transform.pixel_from_value(v),
            kind: TickKind::Minor,
            label: format_engineering(v, LABEL_DIGITS),
        }));
        ticks
    }

    fn linear_major_values(&self) -> Vec<f64> {
        let limits = self.limits.limits();
        let spacing = self.tick_spacing();
        if !(spacing.is_finite() && spacing > 0.0) {
            return Vec::new();
        }
        let first = (limits.lo() / spacing).trunc();
        let count = ((limits.hi() / spacing).trunc() - first + 2.0).max(0.0) as usize;
        // tolerance keeps ticks sitting exactly on the limits
        let eps = spacing * 1e-9;
        (0..count.min(MAX_MAJOR_TICKS))
            .map(|i| (first + i as f64) * spacing)
            .filter(|v| limits.lo() - eps <= *v && *v <= limits.hi() + eps)
            .collect()
    }

    fn log_major_values(&self) -> Vec<f64> {
        let limits = self.mapping_limits();
        let count = ((limits.hi() / limits.lo()).log10().round() as i32 + MIN_LOG_TICKS).max(0);
        let first_exp = limits.lo().log10().trunc() as i32 - 1;
        (0..count.min(MAX_MAJOR_TICKS as i32))
            .map(|i| 10f64.powi(first_exp + i))
            .filter(|v| limits.contains(*v))
            .collect()
    }

    fn interpolated_minor_values(&self, majors: &[f64]) -> Vec<f64> {
        let n = self.tick_settings.minor_ticks;
        if n < 2 || majors.len() < 2 {
            return Vec::new();
        }
        majors
            .windows(2)
            .flat_map(|w| {
                let (a, b) = (w[0], w[1]);
                (1..n).map(move |j| a + j as f64 * (b - a) / n as f64)
            })
            .collect()
    }

    fn log_minor_values(&self, majors: &[f64]) -> Vec<f64> {
        if majors.len() > 2 {
            if majors.len() >= (self.length_px / MINOR_LOG_TICK_MIN_DIST) as usize {
                return Vec::new();
            }
            // mantissa steps: with 10 minor intervals this yields 2·10^k .. 9·10^k
            let n = self.tick_settings.minor_ticks;
            if n < 2 {
                return Vec::new();
            }
            return majors
                .windows(2)
                .flat_map(|w| {
                    let (a, b) = (w[0], w[1]);
                    (1..n - 1).map(move |j| a + j as f64 * (b - a) / (n - 1) as f64)
                })
                .collect();
        }
        let limits = self.mapping_limits();
        let distance = limits.interval_range() / (LOG_PSEUDO_TICKS + 1) as f64;
        (1..=LOG_PSEUDO_TICKS)
            .map(|i| limits.lo() + i as f64 * distance)
            .collect()
    }

    /// Pixel of value zero, if zero is inside the limits of a linear axis
    pub fn zero_line_pixel(&self) -> Option<f64> {
        let limits = self.limits.limits();
        if self.scale == AxisScale::Logarithmic || limits.lo() > 0.0 || limits.hi() < 0.0 {
            return None;
        }
        Some(self.pixel_from_value(0.0))
    }

    // ==================== Interaction ====================

    /// Zoom around the value under `pixel`. Negative rotation zooms out.
    ///
    /// The result is clamped to the global autoscale range; a zoom that would
    /// leave no valid interval is ignored.
    pub fn do_mouse_wheel_zoom(&mut self, pixel: f64, rotation: i32) {
        if rotation == 0 {
            return;
        }
        let old = self.limits.limits();
        let bounds = self.limits.auto_scale_global();
        let center = self.value_from_pixel(pixel);

        let steps = rotation.unsigned_abs().min(i32::MAX as u32) as i32;
        let factor = if rotation < 0 {
            MOUSE_WHEEL_ZOOM.powi(steps)
        } else {
            MOUSE_WHEEL_ZOOM.powi(-steps)
        };
        let lo = ((old.lo() - center) * factor + center).max(bounds.lo());
        let hi = ((old.hi() - center) * factor + center).min(bounds.hi());

        if !(lo.is_finite() && hi.is_finite()) || lo >= hi {
            tracing::debug!("Ignoring wheel zoom to empty range ({}, {})", lo, hi);
            return;
        }
        self.limits.set_zoom_values(HiLoData::new(lo, hi), false);
    }

    /// Remember the current limits as the start of a pan gesture
    pub fn set_panning_origin_limits(&mut self) {
        self.panning_origin = Some(self.limits.limits());
        self.limits.set_zoom_values(self.limits.limits(), false);
    }

    /// Shift the gesture-start limits by the value distance between two pixels
    pub fn do_panning(&mut self, current_pixel: f64, start_pixel: f64) {
        let Some(origin) = self.panning_origin else {
            tracing::debug!("Panning without origin limits, ignoring");
            return;
        };
        let scratch = self.with_limits_override(origin);
        let shift = scratch.value_from_pixel(current_pixel) - scratch.value_from_pixel(start_pixel);
        let (lo, hi) = match self.scale {
            AxisScale::Linear => (origin.lo() - shift, origin.hi() - shift),
            AxisScale::Logarithmic => {
                let ratio = scratch.value_from_pixel(start_pixel) / scratch.value_from_pixel(current_pixel);
                (origin.lo() * ratio, origin.hi() * ratio)
            }
        };
        if !(lo.is_finite() && hi.is_finite()) || lo >= hi {
            return;
        }
        self.limits.set_panned_values(HiLoData::new(lo, hi));
    }

    /// End the pan gesture
    pub fn finish_panning(&mut self) {
        self.panning_origin = None;
    }

    /// Zoom to the value range between two pixels (rectangle zoom)
    pub fn zoom_to_pixel_range(&mut self, a: f64, b: f64, nice: bool) {
        let (va, vb) = (self.value_from_pixel(a), self.value_from_pixel(b));
        let (lo, hi) = if va <= vb { (va, vb) } else { (vb, va) };
        if !(lo.is_finite() && hi.is_finite()) || lo >= hi {
            return;
        }
        let nice = nice && self.scale == AxisScale::Linear;
        self.limits.set_zoom_values(HiLoData::new(lo, hi), nice);
    }

    pub fn pop_history_stack(&mut self) {
        self.limits.pop_history_stack();
    }

    /// Same scale type and visible limits
    pub fn has_identical_settings(&self, other: &Axis) -> bool {
        self.scale == other.scale && self.limits() == other.limits()
    }

    /// Copy tick and grid appearance from another axis
    pub fn copy_axis_settings(&mut self, from: &Axis) {
        self.tick_settings = from.tick_settings.clone();
        self.grid_settings = from.grid_settings.clone();
    }

    fn with_limits_override(&self, limits: HiLoData) -> Axis {
        let mut copy = Axis::new(self.direction);
        copy.origin = self.origin;
        copy.length_px = self.length_px;
        copy.scale = self.scale;
        copy.limits.set_zoom_values(limits, false);
        copy
    }
}

fn clamp_positive(v: f64) -> f64 {
    if v > 0.0 {
        v
    } else {
        f64::MIN_POSITIVE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x_axis(lo: f64, hi: f64, length: u32) -> Axis {
        let mut axis = Axis::new(Direction::X);
        axis.set_length_px(length);
        axis.axis_limits_mut()
            .set_global_auto_scale_values(HiLoData::new(lo, hi));
        axis
    }

    #[test]
    fn test_linear_x_mapping() {
        let mut axis = x_axis(0.0, 100.0, 800);
        axis.set_origin(PixelPoint::new(0.0, 0.0));
        assert_eq!(axis.pixel_from_value(50.0), 400.0);
        assert_eq!(axis.value_from_pixel(0.0), 0.0);
        assert_eq!(axis.value_from_pixel(800.0), 100.0);
    }

    #[test]
    fn test_y_axis_grows_upwards() {
        let mut axis = Axis::new(Direction::Y);
        axis.set_length_px(200);
        axis.set_origin(PixelPoint::new(40.0, 250.0));
        axis.axis_limits_mut()
            .set_global_auto_scale_values(HiLoData::new(-1.0, 1.0));
        assert_eq!(axis.pixel_from_value(-1.0), 250.0);
        assert_eq!(axis.pixel_from_value(1.0), 50.0);
        assert_eq!(axis.value_from_pixel(150.0), 0.0);
    }

    #[test]
    fn test_log_axis_endpoints() {
        let mut axis = x_axis(1.0, 1000.0, 600);
        axis.set_scale(AxisScale::Logarithmic);
        assert!((axis.pixel_from_value(1.0) - 0.0).abs() < 1e-9);
        let expected = 600.0 * 3.0 / 1500f64.log10();
        assert!((axis.pixel_from_value(1000.0) - expected).abs() < 1e-9);
        assert!((axis.value_from_pixel(expected) - 1000.0).abs() < 1e-6);
    }

    #[test]
    fn test_log_axis_clamps_non_positive() {
        let mut axis = x_axis(1.0, 1000.0, 600);
        axis.set_scale(AxisScale::Logarithmic);
        let p = axis.pixel_from_value(-5.0);
        assert!(p.is_finite());
        assert!(p < 0.0);
    }

    #[test]
    fn test_log_axis_forces_nice_scale_off() {
        let mut axis = x_axis(1.0, 1000.0, 600);
        axis.set_nice_scale(true);
        axis.set_scale(AxisScale::Logarithmic);
        assert!(!axis.axis_limits().is_nice_scale());
        axis.set_nice_scale(true);
        assert!(!axis.axis_limits().is_nice_scale());
        assert_eq!(axis.tick_settings.minor_ticks, DEFAULT_LOG_MINOR_TICKS);
    }

    #[test]
    fn test_auto_tick_spacing_thresholds() {
        let axis = x_axis(0.0, 100.0, 40);
        assert_eq!(axis.auto_tick_spacing(), 50.0);
        let axis = x_axis(0.0, 100.0, 400);
        assert_eq!(axis.auto_tick_spacing(), 20.0);
        let axis = x_axis(0.0, 100.0, 1000);
        assert_eq!(axis.auto_tick_spacing(), 10.0);
    }

    #[test]
    fn test_linear_ticks() {
        let axis = x_axis(0.0, 100.0, 400);
        let ticks = axis.ticks();
        let majors: Vec<f64> = ticks.iter().filter(|t| t.is_major()).map(|t| t.value).collect();
        assert_eq!(majors, vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
        let minors = ticks.iter().filter(|t| !t.is_major()).count();
        assert_eq!(minors, 5);
        assert_eq!(ticks[1].label, "20");
    }

    #[test]
    fn test_log_ticks_are_decades() {
        let mut axis = x_axis(1.0, 1000.0, 600);
        axis.set_scale(AxisScale::Logarithmic);
        let majors: Vec<f64> = axis
            .ticks()
            .iter()
            .filter(|t| t.is_major())
            .map(|t| t.value)
            .collect();
        assert_eq!(majors, vec![1.0, 10.0, 100.0, 1000.0]);
    }

    #[test]
    fn test_log_pseudo_ticks_for_narrow_range() {
        let mut axis = x_axis(2.0, 3.0, 600);
        axis.set_scale(AxisScale::Logarithmic);
        let minors = axis.ticks().iter().filter(|t| !t.is_major()).count();
        assert_eq!(minors, LOG_PSEUDO_TICKS);
    }

    #[test]
    fn test_zero_line_pixel() {
        let axis = x_axis(-50.0, 50.0, 100);
        assert_eq!(axis.zero_line_pixel(), Some(50.0));
        let axis = x_axis(10.0, 50.0, 100);
        assert_eq!(axis.zero_line_pixel(), None);
    }

    #[test]
    fn test_mouse_wheel_zoom_in_and_clamped_out() {
        let mut axis = x_axis(0.0, 100.0, 800);
        axis.do_mouse_wheel_zoom(400.0, 1);
        let zoomed = axis.limits();
        assert!((zoomed.lo() - (50.0 - 50.0 / 1.1)).abs() < 1e-9);
        assert!((zoomed.hi() - (50.0 + 50.0 / 1.1)).abs() < 1e-9);

        for _ in 0..5 {
            axis.do_mouse_wheel_zoom(400.0, -1);
        }
        assert_eq!(axis.limits(), HiLoData::new(0.0, 100.0));
    }

    #[test]
    fn test_mouse_wheel_zoom_extreme_rotation() {
        let mut axis = x_axis(0.0, 100.0, 800);
        axis.do_mouse_wheel_zoom(400.0, 1);
        axis.do_mouse_wheel_zoom(400.0, i32::MIN);
        assert_eq!(axis.limits(), HiLoData::new(0.0, 100.0));

        // collapses to a single value: ignored
        axis.do_mouse_wheel_zoom(400.0, i32::MAX);
        assert_eq!(axis.limits(), HiLoData::new(0.0, 100.0));
    }

    #[test]
    fn test_panning() {
        let mut axis = x_axis(0.0, 100.0, 800);
        axis.set_panning_origin_limits();
        axis.do_panning(480.0, 400.0);
        let panned = axis.limits();
        assert!((panned.lo() + 10.0).abs() < 1e-9);
        assert!((panned.hi() - 90.0).abs() < 1e-9);
        // later moves are relative to the gesture start
        axis.do_panning(360.0, 400.0);
        assert!((axis.limits().lo() - 5.0).abs() < 1e-9);
        axis.finish_panning();

        // one undo restores the pre-pan view
        axis.pop_history_stack();
        assert_eq!(axis.limits(), HiLoData::new(0.0, 100.0));
    }

    #[test]
    fn test_zoom_to_pixel_range() {
        let mut axis = x_axis(0.0, 100.0, 800);
        axis.zoom_to_pixel_range(600.0, 200.0, false);
        assert_eq!(axis.limits(), HiLoData::new(25.0, 75.0));
    }

    #[test]
    fn test_axis_hash_tracks_mapping() {
        let mut axis = x_axis(0.0, 100.0, 800);
        let h0 = axis.axis_hash();
        assert_eq!(h0, axis.axis_hash());
        axis.set_length_px(801);
        assert_ne!(h0, axis.axis_hash());
        axis.set_length_px(800);
        assert_eq!(h0, axis.axis_hash());
        axis.do_mouse_wheel_zoom(100.0, 1);
        assert_ne!(h0, axis.axis_hash());
    }

    #[test]
    fn test_identical_settings_and_copy() {
        let mut a = x_axis(0.0, 10.0, 100);
        let b = x_axis(0.0, 10.0, 300);
        assert!(a.has_identical_settings(&b));
        a.set_scale(AxisScale::Logarithmic);
        assert!(!a.has_identical_settings(&b));

        let mut c = x_axis(0.0, 1.0, 100);
        a.tick_settings.show_labels_minor = true;
        c.copy_axis_settings(&a);
        assert!(c.tick_settings.show_labels_minor);
    }
}
