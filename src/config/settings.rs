//! Display and engine settings
//!
//! These are the plain-data knobs the axis model and the painters read. They
//! are grouped into [`ScopeConfig`](super::ScopeConfig) for persistence, and
//! each axis or curve carries its own copy so they can diverge at runtime.
//!
//! # Main Types
//!
//! - [`AxisTickSettings`] - Tick spacing, minor tick count, tick lengths and labels
//! - [`AxisGridSettings`] - Grid line visibility and colors
//! - [`CurveSettings`] - Per-curve color, line width, symbols and curve kind
//! - [`RenderSettings`] - Decimation and simplification thresholds
//! - [`UpdateSettings`] - Background update worker cadence

use crate::types::Rgba;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default interval between update worker polls
pub const DEFAULT_UPDATE_INTERVAL_MS: u64 = 400;

/// Envelopes taller than this many pixels are drawn as vertical bars
pub const DEFAULT_ENVELOPE_THRESHOLD_PX: f64 = 1.5;

/// Consecutive envelopes overlapping more than this stay unjoined
pub const DEFAULT_OVERLAP_JOIN_PX: f64 = 1.0;

/// Perpendicular distance below which a polyline vertex is dropped
pub const DEFAULT_SIMPLIFY_TOLERANCE_PX: f64 = 0.5;

/// Minimum chord width before the simplifier may drop vertices
pub const DEFAULT_SIMPLIFY_MIN_CHORD_PX: f64 = 2.0;

// ==================== Axis ====================

/// Tick configuration of one axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisTickSettings {
    /// Derive major tick spacing from the axis length
    pub auto_tick_spacing: bool,

    /// Major tick spacing used when `auto_tick_spacing` is off
    pub tick_spacing: f64,

    /// Number of minor intervals between two major ticks
    pub minor_ticks: u32,

    /// Major tick length in pixels
    pub tick_length_major: f32,

    /// Minor tick length in pixels
    pub tick_length_minor: f32,

    pub show_labels_major: bool,
    pub show_labels_minor: bool,
}

impl Default for AxisTickSettings {
    fn default() -> Self {
        Self {
            auto_tick_spacing: true,
            tick_spacing: 100.0,
            minor_ticks: 2,
            tick_length_major: 6.0,
            tick_length_minor: 3.0,
            show_labels_major: true,
            show_labels_minor: false,
        }
    }
}

/// Grid configuration of one axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisGridSettings {
    pub show_major: bool,
    pub show_minor: bool,
    pub color_major: Rgba,
    pub color_minor: Rgba,

    /// Draw a line at value zero when it is inside the limits
    pub show_zero_line: bool,
    pub color_zero_line: Rgba,
}

impl Default for AxisGridSettings {
    fn default() -> Self {
        Self {
            show_major: true,
            show_minor: false,
            color_major: [200, 200, 200, 255],
            color_minor: [230, 230, 230, 255],
            show_zero_line: true,
            color_zero_line: [120, 120, 120, 255],
        }
    }
}

// ==================== Curve ====================

/// How a curve's samples are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CurveKind {
    /// Continuous values, drawn with per-pixel envelopes
    #[default]
    Analog,
    /// Digital levels, drawn as off / on / transitional runs
    Signal,
}

/// Marker drawn at sample positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SymbolShape {
    #[default]
    Circle,
    Square,
    Cross,
    Triangle,
}

/// Per-curve display settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveSettings {
    pub color: Rgba,
    pub line_width: f32,
    pub kind: CurveKind,

    /// Draw markers at sample positions
    pub show_symbols: bool,
    pub symbol_shape: SymbolShape,

    /// Draw a marker at every n-th visible sample
    pub symbol_skip: usize,

    /// Marker size in pixels
    pub symbol_size: f32,
}

impl Default for CurveSettings {
    fn default() -> Self {
        Self {
            color: [31, 119, 180, 255],
            line_width: 1.0,
            kind: CurveKind::Analog,
            show_symbols: false,
            symbol_shape: SymbolShape::Circle,
            symbol_skip: 1,
            symbol_size: 4.0,
        }
    }
}

impl CurveSettings {
    /// Set the display color
    pub fn with_color(mut self, color: Rgba) -> Self {
        self.color = color;
        self
    }

    /// Set the curve kind
    pub fn with_kind(mut self, kind: CurveKind) -> Self {
        self.kind = kind;
        self
    }

    /// Enable markers at every `skip`-th sample
    pub fn with_symbols(mut self, shape: SymbolShape, skip: usize) -> Self {
        self.show_symbols = true;
        self.symbol_shape = shape;
        self.symbol_skip = skip.max(1);
        self
    }
}

// ==================== Engine ====================

/// Thresholds of the per-pixel decimation and simplification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub envelope_threshold_px: f64,
    pub overlap_join_px: f64,
    pub simplify_tolerance_px: f64,
    pub simplify_min_chord_px: f64,

    /// At most `symbol_cap_factor * axis width` markers per curve
    pub symbol_cap_factor: usize,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            envelope_threshold_px: DEFAULT_ENVELOPE_THRESHOLD_PX,
            overlap_join_px: DEFAULT_OVERLAP_JOIN_PX,
            simplify_tolerance_px: DEFAULT_SIMPLIFY_TOLERANCE_PX,
            simplify_min_chord_px: DEFAULT_SIMPLIFY_MIN_CHORD_PX,
            symbol_cap_factor: 2,
        }
    }
}

/// Background update worker cadence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateSettings {
    /// Poll interval in milliseconds
    pub interval_ms: u64,

    /// Nice-scale the x axis when a container pauses
    pub nice_fit_on_pause: bool,
}

impl Default for UpdateSettings {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_UPDATE_INTERVAL_MS,
            nice_fit_on_pause: true,
        }
    }
}

impl UpdateSettings {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tick_settings() {
        let ticks = AxisTickSettings::default();
        assert!(ticks.auto_tick_spacing);
        assert_eq!(ticks.minor_ticks, 2);
    }

    #[test]
    fn test_curve_settings_builders() {
        let curve = CurveSettings::default()
            .with_color([1, 2, 3, 255])
            .with_kind(CurveKind::Signal)
            .with_symbols(SymbolShape::Cross, 0);
        assert_eq!(curve.color, [1, 2, 3, 255]);
        assert_eq!(curve.kind, CurveKind::Signal);
        assert!(curve.show_symbols);
        assert_eq!(curve.symbol_skip, 1);
    }

    #[test]
    fn test_update_interval_never_zero() {
        let update = UpdateSettings {
            interval_ms: 0,
            ..Default::default()
        };
        assert_eq!(update.interval(), Duration::from_millis(1));
    }
}
