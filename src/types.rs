//! Core data types for ScopeVis-RS
//!
//! This module contains the small value types shared by the axis model,
//! the data sources and the painters.
//!
//! # Main Types
//!
//! - [`HiLoData`] - Immutable `(lo, hi)` interval used for axis ranges and per-pixel envelopes
//! - [`DataValue`] - Result of aggregating the samples inside one pixel column
//! - [`PixelPoint`] - Device-pixel coordinate
//! - [`ContainerStatus`] - Lifecycle state of a data container
//! - [`PaletteCursor`] - Hands out visually distinct curve colors
//!
//! # NaN Handling
//!
//! `HiLoData` uses NaN bounds as "no data yet" sentinels. Merging treats a NaN
//! bound on one side as absent and keeps the other side's bound, so folding an
//! interval over samples with gaps never poisons the result.

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// RGBA color, the same layout egui's `Color32::from_rgba_unmultiplied` takes
pub type Rgba = [u8; 4];

// ==================== HiLoData ====================

/// Immutable `(lo, hi)` interval
///
/// Instances are only created through [`HiLoData::new`] or the canonical
/// constants. Equality and hashing compare the raw bit patterns of both bounds,
/// which makes two NaN sentinels equal to each other. Bounds of `-0.0` are
/// stored as `0.0` so that equal intervals also hash equal.
#[derive(Debug, Clone, Copy)]
pub struct HiLoData {
    lo: f64,
    hi: f64,
}

impl HiLoData {
    /// The interval `(0, 0)`
    pub const ZERO: HiLoData = HiLoData { lo: 0.0, hi: 0.0 };
    /// The interval `(0, 1)`, default autoscale range
    pub const ZERO_ONE: HiLoData = HiLoData { lo: 0.0, hi: 1.0 };
    /// The interval `(1, 1)`
    pub const ONE: HiLoData = HiLoData { lo: 1.0, hi: 1.0 };
    /// Both bounds NaN: "nothing merged yet"
    pub const EMPTY: HiLoData = HiLoData {
        lo: f64::NAN,
        hi: f64::NAN,
    };

    /// Create an interval. `hi < lo` is a caller bug.
    pub fn new(lo: f64, hi: f64) -> Self {
        debug_assert!(!(hi < lo), "HiLoData with hi < lo: ({}, {})", lo, hi);
        Self {
            lo: positive_zero(lo),
            hi: positive_zero(hi),
        }
    }

    /// Single-value interval `(v, v)`
    pub fn point(v: f64) -> Self {
        let v = positive_zero(v);
        Self { lo: v, hi: v }
    }

    pub fn lo(&self) -> f64 {
        self.lo
    }

    pub fn hi(&self) -> f64 {
        self.hi
    }

    /// Union of two intervals. A NaN bound on one side yields the other side's bound.
    pub fn merge(a: HiLoData, b: HiLoData) -> HiLoData {
        // f64::min/max already return the non-NaN operand
        HiLoData {
            lo: positive_zero(a.lo.min(b.lo)),
            hi: positive_zero(a.hi.max(b.hi)),
        }
    }

    /// Extend `existing` by a single value.
    ///
    /// A missing or NaN `existing` interval is replaced by `(v, v)`; a NaN `v`
    /// leaves `existing` untouched.
    pub fn merge_from_value(existing: Option<HiLoData>, v: f64) -> HiLoData {
        match existing {
            Some(e) if !e.lo.is_nan() && !e.hi.is_nan() => {
                if v.is_nan() {
                    e
                } else {
                    HiLoData {
                        lo: positive_zero(e.lo.min(v)),
                        hi: positive_zero(e.hi.max(v)),
                    }
                }
            }
            _ => HiLoData::point(v),
        }
    }

    /// Fold an iterator of intervals; `None` for an empty iterator
    pub fn merged_from_iter<I>(iter: I) -> Option<HiLoData>
    where
        I: IntoIterator<Item = HiLoData>,
    {
        iter.into_iter().reduce(HiLoData::merge)
    }

    /// `hi - lo`
    pub fn interval_range(&self) -> f64 {
        self.hi - self.lo
    }

    /// Both bounds are finite numbers
    pub fn is_valid_number(&self) -> bool {
        self.lo.is_finite() && self.hi.is_finite()
    }

    /// `lo == hi`
    pub fn is_degenerate(&self) -> bool {
        self.lo == self.hi
    }

    /// Closed-interval containment test
    pub fn contains(&self, v: f64) -> bool {
        self.lo <= v && v <= self.hi
    }

    /// Overlap length of two intervals, zero when disjoint
    pub fn overlap(&self, other: &HiLoData) -> f64 {
        (self.hi.min(other.hi) - self.lo.max(other.lo)).max(0.0)
    }
}

/// Map `-0.0` to `0.0`, leave everything else (NaN included) as is
fn positive_zero(v: f64) -> f64 {
    if v == 0.0 {
        0.0
    } else {
        v
    }
}

impl PartialEq for HiLoData {
    fn eq(&self, other: &Self) -> bool {
        self.lo.to_bits() == other.lo.to_bits() && self.hi.to_bits() == other.hi.to_bits()
    }
}

impl Eq for HiLoData {}

impl Hash for HiLoData {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.lo.to_bits().hash(state);
        self.hi.to_bits().hash(state);
    }
}

impl Default for HiLoData {
    fn default() -> Self {
        HiLoData::ZERO_ONE
    }
}

// ==================== DataValue ====================

/// Aggregate of the samples falling into one pixel column
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DataValue {
    /// Exactly one sample
    Scalar(f64),
    /// Two or more samples: their min/max
    Envelope(HiLoData),
}

impl DataValue {
    /// View the value as an interval; a scalar becomes `(v, v)`
    pub fn as_hilo(&self) -> HiLoData {
        match *self {
            DataValue::Scalar(v) => HiLoData::point(v),
            DataValue::Envelope(h) => h,
        }
    }

    /// True if any bound is NaN or infinite
    pub fn is_gap(&self) -> bool {
        !self.as_hilo().is_valid_number()
    }
}

// ==================== PixelPoint ====================

/// A position in device pixels, y growing downwards
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

// ==================== ContainerStatus ====================

/// Lifecycle state of a data container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ContainerStatus {
    /// No samples yet
    #[default]
    NotStarted,
    /// Producer is still appending
    Running,
    /// Producer suspended; data may continue later
    Paused,
    /// Producer done
    Finished,
}

impl ContainerStatus {
    pub fn is_running(&self) -> bool {
        matches!(self, ContainerStatus::Running)
    }
}

// ==================== Colors ====================

/// Generate a distinct color based on an index.
/// Uses the golden ratio to spread hues evenly across the color wheel
pub fn generate_color(index: u32) -> Rgba {
    // Use golden ratio conjugate for optimal hue distribution
    const GOLDEN_RATIO: f32 = 0.618033988749895;

    let hue = ((index as f32 * GOLDEN_RATIO) % 1.0) * 360.0;

    // Medium saturation and value stay visible on light and dark backgrounds
    let saturation = 0.7;
    let value = 0.85;

    let (r, g, b) = hsv_to_rgb(hue, saturation, value);
    [r, g, b, 255]
}

fn hsv_to_rgb(hue: f32, saturation: f32, value: f32) -> (u8, u8, u8) {
    let c = value * saturation;
    let x = c * (1.0 - ((hue / 60.0) % 2.0 - 1.0).abs());
    let m = value - c;

    let (r, g, b) = match (hue / 60.0) as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    (
        ((r + m) * 255.0).round() as u8,
        ((g + m) * 255.0).round() as u8,
        ((b + m) * 255.0).round() as u8,
    )
}

/// Cursor over the color palette, passed explicitly to whoever creates curves
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaletteCursor {
    next: u32,
}

impl PaletteCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the next unused color and advance
    pub fn next_color(&mut self) -> Rgba {
        let color = generate_color(self.next);
        self.next = self.next.wrapping_add(1);
        color
    }

    /// Number of colors handed out so far
    pub fn issued(&self) -> u32 {
        self.next
    }
}
