//! Rounded axis intervals
//!
//! Expands an arbitrary interval to one whose bounds are multiples of a
//! "nice" tick spacing (1, 2 or 5 times a power of ten), aiming for about
//! [`DEFAULT_MAX_TICKS`] ticks. The result is a fixpoint: feeding it back in
//! returns the same interval.

use crate::types::HiLoData;

/// Target number of ticks across the interval
pub const DEFAULT_MAX_TICKS: f64 = 10.0;

/// Relative widening applied to a degenerate `lo == hi` interval
const DEGENERATE_WIDEN: f64 = 0.1;

/// Slack when deciding whether a bound already sits on a tick
const SNAP_EPS: f64 = 1e-9;

/// Relative slack for tick multiples far from zero
const SNAP_REL_EPS: f64 = 1e-12;

const MAX_FIXPOINT_ROUNDS: usize = 8;

/// A rounded interval plus its tick spacing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NiceScale {
    pub min: f64,
    pub max: f64,
    pub tick_spacing: f64,
}

impl NiceScale {
    /// Compute the nice interval covering `limits`.
    ///
    /// A degenerate interval is widened by 10% of its magnitude first. A
    /// zero-width interval at zero has no magnitude to widen by and must be
    /// sanitized by the caller.
    pub fn new(limits: HiLoData) -> Self {
        Self::with_max_ticks(limits, DEFAULT_MAX_TICKS)
    }

    pub fn with_max_ticks(limits: HiLoData, max_ticks: f64) -> Self {
        let (mut lo, mut hi) = (limits.lo(), limits.hi());
        if !(lo.is_finite() && hi.is_finite()) {
            return Self {
                min: lo,
                max: hi,
                tick_spacing: f64::NAN,
            };
        }
        if lo == hi {
            debug_assert!(lo != 0.0, "nice scale of zero-width interval at zero");
            let delta = (lo.abs() * DEGENERATE_WIDEN).max(f64::MIN_POSITIVE);
            lo -= delta;
            hi += delta;
        }

        let mut current = Self::single_pass(lo, hi, max_ticks);
        for _ in 0..MAX_FIXPOINT_ROUNDS {
            let next = Self::single_pass(current.min, current.max, max_ticks);
            if next == current {
                break;
            }
            current = next;
        }
        current
    }

    fn single_pass(lo: f64, hi: f64, max_ticks: f64) -> Self {
        let range = nice_num(hi - lo, false);
        let spacing = nice_num(range / (max_ticks - 1.0), true);
        Self {
            min: snap(lo / spacing, f64::floor) * spacing,
            max: snap(hi / spacing, f64::ceil) * spacing,
            tick_spacing: spacing,
        }
    }

    /// The rounded interval
    pub fn limits(&self) -> HiLoData {
        HiLoData::new(self.min, self.max)
    }
}

/// Round a tick multiple with `round_fn`, unless it already sits on an integer
fn snap(q: f64, round_fn: fn(f64) -> f64) -> f64 {
    let nearest = q.round();
    let tolerance = (SNAP_REL_EPS * nearest.abs()).max(SNAP_EPS);
    if (q - nearest).abs() <= tolerance {
        nearest
    } else {
        round_fn(q)
    }
}

/// Round `range` to 1, 2, 5 or 10 times a power of ten.
///
/// With `round` the nearest nice fraction is chosen (thresholds 1.5, 3, 7),
/// otherwise the smallest nice fraction not below `range`.
pub fn nice_num(range: f64, round: bool) -> f64 {
    let exponent = range.log10().floor();
    let magnitude = 10f64.powf(exponent);
    let fraction = range / magnitude;

    let nice_fraction = if round {
        if fraction < 1.5 {
            1.0
        } else if fraction < 3.0 {
            2.0
        } else if fraction < 7.0 {
            5.0
        } else {
            10.0
        }
    } else if fraction <= 1.0 + SNAP_EPS {
        1.0
    } else if fraction <= 2.0 + SNAP_EPS {
        2.0
    } else if fraction <= 5.0 + SNAP_EPS {
        5.0
    } else {
        10.0
    };

    nice_fraction * magnitude
}

/// Convenience wrapper returning only the rounded interval
pub fn nice_limits(limits: HiLoData) -> HiLoData {
    NiceScale::new(limits).limits()
}
