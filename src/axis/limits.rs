//! Visible-range state machine of one axis
//!
//! An axis shows either the global autoscale range (all data), a local
//! autoscale range (data inside the current view of the other axis), zoomed
//! limits set by the user, or manual limits when autoscaling is switched off.
//!
//! # Main Types
//!
//! - [`AxisLimits`] - The state machine with its undo history
//! - [`Clipping`] - Which range an autoscaled axis shows

use crate::axis::nice_scale::nice_limits;
use crate::types::HiLoData;
use std::collections::VecDeque;

/// Default depth of the zoom undo history
pub const DEFAULT_HISTORY_DEPTH: usize = 32;

/// Which range an autoscaled axis shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Clipping {
    #[default]
    GlobalAuto,
    LocalAuto,
    Zoomed,
}

/// Visible range of an axis
#[derive(Debug, Clone)]
pub struct AxisLimits {
    auto_scale_global: HiLoData,
    auto_scale_local: Option<HiLoData>,
    clipping: Clipping,
    saved_limits: Option<HiLoData>,
    zoomed_limits: Option<HiLoData>,
    value_scale_local: HiLoData,
    user_scale: Option<HiLoData>,
    is_auto_enabled: bool,
    nice_scale: bool,
    common_zero: bool,
    history: VecDeque<HiLoData>,
    history_depth: usize,
}

impl Default for AxisLimits {
    fn default() -> Self {
        Self::with_history_depth(DEFAULT_HISTORY_DEPTH)
    }
}

impl AxisLimits {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create limits whose undo history keeps at most `depth` entries
    pub fn with_history_depth(depth: usize) -> Self {
        Self {
            auto_scale_global: HiLoData::ZERO_ONE,
            auto_scale_local: None,
            clipping: Clipping::GlobalAuto,
            saved_limits: None,
            zoomed_limits: None,
            value_scale_local: HiLoData::ZERO_ONE,
            user_scale: None,
            is_auto_enabled: true,
            nice_scale: false,
            common_zero: false,
            history: VecDeque::new(),
            history_depth: depth.max(1),
        }
    }

    pub fn clipping(&self) -> Clipping {
        self.clipping
    }

    pub fn is_auto_enabled(&self) -> bool {
        self.is_auto_enabled
    }

    pub fn is_nice_scale(&self) -> bool {
        self.nice_scale
    }

    pub fn is_common_zero(&self) -> bool {
        self.common_zero
    }

    /// Enable or disable autoscaling.
    ///
    /// Disabling freezes the current limits as manual limits, or the user
    /// scale if one was set.
    pub fn set_auto_enabled(&mut self, enabled: bool) {
        if !enabled {
            self.value_scale_local = match self.user_scale {
                Some(user) => user,
                None => self.limits(),
            };
        }
        self.is_auto_enabled = enabled;
    }

    /// The interval currently shown. Always finite and non-degenerate.
    pub fn limits(&self) -> HiLoData {
        if !self.is_auto_enabled {
            return sanitize(self.value_scale_local);
        }
        match self.clipping {
            Clipping::GlobalAuto => self.auto_range(self.auto_scale_global()),
            Clipping::LocalAuto => {
                let local = self
                    .auto_scale_local
                    .map(|l| self.symmetric_if_enabled(l))
                    .unwrap_or_else(|| self.auto_scale_global());
                self.auto_range(local)
            }
            Clipping::Zoomed => sanitize(self.zoomed_limits.unwrap_or(self.auto_scale_global)),
        }
    }

    fn auto_range(&self, range: HiLoData) -> HiLoData {
        let range = sanitize(range);
        if self.nice_scale {
            nice_limits(range)
        } else {
            range
        }
    }

    fn symmetric_if_enabled(&self, range: HiLoData) -> HiLoData {
        if self.common_zero && range.is_valid_number() {
            let max = range.lo().abs().max(range.hi().abs());
            HiLoData::new(-max, max)
        } else {
            range
        }
    }

    /// Global autoscale range, made symmetric around zero if enabled
    pub fn auto_scale_global(&self) -> HiLoData {
        self.symmetric_if_enabled(self.auto_scale_global)
    }

    pub fn set_global_auto_scale_values(&mut self, range: HiLoData) {
        if !range.is_valid_number() {
            tracing::warn!("Ignoring non-finite global autoscale {:?}", range);
            return;
        }
        self.auto_scale_global = range;
    }

    pub fn set_local_auto_scale_values(&mut self, range: HiLoData) {
        self.auto_scale_local = Some(range);
    }

    /// Set manual limits, also remembered as the user scale
    pub fn set_value_scale_local(&mut self, range: HiLoData) {
        self.value_scale_local = range;
        self.user_scale = Some(range);
    }

    pub fn set_user_scale(&mut self, range: Option<HiLoData>) {
        self.user_scale = range;
    }

    pub fn user_scale(&self) -> Option<HiLoData> {
        self.user_scale
    }

    pub fn set_nice_scale(&mut self, nice: bool) {
        self.nice_scale = nice;
    }

    pub fn set_common_zero(&mut self, common_zero: bool) {
        self.common_zero = common_zero;
    }

    /// Zoom to `range`, optionally nice-scaled. The previous limits go onto the undo history.
    pub fn set_zoom_values(&mut self, range: HiLoData, nice: bool) {
        self.push_history_stack();
        let zoomed = if nice { nice_limits(sanitize(range)) } else { range };
        self.zoomed_limits = Some(zoomed);
        self.value_scale_local = zoomed;
        self.clipping = Clipping::Zoomed;
    }

    fn push_history_stack(&mut self) {
        let current = self.limits();
        if self.history.back() == Some(&current) {
            return;
        }
        self.history.push_back(current);
        while self.history.len() > self.history_depth {
            self.history.pop_front();
        }
    }

    /// Replace the zoomed limits without touching the undo history (pan gestures)
    pub fn set_panned_values(&mut self, range: HiLoData) {
        self.zoomed_limits = Some(range);
        self.value_scale_local = range;
        self.clipping = Clipping::Zoomed;
    }

    /// Undo the last zoom. No-op when the history is empty.
    pub fn pop_history_stack(&mut self) {
        let Some(previous) = self.history.pop_back() else {
            return;
        };
        self.zoomed_limits = Some(previous);
        self.value_scale_local = previous;
        self.clipping = Clipping::Zoomed;
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn save_values(&mut self) {
        self.saved_limits = Some(self.limits());
    }

    /// Restore limits stored with [`save_values`](Self::save_values).
    /// Does nothing when nothing has been saved.
    pub fn load_from_saved(&mut self) {
        let Some(saved) = self.saved_limits else {
            return;
        };
        self.push_history_stack();
        self.zoomed_limits = Some(saved);
        self.value_scale_local = saved;
        self.clipping = Clipping::Zoomed;
    }

    /// Show the full data range again
    pub fn global_fit(&mut self) {
        self.value_scale_local = self.auto_scale_global;
        self.clipping = Clipping::GlobalAuto;
    }

    pub fn set_local_fit(&mut self) {
        self.clipping = Clipping::LocalAuto;
    }
}

/// Replace invalid intervals and widen degenerate ones so they can be mapped to pixels
pub fn sanitize(range: HiLoData) -> HiLoData {
    if !range.is_valid_number() {
        return HiLoData::ZERO_ONE;
    }
    if range.is_degenerate() {
        let v = range.lo();
        if v == 0.0 {
            return HiLoData::new(-1.0, 1.0);
        }
        let delta = v.abs() * 0.1;
        return HiLoData::new(v - delta, v + delta);
    }
    range
}
