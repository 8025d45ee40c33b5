//! Viewport-diff reload controller
//!
//! A [`DataLoader`] remembers what one curve loaded last time (container,
//! axes, last sample index, loaded columns) and decides on each frame whether
//! the curve needs a full reload, an extension of its right end, or nothing.
//!
//! ```text
//! container swapped ............ Full
//! x / y axis hash changed ...... Full
//! forced ....................... Full
//! series shrank (reset) ........ Full
//! new samples, no right anchor . Extend(last loaded column ..)
//! otherwise .................... Unchanged
//! ```

use super::Columns;
use crate::axis::Axis;
use crate::source::{ContainerId, DataSource};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::ops::Range;

/// Columns re-read at the old right end when extending
const EXTEND_OVERLAP_COLUMNS: usize = 3;

/// What a load covers: the pixel columns that may hold samples, plus the
/// nearest samples just outside the view on both sides
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extent {
    /// Last sample at or before the visible start
    pub left_anchor: Option<usize>,
    pub columns: Range<usize>,
    /// First sample after the visible end
    pub right_anchor: Option<usize>,
}

impl Extent {
    pub(crate) fn compute<S: DataSource + ?Sized>(source: &S, row: usize, columns: &Columns) -> Self {
        let Some(max) = source.maximum_time_index(row) else {
            return Self::default();
        };
        let (t_left, t_right) = columns.visible();
        let t_first = source.time_value(0, row);
        let t_last = source.time_value(max, row);

        let left_anchor = (t_first <= t_left).then(|| source.find_time_index(t_left, row));
        let right_anchor = if t_last <= t_right {
            None
        } else if t_first > t_right {
            Some(0)
        } else {
            Some(source.find_time_index(t_right, row) + 1).filter(|&i| i <= max)
        };

        let width = columns.width();
        let columns = if width == 0 || t_last <= t_left || t_first > t_right {
            0..0
        } else {
            // one column of slack on each side absorbs rounding in column_of
            let start = if t_first > t_left {
                columns.column_of(t_first).saturating_sub(1)
            } else {
                0
            };
            let end = if right_anchor.is_some() {
                width
            } else {
                (columns.column_of(t_last) + 2).min(width)
            };
            start..end
        };

        Self {
            left_anchor,
            columns,
            right_anchor,
        }
    }
}

/// Action a curve has to take to bring its chain up to date
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadRequest {
    /// Drop everything and load `extent`
    Full(Extent),
    /// Drop the columns from `from_column` on and load them again up to `extent.columns.end`
    Extend { from_column: usize, extent: Extent },
    Unchanged,
}

/// Per-curve reload bookkeeping
#[derive(Debug, Clone, Default)]
pub struct DataLoader {
    container: Option<ContainerId>,
    axes_hash: Option<u64>,
    max_index: Option<usize>,
    extent: Option<Extent>,
}

impl DataLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the loaded state; the next plan is a full reload
    pub fn invalidate(&mut self) {
        *self = Self::default();
    }

    pub fn loaded_extent(&self) -> Option<&Extent> {
        self.extent.as_ref()
    }

    /// Decide how to load `row` for the current axes, and record the outcome
    /// as loaded.
    pub fn plan<S: DataSource + ?Sized>(
        &mut self,
        source: &S,
        row: usize,
        x_axis: &Axis,
        y_axis: &Axis,
        force: bool,
    ) -> LoadRequest {
        let id = source.container_id();
        let hash = sensitive_axes_hash(x_axis, y_axis);
        let max_index = source.maximum_time_index(row);
        let columns = Columns::new(
            x_axis.transform(),
            x_axis.origin().x,
            x_axis.length_px() as usize,
        );

        let full_reason = if self.container != Some(id) {
            Some("container changed")
        } else if self.axes_hash != Some(hash) {
            Some("axes changed")
        } else if force {
            Some("forced")
        } else if max_index < self.max_index {
            Some("series shrank")
        } else {
            None
        };

        let request = match (full_reason, self.extent.as_ref()) {
            (Some(reason), _) => {
                tracing::trace!("Full reload of row {}: {}", row, reason);
                LoadRequest::Full(Extent::compute(source, row, &columns))
            }
            (None, None) => LoadRequest::Full(Extent::compute(source, row, &columns)),
            (None, Some(_)) if max_index == self.max_index => LoadRequest::Unchanged,
            // samples appended past the right edge are not visible
            (None, Some(previous)) if previous.right_anchor.is_some() => LoadRequest::Unchanged,
            (None, Some(previous)) => {
                let extent = Extent::compute(source, row, &columns);
                extend_or_full(previous, extent)
            }
        };

        self.container = Some(id);
        self.axes_hash = Some(hash);
        self.max_index = max_index;
        match &request {
            LoadRequest::Full(extent) | LoadRequest::Extend { extent, .. } => {
                self.extent = Some(extent.clone());
            }
            LoadRequest::Unchanged => {}
        }
        request
    }
}

fn extend_or_full(previous: &Extent, extent: Extent) -> LoadRequest {
    if previous.left_anchor != extent.left_anchor {
        tracing::trace!("Left anchor moved, full reload");
        return LoadRequest::Full(extent);
    }
    if previous.columns.is_empty() {
        return LoadRequest::Extend {
            from_column: extent.columns.start,
            extent,
        };
    }
    if previous.columns.start != extent.columns.start {
        return LoadRequest::Full(extent);
    }
    let from_column = previous
        .columns
        .end
        .saturating_sub(EXTEND_OVERLAP_COLUMNS)
        .max(previous.columns.start);
    LoadRequest::Extend {
        from_column,
        extent,
    }
}

/// Digest of the x axis and the curve's y axis
pub fn sensitive_axes_hash(x_axis: &Axis, y_axis: &Axis) -> u64 {
    let mut hasher = DefaultHasher::new();
    x_axis.axis_hash().hash(&mut hasher);
    y_axis.axis_hash().hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::Direction;
    use crate::series::TimeSeriesKind;
    use crate::source::DataContainer;
    use crate::types::HiLoData;

    fn x_axis(lo: f64, hi: f64, width: u32) -> Axis {
        let mut axis = Axis::new(Direction::X);
        axis.set_length_px(width);
        axis.axis_limits_mut()
            .set_global_auto_scale_values(HiLoData::new(lo, hi));
        axis
    }

    fn container(times: impl IntoIterator<Item = f64>) -> DataContainer {
        let mut c = DataContainer::new(1, TimeSeriesKind::Array);
        for t in times {
            c.insert_values_at_end(&[t as f32], t).unwrap();
        }
        c
    }

    #[test]
    fn test_first_plan_is_full_then_unchanged() {
        let c = container((0..6).map(|i| i as f64));
        let (x, y) = (x_axis(0.0, 10.0, 100), Axis::new(Direction::Y));
        let mut loader = DataLoader::new();
        assert!(matches!(loader.plan(&c, 0, &x, &y, false), LoadRequest::Full(_)));
        assert_eq!(loader.plan(&c, 0, &x, &y, false), LoadRequest::Unchanged);
        assert!(matches!(loader.plan(&c, 0, &x, &y, true), LoadRequest::Full(_)));
    }

    #[test]
    fn test_extent_anchors() {
        let c = container((0..100).map(|i| i as f64));
        let (x, y) = (x_axis(10.5, 20.5, 100), Axis::new(Direction::Y));
        let mut loader = DataLoader::new();
        let LoadRequest::Full(extent) = loader.plan(&c, 0, &x, &y, false) else {
            panic!("expected full reload");
        };
        assert_eq!(extent.left_anchor, Some(10));
        assert_eq!(extent.right_anchor, Some(21));
        assert_eq!(extent.columns, 0..100);
    }

    #[test]
    fn test_append_extends() {
        let mut c = container((0..6).map(|i| i as f64));
        let (x, y) = (x_axis(0.0, 10.0, 100), Axis::new(Direction::Y));
        let mut loader = DataLoader::new();
        let LoadRequest::Full(extent) = loader.plan(&c, 0, &x, &y, false) else {
            panic!("expected full reload");
        };
        assert_eq!(extent.columns, 0..51);
        assert_eq!(extent.left_anchor, Some(0));

        c.insert_values_at_end(&[6.0], 6.0).unwrap();
        c.insert_values_at_end(&[7.0], 7.0).unwrap();
        match loader.plan(&c, 0, &x, &y, false) {
            LoadRequest::Extend {
                from_column,
                extent,
            } => {
                assert_eq!(from_column, 48);
                assert_eq!(extent.columns, 0..71);
            }
            other => panic!("expected extension, got {:?}", other),
        }
    }

    #[test]
    fn test_append_behind_right_edge_is_unchanged() {
        let mut c = container((0..20).map(|i| i as f64));
        let (x, y) = (x_axis(0.0, 10.0, 100), Axis::new(Direction::Y));
        let mut loader = DataLoader::new();
        loader.plan(&c, 0, &x, &y, false);
        c.insert_values_at_end(&[20.0], 20.0).unwrap();
        assert_eq!(loader.plan(&c, 0, &x, &y, false), LoadRequest::Unchanged);
    }

    #[test]
    fn test_zoom_and_container_swap_reload_fully() {
        let c = container((0..6).map(|i| i as f64));
        let (mut x, y) = (x_axis(0.0, 10.0, 100), Axis::new(Direction::Y));
        let mut loader = DataLoader::new();
        loader.plan(&c, 0, &x, &y, false);

        x.do_mouse_wheel_zoom(50.0, 1);
        assert!(matches!(loader.plan(&c, 0, &x, &y, false), LoadRequest::Full(_)));

        let other = container((0..6).map(|i| i as f64));
        assert!(matches!(loader.plan(&other, 0, &x, &y, false), LoadRequest::Full(_)));
    }

    #[test]
    fn test_reset_container_reloads_fully() {
        let mut c = container((0..6).map(|i| i as f64));
        let (x, y) = (x_axis(0.0, 10.0, 100), Axis::new(Direction::Y));
        let mut loader = DataLoader::new();
        loader.plan(&c, 0, &x, &y, false);
        c.clear();
        c.insert_values_at_end(&[1.0], 1.0).unwrap();
        assert!(matches!(loader.plan(&c, 0, &x, &y, false), LoadRequest::Full(_)));
    }

    #[test]
    fn test_empty_row() {
        let c = DataContainer::new(1, TimeSeriesKind::Block);
        let (x, y) = (x_axis(0.0, 10.0, 100), Axis::new(Direction::Y));
        let mut loader = DataLoader::new();
        assert_eq!(
            loader.plan(&c, 0, &x, &y, false),
            LoadRequest::Full(Extent::default())
        );
        assert_eq!(loader.plan(&c, 0, &x, &y, false), LoadRequest::Unchanged);
        loader.invalidate();
        assert!(loader.loaded_extent().is_none());
    }
}
