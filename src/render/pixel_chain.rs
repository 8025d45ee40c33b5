//! Per-pixel decimation chain of an analog curve
//!
//! One node per loaded pixel column, plus the two anchor samples just outside
//! the view. Nodes live in one `Vec` in increasing column order; each knows
//! the index of its predecessor and whether it continues the predecessor's
//! open polyline.
//!
//! Join rule: a node joins its predecessor unless either of them is a gap,
//! or both are envelopes overlapping by more than the overlap threshold
//! (overlapping bars stay individually visible).

use super::simplify::simplify_polyline;
use super::{Bar, CurveGeometry};
use crate::axis::AxisTransform;
use crate::config::RenderSettings;
use crate::types::{DataValue, PixelPoint};

/// Column used for the anchor before the first visible column
pub const LEFT_ANCHOR_COLUMN: i64 = -1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeKind {
    /// Many samples spanning `top..bottom` pixels
    Envelope { top: f64, bottom: f64 },
    Point { y: f64 },
    /// Non-finite data; breaks the curve
    Gap,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelNode {
    pub column: i64,
    pub x: f64,
    pub kind: NodeKind,
    /// Index of the previous node in the chain
    pub prev: Option<usize>,
    /// Continues the predecessor's polyline
    pub joins_prev: bool,
    /// Neither joined to its predecessor nor joined by a successor
    pub standalone: bool,
    /// Sample just outside the view; only drawn as part of a line
    pub anchor: bool,
}

/// Decimated nodes of one analog curve
#[derive(Debug, Clone)]
pub struct PixelChain {
    nodes: Vec<PixelNode>,
    envelope_threshold_px: f64,
    overlap_join_px: f64,
    simplify_tolerance_px: f64,
    simplify_min_chord_px: f64,
}

impl Default for PixelChain {
    fn default() -> Self {
        Self::new(&RenderSettings::default())
    }
}

impl PixelChain {
    pub fn new(settings: &RenderSettings) -> Self {
        Self {
            nodes: Vec::new(),
            envelope_threshold_px: settings.envelope_threshold_px,
            overlap_join_px: settings.overlap_join_px,
            simplify_tolerance_px: settings.simplify_tolerance_px,
            simplify_min_chord_px: settings.simplify_min_chord_px,
        }
    }

    pub fn nodes(&self) -> &[PixelNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Drop all nodes, keeping the allocation
    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Drop every node at or right of `column`
    pub fn truncate_from(&mut self, column: i64) {
        let keep = self.nodes.partition_point(|n| n.column < column);
        self.nodes.truncate(keep);
        if let Some(last) = self.nodes.last_mut() {
            last.standalone = !last.joins_prev;
        }
    }

    /// Append the aggregate of one column, mapped through the y transform
    pub fn push_value(&mut self, column: i64, x: f64, value: DataValue, y: &AxisTransform) {
        let kind = self.kind_of(value, y);
        self.push_node(column, x, kind, false);
    }

    /// Append an anchor sample outside the view at its exact pixel position
    pub fn push_anchor(&mut self, column: i64, x: f64, value: DataValue, y: &AxisTransform) {
        let kind = self.kind_of(value, y);
        self.push_node(column, x, kind, true);
    }

    fn kind_of(&self, value: DataValue, y: &AxisTransform) -> NodeKind {
        if value.is_gap() {
            NodeKind::Gap
        } else {
            match value {
                DataValue::Scalar(v) => NodeKind::Point {
                    y: y.pixel_from_value(v),
                },
                DataValue::Envelope(range) => {
                    let a = y.pixel_from_value(range.lo());
                    let b = y.pixel_from_value(range.hi());
                    let (top, bottom) = if a <= b { (a, b) } else { (b, a) };
                    if bottom - top > self.envelope_threshold_px {
                        NodeKind::Envelope { top, bottom }
                    } else {
                        NodeKind::Point {
                            y: (top + bottom) / 2.0,
                        }
                    }
                }
            }
        }
    }

    /// Append a node; columns must not decrease
    pub fn push(&mut self, column: i64, x: f64, kind: NodeKind) {
        self.push_node(column, x, kind, false);
    }

    fn push_node(&mut self, column: i64, x: f64, kind: NodeKind, anchor: bool) {
        debug_assert!(
            self.nodes.last().map_or(true, |n| n.column <= column),
            "pixel chain columns must not decrease"
        );
        let prev = self.nodes.len().checked_sub(1);
        let joins_prev = match prev.and_then(|i| self.nodes.get(i)) {
            Some(p) => self.joins(&p.kind, &kind),
            None => false,
        };
        if joins_prev {
            if let Some(p) = self.nodes.last_mut() {
                p.standalone = false;
            }
        }
        self.nodes.push(PixelNode {
            column,
            x,
            kind,
            prev,
            joins_prev,
            standalone: !joins_prev,
            anchor,
        });
    }

    fn joins(&self, prev: &NodeKind, next: &NodeKind) -> bool {
        match (prev, next) {
            (NodeKind::Gap, _) | (_, NodeKind::Gap) => false,
            (
                NodeKind::Envelope { top: t0, bottom: b0 },
                NodeKind::Envelope { top: t1, bottom: b1 },
            ) => {
                let overlap = b0.min(*b1) - t0.max(*t1);
                overlap <= self.overlap_join_px
            }
            _ => true,
        }
    }

    /// Turn the chain into drawable geometry
    pub fn geometry(&self) -> CurveGeometry {
        let mut geometry = CurveGeometry {
            node_count: self.nodes.len(),
            ..Default::default()
        };
        let mut run: Vec<PixelPoint> = Vec::new();

        for node in &self.nodes {
            if !node.joins_prev {
                self.flush(&mut run, &mut geometry);
            }
            match node.kind {
                NodeKind::Gap => {}
                // lone anchors lie outside the plot
                _ if node.standalone && node.anchor => {}
                NodeKind::Point { y } if node.standalone => {
                    geometry.dots.push(PixelPoint::new(node.x, y));
                }
                NodeKind::Envelope { top, bottom } if node.standalone => {
                    geometry.bars.push(Bar {
                        x: node.x,
                        top,
                        bottom,
                    });
                }
                NodeKind::Point { y } => run.push(PixelPoint::new(node.x, y)),
                NodeKind::Envelope { top, bottom } => {
                    // enter at the end nearer to where the line comes from
                    let from = run.last().map_or(top, |p| p.y);
                    let (entry, exit) = if (from - top).abs() <= (from - bottom).abs() {
                        (top, bottom)
                    } else {
                        (bottom, top)
                    };
                    run.push(PixelPoint::new(node.x, entry));
                    run.push(PixelPoint::new(node.x, exit));
                }
            }
        }
        self.flush(&mut run, &mut geometry);
        geometry
    }

    fn flush(&self, run: &mut Vec<PixelPoint>, geometry: &mut CurveGeometry) {
        if run.len() >= 2 {
            geometry.polylines.push(simplify_polyline(
                run,
                self.simplify_tolerance_px,
                self.simplify_min_chord_px,
            ));
        }
        run.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::{Axis, Direction};
    use crate::types::HiLoData;

    /// y axis mapping value v to pixel 100 - v over 0..100
    fn y_transform() -> AxisTransform {
        let mut axis = Axis::new(Direction::Y);
        axis.set_length_px(100);
        axis.set_origin(PixelPoint::new(0.0, 100.0));
        axis.axis_limits_mut()
            .set_global_auto_scale_values(HiLoData::new(0.0, 100.0));
        axis.transform()
    }

    fn env(lo: f64, hi: f64) -> DataValue {
        DataValue::Envelope(HiLoData::new(lo, hi))
    }

    #[test]
    fn test_points_join_into_one_polyline() {
        let y = y_transform();
        let mut chain = PixelChain::default();
        for c in 0..5 {
            chain.push_value(c, c as f64, DataValue::Scalar(c as f64 * 3.0), &y);
        }
        assert!(chain.nodes().iter().skip(1).all(|n| n.joins_prev));
        assert!(chain.nodes().iter().all(|n| !n.standalone));
        let g = chain.geometry();
        assert_eq!(g.polylines.len(), 1);
        assert!(g.dots.is_empty());
        assert_eq!(g.node_count, 5);
    }

    #[test]
    fn test_small_envelope_becomes_point() {
        let y = y_transform();
        let mut chain = PixelChain::default();
        chain.push_value(0, 0.5, env(10.0, 11.0), &y);
        assert_eq!(chain.nodes()[0].kind, NodeKind::Point { y: 89.5 });
        chain.push_value(1, 1.5, env(10.0, 20.0), &y);
        assert_eq!(
            chain.nodes()[1].kind,
            NodeKind::Envelope {
                top: 80.0,
                bottom: 90.0
            }
        );
    }

    #[test]
    fn test_overlapping_envelopes_stay_separate() {
        let y = y_transform();
        let mut chain = PixelChain::default();
        chain.push_value(0, 0.5, env(0.0, 50.0), &y);
        chain.push_value(1, 1.5, env(10.0, 60.0), &y);
        // touching within one pixel still joins
        chain.push_value(2, 2.5, env(60.5, 80.0), &y);
        let nodes = chain.nodes();
        assert!(!nodes[1].joins_prev);
        assert!(nodes[2].joins_prev);
        assert!(nodes[0].standalone);
        assert!(!nodes[1].standalone);

        let g = chain.geometry();
        assert_eq!(g.bars.len(), 1);
        assert_eq!(g.polylines.len(), 1);
    }

    #[test]
    fn test_gap_breaks_chain() {
        let y = y_transform();
        let mut chain = PixelChain::default();
        chain.push_value(0, 0.0, DataValue::Scalar(1.0), &y);
        chain.push_value(1, 1.0, DataValue::Scalar(f64::NAN), &y);
        chain.push_value(2, 2.0, DataValue::Scalar(2.0), &y);
        let g = chain.geometry();
        assert!(g.polylines.is_empty());
        assert_eq!(g.dots.len(), 2);
    }

    #[test]
    fn test_lone_anchor_is_not_drawn() {
        let y = y_transform();
        let mut chain = PixelChain::default();
        chain.push_anchor(LEFT_ANCHOR_COLUMN, -12.0, DataValue::Scalar(5.0), &y);
        assert!(chain.nodes()[0].standalone);
        let g = chain.geometry();
        assert!(g.dots.is_empty());
        assert_eq!(g.node_count, 1);

        // joined anchors still lead the line into the view
        chain.push_value(0, 0.5, DataValue::Scalar(6.0), &y);
        chain.push_anchor(100, 104.0, env(0.0, 90.0), &y);
        let g = chain.geometry();
        assert_eq!(g.polylines.len(), 1);
        assert!(g.dots.is_empty());
        assert!(g.bars.is_empty());
    }

    #[test]
    fn test_truncate_restores_standalone() {
        let y = y_transform();
        let mut chain = PixelChain::default();
        chain.push_value(0, 0.0, DataValue::Scalar(1.0), &y);
        chain.push_value(1, 1.0, DataValue::Scalar(2.0), &y);
        chain.push_value(5, 5.0, DataValue::Scalar(3.0), &y);
        assert!(!chain.nodes()[1].standalone);

        chain.truncate_from(2);
        assert_eq!(chain.len(), 2);
        // still joined to its own predecessor
        assert!(!chain.nodes()[1].standalone);

        chain.truncate_from(1);
        assert_eq!(chain.len(), 1);
        assert!(chain.nodes()[0].standalone);
    }

    #[test]
    fn test_envelope_in_polyline_has_entry_and_exit() {
        let y = y_transform();
        let settings = RenderSettings {
            simplify_tolerance_px: 0.0,
            ..Default::default()
        };
        let mut chain = PixelChain::new(&settings);
        chain.push_value(0, 0.0, DataValue::Scalar(90.0), &y);
        chain.push_value(1, 1.0, env(0.0, 50.0), &y);
        let g = chain.geometry();
        assert_eq!(
            g.polylines[0],
            vec![
                PixelPoint::new(0.0, 10.0),
                PixelPoint::new(1.0, 50.0),
                PixelPoint::new(1.0, 100.0),
            ]
        );
    }
}
