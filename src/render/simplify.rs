//! Collinearity simplification of polylines
//!
//! A vertex is dropped when it lies within `tolerance` pixels of the chord
//! from the last kept vertex to the next one. Vertices are only dropped once
//! that chord is at least `min_chord` pixels long, and never where the
//! vertical direction flips, so local extrema survive exactly.

use crate::types::PixelPoint;

/// Simplify `points`; the first and last vertex are always kept
pub fn simplify_polyline(points: &[PixelPoint], tolerance: f64, min_chord: f64) -> Vec<PixelPoint> {
    if points.len() <= 2 || !(tolerance > 0.0) {
        return points.to_vec();
    }

    let mut kept = Vec::with_capacity(points.len());
    kept.push(points[0]);
    // first index after the last kept vertex
    let mut skipped_from = 1;

    for i in 1..points.len() - 1 {
        let anchor = kept[kept.len() - 1];
        let (b, c) = (points[i], points[i + 1]);

        let droppable = !is_extremum(anchor, b, c)
            && distance(anchor, c) >= min_chord
            && points[skipped_from..=i]
                .iter()
                .all(|p| chord_distance(*p, anchor, c) < tolerance);

        if !droppable {
            kept.push(b);
            skipped_from = i + 1;
        }
    }
    kept.push(points[points.len() - 1]);
    kept
}

/// `b` is a strict local minimum or maximum in y
fn is_extremum(a: PixelPoint, b: PixelPoint, c: PixelPoint) -> bool {
    (b.y - a.y) * (c.y - b.y) < 0.0
}

fn distance(a: PixelPoint, b: PixelPoint) -> f64 {
    (b.x - a.x).hypot(b.y - a.y)
}

/// Perpendicular distance of `p` from the line through `a` and `c`
fn chord_distance(p: PixelPoint, a: PixelPoint, c: PixelPoint) -> f64 {
    let length = distance(a, c);
    if length == 0.0 {
        return distance(a, p);
    }
    // twice the signed triangle area over the base
    let area2 = (c.x - a.x) * (p.y - a.y) - (c.y - a.y) * (p.x - a.x);
    area2.abs() / length
}
