use kurbo::BezPath;

use crate::sample::Pt;

pub fn bez(d: &str) -> BezPath {
    BezPath::from_svg(d).unwrap_or_else(|e| panic!("invalid path data '{d}': {e}"))
}

/// Closed staircase ring: n unit steps right then up along the
/// diagonal, then straight back along the top and left edges. Every
/// step is a turn, so compression must keep all of them.
pub fn staircase_ring(n: i64) -> Vec<Pt> {
    assert!(n >= 1, "staircase needs at least one step");

    let mut points: Vec<Pt> = vec![[0, 0]];
    for i in 0..n {
        points.push([i + 1, i]);
        points.push([i + 1, i + 1]);
    }
    points.push([0, n]);
    points.push([0, 0]);
    points
}
