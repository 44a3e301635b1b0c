use kurbo::{BezPath, ParamCurve};

use crate::error::TopoError;

/// Rounded integer point, `[x, y]`.
pub type Pt = [i64; 2];

/// Samples every segment of a curve at `samples + 1` evenly spaced
/// parameters and rounds to integer coordinates.
///
/// Segments are sampled independently and concatenated, so the point
/// shared by two consecutive segments shows up twice. That duplicate is
/// harmless: downstream delta encoding turns it into a `[0, 0]` offset
/// which either survives verbatim or is filtered out, depending on
/// settings. With `mirrored` set the y axis is flipped before rounding,
/// matching screen-space sources whose y grows downward.
pub fn sample_path(path: &BezPath, samples: u32, mirrored: bool) -> Vec<Pt> {
    assert!(samples >= 1, "sample count must be at least 1");

    let n_segs = path.segments().count();
    let mut points: Vec<Pt> = Vec::with_capacity(n_segs * (samples as usize + 1));

    for seg in path.segments() {
        for i in 0..=samples {
            let t = f64::from(i) / f64::from(samples);
            let p = seg.eval(t);
            let y = if mirrored { -p.y } else { p.y };
            points.push([p.x.round() as i64, y.round() as i64]);
        }
    }

    points
}

/// Appends a copy of the first point when the sequence does not already
/// end on it. A single point is trivially closed and passes through.
pub fn close_ring(points: &mut Vec<Pt>) -> Result<(), TopoError> {
    let Some(&first) = points.first() else {
        return Err(TopoError::EmptyPath);
    };

    if points.last() != Some(&first) {
        points.push(first);
    }

    Ok(())
}
