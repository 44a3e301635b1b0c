use crate::sample::Pt;

/// Displacement from the previous point. Element 0 of an encoded arc is
/// not a delta but the absolute anchor point; decoding is a cumulative
/// sum starting from it.
pub type Delta = [i64; 2];

/// Encodes an absolute point sequence as anchor + consecutive offsets.
///
/// `points[0]` is carried through verbatim, every following element is
/// `points[i] - points[i-1]`. With `drop_zero` set, `[0, 0]` offsets are
/// removed as they are produced. The anchor is never dropped, even when
/// it happens to be `[0, 0]`: position 0 is an absolute point and losing
/// it would shift the whole decode.
pub fn points_to_deltas(points: &[Pt], drop_zero: bool) -> Vec<Delta> {
    let Some(&anchor) = points.first() else {
        return Vec::new();
    };

    let mut deltas: Vec<Delta> = Vec::with_capacity(points.len());
    deltas.push(anchor);

    for w in points.windows(2) {
        let d = [w[1][0] - w[0][0], w[1][1] - w[0][1]];
        if drop_zero && d == [0, 0] {
            continue;
        }
        deltas.push(d);
    }

    deltas
}

/// Cumulative sum from the anchor back to absolute points.
pub fn deltas_to_points(deltas: &[Delta]) -> Vec<Pt> {
    let mut points: Vec<Pt> = Vec::with_capacity(deltas.len());
    let mut x = 0_i64;
    let mut y = 0_i64;
    for d in deltas {
        x += d[0];
        y += d[1];
        points.push([x, y]);
    }
    points
}

/// Merges redundant axis-aligned runs out of an encoded arc.
///
/// Oversampling a straight horizontal or vertical stretch of a curve
/// produces long runs of `[k, 0]` or `[0, k]` micro-offsets. Those runs
/// are folded into a single offset emitted where the direction changes,
/// so decoding still lands on exactly the same turn vertices. Two
/// consecutive offsets qualify for folding only when both move into the
/// same quadrant (component-wise same-or-zero sign) and share a zero
/// axis. Collinear diagonal runs are left alone on purpose: consumers
/// rely on the point density of non-axis-aligned stretches.
///
/// Arcs of four elements or fewer have no room for a foldable run
/// (anchor plus at least one turn are structurally required) and pass
/// through untouched.
pub fn compress_deltas(deltas: &[Delta]) -> Vec<Delta> {
    if deltas.len() <= 4 {
        return deltas.to_vec();
    }

    let last = deltas.len() - 1;
    let mut out: Vec<Delta> = Vec::with_capacity(deltas.len());
    out.push(deltas[0]);

    // Net displacement of the run currently being folded.
    let mut ax = 0_i64;
    let mut ay = 0_i64;

    for i in 1..=last {
        let [cx, cy] = deltas[i];

        if i == last {
            out.push([ax + cx, ay + cy]);
            break;
        }

        let [nx, ny] = deltas[i + 1];
        let same_quadrant = (cx >= 0 && cy >= 0 && nx >= 0 && ny >= 0)
            || (cx <= 0 && cy <= 0 && nx <= 0 && ny <= 0);

        if same_quadrant && cx == 0 && nx == 0 {
            // Vertical run continues.
            ay += cy;
        } else if same_quadrant && cy == 0 && ny == 0 {
            // Horizontal run continues.
            ax += cx;
        } else {
            // Turn point. Close out the run and start over.
            out.push([ax + cx, ay + cy]);
            ax = 0;
            ay = 0;
        }
    }

    out
}
