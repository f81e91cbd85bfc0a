use sm_core::{Point2i, Polygon};

/// Simplifies a closed contour to a polygon whose vertices deviate from the
/// original boundary by at most `epsilon` pixels.
///
/// The contour is split at two mutually distant vertices (both necessarily on
/// the convex hull), each half is simplified with Douglas-Peucker, and the
/// halves are stitched back together. Splitting at hull vertices keeps the
/// result independent of the tracer's starting pixel, which may lie in the
/// middle of a straight edge.
pub fn approx_polygon(contour: &[Point2i], epsilon: f32) -> Polygon {
    if contour.len() < 3 {
        return Polygon::new(contour.to_vec());
    }

    let a = farthest_from(contour, contour[0]);
    let b = farthest_from(contour, contour[a]);
    if contour[a] == contour[b] {
        // Fully degenerate contour, every point coincides.
        return Polygon::new(vec![contour[0]]);
    }
    let (lo, hi) = if a < b { (a, b) } else { (b, a) };

    // Two open chains: lo..=hi, and hi..end wrapped around through lo.
    let first = &contour[lo..=hi];
    let mut second: Vec<Point2i> = contour[hi..].to_vec();
    second.extend_from_slice(&contour[..=lo]);

    let mut out = simplify_open(first, epsilon);
    let tail = simplify_open(&second, epsilon);
    // Both chains carry the shared anchors; keep each exactly once.
    out.extend_from_slice(&tail[1..tail.len() - 1]);

    Polygon::new(out)
}

fn farthest_from(points: &[Point2i], origin: Point2i) -> usize {
    let mut best = 0;
    let mut best_d2 = -1_i64;
    for (i, p) in points.iter().enumerate() {
        let dx = (p.x - origin.x) as i64;
        let dy = (p.y - origin.y) as i64;
        let d2 = dx * dx + dy * dy;
        if d2 > best_d2 {
            best_d2 = d2;
            best = i;
        }
    }
    best
}

/// Douglas-Peucker on an open chain; first and last points are always kept.
fn simplify_open(chain: &[Point2i], epsilon: f32) -> Vec<Point2i> {
    if chain.len() <= 2 {
        return chain.to_vec();
    }

    let first = chain[0];
    let last = chain[chain.len() - 1];

    let mut split = 0;
    let mut max_dist = 0.0_f32;
    for (i, &p) in chain.iter().enumerate().skip(1).take(chain.len() - 2) {
        let d = point_segment_distance(p, first, last);
        if d > max_dist {
            max_dist = d;
            split = i;
        }
    }

    if max_dist <= epsilon {
        return vec![first, last];
    }

    let mut left = simplify_open(&chain[..=split], epsilon);
    let right = simplify_open(&chain[split..], epsilon);
    left.pop();
    left.extend(right);
    left
}

fn point_segment_distance(p: Point2i, a: Point2i, b: Point2i) -> f32 {
    let dx = (b.x - a.x) as f32;
    let dy = (b.y - a.y) as f32;
    let len = (dx * dx + dy * dy).sqrt();
    if len < f32::EPSILON {
        return p.distance(a);
    }

    ((p.x - a.x) as f32 * dy - (p.y - a.y) as f32 * dx).abs() / len
}
