use core::ops::{Add, Sub};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point2i {
    pub x: i32,
    pub y: i32,
}

impl Point2i {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn to_f32(self) -> Point2f {
        Point2f {
            x: self.x as f32,
            y: self.y as f32,
        }
    }

    pub fn distance(self, rhs: Self) -> f32 {
        self.to_f32().distance(rhs.to_f32())
    }
}

impl Add for Point2i {
    type Output = Point2i;

    fn add(self, rhs: Self) -> Self::Output {
        Point2i {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl Sub for Point2i {
    type Output = Point2i;

    fn sub(self, rhs: Self) -> Self::Output {
        Point2i {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point2f {
    pub x: f32,
    pub y: f32,
}

impl Point2f {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, rhs: Self) -> f32 {
        let dx = self.x - rhs.x;
        let dy = self.y - rhs.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn round_to_i32(self) -> Point2i {
        Point2i {
            x: self.x.round() as i32,
            y: self.y.round() as i32,
        }
    }
}

/// Axis-aligned rectangle in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// Grows the rectangle by `margin` on every side.
    pub fn expanded(self, margin: i32) -> Rect {
        Rect {
            x: self.x - margin,
            y: self.y - margin,
            width: self.width + 2 * margin,
            height: self.height + 2 * margin,
        }
    }

    /// The rectangle as a 4-vertex polygon, top-left first.
    pub fn corners(self) -> Polygon {
        Polygon::new(vec![
            Point2i::new(self.x, self.y),
            Point2i::new(self.x + self.width, self.y),
            Point2i::new(self.x + self.width, self.y + self.height),
            Point2i::new(self.x, self.y + self.height),
        ])
    }
}

/// A polygon as its vertices in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Polygon {
    pub points: Vec<Point2i>,
}

impl Polygon {
    pub fn new(points: Vec<Point2i>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Mean of the vertices.
    pub fn centroid(&self) -> Point2f {
        if self.points.is_empty() {
            return Point2f::default();
        }

        let mut sx = 0.0_f32;
        let mut sy = 0.0_f32;
        for p in &self.points {
            sx += p.x as f32;
            sy += p.y as f32;
        }

        let n = self.points.len() as f32;
        Point2f::new(sx / n, sy / n)
    }

    /// Rotates the polygon about its centroid by `angle_deg` degrees and
    /// rounds the result back to integer coordinates.
    pub fn rotated(&self, angle_deg: f32) -> Polygon {
        let c = self.centroid();
        let rad = angle_deg.to_radians();
        let (sin, cos) = rad.sin_cos();

        let points = self
            .points
            .iter()
            .map(|p| {
                let dx = p.x as f32 - c.x;
                let dy = p.y as f32 - c.y;
                Point2f::new(c.x + dx * cos - dy * sin, c.y + dx * sin + dy * cos)
                    .round_to_i32()
            })
            .collect();

        Polygon { points }
    }

    pub fn translated(&self, dx: i32, dy: i32) -> Polygon {
        let points = self
            .points
            .iter()
            .map(|p| Point2i::new(p.x + dx, p.y + dy))
            .collect();
        Polygon { points }
    }

    /// Axis-aligned bounding rectangle. Empty polygons map to a zero rect.
    pub fn bounding_rect(&self) -> Rect {
        let Some(first) = self.points.first() else {
            return Rect {
                x: 0,
                y: 0,
                width: 0,
                height: 0,
            };
        };

        let mut min_x = first.x;
        let mut min_y = first.y;
        let mut max_x = first.x;
        let mut max_y = first.y;
        for p in &self.points[1..] {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }

        Rect {
            x: min_x,
            y: min_y,
            width: max_x - min_x,
            height: max_y - min_y,
        }
    }

    /// Closed-loop perimeter length.
    pub fn perimeter(&self) -> f32 {
        closed_arc_length_i32(&self.points)
    }

    /// Absolute enclosed area (shoelace).
    pub fn area(&self) -> f32 {
        signed_area_i32(&self.points).abs()
    }

    /// Iterates over closed edges `(v[i], v[i+1])`, wrapping at the end.
    pub fn edges(&self) -> impl Iterator<Item = (Point2i, Point2i)> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }
}

/// Length of the closed polyline through `points`, wrapping at the end.
pub fn closed_arc_length_i32(points: &[Point2i]) -> f32 {
    let n = points.len();
    if n < 2 {
        return 0.0;
    }

    let mut len = 0.0_f32;
    let mut prev = points[n - 1];
    for &p in points {
        len += prev.distance(p);
        prev = p;
    }
    len
}

/// Signed shoelace area of the closed polyline through `points`.
pub fn signed_area_i32(points: &[Point2i]) -> f32 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }

    // i64 accumulation keeps the cross products exact for pixel coordinates.
    let mut twice = 0_i64;
    let mut prev = points[n - 1];
    for &p in points {
        twice += (prev.x as i64) * (p.y as i64) - (p.x as i64) * (prev.y as i64);
        prev = p;
    }
    twice as f32 * 0.5
}

fn signed_area_f32(points: &[Point2f]) -> f32 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }

    let mut twice = 0.0_f32;
    let mut prev = points[n - 1];
    for &p in points {
        twice += prev.x * p.y - p.x * prev.y;
        prev = p;
    }
    twice * 0.5
}

/// Intersection area of two convex polygons via Sutherland-Hodgman clipping.
///
/// Both inputs are normalized to positive signed area before clipping, so the
/// caller's winding does not matter. Non-convex inputs give the clipped area
/// of their convex interpretation of the edge sequence.
pub fn convex_intersection_area(a: &Polygon, b: &Polygon) -> f32 {
    if a.len() < 3 || b.len() < 3 {
        return 0.0;
    }

    let subject = oriented_f32(&a.points);
    let clip = oriented_f32(&b.points);

    let mut current = subject;
    let n = clip.len();
    for i in 0..n {
        if current.is_empty() {
            return 0.0;
        }
        current = clip_by_edge(&current, clip[i], clip[(i + 1) % n]);
    }

    signed_area_f32(&current).abs()
}

fn oriented_f32(points: &[Point2i]) -> Vec<Point2f> {
    let mut out: Vec<Point2f> = points.iter().map(|p| p.to_f32()).collect();
    if signed_area_i32(points) < 0.0 {
        out.reverse();
    }
    out
}

/// Keeps the part of `subject` on the left of the directed edge `a -> b`.
fn clip_by_edge(subject: &[Point2f], a: Point2f, b: Point2f) -> Vec<Point2f> {
    const EPS: f32 = 1e-6;

    let inside = |p: Point2f| -> bool {
        (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x) >= -EPS
    };

    let mut out = Vec::with_capacity(subject.len() + 1);
    let mut prev = subject[subject.len() - 1];
    let mut prev_inside = inside(prev);

    for &cur in subject {
        let cur_inside = inside(cur);
        if prev_inside != cur_inside {
            if let Some(x) = edge_line_intersection(prev, cur, a, b) {
                out.push(x);
            }
        }
        if cur_inside {
            out.push(cur);
        }
        prev = cur;
        prev_inside = cur_inside;
    }

    out
}

fn edge_line_intersection(p1: Point2f, p2: Point2f, a: Point2f, b: Point2f) -> Option<Point2f> {
    let d_seg = Point2f::new(p2.x - p1.x, p2.y - p1.y);
    let d_clip = Point2f::new(b.x - a.x, b.y - a.y);

    let den = d_clip.y * d_seg.x - d_clip.x * d_seg.y;
    if den.abs() < 1e-10 {
        return None;
    }

    let t = (d_clip.x * (p1.y - a.y) - d_clip.y * (p1.x - a.x)) / den;
    Some(Point2f::new(p1.x + t * d_seg.x, p1.y + t * d_seg.y))
}
