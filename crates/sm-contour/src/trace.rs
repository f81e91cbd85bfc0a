use sm_core::{Image, Point2i, closed_arc_length_i32, signed_area_i32};

/// One traced boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contour {
    /// Boundary pixel centers in trace order.
    pub points: Vec<Point2i>,
    /// True if this border encloses a hole inside another component.
    pub hole: bool,
}

impl Contour {
    /// Closed boundary length.
    pub fn perimeter(&self) -> f32 {
        closed_arc_length_i32(&self.points)
    }

    /// Absolute enclosed area (shoelace over the boundary pixel centers).
    pub fn area(&self) -> f32 {
        signed_area_i32(&self.points).abs()
    }
}

/// Clockwise-starting 8-neighborhood sweep offsets, east first.
const NEIGHBORHOOD: [(i32, i32); 8] = [
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

fn neighborhood_deltas(row_stride: i32) -> [i32; 16] {
    let mut deltas = [0i32; 16];
    for (i, &(dx, dy)) in NEIGHBORHOOD.iter().enumerate() {
        let delta = dx + dy * row_stride;
        deltas[i] = delta;
        deltas[i + 8] = delta;
    }
    deltas
}

/// Copies the image into an `(width + 2) * (height + 2)` scratch grid with a
/// zero border; nonzero pixels become 1.
fn padded_grid(bin: &Image<u8>) -> Vec<i32> {
    let width = bin.width();
    let height = bin.height();
    let stride = width + 2;

    let mut grid = vec![0i32; stride * (height + 2)];
    for y in 0..height {
        let dst = (y + 1) * stride + 1;
        for (x, &px) in bin.row(y).iter().enumerate() {
            if px != 0 {
                grid[dst + x] = 1;
            }
        }
    }
    grid
}

/// Traces a single border starting at `pos`, marking visited pixels with
/// `label` (negated where the border leaves the component to the right).
fn follow_border(
    grid: &mut [i32],
    pos: usize,
    label: i32,
    start: Point2i,
    hole: bool,
    deltas: &[i32; 16],
) -> Contour {
    let mut points = Vec::new();
    let mut point = start;

    // Initial probe direction: west for outer borders, east for holes.
    let mut dir: usize = if hole { 0 } else { 4 };
    let mut dir_end = dir;

    let mut probe;
    loop {
        dir = dir.wrapping_sub(1) & 7;
        probe = (pos as isize + deltas[dir] as isize) as usize;
        if grid[probe] != 0 {
            break;
        }
        if dir == dir_end {
            break;
        }
    }

    if dir == dir_end {
        // Isolated pixel.
        grid[pos] = -label;
        points.push(point);
        return Contour { points, hole };
    }

    let mut cur = pos;
    loop {
        dir_end = dir;

        let mut next;
        loop {
            dir = (dir + 1) & 15;
            next = (cur as isize + deltas[dir] as isize) as usize;
            if grid[next] != 0 {
                break;
            }
        }
        dir &= 7;

        // Suzuki labelling: negative where the east neighbor was examined
        // and found empty, positive otherwise.
        let crossed_right = (dir.wrapping_sub(1) as u32) < dir_end as u32;
        if crossed_right {
            grid[cur] = -label;
        } else if grid[cur] == 1 {
            grid[cur] = label;
        }

        points.push(point);
        point.x += NEIGHBORHOOD[dir].0;
        point.y += NEIGHBORHOOD[dir].1;

        if next == pos && cur == probe {
            break;
        }

        cur = next;
        dir = (dir + 4) & 7;
    }

    Contour { points, hole }
}

/// Extracts every border of the binary image (nonzero = foreground),
/// in raster-scan order of the starting pixel.
pub fn find_contours(bin: &Image<u8>) -> Vec<Contour> {
    let width = bin.width();
    let height = bin.height();
    if width == 0 || height == 0 {
        return Vec::new();
    }

    let stride = width + 2;
    let mut grid = padded_grid(bin);
    let deltas = neighborhood_deltas(stride as i32);

    let mut contours = Vec::new();
    let mut label = 1;
    let mut pos = stride + 1;

    for y in 0..height {
        for x in 0..width {
            let px = grid[pos];
            if px != 0 {
                let outer = px == 1 && grid[pos - 1] == 0;
                let hole = !outer && px >= 1 && grid[pos + 1] == 0;

                if outer || hole {
                    label += 1;
                    let start = Point2i::new(x as i32, y as i32);
                    contours.push(follow_border(&mut grid, pos, label, start, hole, &deltas));
                }
            }
            pos += 1;
        }
        pos += 2;
    }

    contours
}

/// Outer borders only, same enumeration order as [`find_contours`].
pub fn find_external_contours(bin: &Image<u8>) -> Vec<Contour> {
    find_contours(bin)
        .into_iter()
        .filter(|c| !c.hole)
        .collect()
}
