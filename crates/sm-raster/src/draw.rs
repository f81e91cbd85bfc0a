use sm_core::{Image, Point2i, Polygon, Rgb8};

/// Scanline fill with the even-odd rule and a half-open `top <= y < bottom`
/// edge convention, so shared vertices are not counted twice.
pub fn fill_polygon(canvas: &mut Image<Rgb8>, poly: &Polygon, color: Rgb8) {
    if poly.len() < 3 {
        return;
    }

    let rect = poly.bounding_rect();
    let y_min = rect.y.max(0);
    let y_max = (rect.y + rect.height).min(canvas.height() as i32 - 1);

    let mut xs: Vec<f32> = Vec::new();
    for y in y_min..=y_max {
        xs.clear();
        for (a, b) in poly.edges() {
            if a.y == b.y {
                continue;
            }
            let (top, bot) = if a.y < b.y { (a, b) } else { (b, a) };
            if y < top.y || y >= bot.y {
                continue;
            }
            let t = (y - top.y) as f32 / (bot.y - top.y) as f32;
            xs.push(top.x as f32 + t * (bot.x - top.x) as f32);
        }

        xs.sort_by(f32::total_cmp);
        for pair in xs.chunks_exact(2) {
            let x0 = pair[0].ceil() as i32;
            let x1 = pair[1].floor() as i32;
            for x in x0..=x1 {
                canvas.put(x, y, color);
            }
        }
    }
}

/// Bresenham line with a square pen of the given thickness.
pub fn draw_line(canvas: &mut Image<Rgb8>, a: Point2i, b: Point2i, color: Rgb8, thickness: i32) {
    let half = (thickness / 2).max(0);

    let dx = (b.x - a.x).abs();
    let dy = -(b.y - a.y).abs();
    let sx = if a.x < b.x { 1 } else { -1 };
    let sy = if a.y < b.y { 1 } else { -1 };

    let mut err = dx + dy;
    let mut x = a.x;
    let mut y = a.y;

    loop {
        stamp(canvas, x, y, half, color);
        if x == b.x && y == b.y {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// Filled disc of the given radius.
pub fn draw_dot(canvas: &mut Image<Rgb8>, center: Point2i, radius: i32, color: Rgb8) {
    let r2 = radius * radius;
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= r2 {
                canvas.put(center.x + dx, center.y + dy, color);
            }
        }
    }
}

fn stamp(canvas: &mut Image<Rgb8>, x: i32, y: i32, half: i32, color: Rgb8) {
    for dy in -half..=half {
        for dx in -half..=half {
            canvas.put(x + dx, y + dy, color);
        }
    }
}

const GLYPH_WIDTH: i32 = 5;
const GLYPH_ADVANCE: i32 = GLYPH_WIDTH + 1;

/// 5x7 bitmap glyphs, one row per byte, bit 4 leftmost. Covers the characters
/// the annotation layer emits: digits, '.', ':', space and "SHAPES".
fn glyph(c: char) -> [u8; 7] {
    match c {
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        '.' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b01100, 0b01100],
        ':' => [0b00000, 0b01100, 0b01100, 0b00000, 0b01100, 0b01100, 0b00000],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'H' => [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        _ => [0; 7],
    }
}

/// Pixel width of `text` rendered by [`draw_label`] at the given scale.
pub fn label_width(text: &str, scale: i32) -> i32 {
    let n = text.chars().count() as i32;
    if n == 0 {
        return 0;
    }
    (n * GLYPH_ADVANCE - 1) * scale
}

/// Renders `text` with the built-in bitmap font, top-left at `origin`.
/// Unknown characters advance the cursor without drawing.
pub fn draw_label(canvas: &mut Image<Rgb8>, origin: Point2i, text: &str, scale: i32, color: Rgb8) {
    let scale = scale.max(1);
    let mut pen_x = origin.x;

    for c in text.chars() {
        let rows = glyph(c);
        for (row, bits) in rows.iter().enumerate() {
            for col in 0..GLYPH_WIDTH {
                if bits & (1 << (GLYPH_WIDTH - 1 - col)) == 0 {
                    continue;
                }
                let px = pen_x + col * scale;
                let py = origin.y + row as i32 * scale;
                for dy in 0..scale {
                    for dx in 0..scale {
                        canvas.put(px + dx, py + dy, color);
                    }
                }
            }
        }
        pen_x += GLYPH_ADVANCE * scale;
    }
}
