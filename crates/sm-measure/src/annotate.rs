use sm_core::{Image, Point2i, Polygon, Rgb8};
use sm_raster::{draw_dot, draw_label, draw_line, label_width};

use crate::{EdgeMeasurement, MeasureConfig, ShapeMeasurement};

const EDGE_THICKNESS: i32 = 2;
const VERTEX_RADIUS: i32 = 3;
const LABEL_SCALE: i32 = 1;
const HEADER_SCALE: i32 = 2;

/// Draws one approximated shape onto the canvas and returns its measured
/// edges. Edge lengths are labeled at the edge midpoint in physical units.
pub(crate) fn annotate_shape(
    canvas: &mut Image<Rgb8>,
    poly: &Polygon,
    scale: f32,
    cfg: &MeasureConfig,
) -> ShapeMeasurement {
    let mut edges = Vec::with_capacity(poly.len());

    for (a, b) in poly.edges() {
        draw_line(canvas, a, b, cfg.edge_color, EDGE_THICKNESS);
        draw_dot(canvas, a, VERTEX_RADIUS, cfg.vertex_color);

        let pixel_length = a.distance(b);
        let physical_length = pixel_length * scale;

        let text = format!("{physical_length:.1}");
        let mid = Point2i::new((a.x + b.x) / 2, (a.y + b.y) / 2);
        let origin = Point2i::new(
            mid.x - label_width(&text, LABEL_SCALE) / 2,
            mid.y - 4 * LABEL_SCALE,
        );
        draw_label(canvas, origin, &text, LABEL_SCALE, cfg.label_color);

        edges.push(EdgeMeasurement {
            from: [a.x, a.y],
            to: [b.x, b.y],
            pixel_length,
            physical_length,
        });
    }

    ShapeMeasurement {
        vertices: poly.points.iter().map(|p| [p.x, p.y]).collect(),
        edges,
    }
}

/// Total-count header in the top-left corner.
pub(crate) fn draw_header(canvas: &mut Image<Rgb8>, count: usize, cfg: &MeasureConfig) {
    draw_label(
        canvas,
        Point2i::new(10, 10),
        &format!("SHAPES: {count}"),
        HEADER_SCALE,
        cfg.header_color,
    );
}
