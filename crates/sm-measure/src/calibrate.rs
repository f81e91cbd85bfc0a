use sm_contour::{Contour, approx_polygon};
use sm_core::Polygon;

use crate::MeasureConfig;

/// The pixel-to-physical-unit calibration derived from the reference quad.
#[derive(Debug, Clone, PartialEq)]
pub struct Calibration {
    /// The 4-vertex approximation accepted as the reference.
    pub quad: Polygon,
    /// First edge of the approximation, in pixels.
    pub pixel_width: f32,
    /// Second edge of the approximation, in pixels.
    pub pixel_height: f32,
    /// Multiplier from pixel distance to physical units. Computed once per
    /// image and immutable afterwards.
    pub scale: f32,
}

/// Scans contours in enumeration order and accepts the first whose polygon
/// approximation has exactly four vertices. Returns the contour index along
/// with the calibration, so the caller can exclude the reference from the
/// detected-shape set.
pub(crate) fn find_calibration(
    contours: &[Contour],
    cfg: &MeasureConfig,
) -> Option<(usize, Calibration)> {
    for (i, contour) in contours.iter().enumerate() {
        let epsilon = cfg.approx_eps_frac * contour.perimeter();
        let quad = approx_polygon(&contour.points, epsilon);
        if quad.len() != 4 {
            continue;
        }

        let pixel_width = quad.points[0].distance(quad.points[1]);
        let pixel_height = quad.points[1].distance(quad.points[2]);
        let denom = pixel_width + pixel_height;
        if denom <= f32::EPSILON {
            continue;
        }

        let scale = (cfg.reference_width + cfg.reference_height) / denom;
        return Some((
            i,
            Calibration {
                quad,
                pixel_width,
                pixel_height,
                scale,
            },
        ));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::find_calibration;
    use crate::MeasureConfig;
    use sm_contour::Contour;
    use sm_core::Point2i;

    /// Dense rectangle boundary, as the tracer would produce for a filled
    /// axis-aligned rectangle.
    fn rect_contour(x0: i32, y0: i32, w: i32, h: i32) -> Contour {
        let mut points = Vec::new();
        for x in x0..x0 + w {
            points.push(Point2i::new(x, y0));
        }
        for y in y0..y0 + h {
            points.push(Point2i::new(x0 + w, y));
        }
        for x in (x0 + 1..=x0 + w).rev() {
            points.push(Point2i::new(x, y0 + h));
        }
        for y in (y0 + 1..=y0 + h).rev() {
            points.push(Point2i::new(x0, y));
        }
        Contour {
            points,
            hole: false,
        }
    }

    fn tri_contour() -> Contour {
        let corners = [
            Point2i::new(0, 0),
            Point2i::new(40, 0),
            Point2i::new(20, 30),
        ];
        let mut points = Vec::new();
        for i in 0..3 {
            let a = corners[i];
            let b = corners[(i + 1) % 3];
            for step in 0..20 {
                let t = step as f32 / 20.0;
                points.push(Point2i::new(
                    (a.x as f32 + t * (b.x - a.x) as f32).round() as i32,
                    (a.y as f32 + t * (b.y - a.y) as f32).round() as i32,
                ));
            }
        }
        Contour {
            points,
            hole: false,
        }
    }

    #[test]
    fn first_four_vertex_contour_wins() {
        let cfg = MeasureConfig::default();
        let contours = vec![tri_contour(), rect_contour(10, 10, 100, 60)];

        let (idx, cal) = find_calibration(&contours, &cfg).expect("rectangle present");
        assert_eq!(idx, 1);
        assert_eq!(cal.quad.len(), 4);

        // The quad spans the rectangle exactly, so the edge pair sums to
        // width + height regardless of traversal direction.
        let sum = cal.pixel_width + cal.pixel_height;
        assert!((sum - 160.0).abs() < 1.0, "got edge sum {sum}");
        assert!((cal.scale * sum - (210.0 + 268.0)).abs() < 1e-3);
    }

    #[test]
    fn no_quad_means_no_calibration() {
        let cfg = MeasureConfig::default();
        let contours = vec![tri_contour()];
        assert!(find_calibration(&contours, &cfg).is_none());
    }
}
