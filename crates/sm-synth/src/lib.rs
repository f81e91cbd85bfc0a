//! Randomized placement of non-overlapping polygons on a solid canvas.
//!
//! Candidates are random rectangles, squares and isoceles triangles, rotated
//! about their centroid and dropped at a random offset. A candidate is kept
//! only if its margin-expanded bounding rectangle has zero intersection area
//! with every polygon placed so far. The box-vs-polygon test is a deliberate
//! conservative approximation: it over-rejects slightly but costs one convex
//! clip per placed shape instead of exact polygon-vs-polygon clipping.
//!
//! Placement is a bounded random search. Exhausting the attempt budget with
//! fewer shapes than requested is a normal partial result, not an error.
//!
//! The random source is caller-supplied, so tests can pin a seeded
//! [`rand::rngs::StdRng`] and replay a run exactly.

use rand::Rng;
use sm_core::{Image, Point2i, Polygon, Rgb8, convex_intersection_area};
use sm_raster::fill_polygon;

#[derive(Debug, Clone, PartialEq)]
pub struct SynthConfig {
    pub width: usize,
    pub height: usize,
    pub background: Rgb8,
    pub fill: Rgb8,
    pub max_shapes: usize,
    pub max_attempts: usize,
    /// Sampled shape dimensions, inclusive on both ends.
    pub min_size: i32,
    pub max_size: i32,
    /// Minimum clearance between a candidate's bounding box and placed shapes.
    pub margin: i32,
    /// Band at the right/bottom canvas edges excluded from placement offsets,
    /// sized so a maximal shape never needs clipping.
    pub edge_reserve: i32,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            width: 569,
            height: 568,
            background: [200, 200, 200],
            fill: [220, 50, 50],
            max_shapes: 50,
            max_attempts: 2000,
            min_size: 50,
            max_size: 80,
            margin: 10,
            edge_reserve: 100,
        }
    }
}

/// Result of one synthesis run.
#[derive(Debug, Clone, PartialEq)]
pub struct Synthesis {
    pub canvas: Image<Rgb8>,
    /// Accepted polygons, in placement order.
    pub shapes: Vec<Polygon>,
    /// Placement attempts consumed, accepted or not.
    pub attempts: usize,
    /// The `max_shapes` this run was asked for.
    pub requested_shapes: usize,
}

impl Synthesis {
    /// True if the run stopped on the attempt budget short of the requested
    /// shape count.
    pub fn budget_exhausted(&self) -> bool {
        self.shapes.len() < self.requested_shapes
    }
}

/// Fills a fresh canvas with randomly placed, mutually non-overlapping
/// polygons.
pub fn generate<R: Rng>(cfg: &SynthConfig, rng: &mut R) -> Synthesis {
    let mut canvas = Image::new_fill(cfg.width, cfg.height, cfg.background);
    let mut shapes: Vec<Polygon> = Vec::new();
    let mut attempts = 0;

    let max_dx = (cfg.width as i32 - cfg.edge_reserve).max(0);
    let max_dy = (cfg.height as i32 - cfg.edge_reserve).max(0);

    while attempts < cfg.max_attempts && shapes.len() < cfg.max_shapes {
        attempts += 1;

        let local = random_shape(cfg, rng);
        let dx = rng.gen_range(0..=max_dx);
        let dy = rng.gen_range(0..=max_dy);
        let candidate = local.translated(dx, dy);

        if overlaps_any(&candidate, &shapes, cfg.margin) {
            continue;
        }

        fill_polygon(&mut canvas, &candidate, cfg.fill);
        shapes.push(candidate);
    }

    Synthesis {
        canvas,
        shapes,
        attempts,
        requested_shapes: cfg.max_shapes,
    }
}

/// True if the candidate's margin-expanded bounding rectangle intersects any
/// placed polygon with positive area.
pub fn overlaps_any(candidate: &Polygon, placed: &[Polygon], margin: i32) -> bool {
    let probe = candidate.bounding_rect().expanded(margin).corners();
    placed
        .iter()
        .any(|shape| convex_intersection_area(&probe, shape) > 0.0)
}

/// Uniformly sampled shape kind and dimensions, rotated about the centroid.
fn random_shape<R: Rng>(cfg: &SynthConfig, rng: &mut R) -> Polygon {
    let lo = cfg.min_size;
    let hi = cfg.max_size.max(lo);

    let base = match rng.gen_range(0..3) {
        0 => {
            let w = rng.gen_range(lo..=hi);
            let h = rng.gen_range(lo..=hi);
            rect_polygon(w, h)
        }
        1 => {
            let side = rng.gen_range(lo..=hi);
            rect_polygon(side, side)
        }
        _ => {
            let b = rng.gen_range(lo..=hi);
            let h = rng.gen_range(lo..=hi);
            Polygon::new(vec![
                Point2i::new(0, 0),
                Point2i::new(b, 0),
                Point2i::new(b / 2, h),
            ])
        }
    };

    let angle = rng.gen_range(0.0..360.0_f32);
    base.rotated(angle)
}

fn rect_polygon(w: i32, h: i32) -> Polygon {
    Polygon::new(vec![
        Point2i::new(0, 0),
        Point2i::new(w, 0),
        Point2i::new(w, h),
        Point2i::new(0, h),
    ])
}

#[cfg(test)]
mod tests {
    use super::{SynthConfig, generate, overlaps_any};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use sm_core::{Image, convex_intersection_area};

    fn small_cfg() -> SynthConfig {
        SynthConfig {
            width: 320,
            height: 300,
            max_shapes: 8,
            max_attempts: 3000,
            min_size: 30,
            max_size: 50,
            edge_reserve: 60,
            ..SynthConfig::default()
        }
    }

    #[test]
    fn zero_requested_shapes_leaves_canvas_untouched() {
        let cfg = SynthConfig {
            max_shapes: 0,
            ..small_cfg()
        };
        let mut rng = StdRng::seed_from_u64(1);
        let out = generate(&cfg, &mut rng);

        assert!(out.shapes.is_empty());
        assert_eq!(out.attempts, 0);
        assert!(!out.budget_exhausted());

        let blank = Image::new_fill(cfg.width, cfg.height, cfg.background);
        assert_eq!(out.canvas, blank);
    }

    #[test]
    fn single_attempt_places_at_most_one_shape() {
        let cfg = SynthConfig {
            max_attempts: 1,
            max_shapes: 100,
            ..small_cfg()
        };
        let mut rng = StdRng::seed_from_u64(2);
        let out = generate(&cfg, &mut rng);

        assert!(out.shapes.len() <= 1);
        assert_eq!(out.attempts, 1);
        assert!(out.budget_exhausted());
    }

    #[test]
    fn accepted_shapes_keep_the_margin_clearance() {
        let cfg = small_cfg();
        let mut rng = StdRng::seed_from_u64(3);
        let out = generate(&cfg, &mut rng);

        assert!(out.shapes.len() >= 2, "seed must place at least two shapes");

        // Replays the acceptance test: every later shape's expanded bounding
        // box must clear every earlier polygon.
        for (j, later) in out.shapes.iter().enumerate() {
            let probe = later.bounding_rect().expanded(cfg.margin).corners();
            for earlier in &out.shapes[..j] {
                assert_eq!(convex_intersection_area(&probe, earlier), 0.0);
            }
        }
    }

    #[test]
    fn same_seed_reproduces_the_run() {
        let cfg = small_cfg();
        let a = generate(&cfg, &mut StdRng::seed_from_u64(7));
        let b = generate(&cfg, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn placed_shapes_are_painted_with_the_fill_color() {
        let cfg = small_cfg();
        let mut rng = StdRng::seed_from_u64(5);
        let out = generate(&cfg, &mut rng);
        assert!(!out.shapes.is_empty());

        let c = out.shapes[0].centroid().round_to_i32();
        assert_eq!(
            out.canvas.get(c.x as usize, c.y as usize),
            Some(&cfg.fill),
            "centroid of a convex placed shape lies inside it"
        );
    }

    #[test]
    fn overlap_probe_rejects_touching_boxes_only_with_area() {
        let square = super::rect_polygon(10, 10).translated(50, 50);
        let placed = vec![square];

        // 25 px away: expanded box (margin 10) stops 5 px short.
        let far = super::rect_polygon(10, 10).translated(85, 50);
        assert!(!overlaps_any(&far, &placed, 10));

        // 5 px away: expanded box reaches 5 px into the placed square.
        let near = super::rect_polygon(10, 10).translated(65, 50);
        assert!(overlaps_any(&near, &placed, 10));
    }
}
