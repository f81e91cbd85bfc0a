use rand::SeedableRng;
use rand::rngs::StdRng;
use sm_core::{Image, Point2i, Polygon, Rect, Rgb8};
use sm_measure::{MeasureConfig, analyze};
use sm_raster::fill_polygon;
use sm_synth::{SynthConfig, generate};

const BACKGROUND: Rgb8 = [200, 200, 200];
const REFERENCE_INK: Rgb8 = [30, 30, 30];

fn stamp_rect(canvas: &mut Image<Rgb8>, x: i32, y: i32, w: i32, h: i32, color: Rgb8) {
    let rect = Rect {
        x,
        y,
        width: w,
        height: h,
    };
    fill_polygon(canvas, &rect.corners(), color);
}

#[test]
fn reference_only_scene_calibrates_with_the_expected_scale() {
    let mut scene = Image::new_fill(200, 160, BACKGROUND);
    stamp_rect(&mut scene, 20, 30, 120, 80, REFERENCE_INK);

    let cfg = MeasureConfig::default();
    let out = analyze(&scene, &cfg).expect("valid input");

    let cal = out.calibration.expect("reference rectangle present");
    // Boundary pixel centers of a 120x80 fill span 119x79.
    let edge_sum = cal.pixel_width + cal.pixel_height;
    assert!((edge_sum - 198.0).abs() < 1.5, "edge sum {edge_sum}");
    assert!((cal.scale * edge_sum - (210.0 + 268.0)).abs() < 1e-2);

    // The reference is calibration, not a counted shape.
    assert_eq!(out.shape_count, 0);
    assert!(out.shapes.is_empty());
}

#[test]
fn scene_without_a_quad_returns_the_input_unchanged() {
    let mut scene = Image::new_fill(160, 160, BACKGROUND);
    let tri = Polygon::new(vec![
        Point2i::new(30, 120),
        Point2i::new(130, 120),
        Point2i::new(80, 30),
    ]);
    fill_polygon(&mut scene, &tri, REFERENCE_INK);

    let out = analyze(&scene, &MeasureConfig::default()).expect("valid input");

    assert!(out.calibration.is_none());
    assert_eq!(out.shape_count, 0);
    assert_eq!(out.annotated, scene);
}

#[test]
fn analysis_is_idempotent_on_a_static_image() {
    let mut scene = Image::new_fill(240, 200, BACKGROUND);
    stamp_rect(&mut scene, 10, 10, 90, 60, REFERENCE_INK);
    stamp_rect(&mut scene, 120, 100, 70, 70, [220, 50, 50]);

    let cfg = MeasureConfig::default();
    let first = analyze(&scene, &cfg).expect("valid input");
    let second = analyze(&scene, &cfg).expect("valid input");

    assert_eq!(first.shape_count, second.shape_count);
    assert_eq!(first.annotated, second.annotated);
    assert_eq!(first.shapes, second.shapes);
}

#[test]
fn roundtrip_counts_every_synthesized_shape() {
    let synth_cfg = SynthConfig {
        width: 360,
        height: 280,
        max_shapes: 5,
        max_attempts: 5000,
        min_size: 40,
        max_size: 60,
        edge_reserve: 70,
        ..SynthConfig::default()
    };
    let mut rng = StdRng::seed_from_u64(11);
    let synth = generate(&synth_cfg, &mut rng);
    assert!(
        synth.shapes.len() >= 2,
        "seed must place at least two shapes, got {}",
        synth.shapes.len()
    );

    // Compose the generated scene below a band holding the reference
    // rectangle, the way a photographed scene carries the physical one.
    let band = 120usize;
    let mut scene = Image::new_fill(synth_cfg.width, synth_cfg.height + band, BACKGROUND);
    stamp_rect(&mut scene, 10, 10, 100, 80, REFERENCE_INK);
    for y in 0..synth_cfg.height {
        for x in 0..synth_cfg.width {
            let px = *synth.canvas.get(x, y).expect("in bounds");
            *scene.get_mut(x, y + band).expect("in bounds") = px;
        }
    }

    let out = analyze(&scene, &MeasureConfig::default()).expect("valid input");

    assert!(out.calibration.is_some());
    assert_eq!(out.shape_count, synth.shapes.len());

    // Every detected shape carries consistent pixel and physical lengths.
    let scale = out.calibration.expect("present").scale;
    for shape in &out.shapes {
        assert!(shape.edges.len() >= 3);
        for edge in &shape.edges {
            assert!((edge.physical_length - edge.pixel_length * scale).abs() < 1e-3);
        }
    }
}
