use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use image::RgbImage;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use sm_core::{Image, Point2i, Polygon, Rgb8};
use sm_measure::{Analysis, MeasureConfig, analyze};
use sm_raster::fill_polygon;
use sm_synth::{SynthConfig, generate};

// Pixel footprint of the calibration rectangle stamped by `roundtrip`,
// matching the default physical reference so the scale comes out near 1.
const REF_STAMP_WIDTH: i32 = 210;
const REF_STAMP_HEIGHT: i32 = 268;
const REF_STAMP_MARGIN: i32 = 10;
const REF_INK: Rgb8 = [30, 30, 30];

#[derive(Parser, Debug)]
#[command(name = "shape-metrology")]
#[command(about = "Synthesize shape scenes and measure them against a reference")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a canvas of randomly placed non-overlapping shapes.
    Generate(GenerateArgs),
    /// Measure the shapes in an image against its calibration rectangle.
    Measure(MeasureArgs),
    /// Generate a scene, stamp a reference rectangle, and measure it back.
    Roundtrip(RoundtripArgs),
}

#[derive(Args, Debug, Clone)]
struct GenerateArgs {
    /// Seed for reproducible runs; omit for a fresh random scene.
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, default_value_t = 569)]
    width: usize,
    #[arg(long, default_value_t = 568)]
    height: usize,
    #[arg(long, default_value_t = 50)]
    shapes: usize,
    #[arg(long, default_value_t = 2000)]
    attempts: usize,
    #[arg(long, default_value_t = 50)]
    min_size: i32,
    #[arg(long, default_value_t = 80)]
    max_size: i32,
    #[arg(long, default_value = "generated_shapes.png")]
    out: PathBuf,
}

#[derive(Args, Debug, Clone)]
struct MeasureArgs {
    #[arg(long, required = true)]
    input: PathBuf,
    #[arg(long, default_value = "Results.png")]
    out: PathBuf,
    /// Write the measurements as JSON alongside the annotated image.
    #[arg(long)]
    report: Option<PathBuf>,
    /// Physical width of the calibration rectangle, in output units.
    #[arg(long, default_value_t = 210.0)]
    ref_width: f32,
    /// Physical height of the calibration rectangle, in output units.
    #[arg(long, default_value_t = 268.0)]
    ref_height: f32,
}

#[derive(Args, Debug, Clone)]
struct RoundtripArgs {
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, default_value_t = 50)]
    shapes: usize,
    #[arg(long, default_value = "generated_shapes.png")]
    scene_out: PathBuf,
    #[arg(long, default_value = "Results.png")]
    out: PathBuf,
    #[arg(long)]
    report: Option<PathBuf>,
}

#[derive(Serialize)]
struct CalibrationReport {
    pixel_width: f32,
    pixel_height: f32,
    scale: f32,
}

#[derive(Serialize)]
struct MeasureReport<'a> {
    shape_count: usize,
    calibration: Option<CalibrationReport>,
    shapes: &'a [sm_measure::ShapeMeasurement],
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.cmd {
        Command::Generate(args) => run_generate(args),
        Command::Measure(args) => run_measure(args),
        Command::Roundtrip(args) => run_roundtrip(args),
    }
}

fn run_generate(args: GenerateArgs) -> Result<()> {
    let cfg = SynthConfig {
        width: args.width,
        height: args.height,
        max_shapes: args.shapes,
        max_attempts: args.attempts,
        min_size: args.min_size,
        max_size: args.max_size,
        ..SynthConfig::default()
    };
    let mut rng = seeded_rng(args.seed);
    let synth = generate(&cfg, &mut rng);

    if synth.budget_exhausted() {
        println!(
            "placement budget exhausted after {} attempts: placed {} of {} shapes",
            synth.attempts,
            synth.shapes.len(),
            synth.requested_shapes
        );
    }

    save_rgb(&args.out, &synth.canvas)?;
    println!(
        "wrote {} ({} shapes)",
        args.out.display(),
        synth.shapes.len()
    );
    Ok(())
}

fn run_measure(args: MeasureArgs) -> Result<()> {
    let cfg = MeasureConfig {
        reference_width: args.ref_width,
        reference_height: args.ref_height,
        ..MeasureConfig::default()
    };
    let input = load_rgb(&args.input)?;
    let analysis = analyze(&input, &cfg)
        .with_context(|| format!("measuring {}", args.input.display()))?;

    report_analysis(&analysis);
    save_rgb(&args.out, &analysis.annotated)?;
    if let Some(path) = &args.report {
        write_report(path, &analysis)?;
    }
    Ok(())
}

fn run_roundtrip(args: RoundtripArgs) -> Result<()> {
    let synth_cfg = SynthConfig {
        max_shapes: args.shapes,
        ..SynthConfig::default()
    };
    let mut rng = seeded_rng(args.seed);
    let synth = generate(&synth_cfg, &mut rng);

    let scene = compose_with_reference(&synth.canvas, synth_cfg.background);
    save_rgb(&args.scene_out, &scene)?;

    let analysis = analyze(&scene, &MeasureConfig::default()).context("measuring the scene")?;
    println!(
        "generated {} shapes, measured {}",
        synth.shapes.len(),
        analysis.shape_count
    );
    report_analysis(&analysis);

    save_rgb(&args.out, &analysis.annotated)?;
    if let Some(path) = &args.report {
        write_report(path, &analysis)?;
    }
    Ok(())
}

/// Places the generated canvas below a band holding the calibration
/// rectangle, so the reference is the first contour in scan order and cannot
/// collide with a placed shape.
fn compose_with_reference(canvas: &Image<Rgb8>, background: Rgb8) -> Image<Rgb8> {
    let band = (REF_STAMP_HEIGHT + 2 * REF_STAMP_MARGIN) as usize;
    let width = canvas.width().max((REF_STAMP_WIDTH + 2 * REF_STAMP_MARGIN) as usize);
    let mut scene = Image::new_fill(width, canvas.height() + band, background);

    let reference = Polygon::new(vec![
        Point2i::new(REF_STAMP_MARGIN, REF_STAMP_MARGIN),
        Point2i::new(REF_STAMP_MARGIN + REF_STAMP_WIDTH, REF_STAMP_MARGIN),
        Point2i::new(
            REF_STAMP_MARGIN + REF_STAMP_WIDTH,
            REF_STAMP_MARGIN + REF_STAMP_HEIGHT,
        ),
        Point2i::new(REF_STAMP_MARGIN, REF_STAMP_MARGIN + REF_STAMP_HEIGHT),
    ]);
    fill_polygon(&mut scene, &reference, REF_INK);

    for y in 0..canvas.height() {
        for x in 0..canvas.width() {
            if let (Some(&px), Some(dst)) = (canvas.get(x, y), scene.get_mut(x, y + band)) {
                *dst = px;
            }
        }
    }
    scene
}

fn report_analysis(analysis: &Analysis) {
    match &analysis.calibration {
        Some(cal) => println!(
            "calibration: {:.1} x {:.1} px, scale {:.4}; {} shapes",
            cal.pixel_width, cal.pixel_height, cal.scale, analysis.shape_count
        ),
        None => println!("no calibration rectangle found; image left unannotated"),
    }
}

fn write_report(path: &Path, analysis: &Analysis) -> Result<()> {
    let report = MeasureReport {
        shape_count: analysis.shape_count,
        calibration: analysis.calibration.as_ref().map(|cal| CalibrationReport {
            pixel_width: cal.pixel_width,
            pixel_height: cal.pixel_height,
            scale: cal.scale,
        }),
        shapes: &analysis.shapes,
    };
    let json = serde_json::to_string_pretty(&report).context("serializing report")?;
    fs::write(path, json).with_context(|| format!("writing report {}", path.display()))?;
    println!("wrote {}", path.display());
    Ok(())
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn load_rgb(path: &Path) -> Result<Image<Rgb8>> {
    let dyn_img =
        image::open(path).with_context(|| format!("opening input image {}", path.display()))?;
    let rgb = dyn_img.to_rgb8();
    let (w, h) = rgb.dimensions();
    let data: Vec<Rgb8> = rgb.pixels().map(|p| p.0).collect();

    Image::from_vec(w as usize, h as usize, data)
        .with_context(|| format!("constructing image from {}", path.display()))
}

fn save_rgb(path: &Path, img: &Image<Rgb8>) -> Result<()> {
    let mut raw = Vec::with_capacity(img.width() * img.height() * 3);
    for px in img.data() {
        raw.extend_from_slice(px);
    }
    let out = RgbImage::from_raw(img.width() as u32, img.height() as u32, raw)
        .context("constructing RgbImage from raw bytes")?;
    out.save(path)
        .with_context(|| format!("saving image {}", path.display()))
}
