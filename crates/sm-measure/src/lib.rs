//! The measurement pipeline: binarize, calibrate, detect, annotate.
//!
//! ## Calibration
//! The scene is expected to contain one rectangle of known physical size.
//! The first external contour (raster-scan order) whose polygon approximation
//! has exactly four vertices becomes the calibration reference. Pixel width
//! is the first edge of that approximation, pixel height the second; vertex
//! order comes from the contour tracer and is stable for a given image (see
//! `sm-contour`). The scale factor maps pixel distances to physical units:
//! `(reference_width + reference_height) / (pixel_width + pixel_height)`.
//!
//! ## Degraded mode
//! Without a calibration reference no measurement is possible: `analyze`
//! returns the input image unchanged with a shape count of zero and
//! `calibration: None`. That is a designed fallback, not an error; only
//! unusable input (an empty image) fails hard.
//!
//! ## Shape count
//! The calibration contour itself is excluded from the detected-shape set, so
//! a scene with one reference and N shapes reports N.

mod annotate;
mod calibrate;

use serde::Serialize;
use sm_contour::{approx_polygon, find_external_contours};
use sm_core::{Error, Image, Rgb8};
use sm_raster::{binarize_inv, luma, otsu_threshold};

pub use calibrate::Calibration;

#[derive(Debug, Clone, PartialEq)]
pub struct MeasureConfig {
    /// Physical size of the calibration rectangle, in output units.
    pub reference_width: f32,
    pub reference_height: f32,
    /// Contours with enclosed area at or below this are noise.
    pub min_area: f32,
    /// Polygon approximation tolerance as a fraction of contour perimeter.
    pub approx_eps_frac: f32,
    pub edge_color: Rgb8,
    pub vertex_color: Rgb8,
    pub label_color: Rgb8,
    pub header_color: Rgb8,
}

impl Default for MeasureConfig {
    fn default() -> Self {
        Self {
            reference_width: 210.0,
            reference_height: 268.0,
            min_area: 100.0,
            approx_eps_frac: 0.02,
            edge_color: [0, 255, 0],
            vertex_color: [255, 0, 0],
            label_color: [0, 0, 0],
            header_color: [255, 255, 255],
        }
    }
}

/// One measured edge of a detected shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeMeasurement {
    pub from: [i32; 2],
    pub to: [i32; 2],
    pub pixel_length: f32,
    /// Pixel length scaled by the calibration factor.
    pub physical_length: f32,
}

/// A detected shape with its approximated vertices and measured edges.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShapeMeasurement {
    pub vertices: Vec<[i32; 2]>,
    pub edges: Vec<EdgeMeasurement>,
}

/// Outcome of one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub annotated: Image<Rgb8>,
    pub shape_count: usize,
    /// `None` in degraded mode.
    pub calibration: Option<Calibration>,
    pub shapes: Vec<ShapeMeasurement>,
}

/// Runs the full pipeline over an RGB raster.
pub fn analyze(image: &Image<Rgb8>, cfg: &MeasureConfig) -> Result<Analysis, Error> {
    if image.width() == 0 || image.height() == 0 {
        return Err(Error::InvalidInput("empty image".into()));
    }

    let gray = luma(image);
    let threshold = otsu_threshold(&gray);
    let binary = binarize_inv(&gray, threshold);

    let contours = find_external_contours(&binary);
    let Some((cal_index, calibration)) = calibrate::find_calibration(&contours, cfg) else {
        return Ok(Analysis {
            annotated: image.clone(),
            shape_count: 0,
            calibration: None,
            shapes: Vec::new(),
        });
    };

    let mut annotated = image.clone();
    let mut shapes = Vec::new();

    for (i, contour) in contours.iter().enumerate() {
        if i == cal_index {
            continue;
        }
        if contour.area() <= cfg.min_area {
            continue;
        }

        let epsilon = cfg.approx_eps_frac * contour.perimeter();
        let poly = approx_polygon(&contour.points, epsilon);
        if poly.len() < 3 {
            continue;
        }

        let measurement = annotate::annotate_shape(&mut annotated, &poly, calibration.scale, cfg);
        shapes.push(measurement);
    }

    annotate::draw_header(&mut annotated, shapes.len(), cfg);

    Ok(Analysis {
        annotated,
        shape_count: shapes.len(),
        calibration: Some(calibration),
        shapes,
    })
}
