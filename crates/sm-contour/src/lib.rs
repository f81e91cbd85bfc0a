//! Contour extraction and simplification on binary images.
//!
//! ## Tracing
//! [`find_contours`] runs Suzuki-style border following over a zero-padded
//! copy of the input. Borders are enumerated in raster-scan order of their
//! starting pixel (topmost row first, leftmost pixel within it), which is the
//! tie-break order downstream calibration search relies on. Each border starts
//! at its topmost-leftmost pixel and is traced in a fixed sweep orientation,
//! so vertex order of derived polygons is stable across runs.
//!
//! ## Simplification
//! [`approx_polygon`] reduces a dense closed contour to few vertices with a
//! Douglas-Peucker pass split at two far-apart anchor vertices, so the result
//! does not depend on where the tracer happened to start.

mod approx;
mod trace;

pub use approx::approx_polygon;
pub use trace::{Contour, find_contours, find_external_contours};
