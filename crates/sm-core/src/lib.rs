//! Foundational primitives for shape synthesis and measurement.
//!
//! ## Coordinates and Winding
//! All geometry lives in image coordinates: x grows right, y grows down,
//! integer coordinates refer to pixel centers. A polygon is its vertices in
//! insertion order; no particular winding is required from callers. Routines
//! that need a consistent orientation (convex clipping) normalize internally
//! by signed area.
//!
//! ## Images
//! [`Image<T>`] is an owned, contiguous `width * height` buffer in row-major
//! order. Grayscale rasters use `Image<u8>`, color canvases `Image<Rgb8>`.

mod error;
mod geom;
mod image;

pub use error::Error;
pub use geom::{
    Point2f, Point2i, Polygon, Rect, closed_arc_length_i32, convex_intersection_area,
    signed_area_i32,
};
pub use image::{Image, Rgb8};
