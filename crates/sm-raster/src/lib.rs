//! Raster operators shared by the synthesizer and the measurement pipeline.
//!
//! Binarization follows the inverse-polarity convention: pixels at or below
//! the threshold become 255 (the "on" class), everything brighter becomes 0.
//! Shapes darker than the background therefore come out as foreground.

mod draw;
mod gray;

pub use draw::{draw_dot, draw_label, draw_line, fill_polygon, label_width};
pub use gray::{binarize_inv, luma, otsu_threshold};
