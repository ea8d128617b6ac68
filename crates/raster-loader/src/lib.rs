//! Raster loading for the MSAVI2 viewer.
//!
//! Reads a TIFF/GeoTIFF into a [`RasterGrid`]: a row-major grid of `f64`
//! values where invalid (nodata) pixels are NaN.

pub mod grid;
pub mod loader;

pub use grid::{RasterGrid, RasterStats};
pub use loader::load_raster;
