//! Colorization of raster grids through a [`ColorScale`].
//!
//! Values are normalized against a fixed [`ValueDomain`], not against the
//! grid's own min/max, so the same value gets the same color in every
//! layer. Non-finite pixels become fully transparent.

use rayon::prelude::*;
use raster_loader::RasterGrid;
use tracing::debug;
use viewer_common::{Color, ValueDomain, ViewerError, ViewerResult};

use crate::colorscale::ColorScale;

/// Largest scale that still leaves a palette slot for nodata.
const MAX_SCALE_COLORS: usize = 255;

/// Palette indices plus the palette they point into.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedImage {
    pub width: usize,
    pub height: usize,
    /// One palette index per pixel, row-major
    pub indices: Vec<u8>,
    /// Scale colors followed by one transparent nodata entry
    pub palette: Vec<(u8, u8, u8, u8)>,
}

impl IndexedImage {
    /// Palette index used for non-finite pixels.
    pub fn nodata_index(&self) -> u8 {
        (self.palette.len() - 1) as u8
    }
}

/// Clamp a value into `domain`.
///
/// Equivalent to normalizing to `[0, 1]` and scaling back, without the
/// rounding that would push values sitting on a breakpoint into the next
/// bucket.
pub fn clamp_to_domain(value: f64, domain: &ValueDomain) -> f64 {
    value.clamp(domain.min, domain.max)
}

/// Colorize a grid into palette indices.
///
/// # Arguments
/// - `grid`: Source raster
/// - `scale`: Shared color scale
/// - `domain`: Fixed normalization domain
pub fn colorize_indexed(
    grid: &RasterGrid,
    scale: &ColorScale,
    domain: &ValueDomain,
) -> ViewerResult<IndexedImage> {
    if grid.is_empty() {
        return Err(ViewerError::RenderError(
            "cannot colorize an empty raster".to_string(),
        ));
    }
    if scale.len() > MAX_SCALE_COLORS {
        return Err(ViewerError::RenderError(format!(
            "color scale has {} colors; indexed output supports at most {}",
            scale.len(),
            MAX_SCALE_COLORS
        )));
    }
    domain.validate()?;

    let mut palette: Vec<(u8, u8, u8, u8)> = scale.colors().iter().map(Color::to_rgba).collect();
    palette.push(Color::transparent().to_rgba());
    let nodata = (palette.len() - 1) as u8;

    let width = grid.width();
    let mut indices = vec![0u8; grid.len()];

    indices
        .par_chunks_mut(width)
        .zip(grid.values().par_chunks(width))
        .for_each(|(out_row, in_row)| {
            for (out, &value) in out_row.iter_mut().zip(in_row) {
                *out = if value.is_finite() {
                    scale.bucket_of(clamp_to_domain(value, domain)) as u8
                } else {
                    nodata
                };
            }
        });

    debug!(
        width,
        height = grid.height(),
        colors = palette.len(),
        "Colorized raster"
    );

    Ok(IndexedImage {
        width,
        height: grid.height(),
        indices,
        palette,
    })
}
