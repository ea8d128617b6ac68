//! In-memory raster grid.

use viewer_common::{ViewerError, ViewerResult};

/// A 2D grid of pixel values in row-major order (row 0 is the northern edge).
///
/// Non-finite values mark invalid pixels. The grid is read-only once built.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterGrid {
    width: usize,
    height: usize,
    data: Vec<f64>,
}

impl RasterGrid {
    /// Create a grid, checking that `data` holds exactly `width * height` values.
    pub fn new(width: usize, height: usize, data: Vec<f64>) -> ViewerResult<Self> {
        if data.len() != width * height {
            return Err(ViewerError::config(format!(
                "raster data length {} does not match {}x{}",
                data.len(),
                width,
                height
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of pixels.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// All pixel values, row-major.
    pub fn values(&self) -> &[f64] {
        &self.data
    }

    /// One row of pixels.
    pub fn row(&self, y: usize) -> Option<&[f64]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width;
        Some(&self.data[start..start + self.width])
    }

    /// Pixel value at column `x`, row `y`.
    pub fn get(&self, x: usize, y: usize) -> Option<f64> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x).copied()
    }

    /// Iterator over valid (finite) pixel values.
    pub fn finite_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.data.iter().copied().filter(|v| v.is_finite())
    }

    /// Summary statistics over the valid pixels.
    pub fn stats(&self) -> RasterStats {
        let mut stats = RasterStats {
            total: self.data.len(),
            finite: 0,
            min: None,
            max: None,
            mean: None,
        };
        let mut sum = 0.0;
        for v in self.finite_values() {
            stats.finite += 1;
            sum += v;
            stats.min = Some(stats.min.map_or(v, |m: f64| m.min(v)));
            stats.max = Some(stats.max.map_or(v, |m: f64| m.max(v)));
        }
        if stats.finite > 0 {
            stats.mean = Some(sum / stats.finite as f64);
        }
        stats
    }
}

/// Summary of a grid's valid pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterStats {
    pub total: usize,
    pub finite: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
}

impl RasterStats {
    /// Number of non-finite (nodata) pixels.
    pub fn invalid(&self) -> usize {
        self.total - self.finite
    }
}
