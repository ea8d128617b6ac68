//! Test data generators for creating synthetic MSAVI2-like grids.
//!
//! All generators return row-major `Vec<f64>` data (row 0 first).

/// Creates a grid where every pixel holds `value`.
pub fn create_constant_grid(width: usize, height: usize, value: f64) -> Vec<f64> {
    vec![value; width * height]
}

/// Creates a grid sweeping linearly from -1.0 (top-left) to 1.0 (bottom-right).
///
/// Values cover the whole MSAVI2 domain, so every bucket of the default
/// color ramp is hit on a large enough grid.
pub fn create_gradient_grid(width: usize, height: usize) -> Vec<f64> {
    let n = width * height;
    if n <= 1 {
        return vec![0.0; n];
    }
    (0..n)
        .map(|i| -1.0 + 2.0 * i as f64 / (n - 1) as f64)
        .collect()
}

/// Creates a vegetation-like grid: bare ground (near 0) on the left
/// edge rising to dense vegetation (near 0.8) on the right edge.
pub fn create_vegetation_grid(width: usize, height: usize) -> Vec<f64> {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            let x = if width > 1 {
                col as f64 / (width - 1) as f64
            } else {
                0.0
            };
            // Small row-dependent wobble keeps rows distinguishable
            let wobble = 0.02 * ((row % 5) as f64 - 2.0);
            data.push((0.8 * x + wobble).clamp(-1.0, 1.0));
        }
    }
    data
}

/// Replaces every `stride`-th pixel with NaN, returning the number replaced.
pub fn punch_nodata(data: &mut [f64], stride: usize) -> usize {
    let stride = stride.max(1);
    let mut count = 0;
    for v in data.iter_mut().step_by(stride) {
        *v = f64::NAN;
        count += 1;
    }
    count
}
