//! Benchmarks for the renderer crate - colorization, PNG encoding and histograms.
//!
//! Run with: cargo bench --package renderer --bench render_benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use raster_loader::RasterGrid;
use renderer::colorize::colorize_indexed;
use renderer::png::encode_indexed_image;
use renderer::{ColorScale, Histogram};
use test_utils::{create_vegetation_grid, punch_nodata};
use viewer_common::{ColorRampConfig, ValueDomain};

const SIZES: [(usize, usize, &str); 3] = [
    (256, 256, "256x256"),
    (1024, 512, "1024x512"),
    (2048, 2048, "2048x2048"),
];

fn vegetation_grid(width: usize, height: usize) -> RasterGrid {
    let mut data = create_vegetation_grid(width, height);
    punch_nodata(&mut data, 97);
    RasterGrid::new(width, height, data).expect("grid dimensions")
}

fn default_scale() -> ColorScale {
    ColorScale::from_config(&ColorRampConfig::default()).expect("default ramp")
}

// =============================================================================
// COLORIZATION
// =============================================================================

fn bench_colorize(c: &mut Criterion) {
    let mut group = c.benchmark_group("colorize");
    let scale = default_scale();
    let domain = ValueDomain::default();

    for (width, height, name) in SIZES {
        let grid = vegetation_grid(width, height);
        group.throughput(Throughput::Elements((width * height) as u64));
        group.bench_with_input(BenchmarkId::new("indexed", name), &grid, |b, grid| {
            b.iter(|| colorize_indexed(black_box(grid), &scale, &domain))
        });
    }

    group.finish();
}

// =============================================================================
// PNG ENCODING
// =============================================================================

fn bench_png_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("png_encoding");
    let scale = default_scale();
    let domain = ValueDomain::default();

    for (width, height, name) in SIZES {
        let image = colorize_indexed(&vegetation_grid(width, height), &scale, &domain)
            .expect("colorize");

        group.throughput(Throughput::Bytes((width * height) as u64));
        group.bench_with_input(BenchmarkId::new("indexed", name), &image, |b, image| {
            b.iter(|| encode_indexed_image(black_box(image)))
        });
    }

    group.finish();
}

// =============================================================================
// HISTOGRAMS
// =============================================================================

fn bench_histogram(c: &mut Criterion) {
    let mut group = c.benchmark_group("histogram");

    for (width, height, name) in SIZES {
        let grid = vegetation_grid(width, height);
        group.throughput(Throughput::Elements((width * height) as u64));
        group.bench_with_input(BenchmarkId::new("50_bins", name), &grid, |b, grid| {
            b.iter(|| Histogram::from_grid(black_box(grid), 50))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_colorize, bench_png_encoding, bench_histogram);
criterion_main!(benches);
