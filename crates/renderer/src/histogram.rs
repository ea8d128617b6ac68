//! Pixel-value histograms and their SVG rendering.
//!
//! Unlike the map, each histogram spans its own dataset's observed
//! min/max rather than the fixed value domain.

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::Color as _;
use plotters::style::FontStyle;
use raster_loader::RasterGrid;
use tracing::debug;
use viewer_common::{Color, HistogramConfig, ViewerError, ViewerResult};

/// Equal-width binned counts of the finite values of a dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    lower: f64,
    upper: f64,
    counts: Vec<u64>,
    invalid: usize,
}

impl Histogram {
    /// Bin the finite entries of `values` into `bins` equal-width bins.
    ///
    /// The range is the observed min/max of the finite values. If they are
    /// all equal the range widens to `value ± 0.5`; with no finite values
    /// the range is `[0, 1]` and every count is zero. Bins are half-open
    /// except the last, which also includes the upper edge.
    pub fn compute(values: &[f64], bins: usize) -> Self {
        let bins = bins.max(1);
        let mut invalid = 0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for &v in values {
            if v.is_finite() {
                min = min.min(v);
                max = max.max(v);
            } else {
                invalid += 1;
            }
        }

        let (lower, upper) = if min > max {
            (0.0, 1.0)
        } else if min == max {
            (min - 0.5, max + 0.5)
        } else {
            (min, max)
        };

        let mut counts = vec![0u64; bins];
        let width = upper - lower;
        let step = width / bins as f64;
        for &v in values.iter().filter(|v| v.is_finite()) {
            let mut idx = ((((v - lower) / width) * bins as f64) as usize).min(bins - 1);
            // Settle rounding against the same edges `bins()` reports
            if idx > 0 && v < lower + idx as f64 * step {
                idx -= 1;
            } else if idx + 1 < bins && v >= lower + (idx + 1) as f64 * step {
                idx += 1;
            }
            counts[idx] += 1;
        }

        debug!(bins, lower, upper, invalid, "Computed histogram");

        Self {
            lower,
            upper,
            counts,
            invalid,
        }
    }

    pub fn from_grid(grid: &RasterGrid, bins: usize) -> Self {
        Self::compute(grid.values(), bins)
    }

    /// Range spanned by the bins.
    pub fn range(&self) -> (f64, f64) {
        (self.lower, self.upper)
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    pub fn bin_width(&self) -> f64 {
        (self.upper - self.lower) / self.counts.len() as f64
    }

    /// Number of values counted (the finite ones).
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Number of non-finite values excluded.
    pub fn invalid(&self) -> usize {
        self.invalid
    }

    pub fn max_count(&self) -> u64 {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// `(left edge, right edge, count)` per bin.
    pub fn bins(&self) -> impl Iterator<Item = (f64, f64, u64)> + '_ {
        let w = self.bin_width();
        self.counts.iter().enumerate().map(move |(i, &count)| {
            let left = self.lower + i as f64 * w;
            (left, left + w, count)
        })
    }
}

/// One chart of the histogram figure.
#[derive(Debug, Clone)]
pub struct HistogramChart<'a> {
    pub title: String,
    pub color: Color,
    pub histogram: &'a Histogram,
}

fn draw_err(e: impl std::fmt::Display) -> ViewerError {
    ViewerError::RenderError(format!("histogram drawing failed: {}", e))
}

fn rgb(color: &Color) -> RGBColor {
    RGBColor(color.r, color.g, color.b)
}

/// Render charts side by side, in order, into one SVG document.
pub fn render_histograms_svg(
    charts: &[HistogramChart<'_>],
    config: &HistogramConfig,
) -> ViewerResult<String> {
    config.validate()?;
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (config.width, config.height))
            .into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;

        let areas = root.split_evenly((1, charts.len().max(1)));
        for (area, chart) in areas.iter().zip(charts) {
            draw_chart(area, chart, config)?;
        }
        root.present().map_err(draw_err)?;
    }
    debug!(charts = charts.len(), bytes = svg.len(), "Rendered histogram figure");
    Ok(svg)
}

fn draw_chart(
    area: &DrawingArea<SVGBackend<'_>, Shift>,
    chart: &HistogramChart<'_>,
    config: &HistogramConfig,
) -> ViewerResult<()> {
    let hist = chart.histogram;
    let (lower, upper) = hist.range();
    let y_max = (hist.max_count().max(1) as f64) * 1.05;

    let mut ctx = ChartBuilder::on(area)
        .caption(
            &chart.title,
            ("sans-serif", 20).into_font().style(FontStyle::Bold),
        )
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(70)
        .build_cartesian_2d(lower..upper, 0f64..y_max)
        .map_err(draw_err)?;

    ctx.configure_mesh()
        .x_desc(config.x_label.as_str())
        .y_desc(config.y_label.as_str())
        .bold_line_style(BLACK.mix(config.grid_opacity))
        .light_line_style(TRANSPARENT)
        .draw()
        .map_err(draw_err)?;

    let fill = rgb(&chart.color);
    let edge = rgb(&config.edge_color);
    ctx.draw_series(
        hist.bins()
            .filter(|(_, _, count)| *count > 0)
            .map(|(x0, x1, count)| Rectangle::new([(x0, 0.0), (x1, count as f64)], fill.filled())),
    )
    .map_err(draw_err)?;
    ctx.draw_series(
        hist.bins()
            .filter(|(_, _, count)| *count > 0)
            .map(|(x0, x1, count)| {
                Rectangle::new([(x0, 0.0), (x1, count as f64)], edge.stroke_width(1))
            }),
    )
    .map_err(draw_err)?;

    Ok(())
}
