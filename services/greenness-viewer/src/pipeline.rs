//! The render pass.
//!
//! Strictly linear: load both rasters, build the shared scale, render the
//! split map, build and attach the legend, compute and draw the
//! histograms, assemble the page. Any failure before the histograms
//! aborts the whole pass; no partial map is produced.

use raster_loader::load_raster;
use renderer::{
    build_legend, render_histograms_svg, render_split_map, ColorScale, Histogram,
    HistogramChart, Legend, MapLayer,
};
use tracing::info;
use viewer_common::{ViewerConfig, ViewerResult};

use crate::page::{render_page, PageContent};

/// Relative URL of the left overlay.
pub const LEFT_LAYER_URL: &str = "layers/left.png";
/// Relative URL of the right overlay.
pub const RIGHT_LAYER_URL: &str = "layers/right.png";
/// Relative URL of the histogram figure.
pub const HISTOGRAMS_URL: &str = "histograms.svg";

/// Everything one render pass produces.
#[derive(Debug, Clone)]
pub struct RenderedView {
    pub page: String,
    pub left_png: Vec<u8>,
    pub right_png: Vec<u8>,
    pub histograms_svg: String,
    pub legend: Legend,
}

pub fn render_view(config: &ViewerConfig) -> ViewerResult<RenderedView> {
    config.validate()?;

    let left_grid = load_raster(&config.left.path)?;
    let right_grid = load_raster(&config.right.path)?;

    let scale = ColorScale::from_config(&config.color_ramp)?;
    let domain = config.map.value_domain;
    let left = MapLayer::new(config.left.label.clone(), &left_grid, &scale, domain);
    let right = MapLayer::new(config.right.label.clone(), &right_grid, &scale, domain);

    let mut map = render_split_map(&left, &right, &config.map)?;
    let legend = build_legend(&scale, &config.legend);
    map.attach_legend(legend.clone());
    let map_html = map.to_html(LEFT_LAYER_URL, RIGHT_LAYER_URL)?;

    let bins = config.histogram.bins;
    let left_hist = Histogram::from_grid(&left_grid, bins);
    let right_hist = Histogram::from_grid(&right_grid, bins);
    let charts = [
        HistogramChart {
            title: format!("{} - {}", config.histogram.title, config.left.year),
            color: config.left.histogram_color,
            histogram: &left_hist,
        },
        HistogramChart {
            title: format!("{} - {}", config.histogram.title, config.right.year),
            color: config.right.histogram_color,
            histogram: &right_hist,
        },
    ];
    let histograms_svg = render_histograms_svg(&charts, &config.histogram)?;

    let page = render_page(&PageContent {
        title: &config.title,
        map_html: &map_html,
        histogram_heading: &config.histogram.heading,
        histogram_url: HISTOGRAMS_URL,
    });

    info!(
        page_bytes = page.len(),
        left_png_bytes = map.left.png.len(),
        right_png_bytes = map.right.png.len(),
        "Render pass complete"
    );

    Ok(RenderedView {
        page,
        left_png: map.left.png,
        right_png: map.right.png,
        histograms_svg,
        legend,
    })
}
