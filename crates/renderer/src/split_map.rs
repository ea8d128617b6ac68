//! Split map composition.
//!
//! Both layers are colorized through the same [`ColorScale`] against the
//! same fixed value domain, encoded as indexed PNGs, and stretched over the
//! configured bounds. The bounds are authoritative: rasters whose grids do
//! not line up are rejected rather than resampled.
//!
//! The interactive surface is a Leaflet map with one image overlay per
//! side, each in its own pane. A range input drags a full-height divider
//! line and clips the two panes at its position.

use serde::Serialize;
use raster_loader::RasterGrid;
use tracing::{debug, info};
use viewer_common::{GeoBounds, MapConfig, ValueDomain, ViewerError, ViewerResult};

use crate::colorize::colorize_indexed;
use crate::colorscale::ColorScale;
use crate::html::{escape, fill_template, script_json};
use crate::legend::Legend;
use crate::png::encode_indexed_image;

pub const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
pub const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";

/// A raster plus the parameters it is drawn with.
#[derive(Debug, Clone)]
pub struct MapLayer<'a> {
    pub label: String,
    pub grid: &'a RasterGrid,
    pub scale: &'a ColorScale,
    pub domain: ValueDomain,
}

impl<'a> MapLayer<'a> {
    pub fn new(
        label: impl Into<String>,
        grid: &'a RasterGrid,
        scale: &'a ColorScale,
        domain: ValueDomain,
    ) -> Self {
        Self {
            label: label.into(),
            grid,
            scale,
            domain,
        }
    }

    /// Colorize and encode this layer.
    pub fn render(&self) -> ViewerResult<RenderedLayer> {
        let image = colorize_indexed(self.grid, self.scale, &self.domain)?;
        let png = encode_indexed_image(&image)?;
        debug!(label = %self.label, bytes = png.len(), "Encoded layer");
        Ok(RenderedLayer {
            label: self.label.clone(),
            width: image.width,
            height: image.height,
            png,
        })
    }
}

/// One encoded side of the map.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedLayer {
    pub label: String,
    pub width: usize,
    pub height: usize,
    pub png: Vec<u8>,
}

/// A composed split map, ready to be emitted as HTML.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitMap {
    /// `(lat, lon)` midpoint of the bounds
    pub center: (f64, f64),
    pub zoom: u8,
    pub bounds: GeoBounds,
    pub left: RenderedLayer,
    pub right: RenderedLayer,
    pub legend: Option<Legend>,
    pub basemap_url: String,
    pub basemap_attribution: String,
    /// Height of the map container in CSS pixels
    pub height: u32,
}

/// Check that two grids can both be stretched over the same bounds.
///
/// Fails with a configuration error if either grid is empty, if their
/// dimensions differ, or if they differ from `expected` (`[width, height]`).
pub fn check_alignment(
    left: &RasterGrid,
    right: &RasterGrid,
    expected: Option<[usize; 2]>,
) -> ViewerResult<()> {
    for (side, grid) in [("left", left), ("right", right)] {
        if grid.is_empty() {
            return Err(ViewerError::config(format!(
                "{} raster is empty and cannot be placed on the map",
                side
            )));
        }
        if let Some([w, h]) = expected {
            if grid.width() != w || grid.height() != h {
                return Err(ViewerError::config(format!(
                    "{} raster is {}x{}, expected {}x{} for the configured bounds",
                    side,
                    grid.width(),
                    grid.height(),
                    w,
                    h
                )));
            }
        }
    }

    if left.width() != right.width() || left.height() != right.height() {
        return Err(ViewerError::config(format!(
            "raster dimensions differ ({}x{} vs {}x{}); alignment against the bounds is ambiguous",
            left.width(),
            left.height(),
            right.width(),
            right.height()
        )));
    }

    Ok(())
}

/// Compose two layers into a split map over `config.bounds`.
pub fn render_split_map(
    left: &MapLayer<'_>,
    right: &MapLayer<'_>,
    config: &MapConfig,
) -> ViewerResult<SplitMap> {
    check_alignment(left.grid, right.grid, config.expected_dimensions)?;

    let left_rendered = left.render()?;
    let right_rendered = right.render()?;

    let center = config.bounds.center();
    info!(
        lat = center.0,
        lon = center.1,
        zoom = config.zoom,
        width = left_rendered.width,
        height = left_rendered.height,
        "Rendered split map"
    );

    Ok(SplitMap {
        center,
        zoom: config.zoom,
        bounds: config.bounds,
        left: left_rendered,
        right: right_rendered,
        legend: None,
        basemap_url: config.basemap_url.clone(),
        basemap_attribution: config.basemap_attribution.clone(),
        height: config.height,
    })
}

#[derive(Serialize)]
struct ClientLayer<'a> {
    label: &'a str,
    url: &'a str,
}

#[derive(Serialize)]
struct ClientConfig<'a> {
    center: [f64; 2],
    zoom: u8,
    bounds: [[f64; 2]; 2],
    basemap_url: &'a str,
    basemap_attribution: &'a str,
    left: ClientLayer<'a>,
    right: ClientLayer<'a>,
}

const MAP_TEMPLATE: &str = r#"<div id="split-map" class="split-map" style="height: {{height}}px;">
  <div class="split-label split-label-left">{{left_label}}</div>
  <div class="split-label split-label-right">{{right_label}}</div>
  <div id="split-line" class="split-line"></div>
  <input id="split-divider" class="split-divider" type="range" min="0" max="100" step="0.1" value="50" aria-label="Split position">
{{legend}}</div>
<script>
(function () {
  const cfg = {{config}};
  const map = L.map('split-map').setView(cfg.center, cfg.zoom);
  L.tileLayer(cfg.basemap_url, { attribution: cfg.basemap_attribution, maxZoom: 22 }).addTo(map);
  map.createPane('left');
  map.createPane('right');
  L.imageOverlay(cfg.left.url, cfg.bounds, { pane: 'left', alt: cfg.left.label }).addTo(map);
  L.imageOverlay(cfg.right.url, cfg.bounds, { pane: 'right', alt: cfg.right.label }).addTo(map);

  const divider = document.getElementById('split-divider');
  const line = document.getElementById('split-line');
  const handle = 40;
  L.DomEvent.disableClickPropagation(divider);
  L.DomEvent.on(divider, 'mousedown touchstart pointerdown', L.DomEvent.stopPropagation);

  function clip() {
    const size = map.getSize();
    const nw = map.containerPointToLayerPoint([0, 0]);
    const se = map.containerPointToLayerPoint(size);
    // Thumb center, which is where the line is drawn
    const px = handle / 2 + (size.x - handle) * divider.value / 100;
    line.style.left = `${px}px`;
    const x = map.containerPointToLayerPoint([px, 0]).x;
    map.getPane('left').style.clip = `rect(${nw.y}px, ${x}px, ${se.y}px, ${nw.x}px)`;
    map.getPane('right').style.clip = `rect(${nw.y}px, ${se.x}px, ${se.y}px, ${x}px)`;
  }
  divider.addEventListener('input', clip);
  map.on('move zoom resize', clip);
  clip();
})();
</script>
"#;

const MAP_STYLES: &str = r#".split-map { position: relative; width: 100%; }
.split-label { position: absolute; top: 10px; z-index: 1000; padding: 4px 8px; background: rgba(255, 255, 255, 0.85); border-radius: 4px; font: bold 13px sans-serif; }
.split-label-left { left: 50px; }
.split-label-right { right: 10px; }
.split-line { position: absolute; top: 0; bottom: 0; left: 50%; width: 4px; margin-left: -2px; z-index: 999; background: #fff; box-shadow: 0 0 4px rgba(0, 0, 0, 0.6); pointer-events: none; }
.split-divider { position: absolute; top: 50%; left: 0; width: 100%; height: 0; margin: 0; padding: 0; z-index: 1000; -webkit-appearance: none; appearance: none; background: transparent; outline: none; pointer-events: none; }
.split-divider::-webkit-slider-runnable-track { height: 0; background: transparent; }
.split-divider::-webkit-slider-thumb { -webkit-appearance: none; appearance: none; pointer-events: auto; width: 40px; height: 40px; margin-top: -20px; border-radius: 50%; border: 2px solid #333; background: #fff; cursor: ew-resize; box-sizing: border-box; }
.split-divider::-moz-range-track { height: 0; background: transparent; }
.split-divider::-moz-range-thumb { pointer-events: auto; width: 40px; height: 40px; border-radius: 50%; border: 2px solid #333; background: #fff; cursor: ew-resize; box-sizing: border-box; }
.legend { position: absolute; right: 10px; bottom: 60px; z-index: 1000; padding: 8px; background: rgba(255, 255, 255, 0.9); border-radius: 4px; font: 12px sans-serif; }
.legend-title { font-weight: bold; margin-bottom: 4px; }
.legend-item { display: flex; align-items: center; margin: 2px 0; }
.legend-swatch { display: inline-block; width: 16px; height: 12px; margin-right: 6px; border: 1px solid #555; }
"#;

impl SplitMap {
    /// Attach a legend overlay. Replaces any previous legend.
    pub fn attach_legend(&mut self, legend: Legend) {
        self.legend = Some(legend);
    }

    pub fn with_legend(mut self, legend: Legend) -> Self {
        self.attach_legend(legend);
        self
    }

    /// CSS for the map container, divider, side labels and legend.
    pub fn stylesheet() -> &'static str {
        MAP_STYLES
    }

    /// Map markup and script, with overlays fetched from the given URLs.
    ///
    /// Expects Leaflet ([`LEAFLET_CSS`], [`LEAFLET_JS`]) and
    /// [`SplitMap::stylesheet`] to be loaded by the surrounding page.
    pub fn to_html(&self, left_url: &str, right_url: &str) -> ViewerResult<String> {
        let client = ClientConfig {
            center: [self.center.0, self.center.1],
            zoom: self.zoom,
            bounds: self.bounds.corners(),
            basemap_url: &self.basemap_url,
            basemap_attribution: &self.basemap_attribution,
            left: ClientLayer {
                label: &self.left.label,
                url: left_url,
            },
            right: ClientLayer {
                label: &self.right.label,
                url: right_url,
            },
        };

        let legend = self
            .legend
            .as_ref()
            .map(Legend::to_html)
            .unwrap_or_default();

        let height = self.height.to_string();
        let left_label = escape(&self.left.label);
        let right_label = escape(&self.right.label);
        let config = script_json(&client)?;

        Ok(fill_template(
            MAP_TEMPLATE,
            &[
                ("height", &height),
                ("left_label", &left_label),
                ("right_label", &right_label),
                ("legend", &legend),
                ("config", &config),
            ],
        ))
    }
}
