//! Viewer configuration.
//!
//! Every constant of the rendering pass lives here. `Default` reproduces
//! the CRC 2011/2016 comparison; a YAML file may override any section.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::bounds::GeoBounds;
use crate::error::{ViewerError, ViewerResult};
use crate::style::{Color, ColorRampConfig, LegendConfig, ValueDomain};

/// Root configuration for one rendering pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Page title
    pub title: String,

    pub map: MapConfig,

    /// Shared classification ramp for both map layers
    pub color_ramp: ColorRampConfig,

    pub legend: LegendConfig,

    /// Left side of the split map (earlier year)
    pub left: LayerConfig,

    /// Right side of the split map (later year)
    pub right: LayerConfig,

    pub histogram: HistogramConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: "CRC MSAVI2 2011 and 2016 Greenness Viewer".to_string(),
            map: MapConfig::default(),
            color_ramp: ColorRampConfig::default(),
            legend: LegendConfig::default(),
            left: LayerConfig {
                path: PathBuf::from("data/msavi2_2011.tif"),
                label: "MSAVI2 2011".to_string(),
                year: "2011".to_string(),
                histogram_color: Color::rgb(0x1F, 0x77, 0xB4),
            },
            right: LayerConfig {
                path: PathBuf::from("data/msavi2_2016.tif"),
                label: "MSAVI2 2016".to_string(),
                year: "2016".to_string(),
                histogram_color: Color::rgb(0xD6, 0x27, 0x28),
            },
            histogram: HistogramConfig::default(),
        }
    }
}

impl ViewerConfig {
    /// Load configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> ViewerResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ViewerError::config(format!("cannot read config {}: {}", path.display(), e))
        })?;
        debug!(path = %path.display(), "Loaded viewer config");
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string. Missing sections keep their defaults.
    pub fn from_yaml(yaml: &str) -> ViewerResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate cross-field invariants not covered by the types.
    pub fn validate(&self) -> ViewerResult<()> {
        self.color_ramp.validate()?;
        self.map.value_domain.validate()?;
        self.histogram.validate()?;
        if self.map.zoom > 24 {
            return Err(ViewerError::config(format!(
                "zoom level {} out of range 0..=24",
                self.map.zoom
            )));
        }
        if self.map.height == 0 {
            return Err(ViewerError::config("map height must be positive"));
        }
        if let Some([w, h]) = self.map.expected_dimensions {
            if w == 0 || h == 0 {
                return Err(ViewerError::config(
                    "expected raster dimensions must be positive",
                ));
            }
        }
        Ok(())
    }
}

/// Split map view configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Extent the rasters are stretched over; authoritative, never read from file metadata
    pub bounds: GeoBounds,

    pub zoom: u8,

    /// Map height in CSS pixels
    pub height: u32,

    /// Domain both layers are normalized against
    pub value_domain: ValueDomain,

    /// Required `[width, height]` of both rasters, when known
    pub expected_dimensions: Option<[usize; 2]>,

    /// Basemap tile URL template
    pub basemap_url: String,

    pub basemap_attribution: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            bounds: GeoBounds::default(),
            zoom: 15,
            height: 500,
            value_domain: ValueDomain::default(),
            expected_dimensions: None,
            basemap_url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            basemap_attribution: "&copy; OpenStreetMap contributors".to_string(),
        }
    }
}

/// One side of the split map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerConfig {
    /// Raster file to load
    pub path: PathBuf,

    /// Label shown on this side of the map
    pub label: String,

    /// Year shown in the histogram title
    pub year: String,

    /// Bar color of this layer's histogram
    pub histogram_color: Color,
}

/// Histogram figure configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistogramConfig {
    /// Section heading above the charts
    pub heading: String,

    /// Chart title prefix; each chart appends " - {year}"
    pub title: String,

    pub bins: usize,

    /// Figure size in pixels, both charts together
    pub width: u32,
    pub height: u32,

    pub x_label: String,
    pub y_label: String,

    pub edge_color: Color,

    /// Gridline opacity in [0, 1]
    pub grid_opacity: f64,
}

impl HistogramConfig {
    pub fn validate(&self) -> ViewerResult<()> {
        if self.bins == 0 {
            return Err(ViewerError::config("histogram bin count must be positive"));
        }
        if self.width == 0 || self.height == 0 {
            return Err(ViewerError::config("histogram figure size must be positive"));
        }
        if !(0.0..=1.0).contains(&self.grid_opacity) {
            return Err(ViewerError::config(format!(
                "grid opacity {} out of range [0, 1]",
                self.grid_opacity
            )));
        }
        Ok(())
    }
}

impl Default for HistogramConfig {
    fn default() -> Self {
        Self {
            heading: "MSAVI2 Histograms: 2011 vs 2016".to_string(),
            title: "MSAVI2 Histogram".to_string(),
            bins: 50,
            width: 1400,
            height: 500,
            x_label: "MSAVI2".to_string(),
            y_label: "Pixel Count".to_string(),
            edge_color: Color::rgb(0, 0, 0),
            grid_opacity: 0.3,
        }
    }
}
