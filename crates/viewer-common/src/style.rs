//! Color ramp and legend configuration.
//!
//! The ramp is a discrete classification: `breaks` holds the bucket
//! edges and `colors` one color per bucket, so a valid ramp always has
//! exactly one more break than colors.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ViewerError, ViewerResult};

/// An RGBA color, written as `#RRGGBB` or `#RRGGBBAA` in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    /// Parse a hex color string, with or without the leading `#`.
    pub fn from_hex(s: &str) -> ViewerResult<Self> {
        let hex = s.trim().trim_start_matches('#');
        let channel = |i: usize| {
            hex.get(i..i + 2)
                .and_then(|h| u8::from_str_radix(h, 16).ok())
                .ok_or_else(|| ViewerError::config(format!("invalid hex color: {s:?}")))
        };

        match hex.len() {
            6 => Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Ok(Self::new(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => Err(ViewerError::config(format!("invalid hex color: {s:?}"))),
        }
    }

    /// Hex form, `#RRGGBB` for opaque colors and `#RRGGBBAA` otherwise.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }

    pub fn to_rgba(&self) -> (u8, u8, u8, u8) {
        (self.r, self.g, self.b, self.a)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = ViewerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::from_hex(s)
    }
}

impl TryFrom<String> for Color {
    type Error = ViewerError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Color::from_hex(&s)
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_hex()
    }
}

/// The value range a layer is normalized against before classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueDomain {
    pub min: f64,
    pub max: f64,
}

impl ValueDomain {
    pub fn validate(&self) -> ViewerResult<()> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min >= self.max {
            return Err(ViewerError::config(format!(
                "value domain must satisfy min < max, got [{}, {}]",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

impl Default for ValueDomain {
    /// MSAVI2 is defined on [-1, 1].
    fn default() -> Self {
        Self {
            min: -1.0,
            max: 1.0,
        }
    }
}

/// Breakpoints and bucket colors of the shared classification ramp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorRampConfig {
    /// Bucket edges, strictly increasing
    pub breaks: Vec<f64>,

    /// One color per bucket
    pub colors: Vec<Color>,
}

impl ColorRampConfig {
    pub fn validate(&self) -> ViewerResult<()> {
        validate_breaks(&self.breaks, self.colors.len())
    }
}

/// Check that `breaks` can bucket values into `color_count` classes.
///
/// Requires at least two finite, strictly increasing breakpoints and
/// exactly `breaks.len() - 1` colors.
pub fn validate_breaks(breaks: &[f64], color_count: usize) -> ViewerResult<()> {
    if breaks.len() < 2 {
        return Err(ViewerError::config(
            "color ramp must have at least 2 breakpoints",
        ));
    }
    if color_count + 1 != breaks.len() {
        return Err(ViewerError::config(format!(
            "color ramp has {} breakpoints but {} colors; expected {} colors",
            breaks.len(),
            color_count,
            breaks.len() - 1
        )));
    }
    if let Some(bad) = breaks.iter().find(|b| !b.is_finite()) {
        return Err(ViewerError::config(format!(
            "color ramp breakpoints must be finite, found {bad}"
        )));
    }
    for pair in breaks.windows(2) {
        if pair[1] <= pair[0] {
            return Err(ViewerError::config(format!(
                "color ramp breakpoints must be strictly increasing ({} then {})",
                pair[0], pair[1]
            )));
        }
    }
    Ok(())
}

impl Default for ColorRampConfig {
    /// MSAVI2 greenness ramp: white for bare ground, then browns to deep greens.
    fn default() -> Self {
        Self {
            breaks: vec![-1.0, 0.0, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 1.0],
            colors: vec![
                Color::rgb(0xFF, 0xFF, 0xFF),
                Color::rgb(0xCE, 0x7E, 0x45),
                Color::rgb(0xFC, 0xD1, 0x63),
                Color::rgb(0x99, 0xB7, 0x18),
                Color::rgb(0x66, 0xA0, 0x00),
                Color::rgb(0x20, 0x74, 0x01),
                Color::rgb(0x05, 0x62, 0x01),
                Color::rgb(0x00, 0x4C, 0x00),
                Color::rgb(0x02, 0x3B, 0x01),
                Color::rgb(0x01, 0x2E, 0x01),
            ],
        }
    }
}

/// Legend overlay configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendConfig {
    #[serde(default = "default_legend_title")]
    pub title: String,

    /// Label of the lowest bucket. `{upper}` is replaced by its upper edge.
    #[serde(default = "default_lowest_label")]
    pub lowest_label: String,
}

fn default_legend_title() -> String {
    "MSAVI2".to_string()
}

fn default_lowest_label() -> String {
    "No vegetation (≤ {upper})".to_string()
}

impl Default for LegendConfig {
    fn default() -> Self {
        Self {
            title: default_legend_title(),
            lowest_label: default_lowest_label(),
        }
    }
}
