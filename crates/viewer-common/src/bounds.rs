//! Geographic bounding box of the rendered extent.

use serde::{Deserialize, Serialize};

use crate::error::{ViewerError, ViewerResult};

/// A fixed rectangular extent in geographic degrees (EPSG:4326).
///
/// Construction goes through [`GeoBounds::new`], which enforces
/// `west < east` and `south < north`. Deserialization is routed through
/// the same check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBounds")]
pub struct GeoBounds {
    west: f64,
    east: f64,
    south: f64,
    north: f64,
}

#[derive(Deserialize)]
struct RawBounds {
    west: f64,
    east: f64,
    south: f64,
    north: f64,
}

impl TryFrom<RawBounds> for GeoBounds {
    type Error = ViewerError;

    fn try_from(raw: RawBounds) -> Result<Self, Self::Error> {
        GeoBounds::new(raw.west, raw.east, raw.south, raw.north)
    }
}

impl GeoBounds {
    /// Create bounds from edge coordinates.
    pub fn new(west: f64, east: f64, south: f64, north: f64) -> ViewerResult<Self> {
        if ![west, east, south, north].iter().all(|v| v.is_finite()) {
            return Err(ViewerError::config(format!(
                "bounds must be finite: west={west}, east={east}, south={south}, north={north}"
            )));
        }
        if west >= east {
            return Err(ViewerError::config(format!(
                "bounds west ({west}) must be less than east ({east})"
            )));
        }
        if south >= north {
            return Err(ViewerError::config(format!(
                "bounds south ({south}) must be less than north ({north})"
            )));
        }
        Ok(Self {
            west,
            east,
            south,
            north,
        })
    }

    pub fn west(&self) -> f64 {
        self.west
    }

    pub fn east(&self) -> f64 {
        self.east
    }

    pub fn south(&self) -> f64 {
        self.south
    }

    pub fn north(&self) -> f64 {
        self.north
    }

    /// Width of the box in degrees of longitude.
    pub fn width(&self) -> f64 {
        self.east - self.west
    }

    /// Height of the box in degrees of latitude.
    pub fn height(&self) -> f64 {
        self.north - self.south
    }

    /// Midpoint as `(lat, lon)`, the order map widgets expect.
    pub fn center(&self) -> (f64, f64) {
        (
            (self.north + self.south) / 2.0,
            (self.west + self.east) / 2.0,
        )
    }

    /// Corner pairs `[[south, west], [north, east]]` for image overlays.
    pub fn corners(&self) -> [[f64; 2]; 2] {
        [[self.south, self.west], [self.north, self.east]]
    }
}

impl Default for GeoBounds {
    /// Extent of the CRC study site.
    fn default() -> Self {
        Self {
            west: -109.639353,
            east: -109.628493,
            south: 38.262410,
            north: 38.268114,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_is_midpoint() {
        let bounds = GeoBounds::new(-110.0, -108.0, 38.0, 40.0).unwrap();
        assert_eq!(bounds.center(), (39.0, -109.0));
        assert_eq!(bounds.width(), 2.0);
        assert_eq!(bounds.height(), 2.0);
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let err = GeoBounds::new(-108.0, -110.0, 38.0, 40.0).unwrap_err();
        assert!(matches!(err, ViewerError::ConfigurationError(_)));

        let err = GeoBounds::new(-110.0, -108.0, 40.0, 38.0).unwrap_err();
        assert!(matches!(err, ViewerError::ConfigurationError(_)));
    }

    #[test]
    fn test_degenerate_bounds_rejected() {
        assert!(GeoBounds::new(-110.0, -110.0, 38.0, 40.0).is_err());
        assert!(GeoBounds::new(-110.0, -108.0, 38.0, 38.0).is_err());
        assert!(GeoBounds::new(f64::NAN, -108.0, 38.0, 40.0).is_err());
    }

    #[test]
    fn test_default_is_valid() {
        let d = GeoBounds::default();
        let checked = GeoBounds::new(d.west(), d.east(), d.south(), d.north()).unwrap();
        assert_eq!(d, checked);
        let (lat, lon) = d.center();
        assert!(lat > d.south() && lat < d.north());
        assert!(lon > d.west() && lon < d.east());
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: GeoBounds =
            serde_json::from_str(r#"{"west":0.0,"east":1.0,"south":0.0,"north":1.0}"#).unwrap();
        assert_eq!(ok.corners(), [[0.0, 0.0], [1.0, 1.0]]);

        let bad = serde_json::from_str::<GeoBounds>(
            r#"{"west":1.0,"east":0.0,"south":0.0,"north":1.0}"#,
        );
        assert!(bad.is_err());
    }
}
