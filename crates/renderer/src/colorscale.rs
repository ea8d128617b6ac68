//! Discrete color scale over ordered breakpoints.
//!
//! `N` breakpoints define `N - 1` buckets. Bucket `i` covers the
//! half-open range `(breaks[i], breaks[i + 1]]`, closed on its upper
//! edge, so a value sitting exactly on a breakpoint belongs to the
//! bucket below it. Values at or below `breaks[1]` land in the first
//! bucket and values above `breaks[N - 2]` in the last; the outer two
//! breakpoints only bound the legend, they never reject a value.

use viewer_common::{validate_breaks, Color, ColorRampConfig, ViewerResult};

/// An immutable breakpoint-to-color classification.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScale<C = Color> {
    breaks: Vec<f64>,
    colors: Vec<C>,
}

impl<C> ColorScale<C> {
    /// Build a scale. Fails unless `colors.len() == breaks.len() - 1` and
    /// the breakpoints are finite and strictly increasing.
    pub fn new(breaks: Vec<f64>, colors: Vec<C>) -> ViewerResult<Self> {
        validate_breaks(&breaks, colors.len())?;
        Ok(Self { breaks, colors })
    }

    /// Index of the bucket `value` falls into.
    ///
    /// Binary search over the interior breakpoints. NaN compares false
    /// against every breakpoint and so lands in bucket 0; callers that
    /// treat non-finite pixels as nodata must filter them first.
    pub fn bucket_of(&self, value: f64) -> usize {
        let interior = &self.breaks[1..self.breaks.len() - 1];
        interior.partition_point(|&b| b < value)
    }

    /// Color for `value`, saturating at both ends of the scale.
    pub fn color_of(&self, value: f64) -> &C {
        &self.colors[self.bucket_of(value)]
    }

    pub fn breaks(&self) -> &[f64] {
        &self.breaks
    }

    pub fn colors(&self) -> &[C] {
        &self.colors
    }

    /// Number of buckets.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl ColorScale<Color> {
    pub fn from_config(config: &ColorRampConfig) -> ViewerResult<Self> {
        Self::new(config.breaks.clone(), config.colors.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use viewer_common::ViewerError;

    fn abc() -> ColorScale<&'static str> {
        ColorScale::new(vec![-1.0, 0.0, 0.1, 1.0], vec!["#A", "#B", "#C"]).unwrap()
    }

    #[test]
    fn test_small_scale_lookup() {
        let scale = abc();
        assert_eq!(*scale.color_of(-0.5), "#A");
        assert_eq!(*scale.color_of(0.05), "#B");
        assert_eq!(*scale.color_of(0.9), "#C");
    }

    #[test]
    fn test_out_of_range_saturates() {
        let scale = abc();
        assert_eq!(*scale.color_of(5.0), "#C");
        assert_eq!(*scale.color_of(-5.0), "#A");
        assert_eq!(*scale.color_of(f64::INFINITY), "#C");
        assert_eq!(*scale.color_of(f64::NEG_INFINITY), "#A");
    }

    #[test]
    fn test_upper_edge_is_inclusive() {
        let scale = abc();
        assert_eq!(*scale.color_of(0.0), "#A");
        assert_eq!(*scale.color_of(0.1), "#B");
        assert_eq!(*scale.color_of(1.0), "#C");
        assert_eq!(*scale.color_of(-1.0), "#A");
    }

    #[test]
    fn test_nan_lands_in_first_bucket() {
        assert_eq!(abc().bucket_of(f64::NAN), 0);
    }

    #[test]
    fn test_default_ramp_buckets() {
        let scale = ColorScale::from_config(&ColorRampConfig::default()).unwrap();
        assert_eq!(scale.len(), 10);
        assert_eq!(scale.color_of(-0.3).to_hex(), "#FFFFFF");
        assert_eq!(scale.color_of(0.0).to_hex(), "#FFFFFF");
        assert_eq!(scale.color_of(0.05).to_hex(), "#CE7E45");
        assert_eq!(scale.color_of(0.45).to_hex(), "#207401");
        assert_eq!(scale.color_of(0.85).to_hex(), "#012E01");
        assert_eq!(scale.color_of(1.0).to_hex(), "#012E01");
    }

    #[test]
    fn test_monotone_bucketing() {
        let scale = ColorScale::from_config(&ColorRampConfig::default()).unwrap();
        let mut last = 0;
        for i in 0..=400 {
            let v = -2.0 + i as f64 * 0.01;
            let bucket = scale.bucket_of(v);
            assert!(bucket >= last, "bucket decreased at {v}");
            assert_eq!(bucket, scale.bucket_of(v));
            last = bucket;
        }
        assert_eq!(last, scale.len() - 1);
    }

    #[test]
    fn test_two_breakpoints_single_bucket() {
        let scale = ColorScale::new(vec![0.0, 1.0], vec!['x']).unwrap();
        assert_eq!(*scale.color_of(-10.0), 'x');
        assert_eq!(*scale.color_of(10.0), 'x');
    }

    #[test]
    fn test_mismatched_lengths_rejected() {
        let err = ColorScale::new(vec![0.0, 0.5, 1.0], vec!["a", "b", "c"]).unwrap_err();
        assert!(matches!(err, ViewerError::ConfigurationError(_)));
        assert!(ColorScale::<&str>::new(vec![0.0], vec![]).is_err());
    }
}
