//! Common types shared across the MSAVI2 viewer crates.

pub mod bounds;
pub mod config;
pub mod error;
pub mod style;

pub use bounds::GeoBounds;
pub use config::{HistogramConfig, LayerConfig, MapConfig, ViewerConfig};
pub use error::{ViewerError, ViewerResult};
pub use style::{validate_breaks, Color, ColorRampConfig, LegendConfig, ValueDomain};
