//! Rendering for the MSAVI2 split-map viewer.
//!
//! Implements the visual outputs of a rendering pass:
//! - Discrete color scale (breakpoints to bucket colors)
//! - Layer colorization and PNG encoding
//! - Legend entries
//! - Histograms of valid pixel values
//! - The split map itself

pub mod colorize;
pub mod colorscale;
pub mod histogram;
pub mod html;
pub mod legend;
pub mod png;
pub mod split_map;

pub use colorize::{colorize_indexed, IndexedImage};
pub use colorscale::ColorScale;
pub use histogram::{render_histograms_svg, Histogram, HistogramChart};
pub use legend::{build_legend, Legend, LegendEntry};
pub use png::{create_png_indexed, encode_indexed_image};
pub use split_map::{check_alignment, render_split_map, MapLayer, RenderedLayer, SplitMap};
