//! Static export of a rendered view.

use std::fs;
use std::path::Path;

use tracing::info;
use viewer_common::ViewerResult;

use crate::pipeline::{RenderedView, HISTOGRAMS_URL, LEFT_LAYER_URL, RIGHT_LAYER_URL};

/// Write the page and its assets under `dir`, at the relative URLs the
/// page references.
pub fn write_static_site(view: &RenderedView, dir: &Path) -> ViewerResult<()> {
    fs::create_dir_all(dir.join("layers"))?;
    fs::write(dir.join("index.html"), &view.page)?;
    fs::write(dir.join(LEFT_LAYER_URL), &view.left_png)?;
    fs::write(dir.join(RIGHT_LAYER_URL), &view.right_png)?;
    fs::write(dir.join(HISTOGRAMS_URL), &view.histograms_svg)?;
    fs::write(dir.join("legend.json"), serde_json::to_vec_pretty(&view.legend)?)?;

    info!(dir = %dir.display(), "Exported static site");
    Ok(())
}
