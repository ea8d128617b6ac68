//! Greenness viewer service library.
//!
//! Runs the single render pass (load, scale, map, legend, histograms,
//! page) and serves or exports its output.

pub mod export;
pub mod handlers;
pub mod page;
pub mod pipeline;

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

pub use pipeline::{render_view, RenderedView};

/// Router over an already rendered view.
pub fn build_router(view: Arc<RenderedView>) -> Router {
    Router::new()
        .route("/", get(handlers::index_handler))
        .route("/index.html", get(handlers::index_handler))
        .route("/layers/left.png", get(handlers::left_layer_handler))
        .route("/layers/right.png", get(handlers::right_layer_handler))
        .route("/histograms.svg", get(handlers::histograms_handler))
        .route("/legend.json", get(handlers::legend_handler))
        .route("/health", get(handlers::health_handler))
        .layer(Extension(view))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
}
