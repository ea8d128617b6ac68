//! HTTP handlers. Every response is served from the rendered view.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::header,
    response::{Html, IntoResponse},
    Json,
};
use renderer::Legend;
use serde::Serialize;

use crate::pipeline::RenderedView;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

/// GET / - The viewer page
pub async fn index_handler(Extension(view): Extension<Arc<RenderedView>>) -> Html<String> {
    Html(view.page.clone())
}

/// GET /layers/left.png
pub async fn left_layer_handler(
    Extension(view): Extension<Arc<RenderedView>>,
) -> impl IntoResponse {
    png_response(view.left_png.clone())
}

/// GET /layers/right.png
pub async fn right_layer_handler(
    Extension(view): Extension<Arc<RenderedView>>,
) -> impl IntoResponse {
    png_response(view.right_png.clone())
}

fn png_response(png: Vec<u8>) -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "image/png"),
            (header::CACHE_CONTROL, "max-age=3600"),
        ],
        png,
    )
}

/// GET /histograms.svg
pub async fn histograms_handler(
    Extension(view): Extension<Arc<RenderedView>>,
) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "image/svg+xml")],
        view.histograms_svg.clone(),
    )
}

/// GET /legend.json - Legend entries in ascending value order
pub async fn legend_handler(Extension(view): Extension<Arc<RenderedView>>) -> Json<Legend> {
    Json(view.legend.clone())
}

/// GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
