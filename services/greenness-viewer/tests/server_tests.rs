//! Render pass and router tests over fixture rasters.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use greenness_viewer::export::write_static_site;
use greenness_viewer::{build_router, render_view, RenderedView};
use test_utils::{create_gradient_grid, create_vegetation_grid, punch_nodata, FixtureDir};
use tower::ServiceExt;
use viewer_common::{ViewerConfig, ViewerError};

fn fixture_config(dir: &FixtureDir) -> ViewerConfig {
    let mut right = create_vegetation_grid(32, 16);
    punch_nodata(&mut right, 11);

    let mut config = ViewerConfig::default();
    config.left.path = dir.f32_tiff("msavi2_2011.tif", 32, 16, &create_gradient_grid(32, 16));
    config.right.path = dir.f32_tiff("msavi2_2016.tif", 32, 16, &right);
    config
}

fn rendered() -> Arc<RenderedView> {
    let dir = FixtureDir::new();
    Arc::new(render_view(&fixture_config(&dir)).unwrap())
}

async fn get(view: Arc<RenderedView>, uri: &str) -> (StatusCode, Option<String>, Vec<u8>) {
    let response = build_router(view)
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, content_type, body.to_vec())
}

// ============================================================================
// Render pass
// ============================================================================

#[test]
fn test_page_structure() {
    let view = rendered();
    let page = &view.page;

    let h1 = page
        .find("<h1>CRC MSAVI2 2011 and 2016 Greenness Viewer</h1>")
        .unwrap();
    let map = page.find("id=\"split-map\"").unwrap();
    let h2 = page.find("<h2>MSAVI2 Histograms: 2011 vs 2016</h2>").unwrap();
    assert!(h1 < map && map < h2);

    assert!(page.contains("MSAVI2 2011"));
    assert!(page.contains("MSAVI2 2016"));
    assert!(page.contains("No vegetation (≤ 0.0)"));
    assert!(page.contains("layers/left.png"));
    assert!(page.contains("layers/right.png"));
    assert!(page.contains("histograms.svg"));
}

#[test]
fn test_histograms_titled_by_year() {
    let view = rendered();
    assert!(view.histograms_svg.contains("MSAVI2 Histogram - 2011"));
    assert!(view.histograms_svg.contains("MSAVI2 Histogram - 2016"));
    assert!(!view.histograms_svg.contains("(2011)"));
    assert_eq!(view.legend.entries.len(), 10);
}

#[test]
fn test_missing_raster_aborts() {
    let dir = FixtureDir::new();
    let mut config = fixture_config(&dir);
    config.right.path = dir.join("absent.tif");
    let err = render_view(&config).unwrap_err();
    assert!(matches!(err, ViewerError::InputNotFound(_)));
}

#[test]
fn test_undecodable_raster_aborts() {
    let dir = FixtureDir::new();
    let mut config = fixture_config(&dir);
    config.left.path = dir.garbage("broken.tif");
    let err = render_view(&config).unwrap_err();
    assert_eq!(err.kind(), "decode_error");
}

#[test]
fn test_dimension_mismatch_aborts() {
    let dir = FixtureDir::new();
    let mut config = fixture_config(&dir);
    config.right.path = dir.f32_tiff("small.tif", 4, 4, &[0.2; 16]);
    let err = render_view(&config).unwrap_err();
    assert!(matches!(err, ViewerError::ConfigurationError(_)));
}

#[test]
fn test_all_nodata_layer_still_renders() {
    let dir = FixtureDir::new();
    let mut config = fixture_config(&dir);
    config.right.path = dir.f32_tiff("empty.tif", 32, 16, &vec![f64::NAN; 32 * 16]);
    let view = render_view(&config).unwrap();
    assert!(view.histograms_svg.contains("<svg"));
}

#[test]
fn test_static_export() {
    let view = rendered();
    let out = tempfile::tempdir().unwrap();
    write_static_site(&view, out.path()).unwrap();

    for name in ["index.html", "layers/left.png", "layers/right.png", "histograms.svg", "legend.json"] {
        assert!(out.path().join(name).is_file(), "missing {}", name);
    }
    let png = std::fs::read(out.path().join("layers/left.png")).unwrap();
    assert_eq!(png, view.left_png);
}

// ============================================================================
// Router
// ============================================================================

#[tokio::test]
async fn test_index() {
    let (status, content_type, body) = get(rendered(), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.unwrap().starts_with("text/html"));
    assert!(String::from_utf8(body).unwrap().contains("<!DOCTYPE html>"));
}

#[tokio::test]
async fn test_layers() {
    let view = rendered();
    for uri in ["/layers/left.png", "/layers/right.png"] {
        let (status, content_type, body) = get(view.clone(), uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some("image/png"));
        assert_eq!(&body[..4], b"\x89PNG");
    }
}

#[tokio::test]
async fn test_histograms_svg() {
    let (status, content_type, body) = get(rendered(), "/histograms.svg").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("image/svg+xml"));
    assert!(String::from_utf8(body).unwrap().contains("<svg"));
}

#[tokio::test]
async fn test_legend_json() {
    let (status, _, body) = get(rendered(), "/legend.json").await;
    assert_eq!(status, StatusCode::OK);
    let legend: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(legend["title"], "MSAVI2");
    assert_eq!(legend["entries"].as_array().unwrap().len(), 10);
    assert_eq!(legend["entries"][0]["color"], "#FFFFFF");
}

#[tokio::test]
async fn test_health_and_unknown_route() {
    let view = rendered();
    let (status, _, body) = get(view.clone(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, br#"{"status":"ok"}"#);

    let (status, _, _) = get(view, "/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
