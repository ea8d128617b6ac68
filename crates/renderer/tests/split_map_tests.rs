//! End-to-end tests from raster files to a split map.

use raster_loader::load_raster;
use renderer::legend::build_legend;
use renderer::{render_split_map, ColorScale, MapLayer};
use test_utils::{create_gradient_grid, create_vegetation_grid, FixtureDir};
use viewer_common::{ColorRampConfig, LegendConfig, MapConfig, ViewerError};

#[test]
fn test_two_rasters_to_html() {
    let dir = FixtureDir::new();
    let left_path = dir.f32_tiff("2011.tif", 16, 8, &create_gradient_grid(16, 8));
    let right_path = dir.f32_tiff("2016.tif", 16, 8, &create_vegetation_grid(16, 8));
    let left_grid = load_raster(&left_path).unwrap();
    let right_grid = load_raster(&right_path).unwrap();

    let config = MapConfig::default();
    let scale = ColorScale::from_config(&ColorRampConfig::default()).unwrap();
    let left = MapLayer::new("MSAVI2 2011", &left_grid, &scale, config.value_domain);
    let right = MapLayer::new("MSAVI2 2016", &right_grid, &scale, config.value_domain);

    let mut map = render_split_map(&left, &right, &config).unwrap();
    map.attach_legend(build_legend(&scale, &LegendConfig::default()));

    assert_eq!((map.left.width, map.left.height), (16, 8));
    assert_eq!(map.center, config.bounds.center());
    assert_ne!(map.left.png, map.right.png);

    let html = map.to_html("left.png", "right.png").unwrap();
    assert!(html.contains("MSAVI2 2011"));
    assert!(html.contains("MSAVI2 2016"));
    assert_eq!(html.matches("legend-item").count(), 10);
}

#[test]
fn test_mismatched_rasters_abort() {
    let dir = FixtureDir::new();
    let a = load_raster(dir.f32_tiff("a.tif", 4, 4, &[0.1; 16])).unwrap();
    let b = load_raster(dir.f32_tiff("b.tif", 8, 2, &[0.1; 16])).unwrap();

    let config = MapConfig::default();
    let scale = ColorScale::from_config(&ColorRampConfig::default()).unwrap();
    let result = render_split_map(
        &MapLayer::new("a", &a, &scale, config.value_domain),
        &MapLayer::new("b", &b, &scale, config.value_domain),
        &config,
    );
    assert!(matches!(result, Err(ViewerError::ConfigurationError(_))));
}
