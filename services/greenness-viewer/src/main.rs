//! Greenness Viewer
//!
//! Renders the MSAVI2 2011 vs 2016 split map and histograms once, then
//! serves the result or exports it as a static site.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};
use viewer_common::ViewerConfig;

use greenness_viewer::{build_router, export::write_static_site, render_view};

/// Greenness Viewer
#[derive(Parser, Debug)]
#[command(name = "greenness-viewer")]
#[command(about = "Split-map viewer comparing MSAVI2 greenness rasters")]
struct Args {
    /// Viewer configuration file (YAML); built-in defaults when omitted
    #[arg(short, long, env = "VIEWER_CONFIG")]
    config: Option<PathBuf>,

    /// Raster for the left side of the map
    #[arg(long, env = "VIEWER_LEFT_RASTER")]
    left: Option<PathBuf>,

    /// Raster for the right side of the map
    #[arg(long, env = "VIEWER_RIGHT_RASTER")]
    right: Option<PathBuf>,

    /// Listen address
    #[arg(short, long, default_value = "127.0.0.1:8080", env = "VIEWER_LISTEN_ADDR")]
    listen: String,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long, env = "VIEWER_LOG_JSON")]
    log_json: bool,

    /// Export a static site to this directory instead of serving
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(&args);

    info!("Starting greenness viewer");

    let config = load_config(&args)?;

    let view = match render_view(&config) {
        Ok(view) => view,
        Err(e) => {
            error!(kind = e.kind(), error = %e, "Render failed");
            return Err(e).context("rendering the viewer page");
        }
    };

    if let Some(dir) = &args.output {
        write_static_site(&view, dir)
            .with_context(|| format!("exporting to {}", dir.display()))?;
        return Ok(());
    }

    let app = build_router(Arc::new(view));

    let addr: SocketAddr = args
        .listen
        .parse()
        .with_context(|| format!("invalid listen address {}", args.listen))?;

    info!("Greenness viewer listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("server failed")?;

    Ok(())
}

fn init_tracing(args: &Args) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    if args.log_json {
        fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_level(true)
            .json()
            .init();
    } else {
        fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_level(true)
            .init();
    }
}

fn load_config(args: &Args) -> Result<ViewerConfig> {
    let mut config = match &args.config {
        Some(path) => ViewerConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ViewerConfig::default(),
    };

    if let Some(left) = &args.left {
        config.left.path = left.clone();
    }
    if let Some(right) = &args.right {
        config.right.path = right.clone();
    }

    info!(
        left = %config.left.path.display(),
        right = %config.right.path.display(),
        zoom = config.map.zoom,
        "Configuration loaded"
    );
    Ok(config)
}
