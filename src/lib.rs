use axum::Router;
use tokio::net::TcpListener;

use crate::model::{ModelManager, StaticCatalog};
use crate::utils::signal::shutdown_signal;
use crate::{error::AppResult, web::AppState};

pub mod config;
pub use config::{Config, ConfigError, ConfigResult};

pub mod auth;
pub mod catalog;
pub mod error;
pub mod model;
pub mod notify;
pub mod session;
pub mod utils;
pub mod web;

static APPLICATION_NAME: &str = "masterclass";

/// Loads the configured catalog, or the bundled one when no path is set.
pub fn load_catalog(config: &Config) -> AppResult<StaticCatalog> {
    let catalog = match config.app().catalog_path() {
        Some(path) => StaticCatalog::load(path)?,
        None => StaticCatalog::seed()?,
    };
    Ok(catalog)
}

pub async fn build_server() -> AppResult<(AppState, Router)> {
    let use_local = cfg!(debug_assertions);
    let config = Config::get_or_init(use_local).await;

    let catalog = load_catalog(config)?;
    build_server_with_catalog(catalog, config)
}

/// Wires the router around an already loaded catalog. Must be called inside a
/// tokio runtime.
pub fn build_server_with_catalog(
    catalog: StaticCatalog,
    config: &'static Config,
) -> AppResult<(AppState, Router)> {
    let mm = ModelManager::new(catalog);
    let state = AppState::new(mm, config);
    let app = web::routes::build_app(state.clone());
    Ok((state, app))
}

#[tracing::instrument]
pub async fn setup_workers() -> AppResult<()> {
    let (_, app) = build_server().await?;
    let config = Config::get_or_init(cfg!(debug_assertions)).await;
    let listener = TcpListener::bind(config.host().bindto()).await?;

    tracing::info!("axum is starting at: {}", config.host().bindto());
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

pub fn setup_trace() {
    use tracing_error::ErrorLayer;
    use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

    // load .env file for RUST_LOG etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .with(ErrorLayer::default())
        .init();

    tracing::debug!("tracing initialized.");
}

#[tracing::instrument]
pub async fn run() -> AppResult<()> {
    setup_trace();
    setup_workers().await?;
    Ok(())
}
