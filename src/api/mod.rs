pub mod config;
pub mod handlers;
pub mod models;
pub mod templates;

use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};
use std::time::Instant;
use tracing::{debug, error, info, instrument};

use crate::api::config::ApiConfig;
use crate::api::templates::PageRenderer;

/// Shared, read-only state handed to every handler
#[derive(Debug, Clone)]
pub struct ApiState {
    pub config: ApiConfig,
    pub renderer: PageRenderer,
    pub started: Instant,
}

impl ApiState {
    pub fn new(config: ApiConfig) -> Result<Self> {
        Ok(Self {
            config,
            renderer: PageRenderer::new()?,
            started: Instant::now(),
        })
    }
}

/// Registers every route of the service
///
/// Shared by the server and by handler tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/").route(web::get().to(handlers::index)))
        .service(web::resource("/scan").route(web::post().to(handlers::scan)))
        .service(web::resource("/success").route(web::get().to(handlers::success)))
        .service(web::resource("/sucess").route(web::get().to(handlers::success)))
        .service(web::resource("/generate").route(web::post().to(handlers::generate)))
        .service(web::resource("/search").route(web::post().to(handlers::search)))
        .service(web::resource("/health").route(web::get().to(handlers::health_check)));
}

/// Starts the API server with the specified configuration
///
/// Builds the shared state and serves until the server is stopped.
///
/// # Arguments
/// * `config` - API configuration, including the address to bind to
///
/// # Returns
/// * `Result<()>` - Success or an error
#[instrument(skip(config), fields(address = %config.bind_address()))]
pub async fn start_server(config: ApiConfig) -> Result<()> {
    info!("Starting campaign QR API server on {}", config.bind_address());

    let host = config.host.clone();
    let port = config.port;
    let state = web::Data::new(ApiState::new(config)?);
    debug!("Shared state initialized: {:?}", state.config);

    let server_result = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((host.as_str(), port))
    .map_err(|e| {
        error!("Failed to bind to {}:{}: {}", host, port, e);
        e
    })
    .with_context(|| format!("Failed to bind to {}:{}", host, port))?
    .run()
    .await;

    if let Err(e) = server_result {
        error!("Server error: {}", e);
        return Err(e.into());
    }

    info!("Server shutdown complete");
    Ok(())
}
