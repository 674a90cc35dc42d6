//! HTTP surface of the bestseller block.
//!
//! Two read-only proxy routes forward to the external catalog with the
//! configured credential; the remaining routes describe the block and render
//! its saved markup.

pub mod error;
mod routes;
pub mod settings;
pub mod telemetry;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use bestseller_block::RenderOptions;
use bestseller_block::api::{BESTSELLER_ROUTE, GENRES_ROUTE};
use bestseller_catalog::CatalogClient;
use bestseller_catalog::http::ReqwestExecutor;
use eyre::{Result, WrapErr};
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::info;

pub use error::ApiError;
pub use settings::Settings;

pub const BLOCK_ROUTE: &str = "/pwn/v1/block";
pub const RENDER_ROUTE: &str = "/pwn/v1/render";

pub struct AppState {
    pub catalog: CatalogClient,
    pub render: RenderOptions,
}

pub type SharedState = Arc<AppState>;

pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route(GENRES_ROUTE, get(routes::genres))
        .route(BESTSELLER_ROUTE, get(routes::bestseller))
        .route(BLOCK_ROUTE, get(routes::block))
        .route(RENDER_ROUTE, post(routes::render))
        .route("/healthz", get(routes::health))
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().include_headers(false))
                .on_response(DefaultOnResponse::new()),
        )
}

/// Runs the proxy until interrupted.
pub async fn serve(settings: Settings) -> Result<()> {
    let catalog = CatalogClient::new(Arc::new(ReqwestExecutor::new()), settings.catalog)
        .wrap_err("Cannot start without a usable catalog configuration")?;

    let state = Arc::new(AppState {
        catalog,
        render: settings.render,
    });

    let addr = settings.server.addr;
    info!(%addr, "Binding HTTP listener");

    let listener = TcpListener::bind(addr)
        .await
        .wrap_err_with(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server exited");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = signal::ctrl_c().await;
    };
    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        if let Ok(mut stream) = signal(SignalKind::terminate()) {
            let _ = stream.recv().await;
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
