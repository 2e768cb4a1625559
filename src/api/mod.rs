//! REST API routes (Axum)

use std::sync::Arc;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Settings;
use crate::market_data::adapters::fugle::FugleAdapter;
use crate::market_data::adapters::QuoteSource;

mod error;
mod handlers;

pub use error::ApiError;

/// State shared by every request: the vendor adapter, built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn QuoteSource + Send + Sync>,
}

impl AppState {
    pub fn new(source: Arc<dyn QuoteSource + Send + Sync>) -> Self {
        Self { source }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(Arc::new(FugleAdapter::from_settings(settings)))
    }
}

/// Create the REST API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/price/:symbol", get(handlers::read_price))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `settings.bind_addr` and serve until Ctrl-C.
pub async fn serve(settings: &Settings) -> anyhow::Result<()> {
    let app = create_router(AppState::from_settings(settings));
    let listener = TcpListener::bind(&settings.bind_addr).await?;
    info!(addr = %listener.local_addr()?, "price service listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("price service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // No signal handler available; run until the process is killed.
        std::future::pending::<()>().await;
    }
}
