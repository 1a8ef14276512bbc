use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{Router, extract::State, routing::get};
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::{self, SharedDashboard};
use crate::dashboard::{Dashboard, Event, render_text};
use crate::error::SkycastError;

/// Full application router: JSON API under `/api`, text dashboard at `/`
pub fn app(dashboard: SharedDashboard) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index))
        .with_state(Arc::clone(&dashboard))
        .nest("/api", api::router(dashboard))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

async fn index(State(dashboard): State<SharedDashboard>) -> String {
    let mut dashboard = dashboard.lock().await;
    render_text(&dashboard.dispatch(Event::Show).await)
}

pub async fn run(port: u16, dashboard: Dashboard) -> Result<()> {
    let app = app(Arc::new(Mutex::new(dashboard)));

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(SkycastError::from)
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Web server running at http://localhost:{}", port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .with_context(|| "Web server failed")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
