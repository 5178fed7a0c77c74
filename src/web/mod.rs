use std::num::NonZeroU16;
use std::sync::Arc;

use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::gateway::Gateway;
use crate::validation::BriefValidator;

mod api;
mod views;

use api::generate_frame_handler;
use views::{visualizer_handler, visualizer_submit_handler};

#[derive(Clone)]
pub struct AppState {
    gateway: Arc<Gateway>,
    validator: BriefValidator,
}

impl AppState {
    pub fn new(gateway: Gateway, validator: BriefValidator) -> Self {
        Self {
            gateway: Arc::new(gateway),
            validator,
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", axum::routing::get(visualizer_handler))
        .route(
            "/visualizer",
            axum::routing::get(visualizer_handler).post(visualizer_submit_handler),
        )
        .route("/api/generateFrame", axum::routing::post(generate_frame_handler))
        .route("/static/styles.css", axum::routing::get(styles_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn styles_handler() -> impl IntoResponse {
    const STYLES: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/static/styles.css"));
    ([(CONTENT_TYPE, "text/css")], STYLES)
}

/// Serve the router on an already bound listener until Ctrl-C.
pub async fn serve(listener: TcpListener, state: AppState) -> Result<(), anyhow::Error> {
    let app = create_router(state);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

pub async fn setup_server(
    listen_addr: &str,
    port: NonZeroU16,
    state: AppState,
) -> Result<(), anyhow::Error> {
    let addr = format!("{}:{}", listen_addr, port);
    info!("Starting server on http://{}", addr);
    let listener = TcpListener::bind(&addr).await?;
    serve(listener, state).await
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
