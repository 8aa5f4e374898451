//! Backend for the Cicero marketing sites.
//!
//! Serves the thin API routes behind the sites (feedback collection, the
//! contact form, and the stubbed lead search) backed by a lazily opened
//! MongoDB handle, plus the page-side flow logic shared by the site
//! frontends: the API client, the form-controller state machines, and the
//! snackbar broadcaster.
//!
//! # Routes
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/api/feedback` | Store a free-text feedback message |
//! | `POST` | `/api/contact` | Store a contact-form submission |
//! | `POST` | `/api/search` | Stubbed lead search (fixed fixture) |
//! | `GET`  | `/health` | Health check (status + version) |
//!
//! Configuration comes from the environment: `MONGO_URI` is required and
//! checked before the listener binds; `RUST_PORT` and `GEO_ENDPOINT` have
//! defaults.

use std::{net::SocketAddr, time::Duration};

use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::{get, post},
};

use signal::{
    ctrl_c,
    unix::{SignalKind, signal},
};
use tokio::{net::TcpListener, signal};
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

pub mod client;
pub mod config;
pub mod contact;
pub mod database;
pub mod error;
pub mod feedback;
pub mod forms;
pub mod geo;
pub mod notify;
pub mod routes;
pub mod search;
pub mod state;

use config::Config;
use routes::{contact_handler, feedback_handler, health_handler, search_handler};
use state::AppState;

pub async fn start_server() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = Config::load().expect("Environment misconfigured!");

    info!("Initializing state...");
    let state = AppState::new(config);

    info!("Starting server...");

    let app = app(state.clone());

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await.unwrap();
    info!("Server running on {address}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .unwrap();

    println!("Server shutting down...");
}

/// Builds the application router with all routes and the CORS layer.
pub fn app(state: std::sync::Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/api/feedback", post(feedback_handler))
        .route("/api/contact", post(contact_handler))
        .route("/api/search", post(search_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
