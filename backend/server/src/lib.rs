//! # Pantry Server
//!
//! HTTP API for a recipe and pantry manager.
//!
//! ## Resources
//!
//! All under `/api/v1`.
//!
//! | Path | Access |
//! |------|--------|
//! | `/ingredients` | reads public, writes for any user |
//! | `/recipes` | owner (or superuser) |
//! | `/recipes/suggestions` | any user, ranks the whole catalog |
//! | `/recipe-ingredients` | owner of the recipe |
//! | `/user-ingredients` | owner of the pantry item |
//! | `/users` | superuser, `/users/me` for anyone |
//! | `/users/:id` | self for reads, otherwise superuser; deletes cascade |
//!
//! ## Storage
//!
//! Redis when `REDIS_URL` is set, otherwise process memory. See [`database`].
//!
//! ## Errors
//!
//! Every failure is JSON `{"detail": "..."}`. Validation problems are 422,
//! ownership problems 400, unknown ids 404.
//!
//! ## Running
//!
//! ```sh
//! ADMIN_TOKEN=change-me RUST_LOG=info cargo run -p pantry-backend
//! ```
use std::time::Duration;

use axum::{
    Router,
    http::{
        Method,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
};
#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};
use tokio::{net::TcpListener, signal::ctrl_c};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod extract;
pub mod memory;
pub mod routes;
pub mod search;
pub mod state;
pub mod store;
pub mod suggest;
pub mod utils;

use config::Config;
use error::StartupError;
use routes::{SharedState, api_router};
use state::State;

pub const API_PREFIX: &str = "/api/v1";

pub fn app(state: SharedState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .nest(API_PREFIX, api_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

pub async fn start_server() -> Result<(), StartupError> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Loading config...");
    let config = Config::load()?;

    info!("Initializing state...");
    let state = State::new(config).await?;

    info!("Starting server...");

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
