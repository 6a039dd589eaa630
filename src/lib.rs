//! Bank Note Authenticator
//!
//! Web form that classifies a bank note as genuine or fake from four
//! statistical features of its image.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                 BANK NOTE AUTHENTICATOR                  │
//! ├──────────────────────────────────────────────────────────┤
//! │  ┌───────────┐   ┌────────────────┐   ┌───────────────┐  │
//! │  │  Form     │──▶│  Authenticate  │──▶│  Render       │  │
//! │  │  (Axum)   │   │  (validate)    │   │  (HTML)       │  │
//! │  └───────────┘   └───────┬────────┘   └───────────────┘  │
//! │                          ▼                               │
//! │                  ┌───────────────┐                       │
//! │                  │ Model Gateway │  loaded once          │
//! │                  └───────────────┘                       │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod authenticate;
pub mod config;
pub mod error;
pub mod gateway;
pub mod handlers;
pub mod models;
pub mod render;

use std::sync::Arc;

use axum::{routing::{get, post}, Router};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

pub use error::{AppError, AppResult};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<gateway::ModelGateway>,
    pub config: config::Config,
}

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::page::index))
        .route("/predict", post(handlers::page::predict))
        .route("/about", get(handlers::page::about_page).post(handlers::page::about))
        .route("/health", get(handlers::health::check))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
