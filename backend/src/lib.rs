//! # Budget Tracker Backend
//!
//! Personal finance tracker: income/expense transactions, monthly budget caps
//! per category, spending statistics and overspend alerts, served as a JSON
//! API next to a static frontend.
//!
//! ## Architecture
//!
//! ```text
//! IO Layer (axum REST handlers, DTO mappers)
//!     ↓
//! Domain Layer (services, statistics engine)
//!     ↓
//! Storage Layer (storage traits, SQLite via sqlx)
//! ```

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::AppConfig;
use crate::domain::{BudgetService, ExportService, TransactionService};
use crate::storage::DbConnection;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub transaction_service: TransactionService<DbConnection>,
    pub budget_service: BudgetService<DbConnection>,
    pub export_service: ExportService,
}

/// Wire every service to one database connection
pub fn build_state(db: Arc<DbConnection>) -> AppState {
    AppState {
        transaction_service: TransactionService::new(db.clone()),
        budget_service: BudgetService::new(db),
        export_service: ExportService::new(),
    }
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Setting up database at {}", config.database_url);
    let db = DbConnection::new(&config.database_url)
        .await
        .with_context(|| format!("Failed to open database '{}'", config.database_url))?;

    info!("Setting up application state");
    Ok(build_state(Arc::new(db)))
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, config: &AppConfig) -> Result<Router> {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);
    let cors = match &config.cors_allowed_origin {
        Some(origin) => {
            let origin = origin
                .parse::<HeaderValue>()
                .with_context(|| format!("Invalid CORS_ALLOWED_ORIGIN '{}'", origin))?;
            cors.allow_origin(origin)
        }
        None => cors.allow_origin(Any),
    };

    Ok(Router::new()
        .nest("/api", io::rest::api_router())
        .route("/health", get(health))
        .fallback_service(ServeDir::new(&config.static_dir))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state))
}

async fn health() -> &'static str {
    "OK"
}
