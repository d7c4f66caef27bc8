//! # REST API Interface Layer
//!
//! HTTP JSON endpoints of the budget tracker. Handlers map request DTOs to
//! domain commands, call a service and map the result back; they hold no
//! business rules. Domain errors become HTTP statuses through [`ApiError`].

pub mod budget_apis;
pub mod error;
pub mod export_apis;
pub mod mappers;
pub mod statistics_apis;
pub mod transaction_apis;

pub use error::ApiError;

use axum::Router;

use crate::AppState;

/// Routes served under `/api`
pub fn api_router() -> Router<AppState> {
    Router::new()
        .nest("/transactions", transaction_apis::router())
        .nest("/budgets", budget_apis::router())
}

#[cfg(test)]
pub(crate) mod test_utils {
    use axum::{
        body::Body,
        http::{header, Method, Request, Response, StatusCode},
        Router,
    };
    use serde_json::Value;
    use std::sync::Arc;
    use tower::ServiceExt;

    use crate::config::AppConfig;
    use crate::storage::DbConnection;
    use crate::{build_state, create_router};

    /// Full application router over a fresh in-memory database
    pub async fn setup_test_app() -> Router {
        let db = Arc::new(DbConnection::init_test().await.expect("Failed to create test database"));
        create_router(build_state(db), &AppConfig::default()).expect("Failed to build router")
    }

    pub async fn send_raw(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Response<Body> {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        app.clone().oneshot(request).await.unwrap()
    }

    /// Send a request and decode the JSON body (`Null` when empty)
    pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let response = send_raw(app, method, uri, body).await;
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }
}
