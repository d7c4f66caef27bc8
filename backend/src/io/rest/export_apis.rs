//! # REST API for Data Export
//!
//! Download of the full transaction history as a CSV file.

use axum::{
    extract::State,
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
};
use tracing::info;

use super::error::ApiError;
use crate::AppState;

pub const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

/// Export every transaction as CSV, oldest first
pub async fn export_transactions_csv(State(state): State<AppState>) -> Result<Response, ApiError> {
    info!("GET /api/transactions/export/csv");

    let export = state
        .export_service
        .export_transactions_csv(&state.transaction_service)
        .await?;

    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{}\"", export.filename))
        .map_err(|e| ApiError::internal_error(format!("Invalid export filename: {}", e)))?;

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(CSV_CONTENT_TYPE)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        export.csv_content,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::super::test_utils::{send, send_raw, setup_test_app};
    use axum::http::{header, Method, StatusCode};
    use serde_json::json;

    #[tokio::test]
    async fn test_export_csv_headers_and_rows() {
        let app = setup_test_app().await;
        for (amount, label, day) in [(50.0, "Restaurant", "2026-01-12"), (25.5, "Courses", "2026-01-06")] {
            send(
                &app,
                Method::POST,
                "/api/transactions",
                Some(json!({ "amount": amount, "label": label, "kind": "expense", "category": "alimentation", "date": day })),
            )
            .await;
        }

        let response = send_raw(&app, Method::GET, "/api/transactions/export/csv", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/csv; charset=utf-8");
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"transactions.csv\""
        );

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "id,date,label,kind,category,amount",
                "2,2026-01-06,Courses,expense,alimentation,25.50",
                "1,2026-01-12,Restaurant,expense,alimentation,50.00",
            ]
        );
    }
}
