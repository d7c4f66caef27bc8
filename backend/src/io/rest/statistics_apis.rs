//! # REST API for Budget Statistics
//!
//! Read-only endpoints over the budget statistics engine.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, post},
    Router,
};
use tracing::info;

use super::error::ApiError;
use super::mappers::BudgetMapper;
use crate::AppState;
use shared::{BudgetStatistics, OverspendCheck, OverspendCheckRequest, StatisticsPeriodRequest};

/// Routes merged into the `/budgets` router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/stats", get(get_period_statistics))
        .route("/stats/:category", get(get_category_statistics))
        .route("/check", post(check_overspend))
}

fn require_period(request: &StatisticsPeriodRequest) -> Result<(u32, i32), ApiError> {
    match (request.month, request.year) {
        (Some(month), Some(year)) => Ok((month, year)),
        _ => Err(ApiError::bad_request("Both month and year query parameters are required")),
    }
}

/// Statistics for one category in one month
pub async fn get_category_statistics(
    State(state): State<AppState>,
    Path(category): Path<String>,
    Query(request): Query<StatisticsPeriodRequest>,
) -> Result<Json<BudgetStatistics>, ApiError> {
    info!("GET /api/budgets/stats/{} - query: {:?}", category, request);

    let (month, year) = require_period(&request)?;
    let statistics = state
        .budget_service
        .statistics_for_category(&category, month, year)
        .await?;

    Ok(Json(BudgetMapper::statistics_to_dto(statistics)))
}

/// Statistics for every budget defined in one month
pub async fn get_period_statistics(
    State(state): State<AppState>,
    Query(request): Query<StatisticsPeriodRequest>,
) -> Result<Json<Vec<BudgetStatistics>>, ApiError> {
    info!("GET /api/budgets/stats - query: {:?}", request);

    let (month, year) = require_period(&request)?;
    let statistics = state.budget_service.statistics_for_period(month, year).await?;

    Ok(Json(statistics.into_iter().map(BudgetMapper::statistics_to_dto).collect()))
}

/// Dry-run overspend check for an expense that has not been recorded yet
pub async fn check_overspend(
    State(state): State<AppState>,
    Json(request): Json<OverspendCheckRequest>,
) -> Result<Json<OverspendCheck>, ApiError> {
    info!("POST /api/budgets/check - request: {:?}", request);

    let check = state
        .budget_service
        .check_overspend(&request.category, request.month, request.year, request.amount)
        .await?;

    Ok(Json(BudgetMapper::overspend_to_dto(check)))
}

#[cfg(test)]
mod tests {
    use super::super::test_utils::{send, setup_test_app};
    use axum::http::{Method, StatusCode};
    use serde_json::{json, Value};

    async fn seed_scenario(app: &axum::Router) {
        send(
            app,
            Method::POST,
            "/api/budgets",
            Some(json!({ "category": "alimentation", "cap_amount": 300.0, "month": 1, "year": 2026 })),
        )
        .await;
        for (amount, date) in [(25.5, "2026-01-06"), (50.0, "2026-01-12"), (99.0, "2026-02-01")] {
            send(
                app,
                Method::POST,
                "/api/transactions",
                Some(json!({ "amount": amount, "label": "Courses", "kind": "expense", "category": "alimentation", "date": date })),
            )
            .await;
        }
    }

    #[tokio::test]
    async fn test_category_statistics() {
        let app = setup_test_app().await;
        seed_scenario(&app).await;

        let (status, body) = send(&app, Method::GET, "/api/budgets/stats/alimentation?month=1&year=2026", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["category"], json!("alimentation"));
        assert_eq!(body["period"], json!("01/2026"));
        assert_eq!(body["total_spent"], json!(75.5));
        assert_eq!(body["cap_amount"], json!(300.0));
        assert_eq!(body["remaining"], json!(224.5));
        assert!((body["percent_consumed"].as_f64().unwrap() - 25.17).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_category_statistics_without_budget_is_zero() {
        let app = setup_test_app().await;

        let (status, body) = send(&app, Method::GET, "/api/budgets/stats/loisirs?month=1&year=2026", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_spent"], json!(0.0));
        assert_eq!(body["percent_consumed"], json!(0.0));
        assert_eq!(body["period"], json!("01/2026"));
    }

    #[tokio::test]
    async fn test_statistics_require_month_and_year() {
        let app = setup_test_app().await;

        let (status, body) = send(&app, Method::GET, "/api/budgets/stats?month=1", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());

        let (status, _) = send(&app, Method::GET, "/api/budgets/stats/alimentation?year=2026", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&app, Method::GET, "/api/budgets/stats/alimentation?month=13&year=2026", None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_period_statistics_lists_budgets() {
        let app = setup_test_app().await;
        seed_scenario(&app).await;
        send(
            &app,
            Method::POST,
            "/api/budgets",
            Some(json!({ "category": "transport", "cap_amount": 60, "month": 1, "year": 2026 })),
        )
        .await;

        let (status, body) = send(&app, Method::GET, "/api/budgets/stats?month=1&year=2026", None).await;
        assert_eq!(status, StatusCode::OK);
        let categories: Vec<&str> = body.as_array().unwrap().iter().map(|s| s["category"].as_str().unwrap()).collect();
        assert_eq!(categories, vec!["alimentation", "transport"]);
        assert_eq!(body[1]["total_spent"], json!(0.0));
    }

    #[tokio::test]
    async fn test_check_overspend_endpoint() {
        let app = setup_test_app().await;
        seed_scenario(&app).await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/budgets/check",
            Some(json!({ "category": "alimentation", "month": 1, "year": 2026, "amount": 250.0 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["exceeded"], json!(true));
        assert_eq!(body["total_after"], json!(325.5));
        assert_eq!(body["remaining_before"], json!(224.5));

        let (_, body) = send(
            &app,
            Method::POST,
            "/api/budgets/check",
            Some(json!({ "category": "loisirs", "month": 1, "year": 2026, "amount": 100.0 })),
        )
        .await;
        assert_eq!(body["exceeded"], json!(false));
        assert_eq!(body["cap_amount"], Value::Null);
        assert_eq!(body["alert_message"], Value::Null);
    }

    #[tokio::test]
    async fn test_years_outside_budget_range_are_rejected() {
        let app = setup_test_app().await;

        for year in [1999, 2101] {
            let (status, body) = send(
                &app,
                Method::GET,
                &format!("/api/budgets/stats/alimentation?month=1&year={}", year),
                None,
            )
            .await;
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
            assert!(body["error"].as_str().unwrap().contains("between 2000 and 2100"));

            let (status, _) = send(&app, Method::GET, &format!("/api/budgets/stats?month=1&year={}", year), None).await;
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

            let (status, _) = send(
                &app,
                Method::POST,
                "/api/budgets/check",
                Some(json!({ "category": "alimentation", "month": 1, "year": year, "amount": 10.0 })),
            )
            .await;
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        }
    }

    #[tokio::test]
    async fn test_huge_amounts_are_rejected_before_statistics() {
        let app = setup_test_app().await;
        send(
            &app,
            Method::POST,
            "/api/budgets",
            Some(json!({ "category": "alimentation", "cap_amount": 300.0, "month": 1, "year": 2026 })),
        )
        .await;

        for _ in 0..2 {
            let (status, body) = send(
                &app,
                Method::POST,
                "/api/transactions",
                Some(json!({ "amount": 5e28, "label": "Courses", "kind": "expense", "category": "alimentation", "date": "2026-01-06" })),
            )
            .await;
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
            assert!(body["error"].as_str().unwrap().contains("must not exceed"));
        }

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/budgets/check",
            Some(json!({ "category": "alimentation", "month": 1, "year": 2026, "amount": 5e28 })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, body) = send(&app, Method::GET, "/api/budgets/stats/alimentation?month=1&year=2026", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_spent"], json!(0.0));
    }
}
