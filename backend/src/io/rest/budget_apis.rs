//! # REST API for Budgets
//!
//! CRUD endpoints for monthly category budgets. Statistics endpoints live in
//! [`super::statistics_apis`] and are merged into the same `/budgets` router.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use tracing::info;

use super::error::ApiError;
use super::mappers::BudgetMapper;
use super::statistics_apis;
use crate::AppState;
use shared::{Budget, BudgetListRequest, CreateBudgetRequest, UpdateBudgetRequest};

/// Create a router for budget related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_budgets).post(create_budget))
        .route("/:id", get(get_budget).put(update_budget).delete(delete_budget))
        .merge(statistics_apis::router())
}

pub async fn create_budget(
    State(state): State<AppState>,
    Json(request): Json<CreateBudgetRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!("POST /api/budgets - request: {:?}", request);

    let budget = state
        .budget_service
        .create_budget(BudgetMapper::to_create_command(request))
        .await?;

    Ok((StatusCode::CREATED, Json(BudgetMapper::to_dto(budget))))
}

/// List budgets, most recent period first
pub async fn list_budgets(
    State(state): State<AppState>,
    Query(request): Query<BudgetListRequest>,
) -> Result<Json<Vec<Budget>>, ApiError> {
    info!("GET /api/budgets - query: {:?}", request);

    let budgets = state
        .budget_service
        .list_budgets(BudgetMapper::to_list_query(request))
        .await?;

    Ok(Json(budgets.into_iter().map(BudgetMapper::to_dto).collect()))
}

pub async fn get_budget(
    State(state): State<AppState>,
    Path(budget_id): Path<i64>,
) -> Result<Json<Budget>, ApiError> {
    info!("GET /api/budgets/{}", budget_id);

    let budget = state.budget_service.get_budget(budget_id).await?;
    Ok(Json(BudgetMapper::to_dto(budget)))
}

/// Partial update of a budget
pub async fn update_budget(
    State(state): State<AppState>,
    Path(budget_id): Path<i64>,
    Json(request): Json<UpdateBudgetRequest>,
) -> Result<Json<Budget>, ApiError> {
    info!("PUT /api/budgets/{} - request: {:?}", budget_id, request);

    let budget = state
        .budget_service
        .update_budget(BudgetMapper::to_update_command(budget_id, request))
        .await?;

    Ok(Json(BudgetMapper::to_dto(budget)))
}

pub async fn delete_budget(
    State(state): State<AppState>,
    Path(budget_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    info!("DELETE /api/budgets/{}", budget_id);

    state.budget_service.delete_budget(budget_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
