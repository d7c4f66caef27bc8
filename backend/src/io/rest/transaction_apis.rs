//! # REST API for Transactions
//!
//! CRUD endpoints for transactions. Creating an expense also reports whether
//! it pushed its category over the monthly budget.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use tracing::info;

use super::error::ApiError;
use super::export_apis;
use super::mappers::TransactionMapper;
use crate::domain::commands::transactions::UpdateTransactionCommand;
use crate::AppState;
use shared::{CreateTransactionRequest, Transaction, TransactionListRequest};

/// Create a router for transaction related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_transactions).post(create_transaction))
        .route("/export/csv", get(export_apis::export_transactions_csv))
        .route(
            "/:id",
            get(get_transaction).put(update_transaction).delete(delete_transaction),
        )
}

/// Create a new transaction
pub async fn create_transaction(
    State(state): State<AppState>,
    Json(request): Json<CreateTransactionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!("POST /api/transactions - request: {:?}", request);

    let command = TransactionMapper::to_create_command(request);
    let result = state.transaction_service.create_transaction(command).await?;

    Ok((StatusCode::CREATED, Json(TransactionMapper::to_create_response(result))))
}

/// List transactions with optional category and inclusive date filters
pub async fn list_transactions(
    State(state): State<AppState>,
    Query(request): Query<TransactionListRequest>,
) -> Result<Json<Vec<Transaction>>, ApiError> {
    info!("GET /api/transactions - query: {:?}", request);

    let transactions = state
        .transaction_service
        .list_transactions(TransactionMapper::to_list_query(request))
        .await?;

    Ok(Json(transactions.into_iter().map(TransactionMapper::to_dto).collect()))
}

pub async fn get_transaction(
    State(state): State<AppState>,
    Path(transaction_id): Path<i64>,
) -> Result<Json<Transaction>, ApiError> {
    info!("GET /api/transactions/{}", transaction_id);

    let transaction = state.transaction_service.get_transaction(transaction_id).await?;
    Ok(Json(TransactionMapper::to_dto(transaction)))
}

/// Replace a transaction; takes the same body as creation
pub async fn update_transaction(
    State(state): State<AppState>,
    Path(transaction_id): Path<i64>,
    Json(request): Json<CreateTransactionRequest>,
) -> Result<Json<Transaction>, ApiError> {
    info!("PUT /api/transactions/{} - request: {:?}", transaction_id, request);

    let command = UpdateTransactionCommand {
        transaction_id,
        replacement: TransactionMapper::to_create_command(request),
    };
    let transaction = state.transaction_service.update_transaction(command).await?;

    Ok(Json(TransactionMapper::to_dto(transaction)))
}

pub async fn delete_transaction(
    State(state): State<AppState>,
    Path(transaction_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    info!("DELETE /api/transactions/{}", transaction_id);

    state.transaction_service.delete_transaction(transaction_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
