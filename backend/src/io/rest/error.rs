//! Translation of domain errors into HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use shared::ErrorResponse;
use tracing::error;

use crate::domain::models::{BudgetError, BudgetValidationError, PeriodError, TransactionError, TransactionValidationError};

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Unprocessable(String),
    InternalError(String),
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn unprocessable(msg: impl Into<String>) -> Self {
        Self::Unprocessable(msg.into())
    }

    pub fn internal_error(msg: impl Into<String>) -> Self {
        Self::InternalError(msg.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(self) -> String {
        match self {
            ApiError::BadRequest(msg)
            | ApiError::NotFound(msg)
            | ApiError::Unprocessable(msg)
            | ApiError::InternalError(msg) => msg,
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        if err.is::<TransactionValidationError>()
            || err.is::<BudgetValidationError>()
            || err.is::<PeriodError>()
        {
            return Self::unprocessable(err.to_string());
        }

        if let Some(budget_error) = err.downcast_ref::<BudgetError>() {
            return match budget_error {
                BudgetError::NotFound(_) => Self::not_found(budget_error.to_string()),
                BudgetError::Duplicate { .. } => Self::bad_request(budget_error.to_string()),
            };
        }

        if let Some(transaction_error) = err.downcast_ref::<TransactionError>() {
            return match transaction_error {
                TransactionError::NotFound(_) => Self::not_found(transaction_error.to_string()),
            };
        }

        error!("Unhandled backend error: {:#}", err);
        Self::internal_error("Internal server error")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse { error: self.message() };

        (status, Json(body)).into_response()
    }
}
