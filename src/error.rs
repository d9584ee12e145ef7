use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use thiserror::Error;

use crate::model::leave_request::LeaveStatus;

#[derive(Debug, Error)]
pub enum LeaveError {
    #[error("leave store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid transition from {from}")]
    InvalidTransition { from: LeaveStatus },

    #[error("already processed: {0}")]
    AlreadyProcessed(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("forbidden: {0}")]
    Forbidden(String),
}

impl From<sqlx::Error> for LeaveError {
    fn from(e: sqlx::Error) -> Self {
        LeaveError::StoreUnavailable(e.to_string())
    }
}

#[derive(Serialize)]
struct ErrorResponse<'a> {
    error: &'a str,
    message: String,
}

impl LeaveError {
    fn kind(&self) -> &'static str {
        match self {
            LeaveError::StoreUnavailable(_) => "StoreUnavailable",
            LeaveError::NotFound(_) => "NotFound",
            LeaveError::InvalidTransition { .. } => "InvalidTransition",
            LeaveError::AlreadyProcessed(_) => "AlreadyProcessed",
            LeaveError::Validation(_) => "Validation",
            LeaveError::Forbidden(_) => "Forbidden",
        }
    }
}

impl ResponseError for LeaveError {
    fn status_code(&self) -> StatusCode {
        match self {
            LeaveError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            LeaveError::NotFound(_) => StatusCode::NOT_FOUND,
            LeaveError::InvalidTransition { .. } => StatusCode::CONFLICT,
            LeaveError::AlreadyProcessed(_) => StatusCode::CONFLICT,
            LeaveError::Validation(_) => StatusCode::BAD_REQUEST,
            LeaveError::Forbidden(_) => StatusCode::FORBIDDEN,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Leave request failed");
        } else {
            tracing::warn!(error = %self, "Leave request rejected");
        }

        // Store failures carry driver details that stay in the log.
        let message = match self {
            LeaveError::StoreUnavailable(_) => {
                "Leave records are temporarily unavailable".to_string()
            }
            other => other.to_string(),
        };

        HttpResponse::build(status).json(ErrorResponse {
            error: self.kind(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_error_kind() {
        assert_eq!(
            LeaveError::StoreUnavailable("down".into()).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(LeaveError::NotFound("x".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            LeaveError::InvalidTransition { from: LeaveStatus::Approved }.status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            LeaveError::Validation("bad".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[actix_web::test]
    async fn store_details_are_not_exposed() {
        let resp = LeaveError::StoreUnavailable("password=hunter2".into()).error_response();
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

        let body = actix_web::body::to_bytes(resp.into_body()).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error"], "StoreUnavailable");
        assert!(!body["message"].as_str().unwrap().contains("hunter2"));
    }
}
