//! Response error mapping.
//!
//! # Responsibilities
//! - Map domain errors to HTTP status codes
//! - Serialize every error as a `{ "detail": … }` body
//!
//! # Design Decisions
//! - Caller mistakes (bad chain, bad hash, bad key) are 400
//! - Unknown tokens/prices at the oracle are 404
//! - Upstream RPC/oracle failures are 502, never a generic unlabeled 500

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::chain::ChainError;
use crate::oracle::OracleError;
use crate::status::StatusError;

/// Errors surfaced by API handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request itself is wrong: 400.
    #[error("{0}")]
    BadRequest(String),

    /// The requested resource does not exist upstream: 404.
    #[error("{0}")]
    NotFound(String),

    /// An upstream dependency misbehaved: 502.
    #[error("{0}")]
    Upstream(String),

    /// Anything unexpected: 500.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = %status, detail = %self, "Request failed");
        } else {
            tracing::warn!(status = %status, detail = %self, "Request rejected");
        }

        (status, Json(serde_json::json!({ "detail": self.to_string() }))).into_response()
    }
}

impl From<ChainError> for ApiError {
    fn from(err: ChainError) -> Self {
        match err {
            ChainError::Unsupported(_)
            | ChainError::InvalidAddress(_)
            | ChainError::InvalidTxHash(_)
            | ChainError::InvalidKey(_)
            | ChainError::InvalidAmount(_)
            | ChainError::SelfTransfer(_)
            | ChainError::InsufficientFunds { .. }
            | ChainError::Connection { .. } => ApiError::BadRequest(err.to_string()),
            ChainError::Rpc(_) | ChainError::Timeout(_) => ApiError::Upstream(err.to_string()),
        }
    }
}

impl From<StatusError> for ApiError {
    fn from(err: StatusError) -> Self {
        match err {
            StatusError::InvalidSignature(_) => ApiError::BadRequest(err.to_string()),
        }
    }
}

impl From<OracleError> for ApiError {
    fn from(err: OracleError) -> Self {
        match err {
            OracleError::UnknownToken(_) => ApiError::BadRequest(err.to_string()),
            OracleError::PriceUnavailable(_) | OracleError::NotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
            OracleError::Http(_) | OracleError::Api(_) => ApiError::Upstream(err.to_string()),
        }
    }
}
