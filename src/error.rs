//! Error types for the coordinator and startup loading

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::path::PathBuf;

/// Result type for coordinator operations
pub type CoordinatorResult<T> = Result<T, CoordinatorError>;

/// Recoverable errors surfaced to the requesting session only
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoordinatorError {
    #[error("Only admins can {0}")]
    Forbidden(&'static str),

    #[error("{0}")]
    Conflict(String),

    #[error("No eligible teams left to spin")]
    EmptyRoster,

    #[error("Team not found: {0}")]
    NotFound(String),

    #[error("Team already exists: {0}")]
    DuplicateName(String),

    #[error("Team name must not be empty")]
    InvalidName,
}

impl CoordinatorError {
    /// Stable machine-readable code sent to clients
    pub fn code(&self) -> &'static str {
        match self {
            CoordinatorError::Forbidden(_) => "FORBIDDEN",
            CoordinatorError::Conflict(_) => "CONFLICT",
            CoordinatorError::EmptyRoster => "EMPTY_ROSTER",
            CoordinatorError::NotFound(_) => "NOT_FOUND",
            CoordinatorError::DuplicateName(_) => "DUPLICATE_NAME",
            CoordinatorError::InvalidName => "INVALID_NAME",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            CoordinatorError::Forbidden(_) => StatusCode::FORBIDDEN,
            CoordinatorError::Conflict(_) => StatusCode::CONFLICT,
            CoordinatorError::EmptyRoster => StatusCode::UNPROCESSABLE_ENTITY,
            CoordinatorError::NotFound(_) => StatusCode::NOT_FOUND,
            CoordinatorError::DuplicateName(_) => StatusCode::CONFLICT,
            CoordinatorError::InvalidName => StatusCode::BAD_REQUEST,
        }
    }
}

/// JSON body for HTTP error responses
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub msg: String,
}

impl IntoResponse for CoordinatorError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            code: self.code().to_string(),
            msg: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

/// Errors while loading the initial roster file
#[derive(Debug, thiserror::Error)]
pub enum RosterFileError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
