// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application-level error type for HTTP handlers.
//
// Wraps `SpooldError` for domain errors and adds HTTP-specific variants.
// Implements `IntoResponse` to produce the `{"error": ...}` JSON bodies the
// frontend consumes.  Failure causes are deliberately flattened to
// human-readable strings; callers cannot branch on them programmatically.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use spoold_core::error::SpooldError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from the dispatch adapter.
    #[error(transparent)]
    Dispatch(#[from] SpooldError),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Dispatch(err) => match err {
                SpooldError::UnsupportedDocument(name) => (
                    StatusCode::BAD_REQUEST,
                    format!("only PDF, Word, and image files are supported (got {name})"),
                ),
                SpooldError::InvalidOptions(detail) => (
                    StatusCode::BAD_REQUEST,
                    format!("invalid print options: {detail}"),
                ),
                other => {
                    tracing::error!(error = %other, "dispatch error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "an internal error occurred".to_string(),
                    )
                }
            },

            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, message.clone()),
            AppError::NotFound(message) => (StatusCode::NOT_FOUND, message.clone()),
            AppError::Internal(message) => {
                tracing::error!(error = %message, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, message.clone())
            }
        };

        let body = json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}
