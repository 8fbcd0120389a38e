//! # Error Handling Middleware
//!
//! Maps [`CourtbookError`] values to HTTP status codes and the failure
//! envelope `{ "success": false, "message": ..., "error": ... }`.
//!
//! `message` is a fixed phrase per error category so clients can show it
//! directly; `error` carries the detailed text.

use axum::{
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use courtbook_core::errors::CourtbookError;
use serde_json::json;
use tracing::error;

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use axum::Json;
/// use courtbook_api::middleware::error_handling::AppError;
/// use courtbook_core::errors::CourtbookError;
///
/// async fn handler(found: bool) -> Result<Json<&'static str>, AppError> {
///     if !found {
///         return Err(CourtbookError::NotFound("Court not found".into()).into());
///     }
///     Ok(Json("ok"))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub CourtbookError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            CourtbookError::NotFound(_) => StatusCode::NOT_FOUND,
            CourtbookError::Validation(_) => StatusCode::BAD_REQUEST,
            CourtbookError::Authentication(_) => StatusCode::UNAUTHORIZED,
            CourtbookError::Authorization(_) => StatusCode::FORBIDDEN,
            CourtbookError::Conflict(_) => StatusCode::CONFLICT,
            CourtbookError::Database(_) | CourtbookError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn message(&self) -> &'static str {
        match &self.0 {
            CourtbookError::NotFound(_) => "Resource not found",
            CourtbookError::Validation(_) => "Invalid request",
            CourtbookError::Authentication(_) => "Authentication required",
            CourtbookError::Authorization(_) => "Access denied",
            CourtbookError::Conflict(_) => "Request conflicts with existing data",
            CourtbookError::Database(_) => "Database error",
            CourtbookError::Internal(_) => "Internal server error",
        }
    }

    /// Detailed error text. Client-facing variants carry only their own
    /// message, server failures carry the full error chain.
    fn detail(&self) -> String {
        match &self.0 {
            CourtbookError::NotFound(detail)
            | CourtbookError::Validation(detail)
            | CourtbookError::Authentication(detail)
            | CourtbookError::Authorization(detail)
            | CourtbookError::Conflict(detail) => detail.clone(),
            CourtbookError::Database(report) => format!("{report:#}"),
            CourtbookError::Internal(err) => err.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = self.detail();

        if status.is_server_error() {
            error!(error = %detail, "Request failed");
        }

        let body = Json(json!({
            "success": false,
            "message": self.message(),
            "error": detail,
        }));

        (status, body).into_response()
    }
}

/// Automatic conversion from CourtbookError to AppError
impl From<CourtbookError> for AppError {
    fn from(err: CourtbookError) -> Self {
        AppError(err)
    }
}

/// Repository failures surface as `CourtbookError::Database`.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(CourtbookError::Database(err))
    }
}

/// Maps a CourtbookError to an HTTP response
pub fn map_error(err: CourtbookError) -> Response {
    AppError(err).into_response()
}

/// Fallback for requests that match no route.
pub async fn not_found(uri: Uri) -> AppError {
    AppError(CourtbookError::NotFound(format!("Route {} not found", uri.path())))
}
