//! HTTP error mapping.
//!
//! Every failure leaves the server as `{"error": <message>, "code": <CODE>}`.
//! Messages of 5xx responses are generic; the cause is logged instead.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use storefront_cdn::CdnError;
use storefront_core::error::CoreError;

use crate::auth::mailer::MailError;

const INTERNAL_MESSAGE: &str = "An internal error occurred";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("CDN error: {0}")]
    Cdn(#[from] CdnError),

    #[error("Mail error: {0}")]
    Mail(#[from] MailError),

    /// Malformed request that never reached domain validation.
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    code: &'static str,
}

struct Problem {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl Problem {
    fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", INTERNAL_MESSAGE)
    }

    fn upstream(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR", message)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let problem = match self {
            AppError::Core(err) => core_problem(err),
            AppError::Database(err) => database_problem(err),
            AppError::Cdn(err) => {
                tracing::error!(error = %err, "Image upload failed");
                match err {
                    CdnError::MissingPublicId => Problem::upstream(err.to_string()),
                    _ => Problem::upstream("Image upload failed"),
                }
            }
            AppError::Mail(err) => {
                tracing::error!(error = %err, "Sign-in email failed");
                Problem::upstream("Could not send sign-in email")
            }
            AppError::BadRequest(message) => {
                Problem::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", message)
            }
            AppError::Internal(message) => {
                tracing::error!(error = %message, "Request failed");
                Problem::internal()
            }
        };

        let body = ErrorBody {
            error: problem.message,
            code: problem.code,
        };
        (problem.status, Json(body)).into_response()
    }
}

fn core_problem(err: CoreError) -> Problem {
    match err {
        CoreError::NotFound { entity, id } => Problem::new(
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        // A malformed id names nothing, which the client sees as a miss.
        CoreError::InvalidId { entity, .. } => Problem::new(
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("Invalid {} id", entity.to_lowercase()),
        ),
        CoreError::Validation(message) => {
            Problem::new(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", message)
        }
        CoreError::Conflict(message) => Problem::new(StatusCode::CONFLICT, "CONFLICT", message),
        CoreError::Unauthorized(message) => {
            Problem::new(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", message)
        }
        CoreError::Forbidden(message) => Problem::new(StatusCode::FORBIDDEN, "FORBIDDEN", message),
        CoreError::Internal(message) => {
            tracing::error!(error = %message, "Domain invariant broken");
            Problem::internal()
        }
    }
}

/// Postgres SQLSTATE classes surfaced to clients: `23505` on a `uq_`
/// constraint and `23503` become 409, `23502`/`23514` become 400.
fn database_problem(err: sqlx::Error) -> Problem {
    let sqlx::Error::Database(db_err) = &err else {
        if matches!(err, sqlx::Error::RowNotFound) {
            return Problem::new(StatusCode::NOT_FOUND, "NOT_FOUND", "Resource not found");
        }
        tracing::error!(error = %err, "Database call failed");
        return Problem::internal();
    };

    let constraint = db_err.constraint().unwrap_or("unknown");
    match db_err.code().as_deref() {
        Some("23505") if constraint.starts_with("uq_") => Problem::new(
            StatusCode::CONFLICT,
            "CONFLICT",
            format!("Duplicate value violates unique constraint: {constraint}"),
        ),
        Some("23503") => Problem::new(
            StatusCode::CONFLICT,
            "CONFLICT",
            format!("Referenced row does not exist or is still in use: {constraint}"),
        ),
        Some("23502" | "23514") => Problem::new(
            StatusCode::BAD_REQUEST,
            "VALIDATION_ERROR",
            format!("Value violates constraint: {constraint}"),
        ),
        _ => {
            tracing::error!(error = %db_err, "Database rejected statement");
            Problem::internal()
        }
    }
}
