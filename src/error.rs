//! Error types and HTTP error response handling.
//!
//! This module defines the application error taxonomy and how each failure
//! is converted into an HTTP response for the command front end.
//!
//! # Error Categories
//!
//! - **NotFound**: a required entity does not exist; terminal for the
//!   request, never recovered by creation
//! - **Validation**: a name reference could not be resolved under the
//!   current creation policy; recovered into a correction prompt by the
//!   handler layer, never shown to the end user as a bare error
//! - **Storage**: the persistence layer failed; surfaced as-is, not retried
//!
//! Failures propagate untouched: nothing below the handler layer logs and
//! swallows an error.

use std::fmt;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use uuid::Uuid;

use crate::models::payment::CreatePaymentRequest;
use crate::storage::StorageError;

/// Which kind of name reference failed to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefKind {
    Account,
    Category,
}

impl fmt::Display for RefKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefKind::Account => f.write_str("account"),
            RefKind::Category => f.write_str("category"),
        }
    }
}

/// A name reference that could not be resolved under the current rules.
///
/// Carries the original request so the recovery handler can rebuild chat
/// context (chat id, telegram user id) without any extra state.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown {kind} \"{name}\"")]
pub struct ValidationError {
    /// Entity kind the reference pointed at
    pub kind: RefKind,

    /// The name as the user typed it
    pub name: String,

    /// The request that triggered the failure
    pub request: CreatePaymentRequest,
}

/// Application-wide error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The platform user is unknown. Raised on read paths and on payment
    /// creation: the create path never registers users implicitly.
    ///
    /// Returns HTTP 404 Not Found.
    #[error("user with telegram id {0} is not registered")]
    UserNotFound(i64),

    /// An id lookup during hydration came back empty. Only possible on the
    /// read path where ids are already known.
    ///
    /// Returns HTTP 404 Not Found.
    #[error("{kind} {id} not found")]
    MissingRecord {
        /// Entity kind name ("user", "account", "category")
        kind: &'static str,
        /// The id that was looked up
        id: Uuid,
    },

    /// A name reference failed to resolve. The payment-create handler
    /// converts this into a [`crate::models::prompt::CorrectionPrompt`]
    /// before it can reach the end user.
    ///
    /// Returns HTTP 422 Unprocessable Entity if it escapes unrecovered.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Request body or parameters are invalid (e.g. non-positive amount).
    ///
    /// Returns HTTP 400 Bad Request.
    #[error("Invalid request")]
    InvalidRequest(String),

    /// The storage layer failed (connectivity, transaction abort, any
    /// constraint violation other than the duplicate-name race the resolver
    /// recovers from).
    ///
    /// Returns HTTP 500 Internal Server Error, hiding details from clients.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Convert AppError into an HTTP response.
///
/// All errors return JSON in this format:
/// ```json
/// {
///   "error": {
///     "code": "error_type",
///     "message": "Human-readable error message"
///   }
/// }
/// ```
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Map each error variant to (HTTP status, error code, message)
        let (status, code, message) = match self {
            AppError::UserNotFound(_) => {
                (StatusCode::NOT_FOUND, "user_not_found", self.to_string())
            }
            AppError::MissingRecord { .. } => {
                (StatusCode::NOT_FOUND, "not_found", self.to_string())
            }
            AppError::Validation(ref err) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_failed",
                err.to_string(),
            ),
            AppError::InvalidRequest(ref msg) => {
                (StatusCode::BAD_REQUEST, "invalid_request", msg.clone())
            }
            AppError::Storage(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "An internal error occurred".to_string(),
            ),
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
