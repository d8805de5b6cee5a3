//! User HTTP handlers.
//!
//! - POST /api/v1/users/contact - resolve a user on first contact

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;

use crate::{error::AppError, handlers::AppState, models::user::UserResponse};

/// Request body for first-contact resolution.
#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    /// Platform user id of the sender
    pub telegram_id: i64,

    /// Chat the contact came from
    pub chat_id: i64,
}

/// Resolve the sender, registering on first contact.
///
/// Idempotent: repeated contacts return the same user with
/// `newly_registered: false`.
pub async fn register_contact(
    State(state): State<AppState>,
    Json(request): Json<ContactRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let resolved = state
        .users
        .resolve_contact(request.telegram_id, request.chat_id)
        .await?;

    let newly_registered = resolved.was_created();
    let user = resolved.into_inner();
    let status = if newly_registered {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((
        status,
        Json(UserResponse {
            id: user.id,
            telegram_id: user.telegram_id,
            chat_id: user.chat_id,
            newly_registered,
        }),
    ))
}
