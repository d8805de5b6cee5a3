//! Payment HTTP handlers.
//!
//! - POST /api/v1/payments - record a payment
//! - GET /api/v1/users/{telegram_id}/payments - list a user's payments

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    error::AppError,
    handlers::AppState,
    models::payment::{CreatePaymentRequest, PaymentResponse},
};

/// Record a payment.
///
/// # Request Body
///
/// ```json
/// {
///   "telegram_id": 42,
///   "chat_id": 100,
///   "account_name": "Cash",
///   "category_name": "Groceries",
///   "amount_cents": 1050
/// }
/// ```
///
/// # Responses
///
/// - 201 with the payment in display form on success
/// - 422 with a correction prompt when an account/category name was
///   rejected: the validation failure is recovered here, not surfaced as a
///   bare error
/// - 404 / 400 / 500 per the error taxonomy otherwise
pub async fn create_payment(
    State(state): State<AppState>,
    Json(request): Json<CreatePaymentRequest>,
) -> Result<Response, AppError> {
    match state.payments.create(request).await {
        Ok(payment) => Ok((StatusCode::CREATED, Json(payment)).into_response()),
        Err(AppError::Validation(err)) => {
            let prompt = state.recovery.handle(&err).await?;
            Ok((StatusCode::UNPROCESSABLE_ENTITY, Json(prompt)).into_response())
        }
        Err(err) => Err(err),
    }
}

/// List every payment of a platform user.
///
/// Returns an empty array for a registered user with no payments and 404
/// for an unknown telegram id.
pub async fn list_payments(
    State(state): State<AppState>,
    Path(telegram_id): Path<i64>,
) -> Result<Json<Vec<PaymentResponse>>, AppError> {
    let payments = state.payments.list_for_telegram_user(telegram_id).await?;
    Ok(Json(payments))
}
