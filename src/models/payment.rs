//! Payment models and API request/response types.
//!
//! This module defines:
//! - `PaymentRow`: database entity, foreign keys only
//! - `NewPaymentRow`: insert payload built after resolution completed
//! - `CreatePaymentRequest`: structured request from the command front end,
//!   referencing account and category by human-typed name
//! - `PaymentResponse`: display form returned to the front end, with the
//!   name references fully dereferenced

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::services::resolution::ResolvedParties;

/// Represents a payment record from the database.
///
/// # Invariant
///
/// A payment row only ever holds resolved ids. Name references from the wire
/// model must be resolved (or rejected) before this type exists; the insert
/// happens in the same transaction as any account/category rows created
/// during resolution.
///
/// # Amount Storage
///
/// Amounts are stored as `i64` cents to avoid floating-point precision
/// issues: $10.50 is stored as 1050 cents.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow, Serialize)]
pub struct PaymentRow {
    /// Unique identifier for this payment
    pub id: Uuid,

    /// Day the expense happened (defaults to the creation day)
    pub date: NaiveDate,

    /// User who recorded the payment
    pub user_id: Uuid,

    /// Account the money was paid from
    pub account_id: Uuid,

    /// Category the expense belongs to
    pub category_id: Uuid,

    /// Amount in cents (always positive)
    pub amount_cents: i64,

    /// Free-text note, optional
    pub description: Option<String>,

    /// Timestamp when the row was written
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a payment, produced by the create path once the
/// user/account/category triple is resolved.
#[derive(Debug, Clone)]
pub struct NewPaymentRow {
    /// Payment day, already defaulted by the service
    pub date: NaiveDate,

    /// Resolved owner id
    pub user_id: Uuid,

    /// Resolved account id
    pub account_id: Uuid,

    /// Resolved category id
    pub category_id: Uuid,

    /// Amount in cents
    pub amount_cents: i64,

    /// Free-text note
    pub description: Option<String>,
}

/// Structured create-payment request delivered by the command front end.
///
/// Account and category are referenced by name, exactly as the user typed
/// them. The request is carried inside a validation failure so the recovery
/// handler can rebuild chat context from it.
///
/// # JSON Example
///
/// ```json
/// {
///   "telegram_id": 42,
///   "chat_id": 100,
///   "account_name": "Cash",
///   "category_name": "Groceries",
///   "amount_cents": 1050,
///   "description": "weekly shop"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatePaymentRequest {
    /// Platform user id of the sender
    pub telegram_id: i64,

    /// Chat the request came from; echoed back in correction prompts
    pub chat_id: i64,

    /// Account name as typed
    pub account_name: String,

    /// Category name as typed
    pub category_name: String,

    /// Amount in cents, must be positive
    pub amount_cents: i64,

    /// Optional free-text note
    #[serde(default)]
    pub description: Option<String>,

    /// Optional payment day; defaults to today when absent
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// Display form of a payment returned to the front end.
///
/// Name references are dereferenced: the response carries the stored account
/// and category names, never raw ids the chat user could not act on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentResponse {
    /// Payment unique identifier
    pub id: Uuid,

    /// Payment day
    pub date: NaiveDate,

    /// Platform user id of the owner
    pub telegram_id: i64,

    /// Resolved account name
    pub account: String,

    /// Resolved category name
    pub category: String,

    /// Amount in cents
    pub amount_cents: i64,

    /// Free-text note
    pub description: Option<String>,
}

impl PaymentResponse {
    /// Assemble the display form from a stored row and its resolved parties.
    pub fn assemble(row: PaymentRow, parties: ResolvedParties) -> Self {
        Self {
            id: row.id,
            date: row.date,
            telegram_id: parties.user.telegram_id,
            account: parties.account.name,
            category: parties.category.name,
            amount_cents: row.amount_cents,
            description: row.description,
        }
    }
}
