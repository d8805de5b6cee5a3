//! Payment category model.
//!
//! Same shape and lifecycle as [`crate::models::account::Account`]: names are
//! owner-scoped, matched exactly as typed, and created lazily when a payment
//! references a name the user does not have yet (policy permitting).

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Represents a category record from the database.
///
/// Maps to the `categories` table with a UNIQUE `(owner_user_id, name)`
/// constraint.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow, Serialize)]
pub struct Category {
    /// Unique identifier for this category
    pub id: Uuid,

    /// Owning user
    pub owner_user_id: Uuid,

    /// Human-typed category name ("groceries", "rent", ...)
    pub name: String,

    /// Timestamp when the category was created
    pub created_at: DateTime<Utc>,
}
