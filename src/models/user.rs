//! Bot user model.
//!
//! A user is identified implicitly by the chat platform: the front end sends
//! the telegram user id with every request, and that id is the identity key
//! for all lookups. Users are created lazily on first contact and are
//! immutable afterwards.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Represents a bot user record from the database.
///
/// # Database Table
///
/// Maps to the `users` table. The `telegram_id` column carries a UNIQUE
/// constraint: it is the only key the chat platform can supply, so all
/// user resolution goes through it.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow, Serialize)]
pub struct BotUser {
    /// Internal unique identifier, used as the owner key for accounts,
    /// categories and payments
    pub id: Uuid,

    /// Chat the user talks to the bot from
    pub chat_id: i64,

    /// Platform user id delivered by the transport front end
    pub telegram_id: i64,

    /// Timestamp of first contact
    pub created_at: DateTime<Utc>,
}

/// Response body for user endpoints.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    /// Internal user identifier
    pub id: Uuid,

    /// Platform user id
    pub telegram_id: i64,

    /// Chat id recorded at first contact
    pub chat_id: i64,

    /// True when this request registered the user for the first time
    pub newly_registered: bool,
}
