//! Account model.
//!
//! An account is a place money is paid from ("cash", "joint card"). Account
//! names are scoped per owning user, never global: two users can each have
//! an account named "Cash" and the rows stay distinct.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Represents an account record from the database.
///
/// # Database Table
///
/// Maps to the `accounts` table. Identity key for lookups is
/// `(owner_user_id, name)`, enforced by a UNIQUE constraint that also acts
/// as the last line of defense when two requests race to create the same
/// name (see the resolver's duplicate-name handling).
#[derive(Debug, Clone, PartialEq, sqlx::FromRow, Serialize)]
pub struct Account {
    /// Unique identifier for this account
    pub id: Uuid,

    /// Owning user; every lookup and insert is scoped by this key
    pub owner_user_id: Uuid,

    /// Human-typed account name, matched exactly as typed
    pub name: String,

    /// Timestamp when the account was created
    pub created_at: DateTime<Utc>,
}
