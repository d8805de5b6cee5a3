//! Storage port traits.
//!
//! The domain layer depends only on these traits; the Postgres adapter in
//! [`postgres`] implements them with sqlx, and the integration tests run
//! against an in-memory implementation. SQL never leaks above this boundary.
//!
//! # Unit of work
//!
//! Payment creation must be atomic across every row it touches: any account
//! or category inserted during resolution commits together with the payment
//! row or not at all. [`Storage::begin`] hands out a [`UnitOfWork`] that all
//! three inserts go through; dropping it without [`UnitOfWork::commit`]
//! abandons the writes.

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::account::Account;
use crate::models::category::Category;
use crate::models::payment::{NewPaymentRow, PaymentRow};
use crate::models::user::BotUser;

/// Postgres adapter
pub mod postgres;

/// Errors surfaced by a storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Lost an insert race on an owner-scoped unique key. The row exists
    /// now; callers re-read instead of failing (see `resolver::resolve`).
    #[error("duplicate {0} for owner")]
    UniqueViolation(String),

    /// Any sqlx failure: connectivity, query error, transaction abort.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Non-sqlx backend failure (used by alternative adapters).
    #[error("storage backend failure: {0}")]
    Backend(String),
}

/// The narrow capability set the generic resolver needs, per entity kind.
///
/// Implemented by a [`UnitOfWork`] for `Account` and `Category`, so every
/// lookup and insert the resolver performs lands inside the surrounding
/// transaction.
#[async_trait]
pub trait NamedEntityOps<T>: Send {
    /// Exact-match lookup by `(owner_user_id, name)`, as typed.
    async fn find_by_owner_and_name(
        &mut self,
        owner_user_id: Uuid,
        name: &str,
    ) -> Result<Option<T>, StorageError>;

    /// Insert a new row for this owner and name.
    ///
    /// Fails with [`StorageError::UniqueViolation`] when a concurrent
    /// request created the same `(owner, name)` first; the transaction must
    /// stay usable after that failure.
    async fn insert(&mut self, owner_user_id: Uuid, name: &str) -> Result<T, StorageError>;
}

/// Transaction scope for payment creation.
#[async_trait]
pub trait UnitOfWork: NamedEntityOps<Account> + NamedEntityOps<Category> + Send {
    /// Insert the payment row. Only called with fully resolved ids.
    async fn insert_payment(&mut self, payment: NewPaymentRow) -> Result<PaymentRow, StorageError>;

    /// Commit everything staged in this unit of work.
    async fn commit(self) -> Result<(), StorageError>;

    /// Discard everything staged in this unit of work.
    async fn rollback(self) -> Result<(), StorageError>;
}

/// Storage operations for the expense-tracking core.
///
/// Read operations run outside any transaction; writes that must be atomic
/// go through [`Storage::begin`].
#[async_trait]
pub trait Storage: Send + Sync {
    /// Unit-of-work type handed out by [`Storage::begin`]
    type Tx: UnitOfWork;

    /// Open a transaction scope for a payment-create operation.
    async fn begin(&self) -> Result<Self::Tx, StorageError>;

    /// Look up a user by platform id.
    async fn find_user_by_telegram_id(
        &self,
        telegram_id: i64,
    ) -> Result<Option<BotUser>, StorageError>;

    /// Register a user on first contact.
    ///
    /// Fails with [`StorageError::UniqueViolation`] when a concurrent first
    /// contact won the race on `telegram_id`.
    async fn insert_user(&self, telegram_id: i64, chat_id: i64) -> Result<BotUser, StorageError>;

    /// Direct id lookup, read path only.
    async fn find_user(&self, id: Uuid) -> Result<Option<BotUser>, StorageError>;

    /// Direct id lookup, read path only.
    async fn find_account(&self, id: Uuid) -> Result<Option<Account>, StorageError>;

    /// Direct id lookup, read path only.
    async fn find_category(&self, id: Uuid) -> Result<Option<Category>, StorageError>;

    /// All accounts for an owner, ordered by name.
    async fn list_accounts(&self, owner_user_id: Uuid) -> Result<Vec<Account>, StorageError>;

    /// All categories for an owner, ordered by name.
    async fn list_categories(&self, owner_user_id: Uuid) -> Result<Vec<Category>, StorageError>;

    /// All payments charged to any of the given accounts.
    async fn list_payments_for_accounts(
        &self,
        account_ids: &[Uuid],
    ) -> Result<Vec<PaymentRow>, StorageError>;
}
