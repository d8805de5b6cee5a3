//! Postgres implementation of the storage ports.
//!
//! A thin adapter over sqlx: [`PgStorage`] wraps the connection pool for
//! reads, [`PgUnitOfWork`] wraps a `sqlx::Transaction` for the atomic create
//! path. All SQL is runtime-checked (`sqlx::query_as`, not `sqlx::query!`)
//! to avoid a compile-time database requirement.

use async_trait::async_trait;
use sqlx::Postgres;
use uuid::Uuid;

use crate::db::DbPool;
use crate::models::account::Account;
use crate::models::category::Category;
use crate::models::payment::{NewPaymentRow, PaymentRow};
use crate::models::user::BotUser;
use crate::storage::{NamedEntityOps, Storage, StorageError, UnitOfWork};

/// Postgres-backed storage adapter.
#[derive(Clone)]
pub struct PgStorage {
    pool: DbPool,
}

impl PgStorage {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Transaction scope over a pooled Postgres connection.
///
/// Dropping without commit rolls back (sqlx transaction semantics), so an
/// early `?` return on the create path cannot leave partial rows behind.
pub struct PgUnitOfWork {
    tx: sqlx::Transaction<'static, Postgres>,
}

#[async_trait]
impl NamedEntityOps<Account> for PgUnitOfWork {
    async fn find_by_owner_and_name(
        &mut self,
        owner_user_id: Uuid,
        name: &str,
    ) -> Result<Option<Account>, StorageError> {
        let account = sqlx::query_as::<_, Account>(
            "SELECT * FROM accounts WHERE owner_user_id = $1 AND name = $2",
        )
        .bind(owner_user_id)
        .bind(name)
        .fetch_optional(&mut *self.tx)
        .await?;

        Ok(account)
    }

    async fn insert(&mut self, owner_user_id: Uuid, name: &str) -> Result<Account, StorageError> {
        // ON CONFLICT DO NOTHING keeps the transaction usable when this
        // insert loses the (owner, name) race to a concurrent request.
        sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO accounts (owner_user_id, name)
            VALUES ($1, $2)
            ON CONFLICT (owner_user_id, name) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(owner_user_id)
        .bind(name)
        .fetch_optional(&mut *self.tx)
        .await?
        .ok_or_else(|| StorageError::UniqueViolation(format!("account \"{name}\"")))
    }
}

#[async_trait]
impl NamedEntityOps<Category> for PgUnitOfWork {
    async fn find_by_owner_and_name(
        &mut self,
        owner_user_id: Uuid,
        name: &str,
    ) -> Result<Option<Category>, StorageError> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT * FROM categories WHERE owner_user_id = $1 AND name = $2",
        )
        .bind(owner_user_id)
        .bind(name)
        .fetch_optional(&mut *self.tx)
        .await?;

        Ok(category)
    }

    async fn insert(&mut self, owner_user_id: Uuid, name: &str) -> Result<Category, StorageError> {
        sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (owner_user_id, name)
            VALUES ($1, $2)
            ON CONFLICT (owner_user_id, name) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(owner_user_id)
        .bind(name)
        .fetch_optional(&mut *self.tx)
        .await?
        .ok_or_else(|| StorageError::UniqueViolation(format!("category \"{name}\"")))
    }
}

#[async_trait]
impl UnitOfWork for PgUnitOfWork {
    async fn insert_payment(&mut self, payment: NewPaymentRow) -> Result<PaymentRow, StorageError> {
        let row = sqlx::query_as::<_, PaymentRow>(
            r#"
            INSERT INTO payments (date, user_id, account_id, category_id, amount_cents, description)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(payment.date)
        .bind(payment.user_id)
        .bind(payment.account_id)
        .bind(payment.category_id)
        .bind(payment.amount_cents)
        .bind(payment.description)
        .fetch_one(&mut *self.tx)
        .await?;

        Ok(row)
    }

    async fn commit(self) -> Result<(), StorageError> {
        self.tx.commit().await?;
        Ok(())
    }

    async fn rollback(self) -> Result<(), StorageError> {
        self.tx.rollback().await?;
        Ok(())
    }
}

#[async_trait]
impl Storage for PgStorage {
    type Tx = PgUnitOfWork;

    async fn begin(&self) -> Result<Self::Tx, StorageError> {
        let tx = self.pool.begin().await?;
        Ok(PgUnitOfWork { tx })
    }

    async fn find_user_by_telegram_id(
        &self,
        telegram_id: i64,
    ) -> Result<Option<BotUser>, StorageError> {
        let user = sqlx::query_as::<_, BotUser>("SELECT * FROM users WHERE telegram_id = $1")
            .bind(telegram_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn insert_user(&self, telegram_id: i64, chat_id: i64) -> Result<BotUser, StorageError> {
        sqlx::query_as::<_, BotUser>(
            r#"
            INSERT INTO users (telegram_id, chat_id)
            VALUES ($1, $2)
            ON CONFLICT (telegram_id) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(telegram_id)
        .bind(chat_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| StorageError::UniqueViolation(format!("user {telegram_id}")))
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<BotUser>, StorageError> {
        let user = sqlx::query_as::<_, BotUser>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn find_account(&self, id: Uuid) -> Result<Option<Account>, StorageError> {
        let account = sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(account)
    }

    async fn find_category(&self, id: Uuid) -> Result<Option<Category>, StorageError> {
        let category = sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(category)
    }

    async fn list_accounts(&self, owner_user_id: Uuid) -> Result<Vec<Account>, StorageError> {
        let accounts = sqlx::query_as::<_, Account>(
            "SELECT * FROM accounts WHERE owner_user_id = $1 ORDER BY name",
        )
        .bind(owner_user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(accounts)
    }

    async fn list_categories(&self, owner_user_id: Uuid) -> Result<Vec<Category>, StorageError> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT * FROM categories WHERE owner_user_id = $1 ORDER BY name",
        )
        .bind(owner_user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    async fn list_payments_for_accounts(
        &self,
        account_ids: &[Uuid],
    ) -> Result<Vec<PaymentRow>, StorageError> {
        let payments =
            sqlx::query_as::<_, PaymentRow>("SELECT * FROM payments WHERE account_id = ANY($1)")
                .bind(account_ids)
                .fetch_all(&self.pool)
                .await?;

        Ok(payments)
    }
}
