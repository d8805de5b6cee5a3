//! In-memory storage double for integration tests.
//!
//! Implements the full storage port with snapshot-based transactions: a
//! unit of work clones the data, stages writes on the clone, and commit
//! swaps it back in. Dropping without commit discards everything, which
//! gives real rollback semantics for the atomicity tests. A failure flag
//! lets tests inject a payment-insert error mid-transaction.

// Each test binary uses its own subset of this module.
#![allow(dead_code)]

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use family_money_bot::models::account::Account;
use family_money_bot::models::category::Category;
use family_money_bot::models::payment::{NewPaymentRow, PaymentRow};
use family_money_bot::models::user::BotUser;
use family_money_bot::storage::{NamedEntityOps, Storage, StorageError, UnitOfWork};

#[derive(Debug, Default, Clone)]
struct Data {
    users: Vec<BotUser>,
    accounts: Vec<Account>,
    categories: Vec<Category>,
    payments: Vec<PaymentRow>,
}

#[derive(Default)]
pub struct MemoryStorage {
    data: Arc<Mutex<Data>>,
    fail_payment_insert: Arc<AtomicBool>,
}

impl MemoryStorage {
    /// Make the next payment insert fail with a backend error, simulating a
    /// storage failure after resolution already staged new rows.
    pub fn fail_payment_inserts(&self) {
        self.fail_payment_insert.store(true, Ordering::SeqCst);
    }
}

pub struct MemoryUnitOfWork {
    shared: Arc<Mutex<Data>>,
    working: Data,
    fail_payment_insert: bool,
}

#[async_trait]
impl NamedEntityOps<Account> for MemoryUnitOfWork {
    async fn find_by_owner_and_name(
        &mut self,
        owner_user_id: Uuid,
        name: &str,
    ) -> Result<Option<Account>, StorageError> {
        Ok(self
            .working
            .accounts
            .iter()
            .find(|a| a.owner_user_id == owner_user_id && a.name == name)
            .cloned())
    }

    async fn insert(&mut self, owner_user_id: Uuid, name: &str) -> Result<Account, StorageError> {
        if self
            .working
            .accounts
            .iter()
            .any(|a| a.owner_user_id == owner_user_id && a.name == name)
        {
            return Err(StorageError::UniqueViolation(format!("account \"{name}\"")));
        }
        let account = Account {
            id: Uuid::new_v4(),
            owner_user_id,
            name: name.to_string(),
            created_at: Utc::now(),
        };
        self.working.accounts.push(account.clone());
        Ok(account)
    }
}

#[async_trait]
impl NamedEntityOps<Category> for MemoryUnitOfWork {
    async fn find_by_owner_and_name(
        &mut self,
        owner_user_id: Uuid,
        name: &str,
    ) -> Result<Option<Category>, StorageError> {
        Ok(self
            .working
            .categories
            .iter()
            .find(|c| c.owner_user_id == owner_user_id && c.name == name)
            .cloned())
    }

    async fn insert(&mut self, owner_user_id: Uuid, name: &str) -> Result<Category, StorageError> {
        if self
            .working
            .categories
            .iter()
            .any(|c| c.owner_user_id == owner_user_id && c.name == name)
        {
            return Err(StorageError::UniqueViolation(format!(
                "category \"{name}\""
            )));
        }
        let category = Category {
            id: Uuid::new_v4(),
            owner_user_id,
            name: name.to_string(),
            created_at: Utc::now(),
        };
        self.working.categories.push(category.clone());
        Ok(category)
    }
}

#[async_trait]
impl UnitOfWork for MemoryUnitOfWork {
    async fn insert_payment(&mut self, payment: NewPaymentRow) -> Result<PaymentRow, StorageError> {
        if self.fail_payment_insert {
            return Err(StorageError::Backend(
                "injected payment insert failure".to_string(),
            ));
        }
        let row = PaymentRow {
            id: Uuid::new_v4(),
            date: payment.date,
            user_id: payment.user_id,
            account_id: payment.account_id,
            category_id: payment.category_id,
            amount_cents: payment.amount_cents,
            description: payment.description,
            created_at: Utc::now(),
        };
        self.working.payments.push(row.clone());
        Ok(row)
    }

    async fn commit(self) -> Result<(), StorageError> {
        *self.shared.lock().unwrap() = self.working;
        Ok(())
    }

    async fn rollback(self) -> Result<(), StorageError> {
        Ok(())
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    type Tx = MemoryUnitOfWork;

    async fn begin(&self) -> Result<Self::Tx, StorageError> {
        let working = self.data.lock().unwrap().clone();
        Ok(MemoryUnitOfWork {
            shared: Arc::clone(&self.data),
            working,
            fail_payment_insert: self.fail_payment_insert.load(Ordering::SeqCst),
        })
    }

    async fn find_user_by_telegram_id(
        &self,
        telegram_id: i64,
    ) -> Result<Option<BotUser>, StorageError> {
        Ok(self
            .data
            .lock()
            .unwrap()
            .users
            .iter()
            .find(|u| u.telegram_id == telegram_id)
            .cloned())
    }

    async fn insert_user(&self, telegram_id: i64, chat_id: i64) -> Result<BotUser, StorageError> {
        let mut data = self.data.lock().unwrap();
        if data.users.iter().any(|u| u.telegram_id == telegram_id) {
            return Err(StorageError::UniqueViolation(format!("user {telegram_id}")));
        }
        let user = BotUser {
            id: Uuid::new_v4(),
            chat_id,
            telegram_id,
            created_at: Utc::now(),
        };
        data.users.push(user.clone());
        Ok(user)
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<BotUser>, StorageError> {
        Ok(self
            .data
            .lock()
            .unwrap()
            .users
            .iter()
            .find(|u| u.id == id)
            .cloned())
    }

    async fn find_account(&self, id: Uuid) -> Result<Option<Account>, StorageError> {
        Ok(self
            .data
            .lock()
            .unwrap()
            .accounts
            .iter()
            .find(|a| a.id == id)
            .cloned())
    }

    async fn find_category(&self, id: Uuid) -> Result<Option<Category>, StorageError> {
        Ok(self
            .data
            .lock()
            .unwrap()
            .categories
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn list_accounts(&self, owner_user_id: Uuid) -> Result<Vec<Account>, StorageError> {
        let mut accounts: Vec<_> = self
            .data
            .lock()
            .unwrap()
            .accounts
            .iter()
            .filter(|a| a.owner_user_id == owner_user_id)
            .cloned()
            .collect();
        accounts.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(accounts)
    }

    async fn list_categories(&self, owner_user_id: Uuid) -> Result<Vec<Category>, StorageError> {
        let mut categories: Vec<_> = self
            .data
            .lock()
            .unwrap()
            .categories
            .iter()
            .filter(|c| c.owner_user_id == owner_user_id)
            .cloned()
            .collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn list_payments_for_accounts(
        &self,
        account_ids: &[Uuid],
    ) -> Result<Vec<PaymentRow>, StorageError> {
        Ok(self
            .data
            .lock()
            .unwrap()
            .payments
            .iter()
            .filter(|p| account_ids.contains(&p.account_id))
            .cloned()
            .collect())
    }
}

/// Seed an account through the public port, as the create path would.
pub async fn seed_account(storage: &MemoryStorage, owner_user_id: Uuid, name: &str) -> Account {
    let mut tx = storage.begin().await.unwrap();
    let account = NamedEntityOps::<Account>::insert(&mut tx, owner_user_id, name)
        .await
        .unwrap();
    tx.commit().await.unwrap();
    account
}

/// Seed a category through the public port.
pub async fn seed_category(storage: &MemoryStorage, owner_user_id: Uuid, name: &str) -> Category {
    let mut tx = storage.begin().await.unwrap();
    let category = NamedEntityOps::<Category>::insert(&mut tx, owner_user_id, name)
        .await
        .unwrap();
    tx.commit().await.unwrap();
    category
}
