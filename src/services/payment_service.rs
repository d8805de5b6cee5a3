//! Payment service - read and write use cases for payments.
//!
//! The write path runs composite resolution and the payment insert inside
//! one unit of work: an account or category created during resolution
//! commits together with the payment row or not at all. The read path never
//! creates anything.

use std::sync::Arc;

use chrono::Utc;

use crate::error::AppError;
use crate::models::payment::{CreatePaymentRequest, NewPaymentRow, PaymentResponse};
use crate::services::resolution::{self, ResolutionPolicy};
use crate::storage::{Storage, UnitOfWork};

/// Orchestrates payment reads and writes over a storage backend.
pub struct PaymentService<S> {
    storage: Arc<S>,
    policy: ResolutionPolicy,
}

impl<S> Clone for PaymentService<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            policy: self.policy,
        }
    }
}

impl<S: Storage> PaymentService<S> {
    pub fn new(storage: Arc<S>, policy: ResolutionPolicy) -> Self {
        Self { storage, policy }
    }

    /// Create a payment from a structured front-end request.
    ///
    /// # Process
    ///
    /// 1. Validate the amount
    /// 2. Open a unit of work
    /// 3. Resolve the user/account/category triple inside it
    /// 4. Default the date to today when absent
    /// 5. Insert the payment row and commit
    ///
    /// At most one write attempt is made; storage failures surface as-is.
    ///
    /// # Errors
    ///
    /// - `InvalidRequest`: amount is zero or negative
    /// - `UserNotFound`: the sender is not registered
    /// - `Validation`: an account/category name was rejected by the
    ///   creation policy; carries the original request for recovery
    /// - `Storage`: the storage layer failed
    pub async fn create(&self, request: CreatePaymentRequest) -> Result<PaymentResponse, AppError> {
        if request.amount_cents <= 0 {
            return Err(AppError::InvalidRequest(
                "Amount must be positive".to_string(),
            ));
        }

        let mut tx = self.storage.begin().await?;

        let parties =
            match resolution::prepare(&*self.storage, &mut tx, &request, &self.policy).await {
                Ok(parties) => parties,
                Err(err) => {
                    abandon(tx, &err).await;
                    return Err(err);
                }
            };

        let row = NewPaymentRow {
            date: request.date.unwrap_or_else(|| Utc::now().date_naive()),
            user_id: parties.user.id,
            account_id: parties.account.id,
            category_id: parties.category.id,
            amount_cents: request.amount_cents,
            description: request.description,
        };

        let stored = match tx.insert_payment(row).await {
            Ok(stored) => stored,
            Err(err) => {
                let err = AppError::Storage(err);
                abandon(tx, &err).await;
                return Err(err);
            }
        };

        tx.commit().await?;

        tracing::info!(payment = %stored.id, user = %parties.user.id, "payment recorded");

        Ok(PaymentResponse::assemble(stored, parties))
    }

    /// List every payment recorded by a platform user, in display form.
    ///
    /// Payments are fetched through the user's accounts and each row is
    /// hydrated with its resolved triple. Ordering beyond per-call
    /// determinism is unspecified.
    ///
    /// # Errors
    ///
    /// - `UserNotFound`: the telegram id is unknown; an unknown user is
    ///   never silently an empty list
    /// - `Storage`: the storage layer failed
    pub async fn list_for_telegram_user(
        &self,
        telegram_id: i64,
    ) -> Result<Vec<PaymentResponse>, AppError> {
        let user = self
            .storage
            .find_user_by_telegram_id(telegram_id)
            .await?
            .ok_or(AppError::UserNotFound(telegram_id))?;

        let accounts = self.storage.list_accounts(user.id).await?;
        let account_ids: Vec<_> = accounts.iter().map(|account| account.id).collect();
        let rows = self
            .storage
            .list_payments_for_accounts(&account_ids)
            .await?;

        let mut payments = Vec::with_capacity(rows.len());
        for row in rows {
            let parties = resolution::hydrate(&*self.storage, &row).await?;
            payments.push(PaymentResponse::assemble(row, parties));
        }

        Ok(payments)
    }
}

/// Roll back a failed unit of work without masking the original failure.
async fn abandon<T: UnitOfWork>(tx: T, cause: &AppError) {
    if let Err(rollback_err) = tx.rollback().await {
        tracing::warn!(%cause, error = %rollback_err, "rollback failed after aborted payment create");
    }
}
