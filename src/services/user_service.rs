//! First-contact user registration.
//!
//! Users are created lazily the first time they talk to the bot and are
//! immutable afterwards. This is the only path that registers users; the
//! payment paths treat an unknown telegram id as a terminal failure.

use std::sync::Arc;

use crate::error::AppError;
use crate::models::user::BotUser;
use crate::resolver::Resolved;
use crate::storage::{Storage, StorageError};

/// Resolves platform users by telegram id.
pub struct UserService<S> {
    storage: Arc<S>,
}

impl<S> Clone for UserService<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
        }
    }
}

impl<S: Storage> UserService<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    /// Resolve a user on contact, registering on first sight.
    ///
    /// Idempotent per telegram id. Two first contacts racing on the same id
    /// both succeed: the loser's insert reports a unique violation and the
    /// winner's row is read back.
    pub async fn resolve_contact(
        &self,
        telegram_id: i64,
        chat_id: i64,
    ) -> Result<Resolved<BotUser>, AppError> {
        if let Some(existing) = self.storage.find_user_by_telegram_id(telegram_id).await? {
            return Ok(Resolved::Found(existing));
        }

        match self.storage.insert_user(telegram_id, chat_id).await {
            Ok(user) => {
                tracing::info!(%telegram_id, "registered user on first contact");
                Ok(Resolved::Created(user))
            }
            Err(StorageError::UniqueViolation(_)) => {
                let existing = self
                    .storage
                    .find_user_by_telegram_id(telegram_id)
                    .await?
                    .ok_or_else(|| {
                        StorageError::Backend(format!(
                            "user {telegram_id} vanished after duplicate conflict"
                        ))
                    })?;
                Ok(Resolved::Found(existing))
            }
            Err(err) => Err(err.into()),
        }
    }
}
