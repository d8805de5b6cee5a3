//! Validation-failure recovery.
//!
//! When composite resolution rejects an account or category name, the user
//! should get a pick-list of their valid alternatives, not a bare error.
//! This handler turns a [`ValidationError`] into a [`CorrectionPrompt`]:
//! recovery is terminal for the request, the original payment is never
//! retried automatically.

use std::sync::Arc;

use crate::error::{AppError, RefKind, ValidationError};
use crate::models::prompt::CorrectionPrompt;
use crate::storage::Storage;

/// Builds correction prompts from rejected name references.
pub struct ValidationRecovery<S> {
    storage: Arc<S>,
}

impl<S> Clone for ValidationRecovery<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
        }
    }
}

impl<S: Storage> ValidationRecovery<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    /// Build the correction prompt for a failed resolution.
    ///
    /// Chat identity comes from the request embedded in the error; the
    /// option list is every valid name of the failing kind the user owns.
    /// A user with zero stored names still gets the prompt, with empty
    /// options, and the front end renders that case.
    pub async fn handle(&self, error: &ValidationError) -> Result<CorrectionPrompt, AppError> {
        let request = &error.request;

        let options = match self
            .storage
            .find_user_by_telegram_id(request.telegram_id)
            .await?
        {
            Some(user) => match error.kind {
                RefKind::Account => self
                    .storage
                    .list_accounts(user.id)
                    .await?
                    .into_iter()
                    .map(|account| account.name)
                    .collect(),
                RefKind::Category => self
                    .storage
                    .list_categories(user.id)
                    .await?
                    .into_iter()
                    .map(|category| category.name)
                    .collect(),
            },
            // Validation fired after user resolution, so this only happens
            // if the user vanished meanwhile; the prompt still goes out.
            None => Vec::new(),
        };

        Ok(CorrectionPrompt {
            chat_id: request.chat_id,
            message: error.to_string(),
            options,
        })
    }
}
