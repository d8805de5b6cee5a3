//! Composite resolution of a payment's parties.
//!
//! A create-payment request references its user, account and category
//! loosely (platform id, typed names). Before anything is persisted the
//! whole triple must be resolved as one coordinated step:
//!
//! 1. The user, by telegram id. Strictly a lookup: the create path never
//!    registers users (first contact does, see `user_service`).
//! 2. The resolved user's id is stamped onto the account and category
//!    references as their owner key.
//! 3. Account and category resolve independently of each other inside the
//!    caller's unit of work; their order does not affect the outcome.
//!
//! The second mode, [`hydrate`], reconstructs the triple by id for stored
//! payments on the read path. No creation ever happens there, and the three
//! lookups run concurrently.

use tokio::try_join;

use crate::error::{AppError, RefKind, ValidationError};
use crate::models::account::Account;
use crate::models::category::Category;
use crate::models::payment::{CreatePaymentRequest, PaymentRow};
use crate::models::user::BotUser;
use crate::resolver::{self, CreationPolicy, ResolveError};
use crate::storage::Storage;

/// The fully-dereferenced parties of a payment.
///
/// A named struct rather than a positional tuple: the three results are
/// produced by independent sub-resolutions and positional indexing would be
/// an easy way to cross wires.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedParties {
    pub user: BotUser,
    pub account: Account,
    pub category: Category,
}

/// Per-kind creation policy for the payment create path.
#[derive(Debug, Clone, Copy)]
pub struct ResolutionPolicy {
    pub accounts: CreationPolicy,
    pub categories: CreationPolicy,
}

impl Default for ResolutionPolicy {
    /// Mirrors the bot's intended flow: accounts are set up beforehand and
    /// a typo should trigger a correction prompt, while categories are
    /// free-form and created on demand.
    fn default() -> Self {
        Self {
            accounts: CreationPolicy::RequireExisting,
            categories: CreationPolicy::CreateIfMissing,
        }
    }
}

/// Resolve the full user/account/category triple for a create request.
///
/// Runs inside the caller's unit of work so any row created here commits or
/// rolls back together with the payment insert. Fails with
/// [`AppError::UserNotFound`] for an unregistered sender and with
/// [`AppError::Validation`] (carrying the original request) when a name
/// reference is rejected; in both cases nothing the caller later persists
/// can survive.
pub async fn prepare<S: Storage>(
    storage: &S,
    tx: &mut S::Tx,
    request: &CreatePaymentRequest,
    policy: &ResolutionPolicy,
) -> Result<ResolvedParties, AppError> {
    // User first: its id is the owner key both other lookups are scoped by.
    let user = storage
        .find_user_by_telegram_id(request.telegram_id)
        .await?
        .ok_or(AppError::UserNotFound(request.telegram_id))?;

    let account = resolver::resolve::<Account, _>(
        tx,
        user.id,
        &request.account_name,
        policy.accounts,
    )
    .await
    .map_err(|err| reference_error(err, RefKind::Account, &request.account_name, request))?;
    if account.was_created() {
        tracing::info!(
            owner = %user.id,
            name = %request.account_name,
            "created account during payment resolution"
        );
    }

    let category = resolver::resolve::<Category, _>(
        tx,
        user.id,
        &request.category_name,
        policy.categories,
    )
    .await
    .map_err(|err| reference_error(err, RefKind::Category, &request.category_name, request))?;
    if category.was_created() {
        tracing::info!(
            owner = %user.id,
            name = %request.category_name,
            "created category during payment resolution"
        );
    }

    Ok(ResolvedParties {
        user,
        account: account.into_inner(),
        category: category.into_inner(),
    })
}

/// Reconstruct the triple for a stored payment by id.
///
/// Read path only. A missing row here means a broken reference, surfaced as
/// [`AppError::MissingRecord`].
pub async fn hydrate<S: Storage>(
    storage: &S,
    payment: &PaymentRow,
) -> Result<ResolvedParties, AppError> {
    let (user, account, category) = try_join!(
        storage.find_user(payment.user_id),
        storage.find_account(payment.account_id),
        storage.find_category(payment.category_id),
    )?;

    Ok(ResolvedParties {
        user: user.ok_or(AppError::MissingRecord {
            kind: "user",
            id: payment.user_id,
        })?,
        account: account.ok_or(AppError::MissingRecord {
            kind: "account",
            id: payment.account_id,
        })?,
        category: category.ok_or(AppError::MissingRecord {
            kind: "category",
            id: payment.category_id,
        })?,
    })
}

fn reference_error(
    err: ResolveError,
    kind: RefKind,
    name: &str,
    request: &CreatePaymentRequest,
) -> AppError {
    match err {
        ResolveError::UnknownName => AppError::Validation(ValidationError {
            kind,
            name: name.to_string(),
            request: request.clone(),
        }),
        ResolveError::Storage(err) => AppError::Storage(err),
    }
}
