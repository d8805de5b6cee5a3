//! HTTP request handlers (route handlers).
//!
//! The thin command front end of the core: each handler receives a
//! structured request, calls a service, and returns JSON or a typed
//! failure. No chat-platform specifics live here; correction prompts are
//! returned as abstract `{message, options, chat_id}` payloads for the
//! transport to render.

use crate::db::DbPool;
use crate::services::payment_service::PaymentService;
use crate::services::recovery::ValidationRecovery;
use crate::services::user_service::UserService;
use crate::storage::postgres::PgStorage;

/// Health check endpoint
pub mod health;
/// Payment create and list endpoints
pub mod payments;
/// First-contact user registration endpoint
pub mod users;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// Pool kept for the health check's connectivity probe
    pub pool: DbPool,
    pub payments: PaymentService<PgStorage>,
    pub users: UserService<PgStorage>,
    pub recovery: ValidationRecovery<PgStorage>,
}
