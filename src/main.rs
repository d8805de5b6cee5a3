//! family-money-bot - Main Application Entry Point
//!
//! HTTP front end over the expense-tracking core: structured
//! create-payment, list-payments and first-contact requests in, payments in
//! display form or typed failures out. Failed name resolutions come back as
//! correction prompts for the chat transport to render.
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Create database connection pool
//! 3. Run database migrations
//! 4. Build HTTP router
//! 5. Start server on configured port

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use family_money_bot::{
    config::Config,
    db,
    handlers::{self, AppState},
    services::{
        payment_service::PaymentService, recovery::ValidationRecovery, user_service::UserService,
    },
    storage::postgres::PgStorage,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging with tracing subscriber. Reads RUST_LOG environment
    // variable (defaults to "info" level)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded");

    // Create database pool
    let pool = db::create_pool(&config.database_url).await?;
    tracing::info!("Database pool created");

    // Run migrations
    db::run_migrations(&pool).await?;
    tracing::info!("Database migrations complete");

    let storage = Arc::new(PgStorage::new(pool.clone()));
    let state = AppState {
        pool,
        payments: PaymentService::new(Arc::clone(&storage), config.resolution_policy()),
        users: UserService::new(Arc::clone(&storage)),
        recovery: ValidationRecovery::new(storage),
    };

    let app = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route(
            "/api/v1/users/contact",
            post(handlers::users::register_contact),
        )
        .route(
            "/api/v1/payments",
            post(handlers::payments::create_payment),
        )
        .route(
            "/api/v1/users/{telegram_id}/payments",
            get(handlers::payments::list_payments),
        )
        // Request tracing for observability
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Bind to network address and start server
    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
