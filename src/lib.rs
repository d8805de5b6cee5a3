//! family-money-bot - business core of a shared-expense chat bot.
//!
//! Users identify themselves by their chat-platform id and record payments
//! against an account ("cash", "joint card") and a category ("groceries"),
//! both referenced by human-typed name. The core of the crate is the
//! entity-resolution pipeline that turns those loose references into
//! canonical stored rows, creating them where policy permits, and recovers
//! failed resolutions into interactive correction prompts.
//!
//! # Layers
//!
//! - [`resolver`]: generic name-to-entity resolution with explicit
//!   Found/Created outcomes
//! - [`services`]: composite resolution, payment use cases, first-contact
//!   registration, validation recovery
//! - [`storage`]: port traits the domain depends on, plus the Postgres
//!   adapter
//! - [`handlers`]: the thin HTTP front end delivering structured requests

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod resolver;
pub mod services;
pub mod storage;
