//! Application configuration management.
//!
//! This module handles loading configuration from environment variables.
//! It uses the `envy` crate to automatically deserialize environment
//! variables into a type-safe struct.

use serde::Deserialize;

use crate::resolver::CreationPolicy;
use crate::services::resolution::ResolutionPolicy;

/// Application configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `DATABASE_URL` (required): PostgreSQL connection string
/// - `SERVER_PORT` (optional): HTTP server port, defaults to 3000
/// - `ALLOW_NEW_ACCOUNTS` (optional): whether a payment may create an
///   unknown account on the fly, defaults to false (a typo becomes a
///   correction prompt instead)
/// - `ALLOW_NEW_CATEGORIES` (optional): whether a payment may create an
///   unknown category on the fly, defaults to true
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,

    #[serde(default = "default_port")]
    pub server_port: u16,

    #[serde(default)]
    pub allow_new_accounts: bool,

    #[serde(default = "default_true")]
    pub allow_new_categories: bool,
}

/// Default port if SERVER_PORT environment variable is not set.
fn default_port() -> u16 {
    3000
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Attempts to load a `.env` file first (optional), then deserializes
    /// the environment into a Config struct.
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>()
    }

    /// Creation policy for the payment create path, derived from the
    /// allow-flags.
    pub fn resolution_policy(&self) -> ResolutionPolicy {
        ResolutionPolicy {
            accounts: policy(self.allow_new_accounts),
            categories: policy(self.allow_new_categories),
        }
    }
}

fn policy(allow_creation: bool) -> CreationPolicy {
    if allow_creation {
        CreationPolicy::CreateIfMissing
    } else {
        CreationPolicy::RequireExisting
    }
}
