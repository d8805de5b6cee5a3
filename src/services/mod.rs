//! Business logic services.
//!
//! Services contain the core logic separated from HTTP handlers: composite
//! entity resolution, the payment use cases, first-contact user
//! registration, and validation-failure recovery.

pub mod payment_service;
pub mod recovery;
pub mod resolution;
pub mod user_service;
