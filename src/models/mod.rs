//! Data models for the expense-tracking core.
//!
//! Each submodule pairs a storage row type with the wire/display types
//! exchanged with the command front end.

/// Owner-scoped account model
pub mod account;
/// Owner-scoped payment category model
pub mod category;
/// Payment row plus create-request and display types
pub mod payment;
/// Interactive correction prompt handed to the chat front end
pub mod prompt;
/// Bot user model (keyed by telegram id)
pub mod user;
