//! Interactive correction prompt.
//!
//! The recovery handler answers a failed name resolution with this abstract
//! prompt instead of a bare error. The chat front end is responsible for
//! turning it into whatever selectable-button representation the platform
//! requires; the core never builds platform UI objects.

use serde::Serialize;

/// A correction prompt offering the user their valid alternatives.
///
/// # JSON Example
///
/// ```json
/// {
///   "chat_id": 100,
///   "message": "unknown account \"Savngs\"",
///   "options": ["Card", "Cash"]
/// }
/// ```
///
/// `options` may be empty when the user has no stored names yet; the prompt
/// is still returned and the front end renders the empty case.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrectionPrompt {
    /// Chat to send the prompt to, taken from the original request
    pub chat_id: i64,

    /// Human-readable description of what failed to resolve
    pub message: String,

    /// Valid names the user can pick instead, one option per name
    pub options: Vec<String>,
}
