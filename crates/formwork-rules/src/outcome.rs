#![forbid(unsafe_code)]

//! Validation result type.

use formwork_core::ErrorMap;

/// The result of one validation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    /// Failing fields, each with its newline-joined rule messages.
    pub errors: ErrorMap,
    /// All field messages joined newline-separated, in required-field
    /// declaration order.
    pub message: String,
    /// Whether the error map is empty.
    pub valid: bool,
}
