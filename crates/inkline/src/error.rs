//! Error types for the editing crate.

use thiserror::Error;

/// Errors that can occur while constructing an input field.
///
/// Normal editing never errors: out-of-range indices clamp, boundary deletes
/// are silent no-ops, unrecognized keys are ignored. The variants here are
/// precondition violations by the embedding host, reported once at
/// construction rather than per call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldError {
    /// The measurement collaborator reported a display budget that is
    /// negative or not finite.
    #[error("display width budget must be finite and non-negative, got {budget}")]
    InvalidDisplayBudget { budget: f32 },

    /// A blink scheduler was configured with a zero interval.
    #[error("blink interval must be non-zero")]
    ZeroBlinkInterval,
}

/// Result type for field construction.
pub type FieldResult<T> = Result<T, FieldError>;
