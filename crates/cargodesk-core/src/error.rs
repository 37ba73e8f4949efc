//! # Error Types
//!
//! Domain-specific error types for cargodesk-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  cargodesk-core errors (this file)                                     │
//! │  ├── CoreError        - Envelope/shape and domain failures             │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  cargodesk-client errors (separate crate)                              │
//! │  └── ApiError         - Normalized, user-facing request failures       │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → slice `error` state    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field, entity, id)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
///
/// These errors represent malformed payloads or domain rule violations.
/// They should be caught and translated to user-friendly messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The server response did not match any expected envelope shape.
    ///
    /// ## When This Occurs
    /// - A list endpoint returned neither `{data: {data: [...]}}` nor
    ///   `{data: [...]}` nor a bare array
    /// - A mutation endpoint returned an envelope without `data`
    #[error("Unexpected response shape: {0}")]
    UnexpectedShape(String),

    /// A payload element could not be decoded into the entity type.
    #[error("Failed to decode {entity}: {reason}")]
    Decode { entity: &'static str, reason: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when a draft doesn't meet requirements.
/// Used for early validation before any request is dispatched.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., invalid email, invalid container number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::Decode {
            entity: "Order",
            reason: "missing field `orderNumber`".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to decode Order: missing field `orderNumber`"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "must be a valid email address".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "email has invalid format: must be a valid email address"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
