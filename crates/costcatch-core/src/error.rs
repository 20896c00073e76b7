//! # Error Types
//!
//! Domain-specific error types for costcatch-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  costcatch-core errors (this file)                                     │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Input validation failures (returned as         │
//! │                         values inside a ValidationReport, never        │
//! │                         raised across the API boundary)                │
//! │                                                                         │
//! │  costcatch-count errors (separate crate)                               │
//! │  ├── SessionError     - Quick-Count state machine misuse               │
//! │  ├── StoreError       - Hosted data service failures                   │
//! │  └── SubmitError      - Count submission failures                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field name, offending value)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent domain-level failures such as wire values that
/// do not map to a closed enum. They should be caught and translated to
/// user-friendly messages at the boundary.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A wire string does not name a known waste reason.
    ///
    /// ## When This Occurs
    /// - A request body carries a reason outside the closed set
    /// - An older client sends a reason that has since been removed
    #[error("Unknown waste reason: {0}")]
    UnknownWasteReason(String),

    /// A wire string does not name a known subscription status.
    #[error("Unknown subscription status: {0}")]
    UnknownSubscriptionStatus(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// One variant per rule the API boundary enforces. The message texts are
/// the exact sentences the dashboard shows next to form fields, so they
/// are part of the product surface - change them deliberately.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing, null, or the empty string.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is not a JSON string.
    #[error("{field} must be a string")]
    NotAString { field: String },

    /// String value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// String value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Field value is not a JSON number.
    #[error("{field} must be a valid number")]
    NotANumber { field: String },

    /// Numeric value is below the allowed minimum.
    #[error("{field} must be at least {min}")]
    BelowMinimum { field: String, min: f64 },

    /// Numeric value is above the allowed maximum.
    #[error("{field} must be at most {max}")]
    AboveMaximum { field: String, max: f64 },

    /// Identifier is not a canonical 36-character UUID.
    #[error("{field} must be a valid UUID")]
    InvalidUuid { field: String },

    /// Not a plausible email address.
    #[error("{field} must be a valid email address")]
    InvalidEmail { field: String },

    /// Not an ISO-parseable date.
    #[error("{field} must be a valid date")]
    InvalidDate { field: String },

    /// Field value is not a JSON array.
    #[error("{field} must be an array")]
    NotAnArray { field: String },

    /// Array has fewer elements than required.
    #[error("{field} must have at least {min} items")]
    TooFewItems { field: String, min: usize },

    /// Field value is not a JSON object.
    #[error("{field} must be an object")]
    NotAnObject { field: String },
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
        let err = CoreError::UnknownWasteReason("shrinkage".to_string());
        assert_eq!(err.to_string(), "Unknown waste reason: shrinkage");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::TooShort {
            field: "name".to_string(),
            min: 1,
        };
        assert_eq!(err.to_string(), "name must be at least 1 characters");

        let err = ValidationError::BelowMinimum {
            field: "quantity".to_string(),
            min: 0.0,
        };
        assert_eq!(err.to_string(), "quantity must be at least 0");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::InvalidUuid {
            field: "item_id".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
