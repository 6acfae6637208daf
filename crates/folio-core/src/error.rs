//! # Error Types
//!
//! Domain-specific error types for folio-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  folio-core errors (this file)                                         │
//! │  ├── CoreError        - Domain contract violations                     │
//! │  └── ValidationError  - Business-rule validation failures              │
//! │                                                                         │
//! │  folio-db errors (separate crate)                                      │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  folio-service errors (separate crate)                                 │
//! │  └── ServiceError     - Boundary taxonomy (not-found kinds, etc.)      │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ServiceError → caller             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (id, field, value)
//! 3. Errors are enum variants, never String
//! 4. Contract violations fail loudly, never default silently

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// Not-found conditions live at the service boundary where entities are
/// resolved; what remains here are violations of the domain's own contracts.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A persisted or supplied book category is not part of the closed
    /// enumeration.
    ///
    /// ## When This Occurs
    /// - A row in the store carries a category string this build does not know
    /// - A caller hands the boundary an unrecognized spelling
    ///
    /// This is invalid internal state, not a user mistake: it must surface
    /// loudly and abort the operation, never fall back to a default category.
    #[error("Invalid book category: {0}")]
    InvalidCategory(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Business-rule validation errors.
///
/// These occur when input doesn't meet requirements.
/// Used for early validation before any storage work runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InvalidCategory("BARGAIN_BIN".to_string());
        assert_eq!(err.to_string(), "Invalid book category: BARGAIN_BIN");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "title".to_string(),
        };
        assert_eq!(err.to_string(), "title is required");

        let err = ValidationError::MustBeNonNegative {
            field: "price".to_string(),
        };
        assert_eq!(err.to_string(), "price must not be negative");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "author".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
