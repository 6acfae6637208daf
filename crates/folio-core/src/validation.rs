//! # Validation Module
//!
//! Business-rule validation for catalog and customer input.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Caller (HTTP/CLI boundary, not this repo)                    │
//! │  ├── Field presence and shape                                          │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Service (Rust)                                               │
//! │  └── THIS MODULE: business rule validation                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  ├── CHECK constraints (price ≥ 0, category spelling)                  │
//! │  └── Foreign key constraints                                           │
//! │                                                                         │
//! │  Defense in depth: multiple layers catch different errors              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a book title.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most 255 characters
///
/// ## Example
/// ```rust
/// use folio_core::validation::validate_title;
///
/// assert!(validate_title("The Left Hand of Darkness").is_ok());
/// assert!(validate_title("").is_err());
/// ```
pub fn validate_title(title: &str) -> ValidationResult<()> {
    validate_text_field("title", title, 255)
}

/// Validates an author name. Same rules as titles.
pub fn validate_author(author: &str) -> ValidationResult<()> {
    validate_text_field("author", author, 255)
}

/// Validates a customer name. Same rules as titles.
pub fn validate_customer_name(name: &str) -> ValidationResult<()> {
    validate_text_field("name", name, 255)
}

fn validate_text_field(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.len() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (promotional giveaways)
///
/// ## Example
/// ```rust
/// use folio_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents(1099).is_ok());  // $10.99
/// assert!(validate_price_cents(0).is_ok());     // Free book
/// assert!(validate_price_cents(-100).is_err()); // Invalid
/// ```
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates a loyalty-point balance.
///
/// ## Rules
/// - Must be non-negative (>= 0)
///
/// Balances only ever grow by accrual or reset to zero by redemption, but
/// the customer-update operation accepts a balance directly, so it gets the
/// same check.
pub fn validate_loyalty_points(points: i64) -> ValidationResult<()> {
    if points < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "loyalty points".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_title() {
        assert!(validate_title("Dune").is_ok());
        assert!(validate_title("").is_err());
        assert!(validate_title("   ").is_err());
        assert!(validate_title(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_author() {
        assert!(validate_author("Ursula K. Le Guin").is_ok());
        assert!(validate_author("").is_err());
    }

    #[test]
    fn test_validate_customer_name() {
        assert!(validate_customer_name("Ada").is_ok());
        assert!(validate_customer_name(" ").is_err());
    }

    #[test]
    fn test_validate_price_cents() {
        assert!(validate_price_cents(0).is_ok());
        assert!(validate_price_cents(1099).is_ok());
        assert!(validate_price_cents(-100).is_err());
    }

    #[test]
    fn test_validate_loyalty_points() {
        assert!(validate_loyalty_points(0).is_ok());
        assert!(validate_loyalty_points(12).is_ok());
        assert!(validate_loyalty_points(-1).is_err());
    }
}
