//! # Service Error Type
//!
//! Boundary error taxonomy for Folio services.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Error Flow in Folio                                 │
//! │                                                                         │
//! │  Caller                      Service Layer                              │
//! │  ──────                      ─────────────                              │
//! │                                                                         │
//! │  create_purchase(...)                                                  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Resolution miss? ──── CustomerNotFound / BookNotFound /         │  │
//! │  │                        PurchaseNotFound (expected, mappable      │  │
//! │  │                        to a not-found response upstream)         │  │
//! │  │         │                                                        │  │
//! │  │  Corrupt category? ─── InvalidCategory (contract violation,      │  │
//! │  │                        unrecoverable, never masked)              │  │
//! │  │         │                                                        │  │
//! │  │  Anything else ─────── Validation / Database                     │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  Every failure aborts the enclosing transaction: no partial            │
//! │  price/point mutation is ever persisted.                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use folio_core::ValidationError;
use folio_db::DbError;

/// Errors surfaced by the service boundary.
///
/// The not-found kinds are distinct so an upstream layer can map each to an
/// appropriate response without string matching.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The referenced customer does not exist.
    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    /// At least one referenced book does not exist.
    #[error("Book not found: {0}")]
    BookNotFound(String),

    /// The referenced purchase does not exist.
    #[error("Purchase not found: {0}")]
    PurchaseNotFound(String),

    /// A book category outside the closed enumeration was encountered.
    /// Contract violation; treated as unrecoverable at this level.
    #[error("Invalid book category: {0}")]
    InvalidCategory(String),

    /// Business-rule validation failed.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The storage layer failed.
    #[error("Database error: {0}")]
    Database(DbError),
}

/// Converts database errors to service errors.
///
/// `DbError::InvalidCategory` keeps its identity as the boundary's
/// contract-violation kind; everything else is a database failure the
/// caller can only report.
impl From<DbError> for ServiceError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::InvalidCategory(value) => ServiceError::InvalidCategory(value),
            other => ServiceError::Database(other),
        }
    }
}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

// =============================================================================
// Unit Tests
// =============================================================================
