//! # folio-core: Pure Business Logic for Folio
//!
//! This crate is the **heart** of Folio. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Folio Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    folio-service (Boundary)                     │   │
//! │  │    create_purchase, update_purchase, catalog & customer CRUD   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ folio-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  pricing  │  │  loyalty  │  │   │
//! │  │   │   Book    │  │   Money   │  │  per-line │  │  accrue/  │  │   │
//! │  │   │  Customer │  │  bps math │  │ discounts │  │  redeem   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    folio-db (Database Layer)                    │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Book, Customer, Purchase)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`pricing`] - Category-based per-line discount rules
//! - [`loyalty`] - Loyalty-point accrual and redemption settlement
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use folio_core::money::Money;
//! use folio_core::pricing::line_price;
//! use folio_core::types::{Book, BookCategory};
//!
//! let book = Book::new("b-1", "Dune", "Frank Herbert", 1000, BookCategory::Regular);
//!
//! // One Regular book alone: no discount
//! assert_eq!(line_price(&book, 1), Money::from_cents(1000));
//!
//! // The same book inside a 3-line order: 10% bulk discount
//! assert_eq!(line_price(&book, 3), Money::from_cents(900));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod loyalty;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use folio_core::Money` instead of
// `use folio_core::money::Money`

pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Policy Constants
// =============================================================================

/// Loyalty-point balance at which a purchase triggers redemption.
///
/// ## Business Reason
/// A customer holding at least this many points pays with them: the balance
/// resets to zero and the cheapest eligible line of the order is free.
/// Single fixed threshold, no tiering.
pub const REDEMPTION_THRESHOLD: i64 = 10;

/// Loyalty points accrued per purchased line when redemption does not apply.
///
/// One point per book occurrence, regardless of category or price.
pub const POINTS_PER_LINE: i64 = 1;
