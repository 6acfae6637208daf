//! # folio-service: Service Boundary for Folio
//!
//! The operations a front door (HTTP layer, CLI, tests) calls into:
//! purchase orchestration plus catalog and customer CRUD.
//!
//! ## Control Flow of a Purchase
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │              create_purchase(customer_id, book_ids)                     │
//! │                                                                         │
//! │  1. Resolve customer ──────────────── CustomerNotFound on miss         │
//! │  2. Resolve books (multiset) ──────── BookNotFound on count mismatch   │
//! │  3. Price every line ──────────────── folio_core::pricing              │
//! │  4. Settle loyalty (once per order) ─ folio_core::loyalty              │
//! │  5. Persist purchase + balance ────── one SQLite transaction           │
//! │  6. Return the persisted aggregate                                     │
//! │                                                                         │
//! │  Terminal on first failure; a failed step leaves no partial writes.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod book;
pub mod customer;
pub mod error;
pub mod purchase;

// =============================================================================
// Re-exports
// =============================================================================

pub use book::BookService;
pub use customer::CustomerService;
pub use error::{ServiceError, ServiceResult};
pub use purchase::PurchaseService;
