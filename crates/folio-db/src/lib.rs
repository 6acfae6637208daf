//! # folio-db: Database Layer for Folio
//!
//! This crate provides database access for Folio.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Folio Data Flow                                │
//! │                                                                         │
//! │  Service call (create_purchase)                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     folio-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │  (book.rs,    │    │  (embedded)  │  │   │
//! │  │   │               │    │   customer,   │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│   purchase)   │    │ 001_init.sql │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database file (or :memory: in tests)                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (book, customer, purchase)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use folio_db::{Database, DbConfig};
//!
//! // Create database with default config
//! let config = DbConfig::new("path/to/folio.db");
//! let db = Database::new(config).await?;
//!
//! // Use repositories
//! let book = db.books().get_by_id("some-uuid").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::DbError;
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::book::BookRepository;
pub use repository::customer::CustomerRepository;
pub use repository::purchase::PurchaseRepository;
