//! # Domain Types
//!
//! Core domain types used throughout Folio.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Book       │   │    Customer     │   │    Purchase     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  title, author  │   │  name           │   │  customer_id    │       │
//! │  │  price_cents    │   │  loyalty_points │   │  book_ids (ord) │       │
//! │  │  category       │   │                 │   │  total_cents    │       │
//! │  └─────────────────┘   └─────────────────┘   │  points_used    │       │
//! │                                              └─────────────────┘       │
//! │  ┌─────────────────┐                                                   │
//! │  │  BookCategory   │   NEW_RELEASE │ REGULAR │ OLD_EDITION             │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A purchase keeps its own computed `total_cents`; it never re-reads live
//! book prices, so catalog edits and deletes leave history untouched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;
use crate::money::Money;

// =============================================================================
// Book Category
// =============================================================================

/// Pricing category of a book.
///
/// Stored as TEXT (`NEW_RELEASE`, `REGULAR`, `OLD_EDITION`). The enum is
/// closed: pricing dispatches through an exhaustive match, and the only
/// place an unrecognized value can enter the program is [`FromStr`], which
/// fails loudly with [`CoreError::InvalidCategory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookCategory {
    /// Newly released title. Never discounted.
    NewRelease,
    /// Standard catalog title. Bulk discount only.
    Regular,
    /// Older edition. Flat discount, plus bulk discount.
    OldEdition,
}

impl BookCategory {
    /// Canonical storage spelling of the category.
    pub const fn as_str(&self) -> &'static str {
        match self {
            BookCategory::NewRelease => "NEW_RELEASE",
            BookCategory::Regular => "REGULAR",
            BookCategory::OldEdition => "OLD_EDITION",
        }
    }
}

impl fmt::Display for BookCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NEW_RELEASE" => Ok(BookCategory::NewRelease),
            "REGULAR" => Ok(BookCategory::Regular),
            "OLD_EDITION" => Ok(BookCategory::OldEdition),
            other => Err(CoreError::InvalidCategory(other.to_string())),
        }
    }
}

// =============================================================================
// Book
// =============================================================================

/// A book in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display title.
    pub title: String,

    /// Author name.
    pub author: String,

    /// Unit price in cents (smallest currency unit). Never negative.
    pub price_cents: i64,

    /// Pricing category; determines discount eligibility.
    pub category: BookCategory,

    /// When the book was created.
    pub created_at: DateTime<Utc>,

    /// When the book was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Book {
    /// Creates a book with fresh timestamps.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        price_cents: i64,
        category: BookCategory,
    ) -> Self {
        let now = Utc::now();
        Book {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            price_cents,
            category,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns the unit price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Customer
// =============================================================================

/// A customer with a loyalty-point balance.
///
/// The balance is mutated only through the purchase write path (the loyalty
/// settlement result is persisted together with the purchase) or an explicit
/// customer update. Catalog price edits never touch it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name.
    pub name: String,

    /// Loyalty-point balance. Never negative.
    pub loyalty_points: i64,

    /// When the customer was created.
    pub created_at: DateTime<Utc>,

    /// When the customer was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Customer {
    /// Creates a customer with fresh timestamps.
    pub fn new(id: impl Into<String>, name: impl Into<String>, loyalty_points: i64) -> Self {
        let now = Utc::now();
        Customer {
            id: id.into(),
            name: name.into(),
            loyalty_points,
            created_at: now,
            updated_at: now,
        }
    }
}

// =============================================================================
// Purchase
// =============================================================================

/// A recorded purchase.
///
/// `book_ids` is an ordered list; the same id may appear more than once and
/// each occurrence is an independent line. `total_cents` is the authoritative
/// engine output at the time of the last write; it is never recomputed in the
/// background.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Purchase {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Owning customer. Exactly one, required.
    pub customer_id: String,

    /// Book references, in order. Duplicates are separate lines.
    pub book_ids: Vec<String>,

    /// Total price in cents as last computed by the engine.
    pub total_cents: i64,

    /// Whether loyalty-point redemption was applied to this purchase.
    ///
    /// Recorded so that a later update knows it must recompute the redemption
    /// discount instead of accruing points again; the customer's current
    /// balance may have changed since and cannot be used to re-derive this.
    pub loyalty_points_used: bool,

    /// When the purchase was created.
    pub created_at: DateTime<Utc>,

    /// When the purchase was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Purchase {
    /// Returns the total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    /// Number of lines in this purchase.
    #[inline]
    pub fn line_count(&self) -> usize {
        self.book_ids.len()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
