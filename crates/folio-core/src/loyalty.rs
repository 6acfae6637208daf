//! # Loyalty Module
//!
//! Loyalty-point accrual and redemption settlement.
//!
//! ## Settlement Decision
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Loyalty Settlement                                  │
//! │                                                                         │
//! │  balance ≥ 10 ──► REDEEM                                               │
//! │                   ├── new balance = 0 (full reset, not a decrement)    │
//! │                   ├── discount = cheapest non-NEW_RELEASE line         │
//! │                   │              (0 if every line is NEW_RELEASE)      │
//! │                   └── redeemed = true                                  │
//! │                                                                         │
//! │  balance < 10 ──► ACCRUE                                               │
//! │                   ├── new balance = balance + lines (1 point/line)     │
//! │                   ├── discount = 0                                     │
//! │                   └── redeemed = false                                 │
//! │                                                                         │
//! │  Runs exactly ONCE per order write, never per line.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The settlement returns the new balance explicitly; persisting it together
//! with the purchase is the orchestrator's job. Nothing here mutates state.

use crate::money::Money;
use crate::pricing::PricedLine;
use crate::types::BookCategory;
use crate::{POINTS_PER_LINE, REDEMPTION_THRESHOLD};

// =============================================================================
// Settlement Result
// =============================================================================

/// Outcome of settling one order against a customer's point balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoyaltySettlement {
    /// The customer's balance after this order.
    pub new_balance: i64,
    /// Amount to subtract once from the order total. Zero unless redeeming.
    pub discount: Money,
    /// Whether redemption was applied.
    pub redeemed: bool,
}

// =============================================================================
// Loyalty Ledger
// =============================================================================

/// Settles an order against a loyalty-point balance.
///
/// ## Example
/// ```rust
/// use folio_core::loyalty::settle;
/// use folio_core::money::Money;
/// use folio_core::pricing::PricedLine;
/// use folio_core::types::BookCategory;
///
/// let lines = [
///     PricedLine { category: BookCategory::Regular, price: Money::from_cents(900) },
///     PricedLine { category: BookCategory::Regular, price: Money::from_cents(1800) },
/// ];
///
/// // Below the threshold: accrue one point per line
/// let outcome = settle(4, &lines);
/// assert_eq!(outcome.new_balance, 6);
/// assert!(!outcome.redeemed);
///
/// // At the threshold: reset to zero, cheapest eligible line is free
/// let outcome = settle(12, &lines);
/// assert_eq!(outcome.new_balance, 0);
/// assert_eq!(outcome.discount, Money::from_cents(900));
/// assert!(outcome.redeemed);
/// ```
pub fn settle(balance: i64, lines: &[PricedLine]) -> LoyaltySettlement {
    if balance >= REDEMPTION_THRESHOLD {
        LoyaltySettlement {
            new_balance: 0,
            discount: redemption_discount(lines),
            redeemed: true,
        }
    } else {
        LoyaltySettlement {
            new_balance: balance + lines.len() as i64 * POINTS_PER_LINE,
            discount: Money::zero(),
            redeemed: false,
        }
    }
}

/// The redemption discount for an order: the cheapest line whose category is
/// not NEW_RELEASE, or zero when no line is eligible.
///
/// Exposed separately because amending a previously-redeemed purchase
/// recomputes this discount against the new lines without touching any
/// balance.
pub fn redemption_discount(lines: &[PricedLine]) -> Money {
    lines
        .iter()
        .filter(|line| line.category != BookCategory::NewRelease)
        .map(|line| line.price)
        .min()
        .unwrap_or(Money::zero())
}

// =============================================================================
// Unit Tests
// =============================================================================
