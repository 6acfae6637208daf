//! # Pricing Module
//!
//! Category-based per-line discount rules.
//!
//! ## Discount Matrix
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Per-Line Discount Rules                              │
//! │                                                                         │
//! │  Category      │ Base discount │ Bulk discount (order ≥ 3 lines)       │
//! │  ──────────────┼───────────────┼──────────────────────────────────      │
//! │  NEW_RELEASE   │ none          │ none                                   │
//! │  REGULAR       │ none          │ 10%                                    │
//! │  OLD_EDITION   │ 20%           │ additional 5% (compounds: ×0.8×0.95)  │
//! │                                                                         │
//! │  "Bulk" counts LINES in the whole order, not copies of one title.      │
//! │  Discounts compound multiplicatively, never additively.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every function here is pure and cheap; the loyalty settlement re-prices
//! the same list when it needs the cheapest eligible line, which is safe
//! because the result is identical on every invocation.

use crate::money::Money;
use crate::types::{Book, BookCategory};

// =============================================================================
// Policy Constants
// =============================================================================

/// Number of lines an order needs before bulk discounts unlock.
pub const BULK_DISCOUNT_MIN_LINES: usize = 3;

/// Flat discount on old editions, in basis points (20%).
pub const OLD_EDITION_DISCOUNT_BPS: u32 = 2000;

/// Additional bulk discount on old editions, in basis points (5%).
pub const OLD_EDITION_BULK_DISCOUNT_BPS: u32 = 500;

/// Bulk discount on regular titles, in basis points (10%).
pub const REGULAR_BULK_DISCOUNT_BPS: u32 = 1000;

// =============================================================================
// Priced Line
// =============================================================================

/// One priced line of an order: the category it was priced under and the
/// discounted price. This is what the loyalty ledger consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricedLine {
    /// Category of the book behind this line.
    pub category: BookCategory,
    /// Discounted line price.
    pub price: Money,
}

// =============================================================================
// Pricing Engine
// =============================================================================

/// Computes the discounted price of one line.
///
/// `line_count` is the total number of lines in the order being priced, not
/// the count of this particular title. The match is exhaustive over the
/// closed category enumeration; an unrecognized category cannot reach this
/// function (it is rejected at parse time, see
/// [`CoreError::InvalidCategory`](crate::error::CoreError::InvalidCategory)).
///
/// ## Example
/// ```rust
/// use folio_core::money::Money;
/// use folio_core::pricing::line_price;
/// use folio_core::types::{Book, BookCategory};
///
/// let book = Book::new("b-1", "Foundation", "Isaac Asimov", 10000, BookCategory::OldEdition);
///
/// // Alone: 20% off
/// assert_eq!(line_price(&book, 1), Money::from_cents(8000));
///
/// // In a 3-line order: 20% off, then 5% off the result
/// assert_eq!(line_price(&book, 3), Money::from_cents(7600));
/// ```
pub fn line_price(book: &Book, line_count: usize) -> Money {
    let base = book.price();

    match book.category {
        BookCategory::OldEdition => {
            let discounted = base.apply_percentage_discount(OLD_EDITION_DISCOUNT_BPS);
            if line_count >= BULK_DISCOUNT_MIN_LINES {
                discounted.apply_percentage_discount(OLD_EDITION_BULK_DISCOUNT_BPS)
            } else {
                discounted
            }
        }
        BookCategory::Regular => {
            if line_count >= BULK_DISCOUNT_MIN_LINES {
                base.apply_percentage_discount(REGULAR_BULK_DISCOUNT_BPS)
            } else {
                base
            }
        }
        BookCategory::NewRelease => base,
    }
}

/// Prices every line of an order.
///
/// The line count fed to [`line_price`] is the length of `books`, so adding
/// a third line to an order changes the price of the first two as well.
pub fn price_order(books: &[Book]) -> Vec<PricedLine> {
    let line_count = books.len();
    books
        .iter()
        .map(|book| PricedLine {
            category: book.category,
            price: line_price(book, line_count),
        })
        .collect()
}

/// Sums the priced lines of an order.
pub fn order_subtotal(lines: &[PricedLine]) -> Money {
    lines.iter().map(|line| line.price).sum()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn book(price_cents: i64, category: BookCategory) -> Book {
        Book::new("b-test", "Title", "Author", price_cents, category)
    }

    #[test]
    fn test_new_release_never_discounted() {
        let b = book(1500, BookCategory::NewRelease);
        for line_count in [1, 2, 3, 10] {
            assert_eq!(line_price(&b, line_count), Money::from_cents(1500));
        }
    }

    #[test]
    fn test_regular_below_bulk_threshold() {
        let b = book(1000, BookCategory::Regular);
        assert_eq!(line_price(&b, 1), Money::from_cents(1000));
        assert_eq!(line_price(&b, 2), Money::from_cents(1000));
    }

    #[test]
    fn test_regular_at_bulk_threshold() {
        let b = book(1000, BookCategory::Regular);
        assert_eq!(line_price(&b, 3), Money::from_cents(900));
        assert_eq!(line_price(&b, 4), Money::from_cents(900));
    }

    #[test]
    fn test_old_edition_flat_discount() {
        // $100.00 old edition alone: 20% off, bulk not reached
        let b = book(10000, BookCategory::OldEdition);
        assert_eq!(line_price(&b, 1), Money::from_cents(8000));
    }

    #[test]
    fn test_old_edition_compound_discount() {
        // $100.00 × 0.8 × 0.95 = $76.00
        let b = book(10000, BookCategory::OldEdition);
        assert_eq!(line_price(&b, 3), Money::from_cents(7600));
    }

    #[test]
    fn test_price_non_increasing_across_threshold() {
        // Crossing the bulk threshold never raises a discounted category's price
        for category in [BookCategory::Regular, BookCategory::OldEdition] {
            let b = book(1234, category);
            assert!(line_price(&b, 3) <= line_price(&b, 2));
        }
    }

    #[test]
    fn test_price_order_counts_all_lines() {
        // {$10, $20, $30} regular: 3 lines unlock the 10% bulk discount
        let books = vec![
            book(1000, BookCategory::Regular),
            book(2000, BookCategory::Regular),
            book(3000, BookCategory::Regular),
        ];
        let lines = price_order(&books);
        let prices: Vec<i64> = lines.iter().map(|l| l.price.cents()).collect();
        assert_eq!(prices, vec![900, 1800, 2700]);
        assert_eq!(order_subtotal(&lines), Money::from_cents(5400));
    }

    #[test]
    fn test_price_order_mixed_categories() {
        let books = vec![
            book(1000, BookCategory::NewRelease),
            book(1000, BookCategory::Regular),
            book(1000, BookCategory::OldEdition),
        ];
        let lines = price_order(&books);
        let prices: Vec<i64> = lines.iter().map(|l| l.price.cents()).collect();
        assert_eq!(prices, vec![1000, 900, 760]);
    }

    #[test]
    fn test_price_order_empty() {
        let lines = price_order(&[]);
        assert!(lines.is_empty());
        assert_eq!(order_subtotal(&lines), Money::zero());
    }

    #[test]
    fn test_repricing_is_stable() {
        // The settlement path prices the same order twice; both passes must agree
        let books = vec![
            book(1099, BookCategory::OldEdition),
            book(2599, BookCategory::Regular),
            book(399, BookCategory::OldEdition),
        ];
        assert_eq!(price_order(&books), price_order(&books));
    }
}
