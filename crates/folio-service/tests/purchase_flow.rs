//! End-to-end purchase flows against an in-memory SQLite database.
//!
//! These tests drive the real service stack (services → repositories →
//! SQLite) and pin down the engine's externally observable behavior:
//! discount arithmetic, loyalty accrual/redemption, transactional rollback,
//! and the amendment semantics.

use folio_core::{BookCategory, Customer, Purchase};
use folio_db::{Database, DbConfig};
use folio_service::{BookService, CustomerService, PurchaseService, ServiceError};

struct TestStack {
    books: BookService,
    customers: CustomerService,
    purchases: PurchaseService,
    db: Database,
}

async fn stack() -> TestStack {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    TestStack {
        books: BookService::new(db.clone()),
        customers: CustomerService::new(db.clone()),
        purchases: PurchaseService::new(db.clone()),
        db,
    }
}

impl TestStack {
    async fn book(&self, title: &str, price_cents: i64, category: BookCategory) -> String {
        self.books
            .create_book(title, "Author", price_cents, category)
            .await
            .unwrap()
            .id
    }

    async fn customer(&self, name: &str, points: i64) -> Customer {
        self.customers.create_customer(name, points).await.unwrap()
    }

    async fn balance_of(&self, id: &str) -> i64 {
        self.customers.get_customer(id).await.unwrap().loyalty_points
    }

    /// Three regular books at $10/$20/$30 - the canonical bulk-discount order.
    async fn regular_trio(&self) -> Vec<String> {
        let mut ids = Vec::new();
        for (title, cents) in [("R10", 1000), ("R20", 2000), ("R30", 3000)] {
            ids.push(self.book(title, cents, BookCategory::Regular).await);
        }
        ids
    }
}

// =============================================================================
// Pricing & Accrual
// =============================================================================

#[tokio::test]
async fn regular_trio_gets_bulk_discount_and_accrues_points() {
    let s = stack().await;
    let customer = s.customer("Ada", 0).await;
    let books = s.regular_trio().await;

    let purchase = s.purchases.create_purchase(&customer.id, &books).await.unwrap();

    // {$10, $20, $30} each 10% off → total $54
    assert_eq!(purchase.total_cents, 5400);
    assert!(!purchase.loyalty_points_used);
    // One point per line
    assert_eq!(s.balance_of(&customer.id).await, 3);
}

#[tokio::test]
async fn single_old_edition_gets_flat_discount_only() {
    let s = stack().await;
    let customer = s.customer("Ada", 0).await;
    let book = s.book("Foundation", 10000, BookCategory::OldEdition).await;

    let purchase = s
        .purchases
        .create_purchase(&customer.id, &[book])
        .await
        .unwrap();

    // $100 × 0.8, bulk discount not reached at one line
    assert_eq!(purchase.total_cents, 8000);
    assert_eq!(s.balance_of(&customer.id).await, 1);
}

#[tokio::test]
async fn three_old_editions_compound_both_discounts() {
    let s = stack().await;
    let customer = s.customer("Ada", 0).await;
    let mut books = Vec::new();
    for title in ["O1", "O2", "O3"] {
        books.push(s.book(title, 10000, BookCategory::OldEdition).await);
    }

    let purchase = s.purchases.create_purchase(&customer.id, &books).await.unwrap();

    // Each line $100 × 0.8 × 0.95 = $76
    assert_eq!(purchase.total_cents, 22800);
}

#[tokio::test]
async fn new_releases_are_never_discounted() {
    let s = stack().await;
    let customer = s.customer("Ada", 0).await;
    let mut books = Vec::new();
    for title in ["N1", "N2", "N3"] {
        books.push(s.book(title, 2500, BookCategory::NewRelease).await);
    }

    let purchase = s.purchases.create_purchase(&customer.id, &books).await.unwrap();

    assert_eq!(purchase.total_cents, 7500);
}

#[tokio::test]
async fn duplicate_book_ids_are_independent_lines() {
    let s = stack().await;
    let customer = s.customer("Ada", 0).await;
    let book = s.book("R10", 1000, BookCategory::Regular).await;

    // The same title three times is still a 3-line order: bulk discount on
    let ids = vec![book.clone(), book.clone(), book];
    let purchase = s.purchases.create_purchase(&customer.id, &ids).await.unwrap();

    assert_eq!(purchase.book_ids.len(), 3);
    assert_eq!(purchase.total_cents, 2700);
    assert_eq!(s.balance_of(&customer.id).await, 3);
}

// =============================================================================
// Redemption
// =============================================================================

#[tokio::test]
async fn redemption_discounts_cheapest_line_and_resets_balance() {
    let s = stack().await;
    let customer = s.customer("Kat", 12).await;
    let books = s.regular_trio().await;

    let purchase = s.purchases.create_purchase(&customer.id, &books).await.unwrap();

    // Discount = min(9, 18, 27) = $9 → total $45
    assert_eq!(purchase.total_cents, 4500);
    assert!(purchase.loyalty_points_used);
    assert_eq!(s.balance_of(&customer.id).await, 0);
}

#[tokio::test]
async fn redemption_with_only_new_releases_discounts_nothing() {
    let s = stack().await;
    let customer = s.customer("Kat", 15).await;
    let book = s.book("N1", 2500, BookCategory::NewRelease).await;

    let purchase = s
        .purchases
        .create_purchase(&customer.id, &[book])
        .await
        .unwrap();

    // No eligible line: the balance is still consumed, the total unchanged
    assert_eq!(purchase.total_cents, 2500);
    assert!(purchase.loyalty_points_used);
    assert_eq!(s.balance_of(&customer.id).await, 0);
}

// =============================================================================
// Referential Integrity & Rollback
// =============================================================================

#[tokio::test]
async fn unknown_customer_fails_before_any_write() {
    let s = stack().await;
    let book = s.book("R10", 1000, BookCategory::Regular).await;

    let err = s
        .purchases
        .create_purchase("ghost", &[book])
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::CustomerNotFound(_)));
    assert!(s.purchases.list_purchases().await.unwrap().is_empty());
}

#[tokio::test]
async fn unresolvable_book_id_fails_and_mutates_nothing() {
    let s = stack().await;
    let customer = s.customer("Ada", 7).await;
    let real = s.book("R10", 1000, BookCategory::Regular).await;

    let ids = vec![real, "ghost-book".to_string()];
    let err = s
        .purchases
        .create_purchase(&customer.id, &ids)
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::BookNotFound(_)));
    // Balance untouched, no purchase row anywhere
    assert_eq!(s.balance_of(&customer.id).await, 7);
    assert!(s.purchases.list_purchases().await.unwrap().is_empty());
}

#[tokio::test]
async fn duplicate_of_unknown_id_still_fails() {
    let s = stack().await;
    let customer = s.customer("Ada", 0).await;

    let ids = vec!["ghost".to_string(), "ghost".to_string()];
    let err = s
        .purchases
        .create_purchase(&customer.id, &ids)
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::BookNotFound(_)));
}

// =============================================================================
// Round-trip & Listing
// =============================================================================

#[tokio::test]
async fn created_purchase_reads_back_identically() {
    let s = stack().await;
    let customer = s.customer("Ada", 0).await;
    let books = s.regular_trio().await;

    let created = s.purchases.create_purchase(&customer.id, &books).await.unwrap();
    let fetched = s.purchases.get_purchase(&created.id).await.unwrap();

    assert_eq!(fetched.customer_id, created.customer_id);
    assert_eq!(fetched.book_ids, created.book_ids);
    assert_eq!(fetched.total_cents, created.total_cents);
    assert_eq!(fetched.loyalty_points_used, created.loyalty_points_used);

    let all = s.purchases.list_purchases().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, created.id);
}

#[tokio::test]
async fn get_unknown_purchase_is_not_found() {
    let s = stack().await;

    let err = s.purchases.get_purchase("nope").await.unwrap_err();
    assert!(matches!(err, ServiceError::PurchaseNotFound(_)));
}

// =============================================================================
// Amendment Semantics
// =============================================================================

#[tokio::test]
async fn amending_unredeemed_purchase_accrues_again() {
    let s = stack().await;
    let customer = s.customer("Ada", 0).await;
    let books = s.regular_trio().await;

    // Creation with 2 lines accrues 2 points
    let purchase = s
        .purchases
        .create_purchase(&customer.id, &books[..2].to_vec())
        .await
        .unwrap();
    assert_eq!(s.balance_of(&customer.id).await, 2);
    assert_eq!(purchase.total_cents, 3000); // no bulk discount at 2 lines

    // Amending to 3 lines accrues 3 MORE points; the original 2 are not
    // reversed. Long-standing behavior, kept deliberately.
    let amended = s
        .purchases
        .update_purchase(&purchase.id, &customer.id, &books)
        .await
        .unwrap();
    assert_eq!(amended.total_cents, 5400);
    assert!(!amended.loyalty_points_used);
    assert_eq!(s.balance_of(&customer.id).await, 5);
}

#[tokio::test]
async fn amending_redeemed_purchase_recomputes_discount_without_balance() {
    let s = stack().await;
    let customer = s.customer("Kat", 12).await;
    let books = s.regular_trio().await;

    let purchase = s.purchases.create_purchase(&customer.id, &books).await.unwrap();
    assert_eq!(purchase.total_cents, 4500);
    assert_eq!(s.balance_of(&customer.id).await, 0);

    // Amend to just the two cheaper books: discount becomes min(10, 20) = $10
    // against undiscounted 2-line prices. The zeroed balance is NOT
    // re-credited or re-checked - redemption is not re-validated on update.
    let amended = s
        .purchases
        .update_purchase(&purchase.id, &customer.id, &books[..2].to_vec())
        .await
        .unwrap();
    assert_eq!(amended.total_cents, 2000); // 1000 + 2000 - 1000
    assert!(amended.loyalty_points_used);
    assert_eq!(s.balance_of(&customer.id).await, 0);
}

#[tokio::test]
async fn amendment_keeps_original_owner_but_accrues_to_resolved_customer() {
    let s = stack().await;
    let owner = s.customer("Ada", 0).await;
    let other = s.customer("Grace", 4).await;
    let books = s.regular_trio().await;

    let purchase = s.purchases.create_purchase(&owner.id, &books).await.unwrap();

    // Amend while naming a different customer: the purchase keeps its owner,
    // the named customer takes the accrual. Observed behavior, preserved.
    let amended = s
        .purchases
        .update_purchase(&purchase.id, &other.id, &books)
        .await
        .unwrap();

    assert_eq!(amended.customer_id, owner.id);
    assert_eq!(s.balance_of(&owner.id).await, 3);
    assert_eq!(s.balance_of(&other.id).await, 7);
}

#[tokio::test]
async fn amending_with_unknown_book_changes_nothing() {
    let s = stack().await;
    let customer = s.customer("Ada", 0).await;
    let books = s.regular_trio().await;

    let purchase = s.purchases.create_purchase(&customer.id, &books).await.unwrap();

    let bad = vec![books[0].clone(), "ghost".to_string()];
    let err = s
        .purchases
        .update_purchase(&purchase.id, &customer.id, &bad)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::BookNotFound(_)));

    let unchanged = s.purchases.get_purchase(&purchase.id).await.unwrap();
    assert_eq!(unchanged.book_ids, purchase.book_ids);
    assert_eq!(unchanged.total_cents, purchase.total_cents);
    assert_eq!(s.balance_of(&customer.id).await, 3);
}

// =============================================================================
// Deletion
// =============================================================================

#[tokio::test]
async fn deleting_purchase_leaves_points_alone() {
    let s = stack().await;
    let customer = s.customer("Ada", 0).await;
    let books = s.regular_trio().await;

    let purchase = s.purchases.create_purchase(&customer.id, &books).await.unwrap();
    assert_eq!(s.balance_of(&customer.id).await, 3);

    s.purchases.delete_purchase(&purchase.id).await.unwrap();

    // No compensating adjustment on delete
    assert_eq!(s.balance_of(&customer.id).await, 3);

    let err = s.purchases.get_purchase(&purchase.id).await.unwrap_err();
    assert!(matches!(err, ServiceError::PurchaseNotFound(_)));

    let err = s.purchases.delete_purchase(&purchase.id).await.unwrap_err();
    assert!(matches!(err, ServiceError::PurchaseNotFound(_)));
}

// =============================================================================
// Catalog Independence
// =============================================================================

#[tokio::test]
async fn deleting_a_book_leaves_past_purchases_intact() {
    let s = stack().await;
    let customer = s.customer("Ada", 0).await;
    let books = s.regular_trio().await;

    let purchase = s.purchases.create_purchase(&customer.id, &books).await.unwrap();

    s.books.delete_book(&books[0]).await.unwrap();

    // The purchase still lists the deleted book and keeps its total
    let fetched = s.purchases.get_purchase(&purchase.id).await.unwrap();
    assert_eq!(fetched.book_ids, purchase.book_ids);
    assert_eq!(fetched.total_cents, 5400);
}

#[tokio::test]
async fn price_edits_do_not_touch_recorded_totals() {
    let s = stack().await;
    let customer = s.customer("Ada", 0).await;
    let book = s.book("R10", 1000, BookCategory::Regular).await;

    let purchase = s
        .purchases
        .create_purchase(&customer.id, &[book.clone()])
        .await
        .unwrap();
    assert_eq!(purchase.total_cents, 1000);

    s.books
        .update_book(&book, "R10", "Author", 9999, BookCategory::Regular)
        .await
        .unwrap();

    let fetched = s.purchases.get_purchase(&purchase.id).await.unwrap();
    assert_eq!(fetched.total_cents, 1000);
    // And the balance is only ever touched by the purchase path
    assert_eq!(s.balance_of(&customer.id).await, 1);
}

// =============================================================================
// Helpers under test
// =============================================================================

#[tokio::test]
async fn purchases_survive_a_fresh_read_of_everything() {
    let s = stack().await;
    let customer = s.customer("Ada", 0).await;
    let books = s.regular_trio().await;

    let p1 = s.purchases.create_purchase(&customer.id, &books).await.unwrap();
    let p2 = s
        .purchases
        .create_purchase(&customer.id, &books[..1].to_vec())
        .await
        .unwrap();

    let all: Vec<Purchase> = s.purchases.list_purchases().await.unwrap();
    assert_eq!(all.len(), 2);
    let ids: Vec<&str> = all.iter().map(|p| p.id.as_str()).collect();
    assert!(ids.contains(&p1.id.as_str()));
    assert!(ids.contains(&p2.id.as_str()));

    // The database handle itself still answers
    assert!(s.db.health_check().await);
}
