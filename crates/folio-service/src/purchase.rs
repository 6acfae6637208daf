//! # Purchase Service
//!
//! The purchase orchestrator: resolves the referenced entities, runs the
//! pricing and loyalty rules, and persists the outcome atomically.
//!
//! ## Amendment Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                update_purchase(id, customer_id, book_ids)               │
//! │                                                                         │
//! │  The stored redemption flag decides the loyalty path:                  │
//! │                                                                         │
//! │  flag = true  ──► recompute the redemption discount against the NEW    │
//! │                   lines; no balance is touched; flag stays true        │
//! │                                                                         │
//! │  flag = false ──► the resolved customer accrues points for the NEW     │
//! │                   line count, exactly as on creation; flag stays false │
//! │                                                                         │
//! │  The purchase keeps its original owner either way; the incoming        │
//! │  customer id is resolved (and accrues, in the second path) but is      │
//! │  never written onto the purchase row.                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both halves of that asymmetry are long-standing observed behavior of the
//! system and are covered by tests; amendments recompute independently and
//! never reverse the points already spent or granted by the prior version.

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{ServiceError, ServiceResult};
use folio_core::loyalty::{redemption_discount, settle};
use folio_core::pricing::{order_subtotal, price_order};
use folio_core::{Book, Customer, Purchase, POINTS_PER_LINE};
use folio_db::Database;

/// Orchestrates purchase creation, amendment, and deletion.
#[derive(Debug, Clone)]
pub struct PurchaseService {
    db: Database,
}

impl PurchaseService {
    /// Creates a new PurchaseService.
    pub fn new(db: Database) -> Self {
        PurchaseService { db }
    }

    /// Lists all purchases.
    pub async fn list_purchases(&self) -> ServiceResult<Vec<Purchase>> {
        Ok(self.db.purchases().find_all().await?)
    }

    /// Gets a purchase by id.
    pub async fn get_purchase(&self, id: &str) -> ServiceResult<Purchase> {
        self.db
            .purchases()
            .get_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::PurchaseNotFound(id.to_string()))
    }

    /// Records a new purchase.
    ///
    /// Prices every line against the full order size, settles the loyalty
    /// balance once, and persists the purchase together with the settled
    /// balance in one transaction.
    pub async fn create_purchase(
        &self,
        customer_id: &str,
        book_ids: &[String],
    ) -> ServiceResult<Purchase> {
        debug!(customer_id = %customer_id, lines = book_ids.len(), "create_purchase");

        let customer = self.resolve_customer(customer_id).await?;
        let books = self.resolve_books(book_ids).await?;

        let lines = price_order(&books);
        let settlement = settle(customer.loyalty_points, &lines);
        let total = order_subtotal(&lines) - settlement.discount;

        let now = Utc::now();
        let purchase = Purchase {
            id: Uuid::new_v4().to_string(),
            customer_id: customer.id.clone(),
            book_ids: books.iter().map(|b| b.id.clone()).collect(),
            total_cents: total.cents(),
            loyalty_points_used: settlement.redeemed,
            created_at: now,
            updated_at: now,
        };

        let settled_customer = Customer {
            loyalty_points: settlement.new_balance,
            updated_at: now,
            ..customer
        };

        self.db
            .purchases()
            .create(&purchase, &settled_customer)
            .await?;

        info!(
            purchase_id = %purchase.id,
            customer_id = %purchase.customer_id,
            total = %purchase.total(),
            redeemed = settlement.redeemed,
            balance = settlement.new_balance,
            "Purchase recorded"
        );

        Ok(purchase)
    }

    /// Amends an existing purchase.
    ///
    /// Recomputes the total from the new book list independently of the
    /// prior version. See the module docs for the loyalty semantics of the
    /// two flag states.
    pub async fn update_purchase(
        &self,
        id: &str,
        customer_id: &str,
        book_ids: &[String],
    ) -> ServiceResult<Purchase> {
        debug!(purchase_id = %id, customer_id = %customer_id, lines = book_ids.len(), "update_purchase");

        let mut purchase = self.get_purchase(id).await?;
        let customer = self.resolve_customer(customer_id).await?;
        let books = self.resolve_books(book_ids).await?;

        let lines = price_order(&books);
        let mut total = order_subtotal(&lines);

        let now = Utc::now();
        let accruing_customer = if purchase.loyalty_points_used {
            // Redemption was already paid for: the discount is recomputed
            // against the new lines, the balance stays wherever it is now.
            total -= redemption_discount(&lines);
            None
        } else {
            Some(Customer {
                loyalty_points: customer.loyalty_points + books.len() as i64 * POINTS_PER_LINE,
                updated_at: now,
                ..customer
            })
        };

        purchase.book_ids = books.iter().map(|b| b.id.clone()).collect();
        purchase.total_cents = total.cents();
        purchase.updated_at = now;

        self.db
            .purchases()
            .update(&purchase, accruing_customer.as_ref())
            .await?;

        info!(
            purchase_id = %purchase.id,
            total = %purchase.total(),
            redeemed = purchase.loyalty_points_used,
            "Purchase amended"
        );

        Ok(purchase)
    }

    /// Deletes a purchase.
    ///
    /// No compensating adjustment is made to the customer's points.
    pub async fn delete_purchase(&self, id: &str) -> ServiceResult<()> {
        let purchase = self.get_purchase(id).await?;

        self.db.purchases().delete(&purchase.id).await?;

        info!(purchase_id = %purchase.id, "Purchase deleted");

        Ok(())
    }

    async fn resolve_customer(&self, customer_id: &str) -> ServiceResult<Customer> {
        self.db
            .customers()
            .get_by_id(customer_id)
            .await?
            .ok_or_else(|| ServiceError::CustomerNotFound(customer_id.to_string()))
    }

    /// Resolves the requested id list as a multiset: every occurrence must
    /// resolve, duplicates independently. Loss is detected by count, not by
    /// diffing ids.
    async fn resolve_books(&self, book_ids: &[String]) -> ServiceResult<Vec<Book>> {
        let books = self.db.books().find_all_by_ids(book_ids).await?;

        if books.len() != book_ids.len() {
            return Err(ServiceError::BookNotFound(
                "some books could not be resolved, check the requested ids".to_string(),
            ));
        }

        Ok(books)
    }
}
