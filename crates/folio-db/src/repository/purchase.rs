//! # Purchase Repository
//!
//! Database operations for purchases and their ordered book lines.
//!
//! ## Write Transaction
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 Purchase Write (one transaction)                        │
//! │                                                                         │
//! │  BEGIN                                                                  │
//! │    UPDATE customers SET loyalty_points = <settled balance>             │
//! │    INSERT/UPDATE purchases (total, redemption flag)                    │
//! │    DELETE + INSERT purchase_books (ordered lines)                      │
//! │  COMMIT                                                                 │
//! │                                                                         │
//! │  Any failure before COMMIT rolls everything back: the balance and      │
//! │  the purchase can never diverge.                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use folio_core::{Customer, Purchase};

/// Row shape of the `purchases` table (lines are loaded separately).
#[derive(Debug, Clone, sqlx::FromRow)]
struct PurchaseRow {
    id: String,
    customer_id: String,
    total_cents: i64,
    loyalty_points_used: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PurchaseRow {
    fn into_purchase(self, book_ids: Vec<String>) -> Purchase {
        Purchase {
            id: self.id,
            customer_id: self.customer_id,
            book_ids,
            total_cents: self.total_cents,
            loyalty_points_used: self.loyalty_points_used,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

const SELECT_PURCHASE: &str =
    "SELECT id, customer_id, total_cents, loyalty_points_used, created_at, updated_at \
     FROM purchases";

/// Repository for purchase database operations.
#[derive(Debug, Clone)]
pub struct PurchaseRepository {
    pool: SqlitePool,
}

impl PurchaseRepository {
    /// Creates a new PurchaseRepository.
    pub fn new(pool: SqlitePool) -> Self {
        PurchaseRepository { pool }
    }

    /// Gets a purchase by ID, lines included in order.
    ///
    /// ## Returns
    /// * `Ok(Some(Purchase))` - Purchase found
    /// * `Ok(None)` - Purchase not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Purchase>> {
        let row: Option<PurchaseRow> =
            sqlx::query_as(&format!("{SELECT_PURCHASE} WHERE id = ?1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        match row {
            Some(row) => {
                let book_ids = self.load_book_ids(&row.id).await?;
                Ok(Some(row.into_purchase(book_ids)))
            }
            None => Ok(None),
        }
    }

    /// Lists all purchases, oldest first, lines included.
    pub async fn find_all(&self) -> DbResult<Vec<Purchase>> {
        let rows: Vec<PurchaseRow> =
            sqlx::query_as(&format!("{SELECT_PURCHASE} ORDER BY created_at, id"))
                .fetch_all(&self.pool)
                .await?;

        let mut purchases = Vec::with_capacity(rows.len());
        for row in rows {
            let book_ids = self.load_book_ids(&row.id).await?;
            purchases.push(row.into_purchase(book_ids));
        }

        Ok(purchases)
    }

    /// Persists a new purchase together with its customer's settled balance,
    /// in one transaction.
    ///
    /// The customer row must already exist; the balance written here is the
    /// loyalty settlement output, never read-modify-written inside the
    /// transaction.
    pub async fn create(&self, purchase: &Purchase, customer: &Customer) -> DbResult<()> {
        debug!(
            id = %purchase.id,
            customer_id = %purchase.customer_id,
            total = purchase.total_cents,
            redeemed = purchase.loyalty_points_used,
            "Creating purchase"
        );

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE customers SET
                loyalty_points = ?2,
                updated_at = ?3
            WHERE id = ?1
            "#,
        )
        .bind(&customer.id)
        .bind(customer.loyalty_points)
        .bind(customer.updated_at)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Customer", &customer.id));
        }

        sqlx::query(
            r#"
            INSERT INTO purchases (
                id, customer_id, total_cents, loyalty_points_used,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&purchase.id)
        .bind(&purchase.customer_id)
        .bind(purchase.total_cents)
        .bind(purchase.loyalty_points_used)
        .bind(purchase.created_at)
        .bind(purchase.updated_at)
        .execute(&mut *tx)
        .await?;

        insert_lines(&mut tx, purchase).await?;

        tx.commit().await?;

        Ok(())
    }

    /// Persists an amended purchase, optionally together with a customer
    /// whose balance accrued, in one transaction.
    ///
    /// `customer` is `None` when the amendment must not touch any balance
    /// (the purchase had already redeemed its points).
    pub async fn update(&self, purchase: &Purchase, customer: Option<&Customer>) -> DbResult<()> {
        debug!(
            id = %purchase.id,
            total = purchase.total_cents,
            accrues = customer.is_some(),
            "Updating purchase"
        );

        let mut tx = self.pool.begin().await?;

        if let Some(customer) = customer {
            let result = sqlx::query(
                r#"
                UPDATE customers SET
                    loyalty_points = ?2,
                    updated_at = ?3
                WHERE id = ?1
                "#,
            )
            .bind(&customer.id)
            .bind(customer.loyalty_points)
            .bind(customer.updated_at)
            .execute(&mut *tx)
            .await?;

            if result.rows_affected() == 0 {
                return Err(DbError::not_found("Customer", &customer.id));
            }
        }

        let result = sqlx::query(
            r#"
            UPDATE purchases SET
                total_cents = ?2,
                loyalty_points_used = ?3,
                updated_at = ?4
            WHERE id = ?1
            "#,
        )
        .bind(&purchase.id)
        .bind(purchase.total_cents)
        .bind(purchase.loyalty_points_used)
        .bind(purchase.updated_at)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Purchase", &purchase.id));
        }

        sqlx::query("DELETE FROM purchase_books WHERE purchase_id = ?1")
            .bind(&purchase.id)
            .execute(&mut *tx)
            .await?;

        insert_lines(&mut tx, purchase).await?;

        tx.commit().await?;

        Ok(())
    }

    /// Deletes a purchase. Lines cascade; customer balances are untouched.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting purchase");

        let result = sqlx::query("DELETE FROM purchases WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Purchase", id));
        }

        Ok(())
    }

    async fn load_book_ids(&self, purchase_id: &str) -> DbResult<Vec<String>> {
        let ids: Vec<String> = sqlx::query_scalar(
            "SELECT book_id FROM purchase_books WHERE purchase_id = ?1 ORDER BY position",
        )
        .bind(purchase_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }
}

/// Inserts the ordered book lines of a purchase inside an open transaction.
async fn insert_lines(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    purchase: &Purchase,
) -> DbResult<()> {
    for (position, book_id) in purchase.book_ids.iter().enumerate() {
        sqlx::query(
            "INSERT INTO purchase_books (purchase_id, position, book_id) VALUES (?1, ?2, ?3)",
        )
        .bind(&purchase.id)
        .bind(position as i64)
        .bind(book_id)
        .execute(&mut **tx)
        .await?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use folio_core::{Book, BookCategory};

    async fn seeded_db() -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        db.customers()
            .insert(&Customer::new("c-1", "Ada", 0))
            .await
            .unwrap();
        db.books()
            .insert(&Book::new("b-1", "Dune", "Frank Herbert", 1000, BookCategory::Regular))
            .await
            .unwrap();
        db.books()
            .insert(&Book::new("b-2", "Emma", "Jane Austen", 2000, BookCategory::OldEdition))
            .await
            .unwrap();

        db
    }

    fn purchase(id: &str, book_ids: &[&str], total_cents: i64) -> Purchase {
        let now = Utc::now();
        Purchase {
            id: id.to_string(),
            customer_id: "c-1".to_string(),
            book_ids: book_ids.iter().map(|s| s.to_string()).collect(),
            total_cents,
            loyalty_points_used: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_create_persists_purchase_and_balance_together() {
        let db = seeded_db().await;
        let repo = db.purchases();

        let mut customer = db.customers().get_by_id("c-1").await.unwrap().unwrap();
        customer.loyalty_points = 2;

        repo.create(&purchase("p-1", &["b-1", "b-2"], 3000), &customer)
            .await
            .unwrap();

        let found = repo.get_by_id("p-1").await.unwrap().unwrap();
        assert_eq!(found.book_ids, vec!["b-1", "b-2"]);
        assert_eq!(found.total_cents, 3000);

        let balance = db
            .customers()
            .get_by_id("c-1")
            .await
            .unwrap()
            .unwrap()
            .loyalty_points;
        assert_eq!(balance, 2);
    }

    #[tokio::test]
    async fn test_create_rolls_back_when_customer_missing() {
        let db = seeded_db().await;
        let repo = db.purchases();

        let ghost = Customer::new("ghost", "Nobody", 5);
        let err = repo
            .create(&purchase("p-1", &["b-1"], 1000), &ghost)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));

        // Nothing from the aborted transaction may be visible
        assert!(repo.get_by_id("p-1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_replaces_lines_in_order() {
        let db = seeded_db().await;
        let repo = db.purchases();

        let customer = db.customers().get_by_id("c-1").await.unwrap().unwrap();
        repo.create(&purchase("p-1", &["b-1"], 1000), &customer)
            .await
            .unwrap();

        let mut amended = purchase("p-1", &["b-2", "b-1", "b-2"], 4500);
        amended.updated_at = Utc::now();
        repo.update(&amended, None).await.unwrap();

        let found = repo.get_by_id("p-1").await.unwrap().unwrap();
        assert_eq!(found.book_ids, vec!["b-2", "b-1", "b-2"]);
        assert_eq!(found.total_cents, 4500);
    }

    #[tokio::test]
    async fn test_delete_cascades_lines() {
        let db = seeded_db().await;
        let repo = db.purchases();

        let customer = db.customers().get_by_id("c-1").await.unwrap().unwrap();
        repo.create(&purchase("p-1", &["b-1", "b-1"], 2000), &customer)
            .await
            .unwrap();

        repo.delete("p-1").await.unwrap();
        assert!(repo.get_by_id("p-1").await.unwrap().is_none());

        let orphans: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM purchase_books WHERE purchase_id = 'p-1'")
                .fetch_one(db.pool())
                .await
                .unwrap();
        assert_eq!(orphans, 0);

        let err = repo.delete("p-1").await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
