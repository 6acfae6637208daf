//! # Customer Repository
//!
//! Database operations for customers.
//!
//! The loyalty-point column is written through two paths only: the explicit
//! customer update here, and the purchase transaction in the purchase
//! repository, which persists the settlement result atomically with the
//! purchase itself.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use folio_core::Customer;

/// Row shape of the `customers` table.
#[derive(Debug, Clone, sqlx::FromRow)]
struct CustomerRow {
    id: String,
    name: String,
    loyalty_points: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Customer {
            id: row.id,
            name: row.name,
            loyalty_points: row.loyalty_points,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const SELECT_CUSTOMER: &str =
    "SELECT id, name, loyalty_points, created_at, updated_at FROM customers";

/// Repository for customer database operations.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }

    /// Inserts a customer.
    pub async fn insert(&self, customer: &Customer) -> DbResult<()> {
        debug!(id = %customer.id, name = %customer.name, "Inserting customer");

        sqlx::query(
            r#"
            INSERT INTO customers (id, name, loyalty_points, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&customer.id)
        .bind(&customer.name)
        .bind(customer.loyalty_points)
        .bind(customer.created_at)
        .bind(customer.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets a customer by ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Customer))` - Customer found
    /// * `Ok(None)` - Customer not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Customer>> {
        let row: Option<CustomerRow> =
            sqlx::query_as(&format!("{SELECT_CUSTOMER} WHERE id = ?1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(Customer::from))
    }

    /// Lists all customers, oldest first.
    pub async fn list_all(&self) -> DbResult<Vec<Customer>> {
        let rows: Vec<CustomerRow> =
            sqlx::query_as(&format!("{SELECT_CUSTOMER} ORDER BY created_at, id"))
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(Customer::from).collect())
    }

    /// Updates a customer's name and balance.
    pub async fn update(&self, customer: &Customer) -> DbResult<()> {
        debug!(id = %customer.id, "Updating customer");

        let result = sqlx::query(
            r#"
            UPDATE customers SET
                name = ?2,
                loyalty_points = ?3,
                updated_at = ?4
            WHERE id = ?1
            "#,
        )
        .bind(&customer.id)
        .bind(&customer.name)
        .bind(customer.loyalty_points)
        .bind(customer.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Customer", &customer.id));
        }

        Ok(())
    }

    /// Deletes a customer.
    ///
    /// Fails with a foreign-key violation if the customer still owns
    /// purchases.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting customer");

        let result = sqlx::query("DELETE FROM customers WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Customer", id));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    #[tokio::test]
    async fn test_customer_crud() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.customers();

        let mut customer = Customer::new("c-1", "Ada", 0);
        repo.insert(&customer).await.unwrap();

        let found = repo.get_by_id("c-1").await.unwrap().unwrap();
        assert_eq!(found.name, "Ada");
        assert_eq!(found.loyalty_points, 0);

        customer.loyalty_points = 7;
        customer.name = "Ada L.".to_string();
        repo.update(&customer).await.unwrap();

        let found = repo.get_by_id("c-1").await.unwrap().unwrap();
        assert_eq!(found.name, "Ada L.");
        assert_eq!(found.loyalty_points, 7);

        assert_eq!(repo.list_all().await.unwrap().len(), 1);

        repo.delete("c-1").await.unwrap();
        assert!(repo.get_by_id("c-1").await.unwrap().is_none());

        let err = repo.update(&customer).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
