//! # Customer Service
//!
//! Customer CRUD. The loyalty balance is normally advanced by the purchase
//! path; the update operation here sets it directly, which is how manual
//! corrections are made.

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{ServiceError, ServiceResult};
use folio_core::validation::{validate_customer_name, validate_loyalty_points};
use folio_core::Customer;
use folio_db::Database;

/// Customer registry operations.
#[derive(Debug, Clone)]
pub struct CustomerService {
    db: Database,
}

impl CustomerService {
    /// Creates a new CustomerService.
    pub fn new(db: Database) -> Self {
        CustomerService { db }
    }

    /// Lists all customers.
    pub async fn list_customers(&self) -> ServiceResult<Vec<Customer>> {
        Ok(self.db.customers().list_all().await?)
    }

    /// Gets a customer by id.
    pub async fn get_customer(&self, id: &str) -> ServiceResult<Customer> {
        self.db
            .customers()
            .get_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::CustomerNotFound(id.to_string()))
    }

    /// Registers a customer.
    pub async fn create_customer(&self, name: &str, loyalty_points: i64) -> ServiceResult<Customer> {
        validate_customer_name(name)?;
        validate_loyalty_points(loyalty_points)?;

        let customer = Customer::new(Uuid::new_v4().to_string(), name.trim(), loyalty_points);

        self.db.customers().insert(&customer).await?;

        info!(customer_id = %customer.id, name = %customer.name, "Customer created");

        Ok(customer)
    }

    /// Updates a customer's name and loyalty balance.
    pub async fn update_customer(
        &self,
        id: &str,
        name: &str,
        loyalty_points: i64,
    ) -> ServiceResult<Customer> {
        validate_customer_name(name)?;
        validate_loyalty_points(loyalty_points)?;

        let mut customer = self.get_customer(id).await?;

        customer.name = name.trim().to_string();
        customer.loyalty_points = loyalty_points;
        customer.updated_at = Utc::now();

        self.db.customers().update(&customer).await?;

        debug!(customer_id = %customer.id, "Customer updated");

        Ok(customer)
    }

    /// Removes a customer.
    ///
    /// Fails at the storage layer if the customer still owns purchases.
    pub async fn delete_customer(&self, id: &str) -> ServiceResult<()> {
        let customer = self.get_customer(id).await?;

        self.db.customers().delete(&customer.id).await?;

        info!(customer_id = %customer.id, "Customer deleted");

        Ok(())
    }
}
