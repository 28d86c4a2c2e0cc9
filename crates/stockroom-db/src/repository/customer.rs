//! # Customer Repository
//!
//! Database operations for customers.
//!
//! The email is the one hard constraint: required, format-checked, and
//! globally unique (the schema's UNIQUE index backs it). Everything else may
//! be blank.
//!
//! Deleting a customer never deletes their sales - the schema's
//! ON DELETE SET NULL clears the reference and the sale history survives.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use stockroom_core::validation::validate_customer_fields;
use stockroom_core::{Customer, NewCustomer};

const SELECT_CUSTOMER: &str = "SELECT id, first_name, last_name, email, phone_number, address, \
     created_at, updated_at FROM customers";

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

    // =========================================================================
    // CRUD
    // =========================================================================

    /// Inserts a new customer.
    ///
    /// ## Returns
    /// * `Ok(Customer)` - Inserted customer
    /// * `Err(DbError::UniqueViolation)` - Email already exists
    pub async fn insert(&self, new: NewCustomer) -> DbResult<Customer> {
        validate_customer_fields(&new.first_name, &new.last_name, &new.email, &new.phone_number)?;

        let now = Utc::now();
        let customer = Customer {
            id: Uuid::new_v4().to_string(),
            first_name: new.first_name,
            last_name: new.last_name,
            email: new.email,
            phone_number: new.phone_number,
            address: new.address,
            created_at: now,
            updated_at: now,
        };

        debug!(id = %customer.id, email = %customer.email, "Inserting customer");

        sqlx::query(
            "INSERT INTO customers (id, first_name, last_name, email, phone_number, address, \
             created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )
        .bind(&customer.id)
        .bind(&customer.first_name)
        .bind(&customer.last_name)
        .bind(&customer.email)
        .bind(&customer.phone_number)
        .bind(&customer.address)
        .bind(customer.created_at)
        .bind(customer.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(customer)
    }

    /// Gets a customer by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Customer>> {
        let sql = format!("{SELECT_CUSTOMER} WHERE id = ?1");
        let customer = sqlx::query_as::<_, Customer>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(customer)
    }

    /// Updates an existing customer.
    pub async fn update(&self, customer: &Customer) -> DbResult<()> {
        validate_customer_fields(
            &customer.first_name,
            &customer.last_name,
            &customer.email,
            &customer.phone_number,
        )?;

        debug!(id = %customer.id, "Updating customer");

        let now = Utc::now();

        let result = sqlx::query(
            "UPDATE customers SET first_name = ?2, last_name = ?3, email = ?4, \
             phone_number = ?5, address = ?6, updated_at = ?7 WHERE id = ?1",
        )
        .bind(&customer.id)
        .bind(&customer.first_name)
        .bind(&customer.last_name)
        .bind(&customer.email)
        .bind(&customer.phone_number)
        .bind(&customer.address)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Customer", &customer.id));
        }

        Ok(())
    }

    /// Deletes a customer.
    ///
    /// Past sales survive with their customer reference cleared.
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

    /// Counts all customers.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    // =========================================================================
    // Listings & Searches
    // =========================================================================

    /// Every customer, ordered by first then last name.
    pub async fn list(&self) -> DbResult<Vec<Customer>> {
        let sql = format!("{SELECT_CUSTOMER} ORDER BY first_name, last_name");
        let customers = sqlx::query_as::<_, Customer>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(customers)
    }

    /// Customers with at least one sale referencing an existing product.
    pub async fn with_sales(&self) -> DbResult<Vec<Customer>> {
        let customers = sqlx::query_as::<_, Customer>(
            "SELECT DISTINCT c.id, c.first_name, c.last_name, c.email, c.phone_number, \
             c.address, c.created_at, c.updated_at \
             FROM customers c \
             JOIN sales s ON s.customer_id = c.id \
             JOIN products p ON p.id = s.product_id \
             ORDER BY c.first_name, c.last_name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(customers)
    }

    /// Case-insensitive substring search on the email address.
    pub async fn search_by_email(&self, query: &str) -> DbResult<Vec<Customer>> {
        debug!(query = %query, "Searching customers by email");

        let pattern = format!("%{}%", query.trim());
        let sql = format!("{SELECT_CUSTOMER} WHERE email LIKE ?1 ORDER BY first_name, last_name");
        let customers = sqlx::query_as::<_, Customer>(&sql)
            .bind(pattern)
            .fetch_all(&self.pool)
            .await?;

        Ok(customers)
    }

    /// Case-insensitive substring search on the first name.
    pub async fn search_by_name(&self, query: &str) -> DbResult<Vec<Customer>> {
        debug!(query = %query, "Searching customers by name");

        let pattern = format!("%{}%", query.trim());
        let sql =
            format!("{SELECT_CUSTOMER} WHERE first_name LIKE ?1 ORDER BY first_name, last_name");
        let customers = sqlx::query_as::<_, Customer>(&sql)
            .bind(pattern)
            .fetch_all(&self.pool)
            .await?;

        Ok(customers)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::testing;
    use stockroom_core::NewProduct;

    fn new_customer(first: &str, last: &str, email: &str) -> NewCustomer {
        NewCustomer {
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: email.to_string(),
            phone_number: String::new(),
            address: String::new(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_fetch() {
        let db = testing::database().await;

        let customer = db
            .customers()
            .insert(new_customer("Ada", "Lovelace", "ada@example.com"))
            .await
            .unwrap();

        let stored = db
            .customers()
            .get_by_id(&customer.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.email, "ada@example.com");
        assert_eq!(stored.display_name(), "Lovelace Ada");
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected_store_unchanged() {
        let db = testing::database().await;
        let repo = db.customers();

        repo.insert(new_customer("Ada", "Lovelace", "ada@example.com"))
            .await
            .unwrap();
        let before = repo.count().await.unwrap();

        let err = repo
            .insert(new_customer("Other", "Person", "ada@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));

        assert_eq!(repo.count().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_invalid_email_rejected_before_sql() {
        let db = testing::database().await;

        let err = db
            .customers()
            .insert(new_customer("Ada", "Lovelace", "not-an-email"))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));
        assert_eq!(db.customers().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_searches_are_case_insensitive() {
        let db = testing::database().await;
        let repo = db.customers();

        repo.insert(new_customer("Ada", "Lovelace", "ada@example.com"))
            .await
            .unwrap();
        repo.insert(new_customer("Grace", "Hopper", "grace@example.com"))
            .await
            .unwrap();

        let by_email = repo.search_by_email("ADA@").await.unwrap();
        assert_eq!(by_email.len(), 1);
        assert_eq!(by_email[0].first_name, "Ada");

        let by_name = repo.search_by_name("gra").await.unwrap();
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].first_name, "Grace");

        assert!(repo.search_by_name("nobody").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_with_sales_filters_to_buyers() {
        let db = testing::database().await;

        let buyer = db
            .customers()
            .insert(new_customer("Ada", "Lovelace", "ada@example.com"))
            .await
            .unwrap();
        db.customers()
            .insert(new_customer("Grace", "Hopper", "grace@example.com"))
            .await
            .unwrap();

        let product = db
            .products()
            .insert(NewProduct {
                name: "Stapler".to_string(),
                description: "red".to_string(),
                unit_price_cents: 100,
                quantity_on_hand: 10,
                image_path: None,
            })
            .await
            .unwrap();

        let outcome = db
            .sales()
            .attempt_sale(&product.id, 2, Some(&buyer.id))
            .await
            .unwrap();
        assert!(outcome.is_committed());

        let buyers = db.customers().with_sales().await.unwrap();
        assert_eq!(buyers.len(), 1);
        assert_eq!(buyers[0].id, buyer.id);
    }

    #[tokio::test]
    async fn test_with_sales_empty_store() {
        let db = testing::database().await;
        assert!(db.customers().with_sales().await.unwrap().is_empty());
    }
}
