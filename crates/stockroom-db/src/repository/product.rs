//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Key Operations
//! - CRUD with field validation before any SQL
//! - Stock-tier queries (in stock, low, high, expensive)
//! - Case-insensitive name search
//!
//! ## The Derived Total
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  total_price_cents = unit_price_cents × quantity_on_hand            │
//! │                                                                     │
//! │  Every write path recomputes it:                                    │
//! │    insert ──► computed from the new fields                          │
//! │    update ──► recomputed from the incoming fields                   │
//! │    sale   ──► recomputed inside the sale transaction                │
//! │                                                                     │
//! │  It is never accepted from the caller as an independent value.      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use stockroom_core::validation::validate_product_fields;
use stockroom_core::{
    NewProduct, Product, EXPENSIVE_UNIT_PRICE_CENTS, HIGH_STOCK_MIN, LOW_STOCK_MAX,
};

/// Shared SELECT list so every query decodes the same shape.
const SELECT_PRODUCT: &str = "SELECT id, name, description, unit_price_cents, quantity_on_hand, \
     total_price_cents, image_path, created_at, updated_at FROM products";

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let low = repo.low_stock().await?;
/// let hits = repo.search("stapler").await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    // =========================================================================
    // CRUD
    // =========================================================================

    /// Inserts a new product.
    ///
    /// Validates the fields, assigns an id and timestamps, and computes the
    /// derived total. A validation failure applies nothing.
    pub async fn insert(&self, new: NewProduct) -> DbResult<Product> {
        validate_product_fields(
            &new.name,
            &new.description,
            new.unit_price_cents,
            new.quantity_on_hand,
        )?;

        let now = Utc::now();
        let mut product = Product {
            id: Uuid::new_v4().to_string(),
            name: new.name,
            description: new.description,
            unit_price_cents: new.unit_price_cents,
            quantity_on_hand: new.quantity_on_hand,
            total_price_cents: 0,
            image_path: new.image_path,
            created_at: now,
            updated_at: now,
        };
        product.recompute_total_price();

        debug!(id = %product.id, name = %product.name, "Inserting product");

        sqlx::query(
            "INSERT INTO products (id, name, description, unit_price_cents, quantity_on_hand, \
             total_price_cents, image_path, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.unit_price_cents)
        .bind(product.quantity_on_hand)
        .bind(product.total_price_cents)
        .bind(&product.image_path)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(product)
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let sql = format!("{SELECT_PRODUCT} WHERE id = ?1");
        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    /// Updates an existing product's writable fields.
    ///
    /// The derived total is recomputed from the incoming unit price and
    /// quantity; whatever the caller put in `total_price_cents` is ignored.
    ///
    /// ## Returns
    /// * `Ok(Product)` - the stored row after the write
    /// * `Err(DbError::NotFound)` - Product doesn't exist
    pub async fn update(&self, product: &Product) -> DbResult<Product> {
        validate_product_fields(
            &product.name,
            &product.description,
            product.unit_price_cents,
            product.quantity_on_hand,
        )?;

        debug!(id = %product.id, "Updating product");

        let now = Utc::now();
        let total_price_cents = product.unit_price_cents * product.quantity_on_hand;

        let result = sqlx::query(
            "UPDATE products SET name = ?2, description = ?3, unit_price_cents = ?4, \
             quantity_on_hand = ?5, total_price_cents = ?6, image_path = ?7, updated_at = ?8 \
             WHERE id = ?1",
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.unit_price_cents)
        .bind(product.quantity_on_hand)
        .bind(total_price_cents)
        .bind(&product.image_path)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", &product.id));
        }

        let mut stored = product.clone();
        stored.total_price_cents = total_price_cents;
        stored.updated_at = now;
        Ok(stored)
    }

    /// Deletes a product.
    ///
    /// Sales and analytics rollups referencing it go with it (CASCADE).
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Counts all products.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    // =========================================================================
    // Listings
    // =========================================================================

    /// Every product, ordered by name. Feeds the dashboard charts and the
    /// stock report.
    pub async fn list_all(&self) -> DbResult<Vec<Product>> {
        let sql = format!("{SELECT_PRODUCT} ORDER BY name");
        let products = sqlx::query_as::<_, Product>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(products)
    }

    /// The default catalog listing: products with units on hand, by name.
    ///
    /// Zero-stock products are deliberately absent here - the catalog view
    /// only shows what can be sold. Use [`list_all`](Self::list_all) for the
    /// complete set.
    pub async fn list_stocked(&self) -> DbResult<Vec<Product>> {
        let sql = format!("{SELECT_PRODUCT} WHERE quantity_on_hand > 0 ORDER BY name");
        let products = sqlx::query_as::<_, Product>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(products)
    }

    // =========================================================================
    // Stock Tiers
    // =========================================================================

    /// Products with any units on hand.
    pub async fn in_stock(&self) -> DbResult<Vec<Product>> {
        let sql = format!("{SELECT_PRODUCT} WHERE quantity_on_hand > 0 ORDER BY name");
        let products = sqlx::query_as::<_, Product>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(products)
    }

    /// Products running low: more than zero, at most [`LOW_STOCK_MAX`] units.
    pub async fn low_stock(&self) -> DbResult<Vec<Product>> {
        let sql = format!(
            "{SELECT_PRODUCT} WHERE quantity_on_hand > 0 AND quantity_on_hand <= ?1 ORDER BY name"
        );
        let products = sqlx::query_as::<_, Product>(&sql)
            .bind(LOW_STOCK_MAX)
            .fetch_all(&self.pool)
            .await?;

        Ok(products)
    }

    /// Products with at least [`HIGH_STOCK_MIN`] units on hand.
    pub async fn high_stock(&self) -> DbResult<Vec<Product>> {
        let sql = format!("{SELECT_PRODUCT} WHERE quantity_on_hand >= ?1 ORDER BY name");
        let products = sqlx::query_as::<_, Product>(&sql)
            .bind(HIGH_STOCK_MIN)
            .fetch_all(&self.pool)
            .await?;

        Ok(products)
    }

    /// Products priced above [`EXPENSIVE_UNIT_PRICE_CENTS`].
    pub async fn expensive(&self) -> DbResult<Vec<Product>> {
        let sql = format!("{SELECT_PRODUCT} WHERE unit_price_cents > ?1 ORDER BY name");
        let products = sqlx::query_as::<_, Product>(&sql)
            .bind(EXPENSIVE_UNIT_PRICE_CENTS)
            .fetch_all(&self.pool)
            .await?;

        Ok(products)
    }

    // =========================================================================
    // Search
    // =========================================================================

    /// Case-insensitive substring search on the product name.
    pub async fn search(&self, query: &str) -> DbResult<Vec<Product>> {
        let query = query.trim();

        debug!(query = %query, "Searching products");

        let pattern = format!("%{}%", query);
        let sql = format!("{SELECT_PRODUCT} WHERE name LIKE ?1 ORDER BY name");
        let products = sqlx::query_as::<_, Product>(&sql)
            .bind(pattern)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = products.len(), "Search returned products");
        Ok(products)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::testing;

    fn new_product(name: &str, unit_price_cents: i64, quantity_on_hand: i64) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            description: format!("{name} description"),
            unit_price_cents,
            quantity_on_hand,
            image_path: None,
        }
    }

    #[tokio::test]
    async fn test_insert_computes_derived_total() {
        let db = testing::database().await;

        let product = db
            .products()
            .insert(new_product("Stapler", 1250, 4))
            .await
            .unwrap();

        assert_eq!(product.total_price_cents, 5000);

        let stored = db.products().get_by_id(&product.id).await.unwrap().unwrap();
        assert_eq!(stored.total_price_cents, 5000);
        assert_eq!(stored.name, "Stapler");
    }

    #[tokio::test]
    async fn test_insert_rejects_invalid_fields_without_writing() {
        let db = testing::database().await;

        let err = db
            .products()
            .insert(new_product("Stapler", -1, 4))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));

        let err = db
            .products()
            .insert(new_product("", 100, 4))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));

        assert_eq!(db.products().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_update_recomputes_total_and_ignores_caller_total() {
        let db = testing::database().await;

        let mut product = db
            .products()
            .insert(new_product("Stapler", 1250, 4))
            .await
            .unwrap();

        product.unit_price_cents = 200;
        product.quantity_on_hand = 10;
        product.total_price_cents = 999_999; // must be ignored

        let stored = db.products().update(&product).await.unwrap();
        assert_eq!(stored.total_price_cents, 2000);

        let fetched = db.products().get_by_id(&product.id).await.unwrap().unwrap();
        assert_eq!(fetched.total_price_cents, 2000);
    }

    #[tokio::test]
    async fn test_update_missing_product_is_not_found() {
        let db = testing::database().await;

        let mut ghost = db
            .products()
            .insert(new_product("Ghost", 100, 1))
            .await
            .unwrap();
        db.products().delete(&ghost.id).await.unwrap();

        ghost.name = "Still Ghost".to_string();
        let err = db.products().update(&ghost).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_low_stock_boundaries() {
        let db = testing::database().await;
        let repo = db.products();

        repo.insert(new_product("Zero", 100, 0)).await.unwrap();
        repo.insert(new_product("One", 100, 1)).await.unwrap();
        repo.insert(new_product("Ten", 100, 10)).await.unwrap();
        repo.insert(new_product("Eleven", 100, 11)).await.unwrap();

        let low: Vec<String> = repo
            .low_stock()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();

        assert_eq!(low, vec!["One", "Ten"]);
    }

    #[tokio::test]
    async fn test_high_stock_and_expensive_tiers() {
        let db = testing::database().await;
        let repo = db.products();

        repo.insert(new_product("FortyNine", 100, 49)).await.unwrap();
        repo.insert(new_product("Fifty", 100, 50)).await.unwrap();
        repo.insert(new_product("Cheap", 200_00, 1)).await.unwrap();
        repo.insert(new_product("Dear", 200_01, 1)).await.unwrap();

        let high: Vec<String> = repo
            .high_stock()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(high, vec!["Fifty"]);

        let pricey: Vec<String> = repo
            .expensive()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(pricey, vec!["Dear"]);
    }

    #[tokio::test]
    async fn test_stocked_listing_excludes_zero_stock() {
        let db = testing::database().await;
        let repo = db.products();

        repo.insert(new_product("Gone", 100, 0)).await.unwrap();
        repo.insert(new_product("Here", 100, 3)).await.unwrap();

        let stocked: Vec<String> = repo
            .list_stocked()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(stocked, vec!["Here"]);

        // list_all still sees everything
        assert_eq!(repo.list_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_substring() {
        let db = testing::database().await;
        let repo = db.products();

        repo.insert(new_product("Blue Stapler", 100, 1)).await.unwrap();
        repo.insert(new_product("Red Tape", 100, 1)).await.unwrap();

        let hits = repo.search("STAPLE").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Blue Stapler");

        assert!(repo.search("pler").await.unwrap().len() == 1);
        assert!(repo.search("missing").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_queries_tolerate_empty_store() {
        let db = testing::database().await;
        let repo = db.products();

        assert!(repo.list_all().await.unwrap().is_empty());
        assert!(repo.in_stock().await.unwrap().is_empty());
        assert!(repo.low_stock().await.unwrap().is_empty());
        assert!(repo.high_stock().await.unwrap().is_empty());
        assert!(repo.expensive().await.unwrap().is_empty());
        assert_eq!(repo.count().await.unwrap(), 0);
    }
}
