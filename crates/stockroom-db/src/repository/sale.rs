//! # Sale Repository
//!
//! The sale transaction plus sale queries.
//!
//! ## Sale Attempt Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     attempt_sale(product, qty)                      │
//! │                                                                     │
//! │  BEGIN                                                              │
//! │    │                                                                │
//! │    ▼                                                                │
//! │  UPDATE products                                                    │
//! │    SET quantity_on_hand -= qty, total recomputed                    │
//! │    WHERE id = ? AND quantity_on_hand >= qty   ◄── the stock check   │
//! │    │                                                                │
//! │    ├── 0 rows ──► product missing?  ──► NotFound                    │
//! │    │              not enough stock? ──► Rejected (ROLLBACK)         │
//! │    ▼                                                                │
//! │  INSERT sale row (timestamp stamped here, never rewritten)          │
//! │    │                                                                │
//! │    ▼                                                                │
//! │  COMMIT ──► Committed(sale)                                         │
//! │                                                                     │
//! │  The check and the decrement are ONE statement, so two concurrent   │
//! │  attempts cannot both pass the check - stock never goes negative.   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{Duration, Utc};
use sqlx::SqlitePool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use stockroom_core::validation::validate_quantity_sold;
use stockroom_core::{InsufficientStock, ProductSalesTotal, Sale, SaleOutcome};

const SELECT_SALE: &str =
    "SELECT id, product_id, customer_id, quantity_sold, sale_date FROM sales";

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    // =========================================================================
    // The Sale Transaction
    // =========================================================================

    /// Attempts to record a sale.
    ///
    /// On success the sale row and the product's stock decrement (with its
    /// recomputed total) land in one transaction - both apply or neither.
    /// A request for more units than are on hand is a [`SaleOutcome::Rejected`]
    /// with nothing changed, not an error: the caller renders the refusal.
    ///
    /// ## Arguments
    /// * `product_id` - Product being sold
    /// * `quantity` - Units requested (must be positive)
    /// * `customer_id` - Optional buyer reference
    pub async fn attempt_sale(
        &self,
        product_id: &str,
        quantity: i64,
        customer_id: Option<&str>,
    ) -> DbResult<SaleOutcome> {
        validate_quantity_sold(quantity)?;

        debug!(product_id = %product_id, quantity = %quantity, "Attempting sale");

        let mut tx = self.pool.begin().await?;
        let now = Utc::now();

        // Guarded decrement: check and decrement in one statement. The
        // quantity_on_hand in the total recomputation is the pre-update
        // value, so subtract the sold quantity there as well.
        let updated = sqlx::query(
            "UPDATE products SET \
             quantity_on_hand = quantity_on_hand - ?2, \
             total_price_cents = unit_price_cents * (quantity_on_hand - ?2), \
             updated_at = ?3 \
             WHERE id = ?1 AND quantity_on_hand >= ?2",
        )
        .bind(product_id)
        .bind(quantity)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            // Guard miss: the product is either absent or short on stock.
            let available: Option<i64> =
                sqlx::query_scalar("SELECT quantity_on_hand FROM products WHERE id = ?1")
                    .bind(product_id)
                    .fetch_optional(&mut *tx)
                    .await?;

            // Dropping the transaction rolls back; nothing was written.
            return match available {
                None => Err(DbError::not_found("Product", product_id)),
                Some(available) => {
                    info!(
                        product_id = %product_id,
                        available = %available,
                        requested = %quantity,
                        "Sale rejected: insufficient stock"
                    );
                    Ok(SaleOutcome::Rejected(InsufficientStock {
                        product_id: product_id.to_string(),
                        available,
                        requested: quantity,
                    }))
                }
            };
        }

        let sale = Sale {
            id: Uuid::new_v4().to_string(),
            product_id: product_id.to_string(),
            customer_id: customer_id.map(str::to_string),
            quantity_sold: quantity,
            sale_date: now,
        };

        sqlx::query(
            "INSERT INTO sales (id, product_id, customer_id, quantity_sold, sale_date) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(&sale.id)
        .bind(&sale.product_id)
        .bind(&sale.customer_id)
        .bind(sale.quantity_sold)
        .bind(sale.sale_date)
        .execute(&mut *tx)
        .await?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        info!(sale_id = %sale.id, product_id = %product_id, quantity = %quantity, "Sale committed");

        Ok(SaleOutcome::Committed(sale))
    }

    // =========================================================================
    // CRUD
    // =========================================================================

    /// Gets a sale by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Sale>> {
        let sql = format!("{SELECT_SALE} WHERE id = ?1");
        let sale = sqlx::query_as::<_, Sale>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(sale)
    }

    /// Every sale, grouped by product.
    pub async fn list(&self) -> DbResult<Vec<Sale>> {
        let sql = format!("{SELECT_SALE} ORDER BY product_id, sale_date");
        let sales = sqlx::query_as::<_, Sale>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(sales)
    }

    /// Explicit operator edit of a committed sale.
    ///
    /// Rewrites the quantity and the customer link only. The sale date is
    /// immutable and stock is NOT re-balanced - the decrement happened once,
    /// at commit.
    pub async fn update(&self, sale: &Sale) -> DbResult<()> {
        validate_quantity_sold(sale.quantity_sold)?;

        debug!(id = %sale.id, "Updating sale");

        let result =
            sqlx::query("UPDATE sales SET quantity_sold = ?2, customer_id = ?3 WHERE id = ?1")
                .bind(&sale.id)
                .bind(sale.quantity_sold)
                .bind(&sale.customer_id)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Sale", &sale.id));
        }

        Ok(())
    }

    /// Deletes a sale. Stock is not restored.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting sale");

        let result = sqlx::query("DELETE FROM sales WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Sale", id));
        }

        Ok(())
    }

    // =========================================================================
    // Aggregations
    // =========================================================================

    /// Total units sold across all sales. Zero when there are none.
    pub async fn total_sales(&self) -> DbResult<i64> {
        let total: i64 = sqlx::query_scalar("SELECT COALESCE(SUM(quantity_sold), 0) FROM sales")
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }

    /// Sales within the trailing window, newest first.
    ///
    /// The boundary is inclusive: a sale dated exactly `days` ago (to the
    /// instant) is still inside the window.
    pub async fn recent_sales(&self, days: i64) -> DbResult<Vec<Sale>> {
        let cutoff = Utc::now() - Duration::days(days);

        let sql = format!("{SELECT_SALE} WHERE sale_date >= ?1 ORDER BY sale_date DESC");
        let sales = sqlx::query_as::<_, Sale>(&sql)
            .bind(cutoff)
            .fetch_all(&self.pool)
            .await?;

        Ok(sales)
    }

    /// Units sold per product, smallest totals first.
    pub async fn sales_by_product(&self) -> DbResult<Vec<ProductSalesTotal>> {
        let totals = sqlx::query_as::<_, ProductSalesTotal>(
            "SELECT product_id, SUM(quantity_sold) AS total_sold \
             FROM sales GROUP BY product_id ORDER BY total_sold ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(totals)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
