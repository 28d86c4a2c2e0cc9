//! # Dashboard Repository
//!
//! The aggregate counters behind the dashboard view.
//!
//! Every counter is a single scalar query with COALESCE, so an empty store
//! reports zeros instead of NULLs or errors.
//!
//! Revenue joins each sale to its product's *current* unit price - the sale
//! row stores no price snapshot, so the figure is a live view that moves when
//! prices do.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use stockroom_core::DashboardSummary;

/// Repository for the dashboard counters.
#[derive(Debug, Clone)]
pub struct DashboardRepository {
    pool: SqlitePool,
}

impl DashboardRepository {
    /// Creates a new DashboardRepository.
    pub fn new(pool: SqlitePool) -> Self {
        DashboardRepository { pool }
    }

    /// Computes the dashboard counters.
    pub async fn summary(&self) -> DbResult<DashboardSummary> {
        debug!("Computing dashboard summary");

        let total_products: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        let total_quantity_on_hand: i64 =
            sqlx::query_scalar("SELECT COALESCE(SUM(quantity_on_hand), 0) FROM products")
                .fetch_one(&self.pool)
                .await?;

        let total_quantity_sold: i64 =
            sqlx::query_scalar("SELECT COALESCE(SUM(quantity_sold), 0) FROM sales")
                .fetch_one(&self.pool)
                .await?;

        let total_revenue_cents: i64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(p.unit_price_cents * s.quantity_sold), 0) \
             FROM sales s JOIN products p ON p.id = s.product_id",
        )
        .fetch_one(&self.pool)
        .await?;

        let total_customers: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
            .fetch_one(&self.pool)
            .await?;

        Ok(DashboardSummary {
            total_products,
            total_quantity_on_hand,
            total_quantity_sold,
            total_revenue_cents,
            total_customers,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
