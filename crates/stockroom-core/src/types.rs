//! # Domain Types
//!
//! Core domain types used throughout Stockroom.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                │
//! │                                                                     │
//! │  ┌────────────────┐   ┌────────────────┐   ┌────────────────┐      │
//! │  │    Product     │   │      Sale      │   │   Analytics    │      │
//! │  │  ────────────  │   │  ────────────  │   │  ────────────  │      │
//! │  │  id (UUID)     │◄──┤  product_id    │   │  product_id    │      │
//! │  │  unit_price    │   │  quantity_sold │   │  sales_count   │      │
//! │  │  qty_on_hand   │   │  sale_date     │   │  revenue       │      │
//! │  │  total_price*  │   │  customer_id ─────┐└────────────────┘      │
//! │  └────────────────┘   └────────────────┘  │                        │
//! │                                           ▼                        │
//! │  (*) derived = unit_price ×    ┌────────────────┐                  │
//! │      qty_on_hand, recomputed   │    Customer    │                  │
//! │      on every mutation         │  email (uniq)  │                  │
//! │                                └────────────────┘                  │
//! │                                                                    │
//! │  product ──► sale       deletes CASCADE (sale owned by product)    │
//! │  product ──► analytics  deletes CASCADE                            │
//! │  customer ──► sale      deletes DETACH (customer_id cleared)       │
//! └────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::InsufficientStock;
use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A product tracked by the inventory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name.
    pub name: String,

    /// Free-text description.
    pub description: String,

    /// Unit price in cents (smallest currency unit). Never negative.
    pub unit_price_cents: i64,

    /// Units currently on hand. Never negative.
    pub quantity_on_hand: i64,

    /// Derived inventory value: unit_price_cents × quantity_on_hand.
    /// Recomputed by the storage layer on every mutation; never settable
    /// on its own.
    pub total_price_cents: i64,

    /// Opaque handle to the product image (served by the web layer).
    pub image_path: Option<String>,

    /// When the product was created.
    pub created_at: DateTime<Utc>,

    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the unit price as a Money type.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Returns the derived inventory value as a Money type.
    #[inline]
    pub fn total_price(&self) -> Money {
        Money::from_cents(self.total_price_cents)
    }

    /// Recomputes the derived inventory value from the current unit price
    /// and on-hand quantity.
    #[inline]
    pub fn recompute_total_price(&mut self) {
        self.total_price_cents = self.unit_price_cents * self.quantity_on_hand;
    }

    /// Checks whether a requested sale quantity can be fulfilled from the
    /// units currently on hand.
    #[inline]
    pub fn can_fulfill(&self, quantity: i64) -> bool {
        quantity <= self.quantity_on_hand
    }
}

/// Input for creating a product. The storage layer assigns the id and
/// timestamps and computes the derived total.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub unit_price_cents: i64,
    pub quantity_on_hand: i64,
    pub image_path: Option<String>,
}

// =============================================================================
// Customer
// =============================================================================

/// A customer. Name, phone, and address may be blank; only the email is
/// required, and it is unique across all customers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Customer {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Customer {
    /// "Last First" display form used by listings.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.last_name, self.first_name)
            .trim()
            .to_string()
    }
}

/// Input for creating a customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub address: String,
}

// =============================================================================
// Sale
// =============================================================================

/// A recorded sale of one product.
///
/// Sales are owned by their product (deleting the product deletes its sales)
/// and optionally reference a customer (deleting the customer clears the
/// reference, the sale survives). `sale_date` is stamped once at commit and
/// never rewritten.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Sale {
    pub id: String,
    pub product_id: String,
    pub customer_id: Option<String>,
    /// Units sold. Always positive.
    pub quantity_sold: i64,
    pub sale_date: DateTime<Utc>,
}

// =============================================================================
// Sale Outcome
// =============================================================================

/// Result of a sale attempt.
///
/// A rejection is a normal, expected outcome - not a storage error - so the
/// caller can render the specific refusal instead of a generic failure page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SaleOutcome {
    /// The sale was persisted and the product's stock decremented, atomically.
    Committed(Sale),
    /// The requested quantity exceeded the units on hand; nothing changed.
    Rejected(InsufficientStock),
}

impl SaleOutcome {
    /// True when the attempt committed.
    #[inline]
    pub fn is_committed(&self) -> bool {
        matches!(self, SaleOutcome::Committed(_))
    }

    /// Returns the committed sale, if any.
    pub fn committed(self) -> Option<Sale> {
        match self {
            SaleOutcome::Committed(sale) => Some(sale),
            SaleOutcome::Rejected(_) => None,
        }
    }
}

// =============================================================================
// Analytics
// =============================================================================

/// A denormalized per-product sales rollup.
///
/// Populated by an operator or reporting job; nothing in the core recomputes
/// it from sale activity. Exists to support the ranking queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Analytics {
    pub id: String,
    pub product_id: String,
    /// Number of sales counted into this rollup. Never negative.
    pub sales_count: i64,
    /// Revenue attributed to this rollup, in cents.
    pub revenue_cents: i64,
}

impl Analytics {
    /// Returns the rollup revenue as a Money type.
    #[inline]
    pub fn revenue(&self) -> Money {
        Money::from_cents(self.revenue_cents)
    }
}

/// Input for creating an analytics rollup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAnalytics {
    pub product_id: String,
    pub sales_count: i64,
    pub revenue_cents: i64,
}

// =============================================================================
// Aggregation Rows
// =============================================================================

/// Per-product sales total, as returned by the sales-by-product grouping.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ProductSalesTotal {
    pub product_id: String,
    pub total_sold: i64,
}

/// The dashboard counters.
///
/// Revenue is computed from each sale's *current* product price - there is no
/// price snapshot on the sale row, so the figure is a live view rather than a
/// historical ledger.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_products: i64,
    pub total_quantity_on_hand: i64,
    pub total_quantity_sold: i64,
    pub total_revenue_cents: i64,
    pub total_customers: i64,
}

impl DashboardSummary {
    /// Returns the revenue counter as a Money type.
    #[inline]
    pub fn total_revenue(&self) -> Money {
        Money::from_cents(self.total_revenue_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
