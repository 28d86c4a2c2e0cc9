//! # stockroom-core: Pure Domain Logic for Stockroom
//!
//! This crate is the **heart** of Stockroom, a small inventory-management
//! system. It contains the entity vocabulary and every domain rule as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Stockroom Architecture                          │
//! │                                                                     │
//! │  ┌───────────────────────────────────────────────────────────────┐  │
//! │  │            Delivery (web UI, email, PDF export)               │  │
//! │  │     list/detail/form screens ──► dashboard ──► reports        │  │
//! │  └──────────────────────────────┬────────────────────────────────┘  │
//! │                                 │                                   │
//! │  ┌──────────────────────────────▼────────────────────────────────┐  │
//! │  │              ★ stockroom-core (THIS CRATE) ★                  │  │
//! │  │                                                               │  │
//! │  │   ┌─────────┐ ┌─────────┐ ┌────────────┐ ┌────────────────┐  │  │
//! │  │   │  types  │ │  money  │ │ validation │ │ report / email │  │  │
//! │  │   │ Product │ │  Money  │ │   rules    │ │  seams for     │  │  │
//! │  │   │  Sale   │ │ (cents) │ │   checks   │ │  collaborators │  │  │
//! │  │   └─────────┘ └─────────┘ └────────────┘ └────────────────┘  │  │
//! │  │                                                               │  │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS          │  │
//! │  └──────────────────────────────┬────────────────────────────────┘  │
//! │                                 │                                   │
//! │  ┌──────────────────────────────▼────────────────────────────────┐  │
//! │  │                stockroom-db (Storage Layer)                   │  │
//! │  │           SQLite queries, migrations, repositories            │  │
//! │  └───────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Customer, Sale, Analytics, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Field-level validation errors
//! - [`validation`] - Business rule validation
//! - [`report`] - Tabular stock report and chart series for delivery layers
//! - [`email`] - Notification message type and the mailer seam
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod email;
pub mod error;
pub mod money;
pub mod report;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use stockroom_core::Money` instead of
// `use stockroom_core::money::Money`

pub use email::{EmailMessage, Mailer, SendError};
pub use error::{InsufficientStock, ValidationError};
pub use money::Money;
pub use report::{ChartSeries, StockReport};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Upper bound (inclusive) of the low-stock tier.
///
/// A product with `0 < quantity_on_hand <= LOW_STOCK_MAX` is running low and
/// shows up on the replenishment views.
pub const LOW_STOCK_MAX: i64 = 10;

/// Lower bound (inclusive) of the high-stock tier.
pub const HIGH_STOCK_MIN: i64 = 50;

/// Unit price (in cents) above which a product counts as expensive.
pub const EXPENSIVE_UNIT_PRICE_CENTS: i64 = 200_00;

/// On-hand ceiling (inclusive) for the analytics low-inventory band.
pub const ANALYTICS_LOW_INVENTORY_MAX: i64 = 30;

/// On-hand floor (inclusive) for the analytics high-inventory band.
pub const ANALYTICS_HIGH_INVENTORY_MIN: i64 = 100;

/// Default trailing window, in days, for the recent-sales query.
pub const RECENT_SALES_DAYS: i64 = 30;

/// Default row cap for the analytics ranking queries.
pub const RANKING_DEFAULT_LIMIT: i64 = 10;
