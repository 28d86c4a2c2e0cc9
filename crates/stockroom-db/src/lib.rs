//! # stockroom-db: Database Layer for Stockroom
//!
//! This crate provides database access for the Stockroom inventory system.
//! It uses SQLite for storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Stockroom Data Flow                            │
//! │                                                                     │
//! │  Delivery layer (list/detail/form views, dashboard, PDF, email)     │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  ┌───────────────────────────────────────────────────────────────┐  │
//! │  │                  stockroom-db (THIS CRATE)                    │  │
//! │  │                                                               │  │
//! │  │  ┌────────────┐   ┌─────────────────┐   ┌─────────────────┐  │  │
//! │  │  │  Database  │   │  Repositories   │   │   Migrations    │  │  │
//! │  │  │ (pool.rs)  │◄──│ product / sale  │   │   (embedded)    │  │  │
//! │  │  │ SqlitePool │   │ customer / ...  │   │ 001_initial...  │  │  │
//! │  │  └────────────┘   └─────────────────┘   └─────────────────┘  │  │
//! │  └───────────────────────────────────────────────────────────────┘  │
//! │       │                                                             │
//! │       ▼                                                             │
//! │                      SQLite database file                           │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (product, customer, sale,
//!   analytics, dashboard)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stockroom_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("stockroom.db")).await?;
//!
//! let low = db.products().low_stock().await?;
//! let outcome = db.sales().attempt_sale(&product_id, 3, None).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::analytics::AnalyticsRepository;
pub use repository::customer::CustomerRepository;
pub use repository::dashboard::DashboardRepository;
pub use repository::product::ProductRepository;
pub use repository::sale::SaleRepository;
