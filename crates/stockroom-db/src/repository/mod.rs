//! # Repository Module
//!
//! Database repository implementations for Stockroom.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  Each repository is a stateless module of query functions over the  │
//! │  shared pool handle - no collection-wide singleton holds behavior.  │
//! │                                                                     │
//! │  Web view                                                           │
//! │       │  db.products().low_stock()                                  │
//! │       ▼                                                             │
//! │  ProductRepository                                                  │
//! │  ├── insert / get_by_id / update / delete                           │
//! │  ├── stock-tier queries (in_stock, low_stock, high_stock, ...)      │
//! │  └── search                                                         │
//! │       │  SQL                                                        │
//! │       ▼                                                             │
//! │  SQLite database                                                    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`product::ProductRepository`] - Product CRUD, stock tiers, search
//! - [`customer::CustomerRepository`] - Customer CRUD and searches
//! - [`sale::SaleRepository`] - The sale transaction plus sale queries
//! - [`analytics::AnalyticsRepository`] - Rollup CRUD and ranking queries
//! - [`dashboard::DashboardRepository`] - Aggregate counters

pub mod analytics;
pub mod customer;
pub mod dashboard;
pub mod product;
pub mod sale;
