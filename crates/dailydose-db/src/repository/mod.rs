//! # Repository Module
//!
//! Database repository implementations for the storefront.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  HTTP handler / checkout store                                          │
//! │       │                                                                 │
//! │       │  db.products().get_stock(7)                                     │
//! │       ▼                                                                 │
//! │  ProductRepository                                                      │
//! │  ├── list / get_by_id                                                   │
//! │  ├── insert / update / delete                                           │
//! │  └── get_stock / set_stock                                              │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`](product::ProductRepository) - Menu items and stock
//! - [`OrderRepository`](order::OrderRepository) - Orders and order lines
//! - [`ProfileRepository`](profile::ProfileRepository) - User profiles

pub mod order;
pub mod product;
pub mod profile;
