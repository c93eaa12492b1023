//! # Daily Dose Storefront
//!
//! HTTP API for the Daily Dose menu, cart, checkout and admin screens.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Storefront Services                             │
//! │                                                                         │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────────┐ │
//! │  │  Menu          │  │  Cart          │  │  Checkout                  │ │
//! │  │                │  │                │  │                            │ │
//! │  │ • search       │  │ • add / update │  │ • validate                 │ │
//! │  │ • stock badge  │  │ • remove/clear │  │ • order → stock → lines    │ │
//! │  │                │  │ • totals       │  │ • receipt / finish         │ │
//! │  └────────────────┘  └────────────────┘  └────────────────────────────┘ │
//! │                                                                         │
//! │  ┌────────────────┐  ┌────────────────┐                                 │
//! │  │  Admin         │  │  Health        │                                 │
//! │  │                │  │                │                                 │
//! │  │ • items CRUD   │  │ • /health      │                                 │
//! │  │ • users/orders │  │                │                                 │
//! │  └────────────────┘  └────────────────┘                                 │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐   │
//! │  │                      Infrastructure                              │   │
//! │  │                                                                  │   │
//! │  │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────────────┐│   │
//! │  │  │  SQLite      │  │ CartSessions │  │    Session tokens        ││   │
//! │  │  │ (dailydose-  │  │ (in memory,  │  │  HS256, verified only    ││   │
//! │  │  │  db)         │  │  per user)   │  │                          ││   │
//! │  │  └──────────────┘  └──────────────┘  └──────────────────────────┘│   │
//! │  └──────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! See [`config`] for the environment variables.

pub mod auth;
pub mod checkout;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;

// Re-exports
pub use config::StorefrontConfig;
pub use error::ApiError;
pub use routes::router;
pub use state::AppState;

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,dailydose=debug,sqlx=warn";

/// Installs the global tracing subscriber.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}
