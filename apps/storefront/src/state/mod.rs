//! # State Module
//!
//! Shared state handed to every handler through axum's `State` extractor.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  Router::new()...with_state(AppState)                                   │
//! │                              │                                          │
//! │      ┌───────────────┬───────┴───────┬────────────────┐                 │
//! │      ▼               ▼               ▼                ▼                 │
//! │  ┌──────────┐  ┌──────────────┐  ┌──────────┐  ┌───────────────┐        │
//! │  │ Database │  │ CartSessions │  │JwtManager│  │StorefrontConf │        │
//! │  │ (SQLite  │  │ Arc<Mutex<   │  │ (shared  │  │ pricing,      │        │
//! │  │  pool)   │  │  HashMap>>   │  │  secret) │  │ line policy   │        │
//! │  └──────────┘  └──────────────┘  └──────────┘  └───────────────┘        │
//! │                                                                         │
//! │  THREAD SAFETY:                                                         │
//! │  • Database: internal connection pool                                   │
//! │  • CartSessions: one mutex, never held across an await                  │
//! │  • JwtManager / config: read-only after startup                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;

use std::sync::Arc;

use dailydose_db::Database;

use crate::auth::JwtManager;
use crate::config::StorefrontConfig;

pub use cart::CartSessions;

/// Shared application state. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub carts: CartSessions,
    pub jwt: Arc<JwtManager>,
    pub config: Arc<StorefrontConfig>,
}

impl AppState {
    pub fn new(db: Database, config: StorefrontConfig) -> Self {
        AppState {
            db,
            carts: CartSessions::new(),
            jwt: Arc::new(JwtManager::new(config.session_secret.clone())),
            config: Arc::new(config),
        }
    }
}
