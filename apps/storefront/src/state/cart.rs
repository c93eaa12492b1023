//! # Cart Sessions
//!
//! One cart per signed-in session, keyed by the session subject.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Session Operations                              │
//! │                                                                         │
//! │  HTTP Request              Handler                 Cart Change          │
//! │  ────────────              ───────                 ───────────          │
//! │                                                                         │
//! │  POST   /api/cart/items ──► add_item() ──────────► cart.add(product)    │
//! │  PUT    /api/cart/items ──► update_item() ───────► qty = n (≤0 removes) │
//! │  DELETE /api/cart/items ──► remove_item() ───────► cart.remove(id)      │
//! │  DELETE /api/cart ────────► clear_cart() ────────► cart.clear()         │
//! │  POST   /api/checkout/finish ────────────────────► cart dropped         │
//! │  GET    /api/cart ────────► get_cart() ──────────► (read only)          │
//! │                                                                         │
//! │  A cart that ends up empty is dropped. Carts of expired sessions are    │
//! │  swept on every write.                                                  │
//! │                                                                         │
//! │  NOTE: the lock is taken inside the closure calls only, so a handler    │
//! │        can never hold it across an await point.                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;

use dailydose_core::Cart;

#[derive(Debug)]
struct SessionCart {
    cart: Cart,
    /// Unix seconds; the cart is gone once the session token expires.
    expires_at: i64,
}

impl SessionCart {
    fn is_live(&self, now: i64) -> bool {
        self.expires_at > now
    }
}

/// Carts of every active session.
///
/// A cart only exists while it holds at least one line and its session
/// token is still valid. Finishing an order or clearing drops it at once.
#[derive(Debug, Clone, Default)]
pub struct CartSessions {
    carts: Arc<Mutex<HashMap<String, SessionCart>>>,
}

impl CartSessions {
    /// Creates an empty session table.
    pub fn new() -> Self {
        Self::default()
    }

    // Poison is ignored: every closure touches a single cart.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, SessionCart>> {
        self.carts.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Executes a function with read access to a session's cart.
    ///
    /// Sessions without a live cart read as an empty one.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let subtotal = sessions.with_cart(&user.id, |cart| cart.subtotal());
    /// ```
    pub fn with_cart<F, R>(&self, session: &str, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let now = Utc::now().timestamp();
        let carts = self.lock();
        match carts.get(session).filter(|entry| entry.is_live(now)) {
            Some(entry) => f(&entry.cart),
            None => f(&Cart::new()),
        }
    }

    /// Executes a function with write access to a session's cart.
    ///
    /// `expires_at` is the session token's expiry. Expired carts of every
    /// session are swept first. The cart is stored again only if `f`
    /// leaves it non-empty, so an update or remove on a session with no
    /// cart never creates one.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// sessions.with_cart_mut(&user.id, user.expires_at, |cart| cart.add(&product))?;
    /// ```
    pub fn with_cart_mut<F, R>(&self, session: &str, expires_at: i64, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let now = Utc::now().timestamp();
        let mut carts = self.lock();
        carts.retain(|_, entry| entry.is_live(now));

        let mut cart = carts
            .remove(session)
            .map(|entry| entry.cart)
            .unwrap_or_default();
        let result = f(&mut cart);

        if !cart.is_empty() {
            carts.insert(session.to_string(), SessionCart { cart, expires_at });
        }
        result
    }

    /// Copies the session's cart.
    pub fn snapshot(&self, session: &str) -> Cart {
        self.with_cart(session, Cart::clone)
    }

    /// Drops the session's cart entirely.
    pub fn clear(&self, session: &str) {
        self.lock().remove(session);
    }

    /// Number of sessions holding a cart.
    pub fn session_count(&self) -> usize {
        self.lock().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dailydose_core::{Category, Money, Product};

    fn product(id: i64, cents: i64) -> Product {
        Product {
            id,
            name: format!("Drink {}", id),
            description: String::new(),
            price: Money::from_minor(cents),
            image: String::new(),
            stock: 20,
            category: Category::Classic,
            created_at: Utc::now(),
        }
    }

    fn in_an_hour() -> i64 {
        Utc::now().timestamp() + 3600
    }

    fn add(sessions: &CartSessions, session: &str, expires_at: i64, p: &Product) {
        sessions
            .with_cart_mut(session, expires_at, |c| c.add(p))
            .unwrap();
    }

    #[test]
    fn test_sessions_are_isolated() {
        let sessions = CartSessions::new();
        let exp = in_an_hour();

        add(&sessions, "ana", exp, &product(1, 599));
        add(&sessions, "ana", exp, &product(1, 599));
        add(&sessions, "ben", exp, &product(2, 450));

        assert_eq!(sessions.with_cart("ana", |c| c.total_quantity()), 2);
        assert_eq!(sessions.with_cart("ben", |c| c.subtotal()), Money::from_minor(450));
        assert_eq!(sessions.session_count(), 2);
    }

    #[test]
    fn test_unknown_session_reads_empty() {
        let sessions = CartSessions::new();

        assert!(sessions.with_cart("nobody", |c| c.is_empty()));
        assert_eq!(sessions.session_count(), 0);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let sessions = CartSessions::new();
        let exp = in_an_hour();
        add(&sessions, "ana", exp, &product(1, 599));

        let snapshot = sessions.snapshot("ana");
        sessions.with_cart_mut("ana", exp, |c| c.clear());

        assert_eq!(snapshot.item_count(), 1);
        assert!(sessions.with_cart("ana", |c| c.is_empty()));
    }

    #[test]
    fn test_clear_drops_cart() {
        let sessions = CartSessions::new();
        add(&sessions, "ana", in_an_hour(), &product(1, 599));

        sessions.clear("ana");
        sessions.clear("ana");

        assert_eq!(sessions.session_count(), 0);
    }

    #[test]
    fn test_writes_on_empty_carts_store_nothing() {
        let sessions = CartSessions::new();
        let exp = in_an_hour();

        for n in 0..1000 {
            let session = format!("visitor-{}", n);
            sessions.with_cart_mut(&session, exp, |c| c.remove(1));
            sessions
                .with_cart_mut(&session, exp, |c| c.update_quantity(1, 3))
                .unwrap();
        }

        assert_eq!(sessions.session_count(), 0);
    }

    #[test]
    fn test_emptied_cart_is_dropped() {
        let sessions = CartSessions::new();
        let exp = in_an_hour();
        add(&sessions, "ana", exp, &product(1, 599));
        assert_eq!(sessions.session_count(), 1);

        sessions
            .with_cart_mut("ana", exp, |c| c.update_quantity(1, 0))
            .unwrap();

        assert_eq!(sessions.session_count(), 0);
    }

    #[test]
    fn test_expired_session_cart_is_swept() {
        let sessions = CartSessions::new();
        let expired = Utc::now().timestamp() - 1;
        add(&sessions, "old", expired, &product(1, 599));

        assert!(sessions.with_cart("old", |c| c.is_empty()));

        add(&sessions, "new", in_an_hour(), &product(2, 450));

        assert_eq!(sessions.session_count(), 1);
        assert_eq!(sessions.with_cart("new", |c| c.item_count()), 1);
    }
}
