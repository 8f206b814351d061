//! Snapshot persistence over a key-value store.
//!
//! Each store is written as JSON under a fixed key. Reads never fail: a
//! missing or unreadable key falls back to its default.

use crate::cart::Cart;
use crate::catalog::{Catalog, Product};
use crate::checkout::Order;
use crate::error::CommerceError;
use crate::ledger::OrderLedger;
use crate::session::{Role, Session};
use serde::de::DeserializeOwned;
use storefront_kv::{Batch, Cache, KvStore};

/// Storage keys.
pub mod keys {
    pub const PRODUCTS: &str = "products";
    pub const CART: &str = "cart";
    pub const ORDERS: &str = "orders";
    pub const VENDOR_ORDERS: &str = "vendorOrders";
    pub const CURRENT_USER: &str = "currentUser";
    pub const USER_ROLE: &str = "userRole";
}

/// Everything read back by [`Persistence::load`].
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub products: Vec<Product>,
    pub cart: Cart,
    pub orders: Vec<Order>,
    /// `true` when no product snapshot existed and the seed was used.
    pub seeded: bool,
}

/// Reads and writes store snapshots.
pub struct Persistence<S> {
    cache: Cache<S>,
}

impl<S: KvStore> Persistence<S> {
    pub fn new(store: S) -> Self {
        Self {
            cache: Cache::new(store),
        }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        self.cache.store()
    }

    /// Load all stores. `seed` supplies the catalog when none is stored.
    pub fn load(&self, seed: impl FnOnce() -> Vec<Product>) -> Snapshot {
        let (products, seeded) = match self.read::<Vec<Product>>(keys::PRODUCTS) {
            Some(products) => (products, false),
            None => (seed(), true),
        };
        let cart = self.read::<Cart>(keys::CART).unwrap_or_default();
        let orders = self.load_orders();

        Snapshot {
            products,
            cart,
            orders,
            seeded,
        }
    }

    fn load_orders(&self) -> Vec<Order> {
        let orders = self.read::<Vec<Order>>(keys::ORDERS);
        let vendor_orders = self.read::<Vec<Order>>(keys::VENDOR_ORDERS);
        match (orders, vendor_orders) {
            (Some(orders), Some(vendor)) => {
                if orders != vendor {
                    tracing::warn!(
                        orders = orders.len(),
                        vendor_orders = vendor.len(),
                        "vendor order list differs from order history, using order history"
                    );
                }
                orders
            }
            (Some(orders), None) => orders,
            (None, Some(vendor)) => {
                tracing::warn!("order history missing, recovering from vendor order list");
                vendor
            }
            (None, None) => Vec::new(),
        }
    }

    /// Write catalog, cart and both ledger views as one batch.
    pub fn save(&self, catalog: &Catalog, cart: &Cart, ledger: &OrderLedger) -> Result<(), CommerceError> {
        let mut batch = Batch::new();
        batch.put(keys::PRODUCTS, catalog.products())?;
        batch.put(keys::CART, cart)?;
        batch.put(keys::ORDERS, ledger.orders())?;
        batch.put(keys::VENDOR_ORDERS, ledger.orders())?;
        self.cache.commit(batch)?;
        Ok(())
    }

    /// Stored session, if both session keys are present and agree.
    pub fn load_session(&self) -> Option<Session> {
        let session = self.read::<Session>(keys::CURRENT_USER)?;
        let role = self.read::<Role>(keys::USER_ROLE)?;
        if session.role != role {
            tracing::warn!(stored = %role, session = %session.role, "session role mismatch, ignoring session");
            return None;
        }
        Some(session)
    }

    pub fn save_session(&self, session: &Session) -> Result<(), CommerceError> {
        let mut batch = Batch::new();
        batch.put(keys::CURRENT_USER, session)?;
        batch.put(keys::USER_ROLE, &session.role)?;
        self.cache.commit(batch)?;
        Ok(())
    }

    pub fn clear_session(&self) -> Result<(), CommerceError> {
        self.cache.delete(keys::CURRENT_USER)?;
        self.cache.delete(keys::USER_ROLE)?;
        Ok(())
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.cache.get::<T>(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "ignoring unreadable stored value");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ProductDraft;
    use crate::checkout::{CheckoutEngine, CustomerInfo, FixedRandom};
    use crate::clock::FixedClock;
    use crate::money::Currency;
    use chrono::{TimeZone, Utc};
    use storefront_kv::MemoryStore;

    fn catalog() -> Catalog {
        let mut catalog = Catalog::new(Currency::INR);
        catalog.add_product(ProductDraft::new("Lamp", "LED", 10.0).with_stock(3));
        catalog
    }

    fn placed_orders() -> Vec<Order> {
        let mut catalog = catalog();
        let mut cart = Cart::new();
        let mut ledger = OrderLedger::new();
        let mut engine = CheckoutEngine::default()
            .with_clock(FixedClock(Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()))
            .with_random(FixedRandom(5));
        cart.add_item(&catalog, catalog.products()[0].id, 1).unwrap();
        engine
            .checkout(&mut catalog, &mut cart, &mut ledger, CustomerInfo::default())
            .unwrap();
        ledger.orders().to_vec()
    }

    #[test]
    fn test_load_empty_store_uses_seed() {
        let persistence = Persistence::new(MemoryStore::new());
        let snapshot = persistence.load(|| catalog().products().to_vec());
        assert!(snapshot.seeded);
        assert_eq!(snapshot.products.len(), 1);
        assert!(snapshot.cart.is_empty());
        assert!(snapshot.orders.is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let persistence = Persistence::new(MemoryStore::new());
        let catalog = catalog();
        let mut cart = Cart::new();
        cart.add_item(&catalog, catalog.products()[0].id, 2).unwrap();

        persistence.save(&catalog, &cart, &OrderLedger::new()).unwrap();
        let snapshot = persistence.load(Vec::new);

        assert!(!snapshot.seeded);
        assert_eq!(snapshot.products, catalog.products());
        assert_eq!(snapshot.cart, cart);
        assert!(persistence.store().snapshot().unwrap().contains_key(keys::VENDOR_ORDERS));
    }

    #[test]
    fn test_malformed_values_fall_back() {
        let store = MemoryStore::new();
        store.set(keys::PRODUCTS, b"{not json").unwrap();
        store.set(keys::CART, b"42").unwrap();
        let persistence = Persistence::new(store);

        let snapshot = persistence.load(|| catalog().products().to_vec());
        assert!(snapshot.seeded);
        assert!(snapshot.cart.is_empty());
    }

    #[test]
    fn test_orders_key_is_authoritative() {
        let store = MemoryStore::new();
        store.set(keys::ORDERS, b"[]").unwrap();
        store.set(keys::VENDOR_ORDERS, b"not json").unwrap();
        let persistence = Persistence::new(store);
        assert!(persistence.load(Vec::new).orders.is_empty());
    }

    #[test]
    fn test_orders_recovered_from_vendor_list() {
        let orders = placed_orders();
        let store = MemoryStore::new();
        store.set(keys::VENDOR_ORDERS, &serde_json::to_vec(&orders).unwrap()).unwrap();
        let persistence = Persistence::new(store);

        let loaded = persistence.load(Vec::new).orders;
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, orders[0].id);
        assert_eq!(loaded[0].total, orders[0].total);
    }

    #[test]
    fn test_divergent_vendor_list_is_ignored() {
        let orders = placed_orders();
        let store = MemoryStore::new();
        store.set(keys::ORDERS, &serde_json::to_vec(&orders).unwrap()).unwrap();
        store.set(keys::VENDOR_ORDERS, b"[]").unwrap();
        let persistence = Persistence::new(store);

        let loaded = persistence.load(Vec::new).orders;
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, orders[0].id);
    }

    #[test]
    fn test_session_round_trip_and_clear() {
        let persistence = Persistence::new(MemoryStore::new());
        let session = Session::start(Role::Vendor, None, chrono::Utc::now());

        persistence.save_session(&session).unwrap();
        assert_eq!(persistence.load_session(), Some(session));

        persistence.clear_session().unwrap();
        assert_eq!(persistence.load_session(), None);
        assert!(persistence.store().snapshot().unwrap().is_empty());
    }
}
