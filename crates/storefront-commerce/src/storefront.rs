//! The storefront facade.
//!
//! [`Storefront`] owns the catalog, cart, order ledger and session marker
//! and is the only way to change them. Every successful mutation is written
//! through to the key-value store and then announced to observers.

use crate::cart::{Cart, CartPricing};
use crate::catalog::{parse_import, seed, Catalog, Product, ProductDraft, ProductPatch};
use crate::checkout::{CheckoutEngine, CustomerInfo, DeliveryPolicy, Order, OrderStatus};
use crate::error::CommerceError;
use crate::ids::{OrderId, ProductId};
use crate::ledger::{OrderLedger, StatusUpdate, VendorStats};
use crate::money::{Currency, Money};
use crate::persistence::Persistence;
use crate::search::CatalogQuery;
use crate::session::{Role, Session};
use serde_json::Value;
use std::fmt;
use storefront_kv::KvStore;

/// A store whose contents changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreChange {
    Catalog,
    Orders,
    Cart,
    Session,
}

impl fmt::Display for StoreChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StoreChange::Catalog => "catalog",
            StoreChange::Orders => "orders",
            StoreChange::Cart => "cart",
            StoreChange::Session => "session",
        };
        f.write_str(name)
    }
}

/// Receives change notifications after a mutation has been persisted.
pub trait ChangeObserver {
    fn on_change(&self, change: StoreChange);
}

impl<F: Fn(StoreChange)> ChangeObserver for F {
    fn on_change(&self, change: StoreChange) {
        self(change)
    }
}

/// Settings for opening a storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Currency for new prices when the store is empty.
    pub currency: Currency,
    /// Start from the demo catalog when no products are stored.
    pub seed_catalog: bool,
    /// Delivery estimate range.
    pub delivery: DeliveryPolicy,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            currency: Currency::default(),
            seed_catalog: true,
            delivery: DeliveryPolicy::default(),
        }
    }
}

/// Catalog, cart, ledger and session over one key-value store.
pub struct Storefront<S: KvStore> {
    catalog: Catalog,
    cart: Cart,
    ledger: OrderLedger,
    session: Option<Session>,
    persistence: Persistence<S>,
    engine: CheckoutEngine,
    observers: Vec<Box<dyn ChangeObserver>>,
    save_error: Option<CommerceError>,
}

impl<S: KvStore> Storefront<S> {
    /// Open a storefront on the system clock and thread RNG.
    pub fn open(store: S, config: StorefrontConfig) -> Self {
        Self::open_with(store, config, CheckoutEngine::new(config.delivery))
    }

    /// Open a storefront with a custom checkout engine.
    pub fn open_with(store: S, config: StorefrontConfig, engine: CheckoutEngine) -> Self {
        let persistence = Persistence::new(store);
        let snapshot = persistence.load(|| {
            if config.seed_catalog {
                seed::default_products(config.currency)
            } else {
                Vec::new()
            }
        });

        let currency = snapshot
            .products
            .first()
            .map(|p| p.price.currency)
            .unwrap_or(config.currency);
        if currency != config.currency {
            tracing::warn!(
                stored = currency.code(),
                configured = config.currency.code(),
                "stored catalog uses a different currency, keeping stored currency"
            );
        }

        let mut catalog = Catalog::from_products(snapshot.products, currency);
        let ledger = OrderLedger::from_orders(snapshot.orders);
        let referenced = snapshot
            .cart
            .lines()
            .iter()
            .map(|l| l.product_id)
            .chain(ledger.max_product_id())
            .max();
        if let Some(id) = referenced {
            catalog.reserve_ids_through(id);
        }

        let session = persistence.load_session();
        let mut storefront = Self {
            catalog,
            cart: snapshot.cart,
            ledger,
            session,
            persistence,
            engine,
            observers: Vec::new(),
            save_error: None,
        };

        tracing::debug!(
            products = storefront.catalog.len(),
            cart_lines = storefront.cart.lines().len(),
            orders = storefront.ledger.len(),
            seeded = snapshot.seeded,
            "storefront loaded"
        );
        if snapshot.seeded {
            storefront.persist();
        }
        storefront
    }

    /// Register an observer for change notifications.
    pub fn subscribe(&mut self, observer: impl ChangeObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// The underlying key-value store.
    pub fn store(&self) -> &S {
        self.persistence.store()
    }

    /// Error from the most recent write to the store, if it failed.
    ///
    /// Cleared by the next successful write.
    pub fn save_error(&self) -> Option<&CommerceError> {
        self.save_error.as_ref()
    }

    // ---- catalog ----

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.catalog.product(id)
    }

    pub fn list_products(&self, query: &CatalogQuery) -> Vec<&Product> {
        self.catalog.list_products(query)
    }

    pub fn categories(&self) -> Vec<&str> {
        self.catalog.categories()
    }

    /// Add a product and return its id.
    pub fn add_product(&mut self, draft: ProductDraft) -> ProductId {
        let id = self.catalog.add_product(draft);
        self.commit(&[StoreChange::Catalog]);
        id
    }

    /// Edit a product. Unknown ids are ignored and return `false`.
    pub fn update_product(&mut self, id: ProductId, patch: ProductPatch) -> bool {
        let updated = self.catalog.update_product(id, patch);
        if updated {
            self.commit(&[StoreChange::Catalog]);
        }
        updated
    }

    /// Delete a product. Cart lines referring to it are kept but skipped.
    pub fn delete_product(&mut self, id: ProductId) -> Option<Product> {
        let removed = self.catalog.delete_product(id)?;
        self.commit(&[StoreChange::Catalog]);
        Some(removed)
    }

    /// Import products from JSON text and return how many were added.
    pub fn import_products(&mut self, text: &str) -> Result<usize, CommerceError> {
        let records = parse_import(text)?;
        Ok(self.import_records(&records))
    }

    /// Import already-parsed records and return how many were added.
    pub fn import_records(&mut self, records: &[Value]) -> usize {
        let imported = self.catalog.import_batch(records);
        if imported > 0 {
            self.commit(&[StoreChange::Catalog]);
        }
        imported
    }

    /// Import the built-in sample products.
    pub fn import_sample(&mut self) -> usize {
        self.import_records(&seed::sample_records())
    }

    // ---- cart ----

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Add `quantity` units to the cart and return the new line quantity.
    pub fn add_to_cart(&mut self, id: ProductId, quantity: i64) -> Result<u32, CommerceError> {
        let total = self.cart.add_item(&self.catalog, id, quantity)?;
        self.commit(&[StoreChange::Cart]);
        Ok(total)
    }

    /// Set a line's quantity; zero or less removes it.
    pub fn set_cart_quantity(&mut self, id: ProductId, quantity: i64) -> Result<(), CommerceError> {
        let before = self.cart.clone();
        self.cart.set_quantity(&self.catalog, id, quantity)?;
        if self.cart != before {
            self.commit(&[StoreChange::Cart]);
        }
        Ok(())
    }

    /// Remove a line. Removing an absent line does nothing.
    pub fn remove_from_cart(&mut self, id: ProductId) -> bool {
        let removed = self.cart.remove_item(id);
        if removed {
            self.commit(&[StoreChange::Cart]);
        }
        removed
    }

    pub fn clear_cart(&mut self) {
        if !self.cart.is_empty() {
            self.cart.clear();
            self.commit(&[StoreChange::Cart]);
        }
    }

    /// Cart lines priced against the current catalog.
    pub fn cart_pricing(&self) -> Result<CartPricing, CommerceError> {
        self.cart.pricing(&self.catalog)
    }

    pub fn cart_total(&self) -> Result<Money, CommerceError> {
        self.cart.compute_total(&self.catalog)
    }

    // ---- checkout and orders ----

    /// Place an order for the current cart.
    pub fn checkout(&mut self, customer: CustomerInfo) -> Result<Order, CommerceError> {
        let order = self
            .engine
            .checkout(&mut self.catalog, &mut self.cart, &mut self.ledger, customer)?;
        self.commit(&[StoreChange::Catalog, StoreChange::Orders, StoreChange::Cart]);
        Ok(order)
    }

    pub fn ledger(&self) -> &OrderLedger {
        &self.ledger
    }

    /// Customer order history, newest first.
    pub fn orders(&self) -> Vec<&Order> {
        self.ledger.customer_view()
    }

    /// Vendor order list, newest first.
    pub fn vendor_orders(&self) -> Vec<&Order> {
        self.ledger.vendor_view()
    }

    pub fn order(&self, id: &OrderId) -> Option<&Order> {
        self.ledger.order(id)
    }

    /// Change an order's status.
    pub fn update_order_status(&mut self, id: &OrderId, status: OrderStatus) -> StatusUpdate {
        let result = self.ledger.update_status(id, status);
        if result == StatusUpdate::Changed {
            self.commit(&[StoreChange::Orders]);
        }
        result
    }

    /// Mark an order delivered.
    pub fn mark_delivered(&mut self, id: &OrderId) -> StatusUpdate {
        self.update_order_status(id, OrderStatus::Delivered)
    }

    pub fn vendor_stats(&self) -> Result<VendorStats, CommerceError> {
        self.ledger.stats(self.catalog.len(), self.catalog.currency())
    }

    // ---- session ----

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Switch to `role`, replacing any current session.
    pub fn login(&mut self, role: Role, name: Option<String>) -> Session {
        let session = Session::start(role, name, self.engine.now());
        let saved = self.persistence.save_session(&session);
        self.record_save(saved, "failed to save session");
        tracing::debug!(role = %session.role, name = %session.name, "logged in");
        self.session = Some(session.clone());
        self.notify(&[StoreChange::Session]);
        session
    }

    /// End the current session. Returns `false` if there was none.
    pub fn logout(&mut self) -> bool {
        let had_session = self.session.take().is_some();
        let cleared = self.persistence.clear_session();
        self.record_save(cleared, "failed to clear session");
        if had_session {
            self.notify(&[StoreChange::Session]);
        }
        had_session
    }

    // ---- internals ----

    fn commit(&mut self, changes: &[StoreChange]) {
        self.persist();
        self.notify(changes);
    }

    fn persist(&mut self) {
        let saved = self.persistence.save(&self.catalog, &self.cart, &self.ledger);
        self.record_save(saved, "failed to save storefront snapshot");
    }

    fn record_save(&mut self, result: Result<(), CommerceError>, message: &str) {
        match result {
            Ok(()) => self.save_error = None,
            Err(e) => {
                tracing::error!(error = %e, "{}", message);
                self.save_error = Some(e);
            }
        }
    }

    fn notify(&self, changes: &[StoreChange]) {
        for &change in changes {
            for observer in &self.observers {
                observer.on_change(change);
            }
        }
    }
}
