//! Storefront domain types and logic.
//!
//! This crate holds the consistency rules between a product catalog, a
//! shopping cart and an order ledger:
//!
//! - **Catalog**: products, stock, bulk import, demo data
//! - **Cart**: one line per product, never more than the stock on hand
//! - **Checkout**: all-or-nothing conversion of a cart into an order
//! - **Ledger**: append-only order history with customer and vendor views
//! - **Search**: text/category filters and sort orders for listings
//!
//! [`Storefront`] ties them together over a [`storefront_kv::KvStore`].
//!
//! # Example
//!
//! ```rust
//! use storefront_commerce::prelude::*;
//! use storefront_kv::MemoryStore;
//!
//! let config = StorefrontConfig { seed_catalog: false, ..Default::default() };
//! let mut store = Storefront::open(MemoryStore::new(), config);
//!
//! let id = store.add_product(ProductDraft::new("Yoga Mat", "Non-slip", 100.0).with_stock(5));
//! store.add_to_cart(id, 3).unwrap();
//!
//! let order = store
//!     .checkout(CustomerInfo::new("Asha", "asha@example.com", "Pune"))
//!     .unwrap();
//! assert_eq!(order.total.display(), "₹300.00");
//! assert_eq!(store.product(id).unwrap().stock, 2);
//! assert!(store.cart().is_empty());
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod clock;
pub mod ledger;
pub mod persistence;
pub mod search;
pub mod session;

mod storefront;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};
pub use storefront::{ChangeObserver, StoreChange, Storefront, StorefrontConfig};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};
    pub use crate::storefront::{ChangeObserver, StoreChange, Storefront, StorefrontConfig};

    // Catalog
    pub use crate::catalog::{Catalog, Product, ProductDraft, ProductPatch};

    // Cart
    pub use crate::cart::{Cart, CartLine, CartPricing, PricedLine};

    // Checkout
    pub use crate::checkout::{
        CheckoutEngine, CustomerInfo, DeliveryEstimate, DeliveryPolicy, Order, OrderLine,
        OrderStatus,
    };
    pub use crate::clock::{Clock, SystemClock};

    // Ledger
    pub use crate::ledger::{OrderLedger, StatusUpdate, VendorStats};

    // Search
    pub use crate::search::{CatalogQuery, Filter, SortOption};

    // Session
    pub use crate::session::{Role, Session};
}
