//! End-to-end behavior of the storefront facade.

use chrono::{TimeZone, Utc};
use storefront_commerce::checkout::FixedRandom;
use storefront_commerce::clock::FixedClock;
use storefront_commerce::persistence::{keys, Persistence};
use storefront_commerce::prelude::*;
use storefront_kv::{FileStore, KvStore, MemoryStore};

fn engine() -> CheckoutEngine {
    CheckoutEngine::default()
        .with_clock(FixedClock(Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap()))
        .with_random(FixedRandom(5))
}

fn config() -> StorefrontConfig {
    StorefrontConfig {
        seed_catalog: false,
        ..Default::default()
    }
}

fn open<S: KvStore>(store: S) -> Storefront<S> {
    Storefront::open_with(store, config(), engine())
}

fn customer() -> CustomerInfo {
    CustomerInfo::new("Asha Rao", "asha@example.com", "12 MG Road, Pune")
}

fn stocked(storefront: &mut Storefront<impl KvStore>, price: f64, stock: i64) -> ProductId {
    storefront.add_product(ProductDraft::new("Item", "An item", price).with_stock(stock))
}

fn stored_orders(store: &MemoryStore, key: &str) -> serde_json::Value {
    let bytes = store.get(key).unwrap().unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[test]
fn test_three_adds_then_checkout() {
    let store = MemoryStore::new();
    let mut storefront = open(&store);
    let id = stocked(&mut storefront, 100.0, 5);

    for _ in 0..3 {
        storefront.add_to_cart(id, 1).unwrap();
    }
    assert_eq!(storefront.cart().quantity_of(id), Some(3));

    let order = storefront.checkout(customer()).unwrap();

    assert_eq!(storefront.product(id).unwrap().stock, 2);
    assert_eq!(order.total, Money::new(30_000, Currency::INR));
    assert_eq!(order.status, OrderStatus::Processing);
    assert_eq!(order.estimated_delivery.label(), "5-6 days");
    assert_eq!(order.delivery_date.to_string(), "2024-05-15");
    assert!(storefront.cart().is_empty());
    assert_eq!(storefront.orders().len(), 1);
    assert_eq!(storefront.orders(), storefront.vendor_orders());
    assert_eq!(stored_orders(&store, keys::ORDERS), stored_orders(&store, keys::VENDOR_ORDERS));
}

#[test]
fn test_add_out_of_stock_leaves_cart_unchanged() {
    let mut storefront = open(MemoryStore::new());
    let _ = stocked(&mut storefront, 10.0, 1);
    let empty = stocked(&mut storefront, 10.0, 0);
    let before = storefront.cart().clone();

    assert_eq!(storefront.add_to_cart(empty, 1), Err(CommerceError::OutOfStock(empty)));
    assert_eq!(storefront.cart(), &before);
}

#[test]
fn test_stale_cart_fails_checkout_without_effects() {
    let store = MemoryStore::new();
    let mut storefront = open(&store);
    let _ = stocked(&mut storefront, 10.0, 1);
    let _ = stocked(&mut storefront, 10.0, 1);
    let id = stocked(&mut storefront, 10.0, 4);
    storefront.add_to_cart(id, 4).unwrap();

    // vendor lowers stock after the line was added
    storefront.update_product(
        id,
        ProductPatch {
            stock: Some(2),
            ..Default::default()
        },
    );
    let stored_before = store.snapshot().unwrap();

    let err = storefront.checkout(customer()).unwrap_err();

    assert_eq!(
        err,
        CommerceError::StockExceeded {
            product_id: id,
            requested: 4,
            available: 2,
        }
    );
    assert_eq!(storefront.product(id).unwrap().stock, 2);
    assert!(storefront.orders().is_empty());
    assert_eq!(storefront.cart().quantity_of(id), Some(4));
    assert_eq!(store.snapshot().unwrap(), stored_before);
}

#[test]
fn test_import_skips_incomplete_records() {
    let mut storefront = open(MemoryStore::new());
    let imported = storefront
        .import_products(r#"[{"title": "A", "price": 10, "description": "d"}, {"price": 5}]"#)
        .unwrap();
    assert_eq!(imported, 1);
    assert_eq!(storefront.catalog().len(), 1);
}

#[test]
fn test_import_errors() {
    let mut storefront = open(MemoryStore::new());
    assert!(matches!(
        storefront.import_products("not json"),
        Err(CommerceError::ImportParseError(_))
    ));
    assert!(matches!(
        storefront.import_products(r#"{"title": "A"}"#),
        Err(CommerceError::ImportShapeError(_))
    ));
    assert!(storefront.catalog().is_empty());
}

#[test]
fn test_remove_is_idempotent() {
    let mut storefront = open(MemoryStore::new());
    let a = stocked(&mut storefront, 10.0, 3);
    let b = stocked(&mut storefront, 20.0, 3);
    storefront.add_to_cart(a, 1).unwrap();
    storefront.add_to_cart(b, 2).unwrap();

    assert!(storefront.remove_from_cart(a));
    let once = storefront.cart().clone();
    assert!(!storefront.remove_from_cart(a));
    assert_eq!(storefront.cart(), &once);
    assert!(!storefront.remove_from_cart(ProductId::new(99)));
}

#[test]
fn test_snapshot_round_trip() {
    let store = MemoryStore::new();
    let mut storefront = open(&store);
    let a = stocked(&mut storefront, 149.5, 6);
    let b = stocked(&mut storefront, 20.0, 3);
    storefront.add_to_cart(a, 2).unwrap();
    storefront.checkout(customer()).unwrap();
    storefront.add_to_cart(b, 1).unwrap();

    let persistence = Persistence::new(&store);
    let first = persistence.load(Vec::new);
    let catalog = Catalog::from_products(first.products.clone(), Currency::INR);
    let ledger = OrderLedger::from_orders(first.orders.clone());
    persistence.save(&catalog, &first.cart, &ledger).unwrap();
    let second = persistence.load(Vec::new);

    assert_eq!(first, second);
    assert_eq!(second.orders.len(), 1);
    assert_eq!(second.cart.quantity_of(b), Some(1));
}

#[test]
fn test_reload_from_directory_store() {
    let dir = tempfile::tempdir().unwrap();
    let order_id = {
        let mut storefront = open(FileStore::open(dir.path()).unwrap());
        let id = stocked(&mut storefront, 50.0, 10);
        storefront.add_to_cart(id, 4).unwrap();
        storefront.checkout(customer()).unwrap().id
    };

    let mut reopened = open(FileStore::open(dir.path()).unwrap());
    assert_eq!(reopened.product(ProductId::new(1)).unwrap().stock, 6);
    assert_eq!(reopened.order(&order_id).unwrap().total.amount_minor, 20_000);

    assert_eq!(reopened.mark_delivered(&order_id), StatusUpdate::Changed);
    assert_eq!(reopened.mark_delivered(&order_id), StatusUpdate::Unchanged);

    let again = open(FileStore::open(dir.path()).unwrap());
    assert!(again.order(&order_id).unwrap().is_delivered());
}

#[test]
fn test_stock_never_negative_and_cart_within_stock() {
    let mut storefront = open(MemoryStore::new());
    let id = stocked(&mut storefront, 10.0, 3);

    assert!(storefront.add_to_cart(id, 2).is_ok());
    assert!(matches!(
        storefront.add_to_cart(id, 2),
        Err(CommerceError::StockExceeded { requested: 4, available: 3, .. })
    ));
    assert!(storefront.set_cart_quantity(id, 5).is_err());
    storefront.set_cart_quantity(id, 3).unwrap();
    storefront.checkout(customer()).unwrap();

    assert_eq!(storefront.product(id).unwrap().stock, 0);
    assert_eq!(storefront.add_to_cart(id, 1), Err(CommerceError::OutOfStock(id)));
    assert_eq!(storefront.checkout(customer()), Err(CommerceError::EmptyCart));
}

#[test]
fn test_set_quantity_zero_removes_line() {
    let mut storefront = open(MemoryStore::new());
    let id = stocked(&mut storefront, 10.0, 3);
    storefront.add_to_cart(id, 2).unwrap();
    storefront.set_cart_quantity(id, 0).unwrap();
    assert!(storefront.cart().is_empty());
}

#[test]
fn test_deleted_product_is_skipped_in_total() {
    let mut storefront = open(MemoryStore::new());
    let a = stocked(&mut storefront, 10.0, 3);
    let b = stocked(&mut storefront, 20.0, 3);
    storefront.add_to_cart(a, 1).unwrap();
    storefront.add_to_cart(b, 1).unwrap();
    storefront.delete_product(b);

    assert_eq!(storefront.cart_total().unwrap().amount_minor, 1_000);
    let order = storefront.checkout(customer()).unwrap();
    assert_eq!(order.lines.len(), 1);
}

#[test]
fn test_orders_newest_first() {
    let mut storefront = Storefront::open_with(MemoryStore::new(), config(), engine());
    let id = stocked(&mut storefront, 10.0, 5);
    storefront.add_to_cart(id, 1).unwrap();
    let first = storefront.checkout(customer()).unwrap();
    storefront.add_to_cart(id, 1).unwrap();
    let second = storefront.checkout(customer()).unwrap();

    // same fixed clock, so the second id gets a suffix
    assert_ne!(first.id, second.id);
    let ids: Vec<_> = storefront.orders().iter().map(|o| o.id.clone()).collect();
    assert_eq!(ids, vec![second.id, first.id]);
}

#[test]
fn test_sample_import_and_listing() {
    let mut storefront = open(MemoryStore::new());
    assert_eq!(storefront.import_sample(), 6);

    let query = CatalogQuery::new()
        .with_category("electronics")
        .with_sort(SortOption::PriceLow);
    let titles: Vec<_> = storefront
        .list_products(&query)
        .iter()
        .map(|p| p.title.as_str())
        .collect();
    assert_eq!(
        titles,
        vec![
            "WD 2TB Elements Portable External Hard Drive",
            "SanDisk SSD PLUS 1TB Internal SSD"
        ]
    );
    assert_eq!(storefront.categories(), vec!["men's clothing", "jewelery", "electronics"]);
}
