//! Cart and cart line types.

use crate::cart::{CartPricing, PricedLine};
use crate::catalog::Catalog;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// One product and how many units of it the customer wants.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartLine {
    /// Product reference. The cart never owns the product.
    pub product_id: ProductId,
    /// Quantity, always positive.
    pub quantity: u32,
}

/// A shopping cart.
///
/// Holds at most one line per product. Stored as a plain array of lines.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "Vec<CartLine>", into = "Vec<CartLine>")]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from stored lines.
    ///
    /// Lines for the same product are merged and zero-quantity lines are
    /// dropped, so the one-line-per-product rule holds after loading.
    pub fn from_lines(lines: impl IntoIterator<Item = CartLine>) -> Self {
        let mut cart = Self::new();
        for line in lines {
            if line.quantity == 0 {
                continue;
            }
            match cart.line_mut(line.product_id) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(line.quantity);
                }
                None => cart.lines.push(line),
            }
        }
        cart
    }

    /// Add units of a product.
    ///
    /// Returns the line's new quantity. Fails without changing the cart if
    /// the product is unknown, has no stock, or the line would end up with
    /// more units than are in stock.
    pub fn add_item(
        &mut self,
        catalog: &Catalog,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<u32, CommerceError> {
        if quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }

        let product = catalog
            .product(product_id)
            .ok_or(CommerceError::ProductNotFound(product_id))?;

        if !product.is_in_stock() {
            return Err(CommerceError::OutOfStock(product_id));
        }

        let current = self.quantity_of(product_id).unwrap_or(0);
        let requested = i64::from(current).saturating_add(quantity);
        if requested > i64::from(product.stock) {
            return Err(CommerceError::StockExceeded {
                product_id,
                requested: u32::try_from(requested).unwrap_or(u32::MAX),
                available: product.stock,
            });
        }
        // bounded by product.stock above
        let new_quantity = requested as u32;

        match self.line_mut(product_id) {
            Some(line) => line.quantity = new_quantity,
            None => self.lines.push(CartLine {
                product_id,
                quantity: new_quantity,
            }),
        }
        Ok(new_quantity)
    }

    /// Set a line's quantity exactly.
    ///
    /// A quantity of zero or less removes the line.
    pub fn set_quantity(
        &mut self,
        catalog: &Catalog,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<(), CommerceError> {
        if quantity <= 0 {
            self.remove_item(product_id);
            return Ok(());
        }

        if self.quantity_of(product_id).is_none() {
            return Err(CommerceError::ItemNotInCart(product_id));
        }

        let product = catalog
            .product(product_id)
            .ok_or(CommerceError::ProductNotFound(product_id))?;

        if quantity > i64::from(product.stock) {
            return Err(CommerceError::StockExceeded {
                product_id,
                requested: u32::try_from(quantity).unwrap_or(u32::MAX),
                available: product.stock,
            });
        }

        if let Some(line) = self.line_mut(product_id) {
            line.quantity = quantity as u32;
        }
        Ok(())
    }

    /// Remove a product's line. Removing an absent line is a no-op.
    ///
    /// Returns whether a line was removed.
    pub fn remove_item(&mut self, product_id: ProductId) -> bool {
        let len_before = self.lines.len();
        self.lines.retain(|l| l.product_id != product_id);
        self.lines.len() < len_before
    }

    /// Clear all lines from the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Lines in the order they were first added.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Quantity in the cart for a product.
    pub fn quantity_of(&self, product_id: ProductId) -> Option<u32> {
        self.lines
            .iter()
            .find(|l| l.product_id == product_id)
            .map(|l| l.quantity)
    }

    /// Total units across all lines (including dangling ones).
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Resolve every line against the catalog.
    ///
    /// Lines whose product no longer exists are listed in `dangling` and
    /// contribute nothing to the total.
    pub fn pricing(&self, catalog: &Catalog) -> Result<CartPricing, CommerceError> {
        let mut lines = Vec::with_capacity(self.lines.len());
        let mut dangling = Vec::new();

        for line in &self.lines {
            let Some(product) = catalog.product(line.product_id) else {
                dangling.push(line.product_id);
                continue;
            };
            let line_total = product
                .price
                .try_multiply(i64::from(line.quantity))
                .ok_or(CommerceError::Overflow)?;
            lines.push(PricedLine {
                product_id: product.id,
                title: product.title.clone(),
                unit_price: product.price,
                quantity: line.quantity,
                line_total,
                stock: product.stock,
            });
        }

        let total = Money::try_sum(lines.iter().map(|l| &l.line_total), catalog.currency())
            .ok_or(CommerceError::Overflow)?;

        Ok(CartPricing {
            lines,
            total,
            dangling,
        })
    }

    /// Sum of current price times quantity over lines with a live product.
    pub fn compute_total(&self, catalog: &Catalog) -> Result<Money, CommerceError> {
        Ok(self.pricing(catalog)?.total)
    }

    fn line_mut(&mut self, product_id: ProductId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|l| l.product_id == product_id)
    }
}

impl From<Vec<CartLine>> for Cart {
    fn from(lines: Vec<CartLine>) -> Self {
        Self::from_lines(lines)
    }
}

impl From<Cart> for Vec<CartLine> {
    fn from(cart: Cart) -> Self {
        cart.lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ProductDraft, ProductPatch};
    use crate::money::Currency;

    fn catalog() -> Catalog {
        let mut catalog = Catalog::new(Currency::INR);
        catalog.add_product(ProductDraft::new("Headphones", "Wireless", 100.0).with_stock(5));
        catalog.add_product(ProductDraft::new("Smart Watch", "GPS", 50.0).with_stock(0));
        catalog.add_product(ProductDraft::new("Mouse", "Wireless", 25.0).with_stock(2));
        catalog
    }

    const HEADPHONES: ProductId = ProductId::new(1);
    const WATCH: ProductId = ProductId::new(2);
    const MOUSE: ProductId = ProductId::new(3);

    #[test]
    fn test_add_same_item_increases_quantity() {
        let catalog = catalog();
        let mut cart = Cart::new();
        cart.add_item(&catalog, HEADPHONES, 1).unwrap();
        cart.add_item(&catalog, HEADPHONES, 1).unwrap();
        assert_eq!(cart.add_item(&catalog, HEADPHONES, 1).unwrap(), 3);

        assert_eq!(cart.lines(), &[CartLine { product_id: HEADPHONES, quantity: 3 }]);
    }

    #[test]
    fn test_add_unknown_product() {
        let catalog = catalog();
        let mut cart = Cart::new();
        assert_eq!(
            cart.add_item(&catalog, ProductId::new(99), 1),
            Err(CommerceError::ProductNotFound(ProductId::new(99)))
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_out_of_stock() {
        let catalog = catalog();
        let mut cart = Cart::new();
        assert_eq!(
            cart.add_item(&catalog, WATCH, 1),
            Err(CommerceError::OutOfStock(WATCH))
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_beyond_stock_leaves_line_unchanged() {
        let catalog = catalog();
        let mut cart = Cart::new();
        cart.add_item(&catalog, MOUSE, 2).unwrap();

        let err = cart.add_item(&catalog, MOUSE, 1).unwrap_err();
        assert_eq!(
            err,
            CommerceError::StockExceeded {
                product_id: MOUSE,
                requested: 3,
                available: 2,
            }
        );
        assert_eq!(cart.quantity_of(MOUSE), Some(2));
    }

    #[test]
    fn test_add_rejects_non_positive_quantity() {
        let catalog = catalog();
        let mut cart = Cart::new();
        assert_eq!(
            cart.add_item(&catalog, HEADPHONES, 0),
            Err(CommerceError::InvalidQuantity(0))
        );
    }

    #[test]
    fn test_set_quantity() {
        let catalog = catalog();
        let mut cart = Cart::new();
        cart.add_item(&catalog, HEADPHONES, 1).unwrap();

        cart.set_quantity(&catalog, HEADPHONES, 4).unwrap();
        assert_eq!(cart.quantity_of(HEADPHONES), Some(4));

        assert!(cart.set_quantity(&catalog, HEADPHONES, 6).is_err());
        assert_eq!(cart.quantity_of(HEADPHONES), Some(4));

        cart.set_quantity(&catalog, HEADPHONES, 0).unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_requires_existing_line() {
        let catalog = catalog();
        let mut cart = Cart::new();
        assert_eq!(
            cart.set_quantity(&catalog, HEADPHONES, 2),
            Err(CommerceError::ItemNotInCart(HEADPHONES))
        );
        assert!(cart.set_quantity(&catalog, HEADPHONES, -1).is_ok());
    }

    #[test]
    fn test_remove_item_is_idempotent() {
        let catalog = catalog();
        let mut cart = Cart::new();
        cart.add_item(&catalog, HEADPHONES, 1).unwrap();
        cart.add_item(&catalog, MOUSE, 1).unwrap();

        assert!(cart.remove_item(HEADPHONES));
        let once = cart.clone();
        assert!(!cart.remove_item(HEADPHONES));
        assert_eq!(cart, once);
    }

    #[test]
    fn test_total_skips_deleted_products() {
        let mut catalog = catalog();
        let mut cart = Cart::new();
        cart.add_item(&catalog, HEADPHONES, 2).unwrap();
        cart.add_item(&catalog, MOUSE, 1).unwrap();
        assert_eq!(cart.compute_total(&catalog).unwrap().amount_minor, 22500);

        catalog.delete_product(MOUSE);
        let pricing = cart.pricing(&catalog).unwrap();
        assert_eq!(pricing.total.amount_minor, 20000);
        assert_eq!(pricing.dangling, vec![MOUSE]);
        assert_eq!(pricing.item_count(), 2);
    }

    #[test]
    fn test_total_uses_current_price() {
        let mut catalog = catalog();
        let mut cart = Cart::new();
        cart.add_item(&catalog, HEADPHONES, 2).unwrap();
        catalog.update_product(
            HEADPHONES,
            ProductPatch {
                price: Some(80.0),
                ..Default::default()
            },
        );
        assert_eq!(cart.compute_total(&catalog).unwrap().amount_minor, 16000);
    }

    #[test]
    fn test_from_lines_merges_duplicates() {
        let cart = Cart::from_lines([
            CartLine { product_id: HEADPHONES, quantity: 1 },
            CartLine { product_id: MOUSE, quantity: 0 },
            CartLine { product_id: HEADPHONES, quantity: 2 },
        ]);
        assert_eq!(cart.lines(), &[CartLine { product_id: HEADPHONES, quantity: 3 }]);
    }

    #[test]
    fn test_serializes_as_array() {
        let cart = Cart::from_lines([CartLine { product_id: MOUSE, quantity: 2 }]);
        let json = serde_json::to_string(&cart).unwrap();
        assert_eq!(json, r#"[{"product_id":3,"quantity":2}]"#);
        assert_eq!(serde_json::from_str::<Cart>(&json).unwrap(), cart);
    }
}
