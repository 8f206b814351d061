//! Demo catalog data.

use crate::catalog::Product;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde_json::{json, Value};

const UNSPLASH: &str = "https://images.unsplash.com/photo-";
const UNSPLASH_SIZE: &str = "?w=400&h=300&fit=crop";

// (title, description, price, category, unsplash photo, stock, vendor)
type SeedRow = (&'static str, &'static str, f64, &'static str, &'static str, u32, &'static str);

const DEFAULT_ROWS: &[SeedRow] = &[
    ("Wireless Headphones", "Premium noise-cancelling wireless headphones with 30-hour battery life.", 14999.99, "electronics", "1505740420928-5e560c06d30e", 15, "TechStore"),
    ("Smart Watch", "Fitness tracking smartwatch with heart rate monitor and GPS.", 22999.99, "electronics", "1523275335684-37898b6baf30", 8, "TechStore"),
    ("Laptop Pro 15\"", "Thin and light laptop with a 15-inch display for work and play.", 89999.99, "electronics", "1496181133206-80ce9b88a853", 12, "ComputerWorld"),
    ("4K Webcam", "Ultra HD webcam with autofocus for streaming and video calls.", 7999.99, "electronics", "1596468138836-4fd5b8a0d9c3", 25, "StreamGear"),
    ("Wireless Mouse", "Ergonomic wireless mouse with long battery life.", 2499.99, "electronics", "1527864550417-7fd91fc51a46", 30, "TechStore"),
    ("Running Shoes", "Lightweight running shoes with cushioned soles.", 6999.99, "sports", "1542291026-7eec264c27ff", 25, "SportsGear"),
    ("Yoga Mat", "Non-slip yoga mat with carrying strap.", 2299.99, "sports", "1545205597-3d9d02c29597", 20, "SportsGear"),
    ("Dumbbells Set", "Adjustable dumbbells set for home workouts.", 8999.99, "sports", "1517963879193-52a74383959a", 15, "FitnessPro"),
    ("Winter Jacket", "Insulated waterproof jacket for cold weather.", 11999.99, "clothing", "1551698618-1dfe5d97d256", 12, "FashionHub"),
    ("Denim Jeans", "Classic fit denim jeans in stretch cotton.", 3499.99, "clothing", "1542272604-787c3835535d", 40, "DenimWorld"),
    ("Cotton T-Shirt", "Organic cotton t-shirt, soft and breathable.", 1299.99, "clothing", "1521572163474-6864f9cf17ab", 60, "EcoWear"),
    ("JavaScript Guide", "A practical guide to modern JavaScript.", 2999.99, "books", "1532012197267-da84d127e765", 30, "BookWorld"),
    ("Python Programming", "Learn Python from the basics to advanced topics.", 3499.99, "books", "1526379095098-d400fd0bf935", 25, "TechBooks"),
    ("Cookbook Deluxe", "Over 200 recipes from around the world.", 2799.99, "books", "1505253716362-afaea1d3d1af", 22, "FoodBooks"),
    ("Kitchen Blender", "High-speed blender for smoothies and soups.", 5999.99, "home", "1502741126161-b048600d289a", 14, "KitchenPro"),
    ("LED Desk Lamp", "Adjustable LED desk lamp with three brightness levels.", 2499.99, "home", "1507003211169-0a1dd7228f2d", 28, "HomeLight"),
    ("Wall Clock", "Minimalist silent wall clock.", 1899.99, "home", "1564399580075-5dfe19c205f3", 32, "TimePieces"),
];

/// The catalog a fresh store starts with, numbered from 1.
pub fn default_products(currency: Currency) -> Vec<Product> {
    DEFAULT_ROWS
        .iter()
        .zip(1u64..)
        .map(|(&(title, description, price, category, photo, stock, vendor), id)| Product {
            id: ProductId::new(id),
            title: title.to_string(),
            description: description.to_string(),
            price: Money::from_decimal(price, currency),
            category: category.to_string(),
            image: format!("{}{}{}", UNSPLASH, photo, UNSPLASH_SIZE),
            stock,
            vendor: vendor.to_string(),
        })
        .collect()
}

/// Sample records in bulk import format.
pub fn sample_records() -> Vec<Value> {
    vec![
        json!({
            "title": "Fjallraven - Foldsack No. 1 Backpack, Fits 15 Laptops",
            "price": 8199.99,
            "description": "Your perfect pack for everyday use and walks in the forest.",
            "category": "men's clothing",
            "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_t.png",
            "stock": 25,
            "vendor": "Fjallraven Store"
        }),
        json!({
            "title": "Mens Cotton Jacket",
            "price": 4199.99,
            "description": "Great outerwear jacket for Spring, Autumn and Winter.",
            "category": "men's clothing",
            "image": "https://fakestoreapi.com/img/71li-ujtlUL._AC_UX679_t.png",
            "stock": 30,
            "vendor": "Outdoor Gear"
        }),
        json!({
            "title": "Solid Gold Petite Micropave",
            "price": 12599.99,
            "description": "Return or exchange any order within 30 days.",
            "category": "jewelery",
            "image": "https://fakestoreapi.com/img/61sbMiUnoGL._AC_UL640_QL65_ML3_t.png",
            "stock": 20,
            "vendor": "Gold Palace"
        }),
        json!({
            "title": "Rose Gold Plated Steel Earrings",
            "price": 824.99,
            "description": "Double flared tunnel plug earrings made of 316L stainless steel.",
            "category": "jewelery",
            "image": "https://fakestoreapi.com/img/51UDEzMJVpL._AC_UL640_QL65_ML3_t.png",
            "stock": 45,
            "vendor": "Body Art"
        }),
        json!({
            "title": "WD 2TB Elements Portable External Hard Drive",
            "price": 4799.99,
            "description": "USB 3.0 and USB 2.0 compatible, fast data transfers.",
            "category": "electronics",
            "image": "https://fakestoreapi.com/img/61IBBVJvSDL._AC_SY879_t.png",
            "stock": 60,
            "vendor": "Tech World"
        }),
        json!({
            "title": "SanDisk SSD PLUS 1TB Internal SSD",
            "price": 8199.99,
            "description": "Faster boot up, shutdown, application load and response.",
            "category": "electronics",
            "image": "https://fakestoreapi.com/img/61U7T1koQqL._AC_SX679_t.png",
            "stock": 55,
            "vendor": "Storage Pro"
        }),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::import::draft_from_record;
    use std::collections::HashSet;

    #[test]
    fn test_default_ids_are_unique_and_sequential() {
        let products = default_products(Currency::INR);
        let ids: HashSet<_> = products.iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), products.len());
        assert_eq!(products[0].id, ProductId::new(1));
        assert_eq!(products[0].price.amount_minor, 1_499_999);
    }

    #[test]
    fn test_sample_records_are_importable() {
        for record in sample_records() {
            assert!(draft_from_record(&record).is_some(), "{record}");
        }
    }
}
