//! Catalog listing query.

use crate::catalog::Product;
use crate::search::Filter;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

/// Sort options for product listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    /// Catalog insertion order.
    #[default]
    Featured,
    /// Title A-Z.
    Name,
    /// Price, low to high.
    PriceLow,
    /// Price, high to low.
    PriceHigh,
}

impl SortOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Featured => "featured",
            SortOption::Name => "name",
            SortOption::PriceLow => "price-low",
            SortOption::PriceHigh => "price-high",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortOption::Featured => "Featured",
            SortOption::Name => "Name: A-Z",
            SortOption::PriceLow => "Price: Low to High",
            SortOption::PriceHigh => "Price: High to Low",
        }
    }

    fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortOption::Featured => Ordering::Equal,
            SortOption::Name => a
                .title
                .to_lowercase()
                .cmp(&b.title.to_lowercase())
                .then_with(|| a.title.cmp(&b.title)),
            SortOption::PriceLow => a.price.amount_minor.cmp(&b.price.amount_minor),
            SortOption::PriceHigh => b.price.amount_minor.cmp(&a.price.amount_minor),
        }
    }
}

impl FromStr for SortOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "" | "featured" | "default" => Ok(SortOption::Featured),
            "name" => Ok(SortOption::Name),
            "price-low" | "price_low" => Ok(SortOption::PriceLow),
            "price-high" | "price_high" => Ok(SortOption::PriceHigh),
            other => Err(format!("unknown sort option: {}", other)),
        }
    }
}

/// A product listing query: filters plus a sort order.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CatalogQuery {
    /// Filters to apply; a product must pass all of them.
    pub filters: Vec<Filter>,
    /// Sort option.
    pub sort: SortOption,
}

impl CatalogQuery {
    /// Create a query that lists everything in catalog order.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a text search. Blank text is ignored.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        if !text.trim().is_empty() {
            self.filters.push(Filter::Text(text.trim().to_string()));
        }
        self
    }

    /// Restrict to one category. Blank category is ignored.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        let category = category.into();
        if !category.is_empty() {
            self.filters.push(Filter::Category(category));
        }
        self
    }

    /// Set sort option.
    pub fn with_sort(mut self, sort: SortOption) -> Self {
        self.sort = sort;
        self
    }

    /// Run the query over products in catalog order.
    ///
    /// The sort is stable, so ties keep their catalog order.
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        let mut matched: Vec<&Product> = products
            .iter()
            .filter(|p| self.filters.iter().all(|f| f.matches(p)))
            .collect();
        matched.sort_by(|a, b| self.sort.compare(a, b));
        matched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ProductDraft;
    use crate::ids::ProductId;
    use crate::money::Currency;

    fn products() -> Vec<Product> {
        [
            ("Yoga Mat", "sports", 2299.99),
            ("dumbbells set", "sports", 8999.99),
            ("Cotton T-Shirt", "clothing", 1299.99),
            ("Tennis Racket", "sports", 2299.99),
        ]
        .into_iter()
        .enumerate()
        .map(|(i, (title, category, price))| {
            ProductDraft::new(title, "demo", price)
                .with_category(category)
                .into_product(ProductId::new(i as u64 + 1), Currency::INR)
        })
        .collect()
    }

    fn titles(list: &[&Product]) -> Vec<String> {
        list.iter().map(|p| p.title.clone()).collect()
    }

    #[test]
    fn test_default_keeps_insertion_order() {
        let products = products();
        let listed = CatalogQuery::new().apply(&products);
        assert_eq!(
            titles(&listed),
            vec!["Yoga Mat", "dumbbells set", "Cotton T-Shirt", "Tennis Racket"]
        );
    }

    #[test]
    fn test_sort_by_name_ignores_case() {
        let products = products();
        let listed = CatalogQuery::new().with_sort(SortOption::Name).apply(&products);
        assert_eq!(
            titles(&listed),
            vec!["Cotton T-Shirt", "dumbbells set", "Tennis Racket", "Yoga Mat"]
        );
    }

    #[test]
    fn test_price_sorts_are_stable() {
        let products = products();
        let low = CatalogQuery::new().with_sort(SortOption::PriceLow).apply(&products);
        assert_eq!(
            titles(&low),
            vec!["Cotton T-Shirt", "Yoga Mat", "Tennis Racket", "dumbbells set"]
        );

        let high = CatalogQuery::new().with_sort(SortOption::PriceHigh).apply(&products);
        assert_eq!(
            titles(&high),
            vec!["dumbbells set", "Yoga Mat", "Tennis Racket", "Cotton T-Shirt"]
        );
    }

    #[test]
    fn test_filters_combine() {
        let products = products();
        let listed = CatalogQuery::new()
            .with_text("t")
            .with_category("sports")
            .apply(&products);
        assert_eq!(titles(&listed), vec!["Yoga Mat", "dumbbells set", "Tennis Racket"]);
    }

    #[test]
    fn test_sort_option_parse() {
        assert_eq!("price-high".parse::<SortOption>().unwrap(), SortOption::PriceHigh);
        assert_eq!("".parse::<SortOption>().unwrap(), SortOption::Featured);
        assert!("rating".parse::<SortOption>().is_err());
    }
}
