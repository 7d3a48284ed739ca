//! Catalog service.

use std::cmp::Ordering;

use async_trait::async_trait;
use mockall::automock;

use theka_core::products::{Product, ProductId};

use crate::domain::catalog::{
    data,
    errors::CatalogError,
    models::{CatalogQuery, SortKey},
};

/// Read-only product catalog. The cart references products by id only and
/// never mutates catalog data.
#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Lists products matching the query, in the query's ordering.
    async fn list_products(&self, query: &CatalogQuery) -> Result<Vec<Product>, CatalogError>;

    /// Fetches a single product.
    async fn get_product(&self, id: ProductId) -> Result<Product, CatalogError>;

    /// Distinct brand names, in first-seen shelf order.
    async fn brands(&self) -> Result<Vec<String>, CatalogError>;
}

/// Catalog backed by the built-in shelf.
#[derive(Debug, Clone)]
pub struct BundledCatalog {
    products: Vec<Product>,
}

impl BundledCatalog {
    /// A catalog over the built-in shelf.
    #[must_use]
    pub fn new() -> Self {
        Self {
            products: data::products(),
        }
    }

    /// A catalog over the given products, for tests and custom shelves.
    #[must_use]
    pub fn with_products(products: impl Into<Vec<Product>>) -> Self {
        Self {
            products: products.into(),
        }
    }
}

impl Default for BundledCatalog {
    fn default() -> Self {
        Self::new()
    }
}

fn matches_search(product: &Product, needle: &str) -> bool {
    let needle = needle.to_lowercase();

    product.name.to_lowercase().contains(&needle)
        || product.description.to_lowercase().contains(&needle)
        || product.brand.to_lowercase().contains(&needle)
        || product
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(&needle))
}

fn matches(product: &Product, query: &CatalogQuery) -> bool {
    let search_ok = query
        .search
        .as_deref()
        .is_none_or(|needle| matches_search(product, needle));

    let category_ok = query
        .category
        .is_none_or(|category| product.category == category);

    let brand_ok = query
        .brand
        .as_deref()
        .is_none_or(|brand| product.brand.eq_ignore_ascii_case(brand));

    let price_ok = query
        .price_range
        .is_none_or(|range| range.contains(product.price));

    search_ok && category_ok && brand_ok && price_ok
}

fn compare(a: &Product, b: &Product, sort: SortKey) -> Ordering {
    match sort {
        SortKey::Name => a.name.cmp(&b.name),
        SortKey::PriceLowToHigh => a.price.cmp(&b.price),
        SortKey::PriceHighToLow => b.price.cmp(&a.price),
        SortKey::Rating => b.rating.total_cmp(&a.rating),
    }
}

#[async_trait]
impl CatalogService for BundledCatalog {
    async fn list_products(&self, query: &CatalogQuery) -> Result<Vec<Product>, CatalogError> {
        let mut listed: Vec<Product> = self
            .products
            .iter()
            .filter(|product| matches(product, query))
            .cloned()
            .collect();

        listed.sort_by(|a, b| compare(a, b, query.sort));

        Ok(listed)
    }

    async fn get_product(&self, id: ProductId) -> Result<Product, CatalogError> {
        self.products
            .iter()
            .find(|product| product.id == id)
            .cloned()
            .ok_or(CatalogError::NotFound)
    }

    async fn brands(&self) -> Result<Vec<String>, CatalogError> {
        let mut brands: Vec<String> = Vec::new();

        for product in &self.products {
            if !brands.iter().any(|brand| brand == &product.brand) {
                brands.push(product.brand.clone());
            }
        }

        Ok(brands)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use theka_core::products::Category;

    use crate::domain::catalog::models::PriceRange;

    use super::*;

    #[tokio::test]
    async fn empty_query_lists_everything_by_name() -> TestResult {
        let catalog = BundledCatalog::new();

        let listed = catalog.list_products(&CatalogQuery::default()).await?;

        assert_eq!(listed.len(), 6);

        let names: Vec<_> = listed.iter().map(|product| product.name.clone()).collect();
        let mut sorted = names.clone();
        sorted.sort();

        assert_eq!(names, sorted);

        Ok(())
    }

    #[tokio::test]
    async fn search_matches_tags_and_brand() -> TestResult {
        let catalog = BundledCatalog::new();

        let by_tag = catalog
            .list_products(&CatalogQuery {
                search: Some("citrus".to_string()),
                ..CatalogQuery::default()
            })
            .await?;

        assert_eq!(by_tag.len(), 1);
        assert_eq!(
            by_tag.first().map(|product| product.name.as_str()),
            Some("Sula Sauvignon Blanc")
        );

        let by_brand = catalog
            .list_products(&CatalogQuery {
                search: Some("haldirams".to_string()),
                ..CatalogQuery::default()
            })
            .await?;

        assert_eq!(by_brand.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn category_filter_narrows_the_shelf() -> TestResult {
        let catalog = BundledCatalog::new();

        let beers = catalog
            .list_products(&CatalogQuery {
                category: Some(Category::Beer),
                ..CatalogQuery::default()
            })
            .await?;

        assert!(beers.iter().all(|p| p.category == Category::Beer));
        assert_eq!(beers.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn price_range_is_inclusive() -> TestResult {
        let catalog = BundledCatalog::new();

        let affordable = catalog
            .list_products(&CatalogQuery {
                price_range: Some(PriceRange {
                    min: 20_00,
                    max: Some(65_00),
                }),
                ..CatalogQuery::default()
            })
            .await?;

        let names: Vec<_> = affordable
            .iter()
            .map(|product| product.name.as_str())
            .collect();

        assert_eq!(
            names,
            [
                "Haldirams Namkeen Mix",
                "Kingfisher Premium",
                "Lays Classic Salted",
                "Roasted Peanuts",
            ]
        );

        Ok(())
    }

    #[tokio::test]
    async fn sorts_by_price_both_directions() -> TestResult {
        let catalog = BundledCatalog::new();

        let cheap_first = catalog
            .list_products(&CatalogQuery {
                sort: SortKey::PriceLowToHigh,
                ..CatalogQuery::default()
            })
            .await?;

        let prices: Vec<_> = cheap_first.iter().map(|product| product.price).collect();

        assert!(prices.is_sorted(), "expected ascending prices, got {prices:?}");

        let expensive_first = catalog
            .list_products(&CatalogQuery {
                sort: SortKey::PriceHighToLow,
                ..CatalogQuery::default()
            })
            .await?;

        assert_eq!(
            expensive_first.first().map(|product| product.name.as_str()),
            Some("Royal Challenge Whisky")
        );

        Ok(())
    }

    #[tokio::test]
    async fn sorts_by_rating_descending() -> TestResult {
        let catalog = BundledCatalog::new();

        let top_rated = catalog
            .list_products(&CatalogQuery {
                sort: SortKey::Rating,
                ..CatalogQuery::default()
            })
            .await?;

        assert_eq!(
            top_rated.first().map(|product| product.name.as_str()),
            Some("Royal Challenge Whisky")
        );

        Ok(())
    }

    #[tokio::test]
    async fn get_product_by_id() -> TestResult {
        let catalog = BundledCatalog::new();
        let listed = catalog.list_products(&CatalogQuery::default()).await?;
        let first = listed.first().ok_or("empty catalog")?;

        let fetched = catalog.get_product(first.id).await?;

        assert_eq!(fetched, *first);

        Ok(())
    }

    #[tokio::test]
    async fn unknown_product_returns_not_found() {
        let catalog = BundledCatalog::new();

        let result = catalog.get_product(ProductId::generate()).await;

        assert!(
            matches!(result, Err(CatalogError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn brands_are_distinct_in_shelf_order() -> TestResult {
        let catalog = BundledCatalog::new();

        let brands = catalog.brands().await?;

        assert_eq!(
            brands,
            [
                "Kingfisher",
                "Royal Challenge",
                "Sula",
                "Lays",
                "Haldirams",
                "Farm Fresh",
            ]
        );

        Ok(())
    }
}
