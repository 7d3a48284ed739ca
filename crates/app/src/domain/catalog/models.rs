//! Catalog query models.

use theka_core::products::Category;

/// How a product listing should be ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Alphabetical by display name.
    #[default]
    Name,
    /// Cheapest first.
    PriceLowToHigh,
    /// Most expensive first.
    PriceHighToLow,
    /// Best rated first.
    Rating,
}

/// An inclusive price band in minor units; an open `max` means "and up".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRange {
    pub min: u64,
    pub max: Option<u64>,
}

impl PriceRange {
    /// Whether `price` falls inside the band.
    #[must_use]
    pub fn contains(&self, price: u64) -> bool {
        price >= self.min && self.max.is_none_or(|max| price <= max)
    }
}

/// Filters and ordering for a product listing.
#[derive(Debug, Clone, Default)]
pub struct CatalogQuery {
    /// Case-insensitive free-text search over name, description, brand and tags.
    pub search: Option<String>,
    /// Restrict to one shelf category.
    pub category: Option<Category>,
    /// Restrict to one brand.
    pub brand: Option<String>,
    /// Restrict to a price band.
    pub price_range: Option<PriceRange>,
    /// Result ordering.
    pub sort: SortKey,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounded_range_is_inclusive_on_both_ends() {
        let range = PriceRange {
            min: 100,
            max: Some(500),
        };

        assert!(range.contains(100));
        assert!(range.contains(500));
        assert!(!range.contains(99));
        assert!(!range.contains(501));
    }

    #[test]
    fn open_range_has_no_upper_bound() {
        let range = PriceRange {
            min: 1000_00,
            max: None,
        };

        assert!(range.contains(u64::MAX));
        assert!(!range.contains(999_99));
    }
}
