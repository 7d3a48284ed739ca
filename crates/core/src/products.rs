//! Products
//!
//! Catalog records referenced by the cart. Products are owned by the
//! catalog; the cart treats them as immutable snapshots.

use std::{fmt, str::FromStr};

use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::uuids::TypedUuid;

/// Product id
pub type ProductId = TypedUuid<Product>;

/// Storefront shelf categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Beers and lagers.
    Beer,
    /// Whiskies.
    Whiskey,
    /// Wines.
    Wine,
    /// Potato chips.
    Chips,
    /// Peanuts.
    Peanuts,
    /// Indian bar snacks.
    Chakna,
}

impl Category {
    /// Every category, in shelf order.
    pub const ALL: [Category; 6] = [
        Category::Beer,
        Category::Whiskey,
        Category::Wine,
        Category::Chips,
        Category::Peanuts,
        Category::Chakna,
    ];

    /// The lowercase name used in serialized data and CLI arguments.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Category::Beer => "beer",
            Category::Whiskey => "whiskey",
            Category::Wine => "wine",
            Category::Chips => "chips",
            Category::Peanuts => "peanuts",
            Category::Chakna => "chakna",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown category name.
#[derive(Debug, Error)]
#[error("unknown category `{0}`")]
pub struct CategoryParseError(String);

impl FromStr for Category {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| CategoryParseError(s.to_string()))
    }
}

/// A customer review attached to a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    /// Display name of the reviewer.
    pub reviewer: String,
    /// Star rating, 0–5.
    pub rating: u8,
    /// Free-text comment.
    pub comment: String,
    /// Date the review was left.
    pub date: Date,
}

/// Product Model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog id.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Short description.
    pub description: String,
    /// Current unit price in minor units.
    pub price: u64,
    /// Pre-discount unit price, when the product is on offer.
    pub original_price: Option<u64>,
    /// Image reference.
    pub image: String,
    /// Shelf category.
    pub category: Category,
    /// Brand name.
    pub brand: String,
    /// Volume descriptor for drinks, e.g. `650ml`.
    pub volume: Option<String>,
    /// Weight descriptor for snacks, e.g. `50g`.
    pub weight: Option<String>,
    /// Whether the product is currently stocked.
    pub in_stock: bool,
    /// Average rating, 0.0–5.0.
    pub rating: f32,
    /// Customer reviews.
    pub reviews: Vec<Review>,
    /// Search tags.
    pub tags: Vec<String>,
}
