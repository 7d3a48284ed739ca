//! Bundled catalog data.
//!
//! The storefront ships with a small fixed shelf; a remote catalog can
//! replace it behind the same service trait.

use jiff::civil::date;
use uuid::uuid;

use theka_core::products::{Category, Product, ProductId, Review};

fn product(
    id: ProductId,
    name: &str,
    description: &str,
    price: u64,
    original_price: u64,
    image: &str,
    category: Category,
    brand: &str,
    rating: f32,
    tags: [&str; 3],
) -> Product {
    Product {
        id,
        name: name.to_string(),
        description: description.to_string(),
        price,
        original_price: Some(original_price),
        image: image.to_string(),
        category,
        brand: brand.to_string(),
        volume: None,
        weight: None,
        in_stock: true,
        rating,
        reviews: Vec::new(),
        tags: tags.map(str::to_string).to_vec(),
    }
}

/// The built-in shelf, in display order.
#[must_use]
pub fn products() -> Vec<Product> {
    let mut shelf = vec![
        product(
            ProductId::from_uuid(uuid!("018f5c2e-0001-7000-8000-4b1c6f000001")),
            "Kingfisher Premium",
            "Premium lager beer with crisp taste and smooth finish",
            65_00,
            70_00,
            "images/kingfisher-premium.jpg",
            Category::Beer,
            "Kingfisher",
            4.2,
            ["premium", "lager", "cold"],
        ),
        product(
            ProductId::from_uuid(uuid!("018f5c2e-0002-7000-8000-4b1c6f000002")),
            "Royal Challenge Whisky",
            "Smooth blended Scotch whisky with rich flavor",
            1200_00,
            1350_00,
            "images/royal-challenge.jpg",
            Category::Whiskey,
            "Royal Challenge",
            4.5,
            ["premium", "blended", "smooth"],
        ),
        product(
            ProductId::from_uuid(uuid!("018f5c2e-0003-7000-8000-4b1c6f000003")),
            "Sula Sauvignon Blanc",
            "Fresh and crisp white wine with citrus notes",
            850_00,
            900_00,
            "images/sula-sauvignon.jpg",
            Category::Wine,
            "Sula",
            4.3,
            ["white wine", "crisp", "citrus"],
        ),
        product(
            ProductId::from_uuid(uuid!("018f5c2e-0004-7000-8000-4b1c6f000004")),
            "Lays Classic Salted",
            "Classic potato chips with perfect salt seasoning",
            20_00,
            25_00,
            "images/lays-classic.jpg",
            Category::Chips,
            "Lays",
            4.1,
            ["classic", "salted", "crispy"],
        ),
        product(
            ProductId::from_uuid(uuid!("018f5c2e-0005-7000-8000-4b1c6f000005")),
            "Haldirams Namkeen Mix",
            "Traditional Indian snack mix with spices",
            45_00,
            50_00,
            "images/haldirams-mix.jpg",
            Category::Chakna,
            "Haldirams",
            4.4,
            ["spicy", "traditional", "mix"],
        ),
        product(
            ProductId::from_uuid(uuid!("018f5c2e-0006-7000-8000-4b1c6f000006")),
            "Roasted Peanuts",
            "Premium roasted peanuts with perfect crunch",
            35_00,
            40_00,
            "images/roasted-peanuts.jpg",
            Category::Peanuts,
            "Farm Fresh",
            4.0,
            ["roasted", "crunchy", "premium"],
        ),
    ];

    for item in &mut shelf {
        match item.category {
            Category::Beer => item.volume = Some("650ml".to_string()),
            Category::Whiskey | Category::Wine => item.volume = Some("750ml".to_string()),
            Category::Chips => item.weight = Some("50g".to_string()),
            Category::Peanuts => item.weight = Some("100g".to_string()),
            Category::Chakna => item.weight = Some("200g".to_string()),
        }
    }

    if let Some(lager) = shelf.first_mut() {
        lager.reviews = vec![
            Review {
                reviewer: "Rahul S".to_string(),
                rating: 4,
                comment: "Crisp and always cold on delivery".to_string(),
                date: date(2025, 11, 2),
            },
            Review {
                reviewer: "Priya M".to_string(),
                rating: 5,
                comment: "Weekend staple".to_string(),
                date: date(2025, 12, 14),
            },
        ];
    }

    shelf
}
