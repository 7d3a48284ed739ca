//! Checkout Example
//!
//! Builds a small cart of drinks and snacks, tries a couple of coupon
//! codes and prints the resulting receipt lines.

use anyhow::Result;

use theka_core::{
    cart::Cart,
    coupons::CouponBook,
    pricing::format_amount,
    products::{Category, Product, ProductId},
};

fn product(name: &str, category: Category, brand: &str, price: u64) -> Product {
    Product {
        id: ProductId::generate(),
        name: name.to_string(),
        description: String::new(),
        price,
        original_price: None,
        image: String::new(),
        category,
        brand: brand.to_string(),
        volume: None,
        weight: None,
        in_stock: true,
        rating: 4.0,
        reviews: Vec::new(),
        tags: Vec::new(),
    }
}

/// Checkout Example
#[expect(clippy::print_stdout, reason = "example program output to user")]
pub fn main() -> Result<()> {
    let book = CouponBook::builtin();
    let mut cart = Cart::new();

    cart.add(product("Kingfisher Premium", Category::Beer, "Kingfisher", 65_00), 4);
    cart.add(product("Lays Classic Salted", Category::Chips, "Lays", 20_00), 2);
    cart.add(
        product("Sula Sauvignon Blanc", Category::Wine, "Sula", 850_00),
        1,
    );

    // Below BROCODE10's 500 minimum this would fail; this cart qualifies.
    match cart.apply_coupon(&book, "brocode10") {
        Ok(discount) => println!("applied BROCODE10 for \u{20b9}{}", format_amount(discount)),
        Err(error) => println!("coupon rejected: {error}"),
    }

    println!();

    for line in cart.lines() {
        println!(
            "{:>3} x {:<24} {:>10}",
            line.quantity(),
            line.product().name,
            format_amount(line.line_total()),
        );
    }

    println!();
    println!("items:    {}", cart.total_items());
    println!("subtotal: \u{20b9}{}", format_amount(cart.total_amount()));
    println!("discount: \u{20b9}{}", format_amount(cart.discount()));
    println!("due:      \u{20b9}{}", format_amount(cart.total_due()));

    Ok(())
}
