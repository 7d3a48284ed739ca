//! Integration test walking a realistic shopping session end to end.
//!
//! A customer builds up a mixed cart of drinks and snacks, changes their
//! mind a few times, then hunts for the best coupon:
//!
//! 1. Two lagers at 65 plus one more of the same -> one line, quantity 3
//! 2. A bottle of whisky at 1200 and two bags of chips at 20
//! 3. The chips get dropped, the whisky quantity is corrected to 1
//! 4. `BROCODE10` (10%, min 500) beats `NEW50` (flat 50, min 200)
//!
//! Expected at checkout: subtotal 1395, discount 139.50, total due 1255.50.

use testresult::TestResult;

use theka_core::{
    cart::Cart,
    coupons::CouponBook,
    products::{Category, Product, ProductId},
};

fn product(name: &str, category: Category, price: u64) -> Product {
    Product {
        id: ProductId::generate(),
        name: name.to_string(),
        description: String::new(),
        price,
        original_price: None,
        image: String::new(),
        category,
        brand: name.to_string(),
        volume: None,
        weight: None,
        in_stock: true,
        rating: 4.0,
        reviews: Vec::new(),
        tags: Vec::new(),
    }
}

#[test]
fn shopping_session_ends_with_best_coupon_applied() -> TestResult {
    let book = CouponBook::builtin();
    let mut cart = Cart::new();

    let lager = product("Lager", Category::Beer, 65_00);
    let whisky = product("Whisky", Category::Whiskey, 1200_00);
    let chips = product("Chips", Category::Chips, 20_00);

    cart.add(lager.clone(), 2);
    cart.add(lager.clone(), 1);
    cart.add(whisky.clone(), 2);
    cart.add(chips.clone(), 2);

    assert_eq!(cart.len(), 3);
    assert_eq!(cart.total_items(), 7);

    cart.remove(chips.id);
    cart.set_quantity(whisky.id, 1);

    assert_eq!(cart.total_amount(), 1395_00);

    // Flat 50 first, then the better percentage coupon replaces it.
    let flat = cart.apply_coupon(&book, "NEW50")?;
    assert_eq!(flat, 50_00);

    let percent = cart.apply_coupon(&book, "brocode10")?;
    assert_eq!(percent, 139_50);
    assert_eq!(cart.applied_coupon(), Some("BROCODE10"));
    assert_eq!(cart.total_due(), 1255_50);

    // Emptying the cart forgets the coupon as well.
    cart.clear();

    assert!(cart.is_empty());
    assert_eq!(cart.discount(), 0);
    assert_eq!(cart.applied_coupon(), None);

    Ok(())
}
