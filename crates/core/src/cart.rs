//! Cart
//!
//! An ordered collection of product lines with at most one line per product,
//! plus the currently applied coupon and its computed discount. All amounts
//! saturate rather than overflow; with minor-unit prices a real cart never
//! comes near the limits.

use serde::{Deserialize, Serialize};

use crate::{
    coupons::{CouponBook, CouponError},
    products::{Product, ProductId},
};

/// One product-and-quantity record within a cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    product: Product,
    quantity: u32,
}

impl CartLine {
    /// The product snapshot this line refers to.
    pub fn product(&self) -> &Product {
        &self.product
    }

    /// The line quantity, always at least 1.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price times quantity, using the current unit price.
    pub fn line_total(&self) -> u64 {
        self.product.price.saturating_mul(u64::from(self.quantity))
    }
}

/// How an add resolved: a fresh line, or a merge into an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// No line existed for the product; a new one was appended.
    Added,
    /// A line existed; its quantity was increased.
    QuantityUpdated,
}

/// A shopping cart: ordered lines, applied coupon and discount.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
    applied_coupon: Option<String>,
    discount: u64,
}

impl Cart {
    /// Creates an empty cart with no coupon applied.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `quantity` of `product` to the cart.
    ///
    /// If a line for the product already exists its quantity is increased;
    /// otherwise a new line is appended, preserving insertion order. A
    /// quantity of zero is treated as 1.
    pub fn add(&mut self, product: Product, quantity: u32) -> AddOutcome {
        let quantity = quantity.max(1);

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product.id == product.id)
        {
            line.quantity = line.quantity.saturating_add(quantity);
            AddOutcome::QuantityUpdated
        } else {
            self.lines.push(CartLine { product, quantity });
            AddOutcome::Added
        }
    }

    /// Removes the line for `product`, reporting whether one was present.
    ///
    /// Removing an absent product is a no-op, not an error.
    pub fn remove(&mut self, product: ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.product.id != product);

        self.lines.len() != before
    }

    /// Sets the quantity of the line for `product` to exactly `quantity`.
    ///
    /// A quantity of zero removes the line instead. Setting a quantity for a
    /// product with no line is a no-op.
    pub fn set_quantity(&mut self, product: ProductId, quantity: u32) -> bool {
        if quantity == 0 {
            return self.remove(product);
        }

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product.id == product)
        {
            line.quantity = quantity;
            true
        } else {
            false
        }
    }

    /// Empties the cart and resets coupon state.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.applied_coupon = None;
        self.discount = 0;
    }

    /// Validates `code` against the book and the current total, then stores
    /// the discount and the applied code atomically.
    ///
    /// A later successful application replaces the previous coupon; a failed
    /// one leaves the cart, including any prior coupon, unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`CouponError::Unknown`] for a code not in the book, or
    /// [`CouponError::BelowMinimum`] when the current total does not qualify.
    pub fn apply_coupon(&mut self, book: &CouponBook, code: &str) -> Result<u64, CouponError> {
        let Some(coupon) = book.find(code) else {
            return Err(CouponError::Unknown {
                code: code.to_uppercase(),
            });
        };

        let discount = coupon.discount_for(self.total_amount())?;

        self.discount = discount;
        self.applied_coupon = Some(coupon.code().to_string());

        Ok(discount)
    }

    /// The lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of all line quantities.
    pub fn total_items(&self) -> u32 {
        self.lines
            .iter()
            .map(CartLine::quantity)
            .fold(0, u32::saturating_add)
    }

    /// Sum of line totals, always at current unit prices.
    pub fn total_amount(&self) -> u64 {
        self.lines
            .iter()
            .map(CartLine::line_total)
            .fold(0, u64::saturating_add)
    }

    /// The currently applied coupon code, if any.
    pub fn applied_coupon(&self) -> Option<&str> {
        self.applied_coupon.as_deref()
    }

    /// The currently computed discount in minor units.
    pub fn discount(&self) -> u64 {
        self.discount
    }

    /// Total after discount, floored at zero.
    pub fn total_due(&self) -> u64 {
        self.total_amount().saturating_sub(self.discount)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{coupons::Coupon, products::Category};

    use super::*;

    fn product(name: &str, price: u64) -> Product {
        Product {
            id: ProductId::generate(),
            name: name.to_string(),
            description: String::new(),
            price,
            original_price: None,
            image: String::new(),
            category: Category::Beer,
            brand: "Test Brand".to_string(),
            volume: None,
            weight: None,
            in_stock: true,
            rating: 4.0,
            reviews: Vec::new(),
            tags: Vec::new(),
        }
    }

    #[test]
    fn repeated_adds_merge_into_one_line() {
        let mut cart = Cart::new();
        let lager = product("Lager", 65_00);

        assert_eq!(cart.add(lager.clone(), 1), AddOutcome::Added);
        assert_eq!(cart.add(lager.clone(), 2), AddOutcome::QuantityUpdated);
        assert_eq!(cart.add(lager.clone(), 3), AddOutcome::QuantityUpdated);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total_items(), 6);
    }

    #[test]
    fn distinct_products_keep_insertion_order() {
        let mut cart = Cart::new();
        let lager = product("Lager", 65_00);
        let chips = product("Chips", 20_00);

        cart.add(lager.clone(), 1);
        cart.add(chips.clone(), 1);

        let names: Vec<_> = cart
            .lines()
            .iter()
            .map(|line| line.product().name.as_str())
            .collect();

        assert_eq!(names, ["Lager", "Chips"]);
    }

    #[test]
    fn add_with_zero_quantity_adds_one() {
        let mut cart = Cart::new();

        cart.add(product("Lager", 65_00), 0);

        assert_eq!(cart.total_items(), 1);
    }

    #[test]
    fn remove_drops_the_line() {
        let mut cart = Cart::new();
        let lager = product("Lager", 65_00);

        cart.add(lager.clone(), 2);

        assert!(cart.remove(lager.id));
        assert!(cart.is_empty());
    }

    #[test]
    fn removing_absent_product_is_a_no_op() {
        let mut cart = Cart::new();
        cart.add(product("Lager", 65_00), 1);

        assert!(!cart.remove(ProductId::generate()));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn set_quantity_is_exact_not_additive() {
        let mut cart = Cart::new();
        let lager = product("Lager", 65_00);

        cart.add(lager.clone(), 5);
        cart.set_quantity(lager.id, 2);

        assert_eq!(cart.total_items(), 2);
    }

    #[test]
    fn set_quantity_zero_removes_the_line() {
        let mut cart = Cart::new();
        let lager = product("Lager", 65_00);

        cart.add(lager.clone(), 3);

        assert!(cart.set_quantity(lager.id, 0));
        assert!(cart.is_empty());
    }

    #[test]
    fn set_quantity_for_absent_product_is_a_no_op() {
        let mut cart = Cart::new();
        cart.add(product("Lager", 65_00), 1);

        assert!(!cart.set_quantity(ProductId::generate(), 4));
        assert_eq!(cart.total_items(), 1);
    }

    #[test]
    fn totals_use_current_price_not_original() {
        let mut cart = Cart::new();
        let mut lager = product("Lager", 65_00);
        lager.original_price = Some(70_00);

        cart.add(lager, 2);

        assert_eq!(cart.total_amount(), 130_00);
    }

    #[test]
    fn total_items_sums_quantities() {
        let mut cart = Cart::new();

        cart.add(product("Lager", 65_00), 2);
        cart.add(product("Chips", 20_00), 3);

        assert_eq!(cart.total_items(), 5);
        assert_eq!(cart.total_amount(), 190_00);
    }

    #[test]
    fn percentage_coupon_on_qualifying_cart() -> TestResult {
        let mut cart = Cart::new();
        cart.add(product("Whisky", 500_00), 1);

        let discount = cart.apply_coupon(&CouponBook::builtin(), "BROCODE10")?;

        assert_eq!(discount, 50_00);
        assert_eq!(cart.discount(), 50_00);
        assert_eq!(cart.applied_coupon(), Some("BROCODE10"));
        assert_eq!(cart.total_due(), 450_00);

        Ok(())
    }

    #[test]
    fn failed_coupon_leaves_prior_discount() -> TestResult {
        let mut cart = Cart::new();
        cart.add(product("Wine", 850_00), 1);

        cart.apply_coupon(&CouponBook::builtin(), "BROCODE10")?;
        let before = cart.discount();

        let result = cart.apply_coupon(&CouponBook::builtin(), "UNKNOWN");

        assert!(
            matches!(result, Err(CouponError::Unknown { .. })),
            "expected Unknown, got {result:?}"
        );
        assert_eq!(cart.discount(), before);
        assert_eq!(cart.applied_coupon(), Some("BROCODE10"));

        Ok(())
    }

    #[test]
    fn below_minimum_coupon_leaves_cart_unchanged() {
        let mut cart = Cart::new();
        cart.add(product("Chips", 20_00), 1);

        let result = cart.apply_coupon(&CouponBook::builtin(), "BROCODE10");

        assert!(
            matches!(result, Err(CouponError::BelowMinimum { .. })),
            "expected BelowMinimum, got {result:?}"
        );
        assert_eq!(cart.discount(), 0);
        assert_eq!(cart.applied_coupon(), None);
    }

    #[test]
    fn below_minimum_coupon_keeps_prior_discount() -> TestResult {
        let mut cart = Cart::new();
        cart.add(product("Wine", 400_00), 1);

        cart.apply_coupon(&CouponBook::builtin(), "NEW50")?;

        let result = cart.apply_coupon(&CouponBook::builtin(), "BROCODE10");

        assert!(
            matches!(result, Err(CouponError::BelowMinimum { .. })),
            "expected BelowMinimum, got {result:?}"
        );
        assert_eq!(cart.discount(), 50_00);
        assert_eq!(cart.applied_coupon(), Some("NEW50"));

        Ok(())
    }

    #[test]
    fn fixed_coupon_grants_flat_discount() -> TestResult {
        let mut cart = Cart::new();
        cart.add(product("Wine", 250_00), 1);

        let discount = cart.apply_coupon(&CouponBook::builtin(), "NEW50")?;

        assert_eq!(discount, 50_00);

        Ok(())
    }

    #[test]
    fn second_coupon_replaces_the_first() -> TestResult {
        let mut cart = Cart::new();
        cart.add(product("Whisky", 500_00), 1);

        cart.apply_coupon(&CouponBook::builtin(), "BROCODE10")?;
        cart.apply_coupon(&CouponBook::builtin(), "WEEKEND20")?;

        assert_eq!(cart.applied_coupon(), Some("WEEKEND20"));
        assert_eq!(cart.discount(), 100_00);

        Ok(())
    }

    #[test]
    fn coupon_codes_apply_case_insensitively() -> TestResult {
        let mut cart = Cart::new();
        cart.add(product("Whisky", 500_00), 1);

        cart.apply_coupon(&CouponBook::builtin(), "brocode10")?;

        assert_eq!(cart.applied_coupon(), Some("BROCODE10"));

        Ok(())
    }

    #[test]
    fn clear_resets_lines_coupon_and_discount() -> TestResult {
        let mut cart = Cart::new();
        cart.add(product("Whisky", 500_00), 2);
        cart.apply_coupon(&CouponBook::builtin(), "BROCODE10")?;

        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.total_items(), 0);
        assert_eq!(cart.discount(), 0);
        assert_eq!(cart.applied_coupon(), None);

        Ok(())
    }

    #[test]
    fn serialized_cart_round_trips() -> TestResult {
        let mut cart = Cart::new();
        cart.add(product("Lager", 65_00), 2);
        cart.apply_coupon(
            &CouponBook::new([Coupon::fixed("TEN", 10_00, 0)]),
            "TEN",
        )?;

        let json = serde_json::to_string(&cart)?;
        let restored: Cart = serde_json::from_str(&json)?;

        assert_eq!(restored, cart);

        Ok(())
    }
}
