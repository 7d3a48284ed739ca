//! Theka
//!
//! Theka is the cart, coupon and pricing core of a delivery storefront for drinks and snacks.
//!
//! Everything in this crate is pure, synchronous domain logic: the product
//! catalog types, the cart with its mutation rules, the coupon book and the
//! minor-unit money arithmetic behind discount calculations. Persistence,
//! identity and notifications live in the application crate.

pub mod cart;
pub mod coupons;
pub mod pricing;
pub mod products;
pub mod uuids;
