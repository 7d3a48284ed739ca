//! Cart session manager.
//!
//! Holds the live cart for the current session and keeps it in sync with
//! the identity-keyed document store. Mutations apply to in-memory state
//! first, notify the user, then write through to the bound store; a failed
//! write is logged and never interrupts the mutation. While a user is
//! bound, a mirror task overwrites local state with every remote change,
//! without diffing. Cross-device races are last-write-wins.

use std::sync::Arc;

use jiff::Timestamp;
use tokio::{sync::Mutex, task::JoinHandle};
use tracing::{debug, warn};

use theka_core::{
    cart::{AddOutcome, Cart},
    coupons::CouponBook,
    pricing::format_amount,
    products::{Product, ProductId},
};

use crate::{
    identity::{User, UserId},
    notify::Notifier,
    store::{CartDocument, CartStore},
};

/// The stateful cart and coupon manager for one storefront session.
pub struct CartSession {
    state: Arc<Mutex<Cart>>,
    binding: Mutex<Option<Binding>>,
    store: Arc<dyn CartStore>,
    notifier: Arc<dyn Notifier>,
    coupons: CouponBook,
}

/// An active persistence binding: the bound user plus the mirror task that
/// applies remote changes. Dropping it releases the watch.
struct Binding {
    user: UserId,
    mirror: Option<JoinHandle<()>>,
}

impl Drop for Binding {
    fn drop(&mut self) {
        if let Some(mirror) = self.mirror.take() {
            mirror.abort();
        }
    }
}

impl CartSession {
    /// A session over the built-in coupon book.
    #[must_use]
    pub fn new(store: Arc<dyn CartStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self::with_coupons(store, notifier, CouponBook::builtin())
    }

    /// A session over a custom coupon book.
    #[must_use]
    pub fn with_coupons(
        store: Arc<dyn CartStore>,
        notifier: Arc<dyn Notifier>,
        coupons: CouponBook,
    ) -> Self {
        Self {
            state: Arc::new(Mutex::new(Cart::new())),
            binding: Mutex::new(None),
            store,
            notifier,
            coupons,
        }
    }

    /// Adds `quantity` of `product`, merging into an existing line when one
    /// is present.
    pub async fn add_to_cart(&self, product: Product, quantity: u32) {
        let snapshot = {
            let mut cart = self.state.lock().await;

            match cart.add(product, quantity) {
                AddOutcome::Added => self.notifier.success("Added to cart"),
                AddOutcome::QuantityUpdated => self.notifier.success("Quantity updated in cart"),
            }

            cart.clone()
        };

        self.persist(snapshot).await;
    }

    /// Removes the line for `product`; removing an absent product is a
    /// no-op, not an error.
    pub async fn remove_from_cart(&self, product: ProductId) {
        let snapshot = {
            let mut cart = self.state.lock().await;
            cart.remove(product);

            cart.clone()
        };

        self.notifier.success("Removed from cart");
        self.persist(snapshot).await;
    }

    /// Sets the line quantity to exactly `quantity`; zero removes the line.
    pub async fn update_quantity(&self, product: ProductId, quantity: u32) {
        if quantity == 0 {
            self.remove_from_cart(product).await;
            return;
        }

        let snapshot = {
            let mut cart = self.state.lock().await;
            cart.set_quantity(product, quantity);

            cart.clone()
        };

        self.persist(snapshot).await;
    }

    /// Empties the cart and resets coupon state.
    pub async fn clear_cart(&self) {
        let snapshot = {
            let mut cart = self.state.lock().await;
            cart.clear();

            cart.clone()
        };

        self.persist(snapshot).await;
    }

    /// Validates and applies a coupon code against the current total.
    ///
    /// Returns whether the coupon was applied. On success the discount and
    /// code replace any previous coupon; on failure the cart, including any
    /// prior coupon, is left unchanged.
    pub async fn apply_coupon(&self, code: &str) -> bool {
        let snapshot = {
            let mut cart = self.state.lock().await;

            match cart.apply_coupon(&self.coupons, code) {
                Ok(discount) => {
                    self.notifier.success(&format!(
                        "Coupon applied! \u{20b9}{} discount",
                        format_amount(discount)
                    ));

                    Some(cart.clone())
                }
                Err(error) => {
                    debug!(%error, "coupon rejected");
                    self.notifier.error("Invalid coupon or minimum order not met");

                    None
                }
            }
        };

        let Some(snapshot) = snapshot else {
            return false;
        };

        self.persist(snapshot).await;

        true
    }

    /// Binds the session to `user`: replaces local state with the stored
    /// snapshot (or an empty cart when none exists or the document cannot
    /// be read) and starts mirroring remote changes. Any previous binding
    /// is torn down first; re-binding the same user is a no-op.
    pub async fn bind(&self, user: User) {
        let mut binding = self.binding.lock().await;

        if binding.as_ref().is_some_and(|bound| bound.user == user.id) {
            return;
        }

        *binding = None;

        let cart = match self.store.load(user.id).await {
            Ok(Some(document)) => document.cart,
            Ok(None) => Cart::new(),
            Err(error) => {
                warn!(%error, user = %user.id, "failed to load stored cart; starting empty");
                Cart::new()
            }
        };

        *self.state.lock().await = cart;

        let mirror = match self.store.watch(user.id).await {
            Ok(mut watch) => {
                let state = Arc::clone(&self.state);

                Some(tokio::spawn(async move {
                    while let Some(document) = watch.changed().await {
                        *state.lock().await = document.cart;
                    }
                }))
            }
            Err(error) => {
                warn!(%error, user = %user.id, "failed to watch stored cart; live updates disabled");
                None
            }
        };

        *binding = Some(Binding {
            user: user.id,
            mirror,
        });
    }

    /// Unbinds the session: stops mirroring and resets local state to an
    /// empty cart with no discount.
    pub async fn unbind(&self) {
        *self.binding.lock().await = None;
        *self.state.lock().await = Cart::new();
    }

    /// The user the session is currently bound to, if any.
    pub async fn bound_user(&self) -> Option<UserId> {
        self.binding.lock().await.as_ref().map(|bound| bound.user)
    }

    /// A snapshot of the current cart.
    pub async fn cart(&self) -> Cart {
        self.state.lock().await.clone()
    }

    /// Sum of all line quantities.
    pub async fn total_items(&self) -> u32 {
        self.state.lock().await.total_items()
    }

    /// Sum of line totals at current unit prices.
    pub async fn total_amount(&self) -> u64 {
        self.state.lock().await.total_amount()
    }

    async fn persist(&self, snapshot: Cart) {
        let user = {
            let binding = self.binding.lock().await;

            match binding.as_ref() {
                Some(bound) => bound.user,
                None => return,
            }
        };

        let document = CartDocument::new(snapshot, Timestamp::now());

        if let Err(error) = self.store.save(user, document).await {
            warn!(%error, user = %user, "failed to persist cart");
        }
    }
}
