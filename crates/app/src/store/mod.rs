//! Cart document storage.
//!
//! The persistence seam of the storefront: cart state lives in a document
//! keyed by user identity. Stores are last-writer-wins with no conflict
//! resolution; watchers receive every write until the watch is dropped.

pub mod file;
pub mod memory;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::broadcast;

use theka_core::cart::Cart;

use crate::identity::UserId;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

/// The persisted shape of a user's cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartDocument {
    /// Cart lines, discount and applied coupon.
    #[serde(flatten)]
    pub cart: Cart,

    /// When the document was last written.
    pub updated_at: Timestamp,
}

impl CartDocument {
    /// Snapshots a cart, stamped with the given write time.
    #[must_use]
    pub fn new(cart: Cart, updated_at: Timestamp) -> Self {
        Self { cart, updated_at }
    }
}

/// Errors surfaced by cart stores.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The stored document exists but cannot be decoded.
    #[error("stored cart is not valid JSON")]
    Corrupt(#[source] serde_json::Error),

    /// The underlying storage failed.
    #[error("storage failure")]
    Io(#[from] std::io::Error),
}

/// Identity-keyed cart document storage.
#[automock]
#[async_trait]
pub trait CartStore: Send + Sync {
    /// Reads the user's cart document, if one exists.
    async fn load(&self, user: UserId) -> Result<Option<CartDocument>, StoreError>;

    /// Writes the user's cart document. Last writer wins.
    async fn save(&self, user: UserId, document: CartDocument) -> Result<(), StoreError>;

    /// Opens a live watch on the user's document. Dropping the returned
    /// watch releases the subscription.
    async fn watch(&self, user: UserId) -> Result<CartWatch, StoreError>;
}

/// A live subscription to one user's cart document.
#[derive(Debug)]
pub struct CartWatch {
    rx: broadcast::Receiver<CartDocument>,
}

impl CartWatch {
    pub(crate) fn new(rx: broadcast::Receiver<CartDocument>) -> Self {
        Self { rx }
    }

    /// Waits for the next write to the watched document. Returns `None`
    /// once the store has gone away. A watcher that falls behind skips
    /// straight to the more recent writes.
    pub async fn changed(&mut self) -> Option<CartDocument> {
        loop {
            match self.rx.recv().await {
                Ok(document) => return Some(document),
                Err(broadcast::error::RecvError::Lagged(_)) => {}
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}
