//! In-process cart store.
//!
//! The default wiring for tests and single-process runs: documents in a map,
//! change fan-out over broadcast channels.

use async_trait::async_trait;
use rustc_hash::FxHashMap;
use tokio::sync::{Mutex, broadcast};

use crate::identity::UserId;

use super::{CartDocument, CartStore, CartWatch, StoreError};

const WATCH_CAPACITY: usize = 16;

/// An in-memory, identity-keyed cart store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    documents: FxHashMap<UserId, CartDocument>,
    watchers: FxHashMap<UserId, broadcast::Sender<CartDocument>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Inner {
    fn watcher(&mut self, user: UserId) -> &broadcast::Sender<CartDocument> {
        self.watchers
            .entry(user)
            .or_insert_with(|| broadcast::channel(WATCH_CAPACITY).0)
    }
}

#[async_trait]
impl CartStore for MemoryStore {
    async fn load(&self, user: UserId) -> Result<Option<CartDocument>, StoreError> {
        let inner = self.inner.lock().await;

        Ok(inner.documents.get(&user).cloned())
    }

    async fn save(&self, user: UserId, document: CartDocument) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;

        inner.documents.insert(user, document.clone());

        // A send only fails when nobody is watching, which is fine.
        _ = inner.watcher(user).send(document);

        Ok(())
    }

    async fn watch(&self, user: UserId) -> Result<CartWatch, StoreError> {
        let mut inner = self.inner.lock().await;

        Ok(CartWatch::new(inner.watcher(user).subscribe()))
    }
}
