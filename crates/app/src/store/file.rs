//! File-backed cart store.
//!
//! One JSON document per user under a data directory. This is the backend
//! the CLI uses so cart state survives between invocations; watches only see
//! writes made through the same store instance.

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use rustc_hash::FxHashMap;
use tokio::{
    fs,
    sync::{Mutex, broadcast},
};

use crate::identity::UserId;

use super::{CartDocument, CartStore, CartWatch, StoreError};

const WATCH_CAPACITY: usize = 16;

/// A cart store keeping one pretty-printed JSON file per user id.
#[derive(Debug)]
pub struct JsonFileStore {
    dir: PathBuf,
    watchers: Mutex<FxHashMap<UserId, broadcast::Sender<CartDocument>>>,
}

impl JsonFileStore {
    /// Opens a store rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;

        Ok(Self {
            dir,
            watchers: Mutex::new(FxHashMap::default()),
        })
    }

    fn path_for(&self, user: UserId) -> PathBuf {
        self.dir.join(format!("cart-{user}.json"))
    }

    /// The directory documents are stored under.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl CartStore for JsonFileStore {
    async fn load(&self, user: UserId) -> Result<Option<CartDocument>, StoreError> {
        let bytes = match fs::read(self.path_for(user)).await {
            Ok(bytes) => bytes,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(error.into()),
        };

        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(StoreError::Corrupt)
    }

    async fn save(&self, user: UserId, document: CartDocument) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(&document).map_err(StoreError::Corrupt)?;

        fs::write(self.path_for(user), json).await?;

        let watchers = self.watchers.lock().await;
        if let Some(sender) = watchers.get(&user) {
            _ = sender.send(document);
        }

        Ok(())
    }

    async fn watch(&self, user: UserId) -> Result<CartWatch, StoreError> {
        let mut watchers = self.watchers.lock().await;
        let sender = watchers
            .entry(user)
            .or_insert_with(|| broadcast::channel(WATCH_CAPACITY).0);

        Ok(CartWatch::new(sender.subscribe()))
    }
}
