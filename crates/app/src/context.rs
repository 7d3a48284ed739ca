//! App Context

use std::{path::Path, sync::Arc};

use thiserror::Error;

use crate::{
    domain::{carts::CartSession, catalog::{BundledCatalog, CatalogService}},
    notify::{LogNotifier, Notifier},
    store::{CartStore, JsonFileStore, MemoryStore, StoreError},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to open cart storage")]
    Storage(#[source] StoreError),
}

/// The wired-up application: catalog, cart session and their collaborators.
#[derive(Clone)]
pub struct AppContext {
    pub catalog: Arc<dyn CatalogService>,
    pub session: Arc<CartSession>,
}

impl AppContext {
    /// Builds a context persisting carts under `data_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error when the storage directory cannot be created.
    pub fn file_backed(data_dir: &Path) -> Result<Self, AppInitError> {
        let store = JsonFileStore::open(data_dir).map_err(AppInitError::Storage)?;

        Ok(Self::with_store(Arc::new(store)))
    }

    /// Builds a context over an in-memory store.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::with_store(Arc::new(MemoryStore::new()))
    }

    fn with_store(store: Arc<dyn CartStore>) -> Self {
        let notifier: Arc<dyn Notifier> = Arc::new(LogNotifier);

        Self {
            catalog: Arc::new(BundledCatalog::new()),
            session: Arc::new(CartSession::new(store, notifier)),
        }
    }
}
