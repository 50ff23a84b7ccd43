//! Thread-safe item store
//!
//! Writers (`insert_*`, `add`) take the write lock; `name` and `price`
//! take the read lock and may run concurrently with each other.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::instrument;

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{ItemArena, ItemId};

/// Item arena shared between threads.
#[derive(Debug, Clone, Default)]
pub struct SharedCatalog {
    inner: Arc<RwLock<ItemArena>>,
}

impl SharedCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> ApplicationResult<RwLockReadGuard<'_, ItemArena>> {
        self.inner.read().map_err(|_| ApplicationError::LockPoisoned)
    }

    fn write(&self) -> ApplicationResult<RwLockWriteGuard<'_, ItemArena>> {
        self.inner.write().map_err(|_| ApplicationError::LockPoisoned)
    }

    pub fn insert_leaf(&self, name: impl Into<String>, price: f64) -> ApplicationResult<ItemId> {
        Ok(self.write()?.insert_leaf(name, price)?)
    }

    pub fn insert_container(&self) -> ApplicationResult<ItemId> {
        Ok(self.write()?.insert_container())
    }

    #[instrument(level = "debug", skip(self))]
    pub fn add(&self, container: ItemId, item: ItemId) -> ApplicationResult<()> {
        Ok(self.write()?.add(container, item)?)
    }

    pub fn name(&self, id: ItemId) -> ApplicationResult<String> {
        Ok(self.read()?.name(id)?)
    }

    pub fn price(&self, id: ItemId) -> ApplicationResult<f64> {
        Ok(self.read()?.price(id)?)
    }

    pub fn len(&self) -> ApplicationResult<usize> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> ApplicationResult<bool> {
        Ok(self.read()?.is_empty())
    }
}
