//! Persistence port for the cart.
//!
//! The cart is a JSON list stored under [`CART_KEY`] in a per-visitor
//! key-value store. Production uses the visitor's session; tests use
//! [`MemoryStorage`].

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;
use tower_sessions::Session;

/// Storage key holding the serialized cart.
pub const CART_KEY: &str = "cart";

/// Errors raised by a [`CartStorage`] backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Session store failed to load or persist.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Backend refused the operation.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Per-visitor string key-value store.
#[async_trait]
pub trait CartStorage: Send + Sync {
    /// Read the raw value under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value under `key`.
    async fn set(&self, key: &str, value: String) -> Result<(), StorageError>;
}

/// Storage backed by the visitor's `tower-sessions` session.
#[derive(Clone)]
pub struct SessionStorage {
    session: Session,
}

impl SessionStorage {
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self { session }
    }
}

#[async_trait]
impl CartStorage for SessionStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.session.get::<String>(key).await?)
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        self.session.insert(key, value).await?;
        Ok(())
    }
}

/// In-memory storage. Clones share the same map.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    values: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-seeded with a raw value (possibly corrupt).
    #[must_use]
    pub fn with_value(key: &str, value: &str) -> Self {
        let mut values = HashMap::new();
        values.insert(key.to_owned(), value.to_owned());
        Self {
            values: Arc::new(RwLock::new(values)),
        }
    }

    /// Current raw value under `key`.
    pub async fn raw(&self, key: &str) -> Option<String> {
        self.values.read().await.get(key).cloned()
    }
}

#[async_trait]
impl CartStorage for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        self.values.write().await.insert(key.to_owned(), value);
        Ok(())
    }
}

#[async_trait]
impl<S: CartStorage + ?Sized> CartStorage for Arc<S> {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        (**self).set(key, value).await
    }
}
