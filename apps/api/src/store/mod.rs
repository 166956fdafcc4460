//! Persistent key-value store: the single home of all cross-step session state.
//!
//! Values are opaque strings; the store never interprets structure. Typed access
//! and decoding live in `crate::session`.
//!
//! `AppState` holds an `Arc<dyn KeyValueStore>`, chosen at startup from
//! `STORE_BACKEND`, so a networked backend can replace the local ones without
//! touching controller code.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

use crate::config::StoreBackend;

pub mod file;
pub mod memory;
pub mod redis_store;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use redis_store::RedisStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Encoding error: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Store backend error: {0}")]
    Backend(String),
}

/// String key-value store.
///
/// `get` never fails: a backend that cannot answer reports the key as absent.
/// `remove` on an absent key is a no-op.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Option<String>;

    async fn set(&self, key: &str, value: String) -> Result<(), StoreError>;

    async fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// Short backend name for logs.
    fn backend(&self) -> &'static str;
}

/// Builds the configured store backend.
pub async fn open_store(backend: &StoreBackend) -> Result<Arc<dyn KeyValueStore>> {
    let store: Arc<dyn KeyValueStore> = match backend {
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
        StoreBackend::File { path } => Arc::new(FileStore::open(path).await?),
        StoreBackend::Redis { url } => Arc::new(RedisStore::connect(url).await?),
    };
    info!("Session store initialized (backend: {})", store.backend());
    Ok(store)
}
