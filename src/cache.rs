use anyhow::{Result, anyhow};
use fjall::Keyspace;
use rand::RngExt;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::task;

use crate::SurfcastError;

/// Get/set capability consumed by the weather client.
///
/// Expiry is owned entirely by the implementation.
pub trait ForecastCache {
    async fn get<T: DeserializeOwned + Send + 'static>(&self, key: &str) -> Result<Option<T>>;

    async fn put<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()>;
}

#[derive(Serialize, Deserialize)]
struct StoredEntry<T> {
    value: T,
    expires_at: u64, // Unix timestamp (seconds)
}

/// Cache persisted in a fjall keyspace, entries expire after a jittered TTL
pub struct PersistentCache {
    store: Keyspace,
    ttl: Duration,
}

fn get_from_store(store: Keyspace, key: Vec<u8>) -> anyhow::Result<Option<Vec<u8>>> {
    Ok(store.get(key)?.map(|v| v.to_vec()))
}

impl PersistentCache {
    pub fn open(path: impl AsRef<Path>, ttl: Duration) -> crate::Result<Self> {
        let db = fjall::Database::builder(&path)
            .open()
            .map_err(|e| SurfcastError::cache(format!("Failed to open cache database: {e}")))?;
        let items = db
            .keyspace("forecast_cache", fjall::KeyspaceCreateOptions::default)
            .map_err(|e| SurfcastError::cache(format!("Failed to open cache keyspace: {e}")))?;
        Ok(PersistentCache { store: items, ttl })
    }

    fn jittered_ttl(&self) -> Duration {
        let jitter: f64 = rand::rng().random_range(0.9..1.1);
        self.ttl.mul_f64(jitter)
    }

    /// Manually removes a key from the cache.
    pub async fn remove(&self, key: &str) -> Result<()> {
        let key = key.as_bytes().to_vec();
        let store = self.store.clone();
        task::spawn_blocking(move || store.remove(key)).await??;
        Ok(())
    }
}

impl ForecastCache for PersistentCache {
    /// Retrieves a value if it exists and has not expired.
    /// Returns `None` for cache misses or expired entries.
    #[tracing::instrument(name = "query_cache", level = "debug", skip(self))]
    async fn get<T: DeserializeOwned + Send + 'static>(&self, key: &str) -> Result<Option<T>> {
        let store = self.store.clone();
        let key_bytes = key.as_bytes().to_vec();

        let maybe_bytes: Option<Vec<u8>> =
            task::spawn_blocking(move || get_from_store(store, key_bytes)).await??;

        let Some(bytes) = maybe_bytes else {
            tracing::debug!("Key not found");
            return Ok(None);
        };

        let entry: StoredEntry<T> = postcard::from_bytes(&bytes)?;
        let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();

        if now < entry.expires_at {
            tracing::debug!("Key found and still fresh");
            Ok(Some(entry.value))
        } else {
            tracing::debug!("Key found but expired");
            self.remove(key).await?;
            Ok(None)
        }
    }

    /// Stores a serializable value, overwriting any previous entry.
    #[tracing::instrument(name = "put_cache", level = "debug", skip(self, value))]
    async fn put<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let store = self.store.clone();
        let key = key.as_bytes().to_vec();
        let expires_at = SystemTime::now()
            .checked_add(self.jittered_ttl())
            .ok_or(anyhow!("TTL overflow"))?
            .duration_since(UNIX_EPOCH)?
            .as_secs();
        let entry = StoredEntry { value, expires_at };
        let bytes = postcard::to_stdvec(&entry)?;

        task::spawn_blocking(move || store.insert(key, bytes)).await??;
        Ok(())
    }
}

/// Process-local cache without expiry
#[derive(Debug, Default)]
pub struct InMemoryCache {
    entries: Mutex<HashMap<String, Value>>,
}

impl InMemoryCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().map(|entries| entries.len()).unwrap_or(0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ForecastCache for InMemoryCache {
    async fn get<T: DeserializeOwned + Send + 'static>(&self, key: &str) -> Result<Option<T>> {
        let value = self
            .entries
            .lock()
            .map_err(|_| anyhow!("In-memory cache lock poisoned"))?
            .get(key)
            .cloned();

        match value {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    async fn put<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let value = serde_json::to_value(value)?;
        self.entries
            .lock()
            .map_err(|_| anyhow!("In-memory cache lock poisoned"))?
            .insert(key.to_string(), value);
        Ok(())
    }
}

impl<C: ForecastCache + ?Sized> ForecastCache for &C {
    async fn get<T: DeserializeOwned + Send + 'static>(&self, key: &str) -> Result<Option<T>> {
        C::get(*self, key).await
    }

    async fn put<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        C::put(*self, key, value).await
    }
}
