use std::{path::PathBuf, sync::Arc};
use tokio::{fs, sync::RwLock};

use crate::errors::ServiceError;

/// Records that can be looked up by a stable key.
pub trait Keyed {
    type Key: PartialEq;

    fn key(&self) -> &Self::Key;
}

/// Ordered record list, in-memory or backed by a JSON file.
///
/// Records keep insertion order. Mutations are applied to a copy of the list,
/// written to the file (when one is set) while the write lock is held, and
/// only then become visible. A failed write leaves the list unchanged.
pub struct JsonListStore<V> {
    inner: Arc<RwLock<Vec<V>>>,
    file_path: Option<PathBuf>,
}

impl<V> JsonListStore<V>
where
    V: Keyed + serde::Serialize + serde::de::DeserializeOwned + Clone,
{
    /// Store that lives only as long as the process.
    pub fn in_memory() -> Arc<Self> {
        Arc::new(Self { inner: Arc::new(RwLock::new(Vec::new())), file_path: None })
    }

    /// Initialize the store from a path. Creates the file with an empty list if
    /// missing; the parent directory must already exist.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();

        let items: Vec<V> = match fs::read(&file_path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Vec::new(),
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                ServiceError::Storage(format!("corrupt data file {}: {e}", file_path.display()))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let empty: Vec<V> = Vec::new();
                fs::write(&file_path, serde_json::to_vec(&empty).map_err(ServiceError::storage)?)
                    .await
                    .map_err(ServiceError::storage)?;
                empty
            }
            Err(e) => return Err(ServiceError::storage(e)),
        };

        Ok(Arc::new(Self { inner: Arc::new(RwLock::new(items)), file_path: Some(file_path) }))
    }

    async fn save(&self, items: &[V]) -> Result<(), ServiceError> {
        let Some(path) = &self.file_path else { return Ok(()) };
        let data = serde_json::to_vec_pretty(items).map_err(ServiceError::storage)?;
        fs::write(path, data).await.map_err(ServiceError::storage)?;
        Ok(())
    }

    /// Snapshot of all records in insertion order.
    pub async fn list(&self) -> Vec<V> {
        self.inner.read().await.clone()
    }

    /// Get a record by key.
    pub async fn get(&self, key: &V::Key) -> Option<V> {
        let items = self.inner.read().await;
        items.iter().find(|v| v.key() == key).cloned()
    }

    /// Mutate the record under `key` in place and persist.
    /// Returns `None` (and writes nothing) when the key is absent.
    pub async fn update<F>(&self, key: &V::Key, f: F) -> Result<Option<V>, ServiceError>
    where
        F: FnOnce(&mut V),
    {
        self.update_list(|items| {
            Ok(items.iter_mut().find(|v| v.key() == key).map(|slot| {
                f(slot);
                slot.clone()
            }))
        })
        .await
    }

    /// Remove the record under `key` and persist; returns the removed record.
    pub async fn remove(&self, key: &V::Key) -> Result<Option<V>, ServiceError> {
        self.update_list(|items| {
            let pos = items.iter().position(|v| v.key() == key);
            Ok(pos.map(|pos| items.remove(pos)))
        })
        .await
    }

    /// Apply a mutation to the whole list and persist atomically.
    /// If `f` or the file write fails, neither memory nor disk changes.
    pub async fn update_list<F, T>(&self, f: F) -> Result<T, ServiceError>
    where
        F: FnOnce(&mut Vec<V>) -> Result<T, ServiceError>,
    {
        let mut items = self.inner.write().await;
        let mut next = items.clone();
        let out = f(&mut next)?;
        self.save(&next).await?;
        *items = next;
        Ok(out)
    }
}
