use std::fmt;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::api::{ApiError, Backend};
use crate::cache::CacheStore;

use super::{encode_segment, Resource};

/// Target state for `set_status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Active,
    Inactive,
}

impl Status {
    fn action(self) -> &'static str {
        match self {
            Status::Active => "activate",
            Status::Inactive => "inactivate",
        }
    }
}

impl From<bool> for Status {
    fn from(active: bool) -> Self {
        if active {
            Status::Active
        } else {
            Status::Inactive
        }
    }
}

/// Cached read / invalidating write access to one backend resource.
///
/// Reads are served from the cache while fresh and fetched otherwise.
/// Every successful write clears the resource's whole namespace before
/// returning, so the next list or summary read goes to the backend.
///
/// A read that was already in flight when a write landed returns its data
/// to its caller but does not cache it.
pub struct EntityService<R: Resource> {
    backend: Arc<dyn Backend>,
    cache: CacheStore,
    /// Bumped by every invalidation.
    generation: AtomicU64,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> fmt::Debug for EntityService<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityService")
            .field("namespace", &R::NAMESPACE)
            .field("base_path", &R::BASE_PATH)
            .finish()
    }
}

impl<R: Resource> EntityService<R> {
    pub fn new(backend: Arc<dyn Backend>, cache: CacheStore) -> Self {
        Self {
            backend,
            cache,
            generation: AtomicU64::new(0),
            _resource: PhantomData,
        }
    }

    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    pub(crate) fn key(name: &str) -> String {
        format!("{}:{}", R::NAMESPACE, name)
    }

    fn item_path(id: i64) -> String {
        format!("{}/{}", R::BASE_PATH, id)
    }

    /// Serve `key` from the cache, or GET `path` and cache the result.
    pub(crate) async fn cached_get<T>(&self, key: &str, path: &str) -> Result<T, ApiError>
    where
        T: Serialize + DeserializeOwned,
    {
        if let Some(hit) = self.cache.get::<T>(key) {
            debug!(key, "Cache hit");
            return Ok(hit);
        }

        debug!(key, path, "Cache miss, fetching");
        let generation = self.generation.load(Ordering::SeqCst);
        let typed: T = self.fetch(path).await?;
        self.store_unless_invalidated(key, &typed, generation);
        Ok(typed)
    }

    /// GET `path` without touching the cache.
    pub(crate) async fn fetch<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let value = self.backend.get(path).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Cache `value` only if no invalidation happened since `generation` was
    /// read. An invalidation racing the write is caught by the second check.
    fn store_unless_invalidated<T: Serialize>(&self, key: &str, value: &T, generation: u64) {
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(key, "Invalidated while fetching, not caching");
            return;
        }
        self.cache.set(key, value);
        if self.generation.load(Ordering::SeqCst) != generation {
            self.cache.clear(Some(key));
        }
    }

    pub async fn list(&self) -> Result<Vec<R::Record>, ApiError> {
        self.cached_get(&Self::key("list"), R::BASE_PATH).await
    }

    pub async fn summary(&self) -> Result<Vec<R::Summary>, ApiError> {
        let path = format!("{}{}", R::BASE_PATH, R::SUMMARY_PATH);
        self.cached_get(&Self::key("summary"), &path).await
    }

    pub async fn get_by_key(&self, id: i64) -> Result<R::Record, ApiError> {
        self.cached_get(&Self::key(&format!("item:{}", id)), &Self::item_path(id))
            .await
    }

    pub async fn create<B>(&self, body: &B) -> Result<R::Record, ApiError>
    where
        B: Serialize + Sync + ?Sized,
    {
        let body = serde_json::to_value(body)?;
        let created = self.backend.post(R::BASE_PATH, &body).await?;
        self.invalidate();
        info!(namespace = R::NAMESPACE, "Created record");
        Ok(serde_json::from_value(created)?)
    }

    pub async fn update<B>(&self, id: i64, body: &B) -> Result<R::Record, ApiError>
    where
        B: Serialize + Sync + ?Sized,
    {
        let body = serde_json::to_value(body)?;
        let updated = self.backend.put(&Self::item_path(id), &body).await?;
        self.invalidate();
        info!(namespace = R::NAMESPACE, id, "Updated record");
        Ok(serde_json::from_value(updated)?)
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.backend.delete(&Self::item_path(id)).await?;
        self.invalidate();
        info!(namespace = R::NAMESPACE, id, "Deleted record");
        Ok(())
    }

    /// `PATCH {base}/{id}/activate` or `/inactivate`. The response body is ignored.
    pub async fn set_status(&self, id: i64, status: Status) -> Result<(), ApiError> {
        let path = format!("{}/{}", Self::item_path(id), status.action());
        self.backend.patch(&path, None).await?;
        self.invalidate();
        info!(namespace = R::NAMESPACE, id, status = status.action(), "Changed record status");
        Ok(())
    }

    /// Drop every cached entry of this resource.
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.cache.clear(Some(R::NAMESPACE));
    }

    /// GET `{base}/{route}/{segment}`, cached under `{ns}:{name}:{segment}`.
    pub(crate) async fn cached_lookup<T>(&self, name: &str, route: &str, segment: &str) -> Result<T, ApiError>
    where
        T: Serialize + DeserializeOwned,
    {
        let key = Self::key(&format!("{}:{}", name, segment));
        let path = format!("{}/{}/{}", R::BASE_PATH, route, encode_segment(segment));
        self.cached_get(&key, &path).await
    }

    /// `GET {base}/exists/{field}/{value}`, never cached. `exclude_id` leaves
    /// the record being edited out of the check.
    pub(crate) async fn exists(&self, field: &str, value: &str, exclude_id: Option<i64>) -> Result<bool, ApiError> {
        let mut path = format!("{}/exists/{}/{}", R::BASE_PATH, field, encode_segment(value));
        if let Some(id) = exclude_id {
            path.push_str(&format!("?excludeId={}", id));
        }
        self.fetch(&path).await
    }

    /// PATCH a collection route such as `batch/activate`. Clears the
    /// namespace on success; the response body is ignored.
    pub(crate) async fn patch_batch(&self, route: &str, body: &Value) -> Result<(), ApiError> {
        let path = format!("{}/{}", R::BASE_PATH, route);
        self.backend.patch(&path, Some(body)).await?;
        self.invalidate();
        info!(namespace = R::NAMESPACE, route, "Applied batch status change");
        Ok(())
    }
}
