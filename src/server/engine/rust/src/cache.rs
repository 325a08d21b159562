/* src/server/engine/rust/src/cache.rs */

use std::fmt::Debug;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::OnceCell;
use tracing::{debug, warn};

/// Unbounded keyed memo table with single-flight loads.
///
/// Concurrent first access to a key runs the loader once; the others await
/// the same cell. A failed load leaves nothing behind, so the next caller
/// retries. Entries live until `remove`, `retain` or `clear`.
pub struct MemoCache<K, V> {
  name: &'static str,
  entries: DashMap<K, Arc<OnceCell<V>>>,
}

impl<K, V> MemoCache<K, V>
where
  K: Eq + Hash + Clone + Debug,
  V: Clone,
{
  pub fn new(name: &'static str) -> Self {
    Self { name, entries: DashMap::new() }
  }

  /// Return the cached value for `key`, loading it on a miss.
  ///
  /// With `use_cache` false the value is loaded fresh and any entry for the
  /// key is dropped afterwards.
  pub async fn get_or_load<F, Fut, E>(&self, key: K, use_cache: bool, load: F) -> Result<V, E>
  where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<V, E>>,
  {
    if !use_cache {
      let result = load().await;
      if self.entries.remove(&key).is_some() {
        debug!(cache = self.name, ?key, "cache bypassed, entry invalidated");
      }
      return result;
    }

    let cell = self.entries.entry(key.clone()).or_default().clone();
    if let Some(value) = cell.get() {
      debug!(cache = self.name, ?key, "cache hit");
      return Ok(value.clone());
    }

    debug!(cache = self.name, ?key, "cache miss");
    match cell.get_or_try_init(load).await {
      Ok(value) => Ok(value.clone()),
      Err(err) => {
        // only evict the cell this call populated; a newer one may exist
        self.entries.remove_if(&key, |_, current| Arc::ptr_eq(current, &cell));
        warn!(cache = self.name, ?key, "load failed, entry evicted");
        Err(err)
      }
    }
  }

  /// Value for `key` if it has finished loading.
  pub fn peek(&self, key: &K) -> Option<V> {
    self.entries.get(key).and_then(|cell| cell.get().cloned())
  }

  pub fn remove(&self, key: &K) -> bool {
    self.entries.remove(key).is_some()
  }

  pub fn retain(&self, mut keep: impl FnMut(&K) -> bool) {
    self.entries.retain(|key, _| keep(key));
  }

  pub fn clear(&self) {
    self.entries.clear();
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}
