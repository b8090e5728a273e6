//! Expiry Sweep Task
//!
//! Background task that periodically removes expired cache entries.
//!
//! The cache works without it: expiry is otherwise lazy, and an expired
//! entry that is never looked up again stays resident until capacity
//! pressure evicts it. The sweep bounds that retention to one interval.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CacheManager;

/// Spawns a background task that periodically purges expired cache entries.
///
/// The task runs in an infinite loop, sleeping for `interval` between runs.
/// Each run holds the cache lock only for the duration of the purge.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be aborted on shutdown.
///
/// # Example
/// ```ignore
/// let cache: CacheManager = CacheManager::new();
/// let sweep_handle = spawn_sweep_task(cache.clone(), Duration::from_secs(60));
/// // Later, during shutdown:
/// sweep_handle.abort();
/// ```
pub fn spawn_sweep_task<V>(cache: CacheManager<V>, interval: Duration) -> JoinHandle<()>
where
    V: Send + 'static,
{
    tokio::spawn(async move {
        info!("Starting expiry sweep task with interval of {:?}", interval);

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.purge_expired();

            if removed > 0 {
                info!("Expiry sweep: removed {} expired entries", removed);
            } else {
                debug!("Expiry sweep: no expired entries found");
            }
        }
    })
}
