//! Expired Entry Sweep Task
//!
//! Background task that periodically removes expired cache entries.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::backing::BackingStore;
use crate::cache::CacheEngine;

/// Spawns a background task that calls `delete_outdated` every interval.
///
/// The task holds the write lock only for the sweep itself. Abort the
/// returned handle to stop it.
///
/// # Example
/// ```ignore
/// let engine = Arc::new(RwLock::new(CacheEngine::<String>::default()));
/// let cleanup_handle = spawn_cleanup_task(engine.clone(), 60);
/// // Later, during shutdown:
/// cleanup_handle.abort();
/// ```
pub fn spawn_cleanup_task<V, B>(
    engine: Arc<RwLock<CacheEngine<V, B>>>,
    cleanup_interval_secs: u64,
) -> JoinHandle<()>
where
    V: Send + Sync + 'static,
    B: BackingStore + Send + Sync + 'static,
{
    let interval = Duration::from_secs(cleanup_interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting expired-entry sweep with interval of {} seconds",
            cleanup_interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = {
                let mut guard = engine.write().await;
                guard.delete_outdated()
            };

            if removed > 0 {
                info!("Sweep: removed {} expired entries", removed);
            } else {
                debug!("Sweep: no expired entries found");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    type Shared = Arc<RwLock<CacheEngine<String>>>;

    fn shared_engine() -> Shared {
        Arc::new(RwLock::new(CacheEngine::default()))
    }

    #[tokio::test]
    async fn test_cleanup_task_removes_expired_entries() {
        let engine = shared_engine();
        {
            let mut guard = engine.write().await;
            guard.set("expired", "value".to_string(), None, Some(0.0));
            guard.set("expire_soon", "value".to_string(), Some("ns"), Some(0.5));
        }

        let handle = spawn_cleanup_task(engine.clone(), 1);

        tokio::time::sleep(Duration::from_millis(1500)).await;

        {
            let guard = engine.read().await;
            assert_eq!(guard.size(), 0, "Expired entries should have been swept");
            assert_eq!(guard.stats().swept, 2);
        }

        handle.abort();
    }

    #[tokio::test]
    async fn test_cleanup_task_preserves_valid_entries() {
        let engine = shared_engine();
        {
            let mut guard = engine.write().await;
            guard.set("long_lived", "value".to_string(), None, Some(3600.0));
        }

        let handle = spawn_cleanup_task(engine.clone(), 1);

        tokio::time::sleep(Duration::from_millis(1500)).await;

        {
            let mut guard = engine.write().await;
            let entry = guard.get("long_lived", None);
            assert_eq!(entry.map(|e| e.value.as_str()), Some("value"));
        }

        handle.abort();
    }

    #[tokio::test]
    async fn test_cleanup_task_can_be_aborted() {
        let handle = spawn_cleanup_task(shared_engine(), 1);

        handle.abort();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}
