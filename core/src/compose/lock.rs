use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// One async lock per playlist id, entries are dropped once nobody holds them.
#[derive(Clone, Default)]
pub struct PlaylistLocks {
    inner: Arc<Mutex<BTreeMap<i64, Arc<AsyncMutex<()>>>>>,
}

impl PlaylistLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn lock(&self, playlist_id: i64) -> OwnedMutexGuard<()> {
        let entry = {
            let mut map = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
            map.retain(|_, m| Arc::strong_count(m) > 1);
            map.entry(playlist_id).or_default().clone()
        };
        entry.lock_owned().await
    }

    /// Number of ids with a live entry.
    pub fn len(&self) -> usize {
        let map = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        map.values().filter(|m| Arc::strong_count(m) > 1).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn same_id_is_serialized() {
        let locks = PlaylistLocks::new();
        let guard = locks.lock(1).await;
        assert_eq!(locks.len(), 1);

        let other = locks.clone();
        let waiter = tokio::spawn(async move {
            let _g = other.lock(1).await;
        });
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!waiter.is_finished());

        let _g2 = locks.lock(2).await;

        drop(guard);
        waiter.await.unwrap();
    }

    #[tokio::test]
    async fn released_entries_are_pruned() {
        let locks = PlaylistLocks::new();
        drop(locks.lock(7).await);
        assert!(locks.is_empty());
    }
}
