use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

/// Per-target serialization
///
/// Every mutation of a target's report set and alert runs under
/// that target's lock; distinct targets proceed concurrently. The
/// registry itself is only locked long enough to hand out entries.
#[derive(Default, Clone)]
pub struct TargetLocks {
    inner: Arc<Mutex<HashMap<String, Arc<Mutex<()>>>>>,
}

impl TargetLocks {
    pub async fn acquire(&self, target_id: &str) -> OwnedMutexGuard<()> {
        let entry = {
            let mut registry = self.inner.lock().await;

            // drop entries nobody holds any more, otherwise the
            // registry grows by one entry per target ever seen
            registry.retain(|_, lock| Arc::strong_count(lock) > 1);

            registry
                .entry(target_id.to_string())
                .or_default()
                .clone()
        };

        entry.lock_owned().await
    }

    #[cfg(test)]
    async fn tracked_targets(&self) -> usize {
        self.inner.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::TargetLocks;
    use std::time::Duration;

    #[tokio::test]
    async fn serializes_per_target_only() {
        let locks = TargetLocks::default();
        let held = locks.acquire("post-a").await;

        // same target blocks
        assert!(
            tokio::time::timeout(Duration::from_millis(50), locks.acquire("post-a"))
                .await
                .is_err()
        );

        // other targets are unaffected
        let _other = locks.acquire("post-b").await;

        drop(held);
        let _reacquired = locks.acquire("post-a").await;
    }

    #[tokio::test]
    async fn released_locks_are_evicted() {
        let locks = TargetLocks::default();

        for index in 0..100 {
            let _guard = locks.acquire(&format!("post-{index}")).await;
        }

        // the last acquire swept everything released before it
        assert_eq!(locks.tracked_targets().await, 1);

        // held locks survive the sweep
        let _held = locks.acquire("post-a").await;
        let _other = locks.acquire("post-b").await;
        assert_eq!(locks.tracked_targets().await, 2);
    }
}
