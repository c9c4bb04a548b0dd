use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

database_derived!(
    /// Trip-once circuit breaker guarding the durable driver
    ///
    /// Trips on the first persistence failure and stays tripped for
    /// the remainder of the process lifetime; the transition is
    /// logged so operators can see the store was abandoned.
    #[derive(Default, Debug)]
    pub struct Breaker {
        tripped: Arc<AtomicBool>,
    }
);

impl Breaker {
    pub fn is_tripped(&self) -> bool {
        self.tripped.load(Ordering::Relaxed)
    }

    pub fn trip(&self, reason: &str) {
        if !self.tripped.swap(true, Ordering::Relaxed) {
            warn!("durable store unavailable ({reason}), continuing on the in-memory store");
        }
    }
}
