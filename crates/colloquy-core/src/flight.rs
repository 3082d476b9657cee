use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Tracks which threads currently have a run in flight.
///
/// Acquisition is try-only: a second caller for the same thread fails
/// immediately rather than queueing. Release happens in [`FlightGuard`]'s
/// `Drop`, so the slot is freed on success, on every error branch, and when
/// the driving future is cancelled mid-poll.
#[derive(Default)]
pub struct FlightRegistry {
    active: Arc<Mutex<HashSet<String>>>,
}

impl FlightRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the flight slot for a thread, or `None` if it is already held.
    pub fn try_begin(&self, thread_id: &str) -> Option<FlightGuard> {
        let mut active = lock(&self.active);
        if !active.insert(thread_id.to_string()) {
            return None;
        }
        Some(FlightGuard {
            active: Arc::clone(&self.active),
            thread_id: thread_id.to_string(),
        })
    }
}

pub struct FlightGuard {
    active: Arc<Mutex<HashSet<String>>>,
    thread_id: String,
}

impl Drop for FlightGuard {
    fn drop(&mut self) {
        lock(&self.active).remove(&self.thread_id);
    }
}

fn lock(active: &Mutex<HashSet<String>>) -> MutexGuard<'_, HashSet<String>> {
    active.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_claim_on_same_thread_fails() {
        let registry = FlightRegistry::new();

        let guard = registry.try_begin("thread_a");
        assert!(guard.is_some());
        assert!(registry.try_begin("thread_a").is_none());
    }

    #[test]
    fn dropping_guard_releases_slot() {
        let registry = FlightRegistry::new();

        let guard = registry.try_begin("thread_a");
        drop(guard);
        assert!(registry.try_begin("thread_a").is_some());
    }

    #[test]
    fn distinct_threads_are_independent() {
        let registry = FlightRegistry::new();

        let _a = registry.try_begin("thread_a");
        assert!(registry.try_begin("thread_b").is_some());
    }
}
