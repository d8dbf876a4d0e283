//! Per-thread concurrency-unit identifiers.
//!
//! The JSON `r` field and the color console `r<id>` marker use a small
//! integer identifying the calling thread. Ids are assigned from a global
//! counter on first use and cached thread-locally, so the lookup on the
//! logging hot path is a thread-local read.

use std::cell::Cell;
use std::sync::atomic::{AtomicI64, Ordering};

static NEXT_ID: AtomicI64 = AtomicI64::new(1);

thread_local! {
    static THREAD_ID: Cell<i64> = const { Cell::new(0) };
}

/// Returns a process-unique id for the calling thread.
///
/// Ids start at 1 and are handed out in first-use order; they are stable
/// for the lifetime of the thread. This never fails.
pub fn id() -> i64 {
    THREAD_ID.with(|cache| {
        let cached = cache.get();
        if cached != 0 {
            return cached;
        }
        let fresh = NEXT_ID.fetch_add(1, Ordering::Relaxed);
        cache.set(fresh);
        fresh
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_id_positive_and_stable() {
        let first = id();
        assert!(first > 0);
        assert_eq!(id(), first);
    }

    #[test]
    fn test_ids_unique_across_threads() {
        let mut ids = HashSet::new();
        ids.insert(id());
        for _ in 0..4 {
            let handle = std::thread::spawn(|| (id(), id()));
            let (a, b) = handle.join().unwrap();
            assert_eq!(a, b);
            assert!(ids.insert(a), "duplicate thread id {a}");
        }
    }
}
