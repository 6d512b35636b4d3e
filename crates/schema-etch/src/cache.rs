//! Collection cache
//!
//! Results are keyed by the ordered sequence of root handles. Each key gets
//! its own [`OnceCell`], so concurrent callers asking for the same roots
//! wait for one computation instead of repeating it. A failed computation
//! leaves its cell empty and the next caller tries again.

use crate::collector::Collection;
use crate::diagnostics::EtchResult;
use once_cell::sync::{Lazy, OnceCell};
use schema_weld::TypeHandle;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

type Slot = Arc<OnceCell<Arc<Collection>>>;

static GLOBAL: Lazy<Arc<DocumentationCache>> = Lazy::new(|| Arc::new(DocumentationCache::new()));

/// Single-flight cache of collection results
#[derive(Debug, Default)]
pub struct DocumentationCache {
    slots: Mutex<HashMap<Vec<TypeHandle>, Slot>>,
}

impl DocumentationCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide cache
    pub fn global() -> Arc<DocumentationCache> {
        GLOBAL.clone()
    }

    fn slots(&self) -> MutexGuard<'_, HashMap<Vec<TypeHandle>, Slot>> {
        // The map is only ever inserted into, so a poisoned lock is still usable
        self.slots.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Return the cached result for `roots`, computing it at most once
    pub fn get_or_collect<F>(&self, roots: &[TypeHandle], collect: F) -> EtchResult<Arc<Collection>>
    where
        F: FnOnce() -> EtchResult<Collection>,
    {
        let slot = self.slots().entry(roots.to_vec()).or_default().clone();
        // The map lock is released here; only callers of the same key wait
        slot.get_or_try_init(|| {
            debug!(roots = roots.len(), "computing documentation for cache");
            collect().map(Arc::new)
        })
        .cloned()
    }

    /// The cached result for `roots`, if it has been computed
    pub fn get(&self, roots: &[TypeHandle]) -> Option<Arc<Collection>> {
        self.slots().get(roots).and_then(|slot| slot.get().cloned())
    }

    /// Number of keys with a computed result
    pub fn len(&self) -> usize {
        self.slots().values().filter(|slot| slot.get().is_some()).count()
    }

    /// Check if nothing has been computed
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forget every result
    pub fn clear(&self) {
        self.slots().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::Collector;
    use crate::diagnostics::EtchError;
    use crate::test::{end_to_end_graph, handles};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Barrier;
    use std::thread;

    #[test]
    fn test_computes_once_per_key() {
        let cache = DocumentationCache::new();
        let graph = end_to_end_graph();
        let roots = handles(&["model::A"]);
        let calls = AtomicUsize::new(0);

        let collect = || {
            calls.fetch_add(1, Ordering::SeqCst);
            Collector::new(&graph).collect_with_diagnostics(&roots)
        };
        let first = cache.get_or_collect(&roots, collect).unwrap();
        let second = cache.get_or_collect(&roots, collect).unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_key_is_the_ordered_root_sequence() {
        let cache = DocumentationCache::new();
        let calls = AtomicUsize::new(0);
        let collect = || {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(Collection::default())
        };

        cache.get_or_collect(&handles(&["a::A", "b::B"]), collect).unwrap();
        cache.get_or_collect(&handles(&["b::B", "a::A"]), collect).unwrap();
        cache.get_or_collect(&handles(&["a::A"]), collect).unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert!(cache.get(&handles(&["b::B", "a::A"])).is_some());
        assert!(cache.get(&handles(&["c::C"])).is_none());
    }

    #[test]
    fn test_failures_are_not_cached() {
        let cache = DocumentationCache::new();
        let roots = handles(&["a::A"]);

        let failed = cache.get_or_collect(&roots, || Err(EtchError::config("boom")));
        assert!(failed.is_err());
        assert!(cache.is_empty());

        let ok = cache.get_or_collect(&roots, || Ok(Collection::default()));
        assert!(ok.is_ok());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_concurrent_callers_share_one_computation() {
        let cache = Arc::new(DocumentationCache::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let barrier = Arc::new(Barrier::new(8));

        let workers: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let calls = Arc::clone(&calls);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    cache
                        .get_or_collect(&handles(&["model::A"]), || {
                            calls.fetch_add(1, Ordering::SeqCst);
                            thread::sleep(std::time::Duration::from_millis(20));
                            let graph = end_to_end_graph();
                            let result = Collector::new(&graph)
                                .collect_with_diagnostics(&handles(&["model::A"]));
                            result
                        })
                        .unwrap()
                })
            })
            .collect();

        let results: Vec<_> = workers.into_iter().map(|w| w.join().unwrap()).collect();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(results.iter().all(|r| Arc::ptr_eq(r, &results[0])));
    }
}
