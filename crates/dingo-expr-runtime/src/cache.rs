//! Type-keyed operator cache
//!
//! Maps an original operand type to the operator specialized for it. Keys
//! compare structurally, so independently built but equal types share one
//! entry. Concurrent first lookups for the same key may each build a
//! candidate; only the first one stored is ever handed out.

use dingo_expr_types::Type;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::op::OpFactory;

/// Cache of specialized operators keyed by original type
pub struct OpCache<F> {
    entries: RwLock<HashMap<Type, Arc<F>>>,
}

impl<F> Default for OpCache<F> {
    fn default() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl<F: OpFactory> OpCache<F> {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the operator cached for `key`, building it with `build` on a miss
    ///
    /// `build` returns `None` when no specialization applies; nothing is cached
    /// then and `None` is returned.
    pub fn get_or_build(&self, key: &Type, build: impl FnOnce(&Type) -> Option<F>) -> Option<Arc<F>> {
        if let Some(op) = self.entries.read().get(key) {
            return Some(Arc::clone(op));
        }

        let built = build(key)?;
        let mut entries = self.entries.write();
        let op = entries.entry(key.clone()).or_insert_with(|| {
            log::debug!("cached {} for {}", built.name(), key);
            Arc::new(built)
        });
        Some(Arc::clone(op))
    }

    /// Get the cached operator for `key` without building
    pub fn get(&self, key: &Type) -> Option<Arc<F>> {
        self.entries.read().get(key).cloned()
    }

    /// Number of cached operators
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Check if nothing is cached
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dingo_expr_types::Types;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug)]
    struct Echo(Type);

    impl OpFactory for Echo {
        fn name(&self) -> &'static str {
            "ECHO"
        }

        fn key(&self) -> &Type {
            &self.0
        }

        fn result_type(&self) -> Type {
            self.0.clone()
        }
    }

    #[test]
    fn test_structurally_equal_keys_share_entry() {
        let cache = OpCache::new();
        let a = Types::tuple([Types::int(), Types::string()]);
        let b = Types::tuple([Types::int(), Types::string()]);

        let first = cache.get_or_build(&a, |t| Some(Echo(t.clone()))).unwrap();
        let second = cache.get_or_build(&b, |_| panic!("must hit the cache")).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert!(first.key().ptr_eq(&a));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_not_applicable_is_not_cached() {
        let cache: OpCache<Echo> = OpCache::new();
        let builds = AtomicUsize::new(0);
        for _ in 0..3 {
            let op = cache.get_or_build(&Types::int(), |_| {
                builds.fetch_add(1, Ordering::SeqCst);
                None
            });
            assert!(op.is_none());
        }
        assert_eq!(builds.load(Ordering::SeqCst), 3);
        assert!(cache.is_empty());
        assert!(cache.get(&Types::int()).is_none());
    }

    #[test]
    fn test_racing_builders_converge() {
        let cache = OpCache::new();
        let key = Types::list(Types::list(Types::int()));
        let ops: Vec<Arc<Echo>> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    let key = Types::list(Types::list(Types::int()));
                    let cache = &cache;
                    s.spawn(move || cache.get_or_build(&key, |t| Some(Echo(t.clone()))).unwrap())
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let winner = cache.get(&key).unwrap();
        for op in &ops {
            assert!(Arc::ptr_eq(op, &winner));
        }
    }
}
