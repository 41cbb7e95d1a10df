//! Evaluation cache for recursive quest completion checks.
//!
//! `QUEST_COMPLETED` (without a claim requirement) evaluates the referenced
//! quest's activation and goal, which may themselves reference other quests.
//! Refreshing a whole quest list re-derives the same sub-quests over and
//! over. While an epoch is open, each quest's verdict is computed once and
//! then served from memory.
//!
//! ## Contract
//!
//! - The cache is inactive until [`PredicateCache::open_epoch`]; while
//!   inactive every lookup misses and nothing is stored.
//! - Entries are never invalidated individually. The caller must close the
//!   epoch (drop the [`CacheEpoch`] guard) before mutating game state.
//! - Epochs do not nest. Opening a second one reports
//!   [`PredicateError::EpochAlreadyOpen`].
//! - The cache is not `Sync`. Concurrent hosts keep one per thread.
//!
//! ```
//! use game_predicates::cache::PredicateCache;
//!
//! let cache = PredicateCache::new();
//! assert!(!cache.is_open());
//!
//! {
//!     let _epoch = cache.open_epoch().unwrap();
//!     assert!(cache.is_open());
//!     assert!(cache.open_epoch().is_err());
//! }
//!
//! assert!(!cache.is_open());
//! ```

use std::cell::RefCell;

use rustc_hash::FxHashMap;

use crate::core::{PredicateError, PredicateResult};

/// Quest-name keyed memo table, active only inside an epoch.
#[derive(Debug, Default)]
pub struct PredicateCache {
    entries: RefCell<Option<FxHashMap<String, bool>>>,
}

impl PredicateCache {
    /// Create an inactive cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open an epoch with an empty table.
    ///
    /// The returned guard closes the epoch when dropped.
    pub fn open_epoch(&self) -> PredicateResult<CacheEpoch<'_>> {
        let mut entries = self.entries.borrow_mut();
        if entries.is_some() {
            return Err(PredicateError::EpochAlreadyOpen);
        }
        *entries = Some(FxHashMap::default());
        tracing::debug!("opened predicate cache epoch");
        Ok(CacheEpoch { cache: self })
    }

    fn close_epoch(&self) {
        if let Some(dropped) = self.entries.borrow_mut().take() {
            tracing::debug!(entries = dropped.len(), "closed predicate cache epoch");
        }
    }

    /// Is an epoch currently open?
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.entries.borrow().is_some()
    }

    /// Number of memoized verdicts (0 when closed).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().as_ref().map_or(0, FxHashMap::len)
    }

    /// True when nothing is memoized.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Memoized verdict for `key`. Always `None` outside an epoch.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<bool> {
        self.entries.borrow().as_ref()?.get(key).copied()
    }

    /// Record a verdict. Ignored outside an epoch.
    pub fn store(&self, key: &str, verdict: bool) {
        if let Some(entries) = self.entries.borrow_mut().as_mut() {
            entries.insert(key.to_string(), verdict);
        }
    }

    /// Serve `key` from the table, or compute and record it.
    ///
    /// No borrow is held while `compute` runs, so it may recurse into the
    /// cache. Errors are returned without being recorded.
    pub fn get_or_compute<F>(&self, key: &str, compute: F) -> PredicateResult<bool>
    where
        F: FnOnce() -> PredicateResult<bool>,
    {
        if let Some(hit) = self.lookup(key) {
            tracing::debug!(key, "predicate cache hit");
            return Ok(hit);
        }
        if self.is_open() {
            tracing::debug!(key, "predicate cache miss");
        }
        let verdict = compute()?;
        self.store(key, verdict);
        Ok(verdict)
    }
}

/// Scope guard for an open cache epoch.
///
/// Dropping the guard (or calling [`CacheEpoch::close`]) discards every
/// memoized entry and deactivates the cache.
#[derive(Debug)]
#[must_use = "the epoch closes as soon as the guard is dropped"]
pub struct CacheEpoch<'a> {
    cache: &'a PredicateCache,
}

impl CacheEpoch<'_> {
    /// Close the epoch explicitly.
    pub fn close(self) {
        drop(self);
    }
}

impl Drop for CacheEpoch<'_> {
    fn drop(&mut self) {
        self.cache.close_epoch();
    }
}
