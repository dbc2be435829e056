#![forbid(unsafe_code)]

//! Bounded LRU cache of layout results.
//!
//! Layout is recomputed every frame, usually with the same areas and
//! constraints. The cache memoises [`Layout::split`] results keyed by the
//! area and a canonical form of the layout.
//!
//! # Example
//! ```
//! use tessel_core::Rect;
//! use tessel_layout::{Constraint, Layout, LayoutCache};
//!
//! let mut cache = LayoutCache::new(16);
//! let layout = Layout::horizontal([Constraint::Length(10), Constraint::Min(0)]);
//! let area = Rect::new(0, 0, 80, 24);
//!
//! let first = layout.split_cached(area, &mut cache);
//! let second = layout.split_cached(area, &mut cache);
//! assert!(std::rc::Rc::ptr_eq(&first, &second));
//!
//! let stats = cache.stats();
//! assert_eq!((stats.hits, stats.misses), (1, 1));
//! ```

use std::num::NonZeroUsize;
use std::rc::Rc;

use lru::LruCache;
use rustc_hash::FxBuildHasher;
use tessel_core::Rect;

use crate::Layout;

/// Default cache capacity.
pub const DEFAULT_CACHE_CAPACITY: usize = 512;

/// Statistics about cache performance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutCacheStats {
    /// Number of cache hits.
    pub hits: u64,
    /// Number of cache misses.
    pub misses: u64,
    /// Current number of entries.
    pub entries: usize,
    /// Maximum capacity.
    pub capacity: usize,
}

impl LayoutCacheStats {
    /// Calculate hit rate (0.0 to 1.0).
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Cache key: the target area plus the layout with ratios in lowest terms.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LayoutCacheKey {
    area: Rect,
    layout: Layout,
}

impl LayoutCacheKey {
    /// Build the key for splitting `area` with `layout`.
    #[must_use]
    pub fn new(area: Rect, layout: &Layout) -> Self {
        let mut layout = layout.clone();
        for constraint in &mut layout.constraints {
            *constraint = constraint.canonical();
        }
        Self { area, layout }
    }
}

/// LRU cache for layout results.
///
/// Hits hand out a clone of the stored `Rc`, so they never allocate.
/// Not thread-safe; keep one per rendering session.
#[derive(Debug)]
pub struct LayoutCache {
    cache: LruCache<LayoutCacheKey, Rc<[Rect]>, FxBuildHasher>,
    hits: u64,
    misses: u64,
}

impl LayoutCache {
    /// Create a new cache with the specified capacity.
    ///
    /// If capacity is zero, defaults to 1.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: LruCache::with_hasher(capacity, FxBuildHasher),
            hits: 0,
            misses: 0,
        }
    }

    /// Return the cached result for `key`, or compute, store, and return it.
    pub fn get_or_compute_with<F>(&mut self, key: LayoutCacheKey, compute: F) -> Rc<[Rect]>
    where
        F: FnOnce() -> Rc<[Rect]>,
    {
        if let Some(rects) = self.cache.get(&key) {
            self.hits += 1;
            tracing::trace!(area = ?key.area, "layout cache hit");
            return Rc::clone(rects);
        }

        self.misses += 1;
        tracing::trace!(area = ?key.area, "layout cache miss");
        let rects = compute();
        self.cache.put(key, Rc::clone(&rects));
        rects
    }

    /// Check if `key` is cached, without touching LRU order.
    #[must_use]
    pub fn contains(&self, key: &LayoutCacheKey) -> bool {
        self.cache.contains(key)
    }

    /// Clear the cache. Statistics are kept.
    pub fn clear(&mut self) {
        self.cache.clear();
    }

    /// Reset statistics.
    pub fn reset_stats(&mut self) {
        self.hits = 0;
        self.misses = 0;
    }

    /// Get cache statistics.
    #[must_use]
    pub fn stats(&self) -> LayoutCacheStats {
        LayoutCacheStats {
            hits: self.hits,
            misses: self.misses,
            entries: self.cache.len(),
            capacity: self.cache.cap().get(),
        }
    }

    /// Get the current number of cached entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Check if the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}
