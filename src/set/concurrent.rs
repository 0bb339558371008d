//! Thread-safe ordered set wrapper.
//!
//! [`ConcurrentOrderedSet`] owns an [`OrderedSet`] behind a
//! `parking_lot::RwLock` and forwards every operation under the appropriate
//! lock discipline:
//!
//! - read-only operations take a shared lock
//! - mutating operations take an exclusive lock for the full call
//! - anything handed back to the caller is an independent copy: the inner
//!   storage is never exposed by reference
//!
//! The wrapper serializes writers and excludes readers from concurrent
//! writers. No ordering is guaranteed among queued writers beyond what the
//! lock provides.

use parking_lot::RwLock;
use static_assertions::assert_impl_all;

use super::ordered::OrderedSet;

/// A reader/writer-locked [`OrderedSet`] that is safe to share across
/// threads.
///
/// All methods take `&self`; interior mutability is provided by the lock.
/// The unwrapped [`OrderedSet`] is not self-synchronizing and must not be
/// shared across threads without this wrapper.
///
/// # Examples
///
/// ```rust
/// use ordset::{ConcurrentOrderedSet, OrderedSet};
/// use std::sync::Arc;
/// use std::thread;
///
/// let shared = Arc::new(ConcurrentOrderedSet::new(OrderedSet::new(
///     |a: &i32, b: &i32| a < b,
/// )));
///
/// let handles: Vec<_> = (0..4)
///     .map(|chunk| {
///         let shared = Arc::clone(&shared);
///         thread::spawn(move || {
///             shared.insert_batch((chunk * 10..chunk * 10 + 10).collect(), true)
///         })
///     })
///     .collect();
/// for handle in handles {
///     handle.join().unwrap();
/// }
///
/// assert_eq!(shared.len(), 40);
/// ```
pub struct ConcurrentOrderedSet<T> {
    inner: RwLock<OrderedSet<T>>,
}

impl<T> ConcurrentOrderedSet<T> {
    /// Wraps a set, taking exclusive ownership of it.
    #[must_use]
    pub fn new(set: OrderedSet<T>) -> Self {
        Self {
            inner: RwLock::new(set),
        }
    }

    /// Consumes the wrapper, returning the inner set.
    #[must_use]
    pub fn into_inner(self) -> OrderedSet<T> {
        self.inner.into_inner()
    }

    // =========================================================================
    // Read-locked operations
    // =========================================================================

    /// Returns the number of elements. Shared lock.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Returns `true` if the set contains no elements. Shared lock.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Lower-bound search; see [`OrderedSet::search`]. Shared lock.
    #[must_use]
    pub fn search(&self, value: &T, from: usize) -> usize {
        self.inner.read().search(value, from)
    }

    /// Membership test; see [`OrderedSet::contains`]. Shared lock.
    #[must_use]
    pub fn contains(&self, value: &T, from: usize) -> bool {
        self.inner.read().contains(value, from)
    }

    /// Batch membership test; see [`OrderedSet::contains_batch`]. Shared
    /// lock.
    #[must_use]
    pub fn contains_batch(&self, batch: &[T], from: usize) -> bool {
        self.inner.read().contains_batch(batch, from)
    }

    /// Positional equality against a slice; see [`OrderedSet::equals`].
    /// Shared lock.
    #[must_use]
    pub fn equals(&self, other: &[T]) -> bool {
        self.inner.read().equals(other)
    }

    /// Materializes a snapshot of the sorted contents.
    ///
    /// Clones the inner set under a shared lock, releases the lock, then
    /// extracts the sequence from the clone. The caller's view can never be
    /// mutated concurrently and never aliases internal storage.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        let snapshot = self.inner.read().clone();
        snapshot.into_items()
    }

    /// Returns a freshly wrapped empty sibling sharing comparators; see
    /// [`OrderedSet::zero`].
    #[must_use]
    pub fn zero(&self) -> Self {
        Self::new(self.inner.read().zero())
    }

    /// Returns a freshly wrapped sibling built from `items`; see
    /// [`OrderedSet::derive`].
    #[must_use]
    pub fn derive(&self, items: Vec<T>, sorted: bool) -> Self {
        Self::new(self.inner.read().derive(items, sorted))
    }

    // =========================================================================
    // Write-locked operations
    // =========================================================================

    /// Inserts a single element; see [`OrderedSet::insert`]. Exclusive lock.
    pub fn insert(&self, value: T) -> usize {
        self.inner.write().insert(value)
    }

    /// Merges a batch; see [`OrderedSet::insert_batch`]. Exclusive lock for
    /// the full merge.
    pub fn insert_batch(&self, batch: Vec<T>, sorted: bool) -> usize {
        self.inner.write().insert_batch(batch, sorted)
    }

    /// Inserts or overwrites a single element; see [`OrderedSet::replace`].
    /// Exclusive lock.
    pub fn replace(&self, value: T) -> usize {
        self.inner.write().replace(value)
    }

    /// Merges a batch with overwrite-on-match; see
    /// [`OrderedSet::replace_batch`]. Exclusive lock.
    pub fn replace_batch(&self, batch: Vec<T>, sorted: bool) -> usize {
        self.inner.write().replace_batch(batch, sorted)
    }

    /// Removes a single element; see [`OrderedSet::erase`]. Exclusive lock.
    pub fn erase(&self, value: &T) -> usize {
        self.inner.write().erase(value)
    }

    /// Removes a batch; see [`OrderedSet::erase_batch`]. Exclusive lock.
    pub fn erase_batch(&self, batch: &[T], sorted: bool) -> usize {
        self.inner.write().erase_batch(batch, sorted)
    }

    /// Re-sorts the contents in place; see [`OrderedSet::resort`]. Exclusive
    /// lock.
    pub fn resort(&self) {
        self.inner.write().resort();
    }
}

impl<T: Clone> ConcurrentOrderedSet<T> {
    /// Returns a freshly wrapped intersection of the two sets.
    ///
    /// Unlike its single-threaded counterpart's receiver, neither operand is
    /// mutated. `other` is snapshotted first and its lock released before
    /// `self` is locked, so the two locks are never held simultaneously and
    /// wrapper-to-wrapper intersection cannot deadlock regardless of call
    /// order.
    ///
    /// The same-comparator precondition of [`OrderedSet::intersection`]
    /// applies.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        let other_snapshot = other.inner.read().clone();
        Self::new(self.inner.read().intersection(&other_snapshot))
    }
}

impl<T: Clone> Clone for ConcurrentOrderedSet<T> {
    /// Clones the inner set under a shared lock into a new, independent,
    /// unlocked wrapper.
    fn clone(&self) -> Self {
        Self::new(self.inner.read().clone())
    }
}

impl<T> From<OrderedSet<T>> for ConcurrentOrderedSet<T> {
    fn from(set: OrderedSet<T>) -> Self {
        Self::new(set)
    }
}

impl<T: std::fmt::Debug + Clone> std::fmt::Debug for ConcurrentOrderedSet<T> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.debug_set().entries(self.to_vec()).finish()
    }
}

// The comparators are `Arc<dyn Fn + Send + Sync>`, so the wrapper is
// shareable exactly when the element type is.
assert_impl_all!(ConcurrentOrderedSet<i32>: Send, Sync);
assert_impl_all!(ConcurrentOrderedSet<String>: Send, Sync);

// =============================================================================
// Tests
// =============================================================================
