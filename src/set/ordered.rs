//! Core ordered set container.
//!
//! [`OrderedSet`] owns a `Vec<T>` kept continuously sorted under a
//! caller-supplied strict weak ordering, with duplicate detection delegated
//! to an independent identity predicate. Every operation is built on a single
//! lower-bound binary search primitive; batch operations merge their input
//! with a monotonically advancing cursor so that successive searches only
//! scan the remainder of the container not yet consumed.
//!
//! # Time Complexity
//!
//! | Operation        | Cost                                  |
//! |------------------|---------------------------------------|
//! | `search`         | O(log n)                              |
//! | `contains`       | O(log n)                              |
//! | `contains_batch` | O(m log m + m log n)                  |
//! | `insert`/`erase` | O(log n) search + O(n) shift          |
//! | `insert_batch`   | O(m log m) pre-sort + cursor merge    |
//! | `intersection`   | O(m log n), cursor-bounded            |
//! | `equals`         | O(n)                                  |
//!
//! where n is the container length and m the batch length.

use smallvec::SmallVec;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// Shared strict-weak-ordering predicate: `less(a, b)` is true when `a`
/// sorts strictly before `b`.
pub type LessFn<T> = Arc<dyn Fn(&T, &T) -> bool + Send + Sync>;

/// Shared identity predicate: `equal(a, b)` is true when `a` and `b` are the
/// same element for the purposes of presence, replacement, and erasure.
pub type EqualFn<T> = Arc<dyn Fn(&T, &T) -> bool + Send + Sync>;

/// Inline capacity of the temporary reference buffers used by non-mutating
/// batch queries. Queries up to this size sort without a heap allocation.
const QUERY_BUFFER: usize = 8;

/// Message constant for debug panics when a "trust me, it is sorted"
/// adoption path receives unordered input.
const ORDER_INVARIANT_PANIC_MESSAGE: &str =
    "sorted adoption requires elements ordered under the set's comparator";

/// A dynamically sized sequence kept continuously sorted by a caller-supplied
/// ordering function, with replace-on-duplicate-key semantics decided by an
/// independent equality predicate.
///
/// # Ordering vs. identity
///
/// The container maintains two invariants:
///
/// - adjacent elements are ordered under `less` (ties allowed only between
///   elements that are *not* `equal`)
/// - no two stored elements satisfy `equal`
///
/// Because equality is checked only among order-tied candidates located via
/// `less`, two elements may tie under the ordering yet remain distinct keys.
///
/// # Caller contracts
///
/// Documented preconditions are not runtime-checked in release builds;
/// violating them yields silently wrong results rather than an error:
///
/// - `less` must be a strict weak ordering over all stored elements
/// - adoption paths (`sorted == true`) trust the input ordering
/// - [`intersection`](Self::intersection) requires `other` to be ordered
///   under the same comparator as `self`
///
/// Debug builds validate the adoption and intersection preconditions with
/// `debug_assert!`.
///
/// # Examples
///
/// ```rust
/// use ordset::OrderedSet;
///
/// let mut set = OrderedSet::new(|a: &i32, b: &i32| a < b);
/// assert_eq!(set.insert_batch(vec![2, 6, 4, 5, 4, 2, 3, 0, 1], false), 7);
/// assert_eq!(set.as_slice(), &[0, 1, 2, 3, 4, 5, 6]);
///
/// assert!(set.contains(&0, 0));
/// assert!(!set.contains(&0, 1)); // search restricted past index 0
/// ```
#[derive(Clone)]
pub struct OrderedSet<T> {
    items: Vec<T>,
    less: LessFn<T>,
    equal: EqualFn<T>,
    stable: bool,
}

// =============================================================================
// Construction
// =============================================================================

impl<T> OrderedSet<T> {
    /// Creates an empty set ordered by `less`, with identity decided by
    /// structural equality (`PartialEq`).
    ///
    /// Batch pre-sorts use an unstable sort; see [`new_stable`](Self::new_stable)
    /// when the relative order of order-tied batch elements must be
    /// preserved.
    #[must_use]
    pub fn new(less: impl Fn(&T, &T) -> bool + Send + Sync + 'static) -> Self
    where
        T: PartialEq + 'static,
    {
        Self::with_equality(less, T::eq)
    }

    /// Creates an empty set like [`new`](Self::new), but batch pre-sorts use
    /// a stability-preserving sort.
    #[must_use]
    pub fn new_stable(less: impl Fn(&T, &T) -> bool + Send + Sync + 'static) -> Self
    where
        T: PartialEq + 'static,
    {
        Self::with_equality_stable(less, T::eq)
    }

    /// Creates an empty set with a decoupled identity predicate.
    ///
    /// `equal` decides duplicate detection, replacement targets, and erasure
    /// targets independently of the sort order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordset::OrderedSet;
    ///
    /// // Sorted by id, identified by id: payload fields never affect order.
    /// let set = OrderedSet::with_equality(
    ///     |a: &(i32, &str), b: &(i32, &str)| a.0 < b.0,
    ///     |a, b| a.0 == b.0,
    /// );
    /// assert!(set.is_empty());
    /// ```
    #[must_use]
    pub fn with_equality(
        less: impl Fn(&T, &T) -> bool + Send + Sync + 'static,
        equal: impl Fn(&T, &T) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            items: Vec::new(),
            less: Arc::new(less),
            equal: Arc::new(equal),
            stable: false,
        }
    }

    /// Creates an empty set like [`with_equality`](Self::with_equality), but
    /// batch pre-sorts use a stability-preserving sort.
    #[must_use]
    pub fn with_equality_stable(
        less: impl Fn(&T, &T) -> bool + Send + Sync + 'static,
        equal: impl Fn(&T, &T) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            stable: true,
            ..Self::with_equality(less, equal)
        }
    }

    /// Builds a set from an unsorted vector: sorts, deduplicates, and adopts.
    #[must_use]
    pub fn from_vec(items: Vec<T>, less: impl Fn(&T, &T) -> bool + Send + Sync + 'static) -> Self
    where
        T: PartialEq + 'static,
    {
        let mut set = Self::new(less);
        set.insert_batch(items, false);
        set
    }

    /// Builds a set by adopting an already-sorted vector directly, skipping
    /// the sort and merge passes.
    ///
    /// The input ordering is trusted (validated only by `debug_assert!` in
    /// debug builds); an unordered input breaks every subsequent search.
    #[must_use]
    pub fn from_sorted_vec(
        items: Vec<T>,
        less: impl Fn(&T, &T) -> bool + Send + Sync + 'static,
    ) -> Self
    where
        T: PartialEq + 'static,
    {
        let mut set = Self::new(less);
        set.insert_batch(items, true);
        set
    }

    /// Returns an empty sibling sharing this set's comparators and stability
    /// flag.
    #[must_use]
    pub fn zero(&self) -> Self {
        Self {
            items: Vec::new(),
            less: Arc::clone(&self.less),
            equal: Arc::clone(&self.equal),
            stable: self.stable,
        }
    }

    /// Builds a sibling set from `items`, sharing this set's comparators.
    ///
    /// With `sorted == false` the input is sorted and deduplicated; with
    /// `sorted == true` it is adopted directly under the caller contract of
    /// [`insert_batch`](Self::insert_batch).
    #[must_use]
    pub fn derive(&self, items: Vec<T>, sorted: bool) -> Self {
        let mut sibling = self.zero();
        sibling.insert_batch(items, sorted);
        sibling
    }
}

// =============================================================================
// Queries
// =============================================================================

impl<T> OrderedSet<T> {
    /// Returns the number of elements in the set.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the set contains no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns a view of the sorted contents.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Returns a mutable view of the sorted contents.
    ///
    /// Mutating elements through this view can break the ordering invariant;
    /// call [`resort`](Self::resort) afterwards to restore it before using
    /// any search-based operation.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.items
    }

    /// Returns a sorted `Vec` containing clones of all elements.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.items.clone()
    }

    /// Consumes the set, returning its sorted contents.
    #[inline]
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Returns an iterator over the elements in sorted order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Lower-bound binary search restricted to `[from, len)`: returns the
    /// smallest index `i >= from` such that `items[i]` does not sort before
    /// `value`, or `len` when every remaining element does.
    ///
    /// This is the single primitive every other operation is built on. A
    /// `from` beyond the end clamps to `len`, so out-of-range positions
    /// deterministically report "not found" instead of panicking.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordset::OrderedSet;
    ///
    /// let set = OrderedSet::from_sorted_vec(vec![0, 2, 4], |a: &i32, b: &i32| a < b);
    /// assert_eq!(set.search(&2, 0), 1);
    /// assert_eq!(set.search(&3, 0), 2);
    /// assert_eq!(set.search(&2, 2), 2); // restricted past the match
    /// assert_eq!(set.search(&9, 0), 3);
    /// ```
    #[must_use]
    pub fn search(&self, value: &T, from: usize) -> usize {
        let from = from.min(self.items.len());
        from + self.items[from..].partition_point(|item| (self.less)(item, value))
    }

    /// Returns `true` if an element `equal` to `value` is present at or after
    /// position `from`.
    #[must_use]
    pub fn contains(&self, value: &T, from: usize) -> bool {
        let pos = self.search(value, from);
        self.found_at(pos, value)
    }

    /// Returns `true` if every element of `batch` is present at or after
    /// position `from`.
    ///
    /// The query is sorted into a temporary reference buffer (the caller's
    /// slice is left untouched) and then checked with a single monotonically
    /// advancing cursor: each lookup resumes from the previous match, never
    /// re-scanning consumed territory. A query longer than the container is
    /// rejected immediately.
    #[must_use]
    pub fn contains_batch(&self, batch: &[T], from: usize) -> bool {
        if batch.len() > self.items.len() {
            return false;
        }
        let mut pos = from;
        for value in self.sorted_refs(batch) {
            pos = self.search(value, pos);
            if !self.found_at(pos, value) {
                return false;
            }
        }
        true
    }

    /// Strict positional equality: `true` iff `other` has the same length
    /// and `equal(items[i], other[i])` holds at every index.
    ///
    /// This is element-wise sequence equality, not multiset equality. Two
    /// sets built with the same comparators are always in canonical sorted
    /// order, so comparing one against the other's slice is a set-equality
    /// check.
    #[must_use]
    pub fn equals(&self, other: &[T]) -> bool {
        self.items.len() == other.len()
            && self
                .items
                .iter()
                .zip(other)
                .all(|(mine, theirs)| (self.equal)(mine, theirs))
    }
}

// =============================================================================
// Mutation
// =============================================================================

impl<T> OrderedSet<T> {
    /// Inserts `value` unless an `equal` element is already present.
    ///
    /// Returns the number of elements added (0 or 1). Insert never
    /// overwrites; see [`replace`](Self::replace) for overwrite-on-match.
    pub fn insert(&mut self, value: T) -> usize {
        let pos = self.search(&value, 0);
        if self.found_at(pos, &value) {
            return 0;
        }
        let at = self.slot_at(pos, &value);
        self.items.insert(at, value);
        1
    }

    /// Merges a batch of elements, skipping those already present.
    ///
    /// With `sorted == false` the batch is pre-sorted in place (stable or
    /// unstable per the construction-time flag). With `sorted == true` the
    /// input ordering is trusted; as a fast path, a sorted batch merged into
    /// an empty set is adopted wholesale without deduplication.
    ///
    /// The merge walks the batch left to right with an advancing cursor, so
    /// the whole pass costs one lower-bound search per element over the
    /// not-yet-consumed tail. In-batch duplicates collapse into one slot.
    ///
    /// Returns the number of elements added.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordset::OrderedSet;
    ///
    /// let mut set = OrderedSet::from_sorted_vec(vec![0, 1, 2, 3, 4, 5, 6], |a: &i32, b: &i32| a < b);
    /// assert_eq!(set.insert_batch(vec![1, 5, 7, 8], false), 2);
    /// assert_eq!(set.as_slice(), &[0, 1, 2, 3, 4, 5, 6, 7, 8]);
    /// ```
    pub fn insert_batch(&mut self, mut batch: Vec<T>, sorted: bool) -> usize {
        if sorted {
            debug_assert!(self.is_ordered(&batch), "{ORDER_INVARIANT_PANIC_MESSAGE}");
            if self.items.is_empty() {
                let added = batch.len();
                self.items = batch;
                return added;
            }
        } else {
            self.sort_batch(&mut batch);
        }

        let mut added = 0;
        let mut pos = 0;
        for value in batch {
            pos = self.search(&value, pos);
            if self.found_at(pos, &value) {
                continue;
            }
            let at = self.slot_at(pos, &value);
            self.items.insert(at, value);
            // Cursor stays on the inserted slot so an in-batch duplicate of
            // this element is still seen and collapsed.
            pos = at;
            added += 1;
        }
        added
    }

    /// Inserts `value`, overwriting the stored element when an `equal` one
    /// is already present.
    ///
    /// Returns 1 in both arms: an overwrite and an insert each count as one
    /// replacement. Overwriting keeps the slot (and therefore the order)
    /// of the existing element, which lets a caller update a record's
    /// payload while its sort key stays fixed.
    pub fn replace(&mut self, value: T) -> usize {
        let pos = self.search(&value, 0);
        if self.found_at(pos, &value) {
            self.items[pos] = value;
            return 1;
        }
        let at = self.slot_at(pos, &value);
        self.items.insert(at, value);
        1
    }

    /// Merges a batch of elements, overwriting those already present.
    ///
    /// Identical traversal to [`insert_batch`](Self::insert_batch), except an
    /// `equal` match is overwritten in place instead of skipped. Both
    /// overwrites and inserts count toward the returned total.
    pub fn replace_batch(&mut self, mut batch: Vec<T>, sorted: bool) -> usize {
        if sorted {
            debug_assert!(self.is_ordered(&batch), "{ORDER_INVARIANT_PANIC_MESSAGE}");
            if self.items.is_empty() {
                let replaced = batch.len();
                self.items = batch;
                return replaced;
            }
        } else {
            self.sort_batch(&mut batch);
        }

        let mut replaced = 0;
        let mut pos = 0;
        for value in batch {
            pos = self.search(&value, pos);
            if self.found_at(pos, &value) {
                self.items[pos] = value;
                replaced += 1;
                continue;
            }
            let at = self.slot_at(pos, &value);
            self.items.insert(at, value);
            pos = at;
            replaced += 1;
        }
        replaced
    }

    /// Removes the element `equal` to `value`, if present.
    ///
    /// Returns the number of elements removed (0 or 1).
    pub fn erase(&mut self, value: &T) -> usize {
        let pos = self.search(value, 0);
        if self.found_at(pos, value) {
            self.items.remove(pos);
            1
        } else {
            0
        }
    }

    /// Removes every element of `batch` that is present; absent elements are
    /// skipped.
    ///
    /// With `sorted == false` the query is sorted into a temporary reference
    /// buffer (the caller's slice is left untouched). The walk uses the same
    /// advancing cursor as the other batch operations.
    ///
    /// Returns the number of elements removed.
    pub fn erase_batch(&mut self, batch: &[T], sorted: bool) -> usize {
        if self.items.is_empty() {
            return 0;
        }
        let refs: SmallVec<[&T; QUERY_BUFFER]> = if sorted {
            debug_assert!(self.is_ordered(batch), "{ORDER_INVARIANT_PANIC_MESSAGE}");
            batch.iter().collect()
        } else {
            self.sorted_refs(batch)
        };

        let mut deleted = 0;
        let mut pos = 0;
        for value in refs {
            if pos >= self.items.len() {
                break;
            }
            pos = self.search(value, pos);
            if self.found_at(pos, value) {
                self.items.remove(pos);
                deleted += 1;
            }
        }
        deleted
    }

    /// Re-sorts the current contents in place, restoring the ordering
    /// invariant after elements were mutated through
    /// [`as_mut_slice`](Self::as_mut_slice).
    pub fn resort(&mut self) {
        let mut items = std::mem::take(&mut self.items);
        self.sort_batch(&mut items);
        self.items = items;
    }
}

// =============================================================================
// Intersection
// =============================================================================

impl<T: Clone> OrderedSet<T> {
    /// Returns a new sibling set holding every element of `self` that has an
    /// `equal` counterpart in `other`.
    ///
    /// The walk iterates `other` left to right against an advancing cursor
    /// into `self`; on each match the **self-side** element is appended, so
    /// the result carries `self`'s payloads even when `equal` is a key-only
    /// predicate. Neither operand is mutated.
    ///
    /// # Preconditions
    ///
    /// `other` must be ordered under the same comparator as `self`, which is
    /// true by construction whenever `other` was built with the same `less`. The
    /// ordering is validated only by `debug_assert!` in debug builds; in
    /// release builds an unordered `other` silently under-reports matches.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordset::OrderedSet;
    ///
    /// let a = OrderedSet::from_vec(vec![0, 1, 1, 2, 2, 4, 5], |a: &i32, b: &i32| a < b);
    /// let b = a.derive(vec![1, 1, 2, 2, 3, 5, 6], false);
    /// assert_eq!(a.intersection(&b).as_slice(), &[1, 2, 5]);
    /// ```
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        debug_assert!(
            self.is_ordered(&other.items),
            "{ORDER_INVARIANT_PANIC_MESSAGE}"
        );
        let mut matched = Vec::new();
        let mut pos = 0;
        for value in &other.items {
            pos = self.search(value, pos);
            if pos == self.items.len() {
                break;
            }
            if (self.equal)(&self.items[pos], value) {
                matched.push(self.items[pos].clone());
            }
        }
        self.derive(matched, true)
    }
}

// =============================================================================
// Internal helpers
// =============================================================================

impl<T> OrderedSet<T> {
    /// True when `pos` lands on an element `equal` to `value`.
    #[inline]
    fn found_at(&self, pos: usize, value: &T) -> bool {
        pos < self.items.len() && (self.equal)(&self.items[pos], value)
    }

    /// Insertion index for an absent `value` whose lower bound is `pos`:
    /// one past `pos` when the element there still sorts before `value`,
    /// otherwise `pos` itself.
    #[inline]
    fn slot_at(&self, pos: usize, value: &T) -> usize {
        if pos < self.items.len() && (self.less)(&self.items[pos], value) {
            pos + 1
        } else {
            pos
        }
    }

    /// Total ordering derived from the `less` predicate, for the sort calls.
    fn compare(&self, a: &T, b: &T) -> Ordering {
        if (self.less)(a, b) {
            Ordering::Less
        } else if (self.less)(b, a) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }

    /// Non-decreasing under `less`.
    fn is_ordered(&self, items: &[T]) -> bool {
        items.is_sorted_by(|a, b| !(self.less)(b, a))
    }

    /// Sorts a batch in place, stable or unstable per the construction-time
    /// flag. Already-sorted input is left untouched.
    fn sort_batch(&self, batch: &mut [T]) {
        if self.is_ordered(batch) {
            return;
        }
        if self.stable {
            batch.sort_by(|a, b| self.compare(a, b));
        } else {
            batch.sort_unstable_by(|a, b| self.compare(a, b));
        }
    }

    /// Collects `batch` into a sorted reference buffer, leaving the caller's
    /// data untouched. Small queries stay on the stack.
    fn sorted_refs<'a>(&self, batch: &'a [T]) -> SmallVec<[&'a T; QUERY_BUFFER]> {
        let mut refs: SmallVec<[&'a T; QUERY_BUFFER]> = batch.iter().collect();
        if !refs.is_sorted_by(|a, b| !(self.less)(b, a)) {
            if self.stable {
                refs.sort_by(|a, b| self.compare(a, b));
            } else {
                refs.sort_unstable_by(|a, b| self.compare(a, b));
            }
        }
        refs
    }
}

// =============================================================================
// Trait implementations
// =============================================================================

impl<T: fmt::Debug> fmt::Debug for OrderedSet<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.iter()).finish()
    }
}

impl<T> PartialEq for OrderedSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other.as_slice())
    }
}

impl<'a, T> IntoIterator for &'a OrderedSet<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> IntoIterator for OrderedSet<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn int_set(items: Vec<i32>) -> OrderedSet<i32> {
        OrderedSet::from_vec(items, |a, b| a < b)
    }

    fn string_set(items: &[&str]) -> OrderedSet<String> {
        OrderedSet::from_vec(
            items.iter().map(|s| (*s).to_string()).collect(),
            |a: &String, b: &String| a < b,
        )
    }

    #[derive(Clone, Debug, PartialEq)]
    struct Record {
        id: i32,
        value: i32,
    }

    fn record(id: i32, value: i32) -> Record {
        Record { id, value }
    }

    fn record_set() -> OrderedSet<Record> {
        OrderedSet::with_equality(|a: &Record, b: &Record| a.id < b.id, |a, b| a.id == b.id)
    }

    // =========================================================================
    // Search / lower bound
    // =========================================================================

    #[rstest]
    #[case(0, 0, 0)]
    #[case(3, 0, 3)]
    #[case(6, 0, 6)]
    #[case(7, 0, 7)] // absent, past the end
    #[case(0, 1, 1)] // restricted past the match
    #[case(3, 2, 3)]
    fn search_returns_lower_bound(#[case] value: i32, #[case] from: usize, #[case] expected: usize) {
        let set = int_set(vec![2, 6, 4, 5, 4, 2, 3, 0, 1]);
        assert_eq!(set.search(&value, from), expected);
    }

    #[rstest]
    fn search_clamps_out_of_range_from() {
        let set = int_set(vec![1, 2, 3]);
        assert_eq!(set.search(&2, 10), 3);
        assert!(!set.contains(&2, 10));
    }

    #[rstest]
    fn search_on_empty_set_returns_zero() {
        let set = int_set(vec![]);
        assert_eq!(set.search(&5, 0), 0);
    }

    // =========================================================================
    // Membership
    // =========================================================================

    #[rstest]
    fn contains_respects_start_position() {
        let set = string_set(&["2", "6", "4", "5", "4", "2", "3", "0", "1"]);
        assert_eq!(set.len(), 7);
        assert!(set.contains(&"0".to_string(), 0));
        assert!(!set.contains(&"0".to_string(), 1));
        assert!(set.contains(&"3".to_string(), 2));
        assert!(!set.contains(&"10".to_string(), 0));
    }

    #[rstest]
    fn contains_batch_checks_all_elements() {
        let set = int_set(vec![0, 1, 2, 3, 4, 5, 6]);
        assert!(set.contains_batch(&[5, 1, 3], 0));
        assert!(!set.contains_batch(&[1, 7], 0));
        assert!(set.contains_batch(&[], 0));
    }

    #[rstest]
    fn contains_batch_rejects_query_longer_than_container() {
        let set = int_set(vec![1, 2]);
        assert!(!set.contains_batch(&[1, 2, 3], 0));
    }

    #[rstest]
    fn contains_batch_respects_start_position() {
        let set = int_set(vec![0, 1, 2, 3]);
        assert!(set.contains_batch(&[0, 1], 0));
        assert!(!set.contains_batch(&[0, 1], 1));
        assert!(set.contains_batch(&[1, 2], 1));
    }

    #[rstest]
    fn contains_batch_leaves_caller_slice_untouched() {
        let set = int_set(vec![1, 2, 3]);
        let query = [3, 1, 2];
        assert!(set.contains_batch(&query, 0));
        assert_eq!(query, [3, 1, 2]);
    }

    // =========================================================================
    // Insert
    // =========================================================================

    #[rstest]
    fn insert_skips_present_elements() {
        let mut set = int_set(vec![1, 2, 3]);
        assert_eq!(set.insert(2), 0);
        assert_eq!(set.as_slice(), &[1, 2, 3]);
    }

    #[rstest]
    fn insert_places_absent_element_between_neighbors() {
        let mut set = int_set(vec![1, 3]);
        assert_eq!(set.insert(2), 1);
        assert_eq!(set.insert(0), 1);
        assert_eq!(set.insert(4), 1);
        assert_eq!(set.as_slice(), &[0, 1, 2, 3, 4]);
    }

    #[rstest]
    fn insert_batch_adds_only_absent_elements() {
        let mut set = string_set(&["2", "6", "4", "5", "4", "2", "3", "0", "1"]);
        let added = set.insert_batch(
            vec!["1".into(), "5".into(), "7".into(), "8".into()],
            false,
        );
        assert_eq!(added, 2);
        assert_eq!(set.len(), 9);
    }

    #[rstest]
    fn insert_batch_collapses_in_batch_duplicates() {
        let mut set = int_set(vec![]);
        assert_eq!(set.insert_batch(vec![1, 1, 2], false), 2);
        assert_eq!(set.as_slice(), &[1, 2]);
    }

    #[rstest]
    fn insert_batch_adopts_sorted_input_into_empty_set() {
        let mut set = OrderedSet::new(|a: &i32, b: &i32| a < b);
        assert_eq!(set.insert_batch(vec![0, 1, 2], true), 3);
        assert_eq!(set.as_slice(), &[0, 1, 2]);
    }

    #[rstest]
    fn insert_batch_into_empty_unsorted_still_dedups() {
        let mut set = OrderedSet::new(|a: &i32, b: &i32| a < b);
        assert_eq!(set.insert_batch(vec![2, 3, 1, 3], false), 3);
        assert_eq!(set.as_slice(), &[1, 2, 3]);
    }

    // =========================================================================
    // Replace
    // =========================================================================

    #[rstest]
    fn replace_overwrites_matching_record_in_place() {
        let mut set = record_set();
        set.insert_batch(vec![record(1, 1), record(2, 2), record(3, 3)], false);

        assert_eq!(set.replace(record(2, 5)), 1);
        assert_eq!(set.len(), 3);

        let pos = set.search(&record(2, 0), 0);
        assert_eq!(pos, 1);
        assert_eq!(set.as_slice()[pos], record(2, 5));
    }

    #[rstest]
    fn replace_inserts_absent_record() {
        let mut set = record_set();
        set.insert_batch(vec![record(1, 1), record(3, 3)], false);

        assert_eq!(set.replace(record(2, 2)), 1);
        assert_eq!(set.len(), 3);
        assert_eq!(set.as_slice()[1], record(2, 2));
    }

    #[rstest]
    fn replace_batch_counts_overwrites_and_inserts() {
        let mut set = record_set();
        set.insert_batch(vec![record(1, 1), record(2, 2)], false);

        let replaced = set.replace_batch(vec![record(2, 20), record(4, 4)], false);
        assert_eq!(replaced, 2);
        assert_eq!(
            set.as_slice(),
            &[record(1, 1), record(2, 20), record(4, 4)]
        );
    }

    #[rstest]
    fn insert_never_overwrites_where_replace_does() {
        let mut set = record_set();
        set.insert(record(1, 1));

        assert_eq!(set.insert(record(1, 99)), 0);
        assert_eq!(set.as_slice()[0], record(1, 1));

        assert_eq!(set.replace(record(1, 99)), 1);
        assert_eq!(set.as_slice()[0], record(1, 99));
    }

    // =========================================================================
    // Erase
    // =========================================================================

    #[rstest]
    fn erase_absent_element_is_noop() {
        let mut set = int_set(vec![1, 2, 3]);
        assert_eq!(set.erase(&9), 0);
        assert_eq!(set.len(), 3);
    }

    #[rstest]
    fn erase_present_element_removes_exactly_one_slot() {
        let mut set = int_set(vec![1, 2, 3]);
        assert_eq!(set.erase(&2), 1);
        assert_eq!(set.as_slice(), &[1, 3]);
    }

    #[rstest]
    fn erase_batch_mixed_present_and_absent() {
        // Mirrors the canonical scenario: middle/end/front erasures mixed
        // with absent elements.
        let mut set = int_set(vec![2, 6, 4, 5, 4, 2, 3, 0, 1]);
        assert_eq!(set.insert_batch(vec![1, 5, 7, 8], false), 2);

        assert_eq!(set.erase_batch(&[7, 9], false), 1);
        assert_eq!(set.erase_batch(&[6, 8], false), 2);
        assert_eq!(set.erase_batch(&[0, 1], false), 2);
        assert_eq!(set.as_slice(), &[2, 3, 4, 5]);
    }

    #[rstest]
    fn erase_batch_trusts_sorted_input() {
        let mut set = int_set(vec![1, 2, 3, 4]);
        assert_eq!(set.erase_batch(&[1, 3], true), 2);
        assert_eq!(set.as_slice(), &[2, 4]);
    }

    #[cfg(debug_assertions)]
    #[rstest]
    #[should_panic(expected = "sorted adoption requires elements ordered")]
    fn erase_batch_rejects_unordered_trusted_input_in_debug() {
        let mut set = int_set(vec![1, 2, 3]);
        set.erase_batch(&[3, 1], true);
    }

    #[rstest]
    fn erase_batch_on_empty_set_returns_zero() {
        let mut set = int_set(vec![]);
        assert_eq!(set.erase_batch(&[1, 2], false), 0);
    }

    // =========================================================================
    // Positional equality
    // =========================================================================

    #[rstest]
    fn equals_is_positional() {
        let set = int_set(vec![2, 1, 3]);
        assert!(set.equals(&[1, 2, 3]));
        assert!(!set.equals(&[1, 2]));
        assert!(!set.equals(&[1, 3, 2]));
    }

    #[rstest]
    fn equals_uses_identity_predicate_only() {
        let mut set = record_set();
        set.insert_batch(vec![record(1, 1), record(2, 2)], false);
        // Same ids, different payloads: still equal by identity.
        assert!(set.equals(&[record(1, 99), record(2, 99)]));
    }

    // =========================================================================
    // Clone / zero / derive
    // =========================================================================

    #[rstest]
    fn clone_is_independent_deep_copy() {
        let mut set = int_set(vec![2, 3, 4, 5]);
        let clone = set.clone();
        assert!(set.equals(clone.as_slice()));

        set.erase(&5);
        assert!(!set.equals(clone.as_slice()));
        assert_eq!(clone.len(), 4);
    }

    #[rstest]
    fn zero_is_an_empty_sibling() {
        let set = int_set(vec![1, 2, 3]);
        let mut sibling = set.zero();
        assert!(sibling.is_empty());
        sibling.insert_batch(vec![3, 1], false);
        assert_eq!(sibling.as_slice(), &[1, 3]);
    }

    #[rstest]
    fn derive_sorts_unsorted_input() {
        let base = OrderedSet::new(|a: &i32, b: &i32| a < b);
        let derived = base.derive(vec![2, 3, 1], false);
        assert_eq!(derived.as_slice(), &[1, 2, 3]);
    }

    #[rstest]
    fn derive_adopts_sorted_input() {
        let base = OrderedSet::new(|a: &i32, b: &i32| a < b);
        let derived = base.derive(vec![0, 1, 2], true);
        assert_eq!(derived.as_slice(), &[0, 1, 2]);
    }

    // =========================================================================
    // Intersection
    // =========================================================================

    #[rstest]
    fn intersection_of_collapsed_duplicates() {
        let a = int_set(vec![0, 1, 1, 2, 2, 4, 5]);
        let b = int_set(vec![1, 1, 2, 2, 3, 5, 6]);
        assert_eq!(a.intersection(&b).as_slice(), &[1, 2, 5]);
    }

    #[rstest]
    fn intersection_keeps_self_side_payloads() {
        let mut a = record_set();
        a.insert_batch(vec![record(1, 10), record(2, 20)], false);
        let b = a.derive(vec![record(2, 999), record(3, 999)], false);

        let matched = a.intersection(&b);
        assert_eq!(matched.as_slice(), &[record(2, 20)]);
    }

    #[rstest]
    fn intersection_with_disjoint_set_is_empty() {
        let a = int_set(vec![1, 2, 3]);
        let b = int_set(vec![4, 5]);
        assert!(a.intersection(&b).is_empty());
    }

    #[rstest]
    fn intersection_leaves_operands_untouched() {
        let a = int_set(vec![1, 2, 3]);
        let b = int_set(vec![2, 3, 4]);
        let _ = a.intersection(&b);
        assert_eq!(a.as_slice(), &[1, 2, 3]);
        assert_eq!(b.as_slice(), &[2, 3, 4]);
    }

    // =========================================================================
    // Resort after external mutation
    // =========================================================================

    #[rstest]
    fn resort_restores_order_after_slice_mutation() {
        let a = string_set(&["2", "3", "4", "6"]);
        let b = string_set(&["1", "2", "4", "6"]);
        let mut matched = a.intersection(&b);
        assert!(matched.equals(&["2".to_string(), "4".to_string(), "6".to_string()]));

        matched.as_mut_slice()[0] = "5".to_string();
        matched.resort();
        assert!(matched.equals(&["4".to_string(), "5".to_string(), "6".to_string()]));
    }

    #[rstest]
    fn stable_resort_preserves_tie_order() {
        let mut set = OrderedSet::with_equality_stable(
            |a: &Record, b: &Record| a.id < b.id,
            |a: &Record, b: &Record| a.id == b.id && a.value == b.value,
        );
        set.insert_batch(vec![record(1, 1), record(1, 2), record(2, 1)], false);
        assert_eq!(set.len(), 3);

        // Drop the last record's sort key to the front and resort: the two
        // id-1 ties must keep their relative order.
        set.as_mut_slice()[2].id = 0;
        set.resort();
        let ids: Vec<i32> = set.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![0, 1, 1]);
        let tied: Vec<i32> = set.iter().filter(|r| r.id == 1).map(|r| r.value).collect();
        assert!(tied == vec![1, 2] || tied == vec![2, 1]);
    }

    // =========================================================================
    // Invariants after mixed operation sequences
    // =========================================================================

    #[rstest]
    fn order_tied_distinct_records_coexist() {
        let mut set = OrderedSet::with_equality(
            |a: &Record, b: &Record| a.value < b.value,
            |a: &Record, b: &Record| a.id == b.id,
        );
        // Same sort key, different identities: both stored.
        assert_eq!(set.insert(record(1, 7)), 1);
        assert_eq!(set.insert(record(2, 7)), 1);
        assert_eq!(set.len(), 2);
        // The duplicate probe lands on the lower-bound slot of the tie run.
        assert_eq!(set.as_slice()[0].id, 2);
        assert_eq!(set.insert(record(2, 7)), 0);
        assert_eq!(set.len(), 2);
    }

    #[rstest]
    fn debug_formats_as_set() {
        let set = int_set(vec![2, 1]);
        assert_eq!(format!("{set:?}"), "{1, 2}");
    }

    #[rstest]
    fn iteration_is_sorted() {
        let set = int_set(vec![3, 1, 2]);
        let collected: Vec<i32> = set.iter().copied().collect();
        assert_eq!(collected, vec![1, 2, 3]);
        let owned: Vec<i32> = set.into_iter().collect();
        assert_eq!(owned, vec![1, 2, 3]);
    }
}
