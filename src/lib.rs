//! # ordset
//!
//! Comparator-driven ordered set containers.
//!
//! ## Overview
//!
//! This library provides always-sorted, deduplicated sequence containers
//! whose sort order and element identity are decided by two independent
//! caller-supplied predicates:
//!
//! - **`less`**: a strict weak ordering that keeps the sequence sorted
//! - **`equal`**: an identity predicate that decides duplicates and which
//!   element a replace overwrites
//!
//! Decoupling the two lets a caller keep records sorted by one field while
//! treating two records as "the same" by another (e.g. sorted by a numeric
//! id, identified by that id, updated with fresh payload fields via
//! [`OrderedSet::replace`]).
//!
//! Two containers are provided:
//!
//! - [`OrderedSet`]: the single-threaded core, with binary-search membership,
//!   single and cursor-merged batch insert/replace/erase, and intersection
//! - [`ConcurrentOrderedSet`]: a reader/writer-locked wrapper that makes the
//!   container shareable across threads and returns defensive snapshots
//!
//! ## Example
//!
//! ```rust
//! use ordset::OrderedSet;
//!
//! let mut set = OrderedSet::new(|a: &i32, b: &i32| a < b);
//! set.insert_batch(vec![2, 6, 4, 5, 4, 2, 3, 0, 1], false);
//! assert_eq!(set.as_slice(), &[0, 1, 2, 3, 4, 5, 6]);
//!
//! // Already-present elements are skipped, not overwritten.
//! assert_eq!(set.insert_batch(vec![1, 5, 7, 8], false), 2);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and constructors.
///
/// # Usage
///
/// ```rust
/// use ordset::prelude::*;
/// ```
pub mod prelude {
    pub use crate::set::*;
}

pub mod set;

pub use set::{ConcurrentOrderedSet, EqualFn, LessFn, OrderedSet};
