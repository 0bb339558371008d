//! Ordered set containers.
//!
//! This module provides sequence containers that stay sorted under a
//! caller-supplied strict weak ordering (`less`) while deciding element
//! identity with an independent predicate (`equal`):
//!
//! - [`OrderedSet`]: the single-threaded core container
//! - [`ConcurrentOrderedSet`]: a reader/writer-locked, shareable wrapper
//! - [`primitive`]: ready-made constructors for common element types
//!
//! # Ordering vs. identity
//!
//! Two elements can be tied under `less` (neither sorts before the other)
//! while still being distinct under `equal`. Only `equal` decides whether an
//! incoming element is "already present"; `less` only decides where it lives.
//! This is what makes replace-on-duplicate-key semantics possible:
//!
//! ```rust
//! use ordset::OrderedSet;
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Record {
//!     id: i32,
//!     value: i32,
//! }
//!
//! let mut set = OrderedSet::with_equality(
//!     |a: &Record, b: &Record| a.id < b.id,
//!     |a: &Record, b: &Record| a.id == b.id,
//! );
//! set.insert_batch(
//!     vec![
//!         Record { id: 1, value: 1 },
//!         Record { id: 2, value: 2 },
//!     ],
//!     false,
//! );
//!
//! // Same id: the stored record is overwritten in place, order untouched.
//! set.replace(Record { id: 2, value: 5 });
//! assert_eq!(set.as_slice()[1], Record { id: 2, value: 5 });
//! ```
//!
//! # Thread safety
//!
//! [`OrderedSet`] assumes exclusive single-threaded ownership by its caller.
//! To share a set across threads, wrap it:
//!
//! ```rust
//! use ordset::{ConcurrentOrderedSet, OrderedSet};
//! use std::sync::Arc;
//!
//! let shared = Arc::new(ConcurrentOrderedSet::new(OrderedSet::new(
//!     |a: &i32, b: &i32| a < b,
//! )));
//! shared.insert_batch(vec![3, 1, 2], false);
//! assert_eq!(shared.to_vec(), vec![1, 2, 3]);
//! ```

mod concurrent;
mod ordered;
pub mod primitive;

pub use concurrent::ConcurrentOrderedSet;
pub use ordered::{EqualFn, LessFn, OrderedSet};
