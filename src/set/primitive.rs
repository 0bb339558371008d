//! Convenience constructors for common element types.
//!
//! These are configuration sugar over [`OrderedSet`]: each binds the natural
//! ascending `<` ordering for one primitive element type and accepts an
//! unsorted vector plus an "already sorted" flag, mirroring the generic
//! [`OrderedSet::derive`] contract.
//!
//! ```rust
//! use ordset::set::primitive;
//!
//! let set = primitive::of_i32(vec![2, 6, 4, 5, 4, 2, 3, 0, 1], false);
//! assert_eq!(set.as_slice(), &[0, 1, 2, 3, 4, 5, 6]);
//! ```
//!
//! # Floating point
//!
//! `of_f32`/`of_f64` order by `<`, which is a strict weak ordering only over
//! NaN-free data; feeding NaN values is a caller contract violation with
//! unspecified placement, exactly as for any inconsistent comparator.

use paste::paste;

use super::ordered::OrderedSet;

macro_rules! typed_constructors {
    ($($ty:ident),* $(,)?) => {
        paste! {
            $(
                #[doc = concat!(
                    "Builds an [`OrderedSet`] of `", stringify!($ty),
                    "` ordered ascending by `<`."
                )]
                ///
                /// With `sorted == true` the input is adopted directly under
                /// the caller contract of [`OrderedSet::insert_batch`];
                /// otherwise it is sorted and deduplicated.
                #[must_use]
                pub fn [<of_ $ty:lower>](items: Vec<$ty>, sorted: bool) -> OrderedSet<$ty> {
                    OrderedSet::new(|a: &$ty, b: &$ty| a < b).derive(items, sorted)
                }
            )*
        }
    };
}

typed_constructors!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, String,
);

/// Builds an [`OrderedSet`] of any `Ord` element type, ordered ascending.
///
/// With `sorted == true` the input is adopted directly under the caller
/// contract of [`OrderedSet::insert_batch`]; otherwise it is sorted and
/// deduplicated.
#[must_use]
pub fn of_ord<T>(items: Vec<T>, sorted: bool) -> OrderedSet<T>
where
    T: Ord + 'static,
{
    OrderedSet::new(T::lt).derive(items, sorted)
}
