#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

#[cfg(feature = "std")]
pub(crate) type TypeMap<T, V> = HashMap<T, V>;
#[cfg(not(feature = "std"))]
pub(crate) type TypeMap<T, V> = BTreeMap<T, V>;

/// Bound for item type identities used to decide recycling eligibility.
///
/// With `std`, types must be `Hash + Eq`; without it, `Ord` (pools fall back to a `BTreeMap`).
#[cfg(feature = "std")]
pub trait ItemType: core::hash::Hash + Eq + Clone {}
#[cfg(feature = "std")]
impl<T: core::hash::Hash + Eq + Clone> ItemType for T {}

#[cfg(not(feature = "std"))]
pub trait ItemType: Ord + Clone {}
#[cfg(not(feature = "std"))]
impl<T: Ord + Clone> ItemType for T {}
