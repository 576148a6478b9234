//! Roaring bitmap containers.
//!
//! A roaring bitmap blocks its values into blocks of 2^16 values, and encodes
//! each block based on its density: either a bitmap for dense blocks, or a list
//! of set values for sparse blocks. [`Container`] is one such block. It owns
//! either representation and moves between them as its cardinality crosses
//! [`ARRAY_DEFAULT_MAX_SIZE`], so that callers never need to know which they hold.

use std::fmt;

use tracing::trace;

use crate::iter::{ReverseIter, ShortIter};
use crate::{ArrayContainer, BitmapContainer, HeapSize, ValueRange, ARRAY_DEFAULT_MAX_SIZE};

/// A set of `u16` values, stored as either an array or a bitmap.
///
/// Containers built through `add`, `remove`, and the range operations hold an
/// array exactly when their cardinality is at most [`ARRAY_DEFAULT_MAX_SIZE`].
/// Containers built with `From` keep the representation they were given until
/// they are next mutated (or `to_efficient_container` is called).
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[derive(Clone)]
pub struct Container {
    repr: Repr,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone)]
enum Repr {
    Array(ArrayContainer),
    Bitmap(BitmapContainer),
}

impl Container {
    /// An empty container.
    pub fn new() -> Self {
        Self { repr: Repr::Array(ArrayContainer::new()) }
    }
    /// A container holding every value.
    pub fn full() -> Self {
        BitmapContainer::full().into()
    }
    /// A container holding exactly the values of `range`.
    pub fn from_range(range: ValueRange) -> Self {
        let mut container = Self::new();
        container.add_range(range);
        container
    }

    /// Inserts `value`, returning `true` if it was not already present.
    ///
    /// An array already holding [`ARRAY_DEFAULT_MAX_SIZE`] values becomes a bitmap first.
    pub fn add(&mut self, value: u16) -> bool {
        match &mut self.repr {
            Repr::Array(array) => {
                if array.cardinality() < ARRAY_DEFAULT_MAX_SIZE || array.contains(value) {
                    return array.add(value);
                }
                trace!(cardinality = array.cardinality(), "promoting array container to bitmap");
                let mut bitmap = array.to_bitmap_container();
                let added = bitmap.add(value);
                self.repr = Repr::Bitmap(bitmap);
                added
            }
            Repr::Bitmap(bitmap) => bitmap.add(value),
        }
    }
    /// Removes `value`, returning `true` if it was present.
    ///
    /// A bitmap left with [`ARRAY_DEFAULT_MAX_SIZE`] values becomes an array.
    pub fn remove(&mut self, value: u16) -> bool {
        match &mut self.repr {
            Repr::Array(array) => array.remove(value),
            Repr::Bitmap(bitmap) => {
                let removed = bitmap.remove(value);
                if removed && bitmap.cardinality() <= ARRAY_DEFAULT_MAX_SIZE {
                    trace!(cardinality = bitmap.cardinality(), "demoting bitmap container to array");
                    self.repr = Repr::Array(bitmap.to_array_container());
                }
                removed
            }
        }
    }
    #[inline]
    pub fn contains(&self, value: u16) -> bool {
        match &self.repr {
            Repr::Array(array) => array.contains(value),
            Repr::Bitmap(bitmap) => bitmap.contains(value),
        }
    }
    #[inline]
    pub fn cardinality(&self) -> usize {
        match &self.repr {
            Repr::Array(array) => array.cardinality(),
            Repr::Bitmap(bitmap) => bitmap.cardinality(),
        }
    }
    #[inline] pub fn is_empty(&self) -> bool { self.cardinality() == 0 }
    #[inline] pub fn is_full(&self) -> bool { self.cardinality() == crate::MAX_CAPACITY as usize }

    pub fn minimum(&self) -> Option<u16> {
        match &self.repr {
            Repr::Array(array) => array.minimum(),
            Repr::Bitmap(bitmap) => bitmap.minimum(),
        }
    }
    pub fn maximum(&self) -> Option<u16> {
        match &self.repr {
            Repr::Array(array) => array.maximum(),
            Repr::Bitmap(bitmap) => bitmap.maximum(),
        }
    }
    /// The number of members less than or equal to `value`.
    pub fn rank(&self, value: u16) -> usize {
        match &self.repr {
            Repr::Array(array) => array.rank(value),
            Repr::Bitmap(bitmap) => bitmap.rank(value),
        }
    }
    /// The member with `index` smaller members, should one exist.
    pub fn select(&self, index: usize) -> Option<u16> {
        match &self.repr {
            Repr::Array(array) => array.select(index),
            Repr::Bitmap(bitmap) => bitmap.select(index),
        }
    }

    /// Inserts every value of `range`, returning the number of new members.
    pub fn add_range(&mut self, range: ValueRange) -> usize {
        if let Repr::Array(array) = &self.repr {
            if array.cardinality() + range.len() > ARRAY_DEFAULT_MAX_SIZE {
                self.repr = Repr::Bitmap(array.to_bitmap_container());
            }
        }
        let added = match &mut self.repr {
            Repr::Array(array) => array.add_range(range),
            Repr::Bitmap(bitmap) => bitmap.add_range(range),
        };
        self.reselect();
        added
    }
    /// Removes every value of `range`, returning the number of members removed.
    pub fn remove_range(&mut self, range: ValueRange) -> usize {
        let removed = match &mut self.repr {
            Repr::Array(array) => array.remove_range(range),
            Repr::Bitmap(bitmap) => bitmap.remove_range(range),
        };
        self.reselect();
        removed
    }

    /// The complement of `self` within `range`, consuming `self`.
    ///
    /// Every value in `range` is a member of the result exactly when it was not a
    /// member of `self`; values outside `range` are unchanged. The result's
    /// representation is chosen from its cardinality.
    pub fn inot(self, range: ValueRange) -> Container {
        let result = match self.repr {
            Repr::Array(array) => array.inot(range),
            Repr::Bitmap(bitmap) => bitmap.inot(range),
        };
        trace!(cardinality = result.cardinality(), start = range.start(), end = range.end(), "complemented container");
        result
    }
    /// The complement of `self` within `range`, leaving `self` unchanged.
    pub fn not(&self, range: ValueRange) -> Container {
        match &self.repr {
            Repr::Array(array) => array.not(range),
            Repr::Bitmap(bitmap) => bitmap.not(range),
        }
    }
    /// Complements `self` within `range`, in place.
    pub fn flip(&mut self, range: ValueRange) {
        *self = std::mem::take(self).inot(range);
    }

    /// A bitmap container with the same members; `self` is unchanged.
    pub fn to_bitmap_container(&self) -> BitmapContainer {
        match &self.repr {
            Repr::Array(array) => array.to_bitmap_container(),
            Repr::Bitmap(bitmap) => bitmap.clone(),
        }
    }
    /// Re-encodes `self` in the representation its cardinality calls for.
    pub fn to_efficient_container(mut self) -> Container {
        self.reselect();
        self
    }

    /// Moves to the representation preferred at the current cardinality.
    fn reselect(&mut self) {
        match &self.repr {
            Repr::Array(array) if array.cardinality() > ARRAY_DEFAULT_MAX_SIZE => {
                trace!(cardinality = array.cardinality(), "promoting array container to bitmap");
                self.repr = Repr::Bitmap(array.to_bitmap_container());
            }
            Repr::Bitmap(bitmap) if bitmap.cardinality() <= ARRAY_DEFAULT_MAX_SIZE => {
                trace!(cardinality = bitmap.cardinality(), "demoting bitmap container to array");
                self.repr = Repr::Array(bitmap.to_array_container());
            }
            _ => { }
        }
    }

    /// Ascending cursor over the members.
    pub fn short_iter(&self) -> ShortIter<'_> {
        match &self.repr {
            Repr::Array(array) => ShortIter::Array(array.short_iter()),
            Repr::Bitmap(bitmap) => ShortIter::Bitmap(bitmap.short_iter()),
        }
    }
    /// Descending cursor over the members.
    pub fn reverse_iter(&self) -> ReverseIter<'_> {
        match &self.repr {
            Repr::Array(array) => ReverseIter::Array(array.reverse_iter()),
            Repr::Bitmap(bitmap) => ReverseIter::Bitmap(bitmap.reverse_iter()),
        }
    }
}

impl Default for Container {
    fn default() -> Self { Self::new() }
}

impl From<ArrayContainer> for Container {
    fn from(array: ArrayContainer) -> Self { Self { repr: Repr::Array(array) } }
}
impl From<BitmapContainer> for Container {
    fn from(bitmap: BitmapContainer) -> Self { Self { repr: Repr::Bitmap(bitmap) } }
}

// Equal member sets are equal containers, whatever their representations.
impl PartialEq for Container {
    fn eq(&self, other: &Self) -> bool {
        match (&self.repr, &other.repr) {
            (Repr::Array(a), Repr::Array(b)) => a == b,
            (Repr::Bitmap(a), Repr::Bitmap(b)) => a == b,
            _ => self.cardinality() == other.cardinality() && self.short_iter().eq(other.short_iter()),
        }
    }
}
impl Eq for Container { }

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repr {
            Repr::Array(array) => fmt::Debug::fmt(array, f),
            Repr::Bitmap(bitmap) => fmt::Debug::fmt(bitmap, f),
        }
    }
}

impl FromIterator<u16> for Container {
    fn from_iter<I: IntoIterator<Item=u16>>(iter: I) -> Self {
        let mut container = Self::new();
        container.extend(iter);
        container
    }
}
impl Extend<u16> for Container {
    fn extend<I: IntoIterator<Item=u16>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}

impl HeapSize for Container {
    fn heap_size(&self) -> (usize, usize) {
        match &self.repr {
            Repr::Array(array) => array.heap_size(),
            Repr::Bitmap(bitmap) => bitmap.heap_size(),
        }
    }
}
