//! Sparse containers, storing members as a sorted list of values.

use smallvec::SmallVec;

use crate::iter::{ShortIterable, ShortPeekable};
use crate::util::{advance_until, binary_search, insertion_point};
use crate::{BitmapContainer, Container, ContainerError, HeapSize, ValueRange, ARRAY_DEFAULT_MAX_SIZE};

/// Values stored inline before the container spills to the heap.
const INLINE_VALUES: usize = 8;

/// A set of `u16` values kept as a strictly increasing sequence.
///
/// Costs two bytes per member, which makes it the preferred form for sets of
/// at most [`ARRAY_DEFAULT_MAX_SIZE`] members. Small sets live inline, without
/// a heap allocation. The container never changes representation by itself;
/// see [`Container`] for that.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<u16>", into = "Vec<u16>"))]
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ArrayContainer {
    values: SmallVec<[u16; INLINE_VALUES]>,
}

impl ArrayContainer {
    #[inline(always)] pub fn new() -> Self { Self::default() }
    pub fn with_capacity(capacity: usize) -> Self {
        Self { values: SmallVec::with_capacity(capacity) }
    }
    /// Collects values the caller guarantees to be strictly increasing.
    pub(crate) fn from_sorted_iter(values: impl Iterator<Item=u16>, capacity: usize) -> Self {
        let mut array = Self::with_capacity(capacity);
        array.values.extend(values);
        debug_assert!(array.values.windows(2).all(|pair| pair[0] < pair[1]));
        array
    }

    /// Inserts `value`, returning `true` if it was not already present.
    pub fn add(&mut self, value: u16) -> bool {
        let found = binary_search(&self.values, value);
        if found >= 0 {
            return false;
        }
        self.values.insert(insertion_point(found), value);
        true
    }
    /// Removes `value`, returning `true` if it was present.
    pub fn remove(&mut self, value: u16) -> bool {
        let found = binary_search(&self.values, value);
        if found < 0 {
            return false;
        }
        self.values.remove(found as usize);
        true
    }
    #[inline]
    pub fn contains(&self, value: u16) -> bool {
        binary_search(&self.values, value) >= 0
    }
    #[inline(always)] pub fn cardinality(&self) -> usize { self.values.len() }
    #[inline(always)] pub fn is_empty(&self) -> bool { self.values.is_empty() }
    #[inline(always)] pub fn is_full(&self) -> bool { self.values.len() == crate::MAX_CAPACITY as usize }
    /// The members, in ascending order.
    #[inline(always)] pub fn as_slice(&self) -> &[u16] { &self.values }
    #[inline(always)] pub fn clear(&mut self) { self.values.clear() }

    #[inline] pub fn minimum(&self) -> Option<u16> { self.values.first().copied() }
    #[inline] pub fn maximum(&self) -> Option<u16> { self.values.last().copied() }
    /// The number of members less than or equal to `value`.
    pub fn rank(&self, value: u16) -> usize {
        let found = binary_search(&self.values, value);
        if found >= 0 { found as usize + 1 } else { insertion_point(found) }
    }
    /// The member with `index` smaller members, should one exist.
    #[inline] pub fn select(&self, index: usize) -> Option<u16> { self.values.get(index).copied() }

    /// Inserts every value of `range`, returning the number of new members.
    pub fn add_range(&mut self, range: ValueRange) -> usize {
        if range.is_empty() {
            return 0;
        }
        let (lower, upper) = self.bounds(range);
        let mut values: SmallVec<[u16; INLINE_VALUES]> = SmallVec::with_capacity(lower + range.len() + (self.values.len() - upper));
        values.extend_from_slice(&self.values[.. lower]);
        values.extend(range.values());
        values.extend_from_slice(&self.values[upper ..]);
        let added = range.len() - (upper - lower);
        self.values = values;
        added
    }
    /// Removes every value of `range`, returning the number of members removed.
    pub fn remove_range(&mut self, range: ValueRange) -> usize {
        let (lower, upper) = self.bounds(range);
        self.values.drain(lower .. upper);
        upper - lower
    }

    /// Positions in `self.values` delimiting the members that fall in `range`.
    #[inline]
    fn bounds(&self, range: ValueRange) -> (usize, usize) {
        let lower = self.values.partition_point(|v| (*v as u32) < range.start());
        let upper = lower + self.values[lower ..].partition_point(|v| (*v as u32) < range.end());
        (lower, upper)
    }

    /// The complement of `self` within `range`, leaving `self` unchanged.
    ///
    /// Values outside `range` keep their membership. The result is an array when its
    /// cardinality is at most [`ARRAY_DEFAULT_MAX_SIZE`], and a bitmap otherwise.
    pub fn not(&self, range: ValueRange) -> Container {
        let (lower, upper) = self.bounds(range);
        let present = upper - lower;
        let cardinality = self.values.len() - present + (range.len() - present);
        if cardinality > ARRAY_DEFAULT_MAX_SIZE {
            return self.to_bitmap_container().inot(range);
        }

        // Merge the members in range against the range itself, keeping what is absent.
        let mut values: SmallVec<[u16; INLINE_VALUES]> = SmallVec::with_capacity(cardinality);
        values.extend_from_slice(&self.values[.. lower]);
        let mut members = self.values[lower .. upper].iter().peekable();
        for value in range.values() {
            if members.next_if_eq(&&value).is_none() {
                values.push(value);
            }
        }
        values.extend_from_slice(&self.values[upper ..]);
        debug_assert_eq!(values.len(), cardinality);
        Container::from(ArrayContainer { values })
    }
    /// The complement of `self` within `range`, consuming `self`.
    pub fn inot(self, range: ValueRange) -> Container {
        if range.is_empty() {
            return Container::from(self);
        }
        self.not(range)
    }

    /// A bitmap container with the same members; `self` is unchanged.
    pub fn to_bitmap_container(&self) -> BitmapContainer {
        let mut bitmap = BitmapContainer::new();
        for value in self.values.iter() {
            bitmap.add(*value);
        }
        bitmap
    }

    #[inline]
    pub fn short_iter(&self) -> ArrayShortIter<'_> {
        ArrayShortIter { values: &self.values, pos: 0 }
    }
    #[inline]
    pub fn reverse_iter(&self) -> ArrayReverseIter<'_> {
        ArrayReverseIter { values: &self.values, end: self.values.len() }
    }
}

impl TryFrom<Vec<u16>> for ArrayContainer {
    type Error = ContainerError;
    fn try_from(values: Vec<u16>) -> Result<Self, Self::Error> {
        if let Some(index) = values.windows(2).position(|pair| pair[0] >= pair[1]) {
            return Err(ContainerError::Unsorted { index: index + 1 });
        }
        Ok(Self { values: SmallVec::from_vec(values) })
    }
}

impl From<ArrayContainer> for Vec<u16> {
    fn from(array: ArrayContainer) -> Self { array.values.into_vec() }
}

impl HeapSize for ArrayContainer {
    fn heap_size(&self) -> (usize, usize) {
        if self.values.spilled() {
            let size = std::mem::size_of::<u16>();
            (size * self.values.len(), size * self.values.capacity())
        } else {
            (0, 0)
        }
    }
}

/// Ascending cursor over an [`ArrayContainer`].
#[derive(Clone, Debug)]
pub struct ArrayShortIter<'a> {
    values: &'a [u16],
    pos: usize,
}

impl<'a> Iterator for ArrayShortIter<'a> {
    type Item = u16;
    #[inline]
    fn next(&mut self) -> Option<u16> {
        let value = self.values.get(self.pos).copied()?;
        self.pos += 1;
        Some(value)
    }
    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.values.len() - self.pos;
        (remaining, Some(remaining))
    }
}

impl<'a> ShortIterable for ArrayShortIter<'a> {
    #[inline(always)] fn has_next(&self) -> bool { self.pos < self.values.len() }
    fn next_many(&mut self, high: u32, buffer: &mut [u32]) -> usize {
        let count = std::cmp::min(buffer.len(), self.values.len() - self.pos);
        for (slot, value) in buffer.iter_mut().zip(&self.values[self.pos .. self.pos + count]) {
            *slot = high | *value as u32;
        }
        self.pos += count;
        count
    }
}

impl<'a> ShortPeekable for ArrayShortIter<'a> {
    #[inline(always)] fn peek_next(&self) -> Option<u16> { self.values.get(self.pos).copied() }
    #[inline]
    fn advance_if_needed(&mut self, minval: u16) {
        if self.pos < self.values.len() && self.values[self.pos] < minval {
            self.pos = advance_until(self.values, self.pos, minval);
        }
    }
}

/// Descending cursor over an [`ArrayContainer`].
#[derive(Clone, Debug)]
pub struct ArrayReverseIter<'a> {
    values: &'a [u16],
    end: usize,
}

impl<'a> Iterator for ArrayReverseIter<'a> {
    type Item = u16;
    #[inline]
    fn next(&mut self) -> Option<u16> {
        if self.end == 0 {
            return None;
        }
        self.end -= 1;
        Some(self.values[self.end])
    }
    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) { (self.end, Some(self.end)) }
}

impl<'a> ShortIterable for ArrayReverseIter<'a> {
    #[inline(always)] fn has_next(&self) -> bool { self.end > 0 }
}
