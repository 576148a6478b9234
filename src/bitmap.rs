//! Dense containers, storing members as a fixed 65536-bit vector.

use std::fmt;

use crate::iter::{ShortIterable, ShortPeekable};
use crate::util::{count_leading_zeros, count_trailing_zeros, flip_range, popcount, popcount_slice, reset_range, set_range};
use crate::{ArrayContainer, Container, ContainerError, HeapSize, ValueRange, ARRAY_DEFAULT_MAX_SIZE, BITMAP_WORDS, MAX_CAPACITY};

/// A set of `u16` values kept as one bit per possible value.
///
/// Bit `v % 64` of word `v / 64` is set exactly when `v` is a member. The container
/// always holds all [`BITMAP_WORDS`] words (8KB) whatever its cardinality, and keeps
/// a running count of set bits so that `cardinality` is constant time.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<u64>", into = "Vec<u64>"))]
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BitmapContainer {
    /// Always equal to the number of set bits in `words`.
    cardinality: usize,
    words: Box<[u64; BITMAP_WORDS]>,
}

impl BitmapContainer {
    /// An empty bitmap.
    pub fn new() -> Self {
        Self { cardinality: 0, words: bytemuck::allocation::zeroed_box() }
    }
    /// A bitmap containing every value.
    pub fn full() -> Self {
        Self::from_range(ValueRange::full())
    }
    /// A bitmap containing exactly the values of `range`.
    pub fn from_range(range: ValueRange) -> Self {
        let mut bitmap = Self::new();
        bitmap.add_range(range);
        bitmap
    }

    #[inline(always)]
    fn locate(value: u16) -> (usize, u64) {
        ((value >> 6) as usize, 1u64 << (value & 63))
    }

    /// Inserts `value`, returning `true` if it was not already present.
    #[inline]
    pub fn add(&mut self, value: u16) -> bool {
        let (index, mask) = Self::locate(value);
        let word = self.words[index];
        self.words[index] = word | mask;
        let added = word & mask == 0;
        self.cardinality += added as usize;
        added
    }
    /// Removes `value`, returning `true` if it was present.
    #[inline]
    pub fn remove(&mut self, value: u16) -> bool {
        let (index, mask) = Self::locate(value);
        let word = self.words[index];
        self.words[index] = word & !mask;
        let removed = word & mask != 0;
        self.cardinality -= removed as usize;
        removed
    }
    #[inline]
    pub fn contains(&self, value: u16) -> bool {
        let (index, mask) = Self::locate(value);
        self.words[index] & mask != 0
    }

    #[inline(always)] pub fn cardinality(&self) -> usize { self.cardinality }
    /// Counts the set bits afresh, rather than reading the maintained count.
    #[inline] pub fn compute_cardinality(&self) -> usize { popcount_slice(&self.words[..]) }
    #[inline(always)] pub fn is_empty(&self) -> bool { self.cardinality == 0 }
    #[inline(always)] pub fn is_full(&self) -> bool { self.cardinality == MAX_CAPACITY as usize }
    #[inline(always)] pub fn words(&self) -> &[u64; BITMAP_WORDS] { &self.words }

    pub fn minimum(&self) -> Option<u16> {
        let (index, word) = self.words.iter().enumerate().find(|(_, w)| **w != 0)?;
        Some((index * 64 + count_trailing_zeros(*word) as usize) as u16)
    }
    pub fn maximum(&self) -> Option<u16> {
        let (index, word) = self.words.iter().enumerate().rev().find(|(_, w)| **w != 0)?;
        Some((index * 64 + 63 - count_leading_zeros(*word) as usize) as u16)
    }
    /// The number of members less than or equal to `value`.
    pub fn rank(&self, value: u16) -> usize {
        let index = (value >> 6) as usize;
        let within = self.words[index] & (!0u64 >> (63 - (value & 63)));
        popcount_slice(&self.words[.. index]) + popcount(within) as usize
    }
    /// The member with `index` smaller members, should one exist.
    pub fn select(&self, index: usize) -> Option<u16> {
        if index >= self.cardinality {
            return None;
        }
        let mut remaining = index;
        for (position, word) in self.words.iter().enumerate() {
            let ones = popcount(*word) as usize;
            if remaining < ones {
                let mut word = *word;
                for _ in 0 .. remaining {
                    word &= word - 1;
                }
                return Some((position * 64 + count_trailing_zeros(word) as usize) as u16);
            }
            remaining -= ones;
        }
        None
    }

    /// Applies the change in set bits reported by a word-range update.
    #[inline(always)]
    fn adjust(&mut self, delta: isize) {
        self.cardinality = (self.cardinality as isize + delta) as usize;
        debug_assert_eq!(self.cardinality, self.compute_cardinality());
    }
    /// Inserts every value of `range`, returning the number of new members.
    pub fn add_range(&mut self, range: ValueRange) -> usize {
        let delta = set_range(&mut self.words[..], range.start(), range.end());
        self.adjust(delta);
        delta as usize
    }
    /// Removes every value of `range`, returning the number of members removed.
    pub fn remove_range(&mut self, range: ValueRange) -> usize {
        let delta = reset_range(&mut self.words[..], range.start(), range.end());
        self.adjust(delta);
        (-delta) as usize
    }
    /// Flips membership of every value of `range`, keeping the bitmap representation.
    pub fn flip_range(&mut self, range: ValueRange) {
        let delta = flip_range(&mut self.words[..], range.start(), range.end());
        self.adjust(delta);
    }

    /// The complement of `self` within `range`, leaving `self` unchanged.
    pub fn not(&self, range: ValueRange) -> Container {
        self.clone().inot(range)
    }
    /// The complement of `self` within `range`, flipping bits in place.
    ///
    /// The result becomes an array container when its cardinality is at most
    /// [`ARRAY_DEFAULT_MAX_SIZE`].
    pub fn inot(mut self, range: ValueRange) -> Container {
        if range.is_empty() {
            return Container::from(self);
        }
        self.flip_range(range);
        if self.cardinality <= ARRAY_DEFAULT_MAX_SIZE {
            Container::from(self.to_array_container())
        } else {
            Container::from(self)
        }
    }

    /// An array container with the same members; `self` is unchanged.
    pub fn to_array_container(&self) -> ArrayContainer {
        ArrayContainer::from_sorted_iter(self.short_iter(), self.cardinality)
    }

    #[inline]
    pub fn short_iter(&self) -> BitmapShortIter<'_> {
        let mut iter = BitmapShortIter { words: &self.words[..], index: 0, word: self.words[0] };
        iter.skip_empty();
        iter
    }
    #[inline]
    pub fn reverse_iter(&self) -> BitmapReverseIter<'_> {
        let index = BITMAP_WORDS - 1;
        let mut iter = BitmapReverseIter { words: &self.words[..], index, word: self.words[index] };
        iter.skip_empty();
        iter
    }
}

impl Default for BitmapContainer {
    fn default() -> Self { Self::new() }
}

impl fmt::Debug for BitmapContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BitmapContainer")
            .field("cardinality", &self.cardinality)
            .finish_non_exhaustive()
    }
}

impl TryFrom<Vec<u64>> for BitmapContainer {
    type Error = ContainerError;
    fn try_from(words: Vec<u64>) -> Result<Self, Self::Error> {
        let len = words.len();
        let words: Box<[u64; BITMAP_WORDS]> = words
            .into_boxed_slice()
            .try_into()
            .map_err(|_| ContainerError::WordCount(len))?;
        let cardinality = popcount_slice(&words[..]);
        Ok(Self { cardinality, words })
    }
}

impl From<BitmapContainer> for Vec<u64> {
    fn from(bitmap: BitmapContainer) -> Self { bitmap.words.to_vec() }
}

impl HeapSize for BitmapContainer {
    fn heap_size(&self) -> (usize, usize) {
        let size = std::mem::size_of::<[u64; BITMAP_WORDS]>();
        (size, size)
    }
}

/// Ascending cursor over a [`BitmapContainer`].
///
/// Holds the current word with already-visited bits cleared. Unless the cursor is
/// exhausted, that word is non-zero and its lowest set bit is the next value.
#[derive(Clone, Debug)]
pub struct BitmapShortIter<'a> {
    words: &'a [u64],
    index: usize,
    word: u64,
}

impl<'a> BitmapShortIter<'a> {
    /// Moves past empty words, leaving `index == words.len()` if none remain.
    #[inline]
    fn skip_empty(&mut self) {
        while self.word == 0 {
            self.index += 1;
            if self.index >= self.words.len() {
                self.index = self.words.len();
                return;
            }
            self.word = self.words[self.index];
        }
    }
}

impl<'a> Iterator for BitmapShortIter<'a> {
    type Item = u16;
    #[inline]
    fn next(&mut self) -> Option<u16> {
        let value = self.peek_next()?;
        self.word &= self.word - 1;
        self.skip_empty();
        Some(value)
    }
}

impl<'a> ShortIterable for BitmapShortIter<'a> {
    #[inline(always)] fn has_next(&self) -> bool { self.word != 0 }
}

impl<'a> ShortPeekable for BitmapShortIter<'a> {
    #[inline]
    fn peek_next(&self) -> Option<u16> {
        if self.word == 0 {
            return None;
        }
        Some((self.index * 64 + count_trailing_zeros(self.word) as usize) as u16)
    }
    #[inline]
    fn advance_if_needed(&mut self, minval: u16) {
        match self.peek_next() {
            Some(next) if next < minval => {
                self.index = (minval >> 6) as usize;
                self.word = self.words[self.index] & (!0u64 << (minval & 63));
                self.skip_empty();
            }
            _ => { }
        }
    }
}

/// Descending cursor over a [`BitmapContainer`].
///
/// Mirrors [`BitmapShortIter`], consuming the highest set bit of the current word.
#[derive(Clone, Debug)]
pub struct BitmapReverseIter<'a> {
    words: &'a [u64],
    index: usize,
    word: u64,
}

impl<'a> BitmapReverseIter<'a> {
    #[inline]
    fn skip_empty(&mut self) {
        while self.word == 0 && self.index > 0 {
            self.index -= 1;
            self.word = self.words[self.index];
        }
    }
}

impl<'a> Iterator for BitmapReverseIter<'a> {
    type Item = u16;
    #[inline]
    fn next(&mut self) -> Option<u16> {
        if self.word == 0 {
            return None;
        }
        let bit = 63 - count_leading_zeros(self.word);
        self.word &= !(1u64 << bit);
        let value = (self.index * 64 + bit as usize) as u16;
        self.skip_empty();
        Some(value)
    }
}

impl<'a> ShortIterable for BitmapReverseIter<'a> {
    #[inline(always)] fn has_next(&self) -> bool { self.word != 0 }
}
