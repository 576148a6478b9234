//! Cursors over container values.
//!
//! Every forward cursor implements [`ShortPeekable`], which adds peeking and
//! forward seeking to plain iteration; reverse cursors implement [`ShortIterable`].
//! The [`ShortIter`] and [`ReverseIter`] enums wrap the cursors of either
//! representation, so that callers holding a [`crate::Container`] never need to
//! know which one they have.
//!
//! Cursors borrow the container they walk, and so cannot outlive a mutation of it.

use crate::array::{ArrayReverseIter, ArrayShortIter};
use crate::bitmap::{BitmapReverseIter, BitmapShortIter};

/// An iterator over the values of a container, in a fixed order.
pub trait ShortIterable : Iterator<Item=u16> {
    /// Whether a subsequent call to `next` would yield a value.
    fn has_next(&self) -> bool;

    /// Writes `high | value` for upcoming values into `buffer`, returning the number written.
    ///
    /// Stops when either the buffer is full or the iterator is exhausted.
    fn next_many(&mut self, high: u32, buffer: &mut [u32]) -> usize {
        let mut written = 0;
        while written < buffer.len() {
            match self.next() {
                Some(value) => {
                    buffer[written] = high | value as u32;
                    written += 1;
                }
                None => break,
            }
        }
        written
    }
}

/// A forward iterator that can look at and skip ahead to upcoming values.
pub trait ShortPeekable : ShortIterable {
    /// The value the next call to `next` would return, without advancing.
    fn peek_next(&self) -> Option<u16>;
    /// Moves forward to the first value at least `minval`.
    ///
    /// The cursor never moves backwards: if the next value is already at least
    /// `minval` this does nothing. If no such value exists the iterator is exhausted.
    fn advance_if_needed(&mut self, minval: u16);
}

/// Ascending iterator over a container of either representation.
#[derive(Clone, Debug)]
pub enum ShortIter<'a> {
    Array(ArrayShortIter<'a>),
    Bitmap(BitmapShortIter<'a>),
}

impl<'a> Iterator for ShortIter<'a> {
    type Item = u16;
    #[inline]
    fn next(&mut self) -> Option<u16> {
        match self {
            ShortIter::Array(iter) => iter.next(),
            ShortIter::Bitmap(iter) => iter.next(),
        }
    }
}

impl<'a> ShortIterable for ShortIter<'a> {
    #[inline]
    fn has_next(&self) -> bool {
        match self {
            ShortIter::Array(iter) => iter.has_next(),
            ShortIter::Bitmap(iter) => iter.has_next(),
        }
    }
    fn next_many(&mut self, high: u32, buffer: &mut [u32]) -> usize {
        match self {
            ShortIter::Array(iter) => iter.next_many(high, buffer),
            ShortIter::Bitmap(iter) => iter.next_many(high, buffer),
        }
    }
}

impl<'a> ShortPeekable for ShortIter<'a> {
    #[inline]
    fn peek_next(&self) -> Option<u16> {
        match self {
            ShortIter::Array(iter) => iter.peek_next(),
            ShortIter::Bitmap(iter) => iter.peek_next(),
        }
    }
    #[inline]
    fn advance_if_needed(&mut self, minval: u16) {
        match self {
            ShortIter::Array(iter) => iter.advance_if_needed(minval),
            ShortIter::Bitmap(iter) => iter.advance_if_needed(minval),
        }
    }
}

/// Descending iterator over a container of either representation.
#[derive(Clone, Debug)]
pub enum ReverseIter<'a> {
    Array(ArrayReverseIter<'a>),
    Bitmap(BitmapReverseIter<'a>),
}

impl<'a> Iterator for ReverseIter<'a> {
    type Item = u16;
    #[inline]
    fn next(&mut self) -> Option<u16> {
        match self {
            ReverseIter::Array(iter) => iter.next(),
            ReverseIter::Bitmap(iter) => iter.next(),
        }
    }
}

impl<'a> ShortIterable for ReverseIter<'a> {
    #[inline]
    fn has_next(&self) -> bool {
        match self {
            ReverseIter::Array(iter) => iter.has_next(),
            ReverseIter::Bitmap(iter) => iter.has_next(),
        }
    }
}
