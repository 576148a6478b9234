//! Containers for the 16-bit blocks of a roaring bitmap.
//!
//! A roaring bitmap splits its values by their high bits, and stores the low
//! 16 bits of each block's values in a container. This crate provides those
//! containers: a sparse [`ArrayContainer`] (a sorted list of values), a dense
//! [`BitmapContainer`] (one bit for each of the 65536 possible values), and a
//! [`Container`] that holds whichever of the two suits its cardinality.
//!
//! All three support membership updates, ascending and descending cursors, and
//! complementing a range of values. The ascending cursors can also skip ahead to
//! a value, which set algebra between containers uses to pass over long stretches
//! of non-overlapping values.
//!
//! ```
//! use roaring_containers::{Container, ValueRange};
//! use roaring_containers::iter::ShortPeekable;
//!
//! let mut container: Container = [1u16, 3, 5, 7, 9].into_iter().collect();
//! container.add(11);
//!
//! let mut cursor = container.short_iter();
//! cursor.advance_if_needed(6);
//! assert_eq!(cursor.peek_next(), Some(7));
//!
//! let flipped = container.inot(ValueRange::new(0, 12).unwrap());
//! assert_eq!(flipped.short_iter().collect::<Vec<_>>(), vec![0, 2, 4, 6, 8, 10]);
//! ```

pub mod util;
pub mod range;
pub mod common;
pub mod array;
pub mod bitmap;
pub mod iter;
pub mod roaring;
pub mod error;

#[cfg(test)]
mod proptests;

pub use array::ArrayContainer;
pub use bitmap::BitmapContainer;
pub use common::HeapSize;
pub use error::ContainerError;
pub use iter::{ReverseIter, ShortIter, ShortIterable, ShortPeekable};
pub use range::ValueRange;
pub use roaring::Container;

/// The number of distinct values a container can hold.
pub const MAX_CAPACITY: u32 = 1 << 16;

/// The number of 64-bit words in a bitmap container.
pub const BITMAP_WORDS: usize = MAX_CAPACITY as usize / 64;

/// The largest cardinality at which [`Container`] prefers the array representation.
///
/// A bitmap costs 8192 bytes at any cardinality, and an array two bytes per value,
/// so the two break even at 4096 values.
pub const ARRAY_DEFAULT_MAX_SIZE: usize = 4096;
