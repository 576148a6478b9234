//! Bit utilities shared by the array and bitmap containers.
//!
//! These are pure functions over words and sorted slices. Word-level helpers
//! address values by their position in a 1024-word bitmap: value `v` lives in
//! word `v >> 6` at bit `v & 63`.

/// The index of the least significant set bit of `word`, or `64` if `word` is zero.
#[inline(always)]
pub fn count_trailing_zeros(word: u64) -> u32 { word.trailing_zeros() }

/// The number of leading zero bits of `word`, or `64` if `word` is zero.
#[inline(always)]
pub fn count_leading_zeros(word: u64) -> u32 { word.leading_zeros() }

/// The number of set bits in `word`.
#[inline(always)]
pub fn popcount(word: u64) -> u32 { word.count_ones() }

/// The number of set bits across `words`.
#[inline]
pub fn popcount_slice(words: &[u64]) -> usize {
    words.iter().map(|w| popcount(*w) as usize).sum()
}

/// Locates `target` in an ascending, duplicate-free slice.
///
/// Returns the index of `target` if present, and otherwise `-(insertion + 1)`
/// where `insertion` is the index at which `target` would be inserted.
/// A non-negative result therefore means "found".
pub fn binary_search(sorted: &[u16], target: u16) -> isize {
    let mut low = 0isize;
    let mut high = sorted.len() as isize - 1;
    while low <= high {
        let middle = (low + high) >> 1;
        let value = sorted[middle as usize];
        if value < target {
            low = middle + 1;
        } else if value > target {
            high = middle - 1;
        } else {
            return middle;
        }
    }
    -(low + 1)
}

/// Recovers the insertion point from a negative [`binary_search`] result.
#[inline(always)]
pub fn insertion_point(encoded: isize) -> usize {
    debug_assert!(encoded < 0);
    (-encoded - 1) as usize
}

/// The smallest index `i > pos` with `sorted[i] >= min`, or `sorted.len()` if there is none.
///
/// Gallops forward from `pos` before finishing with a binary search, so that
/// short hops from the current position cost little more than a linear probe.
pub fn advance_until(sorted: &[u16], pos: usize, min: u16) -> usize {
    let lower = pos + 1;
    if lower >= sorted.len() || sorted[lower] >= min {
        return lower;
    }

    let mut span = 1;
    while lower + span < sorted.len() && sorted[lower + span] < min {
        span *= 2;
    }
    let upper = std::cmp::min(lower + span, sorted.len() - 1);
    if sorted[upper] < min {
        return sorted.len();
    }

    // Invariant: sorted[lower + span / 2] < min <= sorted[upper].
    let start = lower + span / 2 + 1;
    start + sorted[start..upper].partition_point(|x| *x < min)
}

/// The mask of bits in the word holding `start`, from `start` upwards.
#[inline(always)]
fn mask_from(start: u32) -> u64 { !0u64 << (start & 63) }

/// The mask of bits in the word holding `last`, up to and including `last`.
#[inline(always)]
fn mask_through(last: u32) -> u64 { !0u64 >> (63 - (last & 63)) }

/// Rewrites the bits of `words` in `[start, end)` using `op(word, mask)`.
///
/// The operation receives each overlapping word along with a mask of the bits
/// in range; its result is taken as the new word, with out-of-range bits
/// forced back to their prior values. Returns the change in the number of set bits.
pub fn update_range(words: &mut [u64], start: u32, end: u32, op: impl Fn(u64, u64) -> u64) -> isize {
    if start >= end {
        return 0;
    }
    let first = (start >> 6) as usize;
    let last = ((end - 1) >> 6) as usize;
    let mut delta = 0isize;
    for index in first ..= last {
        let mut mask = !0u64;
        if index == first { mask &= mask_from(start); }
        if index == last { mask &= mask_through(end - 1); }
        let old = words[index];
        let new = (op(old, mask) & mask) | (old & !mask);
        delta += popcount(new) as isize - popcount(old) as isize;
        words[index] = new;
    }
    delta
}

/// Sets every bit in `[start, end)`, returning the number of newly set bits.
#[inline]
pub fn set_range(words: &mut [u64], start: u32, end: u32) -> isize {
    update_range(words, start, end, |word, mask| word | mask)
}

/// Clears every bit in `[start, end)`, returning the (non-positive) change in set bits.
#[inline]
pub fn reset_range(words: &mut [u64], start: u32, end: u32) -> isize {
    update_range(words, start, end, |word, mask| word & !mask)
}

/// Flips every bit in `[start, end)`, returning the change in set bits.
#[inline]
pub fn flip_range(words: &mut [u64], start: u32, end: u32) -> isize {
    update_range(words, start, end, |word, mask| word ^ mask)
}
