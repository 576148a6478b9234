//! Half-open ranges of container values.

use std::ops::{Range, RangeInclusive};

use crate::{ContainerError, MAX_CAPACITY};

/// A validated range `[start, end)` of values within one container.
///
/// Bounds are `u32` so that the range can reach the last value `65535`;
/// `end` may be at most `65536`. An empty range (`start == end`) is valid.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ValueRange {
    start: u32,
    end: u32,
}

impl ValueRange {
    /// Validates `[start, end)`.
    pub fn new(start: u32, end: u32) -> Result<Self, ContainerError> {
        if start > end || end > MAX_CAPACITY {
            return Err(ContainerError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }
    /// The range covering every value a container can hold.
    #[inline(always)] pub fn full() -> Self { Self { start: 0, end: MAX_CAPACITY } }
    #[inline(always)] pub fn start(&self) -> u32 { self.start }
    #[inline(always)] pub fn end(&self) -> u32 { self.end }
    /// The number of values in the range.
    #[inline(always)] pub fn len(&self) -> usize { (self.end - self.start) as usize }
    #[inline(always)] pub fn is_empty(&self) -> bool { self.start == self.end }
    #[inline(always)] pub fn contains(&self, value: u16) -> bool {
        self.start <= value as u32 && (value as u32) < self.end
    }
    /// The values of the range, in ascending order.
    #[inline]
    pub fn values(&self) -> impl DoubleEndedIterator<Item=u16> {
        (self.start .. self.end).map(|v| v as u16)
    }
}

impl TryFrom<Range<u32>> for ValueRange {
    type Error = ContainerError;
    fn try_from(range: Range<u32>) -> Result<Self, Self::Error> {
        Self::new(range.start, range.end)
    }
}

impl From<RangeInclusive<u16>> for ValueRange {
    fn from(range: RangeInclusive<u16>) -> Self {
        let (start, end) = range.into_inner();
        if start > end {
            Self { start: start as u32, end: start as u32 }
        } else {
            Self { start: start as u32, end: end as u32 + 1 }
        }
    }
}

#[cfg(test)]
mod test {

    use super::ValueRange;
    use crate::ContainerError;

    #[test]
    fn validation() {
        assert_eq!(ValueRange::new(5, 3), Err(ContainerError::InvalidRange { start: 5, end: 3 }));
        assert!(ValueRange::new(0, 65537).is_err());
        assert!(ValueRange::try_from(3 .. 3).unwrap().is_empty());
        assert_eq!(ValueRange::full().len(), 65536);
        assert_eq!(ValueRange::from(0 ..= 65535), ValueRange::full());
        assert!(ValueRange::from(9 ..= 2).is_empty());

        let range = ValueRange::new(10, 12).unwrap();
        assert!(!range.contains(9));
        assert!(range.contains(11));
        assert!(!range.contains(12));
        assert_eq!(range.values().collect::<Vec<_>>(), vec![10, 11]);
    }
}
