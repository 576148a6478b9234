//! Storage accounting shared by the container representations.

/// Reports heap storage in bytes.
pub trait HeapSize {
    /// Active (len) and allocated (cap) heap sizes in bytes.
    /// This should not include the size of `self` itself.
    fn heap_size(&self) -> (usize, usize) { (0, 0) }
}

