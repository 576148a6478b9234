//! Errors reported when a container or range would violate its invariants.

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerError {
    /// A range whose bounds are reversed or exceed the 16-bit universe.
    #[error("invalid range [{start}, {end}): bounds must satisfy start <= end <= 65536")]
    InvalidRange { start: u32, end: u32 },

    /// Values offered as an array container are not strictly increasing.
    #[error("values are not strictly increasing at index {index}")]
    Unsorted { index: usize },

    /// Words offered as a bitmap container are not exactly 1024 words long.
    #[error("bitmap containers hold exactly 1024 words, found {0}")]
    WordCount(usize),
}
