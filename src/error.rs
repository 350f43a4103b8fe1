//! Errors reported by the indexable sequence.
//!
//! Lookups that simply miss (an absent key, a duplicate insert) are not
//! errors; they come back as `None` or `false`.

use thiserror::Error;

/// Error returned by rank-based operations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The rank lies outside the range the operation accepts.
    #[error("index {index} out of bounds (len {len})")]
    IndexOutOfBounds { index: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
