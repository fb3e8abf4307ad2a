//! Error types for read-only map views.

use thiserror::Error;

/// Errors produced by map views and the writable backends they wrap.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ViewError {
    /// A required constructor argument was absent.
    #[error("invalid argument: {name} must be present")]
    InvalidArgument { name: &'static str },

    /// The requested key has no entry.
    #[error("key not found")]
    KeyNotFound,

    /// A mutation was attempted through a read-only view.
    #[error("map is read-only: {op} is not supported")]
    NotSupported { op: &'static str },

    /// The destination buffer cannot hold every entry from `offset` on.
    #[error("buffer too small: {required} entries at offset {offset} exceed capacity {capacity}")]
    OutOfBounds {
        offset: usize,
        required: usize,
        capacity: usize,
    },

    /// `add` was called with a key that already has an entry.
    #[error("an entry with the same key already exists")]
    DuplicateKey,
}

impl ViewError {
    /// Returns `true` for rejections caused by the view being read-only.
    pub fn is_read_only(&self) -> bool {
        matches!(self, Self::NotSupported { .. })
    }
}

/// Result alias for view operations.
pub type ViewResult<T> = Result<T, ViewError>;
