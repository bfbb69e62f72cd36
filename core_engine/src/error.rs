use thiserror::Error;

/// Errors returned by [`crate::WordTrie`] operations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrieError {
    /// The input holds a character outside `a`–`z`. `position` is the byte offset of `ch`.
    #[error("invalid character {ch:?} at byte {position}")]
    InvalidCharacter { ch: char, position: usize },
}

/// No stored word extends the queried prefix.
///
/// This is a regular query outcome rather than a failure of the operation.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[error("no extension")]
pub struct NoExtension;
