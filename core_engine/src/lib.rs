//! In-memory autocomplete index.
//!
//! Words are stored in a compressed trie over `a`–`z`. Every node caches the best terminal in
//! its own subtree (highest frequency, ties broken by the lexicographically smaller word), so a
//! prefix query reads its answer off the node it lands on instead of searching the subtree.

mod alphabet;
pub mod error;
pub mod trie;

pub use error::{NoExtension, TrieError};
pub use trie::{Completion, Iter, PrefixCompletion, WordTrie};
