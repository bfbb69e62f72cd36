//! Arena-backed compressed trie.
//!
//! Nodes live in a flat `Vec` and refer to each other by `NodeId`. A node's `children` slots are
//! the only owning links; `parent` and `best` are plain indices, so there is nothing to keep
//! alive and dropping the trie is a single `Vec` drop with no recursion.

mod iter;
mod node;
mod query;

use tracing::{debug, trace};

use crate::alphabet;
use crate::error::{NoExtension, TrieError};
use node::{Node, NodeId, ROOT};
use query::Cursor;

pub use iter::Iter;
pub use query::{Completion, PrefixCompletion};

/// Where a descent for a word stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Descent {
    /// The word is fully consumed on the boundary of this node.
    Exact(NodeId),
    /// `parent` has no child for `letters[at]`.
    Vacant { parent: NodeId, at: usize },
    /// `child`, selected by `letters[at]`, has a label agreeing with the rest of the word on only
    /// its first `common` letters.
    Diverges {
        parent: NodeId,
        child: NodeId,
        at: usize,
        common: usize,
    },
}

/// Frequency-tracking autocomplete index over lowercase ASCII words.
#[derive(Clone, Debug)]
pub struct WordTrie {
    nodes: Vec<Node>,
    /// Distinct stored words.
    words: usize,
}

impl Default for WordTrie {
    fn default() -> Self {
        Self::new()
    }
}

// Constructors & capacity management
impl WordTrie {
    pub fn new() -> Self {
        Self::with_capacity(1)
    }

    /// Creates a trie with room for `cap` nodes before the arena reallocates.
    pub fn with_capacity(cap: usize) -> Self {
        let mut nodes = Vec::with_capacity(cap.max(1));
        nodes.push(Node::new(ROOT, None, Vec::new()));
        Self { nodes, words: 0 }
    }

    /// Reserves room for at least `additional` more nodes.
    pub fn reserve(&mut self, additional: usize) {
        self.nodes.reserve(additional);
    }

    /// Removes every word, keeping the arena's allocation.
    pub fn clear(&mut self) {
        self.nodes.truncate(1);
        self.nodes[ROOT as usize] = Node::new(ROOT, None, Vec::new());
        self.words = 0;
    }

    /// Number of distinct stored words.
    pub fn len(&self) -> usize {
        self.words
    }

    pub fn is_empty(&self) -> bool {
        self.words == 0
    }

    /// Number of nodes in the arena, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id as usize]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id as usize]
    }

    /// The arena holds at most `NodeId::MAX + 1` nodes; ids are never reused.
    fn alloc(&mut self, parent: NodeId, label: Vec<u8>) -> NodeId {
        debug_assert!(
            NodeId::try_from(self.nodes.len()).is_ok(),
            "node arena exceeds NodeId range"
        );
        let id = self.nodes.len() as NodeId;
        self.nodes.push(Node::new(id, Some(parent), label));
        id
    }
}

// Insertion
impl WordTrie {
    /// Records one more occurrence of `word` and returns its updated frequency.
    ///
    /// Fails with [`TrieError::InvalidCharacter`] if `word` holds anything but `a`–`z`, in which
    /// case the trie is left untouched. The empty word is stored on the root.
    pub fn insert(&mut self, word: &str) -> Result<u32, TrieError> {
        let letters = alphabet::validate(word)?;
        let target = match self.descend(letters) {
            Descent::Exact(id) => id,
            Descent::Vacant { parent, at } => self.attach(parent, letters[at], &letters[at + 1..]),
            Descent::Diverges {
                parent,
                child,
                at,
                common,
            } => self.split(parent, child, letters[at], common, &letters[at + 1..]),
        };

        let node = self.node_mut(target);
        let first = node.frequency == 0;
        node.frequency = node.frequency.saturating_add(1);
        let frequency = node.frequency;
        if first {
            node.word = word.to_owned();
            self.words += 1;
        }
        self.promote(target);
        Ok(frequency)
    }

    /// Follows `letters` from the root as far as whole edges match.
    fn descend(&self, letters: &[u8]) -> Descent {
        let mut cur = ROOT;
        let mut at = 0;
        loop {
            let Some(&branch) = letters.get(at) else {
                return Descent::Exact(cur);
            };
            let Some(child) = self.node(cur).child(branch) else {
                return Descent::Vacant { parent: cur, at };
            };
            let label = &self.node(child).label;
            let common = common_prefix_len(label, &letters[at + 1..]);
            if common < label.len() {
                return Descent::Diverges {
                    parent: cur,
                    child,
                    at,
                    common,
                };
            }
            cur = child;
            at += 1 + common;
        }
    }

    /// Hangs a new leaf for `branch` + `rest` under `parent`.
    fn attach(&mut self, parent: NodeId, branch: u8, rest: &[u8]) -> NodeId {
        let id = self.alloc(parent, rest.to_vec());
        self.node_mut(parent).set_child(branch, id);
        trace!(parent_id = parent, id, branch = %char::from(branch), "attached leaf");
        id
    }

    /// Breaks the edge into `child` after `common` label letters.
    ///
    /// A junction takes the child's place under `parent` and the child moves below it. When
    /// `rest` continues past the shared part, a new leaf is hung next to the child and returned;
    /// otherwise the junction itself ends the word and is returned.
    fn split(
        &mut self,
        parent: NodeId,
        child: NodeId,
        branch: u8,
        common: usize,
        rest: &[u8],
    ) -> NodeId {
        let junction = self.alloc(parent, rest[..common].to_vec());
        // Until the new word is folded in, the junction's subtree is exactly the child's.
        let inherited = self.node(child).best;
        self.node_mut(junction).best = inherited;
        self.node_mut(parent).set_child(branch, junction);

        let moved = self.node_mut(child);
        let key = moved.label[common];
        moved.label.drain(..=common);
        moved.parent = Some(junction);
        self.node_mut(junction).set_child(key, child);
        debug!(parent_id = parent, junction, child, common, "split edge");

        match rest.get(common) {
            Some(&letter) => self.attach(junction, letter, &rest[common + 1..]),
            None => junction,
        }
    }

    /// Re-establishes `best` on the path from `target` up to, not including, the root.
    ///
    /// On equal frequency the target wins when its word is smaller or equal, so re-inserting the
    /// current best keeps it.
    fn promote(&mut self, target: NodeId) {
        let mut cursor = Some(target);
        while let Some(id) = cursor {
            if id == ROOT {
                break;
            }
            let current = self.node(id).best;
            if self.node(target).rank() <= self.node(current).rank() {
                self.node_mut(id).best = target;
            }
            cursor = self.node(id).parent;
        }
    }
}

// Queries
impl WordTrie {
    /// Best completion for every prefix of `query`, shortest first.
    ///
    /// Entry `i` covers the first `i + 1` letters. Once a prefix has no extension, neither has
    /// any longer one.
    pub fn completions(&self, query: &str) -> Result<Vec<PrefixCompletion<'_>>, TrieError> {
        let letters = alphabet::validate(query)?;
        let mut cursor = Cursor::Boundary(ROOT);
        Ok(letters
            .iter()
            .enumerate()
            .map(|(i, &letter)| {
                cursor = self.advance(cursor, letter);
                PrefixCompletion {
                    prefix_len: i + 1,
                    best: cursor
                        .node()
                        .map(|id| self.best_of(id))
                        .ok_or(NoExtension),
                }
            })
            .collect())
    }

    /// Best completion of a single prefix, or `None` if no stored word extends it.
    ///
    /// The empty prefix is extended by every word, so it reports the best word overall.
    pub fn best_completion(&self, prefix: &str) -> Result<Option<Completion<'_>>, TrieError> {
        let letters = alphabet::validate(prefix)?;
        if letters.is_empty() {
            return Ok(self.overall_best());
        }
        let cursor = letters
            .iter()
            .try_fold(Cursor::Boundary(ROOT), |cursor, &letter| {
                match self.advance(cursor, letter) {
                    Cursor::Failed => None,
                    next => Some(next),
                }
            });
        Ok(cursor.and_then(Cursor::node).map(|id| self.best_of(id)))
    }

    /// The root's `best` is never maintained, so combine its children's instead.
    fn overall_best(&self) -> Option<Completion<'_>> {
        let root = self.node(ROOT);
        root.children
            .iter()
            .flatten()
            .map(|&child| self.node(child).best)
            .chain(root.is_terminal().then_some(ROOT))
            .min_by(|&a, &b| self.node(a).rank().cmp(&self.node(b).rank()))
            .map(|id| self.completion(id))
    }

    /// How many times `word` was inserted.
    pub fn frequency(&self, word: &str) -> Result<u32, TrieError> {
        let letters = alphabet::validate(word)?;
        Ok(match self.descend(letters) {
            Descent::Exact(id) => self.node(id).frequency,
            _ => 0,
        })
    }

    /// Every stored word with its frequency, in lexicographic order.
    pub fn list_all(&self) -> Vec<(&str, u32)> {
        self.iter().collect()
    }

    /// Lazy form of [`WordTrie::list_all`].
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self)
    }
}

fn common_prefix_len(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}
