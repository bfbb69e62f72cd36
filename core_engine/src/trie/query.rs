use crate::error::NoExtension;

use super::node::NodeId;
use super::WordTrie;

/// The best stored word reachable from some prefix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Completion<'a> {
    pub word: &'a str,
    pub frequency: u32,
}

/// Outcome of a completion query for the prefix made of the first `prefix_len` letters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PrefixCompletion<'a> {
    pub prefix_len: usize,
    pub best: Result<Completion<'a>, NoExtension>,
}

/// Position of a prefix walk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Cursor {
    /// The whole edge into this node has been consumed.
    Boundary(NodeId),
    /// `offset` letters of the node's label have been consumed, `0 <= offset < label.len()`.
    MidEdge { node: NodeId, offset: usize },
    /// A letter failed to match. Permanent: a trie offers no alternate path.
    Failed,
}

impl Cursor {
    /// Node whose edge or boundary the cursor is on.
    pub(crate) fn node(self) -> Option<NodeId> {
        match self {
            Cursor::Boundary(node) | Cursor::MidEdge { node, .. } => Some(node),
            Cursor::Failed => None,
        }
    }
}

impl WordTrie {
    /// Consumes one more letter of a prefix.
    pub(crate) fn advance(&self, cursor: Cursor, letter: u8) -> Cursor {
        match cursor {
            Cursor::Failed => Cursor::Failed,
            Cursor::Boundary(id) => match self.node(id).child(letter) {
                Some(child) => self.settle(child, 0),
                None => Cursor::Failed,
            },
            Cursor::MidEdge { node, offset } => {
                if self.node(node).label[offset] == letter {
                    self.settle(node, offset + 1)
                } else {
                    Cursor::Failed
                }
            }
        }
    }

    fn settle(&self, node: NodeId, offset: usize) -> Cursor {
        if offset == self.node(node).label.len() {
            Cursor::Boundary(node)
        } else {
            Cursor::MidEdge { node, offset }
        }
    }

    /// Cached best terminal of `id`'s subtree.
    pub(crate) fn best_of(&self, id: NodeId) -> Completion<'_> {
        self.completion(self.node(id).best)
    }

    pub(crate) fn completion(&self, id: NodeId) -> Completion<'_> {
        let node = self.node(id);
        Completion {
            word: node.word.as_str(),
            frequency: node.frequency,
        }
    }
}
