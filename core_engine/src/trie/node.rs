use std::cmp::Reverse;

use crate::alphabet::{self, SIZE};

pub(crate) type NodeId = u32;

/// The root always occupies the first arena slot.
pub(crate) const ROOT: NodeId = 0;

/// A vertex of the compressed trie.
///
/// The edge into a node is spelled by the letter of the parent's child slot holding it, followed
/// by `label`. Links to other nodes are arena indices; only `children` expresses ownership.
#[derive(Clone, Debug)]
pub(crate) struct Node {
    /// How many times the word ending here was inserted. Zero for pure branching nodes.
    pub(crate) frequency: u32,
    /// Full text from the root. Only meaningful while `frequency > 0`.
    pub(crate) word: String,
    /// Letters compressed onto the incoming edge after its branch letter.
    pub(crate) label: Vec<u8>,
    pub(crate) children: [Option<NodeId>; SIZE],
    /// Highest ranked terminal in this node's subtree, possibly the node itself.
    pub(crate) best: NodeId,
    pub(crate) parent: Option<NodeId>,
}

impl Node {
    pub(crate) fn new(id: NodeId, parent: Option<NodeId>, label: Vec<u8>) -> Self {
        Self {
            frequency: 0,
            word: String::new(),
            label,
            children: [None; SIZE],
            best: id,
            parent,
        }
    }

    pub(crate) fn child(&self, letter: u8) -> Option<NodeId> {
        self.children[alphabet::slot(letter)]
    }

    pub(crate) fn set_child(&mut self, letter: u8, child: NodeId) {
        self.children[alphabet::slot(letter)] = Some(child);
    }

    pub(crate) fn is_terminal(&self) -> bool {
        self.frequency > 0
    }

    /// Ordering key for best-descendant selection: smaller ranks higher.
    ///
    /// Higher frequency first, then the lexicographically smaller word.
    pub(crate) fn rank(&self) -> (Reverse<u32>, &str) {
        (Reverse(self.frequency), self.word.as_str())
    }
}
