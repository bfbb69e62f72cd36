use super::node::{NodeId, ROOT};
use super::WordTrie;

/// Stored words with their frequencies, in lexicographic order.
///
/// Created by [`WordTrie::iter`]. Walks the arena pre-order with an explicit stack; children are
/// pushed in descending letter order so the smallest letter pops first.
#[derive(Clone, Debug)]
pub struct Iter<'a> {
    trie: &'a WordTrie,
    stack: Vec<NodeId>,
}

impl<'a> Iter<'a> {
    pub(crate) fn new(trie: &'a WordTrie) -> Self {
        Self {
            trie,
            stack: vec![ROOT],
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, u32);

    fn next(&mut self) -> Option<Self::Item> {
        let trie = self.trie;
        while let Some(id) = self.stack.pop() {
            let node = trie.node(id);
            self.stack.extend(node.children.iter().rev().flatten());
            if node.is_terminal() {
                return Some((node.word.as_str(), node.frequency));
            }
        }
        None
    }
}

impl<'a> IntoIterator for &'a WordTrie {
    type Item = (&'a str, u32);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
