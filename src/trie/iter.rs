use super::node::TrieNode;
use crate::stack::Stack;
use sorted_iter::sorted_pair_iterator::SortedByKey;
use std::iter::FusedIterator;

/// Order in which siblings are visited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// ascending by first symbol, which yields keys in ascending byte order
    Forward,
}

pub const FORWARD: Direction = Direction::Forward;

/// Depth first cursor over the keys of a trie.
///
/// The cursor starts before the first key. [`Iter::advance`] moves it to the next
/// terminal node, after which [`Iter::key`] and [`Iter::value`] expose that entry.
/// Once `advance` returns false the cursor is exhausted, its traversal storage is
/// freed and both accessors return `None` for good.
///
/// As an [`Iterator`] it yields owned keys together with borrowed values.
pub struct Iter<'a, V> {
    // nodes not yet visited, with the length of the key above each
    stack: Stack<(&'a TrieNode<V>, usize)>,
    key: Vec<u8>,
    current: Option<&'a V>,
    max_keylen: usize,
}

impl<'a, V> Iter<'a, V> {
    pub(crate) fn empty() -> Self {
        Self {
            stack: Stack::new(),
            key: Vec::new(),
            current: None,
            max_keylen: 0,
        }
    }

    /// Keys below `root` starting with `prefix`, skipping keys longer than `max_keylen`.
    pub(crate) fn bounded(root: &'a TrieNode<V>, prefix: &[u8], max_keylen: usize) -> Self {
        match root.seek_prefix(prefix) {
            Some((node, above)) => {
                let mut stack = Stack::new();
                stack.push((node, above));
                Self {
                    stack,
                    key: prefix[..above].to_vec(),
                    current: None,
                    max_keylen,
                }
            }
            None => Self::empty(),
        }
    }

    pub fn direction(&self) -> Direction {
        FORWARD
    }

    /// Move to the next key. Returns false, and releases the traversal state, once
    /// there is none.
    pub fn advance(&mut self) -> bool {
        while let Some((node, above)) = self.stack.pop() {
            self.key.truncate(above);
            self.key.extend_from_slice(&node.segment);
            if self.key.len() > self.max_keylen {
                // every key below is longer still
                continue;
            }
            let depth = self.key.len();
            for child in node.children.iter().rev() {
                self.stack.push((child, depth));
            }
            if let Some(value) = node.value.as_ref() {
                self.current = Some(value);
                return true;
            }
        }
        self.current = None;
        self.key = Vec::new();
        self.stack = Stack::new();
        false
    }

    /// Full key of the current entry
    pub fn key(&self) -> Option<&[u8]> {
        self.current.map(|_| self.key.as_slice())
    }

    pub fn value(&self) -> Option<&'a V> {
        self.current
    }

    pub fn is_exhausted(&self) -> bool {
        self.current.is_none() && self.stack.is_empty()
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (Vec<u8>, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.advance() {
            self.current.map(|value| (self.key.clone(), value))
        } else {
            None
        }
    }
}

impl<'a, V> FusedIterator for Iter<'a, V> {}

impl<'a, V> SortedByKey for Iter<'a, V> {}
