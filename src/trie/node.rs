use super::segment::{common_prefix, Segment};
use std::collections::TryReserveError;

/// One node of the compressed trie.
///
/// Children are kept sorted by the first symbol of their segment, and no two
/// children share a first symbol. A node is terminal iff it holds a value.
#[derive(Debug)]
pub(crate) struct TrieNode<V> {
    pub(crate) segment: Segment,
    pub(crate) value: Option<V>,
    pub(crate) children: Vec<TrieNode<V>>,
}

impl<V> TrieNode<V> {
    pub fn root() -> Self {
        Self {
            segment: Segment::default(),
            value: None,
            children: Vec::new(),
        }
    }

    pub fn leaf(segment: &[u8], value: V) -> Self {
        Self {
            segment: segment.into(),
            value: Some(value),
            children: Vec::new(),
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.value.is_some()
    }

    /// Ok(index) of the child starting with `symbol`, or Err(insertion point)
    pub fn child_index(&self, symbol: u8) -> Result<usize, usize> {
        self.children
            .binary_search_by(|c| c.segment.first().cmp(&Some(symbol)))
    }

    pub fn child(&self, symbol: u8) -> Option<&Self> {
        self.child_index(symbol).ok().map(|i| &self.children[i])
    }

    /// Follow `key` exactly, returning the node whose path equals it.
    pub fn lookup(&self, key: &[u8]) -> Option<&Self> {
        let mut node = self;
        let mut rest = key;
        while let Some(&symbol) = rest.first() {
            let child = node.child(symbol)?;
            if !rest.starts_with(&child.segment) {
                return None;
            }
            rest = &rest[child.segment.len()..];
            node = child;
        }
        Some(node)
    }

    pub fn lookup_mut(&mut self, key: &[u8]) -> Option<&mut Self> {
        let mut node = self;
        let mut rest = key;
        while let Some(&symbol) = rest.first() {
            let index = node.child_index(symbol).ok()?;
            let child = &mut node.children[index];
            if !rest.starts_with(&child.segment) {
                return None;
            }
            rest = &rest[child.segment.len()..];
            node = child;
        }
        Some(node)
    }

    /// Find the subtree holding every key that starts with `prefix`.
    ///
    /// The prefix may end in the middle of a segment. Returns the subtree root and
    /// the length of the key path above it.
    pub fn seek_prefix(&self, prefix: &[u8]) -> Option<(&Self, usize)> {
        if prefix.is_empty() {
            return Some((self, 0));
        }
        let mut node = self;
        let mut consumed = 0;
        loop {
            let rest = &prefix[consumed..];
            let child = node.child(rest[0])?;
            let n = common_prefix(&child.segment, rest);
            if n == rest.len() {
                return Some((child, consumed));
            }
            if n < child.segment.len() {
                return None;
            }
            // the whole segment matched and some prefix is left
            consumed += n;
            node = child;
        }
    }

    /// Create a split at offset n of the segment.
    ///
    /// Afterwards `self` is a branch holding `segment[..n]` with the old node as
    /// its only child. Room for a second child is reserved up front, so the
    /// caller can attach one without allocating, and nothing changes on failure.
    pub fn split(&mut self, n: usize) -> Result<(), TryReserveError> {
        assert!(n > 0 && n < self.segment.len());
        let mut children = Vec::new();
        children.try_reserve_exact(2)?;
        let rest = self.segment.split_off(n);
        let mut branch = Self {
            segment: std::mem::take(&mut self.segment),
            value: None,
            children,
        };
        std::mem::swap(self, &mut branch);
        let mut child = branch;
        child.segment = rest;
        self.children.push(child);
        Ok(())
    }

    /// Merge a non-terminal node with its only child.
    pub fn absorb_only_child(&mut self) {
        debug_assert!(self.value.is_none() && self.children.len() == 1);
        if let Some(child) = self.children.pop() {
            let TrieNode {
                segment,
                value,
                children,
            } = child;
            self.segment.extend_from_slice(&segment);
            self.value = value;
            self.children = children;
        }
    }

    /// A non-root node must be terminal or branch to at least two children.
    pub fn is_degenerate(&self) -> bool {
        !self.is_terminal() && self.children.len() < 2
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn branch(segment: &[u8], value: Option<u32>, children: Vec<TrieNode<u32>>) -> TrieNode<u32> {
        TrieNode {
            segment: segment.into(),
            value,
            children,
        }
    }

    #[test]
    fn split_keeps_subtree() {
        let mut node = branch(b"card", Some(1), vec![TrieNode::leaf(b"s", 2)]);
        node.split(2).unwrap();
        assert_eq!(&*node.segment, b"ca");
        assert!(!node.is_terminal());
        assert_eq!(node.children.len(), 1);
        assert!(node.children.capacity() >= 2);
        let child = &node.children[0];
        assert_eq!(&*child.segment, b"rd");
        assert_eq!(child.value, Some(1));
        assert_eq!(&*child.children[0].segment, b"s");
    }

    #[test]
    fn absorb_restores_split() {
        let mut node = branch(b"card", Some(1), vec![TrieNode::leaf(b"s", 2)]);
        node.split(3).unwrap();
        node.absorb_only_child();
        assert_eq!(&*node.segment, b"card");
        assert_eq!(node.value, Some(1));
        assert_eq!(node.children.len(), 1);
    }

    #[test]
    fn seek_prefix_mid_segment() {
        let mut root = TrieNode::root();
        root.children.push(branch(
            b"ca",
            None,
            vec![TrieNode::leaf(b"r", 2), TrieNode::leaf(b"tfish", 1)],
        ));
        let (node, above) = root.seek_prefix(b"catf").unwrap();
        assert_eq!(&*node.segment, b"tfish");
        assert_eq!(above, 2);
        let (node, above) = root.seek_prefix(b"ca").unwrap();
        assert_eq!(&*node.segment, b"ca");
        assert_eq!(above, 0);
        let (node, above) = root.seek_prefix(b"").unwrap();
        assert!(node.segment.is_empty());
        assert_eq!(above, 0);
        assert!(root.seek_prefix(b"cb").is_none());
        assert!(root.seek_prefix(b"catfishes").is_none());
        assert!(root.seek_prefix(b"d").is_none());
    }

    #[test]
    fn lookup_needs_whole_segments() {
        let mut root = TrieNode::root();
        root.children.push(TrieNode::leaf(b"dog", 3));
        assert_eq!(root.lookup(b"dog").and_then(|n| n.value), Some(3));
        assert!(root.lookup(b"do").is_none());
        assert!(root.lookup(b"dogs").is_none());
        assert!(root.lookup(b"").is_some());
    }
}
