//! A path compressed trie mapping byte string keys to values.
//!
//! Every node stores a segment of the key instead of a single symbol, and chains
//! of single-child nodes are always collapsed into one node. Children are ordered
//! by first symbol, so iteration and [`Trie::findall`] yield keys in ascending
//! byte order.
//!
//! A live iterator borrows the trie, so the trie cannot be mutated while it is
//! being traversed.
use crate::error::TrieError;
use crate::ops::{Free, ValueOps};
use crate::stack::Stack;
use std::fmt;

mod iter;
mod node;
mod segment;

pub use iter::{Direction, Iter, FORWARD};

use node::TrieNode;
use segment::common_prefix;

pub struct Trie<V, O: ValueOps<V> = Free> {
    root: TrieNode<V>,
    ops: O,
    len: usize,
    maxkeylen_added: usize,
}

impl<V> Trie<V> {
    pub fn new() -> Self {
        Self::with_ops(Free)
    }
}

impl<V> Default for Trie<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, O: ValueOps<V>> Trie<V, O> {
    pub fn with_ops(ops: O) -> Self {
        Self {
            root: TrieNode::root(),
            ops,
            len: 0,
            maxkeylen_added: 0,
        }
    }

    /// Number of keys stored
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Length of the longest key ever inserted.
    ///
    /// Never shrinks, not even when that key is deleted, so it is always a safe
    /// upper bound for buffers holding keys of this trie.
    pub fn maxkeylen_added(&self) -> usize {
        self.maxkeylen_added
    }

    /// Insert a key value pair, replacing and releasing any previous value for `key`.
    ///
    /// Fails for the empty key, or when node storage cannot be allocated. In both
    /// cases the trie is left unchanged.
    pub fn insert(&mut self, key: impl AsRef<[u8]>, value: V) -> Result<(), TrieError> {
        let key = key.as_ref();
        if key.is_empty() {
            return Err(TrieError::EmptyKey);
        }
        let mut node = &mut self.root;
        let mut rest = key;
        loop {
            let symbol = match rest.first() {
                Some(&symbol) => symbol,
                None => {
                    // exact match, either a branch point or an existing key
                    match node.value.replace(value) {
                        Some(old) => self.ops.release(old),
                        None => self.len += 1,
                    }
                    break;
                }
            };
            match node.child_index(symbol) {
                Ok(index) => {
                    let child = &mut node.children[index];
                    let n = common_prefix(&child.segment, rest);
                    if n < child.segment.len() {
                        child.split(n)?;
                    }
                    rest = &rest[n..];
                    node = child;
                }
                Err(index) => {
                    // no child shares the first symbol
                    node.children.try_reserve(1)?;
                    node.children.insert(index, TrieNode::leaf(rest, value));
                    self.len += 1;
                    break;
                }
            }
        }
        self.maxkeylen_added = self.maxkeylen_added.max(key.len());
        Ok(())
    }

    pub fn find(&self, key: impl AsRef<[u8]>) -> Option<&V> {
        self.root.lookup(key.as_ref())?.value.as_ref()
    }

    pub fn find_mut(&mut self, key: impl AsRef<[u8]>) -> Option<&mut V> {
        self.root.lookup_mut(key.as_ref())?.value.as_mut()
    }

    pub fn contains_key(&self, key: impl AsRef<[u8]>) -> bool {
        self.find(key).is_some()
    }

    /// Delete `key`, releasing its value through the ops descriptor.
    pub fn delete(&mut self, key: impl AsRef<[u8]>) -> Result<(), TrieError> {
        let value = self.take(key.as_ref()).ok_or(TrieError::NotFound)?;
        self.ops.release(value);
        Ok(())
    }

    /// Remove `key` and hand its value back to the caller without releasing it.
    pub fn remove(&mut self, key: impl AsRef<[u8]>) -> Option<V> {
        self.take(key.as_ref())
    }

    /// Unlink the value stored at `key` and restore path compression.
    fn take(&mut self, key: &[u8]) -> Option<V> {
        // child indices from the root down to the node for key
        let mut path = Stack::new();
        let mut node = &mut self.root;
        let mut rest = key;
        while let Some(&symbol) = rest.first() {
            let index = node.child_index(symbol).ok()?;
            let child = &mut node.children[index];
            if !rest.starts_with(&child.segment) {
                return None;
            }
            rest = &rest[child.segment.len()..];
            path.push(index);
            node = child;
        }
        let value = node.value.take()?;
        self.len -= 1;
        // Walk back up. A childless non-terminal node is unlinked, which can leave
        // its parent with a single child; a single-child non-terminal node is merged
        // with that child, which leaves the parent's child count unchanged.
        while let Some(index) = path.pop() {
            let parent = descend_mut(&mut self.root, path.as_slice());
            let child = &mut parent.children[index];
            if !child.is_degenerate() {
                break;
            }
            if child.children.is_empty() {
                parent.children.remove(index);
            } else {
                child.absorb_only_child();
                break;
            }
        }
        Some(value)
    }

    /// All keys starting with `prefix` that are at most `max_keylen` long, with
    /// their values, in ascending key order.
    ///
    /// Subtrees whose path already exceeds `max_keylen` are not visited.
    pub fn findall(&self, prefix: impl AsRef<[u8]>, max_keylen: usize) -> Vec<(Vec<u8>, &V)> {
        Iter::bounded(&self.root, prefix.as_ref(), max_keylen).collect()
    }

    /// Lazily iterate over all keys starting with `prefix`, in ascending key order.
    pub fn iter_prefix(&self, prefix: impl AsRef<[u8]>) -> Iter<'_, V> {
        Iter::bounded(&self.root, prefix.as_ref(), usize::MAX)
    }

    pub fn iter(&self) -> Iter<'_, V> {
        self.iter_prefix(b"")
    }

    /// Number of nodes below the root.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = Stack::new();
        stack.push(&self.root);
        while let Some(node) = stack.pop() {
            count += node.children.len();
            for child in &node.children {
                stack.push(child);
            }
        }
        count
    }

    /// Walk the whole trie and check the structural invariants.
    #[cfg(test)]
    pub(crate) fn validate(&self) -> Result<(), String> {
        if !self.root.segment.is_empty() || self.root.is_terminal() {
            return Err("root must be an empty, valueless sentinel".into());
        }
        let mut terminals = 0;
        let mut stack = Stack::new();
        stack.push((&self.root, Vec::new()));
        while let Some((node, mut key)) = stack.pop() {
            key.extend_from_slice(&node.segment);
            let is_root = std::ptr::eq(node, &self.root);
            if !is_root {
                if node.segment.is_empty() {
                    return Err(format!("empty segment below {:?}", key));
                }
                if node.is_degenerate() {
                    return Err(format!("uncompressed node at {:?}", key));
                }
            }
            if node.is_terminal() {
                terminals += 1;
            }
            let firsts: Vec<_> = node.children.iter().map(|c| c.segment.first()).collect();
            if firsts.windows(2).any(|w| w[0] >= w[1]) {
                return Err(format!("children out of order at {:?}", key));
            }
            for child in &node.children {
                stack.push((child, key.clone()));
            }
        }
        if terminals != self.len {
            return Err(format!("{} terminals but len {}", terminals, self.len));
        }
        Ok(())
    }
}

fn descend_mut<'a, V>(mut node: &'a mut TrieNode<V>, path: &[usize]) -> &'a mut TrieNode<V> {
    for &index in path {
        node = &mut node.children[index];
    }
    node
}

impl<V, O: ValueOps<V>> Drop for Trie<V, O> {
    fn drop(&mut self) {
        // tear down with an explicit stack, so deep tries cannot overflow the call stack
        let mut stack = Stack::new();
        stack.push(std::mem::take(&mut self.root.children));
        while let Some(children) = stack.pop() {
            for mut child in children {
                if let Some(value) = child.value.take() {
                    self.ops.release(value);
                }
                stack.push(std::mem::take(&mut child.children));
            }
        }
    }
}

impl<'a, V, O: ValueOps<V>> IntoIterator for &'a Trie<V, O> {
    type Item = (Vec<u8>, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<V: fmt::Debug, O: ValueOps<V>> fmt::Debug for Trie<V, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.iter()
                    .map(|(k, v)| (String::from_utf8_lossy(&k).into_owned(), v)),
            )
            .finish()
    }
}
