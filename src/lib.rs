//! A path compressed trie keyed by byte strings, and the LIFO stack that drives its
//! traversals.
//!
//! ```
//! use segtrie::Trie;
//!
//! let mut trie = Trie::new();
//! trie.insert("cat", 1).unwrap();
//! trie.insert("car", 2).unwrap();
//! trie.insert("dog", 3).unwrap();
//! assert_eq!(trie.find("car"), Some(&2));
//!
//! let found: Vec<_> = trie.findall("ca", 10).into_iter().map(|(k, v)| (k, *v)).collect();
//! assert_eq!(found, vec![(b"car".to_vec(), 2), (b"cat".to_vec(), 1)]);
//!
//! trie.delete("cat").unwrap();
//! assert_eq!(trie.find("cat"), None);
//! ```
//!
//! Both containers take an ops descriptor (see [`ops`]) deciding whether values they
//! give up are dropped ([`Free`], the default) or left alone ([`Keep`]).
#[cfg(test)]
#[macro_use]
extern crate quickcheck;

#[cfg(test)]
mod obey;

mod error;
pub mod ops;
mod stack;
mod trie;

pub use error::TrieError;
pub use ops::{Free, Keep, ValueOps, WithDtor, OPS_FREE, OPS_NONE};
pub use stack::Stack;
pub use trie::{Direction, Iter, Trie, FORWARD};
