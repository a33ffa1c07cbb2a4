use smallvec::SmallVec;
use std::fmt;
use std::ops::Deref;

/// Number of key bytes a segment stores without a heap allocation
pub const SEGMENT_INLINE: usize = 16;

/// The compressed path fragment held by one trie node
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Segment(SmallVec<[u8; SEGMENT_INLINE]>);

impl Segment {
    /// First symbol, used to order and look up siblings. `None` only for the root.
    pub fn first(&self) -> Option<u8> {
        self.0.first().copied()
    }

    /// Split off and return everything from offset `n`, keeping `..n` in place.
    pub fn split_off(&mut self, n: usize) -> Segment {
        let rest = Segment::from(&self.0[n..]);
        self.0.truncate(n);
        rest
    }

    pub fn extend_from_slice(&mut self, data: &[u8]) {
        self.0.extend_from_slice(data)
    }
}

impl AsRef<[u8]> for Segment {
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref()
    }
}

impl Deref for Segment {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_ref()
    }
}

impl<'a> From<&'a [u8]> for Segment {
    fn from(value: &'a [u8]) -> Self {
        Self(value.into())
    }
}

impl fmt::Debug for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", String::from_utf8_lossy(&self.0))
    }
}

// common prefix of two slices.
pub fn common_prefix<T: Eq>(a: &[T], b: &[T]) -> usize {
    a.iter().zip(b).take_while(|(a, b)| a == b).count()
}
