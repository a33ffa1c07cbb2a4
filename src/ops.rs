//! Ownership policies for values stored in a [`Trie`](crate::Trie) or elements
//! left in a [`Stack`](crate::Stack).
//!
//! A container calls [`ValueOps::release`] whenever it gives up a value on its own
//! account: a value overwritten by `insert`, removed by `delete`, or still present
//! when the container is dropped. Operations that hand a value back to the caller
//! (`Stack::pop`, `Trie::remove`) never go through the policy.
use std::fmt;
use std::mem;

/// Policy applied to values the container releases.
pub trait ValueOps<T> {
    fn release(&self, value: T);
}

/// The container owns its values and drops them on release.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Free;

/// The container never runs a value's destructor; the caller keeps ownership.
///
/// Meant for payloads whose real owner lives outside the container, such as
/// references, indices or handles. Owned heap values given to a `Keep` container
/// are leaked when released.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Keep;

/// Release values through a caller-supplied destructor.
#[derive(Clone, Copy)]
pub struct WithDtor<F>(pub F);

pub const OPS_FREE: Free = Free;
pub const OPS_NONE: Keep = Keep;

impl<T> ValueOps<T> for Free {
    fn release(&self, value: T) {
        drop(value)
    }
}

impl<T> ValueOps<T> for Keep {
    fn release(&self, value: T) {
        mem::forget(value)
    }
}

impl<T, F: Fn(T)> ValueOps<T> for WithDtor<F> {
    fn release(&self, value: T) {
        (self.0)(value)
    }
}

impl<F> fmt::Debug for WithDtor<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("WithDtor").finish()
    }
}
