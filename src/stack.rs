use crate::ops::{Free, ValueOps};
use std::fmt;

/// A LIFO stack whose leftover elements are released through an ops descriptor.
///
/// `pop` hands elements back to the caller. Elements still on the stack when it is
/// dropped are released top first, through `O`.
pub struct Stack<T, O: ValueOps<T> = Free> {
    elems: Vec<T>,
    ops: O,
}

impl<T> Stack<T> {
    pub fn new() -> Self {
        Self::with_ops(Free)
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, O: ValueOps<T>> Stack<T, O> {
    pub fn with_ops(ops: O) -> Self {
        Self {
            elems: Vec::new(),
            ops,
        }
    }

    pub fn push(&mut self, elem: T) {
        self.elems.push(elem)
    }

    pub fn pop(&mut self) -> Option<T> {
        self.elems.pop()
    }

    pub fn top(&self) -> Option<&T> {
        self.elems.last()
    }

    pub fn top_mut(&mut self) -> Option<&mut T> {
        self.elems.last_mut()
    }

    pub fn is_empty(&self) -> bool {
        self.elems.is_empty()
    }

    pub fn len(&self) -> usize {
        self.elems.len()
    }

    /// The elements from bottom to top
    pub fn as_slice(&self) -> &[T] {
        &self.elems
    }
}

impl<T, O: ValueOps<T>> Drop for Stack<T, O> {
    fn drop(&mut self) {
        while let Some(elem) = self.elems.pop() {
            self.ops.release(elem);
        }
    }
}

impl<T: fmt::Debug, O: ValueOps<T>> fmt::Debug for Stack<T, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.elems.iter()).finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ops::{Keep, WithDtor};
    use quickcheck_macros::quickcheck;
    use std::cell::RefCell;
    use testdrop::{Item, TestDrop};

    #[quickcheck]
    fn behaves_like_vec(ops: Vec<Option<u8>>) -> bool {
        // Some(x) pushes x, None pops
        let mut s = Stack::new();
        let mut model = Vec::new();
        for op in ops {
            match op {
                Some(x) => {
                    s.push(x);
                    model.push(x);
                }
                None => {
                    if s.pop() != model.pop() {
                        return false;
                    }
                }
            }
            if s.top() != model.last() || s.len() != model.len() {
                return false;
            }
        }
        s.as_slice() == model.as_slice()
    }

    #[test]
    fn lifo_order() {
        let mut s = Stack::new();
        assert!(s.is_empty());
        assert_eq!(s.pop(), None);
        assert_eq!(s.top(), None);
        s.push(1);
        s.push(2);
        s.push(3);
        assert_eq!(s.len(), 3);
        assert_eq!(s.top(), Some(&3));
        assert_eq!(s.as_slice(), &[1, 2, 3]);
        assert_eq!(s.pop(), Some(3));
        if let Some(top) = s.top_mut() {
            *top = 20;
        }
        assert_eq!(s.pop(), Some(20));
        assert_eq!(s.pop(), Some(1));
        assert_eq!(s.pop(), None);
        assert!(s.is_empty());
    }

    fn push_items<'a, O: ValueOps<Item<'a>>>(
        td: &'a TestDrop,
        s: &mut Stack<Item<'a>, O>,
        n: usize,
    ) -> Vec<usize> {
        (0..n)
            .map(|_| {
                let (id, item) = td.new_item();
                s.push(item);
                id
            })
            .collect()
    }

    #[test]
    fn drop_releases_leftovers() {
        let td = TestDrop::new();
        let mut s = Stack::new();
        let ids = push_items(&td, &mut s, 10);
        drop(s);
        for id in ids {
            td.assert_drop(id);
        }
    }

    #[test]
    fn keep_never_releases() {
        let td = TestDrop::new();
        let mut s = Stack::with_ops(Keep);
        let ids = push_items(&td, &mut s, 10);
        drop(s);
        for id in ids {
            td.assert_no_drop(id);
        }
    }

    #[test]
    fn pop_transfers_ownership() {
        let td = TestDrop::new();
        let mut s = Stack::with_ops(Keep);
        let ids = push_items(&td, &mut s, 3);
        let popped = s.pop();
        td.assert_no_drop(ids[2]);
        drop(popped);
        td.assert_drop(ids[2]);
        drop(s);
        td.assert_no_drop(ids[0]);
        td.assert_no_drop(ids[1]);
    }

    #[test]
    fn dtor_runs_top_first() {
        let released = RefCell::new(Vec::new());
        let mut s = Stack::with_ops(WithDtor(|x: u8| released.borrow_mut().push(x)));
        s.push(1);
        s.push(2);
        s.push(3);
        drop(s);
        assert_eq!(*released.borrow(), vec![3, 2, 1]);
    }

    #[test]
    fn drop_empty() {
        let s: Stack<String> = Stack::new();
        drop(s);
    }
}
