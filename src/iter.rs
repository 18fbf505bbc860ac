//! Head-to-tail walk over the payloads of a [`Queue`](crate::Queue).
//!
//! ```text
//!  next
//!   |
//!   v
//!  head -> element -> element -> tail -> (none)
//! ```
//!
//! The iterator carries the number of elements left, so it stops after exactly `size` steps even
//! if the chain were longer. Invariant checks in the tests rely on this to catch a dangling tail.

use std::marker::PhantomData;

use crate::ElementPointer;

pub(crate) struct Iter<'queue> {
    next: Option<ElementPointer>,
    remaining: usize,
    _bound_to_queue: PhantomData<&'queue ()>,
}

impl<'queue> Iter<'queue> {
    /// # Safety
    ///
    /// `head` and everything reachable from it must stay alive and unmodified for `'queue`.
    pub(crate) unsafe fn new(head: Option<ElementPointer>, remaining: usize) -> Self {
        Self {
            next: head,
            remaining,
            _bound_to_queue: PhantomData,
        }
    }
}

impl<'queue> Iterator for Iter<'queue> {
    /// `None` inside stands for an element that was inserted without payload.
    type Item = Option<&'queue str>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        // SAFETY: delegated to the contract of `Iter::new`
        let element = unsafe { self.next?.as_ref() };
        self.next = element.next;
        self.remaining -= 1;

        Some(element.payload.as_deref())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}
