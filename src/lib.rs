
pub mod api;
mod error;
mod iter;

pub use error::{QueueError, Result};

use std::{
    alloc::{self, Layout},
    fmt, mem,
    ptr::NonNull,
};

use tracing::{debug, trace, warn};

type ElementPointer = NonNull<Element>;

/// A queue of owned strings, backed by a singly-linked chain.
///
/// Inserting works on both ends, removing only at the head. Every element owns its own copy of
/// the string it was inserted with.
pub struct Queue {
    head: Option<ElementPointer>,
    tail: Option<ElementPointer>,
    size: usize,
}

struct Element {
    payload: Option<String>,
    next: Option<ElementPointer>,
}

impl Queue {
    pub fn new() -> Self {
        Self {
            head: None,
            tail: None,
            size: 0,
        }
    }

    /// Releases every element and its payload. Equivalent to dropping the queue.
    pub fn destroy(self) {
        drop(self);
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub(crate) fn iter(&self) -> iter::Iter<'_> {
        // SAFETY: `Iter` borrows `self`, so no element can be released while it's alive
        unsafe { iter::Iter::new(self.head, self.size) }
    }

    /// Copies `s` into a new element placed in front of the current head.
    ///
    /// `None` is accepted and stores an element without payload. On allocation failure the
    /// queue is left exactly as it was.
    pub fn insert_head(&mut self, s: Option<&str>) -> Result<()> {
        let mut new_head = allocate_element(s)?;

        // SAFETY: `new_head` was just allocated and is not reachable from anywhere else yet
        unsafe {
            new_head.as_mut().next = self.head;
        }

        self.head = Some(new_head);
        if self.tail.is_none() {
            self.tail = Some(new_head);
        }
        self.size += 1;

        trace!(size = self.size, "inserted at head");
        Ok(())
    }

    /// Copies `s` into a new element placed after the current tail, in _O_(1).
    ///
    /// Same allocation contract as [`Self::insert_head`].
    pub fn insert_tail(&mut self, s: Option<&str>) -> Result<()> {
        let new_tail = allocate_element(s)?;

        match self.tail {
            // SAFETY: `self.tail` always points to the last live element of the chain owned by
            //         `self`, and nothing else holds a reference into the chain
            Some(mut old_tail) => unsafe { old_tail.as_mut().next = Some(new_tail) },
            None => self.head = Some(new_tail),
        }

        self.tail = Some(new_tail);
        self.size += 1;

        trace!(size = self.size, "inserted at tail");
        Ok(())
    }

    /// Detaches and releases the head element.
    ///
    /// If `out` is given and non-empty, the payload is copied into it with truncation: at most
    /// `out.len() - 1` bytes are copied, the rest of the buffer is zeroed, so the last byte is
    /// always a terminator. Truncation is silent.
    pub fn remove_head(&mut self, out: Option<&mut [u8]>) -> Result<()> {
        let Some(old_head) = self.head else {
            debug!("remove_head on empty queue");
            return Err(QueueError::EmptyQueue);
        };

        // SAFETY: `old_head` came from `allocate_element` and is unlinked right below, so this
        //         is the only owner left
        let element = unsafe { release_element(old_head) };

        self.head = element.next;
        if self.head.is_none() {
            self.tail = None;
        }
        self.size -= 1;

        if let (Some(payload), Some(out)) = (element.payload.as_deref(), out) {
            copy_truncated(payload.as_bytes(), out);
        }

        trace!(size = self.size, "removed head");
        Ok(())
    }

    /// Flips every `next` link in place, swapping head and tail. Nothing is allocated, freed or
    /// moved.
    pub fn reverse(&mut self) {
        if self.size < 2 {
            return;
        }

        let mut prev: Option<ElementPointer> = None;
        let mut current = self.head;

        while let Some(mut element) = current {
            // SAFETY: every pointer reachable from `self.head` is a live element owned by `self`
            unsafe {
                let next = element.as_ref().next;
                element.as_mut().next = prev;
                prev = Some(element);
                current = next;
            }
        }

        self.tail = self.head;
        self.head = prev;

        trace!(size = self.size, "reversed");
    }
}

/// Builds a detached element holding a copy of `s`. Nothing leaks on failure: a payload copied
/// before the node allocation fails is dropped with the `Element` value.
fn allocate_element(s: Option<&str>) -> Result<ElementPointer> {
    let payload = match s {
        Some(s) => Some(copy_payload(s)?),
        None => None,
    };

    allocate(Element {
        payload,
        next: None,
    })
}

fn copy_payload(s: &str) -> Result<String> {
    let mut payload = String::new();
    if payload.try_reserve_exact(s.len()).is_err() {
        warn!(len = s.len(), "payload allocation failed");
        return Err(QueueError::AllocationFailure);
    }
    payload.push_str(s);
    Ok(payload)
}

fn allocate(element: Element) -> Result<ElementPointer> {
    let layout = Layout::new::<Element>();

    // SAFETY: `Element` is not zero-sized, so neither is `layout`
    let raw = unsafe { alloc::alloc(layout) }.cast::<Element>();
    let Some(ptr) = NonNull::new(raw) else {
        warn!("element allocation failed");
        return Err(QueueError::AllocationFailure);
    };

    // SAFETY: `ptr` is freshly allocated with the layout of `Element`, hence valid and aligned
    unsafe { ptr.as_ptr().write(element) };
    Ok(ptr)
}

/// Takes ownership of an element back from the chain.
///
/// # Safety
///
/// `ptr` must come from [`allocate`] and must not be used by anyone afterwards.
unsafe fn release_element(ptr: ElementPointer) -> Box<Element> {
    // SAFETY: `allocate` uses the global allocator with `Layout::new::<Element>()`, which is
    //         exactly what `Box<Element>` expects
    Box::from_raw(ptr.as_ptr())
}

fn copy_truncated(payload: &[u8], out: &mut [u8]) {
    let Some(max) = out.len().checked_sub(1) else {
        return;
    };

    let copied = payload.len().min(max);
    out[..copied].copy_from_slice(&payload[..copied]);
    out[copied..].fill(0);
}

impl fmt::Debug for Queue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl Default for Queue {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Queue {
    fn drop(&mut self) {
        // iterative, so long chains don't blow the stack
        let mut current = self.head.take();
        self.tail = None;

        while let Some(ptr) = current {
            // SAFETY: each element is visited exactly once and unreachable after this step
            let element = unsafe { release_element(ptr) };
            current = element.next;
        }

        let released = mem::take(&mut self.size);
        if released > 0 {
            trace!(released, "destroyed queue");
        }
    }
}
