//! Flat, forgiving entry points over [`Queue`].
//!
//! Every function here accepts an absent queue (and absent strings) as a valid input and answers
//! with `false`, `0` or a no-op instead of failing loudly. Callers check the returned booleans.

use tracing::debug;

use crate::{Queue, QueueError};

/// Creates an empty queue. Nothing is allocated until the first insertion, so this can't fail.
pub fn create() -> Queue {
    Queue::new()
}

/// Releases every remaining element, then the queue itself. No-op for `None`.
pub fn destroy(queue: Option<Queue>) {
    if let Some(queue) = queue {
        queue.destroy();
    }
}

pub fn insert_head(queue: Option<&mut Queue>, s: Option<&str>) -> bool {
    report("insert_head", present(queue).and_then(|q| q.insert_head(s)))
}

pub fn insert_tail(queue: Option<&mut Queue>, s: Option<&str>) -> bool {
    report("insert_tail", present(queue).and_then(|q| q.insert_tail(s)))
}

/// Removes the head. The payload is copied into `out` (truncated, always terminated) when a
/// buffer is given, otherwise discarded.
pub fn remove_head(queue: Option<&mut Queue>, out: Option<&mut [u8]>) -> bool {
    report("remove_head", present(queue).and_then(|q| q.remove_head(out)))
}

pub fn size(queue: Option<&Queue>) -> usize {
    queue.map_or(0, Queue::size)
}

pub fn reverse(queue: Option<&mut Queue>) {
    if let Some(queue) = queue {
        queue.reverse();
    }
}

fn present<Q>(queue: Option<Q>) -> Result<Q, QueueError> {
    queue.ok_or(QueueError::AbsentQueue)
}

fn report(operation: &'static str, result: Result<(), QueueError>) -> bool {
    match result {
        Ok(()) => true,
        Err(error) => {
            debug!(operation, %error, "queue operation refused");
            false
        }
    }
}
