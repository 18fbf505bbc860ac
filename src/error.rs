use thiserror::Error;

/// Everything that can make a queue operation refuse to do its job.
///
/// Output truncation in [`Queue::remove_head`](crate::Queue::remove_head) is deliberately
/// absent here: it is defined behaviour, not a failure.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueError {
    #[error("no queue was given")]
    AbsentQueue,

    #[error("could not allocate storage for a new element")]
    AllocationFailure,

    #[error("the queue is empty")]
    EmptyQueue,
}

pub type Result<T> = std::result::Result<T, QueueError>;
