use std::io;

use thiserror::Error;

use crate::types::state::Role;

/// Errors raised while building the ring buffer.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BufferError {
    /// A ring of zero slots cannot hold anything, not even the sentinel slot.
    #[error("buffer capacity must be at least 1")]
    ZeroCapacity,
}

/// Errors that end a simulation run.
///
/// A full or empty buffer is not an error: those are contention events and
/// are only counted.
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error(transparent)]
    Buffer(#[from] BufferError),

    /// A thread panicked while holding the buffer lock.
    #[error("the {0} lock was poisoned by a panicking thread")]
    Poisoned(&'static str),

    /// The OS refused to start one of the worker threads.
    #[error("couldn't create {role} thread {index}: {source}")]
    Spawn {
        role: Role,
        index: usize,
        #[source]
        source: io::Error,
    },

    #[error("{role} thread {index} panicked")]
    WorkerPanicked { role: Role, index: usize },
}
