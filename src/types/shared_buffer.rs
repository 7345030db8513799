use tracing::trace;

use crate::error::SimulationError;
use crate::sync::{AtomicBool, Mutex, MutexGuard, Ordering, Semaphore};
use crate::types::bounded_buffer::{BoundedBuffer, BufferView};
use crate::types::state::Role;
use crate::types::Item;

/// Everything producers and consumers share, handed to each worker in an `Arc`.
///
/// `empty_slots` and `full_slots` count capacity; the mutex only serializes
/// index updates and is never held while waiting on either semaphore or
/// while sleeping. The `full`/`empty` counters live inside the buffer, so
/// they are covered by the same lock.
pub struct SharedBuffer {
    empty_slots: Semaphore,
    full_slots: Semaphore,
    buffer: Mutex<BoundedBuffer<Item>>,
    running: AtomicBool,
    trace_slots: bool,
}

/// Counters read by the coordinator once the workers are gone.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BufferTotals {
    pub occupancy: usize,
    pub times_full: u64,
    pub times_empty: u64,
}

impl SharedBuffer {
    /// `trace_slots` copies the whole ring into every returned view, for verbose output.
    pub fn new(capacity: usize, trace_slots: bool) -> Result<Self, SimulationError> {
        let buffer = BoundedBuffer::new(capacity)?;
        let usable = buffer.usable_capacity() as isize;
        Ok(Self {
            empty_slots: Semaphore::new(usable),
            full_slots: Semaphore::new(0),
            buffer: Mutex::new(buffer),
            running: AtomicBool::new(true),
            trace_slots,
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, BoundedBuffer<Item>>, SimulationError> {
        self.buffer
            .lock()
            .map_err(|_| SimulationError::Poisoned("buffer"))
    }

    /// Waits for a free slot, then stores `item`.
    ///
    /// `None` means the ring was full anyway, which only happens on a permit
    /// posted at shutdown. That permit is swallowed and `full_slots` is left
    /// alone.
    pub fn insert(&self, item: Item) -> Result<Option<BufferView<Item>>, SimulationError> {
        self.empty_slots.acquire();
        let view = {
            let mut buffer = self.lock()?;
            if buffer.try_insert(item) {
                Some(buffer.view(self.trace_slots))
            } else {
                None
            }
        };
        match view {
            Some(_) => self.full_slots.release(),
            None => trace!(item, "buffer full, item dropped"),
        }
        Ok(view)
    }

    /// Waits for a stored item, then takes it. Mirror image of `insert`.
    pub fn remove(&self) -> Result<Option<(Item, BufferView<Item>)>, SimulationError> {
        self.full_slots.acquire();
        let removed = {
            let mut buffer = self.lock()?;
            buffer
                .try_remove()
                .map(|item| (item, buffer.view(self.trace_slots)))
        };
        match removed {
            Some(_) => self.empty_slots.release(),
            None => trace!("buffer empty, nothing removed"),
        }
        Ok(removed)
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Clears the run flag and posts one permit per worker on the semaphore
    /// that role waits on, so nobody stays parked even when the other role
    /// has no threads at all.
    pub fn stop(&self, producers: usize, consumers: usize) {
        self.running.store(false, Ordering::Release);
        for _ in 0..producers {
            self.empty_slots.release();
        }
        for _ in 0..consumers {
            self.full_slots.release();
        }
    }

    /// Posts both semaphores once. Issued by every worker on its way out.
    pub fn courtesy_signal(&self, role: Role) {
        match role {
            Role::Producer => {
                self.full_slots.release();
                self.empty_slots.release();
            }
            Role::Consumer => {
                self.empty_slots.release();
                self.full_slots.release();
            }
        }
    }

    pub fn totals(&self) -> Result<BufferTotals, SimulationError> {
        let buffer = self.lock()?;
        Ok(BufferTotals {
            occupancy: buffer.occupancy(),
            times_full: buffer.times_full(),
            times_empty: buffer.times_empty(),
        })
    }
}
