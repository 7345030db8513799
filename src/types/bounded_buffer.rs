use std::fmt::{self, Display, Formatter};

use crate::error::BufferError;

/// `head` is the next write index and `tail` the next read index. The ring is
/// empty when they meet and full when `head` is one step behind `tail`, so
/// one slot always stays unused and `capacity - 1` items fit at most.
///
/// Nothing here blocks or locks: callers hold the gate's mutex around every
/// call.
#[derive(Debug)]
pub struct BoundedBuffer<T> {
    slots: Vec<T>,
    head: usize,
    tail: usize,
    times_full: u64,
    times_empty: u64,
}

impl<T> BoundedBuffer<T>
where
    T: Copy + Default,
{
    pub fn new(capacity: usize) -> Result<Self, BufferError> {
        if capacity == 0 {
            return Err(BufferError::ZeroCapacity);
        }
        Ok(Self {
            slots: vec![T::default(); capacity],
            head: 0,
            tail: 0,
            times_full: 0,
            times_empty: 0,
        })
    }

    /// Stores `item` at `head`. On a full ring only `times_full` changes.
    pub fn try_insert(&mut self, item: T) -> bool {
        let next = (self.head + 1) % self.capacity();
        if next == self.tail {
            self.times_full += 1;
            return false;
        }
        self.slots[self.head] = item;
        self.head = next;
        true
    }

    /// Takes the item at `tail`. On an empty ring only `times_empty` changes.
    pub fn try_remove(&mut self) -> Option<T> {
        if self.head == self.tail {
            self.times_empty += 1;
            return None;
        }
        let item = self.slots[self.tail];
        self.tail = (self.tail + 1) % self.capacity();
        Some(item)
    }

    pub fn occupancy(&self) -> usize {
        (self.head + self.capacity() - self.tail) % self.capacity()
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn usable_capacity(&self) -> usize {
        self.capacity() - 1
    }

    pub fn times_full(&self) -> u64 {
        self.times_full
    }

    pub fn times_empty(&self) -> u64 {
        self.times_empty
    }

    /// Copies the indices, and the slots themselves when `with_slots` is set.
    pub fn view(&self, with_slots: bool) -> BufferView<T> {
        BufferView {
            head: self.head,
            tail: self.tail,
            occupancy: self.occupancy(),
            slots: if with_slots {
                self.slots.clone()
            } else {
                Vec::new()
            },
        }
    }
}

/// Point-in-time picture of the ring, taken under the lock and rendered after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferView<T> {
    pub head: usize,
    pub tail: usize,
    pub occupancy: usize,
    pub slots: Vec<T>,
}

impl<T: Display> Display for BufferView<T> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "(buffers occupied: {})", self.occupancy)?;
        if self.slots.is_empty() {
            return Ok(());
        }
        write!(f, " [")?;
        for (i, slot) in self.slots.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            let marker = match (i == self.head, i == self.tail) {
                (true, true) => "WR:",
                (true, false) => "W:",
                (false, true) => "R:",
                (false, false) => "",
            };
            write!(f, "{}{}", marker, slot)?;
        }
        write!(f, "]")
    }
}
