pub mod bounded_buffer;
pub mod shared_buffer;
pub mod state;
pub mod stats;

/// Work item moved from producers to consumers.
pub type Item = i32;
