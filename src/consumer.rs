use std::time::Duration;

use tracing::debug;

use crate::classifier::is_prime;
use crate::error::SimulationError;
use crate::sync::Arc;
use crate::types::shared_buffer::SharedBuffer;
use crate::types::state::{Role, WorkerReport};
use crate::worker::run_worker;

/// Consumer side of the simulation: until the stop flag is cleared, pauses,
/// blocks until an item is stored, takes it and checks whether it is prime.
/// The classification only shows up in the trace.
pub fn consumer(
    shared: Arc<SharedBuffer>,
    index: usize,
    max_wait: Duration,
) -> Result<WorkerReport, SimulationError> {
    run_worker(&shared, Role::Consumer, index, max_wait, |shared| {
        match shared.remove()? {
            Some((item, view)) => {
                let prime = is_prime(item);
                let marker = if prime { "   * * * PRIME * * *" } else { "" };
                debug!(consumer = index, item, prime, "Consumer {} reads {}{} {}", index, item, marker, view);
                Ok(true)
            }
            None => Ok(false),
        }
    })
}
