use std::time::Duration;

use rand::Rng;
use tracing::debug;

use crate::error::SimulationError;
use crate::sync::Arc;
use crate::types::shared_buffer::SharedBuffer;
use crate::types::state::{Role, WorkerReport};
use crate::types::Item;
use crate::worker::run_worker;

/// Produced values are drawn from `[0, ITEM_BOUND)`.
pub const ITEM_BOUND: Item = 100;

/// Producer side of the simulation: until the stop flag is cleared, pauses,
/// makes up a value and blocks until the ring has room for it.
pub fn producer(
    shared: Arc<SharedBuffer>,
    index: usize,
    max_wait: Duration,
) -> Result<WorkerReport, SimulationError> {
    let mut rng = rand::rng();
    run_worker(&shared, Role::Producer, index, max_wait, |shared| {
        let item = rng.random_range(0..ITEM_BOUND);
        match shared.insert(item)? {
            Some(view) => {
                debug!(producer = index, item, "Producer {} writes {} {}", index, item, view);
                Ok(true)
            }
            None => Ok(false),
        }
    })
}
