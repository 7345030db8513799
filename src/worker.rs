use std::time::Duration;

use rand::Rng;
use tracing::debug;

use crate::error::SimulationError;
use crate::sync::sleep;
use crate::types::shared_buffer::SharedBuffer;
use crate::types::state::{Role, WorkerReport, WorkerState};

///Sleeps a random time in `[0, max_wait)` before each buffer operation.
pub fn pause(max_wait: Duration) {
    let max_ms = max_wait.as_millis() as u64;
    if max_ms == 0 {
        return;
    }
    let ms = rand::rng().random_range(0..max_ms);
    sleep(Duration::from_millis(ms));
}

/// Loop shared by producers and consumers.
///
/// Each iteration pauses, runs `step` once and re-reads the stop flag. `step`
/// returns whether an item actually moved; only those are counted. A worker
/// that sees the flag cleared posts both semaphores once before returning,
/// so a sibling parked on either of them is not left behind.
pub fn run_worker<F>(
    shared: &SharedBuffer,
    role: Role,
    index: usize,
    max_wait: Duration,
    mut step: F,
) -> Result<WorkerReport, SimulationError>
where
    F: FnMut(&SharedBuffer) -> Result<bool, SimulationError>,
{
    let mut state = WorkerState::Running;
    let mut count = 0;
    loop {
        state = match state {
            WorkerState::Running => {
                pause(max_wait);
                if step(shared)? {
                    count += 1;
                }
                state.observe(shared.is_running())
            }
            WorkerState::Draining => {
                shared.courtesy_signal(role);
                state.drained()
            }
            WorkerState::Stopped => break,
        };
    }
    debug!(%role, index, count, "worker stopped");
    Ok(WorkerReport { role, index, count })
}

#[cfg(not(loom))]
#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::{pause, run_worker};
    use crate::error::SimulationError;
    use crate::types::shared_buffer::SharedBuffer;
    use crate::types::state::{Role, WorkerReport};

    #[test]
    fn test_pause_is_bounded() {
        let start = Instant::now();
        for _ in 0..10 {
            pause(Duration::from_millis(5));
        }
        pause(Duration::ZERO);
        assert!(start.elapsed() < Duration::from_secs(2));
    }

    #[test]
    fn test_stopped_worker_runs_one_iteration() {
        let shared = SharedBuffer::new(5, false).expect("couldn't create the shared buffer");
        shared.stop(0, 0);
        let mut calls = 0;
        let report = run_worker(&shared, Role::Producer, 3, Duration::ZERO, |_| {
            calls += 1;
            Ok(true)
        })
        .expect("worker failed");
        assert_eq!(1, calls);
        assert_eq!(
            WorkerReport {
                role: Role::Producer,
                index: 3,
                count: 1
            },
            report
        );
    }

    #[test]
    fn test_only_moved_items_are_counted() {
        let shared = SharedBuffer::new(5, false).expect("couldn't create the shared buffer");
        let mut calls = 0;
        let report = run_worker(&shared, Role::Consumer, 0, Duration::ZERO, |shared| {
            calls += 1;
            if calls == 6 {
                shared.stop(0, 0);
            }
            Ok(calls % 2 == 0)
        })
        .expect("worker failed");
        assert_eq!(6, calls);
        assert_eq!(3, report.count);
    }

    #[test]
    fn test_step_error_ends_the_worker() {
        let shared = SharedBuffer::new(5, false).expect("couldn't create the shared buffer");
        let result = run_worker(&shared, Role::Consumer, 0, Duration::ZERO, |_| {
            Err(SimulationError::Poisoned("buffer"))
        });
        assert!(matches!(result, Err(SimulationError::Poisoned("buffer"))));
    }

    #[test]
    fn test_exit_posts_courtesy_signals() {
        let shared = SharedBuffer::new(3, false).expect("couldn't create the shared buffer");
        shared.stop(0, 0);
        run_worker(&shared, Role::Producer, 0, Duration::ZERO, |_| Ok(false))
            .expect("worker failed");
        // the courtesy post on full_slots lets a remove through on an empty ring
        assert_eq!(None, shared.remove().expect("remove failed"));
        assert_eq!(1, shared.totals().expect("couldn't read totals").times_empty);
    }
}
