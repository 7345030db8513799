use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

mod classifier;
mod config;
mod consumer;
mod error;
mod producer;
mod sync;
mod types;
mod worker;

use crate::config::{SimulationArgs, SimulationConfig};
use crate::consumer::consumer;
use crate::error::SimulationError;
use crate::producer::producer;
use crate::sync::{sleep, spawn_named, Arc, JoinHandle};
use crate::types::shared_buffer::SharedBuffer;
use crate::types::state::{Role, WorkerReport};
use crate::types::stats::SimulationStats;

fn main() -> ExitCode {
    let config = SimulationConfig::from(SimulationArgs::parse());
    init_tracing(config.verbose);

    match simulation_start(&config) {
        Ok(stats) => {
            println!("{}", stats);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "simulation aborted");
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// `RUST_LOG` wins; otherwise `yes` on the command line turns on the
/// per-operation `debug` events.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

type WorkerHandle = JoinHandle<Result<WorkerReport, SimulationError>>;

fn spawn_workers<F>(
    shared: &Arc<SharedBuffer>,
    role: Role,
    count: usize,
    config: &SimulationConfig,
    body: F,
) -> Result<Vec<WorkerHandle>, SimulationError>
where
    F: Fn(Arc<SharedBuffer>, usize, Duration) -> Result<WorkerReport, SimulationError>
        + Copy
        + Send
        + 'static,
{
    (0..count)
        .map(|index| {
            let shared_clone = shared.clone();
            let max_wait = config.max_wait;
            spawn_named(format!("{}-{}", role, index), move || {
                body(shared_clone, index, max_wait)
            })
            .map_err(|source| SimulationError::Spawn {
                role,
                index,
                source,
            })
        })
        .collect()
}

fn join_workers(
    handles: Vec<WorkerHandle>,
    role: Role,
) -> Result<Vec<u64>, SimulationError> {
    handles
        .into_iter()
        .enumerate()
        .map(|(index, handle)| {
            info!("joining {} {}", role, index);
            let report = handle
                .join()
                .map_err(|_| SimulationError::WorkerPanicked { role, index })??;
            debug!(role = %report.role, index = report.index, count = report.count, "joined");
            Ok(report.count)
        })
        .collect()
}

/// Starts every producer and consumer on one shared ring, lets them run for
/// `config.duration`, stops and joins them, and gathers their counters.
///
/// If a thread can't be created the stop flag is cleared and the error is
/// returned right away; threads already running are not joined.
fn simulation_start(config: &SimulationConfig) -> Result<SimulationStats, SimulationError> {
    let shared = Arc::new(SharedBuffer::new(config.capacity, config.verbose)?);

    info!(
        producers = config.producers,
        consumers = config.consumers,
        capacity = config.capacity,
        "Starting Threads..."
    );
    let started = spawn_workers(&shared, Role::Producer, config.producers, config, producer)
        .and_then(|producers| {
            spawn_workers(&shared, Role::Consumer, config.consumers, config, consumer)
                .map(|consumers| (producers, consumers))
        });
    let (producers, consumers) = match started {
        Ok(handles) => handles,
        Err(e) => {
            shared.stop(config.producers, config.consumers);
            return Err(e);
        }
    };

    sleep(config.duration);
    info!("simulation time is up, stopping workers");
    shared.stop(config.producers, config.consumers);

    let produced = join_workers(producers, Role::Producer)?;
    let consumed = join_workers(consumers, Role::Consumer)?;

    Ok(SimulationStats {
        config: config.clone(),
        produced,
        consumed,
        totals: shared.totals()?,
    })
}
