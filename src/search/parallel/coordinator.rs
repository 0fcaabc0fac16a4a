//! Partitioned search coordinator that manages worker threads.

use crate::error::{Result, SearchError, WorkerFailure};
use crate::search::config::{ReportMode, ScanConfig};
use crate::search::parallel::channel::{
    CoordinatorChannels, WorkerChannels, WorkerMessage, create_channels,
};
use crate::search::parallel::config::ParallelConfig;
use crate::search::parallel::plan::WorkerPlan;
use crate::search::progression::Progression;
use crate::search::result::ScanOutcome;
use crate::search::single::scan;
use crate::sink::{ObservationSink, SearchEvent};
use std::any::Any;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Result from a partitioned search that every worker completed.
#[derive(Debug, Clone)]
pub struct PartitionedResult {
    /// Which offsets ran and which were skipped.
    pub plan: WorkerPlan,
    /// One outcome per launched offset, sorted by offset.
    pub workers: Vec<ScanOutcome>,
    /// Wall-clock time from launch to the last join.
    pub elapsed_time: Duration,
}

impl PartitionedResult {
    /// Candidates tested across all workers.
    pub fn candidates_tested(&self) -> u64 {
        self.workers
            .iter()
            .map(|w| w.statistics.candidates_tested)
            .sum()
    }

    /// Primes found across all workers, terminating primes included.
    pub fn primes_found(&self) -> u64 {
        self.workers.iter().map(|w| w.statistics.primes_found).sum()
    }

    /// Smallest of the workers' first primes above the bound.
    pub fn next_prime(&self) -> Option<u64> {
        self.workers.iter().map(|w| w.next_prime).min()
    }
}

/// Signature of the per-progression search each worker runs.
type WorkerFn = dyn Fn(&ScanConfig, &dyn ObservationSink) -> Result<ScanOutcome> + Send + Sync;

/// Search for primes up to `config.bound` on one thread per useful offset.
///
/// Every launched worker scans the progression `offset + 1 + k * workers` in
/// announce mode. Their events are forwarded to `sink` as they arrive, with no
/// ordering between workers. The call returns only after every worker thread
/// has been joined; `SearchFinished` is the last event reported.
///
/// If any worker fails or panics, the others still run to completion and the
/// result is `SearchError::Aggregate` naming every failed offset.
pub fn run_partitioned_search(
    config: &ParallelConfig,
    sink: &dyn ObservationSink,
) -> Result<PartitionedResult> {
    run_with_worker(config, sink, Arc::new(scan))
}

fn run_with_worker(
    config: &ParallelConfig,
    sink: &dyn ObservationSink,
    worker: Arc<WorkerFn>,
) -> Result<PartitionedResult> {
    config.validate()?;
    let start_time = Instant::now();

    let plan = WorkerPlan::new(config.num_workers);
    for (offset, reason) in &plan.skipped {
        tracing::debug!(offset, %reason, "skipping offset");
    }

    let (coordinator_channels, worker_channels) = create_channels(&plan.launched);

    sink.report(&SearchEvent::SearchStarted {
        bound: config.bound,
        workers: config.num_workers,
        launched: plan.launched.len(),
    });

    let mut failures = Vec::new();
    let mut handles = Vec::with_capacity(worker_channels.len());

    for channels in worker_channels {
        let offset = channels.offset;
        let bound = config.bound;
        let stride = plan.stride;
        let worker = Arc::clone(&worker);

        let spawned = thread::Builder::new()
            .name(format!("prime-worker-{}", offset))
            .spawn(move || run_worker(bound, stride, channels, worker.as_ref()));

        match spawned {
            Ok(handle) => handles.push((offset, handle)),
            Err(e) => failures.push(WorkerFailure {
                offset,
                reason: format!("failed to spawn worker thread: {}", e),
            }),
        }
    }

    let mut outcomes = run_coordinator(coordinator_channels, sink, &mut failures);

    // Barrier: nothing outlives this call
    join_workers(handles, &mut failures);

    if !failures.is_empty() {
        failures.sort_by_key(|f| f.offset);
        for failure in &failures {
            tracing::error!(offset = failure.offset, reason = %failure.reason, "worker failed");
        }
        let err = SearchError::Aggregate { failures };
        tracing::warn!(failed = ?err.failed_offsets(), "partitioned search discarded");
        return Err(err);
    }

    outcomes.sort_by_key(|o| o.statistics.offset);
    sink.report(&SearchEvent::SearchFinished {
        bound: config.bound,
    });

    Ok(PartitionedResult {
        plan,
        workers: outcomes,
        elapsed_time: start_time.elapsed(),
    })
}

/// Drain worker messages until every worker has dropped its sender.
fn run_coordinator(
    channels: CoordinatorChannels,
    sink: &dyn ObservationSink,
    failures: &mut Vec<WorkerFailure>,
) -> Vec<ScanOutcome> {
    let mut outcomes = Vec::new();

    for msg in channels.from_workers.iter() {
        match msg {
            WorkerMessage::Event(event) => sink.report(&event),
            WorkerMessage::Finished { offset, outcome } => {
                tracing::debug!(offset, next_prime = outcome.next_prime, "worker finished");
                outcomes.push(outcome);
            }
            WorkerMessage::Error { offset, error } => failures.push(WorkerFailure {
                offset,
                reason: error.to_string(),
            }),
        }
    }

    outcomes
}

fn join_workers(handles: Vec<(u64, JoinHandle<()>)>, failures: &mut Vec<WorkerFailure>) {
    for (offset, handle) in handles {
        if let Err(payload) = handle.join() {
            failures.push(WorkerFailure {
                offset,
                reason: format!("worker panicked: {}", panic_message(&*payload)),
            });
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

/// Worker body: scan one progression and report the outcome.
fn run_worker(bound: u64, stride: u64, channels: WorkerChannels, worker: &WorkerFn) {
    let offset = channels.offset;
    let sink = channels.sink();

    let result = Progression::new(offset, stride).and_then(|progression| {
        let config = ScanConfig::new(bound)
            .with_progression(progression)
            .with_mode(ReportMode::Announce);
        worker(&config, &sink)
    });

    let msg = match result {
        Ok(outcome) => WorkerMessage::Finished { offset, outcome },
        Err(error) => WorkerMessage::Error { offset, error },
    };
    let _ = channels.to_coordinator.send(msg);
}
