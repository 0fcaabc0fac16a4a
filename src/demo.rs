//! Console demos: cooperative vs partitioned search, and a timing comparison

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::error::{Result, SearchError};
use crate::prime::nth_prime;
use crate::search::parallel::{ParallelConfig, PartitionedResult, run_partitioned_search};
use crate::search::{ReportMode, ScanConfig, scan_cooperative};
use crate::sink::ObservationSink;

/// Inputs for the demos
#[derive(Debug, Clone)]
pub struct DemoConfig {
    /// Bound for the cooperative single-threaded search
    pub example_prime: u64,
    /// Bound for the partitioned background search
    pub max_prime: u64,
    /// Worker count for the partitioned search
    pub workers: usize,
    /// Which prime the timing demo looks for sequentially
    pub nth: u64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            example_prime: 7_654_321,
            max_prime: 32_452_843,
            workers: 4,
            nth: 1_000_000,
        }
    }
}

impl DemoConfig {
    pub fn with_example_prime(mut self, example_prime: u64) -> Self {
        self.example_prime = example_prime;
        self
    }

    pub fn with_max_prime(mut self, max_prime: u64) -> Self {
        self.max_prime = max_prime;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_nth(mut self, nth: u64) -> Self {
        self.nth = nth;
        self
    }
}

/// What the async demo found
#[derive(Debug, Clone)]
pub struct AsyncDemoReport {
    /// First prime above `example_prime`
    pub found_prime: u64,
    /// The background search up to `max_prime`
    pub partitioned: PartitionedResult,
}

/// Timings from the timing demo
#[derive(Debug, Clone)]
pub struct TimingReport {
    pub nth: u64,
    /// The `nth` prime
    pub prime: u64,
    /// Time to find it on one thread
    pub sequential: Duration,
    /// Time for the partitioned search up to it
    pub partitioned: Duration,
}

/// Run a partitioned search up to `max_prime` in the background while the
/// main task looks for the first prime above `example_prime` cooperatively,
/// then wait for the background search.
///
/// Everything async runs on a single-threaded runtime; only the partitioned
/// search leaves it, via `spawn_blocking`.
pub fn run_async_demo(
    config: &DemoConfig,
    sink: Arc<dyn ObservationSink>,
) -> Result<AsyncDemoReport> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .map_err(|e| SearchError::Runtime(e.to_string()))?;

    runtime.block_on(async_demo(config, sink))
}

async fn async_demo(
    config: &DemoConfig,
    sink: Arc<dyn ObservationSink>,
) -> Result<AsyncDemoReport> {
    let parallel = ParallelConfig::new(config.max_prime).with_workers(config.workers);
    parallel.validate()?;

    let background_sink = Arc::clone(&sink);
    let print_task = tokio::task::spawn_blocking(move || {
        run_partitioned_search(&parallel, background_sink.as_ref())
    });

    println!(
        "Looking for the first prime number higher than {} *asynchronously* (1 main thread) \
         while also finding all the prime numbers up to {} *concurrently* ({} different threads) ...",
        config.example_prime, config.max_prime, config.workers
    );

    let scan_config = ScanConfig::new(config.example_prime).with_mode(ReportMode::Yield);
    let found = scan_cooperative(&scan_config, sink.as_ref()).await;

    // Settle the background search before surfacing any error
    let partitioned = print_task
        .await
        .map_err(|e| SearchError::Runtime(format!("background search did not finish: {}", e)));

    let found = found?;
    println!("Found the prime number: {}", found.next_prime);

    let partitioned = partitioned??;

    Ok(AsyncDemoReport {
        found_prime: found.next_prime,
        partitioned,
    })
}

/// Time finding the `nth` prime on one thread against a partitioned search
/// up to that prime.
pub fn run_timing_demo(config: &DemoConfig, sink: &dyn ObservationSink) -> Result<TimingReport> {
    println!(
        "Looking for {} prime numbers *synchronously* (1 main thread) ...",
        config.nth
    );
    let watch = Instant::now();
    let prime = nth_prime(config.nth)?;
    let sequential = watch.elapsed();
    println!(
        "Synchronously found the {}th prime number {} in {}ms",
        config.nth,
        prime,
        sequential.as_millis()
    );

    println!(
        "Looking for {} prime numbers *concurrently* ({} threads) ...",
        config.nth, config.workers
    );
    let parallel = ParallelConfig::new(prime).with_workers(config.workers);
    let watch = Instant::now();
    run_partitioned_search(&parallel, sink)?;
    let partitioned = watch.elapsed();
    println!(
        "Concurrently found all the prime numbers up to {} in {}ms",
        prime,
        partitioned.as_millis()
    );

    Ok(TimingReport {
        nth: config.nth,
        prime,
        sequential,
        partitioned,
    })
}
