//! Partitioned search across worker threads.
//!
//! The search space above 1 is split into `W` arithmetic progressions of
//! stride `W`, one per offset. Offsets that can never hold a prime past their
//! start are skipped, every other offset gets its own thread.
//!
//! # Architecture
//!
//! - A **plan** decides which offsets get a worker
//! - **Workers** each scan one progression in announce mode
//! - A **channel** carries their events and outcomes back, never blocking them
//! - The **coordinator** forwards events to the caller's sink, joins every
//!   worker, and aggregates failures
//!
//! # Example
//!
//! ```ignore
//! use primescan::search::parallel::{ParallelConfig, run_partitioned_search};
//! use primescan::sink::TracingSink;
//!
//! let config = ParallelConfig::new(1_000_000).with_workers(4);
//! let result = run_partitioned_search(&config, &TracingSink)?;
//! ```

pub mod channel;
pub mod config;
pub mod coordinator;
pub mod plan;

pub use config::ParallelConfig;
pub use coordinator::{PartitionedResult, run_partitioned_search};
pub use plan::{SkipReason, WorkerPlan};
