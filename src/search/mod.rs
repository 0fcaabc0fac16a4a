//! Prime searches over arithmetic progressions
//!
//! - Single: scan one progression for the first prime past a bound, either
//!   blocking or as a cooperative async task
//! - Parallel: partition the candidates across worker threads and join them

pub mod config;
pub mod parallel;
pub mod progression;
pub mod result;
pub mod single;

pub use config::{ReportMode, ScanConfig};
#[allow(unused_imports)]
pub use parallel::{ParallelConfig, PartitionedResult, run_partitioned_search};
pub use progression::Progression;
pub use result::{ScanOutcome, ScanStatistics};
pub use single::{scan, scan_cooperative};
