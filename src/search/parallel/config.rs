//! Configuration for partitioned search execution.

use crate::error::{Result, SearchError};

/// Configuration for partitioned search execution.
#[derive(Debug, Clone)]
pub struct ParallelConfig {
    /// Every worker scans until its first prime above this.
    pub bound: u64,
    /// Requested number of workers; also the stride of every progression.
    pub num_workers: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            bound: 2,
            num_workers: num_cpus::get(),
        }
    }
}

impl ParallelConfig {
    /// Create a config for the given bound with one worker per logical CPU.
    pub fn new(bound: u64) -> Self {
        Self {
            bound,
            ..Default::default()
        }
    }

    /// Set the number of workers. Zero is kept as-is and rejected by `validate`.
    pub fn with_workers(mut self, num_workers: usize) -> Self {
        self.num_workers = num_workers;
        self
    }

    /// Set the number of workers from an Option, keeping the default on None.
    pub fn with_workers_option(mut self, num_workers: Option<usize>) -> Self {
        if let Some(n) = num_workers {
            self.num_workers = n;
        }
        self
    }

    /// Reject inputs that must fail before any worker is launched.
    pub fn validate(&self) -> Result<()> {
        if self.bound < 2 {
            return Err(SearchError::InvalidBound { bound: self.bound });
        }
        if self.num_workers == 0 {
            return Err(SearchError::InvalidWorkerCount);
        }
        Ok(())
    }
}
