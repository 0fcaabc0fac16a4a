//! Error types for prime searches

use std::fmt;
use thiserror::Error;

/// A single worker that did not reach a result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerFailure {
    /// Offset of the progression the worker was scanning
    pub offset: u64,
    /// Human readable cause (error message or panic payload)
    pub reason: String,
}

impl fmt::Display for WorkerFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "offset {}: {}", self.offset, self.reason)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("Invalid bound {bound}: must be at least 2")]
    InvalidBound { bound: u64 },

    #[error("Invalid worker count: must be at least 1")]
    InvalidWorkerCount,

    #[error("Invalid progression (offset {offset}, stride {stride}): need stride >= 1 and offset < stride")]
    InvalidProgression { offset: u64, stride: u64 },

    #[error("Progression (offset {offset}, stride {stride}) shares a factor with its stride and holds no primes")]
    BarrenProgression { offset: u64, stride: u64 },

    #[error("Invalid prime index: must be at least 1")]
    InvalidNth,

    #[error("Arithmetic overflow advancing past {cursor} (offset {offset}, stride {stride})")]
    Overflow { offset: u64, stride: u64, cursor: u64 },

    #[error("{} worker(s) failed: {}", .failures.len(), join_failures(.failures))]
    Aggregate { failures: Vec<WorkerFailure> },

    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl SearchError {
    /// Offsets of the failed workers, if this is an aggregate failure
    pub fn failed_offsets(&self) -> Vec<u64> {
        match self {
            SearchError::Aggregate { failures } => failures.iter().map(|f| f.offset).collect(),
            _ => Vec::new(),
        }
    }
}

fn join_failures(failures: &[WorkerFailure]) -> String {
    failures
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, SearchError>;
