//! Scan result types and statistics

use std::time::Duration;

/// Result of scanning one progression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOutcome {
    /// First prime strictly greater than the bound
    pub next_prime: u64,
    /// Statistics from the scan
    pub statistics: ScanStatistics,
}

/// Statistics from a scan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanStatistics {
    /// Offset of the scanned progression
    pub offset: u64,
    /// Stride of the scanned progression
    pub stride: u64,
    /// Number of candidates passed to the primality test
    pub candidates_tested: u64,
    /// Primes found, including the terminating one
    pub primes_found: u64,
    /// Times the scan handed control back to the scheduler
    pub yields: u64,
    /// Wall-clock time spent scanning
    pub elapsed_time: Duration,
}

impl ScanStatistics {
    pub fn new(offset: u64, stride: u64) -> Self {
        Self {
            offset,
            stride,
            ..Default::default()
        }
    }

    /// Fraction of tested candidates that were prime (0.0 to 1.0)
    pub fn prime_density(&self) -> f64 {
        if self.candidates_tested == 0 {
            0.0
        } else {
            self.primes_found as f64 / self.candidates_tested as f64
        }
    }
}
