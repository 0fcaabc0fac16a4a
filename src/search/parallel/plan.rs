//! Deciding which offsets get a worker.

use crate::search::progression::Progression;

/// Why an offset was not given a worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// `offset + 1` divides the worker count.
    DividesWorkerCount,
    /// `offset + 1` shares some other factor with the worker count, so the
    /// progression holds no primes.
    SharesFactor,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::DividesWorkerCount => write!(f, "offset + 1 divides the worker count"),
            SkipReason::SharesFactor => write!(f, "offset + 1 shares a factor with the worker count"),
        }
    }
}

/// Offsets to launch and offsets skipped for a given worker count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerPlan {
    /// Stride of every progression (the requested worker count).
    pub stride: u64,
    /// Offsets that get a worker, ascending.
    pub launched: Vec<u64>,
    /// Offsets that do not, ascending.
    pub skipped: Vec<(u64, SkipReason)>,
}

impl WorkerPlan {
    /// Plan `num_workers` progressions of stride `num_workers`.
    ///
    /// Offset 0 always runs. Offset `i > 0` is skipped when `i + 1` divides
    /// the worker count, and then also when its progression is barren, which
    /// the divisor rule alone misses (worker count 6 would keep offset 3,
    /// whose candidates are all even). Together the two rules keep exactly the
    /// offsets with `gcd(i + 1, num_workers) == 1`.
    pub fn new(num_workers: usize) -> Self {
        let stride = num_workers as u64;
        let mut launched = Vec::new();
        let mut skipped = Vec::new();

        for offset in 0..stride {
            if offset > 0 && stride % (offset + 1) == 0 {
                skipped.push((offset, SkipReason::DividesWorkerCount));
                continue;
            }
            let barren = Progression::new(offset, stride)
                .map(|p| p.is_barren())
                .unwrap_or(true);
            if barren {
                skipped.push((offset, SkipReason::SharesFactor));
                continue;
            }
            launched.push(offset);
        }

        Self {
            stride,
            launched,
            skipped,
        }
    }
}
