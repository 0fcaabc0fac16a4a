//! Arithmetic progressions of prime candidates

use crate::error::{Result, SearchError};

/// The candidates `offset + 1 + k * stride` for `k = 1, 2, ...`
///
/// Partitioning by offset over a shared stride gives each worker a disjoint
/// residue class, so workers never test the same number twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progression {
    offset: u64,
    stride: u64,
}

impl Default for Progression {
    fn default() -> Self {
        Self {
            offset: 0,
            stride: 1,
        }
    }
}

impl Progression {
    /// Create a progression, checking `stride >= 1` and `offset < stride`
    pub fn new(offset: u64, stride: u64) -> Result<Self> {
        if stride == 0 || offset >= stride {
            return Err(SearchError::InvalidProgression { offset, stride });
        }
        Ok(Self { offset, stride })
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn stride(&self) -> u64 {
        self.stride
    }

    /// Value the scan cursor holds before the first step
    pub fn origin(&self) -> u64 {
        // offset < stride <= u64::MAX, so this cannot overflow
        self.offset + 1
    }

    /// Step the cursor to the next candidate, failing instead of wrapping
    pub fn advance(&self, cursor: u64) -> Result<u64> {
        cursor
            .checked_add(self.stride)
            .ok_or(SearchError::Overflow {
                offset: self.offset,
                stride: self.stride,
                cursor,
            })
    }

    /// Whether every candidate shares a factor with the stride.
    ///
    /// All candidates are congruent to `offset + 1` modulo `stride`. If that
    /// residue and the stride have a common factor `g > 1`, every candidate is
    /// a multiple of `g` larger than `g`, so none of them can be prime and a
    /// scan would never finish.
    pub fn is_barren(&self) -> bool {
        gcd(self.origin(), self.stride) > 1
    }

    /// Fail with `BarrenProgression` if the scan could never find a prime
    pub fn ensure_fertile(&self) -> Result<()> {
        if self.is_barren() {
            return Err(SearchError::BarrenProgression {
                offset: self.offset,
                stride: self.stride,
            });
        }
        Ok(())
    }
}

pub(crate) fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}
