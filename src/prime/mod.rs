//! Primality testing by trial division
//!
//! Deliberately naive: every candidate divisor from 2 up to the integer square
//! root is tried. The search drivers are the interesting part, not this test.

use crate::error::{Result, SearchError};

/// Returns whether `n` is prime.
///
/// Trial-divides by every `d` in `2..=isqrt(n)`. The bound is checked as
/// `d <= n / d` so large inputs cannot overflow. 0 and 1 are not prime.
pub fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    let mut d = 2;
    while d <= n / d {
        if n % d == 0 {
            return false;
        }
        d += 1;
    }
    true
}

/// Find the `n`-th prime, counting from `nth_prime(1) == 2`.
pub fn nth_prime(n: u64) -> Result<u64> {
    if n == 0 {
        return Err(SearchError::InvalidNth);
    }

    let mut count = 0;
    let mut candidate: u64 = 1;
    loop {
        candidate = candidate.checked_add(1).ok_or(SearchError::Overflow {
            offset: 0,
            stride: 1,
            cursor: candidate,
        })?;
        if is_prime(candidate) {
            count += 1;
            if count == n {
                return Ok(candidate);
            }
        }
    }
}
