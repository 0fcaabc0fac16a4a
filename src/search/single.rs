//! Scan a single progression for the first prime past a bound
//!
//! Two entry points share one stepping core:
//! - [`scan`] runs to completion on the calling thread
//! - [`scan_cooperative`] is async and, in [`ReportMode::Yield`], gives the
//!   runtime a chance to run other tasks every time it finds a prime

use std::time::Instant;

use crate::error::Result;
use crate::prime::is_prime;
use crate::search::config::{ReportMode, ScanConfig};
use crate::search::progression::Progression;
use crate::search::result::{ScanOutcome, ScanStatistics};
use crate::sink::{ObservationSink, SearchEvent};

/// What the stepping core found on its latest step
#[derive(Clone, Copy)]
enum Step {
    /// A prime at or below the bound
    Below(u64),
    /// The first prime above the bound; the scan is over
    Past(u64),
}

/// Cursor over one progression plus the counters of its scan
struct Scanner {
    progression: Progression,
    bound: u64,
    cursor: u64,
    statistics: ScanStatistics,
    started: Instant,
}

impl Scanner {
    fn new(config: &ScanConfig) -> Self {
        let progression = config.progression;
        Self {
            progression,
            bound: config.bound,
            cursor: progression.origin(),
            statistics: ScanStatistics::new(progression.offset(), progression.stride()),
            started: Instant::now(),
        }
    }

    /// Advance to the next prime in the progression
    fn step(&mut self) -> Result<Step> {
        loop {
            self.cursor = self.progression.advance(self.cursor)?;
            self.statistics.candidates_tested += 1;
            if is_prime(self.cursor) {
                self.statistics.primes_found += 1;
                return Ok(if self.cursor > self.bound {
                    Step::Past(self.cursor)
                } else {
                    Step::Below(self.cursor)
                });
            }
        }
    }

    fn started_event(&self) -> SearchEvent {
        SearchEvent::ScanStarted {
            offset: self.progression.offset(),
            stride: self.progression.stride(),
            bound: self.bound,
        }
    }

    fn prime_event(&self, value: u64) -> SearchEvent {
        SearchEvent::PrimeFound {
            offset: self.progression.offset(),
            value,
        }
    }

    fn finish(mut self, next_prime: u64, sink: &dyn ObservationSink) -> ScanOutcome {
        self.statistics.elapsed_time = self.started.elapsed();
        sink.report(&SearchEvent::ScanFinished {
            offset: self.progression.offset(),
            next_prime,
        });
        ScanOutcome {
            next_prime,
            statistics: self.statistics,
        }
    }
}

/// Scan `config.progression` on the current thread until a prime greater than
/// `config.bound` is found, and return it.
///
/// In [`ReportMode::Announce`] every prime at or below the bound is reported
/// to `sink`. In [`ReportMode::Yield`] the thread yields to the OS scheduler
/// at every prime instead, the terminating one included. That is only a hint
/// when nothing else is waiting.
///
/// Fails before scanning if the bound is below 2 or the progression can hold
/// no primes, and mid-scan if the cursor would overflow `u64`.
pub fn scan(config: &ScanConfig, sink: &dyn ObservationSink) -> Result<ScanOutcome> {
    config.validate()?;

    let mut scanner = Scanner::new(config);
    sink.report(&scanner.started_event());

    loop {
        let step = scanner.step()?;
        match (config.mode, step) {
            (ReportMode::Announce, Step::Below(prime)) => {
                sink.report(&scanner.prime_event(prime))
            }
            (ReportMode::Announce, Step::Past(_)) => {}
            (ReportMode::Yield, _) => {
                scanner.statistics.yields += 1;
                std::thread::yield_now();
            }
        }
        if let Step::Past(prime) = step {
            return Ok(scanner.finish(prime, sink));
        }
    }
}

/// Async flavour of [`scan`].
///
/// In [`ReportMode::Yield`] the task suspends with
/// [`tokio::task::yield_now`] at every prime it finds, including the first
/// one past the bound, so on a current-thread runtime other tasks get to run
/// between primes. The scan itself never blocks on anything else.
pub async fn scan_cooperative(
    config: &ScanConfig,
    sink: &dyn ObservationSink,
) -> Result<ScanOutcome> {
    config.validate()?;

    let mut scanner = Scanner::new(config);
    sink.report(&scanner.started_event());

    loop {
        let step = scanner.step()?;
        match (config.mode, step) {
            (ReportMode::Announce, Step::Below(prime)) => {
                sink.report(&scanner.prime_event(prime))
            }
            (ReportMode::Announce, Step::Past(_)) => {}
            (ReportMode::Yield, _) => {
                scanner.statistics.yields += 1;
                tokio::task::yield_now().await;
            }
        }
        if let Step::Past(prime) = step {
            return Ok(scanner.finish(prime, sink));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SearchError;
    use crate::sink::{CollectingSink, NullSink};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[test]
    fn test_first_prime_after_ten() {
        let outcome = scan(&ScanConfig::new(10), &NullSink).unwrap();
        assert_eq!(outcome.next_prime, 11);
        // Candidates 2..=11
        assert_eq!(outcome.statistics.candidates_tested, 10);
        assert_eq!(outcome.statistics.primes_found, 5);
    }

    #[test]
    fn test_first_prime_after_bound_that_is_prime() {
        // Strictly greater than the bound
        let outcome = scan(&ScanConfig::new(7), &NullSink).unwrap();
        assert_eq!(outcome.next_prime, 11);
    }

    #[test]
    fn test_example_prime() {
        let outcome = scan(&ScanConfig::new(7_654_321), &NullSink).unwrap();
        assert_eq!(outcome.next_prime, 7_654_337);
    }

    #[test]
    fn test_announce_reports_primes_up_to_bound() {
        let sink = CollectingSink::new();
        scan(&ScanConfig::new(30), &sink).unwrap();

        assert_eq!(sink.primes(), vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29]);

        let events = sink.events();
        assert_eq!(
            events.first(),
            Some(&SearchEvent::ScanStarted {
                offset: 0,
                stride: 1,
                bound: 30
            })
        );
        assert_eq!(
            events.last(),
            Some(&SearchEvent::ScanFinished {
                offset: 0,
                next_prime: 31
            })
        );
    }

    #[test]
    fn test_yield_mode_reports_no_primes() {
        let sink = CollectingSink::new();
        let config = ScanConfig::new(30).with_mode(ReportMode::Yield);
        let outcome = scan(&config, &sink).unwrap();

        assert_eq!(outcome.next_prime, 31);
        // 10 primes up to 30, then 31
        assert_eq!(outcome.statistics.yields, 11);
        assert!(sink.primes().is_empty());
        assert_eq!(sink.events().len(), 2);
    }

    #[test]
    fn test_strided_progression() {
        // offset 2, stride 4: 7, 11, 15, 19, 23, ...
        let sink = CollectingSink::new();
        let config =
            ScanConfig::new(20).with_progression(Progression::new(2, 4).unwrap());
        let outcome = scan(&config, &sink).unwrap();

        assert_eq!(outcome.next_prime, 23);
        assert_eq!(sink.primes(), vec![7, 11, 19]);
    }

    #[test]
    fn test_invalid_inputs_fail_before_scanning() {
        let sink = CollectingSink::new();

        assert_eq!(
            scan(&ScanConfig::new(1), &sink),
            Err(SearchError::InvalidBound { bound: 1 })
        );

        let barren = ScanConfig::new(100).with_progression(Progression::new(3, 4).unwrap());
        assert_eq!(
            scan(&barren, &sink),
            Err(SearchError::BarrenProgression {
                offset: 3,
                stride: 4
            })
        );

        assert!(sink.events().is_empty());
    }

    #[test]
    fn test_overflow_is_reported_not_wrapped() {
        // stride 2^63: the first candidate 2^63 + 1 is divisible by 3,
        // the next step overflows
        let stride = 1u64 << 63;
        let config =
            ScanConfig::new(10).with_progression(Progression::new(0, stride).unwrap());

        assert_eq!(
            scan(&config, &NullSink),
            Err(SearchError::Overflow {
                offset: 0,
                stride,
                cursor: stride + 1
            })
        );
    }

    #[tokio::test]
    async fn test_cooperative_matches_blocking_scan() {
        let config = ScanConfig::new(1_000).with_mode(ReportMode::Yield);
        let cooperative = scan_cooperative(&config, &NullSink).await.unwrap();
        let blocking = scan(&config, &NullSink).unwrap();

        assert_eq!(cooperative.next_prime, 1_009);
        assert_eq!(cooperative.next_prime, blocking.next_prime);
        assert_eq!(
            cooperative.statistics.candidates_tested,
            blocking.statistics.candidates_tested
        );
        assert_eq!(cooperative.statistics.yields, 169);
    }

    #[tokio::test]
    async fn test_cooperative_yields_on_terminating_prime() {
        // Bound 2: the only prime up to the bound is 2, then 3 ends the scan
        let config = ScanConfig::new(2).with_mode(ReportMode::Yield);
        let outcome = scan_cooperative(&config, &NullSink).await.unwrap();

        assert_eq!(outcome.next_prime, 3);
        assert_eq!(outcome.statistics.yields, 2);
        assert_eq!(outcome.statistics.yields, outcome.statistics.primes_found);
    }

    #[tokio::test]
    async fn test_cooperative_scan_lets_other_tasks_run() {
        let ran = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&ran);
        let other = tokio::spawn(async move {
            flag.store(true, Ordering::SeqCst);
        });

        // Single-threaded runtime: the spawned task only runs if the scan yields
        let config = ScanConfig::new(100).with_mode(ReportMode::Yield);
        scan_cooperative(&config, &NullSink).await.unwrap();
        assert!(ran.load(Ordering::SeqCst));

        other.await.unwrap();
    }

    #[tokio::test]
    async fn test_cooperative_announce_mode_reports() {
        let sink = CollectingSink::new();
        let outcome = scan_cooperative(&ScanConfig::new(10), &sink).await.unwrap();
        assert_eq!(outcome.next_prime, 11);
        assert_eq!(sink.primes(), vec![2, 3, 5, 7]);
    }
}
