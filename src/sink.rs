//! Observation sinks for search progress
//!
//! Every search reports what it is doing as [`SearchEvent`]s. A sink decides
//! what happens to them: log them, keep them for inspection, or drop them.
//! Sinks are shared across threads, so `report` takes `&self` and must not
//! block the caller for long.

#[cfg(test)]
use std::sync::Mutex;

/// Something a search wants to tell the outside world
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
    /// A scan over one progression started
    ScanStarted { offset: u64, stride: u64, bound: u64 },
    /// A prime at or below the bound was found
    PrimeFound { offset: u64, value: u64 },
    /// A scan found the first prime above its bound
    ScanFinished { offset: u64, next_prime: u64 },
    /// The partitioned driver launched its workers
    SearchStarted { bound: u64, workers: usize, launched: usize },
    /// Every worker of the partitioned driver has been joined
    SearchFinished { bound: u64 },
}

/// Receiver of search events
pub trait ObservationSink: Send + Sync {
    fn report(&self, event: &SearchEvent);
}

/// Writes events as log lines through `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl ObservationSink for TracingSink {
    fn report(&self, event: &SearchEvent) {
        match *event {
            SearchEvent::ScanStarted {
                offset,
                stride,
                bound,
            } => tracing::info!(offset, stride, bound, "scan started"),
            SearchEvent::PrimeFound { offset, value } => {
                tracing::debug!(offset, value, "prime found")
            }
            SearchEvent::ScanFinished { offset, next_prime } => {
                tracing::info!(offset, next_prime, "scan done")
            }
            SearchEvent::SearchStarted {
                bound,
                workers,
                launched,
            } => tracing::info!(bound, workers, launched, "partitioned search started"),
            SearchEvent::SearchFinished { bound } => {
                tracing::info!(bound, "partitioned search done")
            }
        }
    }
}

/// Discards every event
#[cfg(test)]
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

#[cfg(test)]
impl ObservationSink for NullSink {
    fn report(&self, _event: &SearchEvent) {}
}

/// Keeps every event in memory, in the order received
#[cfg(test)]
#[derive(Debug, Default)]
pub struct CollectingSink {
    events: Mutex<Vec<SearchEvent>>,
}

#[cfg(test)]
impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events received so far
    pub fn events(&self) -> Vec<SearchEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Values of every `PrimeFound` event, sorted and deduplicated
    pub fn primes(&self) -> Vec<u64> {
        let mut primes: Vec<u64> = self
            .events()
            .into_iter()
            .filter_map(|e| match e {
                SearchEvent::PrimeFound { value, .. } => Some(value),
                _ => None,
            })
            .collect();
        primes.sort_unstable();
        primes.dedup();
        primes
    }
}

#[cfg(test)]
impl ObservationSink for CollectingSink {
    fn report(&self, event: &SearchEvent) {
        let mut events = match self.events.lock() {
            Ok(events) => events,
            Err(poisoned) => poisoned.into_inner(),
        };
        events.push(event.clone());
    }
}
