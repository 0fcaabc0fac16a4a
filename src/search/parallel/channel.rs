//! Reporting channel from search workers back to the coordinator.

use crate::error::SearchError;
use crate::search::result::ScanOutcome;
use crate::sink::{ObservationSink, SearchEvent};
use crossbeam_channel::{Receiver, Sender, unbounded};

/// Message sent from workers to the coordinator.
#[derive(Debug, Clone)]
pub enum WorkerMessage {
    /// Progress to forward to the caller's sink.
    Event(SearchEvent),
    /// Worker found the first prime above the bound.
    Finished { offset: u64, outcome: ScanOutcome },
    /// Worker stopped with an error.
    Error { offset: u64, error: SearchError },
}

/// Sink handed to a worker: every event goes down the channel.
///
/// The channel is unbounded, so reporting never blocks the scan. If the
/// coordinator is gone the event is dropped.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: Sender<WorkerMessage>,
}

impl ChannelSink {
    pub fn new(tx: Sender<WorkerMessage>) -> Self {
        Self { tx }
    }
}

impl ObservationSink for ChannelSink {
    fn report(&self, event: &SearchEvent) {
        let _ = self.tx.send(WorkerMessage::Event(event.clone()));
    }
}

/// Channel endpoints for a worker.
pub struct WorkerChannels {
    /// Offset of the progression this worker scans.
    pub offset: u64,
    /// Send messages to coordinator.
    pub to_coordinator: Sender<WorkerMessage>,
}

impl WorkerChannels {
    /// Sink that forwards scan events to the coordinator.
    pub fn sink(&self) -> ChannelSink {
        ChannelSink::new(self.to_coordinator.clone())
    }
}

/// Channel endpoints for the coordinator.
pub struct CoordinatorChannels {
    /// Receive messages from workers. Disconnects once every worker's
    /// endpoints have been dropped.
    pub from_workers: Receiver<WorkerMessage>,
}

/// Create channels for the given worker offsets.
///
/// The coordinator keeps no sender of its own, so `from_workers` disconnects
/// exactly when the last worker finishes, fails, or panics.
pub fn create_channels(offsets: &[u64]) -> (CoordinatorChannels, Vec<WorkerChannels>) {
    // Unbounded channel from workers to coordinator (workers shouldn't block)
    let (worker_tx, coordinator_rx) = unbounded();

    let worker_channels = offsets
        .iter()
        .map(|&offset| WorkerChannels {
            offset,
            to_coordinator: worker_tx.clone(),
        })
        .collect();

    drop(worker_tx);

    (
        CoordinatorChannels {
            from_workers: coordinator_rx,
        },
        worker_channels,
    )
}
