use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use super::{
    DateProvider, DaySummary, Instruction, Registry, SyncError, parse_snapshot, reconcile,
};
use crate::transport::Transport;

/// Upper bound on fetches waiting for the server at once.
const MAX_IN_FLIGHT: usize = 4;

/// A completed fetch, tagged with the sequence number it was issued under.
#[derive(Debug)]
pub struct FetchOutcome {
    pub seq: u64,
    pub result: Result<super::Snapshot, SyncError>,
}

/// What one poll cycle did to the registry.
#[derive(Debug, PartialEq, Eq)]
pub enum CycleReport {
    Applied {
        seq: u64,
        summary: DaySummary,
        instructions: Vec<Instruction>,
    },
    /// Arrived after a fresher snapshot had already been applied.
    Stale { seq: u64 },
    /// Fetch or parse failed; registry untouched.
    Failed { seq: u64, error: SyncError },
}

/// Owns the repeating timer and feeds completed fetches to the reconciler.
///
/// Fetches run on worker threads and report back over a channel; everything
/// that touches the registry runs on the caller's thread.
pub struct PollLoop {
    transport: Arc<dyn Transport>,
    dates: Box<dyn DateProvider>,
    interval: Duration,
    last_issued: Option<Instant>,
    next_seq: u64,
    last_applied: Option<u64>,
    in_flight: usize,
    outcomes_tx: Sender<FetchOutcome>,
    outcomes_rx: Receiver<FetchOutcome>,
}

impl PollLoop {
    pub fn new(
        transport: Arc<dyn Transport>,
        dates: Box<dyn DateProvider>,
        interval: Duration,
    ) -> Self {
        let (outcomes_tx, outcomes_rx) = mpsc::channel();
        Self {
            transport,
            dates,
            interval,
            last_issued: None,
            next_seq: 0,
            last_applied: None,
            in_flight: 0,
            outcomes_tx,
            outcomes_rx,
        }
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn is_due(&self, now: Instant) -> bool {
        match self.last_issued {
            Some(last) => now.saturating_duration_since(last) >= self.interval,
            None => true,
        }
    }

    /// Issues a fetch when the interval has elapsed. Returns its sequence.
    pub fn poll_if_due(&mut self, now: Instant) -> Option<u64> {
        if !self.is_due(now) {
            return None;
        }
        self.poll_now(now)
    }

    /// Issues a fetch regardless of the timer, unless too many are in flight.
    pub fn poll_now(&mut self, now: Instant) -> Option<u64> {
        self.last_issued = Some(now);
        if self.in_flight >= MAX_IN_FLIGHT {
            debug!(in_flight = self.in_flight, "skipping poll, server is slow");
            return None;
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        self.in_flight += 1;

        let date = self.dates.today();
        let transport = Arc::clone(&self.transport);
        let outcomes = self.outcomes_tx.clone();
        debug!(seq, %date, "poll issued");
        thread::spawn(move || {
            let result = transport
                .fetch_activities(&date)
                .and_then(|raw| parse_snapshot(&raw));
            // The receiver is gone once the app shuts down.
            let _ = outcomes.send(FetchOutcome { seq, result });
        });
        Some(seq)
    }

    /// Applies every fetch that has completed, in completion order.
    pub fn drain(&mut self, registry: &mut Registry) -> Vec<CycleReport> {
        let mut reports = Vec::new();
        while let Ok(outcome) = self.outcomes_rx.try_recv() {
            self.in_flight = self.in_flight.saturating_sub(1);
            reports.push(self.apply(outcome, registry));
        }
        reports
    }

    /// Applies one completed fetch.
    ///
    /// A failure leaves the registry exactly as it was. A snapshot issued
    /// before the last applied one is dropped.
    pub fn apply(&mut self, outcome: FetchOutcome, registry: &mut Registry) -> CycleReport {
        let FetchOutcome { seq, result } = outcome;
        let snapshot = match result {
            Ok(snapshot) => snapshot,
            Err(error) => {
                warn!(seq, "poll cycle failed: {error}");
                return CycleReport::Failed { seq, error };
            }
        };
        if self.last_applied.is_some_and(|last| seq <= last) {
            debug!(seq, last_applied = ?self.last_applied, "dropping stale snapshot");
            return CycleReport::Stale { seq };
        }

        let instructions = reconcile(registry, &snapshot);
        self.last_applied = Some(seq);
        debug!(
            seq,
            activities = snapshot.activities.len(),
            instructions = instructions.len(),
            "snapshot applied"
        );
        CycleReport::Applied {
            seq,
            summary: snapshot.summary,
            instructions,
        }
    }
}
