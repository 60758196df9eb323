//! Client-side view synchronisation: snapshot parsing, the activity registry,
//! reconciliation, command dispatch and the poll loop.
mod date;
mod dispatch;
mod error;
mod poll;
mod reconcile;
mod registry;
mod snapshot;
#[cfg(test)]
pub(crate) mod testing;

pub use date::{DateProvider, FixedDate, LocalCalendar};
pub use dispatch::{
    BackgroundSink, Command, CommandSink, CreationInput, Dispatcher, Gesture, Submission, dispatch,
};
pub use error::SyncError;
pub use poll::{CycleReport, FetchOutcome, PollLoop};
pub use reconcile::{Instruction, reconcile};
pub use registry::{ControlId, Entry, Registry};
pub use snapshot::{ActivityRecord, DaySummary, IDLE_STATUS, Snapshot, parse_snapshot};
