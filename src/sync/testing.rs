//! Test doubles shared by unit tests across the crate.
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::Mutex;

use serde_json::Value;

use super::{Command, CommandSink, Submission, SyncError};
use crate::transport::Transport;

/// Records submitted commands instead of sending them.
#[derive(Clone, Default)]
pub(crate) struct RecordingSink {
    pub commands: Rc<RefCell<Vec<Command>>>,
}

impl CommandSink for RecordingSink {
    fn submit(&self, command: Command) -> Submission {
        self.commands.borrow_mut().push(command);
        Submission::Sent
    }
}

/// Refuses every command as if one were already in flight.
pub(crate) struct PendingSink;

impl CommandSink for PendingSink {
    fn submit(&self, _command: Command) -> Submission {
        Submission::AlreadyPending
    }
}

/// Answers fetches from a script, in order. An exhausted script fails.
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<Value, SyncError>>>,
    pub dates: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    pub fn new(responses: Vec<Result<Value, SyncError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            dates: Mutex::new(Vec::new()),
        }
    }
}

impl Transport for ScriptedTransport {
    fn fetch_activities(&self, date: &str) -> Result<Value, SyncError> {
        self.dates.lock().unwrap().push(date.to_string());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(SyncError::TransportFailure("script exhausted".to_string())))
    }

    fn send(&self, _command: &Command) -> Result<(), SyncError> {
        Ok(())
    }
}
