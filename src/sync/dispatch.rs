use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::thread;

use serde::Serialize;
use tracing::{info, warn};

use super::SyncError;
use crate::transport::Transport;

/// Outbound request derived from a gesture.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Start { name: String },
    Stop { name: String },
}

#[derive(Debug, Serialize)]
pub(crate) struct CommandBody<'a> {
    pub name: &'a str,
}

impl Command {
    pub fn name(&self) -> &str {
        match self {
            Command::Start { name } | Command::Stop { name } => name,
        }
    }

    /// Server route, relative to the base URL.
    pub fn route(&self) -> &'static str {
        match self {
            Command::Start { .. } => "api/start",
            Command::Stop { .. } => "api/stop",
        }
    }

    /// Both start and stop carry the activity name in the body.
    pub(crate) fn body(&self) -> CommandBody<'_> {
        CommandBody { name: self.name() }
    }
}

/// A text field owned by the presentation layer.
pub trait CreationInput {
    fn text(&self) -> &str;
    fn clear(&mut self);
}

impl CreationInput for String {
    fn text(&self) -> &str {
        self.as_str()
    }

    fn clear(&mut self) {
        String::clear(self);
    }
}

/// A user action on a control.
pub enum Gesture<'a> {
    /// Start/stop an existing activity. `currently_active` is read from the
    /// rendered control, not from the registry.
    Toggle {
        name: &'a str,
        currently_active: bool,
    },
    /// Start a new activity named by the creation input.
    Create { input: &'a mut dyn CreationInput },
}

/// Turns a gesture into exactly one command.
///
/// A creation gesture clears its input once the command exists. Whitespace-only
/// input produces no command and leaves the input alone.
pub fn dispatch(gesture: Gesture<'_>) -> Result<Command, SyncError> {
    let command = command_for(&gesture)?;
    gesture.consume();
    Ok(command)
}

fn command_for(gesture: &Gesture<'_>) -> Result<Command, SyncError> {
    match gesture {
        Gesture::Toggle {
            name,
            currently_active: true,
        } => Ok(Command::Stop {
            name: name.to_string(),
        }),
        Gesture::Toggle {
            name,
            currently_active: false,
        } => Ok(Command::Start {
            name: name.to_string(),
        }),
        Gesture::Create { input } => {
            let name = input.text().trim();
            if name.is_empty() {
                return Err(SyncError::EmptyActivityName);
            }
            Ok(Command::Start {
                name: name.to_string(),
            })
        }
    }
}

impl Gesture<'_> {
    /// Clears the creation input, if any.
    fn consume(self) {
        if let Gesture::Create { input } = self {
            input.clear();
        }
    }
}

/// Whether a command left the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Submission {
    Sent,
    AlreadyPending,
}

/// Receives commands; delivery is fire-and-forget.
pub trait CommandSink {
    fn submit(&self, command: Command) -> Submission;
}

/// Sends each command on its own worker thread, at most one outstanding
/// command per activity name.
pub struct BackgroundSink {
    transport: Arc<dyn Transport>,
    pending: Arc<Mutex<HashSet<String>>>,
}

impl BackgroundSink {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            pending: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    pub fn is_pending(&self, name: &str) -> bool {
        lock(&self.pending).contains(name)
    }
}

impl CommandSink for BackgroundSink {
    fn submit(&self, command: Command) -> Submission {
        if !lock(&self.pending).insert(command.name().to_string()) {
            return Submission::AlreadyPending;
        }

        let transport = Arc::clone(&self.transport);
        let pending = Arc::clone(&self.pending);
        thread::spawn(move || {
            match transport.send(&command) {
                Ok(()) => info!(route = command.route(), name = command.name(), "command sent"),
                Err(err) => warn!(
                    route = command.route(),
                    name = command.name(),
                    "command failed: {err}"
                ),
            }
            lock(&pending).remove(command.name());
        });
        Submission::Sent
    }
}

fn lock(pending: &Mutex<HashSet<String>>) -> std::sync::MutexGuard<'_, HashSet<String>> {
    pending.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Handles gestures: validates, builds the command and hands it to the sink.
/// Never touches the registry; results show up in a later snapshot.
pub struct Dispatcher {
    sink: Box<dyn CommandSink>,
}

impl Dispatcher {
    pub fn new(sink: Box<dyn CommandSink>) -> Self {
        Self { sink }
    }

    /// The creation input is only cleared once the sink has sent the command.
    pub fn handle(&self, gesture: Gesture<'_>) -> Result<(Command, Submission), SyncError> {
        let command = command_for(&gesture)?;
        let submission = self.sink.submit(command.clone());
        if submission == Submission::Sent {
            gesture.consume();
        }
        Ok((command, submission))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::testing::{PendingSink, RecordingSink};
    use std::sync::mpsc;
    use std::time::Duration;

    #[test]
    fn toggling_an_active_control_stops_it() {
        let command = dispatch(Gesture::Toggle {
            name: "Coding",
            currently_active: true,
        })
        .unwrap();
        assert_eq!(
            command,
            Command::Stop {
                name: "Coding".to_string()
            }
        );
        assert_eq!(command.route(), "api/stop");
    }

    #[test]
    fn toggling_an_idle_control_starts_it() {
        let command = dispatch(Gesture::Toggle {
            name: "Reading",
            currently_active: false,
        })
        .unwrap();
        assert_eq!(
            command,
            Command::Start {
                name: "Reading".to_string()
            }
        );
    }

    #[test]
    fn creation_trims_and_clears_the_input() {
        let mut input = "  Writing docs \n".to_string();
        let command = dispatch(Gesture::Create { input: &mut input }).unwrap();
        assert_eq!(
            command,
            Command::Start {
                name: "Writing docs".to_string()
            }
        );
        assert!(input.is_empty());
    }

    #[test]
    fn blank_creation_is_rejected_and_input_kept() {
        let mut input = "  ".to_string();
        let err = dispatch(Gesture::Create { input: &mut input }).unwrap_err();
        assert_eq!(err, SyncError::EmptyActivityName);
        assert_eq!(input, "  ");
    }

    struct CountingInput {
        text: String,
        clears: usize,
    }

    impl CreationInput for CountingInput {
        fn text(&self) -> &str {
            &self.text
        }

        fn clear(&mut self) {
            self.text.clear();
            self.clears += 1;
        }
    }

    #[test]
    fn input_is_cleared_exactly_once() {
        let mut input = CountingInput {
            text: "Reading".to_string(),
            clears: 0,
        };
        dispatch(Gesture::Create { input: &mut input }).unwrap();
        assert_eq!(input.clears, 1);

        let err = dispatch(Gesture::Create { input: &mut input }).unwrap_err();
        assert_eq!(err, SyncError::EmptyActivityName);
        assert_eq!(input.clears, 1);
    }

    #[test]
    fn stop_body_carries_the_name() {
        let command = Command::Stop {
            name: "Coding".to_string(),
        };
        let body = serde_json::to_value(command.body()).unwrap();
        assert_eq!(body, serde_json::json!({"name": "Coding"}));
    }

    #[test]
    fn dispatcher_hands_command_to_sink() {
        let sink = RecordingSink::default();
        let dispatcher = Dispatcher::new(Box::new(sink.clone()));

        let (command, submission) = dispatcher
            .handle(Gesture::Toggle {
                name: "Coding",
                currently_active: true,
            })
            .unwrap();
        assert_eq!(submission, Submission::Sent);
        assert_eq!(*sink.commands.borrow(), vec![command]);

        let mut blank = String::new();
        assert!(dispatcher.handle(Gesture::Create { input: &mut blank }).is_err());
        assert_eq!(sink.commands.borrow().len(), 1);
    }

    #[test]
    fn pending_creation_keeps_the_input() {
        let dispatcher = Dispatcher::new(Box::new(PendingSink));
        let mut input = "Coding".to_string();

        let (command, submission) = dispatcher
            .handle(Gesture::Create { input: &mut input })
            .unwrap();
        assert_eq!(submission, Submission::AlreadyPending);
        assert_eq!(command.name(), "Coding");
        assert_eq!(input, "Coding");

        let sink = RecordingSink::default();
        let dispatcher = Dispatcher::new(Box::new(sink.clone()));
        dispatcher
            .handle(Gesture::Create { input: &mut input })
            .unwrap();
        assert!(input.is_empty());
        assert_eq!(sink.commands.borrow().len(), 1);
    }

    /// Blocks every send until the test releases it.
    struct GatedTransport {
        release: Mutex<mpsc::Receiver<()>>,
        sent: mpsc::Sender<Command>,
    }

    impl Transport for GatedTransport {
        fn fetch_activities(&self, _date: &str) -> Result<serde_json::Value, SyncError> {
            Err(SyncError::TransportFailure("not used".to_string()))
        }

        fn send(&self, command: &Command) -> Result<(), SyncError> {
            let release = self.release.lock().unwrap();
            release.recv_timeout(Duration::from_secs(5)).ok();
            self.sent.send(command.clone()).ok();
            Ok(())
        }
    }

    #[test]
    fn one_outstanding_command_per_activity() {
        let (release_tx, release_rx) = mpsc::channel();
        let (sent_tx, sent_rx) = mpsc::channel();
        let sink = BackgroundSink::new(Arc::new(GatedTransport {
            release: Mutex::new(release_rx),
            sent: sent_tx,
        }));
        let start = Command::Start {
            name: "Coding".to_string(),
        };

        assert_eq!(sink.submit(start.clone()), Submission::Sent);
        assert!(sink.is_pending("Coding"));
        assert_eq!(sink.submit(start.clone()), Submission::AlreadyPending);

        release_tx.send(()).unwrap();
        let delivered = sent_rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(delivered, start);

        let deadline = std::time::Instant::now() + Duration::from_secs(5);
        while sink.is_pending("Coding") && std::time::Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }
        assert!(!sink.is_pending("Coding"));
    }
}
