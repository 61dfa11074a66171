use crate::session::domain::job_dispatcher::Completion;
use crate::session::domain::scheduler::{TaskId, TimerKind};

/// A user action on the client's controls.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    Start,
    Stop,
    Capture,
    /// The enrollment name field changed.
    NameChanged(String),
    ConfirmRegister,
}

/// Everything the session reacts to, delivered one at a time on the
/// session thread.
#[derive(Clone, Debug)]
pub enum Event {
    Intent(Intent),
    Timer { id: TaskId, kind: TimerKind },
    Completed(Completion),
    Shutdown,
}

impl From<Intent> for Event {
    fn from(intent: Intent) -> Self {
        Event::Intent(intent)
    }
}

impl From<Completion> for Event {
    fn from(completion: Completion) -> Self {
        Event::Completed(completion)
    }
}
