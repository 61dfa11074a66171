use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TaskId(pub u64);

/// Which periodic task a tick belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerKind {
    /// Frame sampling while recognizing.
    Cadence,
    /// System-info refresh; never cancelled during the client's lifetime.
    InfoPoll,
}

/// Periodic tick source. Ticks are delivered to the session's event loop
/// as `Event::Timer { id, kind }`.
///
/// Cancellation is explicit: a task keeps ticking until `cancel` is called
/// with its id.
pub trait Scheduler: Send {
    fn every(&mut self, period: Duration, kind: TimerKind) -> TaskId;

    /// Stops a task. Unknown or already-cancelled ids are ignored.
    fn cancel(&mut self, id: TaskId);
}
