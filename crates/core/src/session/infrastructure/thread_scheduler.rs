use std::collections::HashMap;
use std::thread;
use std::time::Duration;

use crossbeam_channel::{Sender, select, tick};

use crate::session::domain::scheduler::{Scheduler, TaskId, TimerKind};
use crate::session::events::Event;

/// Runs each periodic task on its own thread, posting ticks to the event
/// channel.
///
/// Cancelling drops the task's stop sender, which ends the thread at its
/// next wake-up. A tick already queued in the event channel may still be
/// delivered; the session filters those by task id.
pub struct ThreadScheduler {
    events: Sender<Event>,
    next_id: u64,
    tasks: HashMap<TaskId, Sender<()>>,
}

impl ThreadScheduler {
    pub fn new(events: Sender<Event>) -> Self {
        Self {
            events,
            next_id: 0,
            tasks: HashMap::new(),
        }
    }

    pub fn active(&self) -> usize {
        self.tasks.len()
    }
}

impl Scheduler for ThreadScheduler {
    fn every(&mut self, period: Duration, kind: TimerKind) -> TaskId {
        self.next_id += 1;
        let id = TaskId(self.next_id);
        let (stop_tx, stop_rx) = crossbeam_channel::bounded::<()>(0);
        let events = self.events.clone();

        thread::spawn(move || {
            let ticker = tick(period);
            loop {
                select! {
                    recv(ticker) -> _ => {
                        if events.send(Event::Timer { id, kind }).is_err() {
                            break;
                        }
                    }
                    recv(stop_rx) -> _ => break,
                }
            }
            log::trace!("Timer {id:?} ({kind:?}) finished");
        });

        self.tasks.insert(id, stop_tx);
        log::debug!("Scheduled {kind:?} every {period:?} as {id:?}");
        id
    }

    fn cancel(&mut self, id: TaskId) {
        if self.tasks.remove(&id).is_some() {
            log::debug!("Cancelled timer {id:?}");
        }
    }
}
