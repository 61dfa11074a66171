use crossbeam_channel::Receiver;

use crate::session::controller::ClientController;
use crate::session::events::Event;

/// Feeds events to the controller one at a time until `Shutdown` arrives
/// or every sender is gone. Returns the number of events handled.
pub fn run(controller: &mut ClientController, events: &Receiver<Event>) -> usize {
    let mut handled = 0;
    for event in events.iter() {
        let shutdown = matches!(event, Event::Shutdown);
        controller.handle(event);
        handled += 1;
        if shutdown {
            return handled;
        }
    }
    log::debug!("Event channel closed, shutting down");
    controller.shutdown();
    handled
}
