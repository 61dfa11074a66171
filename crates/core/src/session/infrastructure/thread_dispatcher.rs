use std::sync::Arc;
use std::thread;

use crossbeam_channel::Sender;

use crate::recognition::domain::recognition_service::RecognitionService;
use crate::session::domain::job_dispatcher::{Job, JobDispatcher};
use crate::session::events::Event;

/// Runs every job on a fresh thread and posts its completion to the event
/// channel. Requests are independent; several may be in flight at once.
pub struct ThreadDispatcher {
    service: Arc<dyn RecognitionService>,
    events: Sender<Event>,
}

impl ThreadDispatcher {
    pub fn new(service: Arc<dyn RecognitionService>, events: Sender<Event>) -> Self {
        Self { service, events }
    }
}

impl JobDispatcher for ThreadDispatcher {
    fn dispatch(&mut self, job: Job) {
        let service = self.service.clone();
        let events = self.events.clone();
        thread::spawn(move || {
            let completion = job.run(service.as_ref());
            if events.send(Event::Completed(completion)).is_err() {
                log::debug!("Event loop closed before completion was delivered");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::recognition::domain::enrollment_request::EnrollmentRequest;
    use crate::session::domain::job_dispatcher::Completion;
    use crate::shared::encoded_frame::EncodedFrame;
    use crate::testing::FakeService;

    #[test]
    fn test_completion_is_posted_to_channel() {
        let (tx, rx) = crossbeam_channel::unbounded::<Event>();
        let service = FakeService::default();
        let mut dispatcher = ThreadDispatcher::new(Arc::new(service.clone()), tx);
        let request =
            EnrollmentRequest::new(EncodedFrame::new("data:image/jpeg;base64,AA==".into()), "Eve")
                .unwrap();

        dispatcher.dispatch(Job::Register(request));

        let event = rx.recv_timeout(Duration::from_secs(2)).unwrap();
        let Event::Completed(Completion::Registration { label, outcome }) = event else {
            panic!("expected a registration completion");
        };
        assert_eq!(label, "Eve");
        assert!(outcome.is_ok());
        assert_eq!(service.registered(), vec!["Eve".to_string()]);
    }

    #[test]
    fn test_closed_channel_is_tolerated() {
        let (tx, rx) = crossbeam_channel::unbounded::<Event>();
        drop(rx);
        let mut dispatcher = ThreadDispatcher::new(Arc::new(FakeService::default()), tx);

        dispatcher.dispatch(Job::FetchSystemInfo);
    }
}
