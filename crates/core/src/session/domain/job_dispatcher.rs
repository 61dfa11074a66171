use crate::recognition::domain::enrollment_request::EnrollmentRequest;
use crate::recognition::domain::recognition_service::{RecognitionClientError, RecognitionService};
use crate::shared::detection::{RecognitionResult, SystemInfo};
use crate::shared::encoded_frame::EncodedFrame;

/// Identifies a recognition request: the recognizing run it belongs to and
/// its position in send order within that run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RequestTicket {
    pub generation: u64,
    pub sequence: u64,
}

/// A network call the session wants made.
#[derive(Clone, Debug)]
pub enum Job {
    Recognize {
        ticket: RequestTicket,
        image: EncodedFrame,
    },
    Register(EnrollmentRequest),
    FetchSystemInfo,
}

/// Outcome of a [`Job`], fed back to the session.
#[derive(Clone, Debug)]
pub enum Completion {
    Recognition {
        ticket: RequestTicket,
        outcome: Result<RecognitionResult, RecognitionClientError>,
    },
    Registration {
        label: String,
        outcome: Result<(), RecognitionClientError>,
    },
    SystemInfo(Result<SystemInfo, RecognitionClientError>),
}

impl Job {
    /// Performs the call. Blocks for the duration of the request.
    pub fn run(self, service: &dyn RecognitionService) -> Completion {
        match self {
            Job::Recognize { ticket, image } => Completion::Recognition {
                ticket,
                outcome: service.recognize(&image),
            },
            Job::Register(request) => Completion::Registration {
                label: request.label().to_string(),
                outcome: service.register(&request),
            },
            Job::FetchSystemInfo => Completion::SystemInfo(service.fetch_system_info()),
        }
    }
}

/// Runs jobs fire-and-forget. `dispatch` must return without waiting for
/// the call; the completion arrives later as an event.
pub trait JobDispatcher: Send {
    fn dispatch(&mut self, job: Job);
}
