use thiserror::Error;

use crate::recognition::domain::enrollment_request::EnrollmentRequest;
use crate::shared::detection::{RecognitionResult, SystemInfo};
use crate::shared::encoded_frame::EncodedFrame;

/// Failure of a call to the recognition service.
///
/// `Transport` (non-2xx) is kept apart from the application-level
/// `success: false` payloads so callers can word them differently.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecognitionClientError {
    #[error("HTTP error! status: {status}")]
    Transport { status: u16 },
    #[error("{0}")]
    Recognition(String),
    #[error("{0}")]
    Registration(String),
    #[error("{0}")]
    InfoUnavailable(String),
    #[error("{0}")]
    Network(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Client side of the remote face-recognition service.
///
/// Calls block until the service answers; callers run them off the
/// session thread. Implementations never touch session state.
pub trait RecognitionService: Send + Sync {
    fn recognize(&self, image: &EncodedFrame) -> Result<RecognitionResult, RecognitionClientError>;

    /// Enrolls the request's label. The service stores the embedding; the
    /// client keeps nothing.
    fn register(&self, request: &EnrollmentRequest) -> Result<(), RecognitionClientError>;

    fn fetch_system_info(&self) -> Result<SystemInfo, RecognitionClientError>;
}
