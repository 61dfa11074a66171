use thiserror::Error;

use crate::shared::frame::Frame;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CameraAcquisitionError {
    #[error("permission denied for {0}")]
    PermissionDenied(String),
    #[error("no camera device found at {0}")]
    NoDevice(String),
    #[error("{0}")]
    Device(String),
}

/// What the client asks the camera for. Sources treat the sizes as
/// preferences, not requirements.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CaptureConstraints {
    pub ideal_width: u32,
    pub ideal_height: u32,
    /// Ask for the camera facing the user. Sources without a notion of
    /// facing ignore it.
    pub front_facing: bool,
}

impl CaptureConstraints {
    pub fn new(ideal_width: u32, ideal_height: u32) -> Self {
        Self {
            ideal_width,
            ideal_height,
            front_facing: true,
        }
    }
}

/// A live camera feed exposing a continuously updating frame surface.
///
/// Readers only ever copy frames out; the source owns the surface.
pub trait VideoSource: Send {
    /// Acquires the stream. Failure is final: callers report it and leave
    /// the capture pipeline inert.
    fn start(&mut self, constraints: &CaptureConstraints) -> Result<(), CameraAcquisitionError>;

    fn stop(&mut self);

    /// Whether enough video has been buffered to sample a frame.
    fn has_enough_data(&self) -> bool;

    /// Copy of the most recent frame, if any.
    fn current_frame(&self) -> Option<Frame>;
}
