use thiserror::Error;

use crate::presentation::domain::control_panel::ControlState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Idle,
    Recognizing,
    AwaitingEnrollmentLabel,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    #[error("recognition is already running")]
    AlreadyRecognizing,
    #[error("recognition is not running")]
    NotRecognizing,
    #[error("cannot capture for enrollment while recognizing")]
    CaptureWhileRecognizing,
    #[error("no enrollment capture is pending")]
    NotAwaitingEnrollment,
    #[error("enrollment label is empty")]
    EmptyLabel,
}

/// The client's session: which mode it is in and the name typed for the
/// next enrollment.
///
/// Pure state; side effects belong to the controller driving it.
#[derive(Clone, Debug)]
pub struct Session {
    mode: Mode,
    pending_label: String,
}

impl Session {
    pub fn new() -> Self {
        Self {
            mode: Mode::Idle,
            pending_label: String::new(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_recognizing(&self) -> bool {
        self.mode == Mode::Recognizing
    }

    pub fn pending_label(&self) -> &str {
        &self.pending_label
    }

    pub fn controls(&self) -> ControlState {
        controls_for(self.mode)
    }

    /// `Idle | AwaitingEnrollmentLabel -> Recognizing`. Starting abandons
    /// any pending enrollment capture.
    pub fn start(&mut self) -> Result<(), SessionError> {
        if self.mode == Mode::Recognizing {
            return Err(SessionError::AlreadyRecognizing);
        }
        self.mode = Mode::Recognizing;
        Ok(())
    }

    /// `Recognizing -> Idle`.
    pub fn stop(&mut self) -> Result<(), SessionError> {
        if self.mode != Mode::Recognizing {
            return Err(SessionError::NotRecognizing);
        }
        self.mode = Mode::Idle;
        Ok(())
    }

    /// `Idle | AwaitingEnrollmentLabel -> AwaitingEnrollmentLabel`; a new
    /// capture resets the label.
    pub fn begin_enrollment(&mut self) -> Result<(), SessionError> {
        if self.mode == Mode::Recognizing {
            return Err(SessionError::CaptureWhileRecognizing);
        }
        self.mode = Mode::AwaitingEnrollmentLabel;
        self.pending_label.clear();
        Ok(())
    }

    pub fn set_pending_label(&mut self, raw: &str) {
        self.pending_label = raw.trim().to_string();
    }

    pub fn clear_pending_label(&mut self) {
        self.pending_label.clear();
    }

    /// The label a confirm would enroll, without committing the transition.
    pub fn enrollment_label(&self) -> Result<&str, SessionError> {
        if self.mode != Mode::AwaitingEnrollmentLabel {
            return Err(SessionError::NotAwaitingEnrollment);
        }
        if self.pending_label.is_empty() {
            return Err(SessionError::EmptyLabel);
        }
        Ok(&self.pending_label)
    }

    /// `AwaitingEnrollmentLabel -> Idle`, returning the label to enroll.
    /// An empty label leaves the session where it was.
    pub fn confirm_registration(&mut self) -> Result<String, SessionError> {
        let label = self.enrollment_label()?.to_string();
        self.mode = Mode::Idle;
        Ok(label)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

pub fn controls_for(mode: Mode) -> ControlState {
    match mode {
        Mode::Idle => ControlState {
            start: true,
            stop: false,
            capture: true,
            confirm_register: false,
        },
        Mode::Recognizing => ControlState {
            start: false,
            stop: true,
            capture: false,
            confirm_register: false,
        },
        Mode::AwaitingEnrollmentLabel => ControlState {
            start: true,
            stop: false,
            capture: true,
            confirm_register: true,
        },
    }
}
