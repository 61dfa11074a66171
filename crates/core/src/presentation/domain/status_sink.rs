use super::presentation_surface::Color;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

impl Severity {
    pub fn color(self) -> Color {
        match self {
            Severity::Info => Color::INFO,
            Severity::Success => Color::SUCCESS,
            Severity::Error => Color::WARNING,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Success => write!(f, "success"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// Single human-visible status line. The latest call always replaces the
/// previous message.
pub trait StatusSink: Send {
    fn set_status(&mut self, message: &str, severity: Severity);
}
