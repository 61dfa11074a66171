use crate::presentation::domain::control_panel::{ControlPanel, ControlState};
use crate::presentation::domain::status_sink::{Severity, StatusSink};
use crate::presentation::info_reporter::SystemInfoView;
use crate::presentation::results_panel::ResultsView;

/// Status line for a terminal front-end: printed to stderr and logged.
#[derive(Default)]
pub struct ConsoleStatusSink {
    last: Option<(String, Severity)>,
}

impl ConsoleStatusSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&(String, Severity)> {
        self.last.as_ref()
    }
}

impl StatusSink for ConsoleStatusSink {
    fn set_status(&mut self, message: &str, severity: Severity) {
        match severity {
            Severity::Error => log::warn!("{message}"),
            _ => log::info!("{message}"),
        }
        eprintln!("[{severity}] {message}");
        self.last = Some((message.to_string(), severity));
    }
}

/// Results list, system-info line and control state for a terminal
/// front-end. Unchanged views are not reprinted.
#[derive(Default)]
pub struct ConsoleControlPanel {
    controls: Option<ControlState>,
    results: Option<ResultsView>,
    info: Option<SystemInfoView>,
}

impl ConsoleControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn controls(&self) -> Option<ControlState> {
        self.controls
    }

    pub fn results(&self) -> Option<&ResultsView> {
        self.results.as_ref()
    }

    pub fn info(&self) -> Option<&SystemInfoView> {
        self.info.as_ref()
    }
}

/// The commands currently accepted, e.g. `start, capture`.
pub fn describe_controls(controls: ControlState) -> String {
    let enabled: Vec<&str> = [
        (controls.start, "start"),
        (controls.stop, "stop"),
        (controls.capture, "capture"),
        (controls.confirm_register, "register"),
    ]
    .into_iter()
    .filter_map(|(on, name)| on.then_some(name))
    .collect();
    enabled.join(", ")
}

impl ControlPanel for ConsoleControlPanel {
    fn set_controls(&mut self, controls: ControlState) {
        if self.controls == Some(controls) {
            return;
        }
        log::debug!("Controls: {}", describe_controls(controls));
        eprintln!("available: {}", describe_controls(controls));
        self.controls = Some(controls);
    }

    fn show_results(&mut self, results: &ResultsView) {
        if self.results.as_ref() == Some(results) {
            return;
        }
        for line in results.lines() {
            println!("{line}");
        }
        self.results = Some(results.clone());
    }

    fn show_system_info(&mut self, info: &SystemInfoView) {
        if self.info.as_ref() == Some(info) {
            return;
        }
        println!("{info}");
        self.info = Some(info.clone());
    }

    fn clear_name_input(&mut self) {
        log::debug!("Name input cleared");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::session::{Mode, controls_for};
    use crate::shared::detection::SystemInfo;

    #[test]
    fn test_describe_controls() {
        assert_eq!(describe_controls(controls_for(Mode::Idle)), "start, capture");
        assert_eq!(describe_controls(controls_for(Mode::Recognizing)), "stop");
        assert_eq!(
            describe_controls(controls_for(Mode::AwaitingEnrollmentLabel)),
            "start, capture, register"
        );
    }

    #[test]
    fn test_status_sink_keeps_last_message() {
        let mut sink = ConsoleStatusSink::new();

        sink.set_status("摄像头已启动", Severity::Success);
        sink.set_status("识别已停止", Severity::Info);

        assert_eq!(
            sink.last(),
            Some(&("识别已停止".to_string(), Severity::Info))
        );
    }

    #[test]
    fn test_panel_remembers_views() {
        let mut panel = ConsoleControlPanel::new();
        let info = SystemInfoView::Available(SystemInfo {
            known_faces: 1,
            face_names: vec!["Alice".into()],
        });

        panel.set_controls(controls_for(Mode::Recognizing));
        panel.show_results(&ResultsView::NoFaces);
        panel.show_system_info(&info);

        assert_eq!(panel.controls(), Some(controls_for(Mode::Recognizing)));
        assert_eq!(panel.results(), Some(&ResultsView::NoFaces));
        assert_eq!(panel.info(), Some(&info));
    }
}
