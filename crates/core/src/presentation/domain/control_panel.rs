use crate::presentation::info_reporter::SystemInfoView;
use crate::presentation::results_panel::ResultsView;

/// Enabled/disabled state of the user controls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ControlState {
    pub start: bool,
    pub stop: bool,
    pub capture: bool,
    pub confirm_register: bool,
}

/// The non-canvas parts of the UI: buttons, results list, system-info line
/// and the enrollment name field.
pub trait ControlPanel: Send {
    fn set_controls(&mut self, controls: ControlState);
    fn show_results(&mut self, results: &ResultsView);
    fn show_system_info(&mut self, info: &SystemInfoView);
    fn clear_name_input(&mut self);
}
