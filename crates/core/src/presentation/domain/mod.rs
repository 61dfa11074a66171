pub mod control_panel;
pub mod presentation_surface;
pub mod status_sink;
