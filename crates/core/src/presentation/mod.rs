pub mod domain;
pub mod info_reporter;
pub mod infrastructure;
pub mod overlay_renderer;
pub mod results_panel;
