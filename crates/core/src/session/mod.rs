pub mod controller;
pub mod domain;
pub mod event_loop;
pub mod events;
pub mod infrastructure;
#[allow(clippy::module_inception)]
pub mod session;
