pub mod thread_dispatcher;
pub mod thread_scheduler;
