pub mod job_dispatcher;
pub mod scheduler;
