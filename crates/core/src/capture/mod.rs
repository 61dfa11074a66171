pub mod domain;
pub mod frame_sampler;
pub mod infrastructure;
