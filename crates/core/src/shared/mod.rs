pub mod config;
pub mod constants;
pub mod detection;
pub mod encoded_frame;
pub mod frame;
pub mod region;
