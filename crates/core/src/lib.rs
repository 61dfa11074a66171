//! Client-side runtime for a remote face-recognition service.
//!
//! The crate samples a live camera feed, ships frames to the service,
//! and keeps the on-screen overlay, results list and status line in step
//! with the recognition session.

pub mod capture;
pub mod presentation;
pub mod recognition;
pub mod session;
pub mod shared;

#[cfg(test)]
pub(crate) mod testing;
