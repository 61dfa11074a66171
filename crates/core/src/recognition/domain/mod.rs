pub mod enrollment_request;
pub mod recognition_service;
