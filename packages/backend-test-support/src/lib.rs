//! Test support shared by the users-api unit and integration tests:
//! one-time logging setup, captured JSON logs and Problem Details response
//! assertions.

pub mod log_capture;
pub mod logging;
pub mod problem_details;
