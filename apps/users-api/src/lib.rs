#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod app;
pub mod auth;
pub mod config;
pub mod entities;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod health;
pub mod infra;
pub mod logging;
pub mod middleware;
pub mod repos;
pub mod routes;
pub mod services;
pub mod state;
pub mod telemetry;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub mod trace_ctx;

// Re-exports for public API
pub use app::build_app;
pub use auth::claims::Claims;
pub use auth::jwt::{verify_token, VerificationFailure};
pub use config::app::AppConfig;
pub use error::AppError;
pub use extractors::current_claims::CurrentClaims;
pub use infra::db::connect_db;
pub use middleware::cors::cors_middleware;
pub use middleware::jwt_auth::JwtAuth;
pub use middleware::request_trace::RequestTrace;
pub use middleware::structured_logger::StructuredLogger;
pub use middleware::trace_span::TraceSpan;
pub use repos::users::{User, UserRepo};
pub use state::app_state::AppState;
pub use state::security_config::SecurityConfig;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::logging::init();
}
