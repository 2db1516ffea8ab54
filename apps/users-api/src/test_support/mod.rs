//! Helpers shared by unit and integration tests.
//!
//! Token minting lives here rather than in `auth`: the service only verifies
//! tokens, issuance belongs to the identity provider.

pub mod app_builder;
pub mod memory_repo;
pub mod tokens;

pub use app_builder::{create_test_app_builder, TestAppBuilder};
pub use memory_repo::InMemoryUserRepo;
pub use tokens::{bearer_header, expired_token_for, mint_token, mint_token_with, token_for};

use crate::state::security_config::SecurityConfig;

/// Secret shared by tests that do not care about its value.
pub const TEST_JWT_SECRET: &str = "test_secret_key_for_testing_purposes_only";

pub fn test_security() -> SecurityConfig {
    SecurityConfig::new(TEST_JWT_SECRET.as_bytes())
}
