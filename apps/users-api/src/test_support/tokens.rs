//! JWT minting helpers for tests.

use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::{json, Value};

use crate::state::security_config::SecurityConfig;

/// Seconds since the Unix epoch.
pub fn now_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before epoch")
        .as_secs() as i64
}

/// Sign an arbitrary claim set with `alg` and a raw secret.
pub fn mint_token_with(alg: Algorithm, claims: &Value, secret: &[u8]) -> String {
    encode(&Header::new(alg), claims, &EncodingKey::from_secret(secret))
        .expect("should mint token successfully")
}

/// Sign an arbitrary claim set with the configured secret and algorithm.
pub fn mint_token(claims: &Value, security: &SecurityConfig) -> String {
    mint_token_with(security.algorithm, claims, &security.jwt_secret)
}

/// A token for `username` valid for the next 15 minutes.
pub fn token_for(username: &str, security: &SecurityConfig) -> String {
    let iat = now_secs();
    mint_token(
        &json!({"username": username, "scope": "read", "iat": iat, "exp": iat + 15 * 60}),
        security,
    )
}

/// A correctly signed token for `username` that expired an hour ago.
pub fn expired_token_for(username: &str, security: &SecurityConfig) -> String {
    let iat = now_secs() - 7200;
    mint_token(
        &json!({"username": username, "iat": iat, "exp": iat + 3600}),
        security,
    )
}

/// Full Authorization header value including the "Bearer " prefix.
pub fn bearer_header(username: &str, security: &SecurityConfig) -> String {
    format!("Bearer {}", token_for(username, security))
}
