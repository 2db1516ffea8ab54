//! Verified identity claims attached to each authenticated request.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Claims decoded from a verified bearer token.
///
/// Inserted into request extensions by the `JwtAuth` middleware and read by
/// the `CurrentClaims` extractor. `username` is the only claim the service
/// relies on; everything else the identity provider put in the token is kept
/// in `extra`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    pub username: String,
    /// Expiry (seconds since epoch)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
    /// Issued-at (seconds since epoch)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Claims {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            exp: None,
            iat: None,
            extra: Map::new(),
        }
    }
}
