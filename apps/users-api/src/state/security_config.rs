use std::fmt;

use jsonwebtoken::Algorithm;

/// HMAC variants accepted for bearer tokens signed with the shared secret.
const HMAC_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// Configuration for JWT security settings.
///
/// Loaded once at startup and shared read-only by every request. `Debug`
/// never prints the secret.
#[derive(Clone)]
pub struct SecurityConfig {
    /// Shared secret used to verify token signatures
    pub jwt_secret: Vec<u8>,
    /// Preferred signing algorithm (defaults to HS256)
    pub algorithm: Algorithm,
}

impl SecurityConfig {
    /// Create a new SecurityConfig with the given JWT secret
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            algorithm: Algorithm::HS256,
        }
    }

    /// Algorithms a token header may declare.
    pub fn accepted_algorithms(&self) -> Vec<Algorithm> {
        HMAC_ALGORITHMS.to_vec()
    }
}

impl fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("algorithm", &self.algorithm)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_secret() {
        let security = SecurityConfig::new("myfancysecret");
        let rendered = format!("{security:?}");

        assert!(!rendered.contains("myfancysecret"));
        assert!(rendered.contains("[REDACTED]"));
        assert!(rendered.contains("HS256"));
    }
}
