use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, DecodingKey, Validation};
use thiserror::Error;

use crate::auth::claims::Claims;
use crate::state::security_config::SecurityConfig;

/// Why a bearer token was refused.
///
/// Every kind leads to the same 401 response; the kind exists for logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum VerificationFailure {
    #[error("token signature does not match the configured secret")]
    BadSignature,
    #[error("token is not a well-formed signed token")]
    Malformed,
    #[error("token has expired")]
    Expired,
}

impl VerificationFailure {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BadSignature => "bad_signature",
            Self::Malformed => "malformed",
            Self::Expired => "expired",
        }
    }
}

fn validation(security: &SecurityConfig) -> Validation {
    let mut validation = Validation::new(security.algorithm);
    validation.algorithms = security.accepted_algorithms();
    // `exp` is optional; when present it is enforced with no grace period.
    validation.required_spec_claims.clear();
    validation.validate_exp = true;
    validation.leeway = 0;
    validation.validate_aud = false;
    validation
}

/// Verify a bearer token against the shared secret and return its claims.
///
/// The signature is checked before expiry, so a forged token that is also
/// expired reports `BadSignature`.
pub fn verify_token(token: &str, security: &SecurityConfig) -> Result<Claims, VerificationFailure> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(&security.jwt_secret),
        &validation(security),
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::InvalidSignature => VerificationFailure::BadSignature,
        ErrorKind::ExpiredSignature => VerificationFailure::Expired,
        _ => VerificationFailure::Malformed,
    })
}

#[cfg(test)]
mod tests {
    use jsonwebtoken::Algorithm;
    use proptest::prelude::*;
    use serde_json::json;

    use super::{verify_token, VerificationFailure};
    use crate::state::security_config::SecurityConfig;
    use crate::test_support::tokens::{
        expired_token_for, mint_token, mint_token_with, now_secs, token_for,
    };

    fn security() -> SecurityConfig {
        SecurityConfig::new("test_secret_key_for_testing_purposes_only".as_bytes())
    }

    #[test]
    fn test_valid_token_roundtrip() {
        let security = security();
        let token = token_for("admin", &security);

        let claims = verify_token(&token, &security).unwrap();

        assert_eq!(claims.username, "admin");
        assert!(claims.exp.unwrap() > now_secs());
    }

    #[test]
    fn test_token_without_expiry_is_accepted() {
        let security = security();
        let token = mint_token(&json!({"username": "admin", "scope": "read"}), &security);

        let claims = verify_token(&token, &security).unwrap();

        assert_eq!(claims.username, "admin");
        assert_eq!(claims.exp, None);
        assert_eq!(claims.extra.get("scope"), Some(&json!("read")));
    }

    #[test]
    fn test_bad_signature() {
        let security_a = SecurityConfig::new("secret-A".as_bytes());
        let security_b = SecurityConfig::new("secret-B".as_bytes());
        let token = token_for("admin", &security_a);

        assert_eq!(
            verify_token(&token, &security_b),
            Err(VerificationFailure::BadSignature)
        );
    }

    #[test]
    fn test_expired_token() {
        let security = security();
        let token = expired_token_for("admin", &security);

        assert_eq!(
            verify_token(&token, &security),
            Err(VerificationFailure::Expired)
        );
    }

    #[test]
    fn test_expiry_one_second_ago_is_rejected() {
        let security = security();
        let token = mint_token(&json!({"username": "admin", "exp": now_secs() - 1}), &security);

        assert_eq!(
            verify_token(&token, &security),
            Err(VerificationFailure::Expired)
        );
    }

    #[test]
    fn test_expired_and_forged_reports_bad_signature() {
        let token = expired_token_for("admin", &SecurityConfig::new("other".as_bytes()));

        assert_eq!(
            verify_token(&token, &security()),
            Err(VerificationFailure::BadSignature)
        );
    }

    #[test]
    fn test_malformed_tokens() {
        let security = security();
        for token in ["", "not-a-token", "a.b.c", "a.b", "....."] {
            assert_eq!(
                verify_token(token, &security),
                Err(VerificationFailure::Malformed),
                "token {token:?}"
            );
        }
    }

    #[test]
    fn test_missing_username_is_malformed() {
        let security = security();
        let token = mint_token(&json!({"sub": "admin", "scope": "read"}), &security);

        assert_eq!(
            verify_token(&token, &security),
            Err(VerificationFailure::Malformed)
        );
    }

    #[test]
    fn test_unsigned_token_is_malformed() {
        // {"alg":"none","typ":"JWT"} . {"username":"admin"} . <empty>
        let token = "eyJhbGciOiJub25lIiwidHlwIjoiSldUIn0.eyJ1c2VybmFtZSI6ImFkbWluIn0.";

        assert_eq!(
            verify_token(token, &security()),
            Err(VerificationFailure::Malformed)
        );
    }

    #[test]
    fn test_other_hmac_variants_are_accepted() {
        let security = security();
        for alg in [Algorithm::HS384, Algorithm::HS512] {
            let token = mint_token_with(alg, &json!({"username": "admin"}), &security.jwt_secret);
            assert_eq!(verify_token(&token, &security).unwrap().username, "admin");
        }
    }

    proptest! {
        #[test]
        fn prop_username_survives_verification(username in "\\PC{1,40}") {
            let security = security();
            let token = token_for(&username, &security);

            let claims = verify_token(&token, &security).unwrap();

            prop_assert_eq!(claims.username.as_bytes(), username.as_bytes());
        }

        #[test]
        fn prop_foreign_secret_is_bad_signature(
            username in "[a-z]{1,16}",
            secret in "[A-Za-z0-9]{8,32}",
        ) {
            prop_assume!(secret != "test_secret_key_for_testing_purposes_only");
            let token = token_for(&username, &SecurityConfig::new(secret.as_bytes()));

            prop_assert_eq!(
                verify_token(&token, &security()),
                Err(VerificationFailure::BadSignature)
            );
        }
    }
}
