//! Error codes for the users API.
//!
//! Every code that can appear in a Problem Details body is declared here.
//! Add new codes here; never pass ad-hoc strings as error codes.

use core::fmt;

/// Centralized error codes. Each variant maps to the SCREAMING_SNAKE_CASE
/// string that appears in HTTP responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication & Authorization
    /// Missing or malformed Bearer credential
    UnauthorizedMissingBearer,
    /// Bearer token failed verification
    UnauthorizedInvalidJwt,
    /// Authenticated caller may not access the resource
    Forbidden,

    // Resource Not Found
    /// No user record for the requested username
    UserNotFound,
    /// Generic not found
    NotFound,

    // System Errors
    /// Storage returned an unexpected error
    DbError,
    /// Storage is unreachable
    DbUnavailable,
    /// Internal server error
    InternalError,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::UnauthorizedMissingBearer => "UNAUTHORIZED_MISSING_BEARER",
            Self::UnauthorizedInvalidJwt => "UNAUTHORIZED_INVALID_JWT",
            Self::Forbidden => "FORBIDDEN",

            Self::UserNotFound => "USER_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::InternalError => "INTERNAL_ERROR",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
