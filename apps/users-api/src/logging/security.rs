//! Security event logging.
//!
//! Each event carries a stable `event` field so alerting can match on it.
//! Caller-supplied values are passed through [`Redacted`].

use tracing::warn;

use crate::auth::jwt::VerificationFailure;
use crate::logging::pii::Redacted;
use crate::trace_ctx;

/// A protected path was requested without a usable bearer credential.
pub fn credential_missing(path: &str, authorization: Option<&str>) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_CREDENTIAL_MISSING",
        %trace_id,
        path = %Redacted(path),
        header_present = authorization.is_some(),
        "Authentication failure"
    );
}

/// A bearer token was presented but did not verify.
pub fn credential_invalid(path: &str, kind: VerificationFailure) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_CREDENTIAL_INVALID",
        %trace_id,
        path = %Redacted(path),
        reason = kind.as_str(),
        "Authentication failure"
    );
}

/// An authenticated caller asked for a record they do not own.
pub fn access_denied(subject: &str, requested: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_ACCESS_DENIED",
        %trace_id,
        subject = %Redacted(subject),
        requested = %Redacted(requested),
        "Authorization failure"
    );
}
