use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Regex patterns used to scrub log output.
///
/// Every pattern is a literal checked by the tests below.
pub struct PiiRegexRegistry;

impl PiiRegexRegistry {
    /// `scheme://user:password@` credentials embedded in URLs
    pub fn url_credentials() -> &'static Regex {
        static URL_CREDENTIALS_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"([A-Za-z][A-Za-z0-9+.-]*://)[^/\s:@]+:[^/\s@]+@").unwrap()
        });
        &URL_CREDENTIALS_REGEX
    }

    /// Compact JWS: three base64url segments separated by dots
    pub fn jwt() -> &'static Regex {
        static JWT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"[A-Za-z0-9_-]{8,}\.[A-Za-z0-9_-]{8,}\.[A-Za-z0-9_-]*").unwrap()
        });
        &JWT_REGEX
    }

    pub fn email() -> &'static Regex {
        static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{1,}\b").unwrap()
        });
        &EMAIL_REGEX
    }

    /// IPv4 address with optional port
    pub fn ipv4_host() -> &'static Regex {
        static IPV4_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"\b(?:\d{1,3}\.){3}\d{1,3}(?::\d{1,5})?\b").unwrap()
        });
        &IPV4_REGEX
    }

    /// Opaque base64-like or hex runs (>= 16 chars)
    pub fn opaque_token() -> &'static Regex {
        static TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"\b[A-Za-z0-9+/]{16,}={0,2}\b").unwrap()
        });
        &TOKEN_REGEX
    }
}

/// Mask secrets and infrastructure details in free-form text.
///
/// URL credentials go first so the `password@host` part is not mistaken for
/// an email address; JWTs go before opaque tokens so they are reported as such.
pub fn redact(input: &str) -> String {
    let out = PiiRegexRegistry::url_credentials().replace_all(input, "${1}[REDACTED]@");
    let out = PiiRegexRegistry::jwt().replace_all(&out, "[REDACTED_JWT]");

    let out = PiiRegexRegistry::email().replace_all(&out, |caps: &regex::Captures| {
        let full_match = &caps[0];
        match full_match.split_once('@') {
            Some((local, domain)) => match local.chars().next() {
                Some(first) => format!("{first}***@{domain}"),
                None => format!("@{domain}"),
            },
            None => full_match.to_string(),
        }
    });

    let out = PiiRegexRegistry::ipv4_host().replace_all(&out, "[REDACTED_HOST]");

    PiiRegexRegistry::opaque_token()
        .replace_all(&out, "[REDACTED_TOKEN]")
        .to_string()
}

/// Redacts its contents when formatted, for use as a tracing field value.
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", redact(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", redact(self.0))
    }
}
