//! Test logging initialization, shared by unit and integration tests.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Filter directive from `TEST_LOG`, then `RUST_LOG`, then `"warn"`.
fn filter_directive(lookup: impl Fn(&str) -> Option<String>) -> String {
    lookup("TEST_LOG")
        .or_else(|| lookup("RUST_LOG"))
        .unwrap_or_else(|| "warn".to_string())
}

/// Install a test-writer subscriber once per process.
///
/// Safe to call from every test and from `#[ctor]` hooks; later calls are
/// no-ops, and an already installed global subscriber is left alone.
pub fn init() {
    INITIALIZED.get_or_init(|| {
        let directive = filter_directive(|name| std::env::var(name).ok());

        fmt()
            .with_env_filter(EnvFilter::new(directive))
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_precedence() {
        let both = |name: &str| match name {
            "TEST_LOG" => Some("debug".to_string()),
            "RUST_LOG" => Some("info".to_string()),
            _ => None,
        };
        assert_eq!(filter_directive(both), "debug");

        let rust_only = |name: &str| (name == "RUST_LOG").then(|| "info".to_string());
        assert_eq!(filter_directive(rust_only), "info");

        assert_eq!(filter_directive(|_| None), "warn");
    }

    #[test]
    fn test_init_is_idempotent() {
        init();
        init();
    }
}
