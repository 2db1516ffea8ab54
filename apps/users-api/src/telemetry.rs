//! Process-wide log output for the server binary.

use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, prelude::*, EnvFilter, Layer};

/// Filter used when `RUST_LOG` is unset, blank or unparsable.
pub const DEFAULT_FILTER: &str = "info,actix_web=info,sqlx=warn,sea_orm=warn";

pub fn env_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// One JSON object per line.
///
/// Events carry the enclosing `request` span (see `TraceSpan`), so logs from
/// handlers and repositories include the request's `trace_id` without each
/// call site adding it.
pub fn json_layer<S, W>(writer: W) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    fmt::layer()
        .with_target(false)
        .with_ansi(false)
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(writer)
}

/// Install the global subscriber: JSON to stdout, filtered by `RUST_LOG`.
pub fn init_tracing() -> Result<(), TryInitError> {
    let directives = std::env::var("RUST_LOG").ok();

    tracing_subscriber::registry()
        .with(env_filter(directives.as_deref()))
        .with(json_layer(std::io::stdout))
        .try_init()
}
