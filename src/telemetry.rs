//! Telemetry utilities: tracing initialization and decision timing.

use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber.
///
/// Respects `RUST_LOG`; defaults to `info`. Safe to call more than once
/// (subsequent calls are no-ops), so embedders and tests can both use it.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .try_init();
}

/// Guard for timing a decision-path operation.
///
/// Records operation latency when dropped.
pub struct DecisionTimer {
    operation: &'static str,
    start: Instant,
}

impl DecisionTimer {
    /// Start timing an operation.
    pub fn new(operation: &'static str) -> Self {
        Self {
            operation,
            start: Instant::now(),
        }
    }
}

impl Drop for DecisionTimer {
    fn drop(&mut self) {
        let duration = self.start.elapsed().as_secs_f64();
        crate::metrics::record_operation(self.operation, duration);
    }
}

/// Standardized span constructors for decision-path observability.
pub mod spans {
    use tracing::{Span, info_span};

    /// Create a span for one request's edit-authorization decision.
    pub fn request(path: &str, actor: Option<i64>) -> Span {
        if let Some(actor) = actor {
            info_span!("request", path = %path, actor = actor)
        } else {
            info_span!("request", path = %path)
        }
    }

    /// Create a span for resolving an item by request identifier.
    pub fn lookup(identifier: &str) -> Span {
        info_span!("lookup", identifier = %identifier)
    }
}
