//! Prometheus metrics collection for registra.
//!
//! Tracks the decision paths of the authorization core: edit verdicts by
//! outcome, denials by code, lookup misses, token classifications, and
//! decision latency. The embedding application exposes
//! [`gather_metrics`] output on its own scrape endpoint.

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};
use std::sync::OnceLock;

/// Global Prometheus registry for all metrics.
pub static REGISTRY: OnceLock<Registry> = OnceLock::new();

pub fn registry() -> &'static Registry {
    REGISTRY.get_or_init(Registry::new)
}

// ========================================================================
// Counters (monotonic increasing)
// ========================================================================

/// Edit authorization verdicts by outcome ("allowed" / "denied").
pub static EDIT_DECISIONS: OnceLock<IntCounterVec> = OnceLock::new();

/// Edit denials by stable denial code.
pub static EDIT_DENIALS: OnceLock<IntCounterVec> = OnceLock::new();

/// Item lookups that resolved to not-found (including remapped
/// out-of-range identifiers and visibility misses).
pub static LOOKUPS_NOT_FOUND: OnceLock<IntCounter> = OnceLock::new();

/// Token classifications by resolved token type.
pub static TOKEN_CLASSIFICATIONS: OnceLock<IntCounterVec> = OnceLock::new();

/// Ownerships claimed through the claim shortcut.
pub static OWNERSHIPS_CLAIMED: OnceLock<IntCounter> = OnceLock::new();

// ========================================================================
// Histograms
// ========================================================================

/// Decision path latency by operation.
pub static DECISION_LATENCY: OnceLock<HistogramVec> = OnceLock::new();

/// Initialize the Prometheus metrics registry.
///
/// Must be called once at startup before any metrics are recorded.
pub fn init() {
    let r = registry();

    // Helper macro to register metric
    macro_rules! register {
        ($metric:ident, $init:expr) => {
            let m = $init.expect(concat!(stringify!($metric), " creation failed"));
            if let Err(e) = r.register(Box::new(m.clone())) {
                tracing::warn!(error = %e, concat!("Failed to register metric ", stringify!($metric)));
            }
            let _ = $metric.set(m);
        };
    }

    register!(
        EDIT_DECISIONS,
        IntCounterVec::new(
            Opts::new("registra_edit_decisions_total", "Edit verdicts by outcome"),
            &["outcome"]
        )
    );
    register!(
        EDIT_DENIALS,
        IntCounterVec::new(
            Opts::new("registra_edit_denials_total", "Edit denials by code"),
            &["code"]
        )
    );
    register!(
        LOOKUPS_NOT_FOUND,
        IntCounter::new(
            "registra_lookups_not_found_total",
            "Item lookups resolving to not-found"
        )
    );
    register!(
        TOKEN_CLASSIFICATIONS,
        IntCounterVec::new(
            Opts::new(
                "registra_token_classifications_total",
                "Token classifications by token type"
            ),
            &["token_type"]
        )
    );
    register!(
        OWNERSHIPS_CLAIMED,
        IntCounter::new(
            "registra_ownerships_claimed_total",
            "Ownerships claimed via the claim shortcut"
        )
    );
    register!(
        DECISION_LATENCY,
        HistogramVec::new(
            HistogramOpts::new(
                "registra_decision_duration_seconds",
                "Decision path latency by operation"
            )
            .buckets(vec![0.00005, 0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5]),
            &["operation"]
        )
    );
}

/// Gather all metrics and encode them in Prometheus text format.
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = registry().gather();
    let mut buffer = vec![];
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode Prometheus metrics");
        return String::new();
    }
    match String::from_utf8(buffer) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "Prometheus metrics were not valid UTF-8");
            String::new()
        }
    }
}

// ============================================================================
// Helper functions for decision-path metric updates
// ============================================================================

/// Record an edit verdict outcome ("allowed" or "denied").
#[inline]
pub fn record_decision(outcome: &str) {
    if let Some(c) = EDIT_DECISIONS.get() {
        c.with_label_values(&[outcome]).inc();
    }
}

/// Record an edit denial by code.
#[inline]
pub fn record_denial(code: &str) {
    if let Some(c) = EDIT_DENIALS.get() {
        c.with_label_values(&[code]).inc();
    }
}

/// Record a lookup that resolved to not-found.
#[inline]
pub fn record_lookup_not_found() {
    if let Some(c) = LOOKUPS_NOT_FOUND.get() {
        c.inc();
    }
}

/// Record a token classification by resolved type.
#[inline]
pub fn record_token_classification(token_type: &str) {
    if let Some(c) = TOKEN_CLASSIFICATIONS.get() {
        c.with_label_values(&[token_type]).inc();
    }
}

/// Record an ownership claimed through the claim shortcut.
#[inline]
pub fn record_ownership_claimed() {
    if let Some(c) = OWNERSHIPS_CLAIMED.get() {
        c.inc();
    }
}

/// Record a decision-path operation with latency.
#[inline]
pub fn record_operation(operation: &str, duration_secs: f64) {
    if let Some(h) = DECISION_LATENCY.get() {
        h.with_label_values(&[operation]).observe(duration_secs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_lifecycle() {
        init();

        record_decision("denied");
        record_denial("not_owner");
        record_operation("authorize_edit", 0.001);

        let output = gather_metrics();
        assert!(output.contains("registra_edit_decisions_total"));
        assert!(output.contains("registra_edit_denials_total"));
    }
}
