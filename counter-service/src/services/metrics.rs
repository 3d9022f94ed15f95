//! Prometheus metrics for counter-service.

use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};
use std::sync::OnceLock;

// Global registry
pub static REGISTRY: OnceLock<Registry> = OnceLock::new();

pub static COUNTER_REQUESTS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();
pub static PROVIDER_LATENCY_SECONDS: OnceLock<HistogramVec> = OnceLock::new();
pub static PROVIDER_ERRORS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();

/// Initialize all metrics. Safe to call more than once; only the first call
/// registers anything.
pub fn init_metrics() {
    if REGISTRY.get().is_some() {
        return;
    }

    let registry = Registry::new();

    let requests_total = match IntCounterVec::new(
        Opts::new("counter_requests_total", "Total counter lookups by outcome"),
        &["outcome"],
    ) {
        Ok(m) => m,
        Err(e) => {
            tracing::error!(error = %e, "Failed to create counter_requests_total metric");
            return;
        }
    };

    let provider_latency = match HistogramVec::new(
        HistogramOpts::new(
            "counter_provider_latency_seconds",
            "Text provider latency in seconds",
        )
        .buckets(vec![0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0, 60.0, 120.0]),
        &["provider", "model"],
    ) {
        Ok(m) => m,
        Err(e) => {
            tracing::error!(error = %e, "Failed to create counter_provider_latency_seconds metric");
            return;
        }
    };

    let provider_errors = match IntCounterVec::new(
        Opts::new("counter_provider_errors_total", "Total text provider errors"),
        &["provider", "error_type"],
    ) {
        Ok(m) => m,
        Err(e) => {
            tracing::error!(error = %e, "Failed to create counter_provider_errors_total metric");
            return;
        }
    };

    let registered = registry
        .register(Box::new(requests_total.clone()))
        .and_then(|_| registry.register(Box::new(provider_latency.clone())))
        .and_then(|_| registry.register(Box::new(provider_errors.clone())));
    if let Err(e) = registered {
        tracing::error!(error = %e, "Failed to register metrics");
        return;
    }

    let _ = REGISTRY.set(registry);
    let _ = COUNTER_REQUESTS_TOTAL.set(requests_total);
    let _ = PROVIDER_LATENCY_SECONDS.set(provider_latency);
    let _ = PROVIDER_ERRORS_TOTAL.set(provider_errors);

    tracing::info!("Prometheus metrics initialized");
}

/// Get metrics in Prometheus text format.
pub fn get_metrics() -> String {
    let mut buffer = Vec::new();
    let encoder = TextEncoder::new();

    let registry = match REGISTRY.get() {
        Some(r) => r,
        None => {
            tracing::error!("Metrics registry not initialized");
            return "# Metrics registry not initialized\n".to_string();
        }
    };

    let metric_families = registry.gather();

    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode metrics");
        return format!("# Failed to encode metrics: {}\n", e);
    }

    match String::from_utf8(buffer) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "Failed to convert metrics to UTF-8");
            format!("# Failed to convert metrics to UTF-8: {}\n", e)
        }
    }
}

/// Record a finished counter request (`ok`, `method_not_allowed`, ...).
pub fn record_request(outcome: &str) {
    if let Some(counter) = COUNTER_REQUESTS_TOTAL.get() {
        counter.with_label_values(&[outcome]).inc();
    }
}

/// Record provider latency.
pub fn record_provider_latency(provider: &str, model: &str, duration_secs: f64) {
    if let Some(histogram) = PROVIDER_LATENCY_SECONDS.get() {
        histogram
            .with_label_values(&[provider, model])
            .observe(duration_secs);
    }
}

/// Record a provider error.
pub fn record_provider_error(provider: &str, error_type: &str) {
    if let Some(counter) = PROVIDER_ERRORS_TOTAL.get() {
        counter.with_label_values(&[provider, error_type]).inc();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recorded_requests_show_up_in_output() {
        init_metrics();
        record_request("ok");
        record_provider_latency("mock", "gemini-2.5-flash", 0.2);
        record_provider_error("mock", "api_error");

        let output = get_metrics();
        assert!(output.contains("counter_requests_total"));
        assert!(output.contains("counter_provider_latency_seconds"));
        assert!(output.contains("counter_provider_errors_total"));
    }
}
