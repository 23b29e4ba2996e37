//! Metrics and observability utilities
//!
//! Prometheus metrics with standardized naming conventions.

use metrics::{counter, describe_counter, describe_histogram, histogram, Unit};
use std::time::Instant;

/// Metrics prefix for all Literatus metrics
pub const METRICS_PREFIX: &str = "literatus";

/// Histogram buckets for request latency (in seconds)
pub const LATENCY_BUCKETS: &[f64] = &[
    0.001, 0.005, 0.010, 0.025, 0.050, 0.100, 0.250, 0.500, 1.000, 2.500, 5.000,
];

/// Buckets for assistant call latency (upstream LLM calls are slow)
pub const ASSISTANT_BUCKETS: &[f64] = &[
    0.250, 0.500, 1.000, 2.000, 5.000, 10.00, 30.00, 60.00,
];

/// Register all metric descriptions
pub fn register_metrics() {
    describe_counter!(
        format!("{}_requests_total", METRICS_PREFIX),
        Unit::Count,
        "Total number of HTTP requests"
    );

    describe_histogram!(
        format!("{}_request_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "HTTP request latency in seconds"
    );

    describe_counter!(
        format!("{}_papers_created_total", METRICS_PREFIX),
        Unit::Count,
        "Total papers added to the library"
    );

    describe_counter!(
        format!("{}_papers_imported_total", METRICS_PREFIX),
        Unit::Count,
        "Total papers imported from PDF"
    );

    describe_counter!(
        format!("{}_papers_analyzed_total", METRICS_PREFIX),
        Unit::Count,
        "Total papers analyzed by the assistant"
    );

    describe_counter!(
        format!("{}_assistant_requests_total", METRICS_PREFIX),
        Unit::Count,
        "Total assistant API requests"
    );

    describe_histogram!(
        format!("{}_assistant_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "Assistant call latency in seconds"
    );

    describe_histogram!(
        format!("{}_graph_build_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "Relation graph build latency in seconds"
    );

    tracing::info!("Metrics registered");
}

/// Helper to record request metrics
pub struct RequestMetrics {
    start: Instant,
    endpoint: String,
    method: String,
}

impl RequestMetrics {
    /// Start tracking a request
    pub fn start(method: &str, endpoint: &str) -> Self {
        Self {
            start: Instant::now(),
            endpoint: endpoint.to_string(),
            method: method.to_string(),
        }
    }

    /// Record request completion
    pub fn finish(self, status: u16) {
        let duration = self.start.elapsed().as_secs_f64();

        counter!(
            format!("{}_requests_total", METRICS_PREFIX),
            "method" => self.method.clone(),
            "endpoint" => self.endpoint.clone(),
            "status" => status.to_string()
        )
        .increment(1);

        histogram!(
            format!("{}_request_duration_seconds", METRICS_PREFIX),
            "method" => self.method,
            "endpoint" => self.endpoint
        )
        .record(duration);
    }
}

/// Helper to record assistant call metrics
pub fn record_assistant_call(duration_secs: f64, provider: &str, operation: &str, success: bool) {
    let status = if success { "success" } else { "error" };

    counter!(
        format!("{}_assistant_requests_total", METRICS_PREFIX),
        "provider" => provider.to_string(),
        "operation" => operation.to_string(),
        "status" => status.to_string()
    )
    .increment(1);

    if success {
        histogram!(
            format!("{}_assistant_duration_seconds", METRICS_PREFIX),
            "provider" => provider.to_string(),
            "operation" => operation.to_string()
        )
        .record(duration_secs);
    }
}

/// Helper to record graph build metrics
pub fn record_graph_build(duration_secs: f64, node_count: usize, edge_count: usize) {
    histogram!(format!("{}_graph_build_duration_seconds", METRICS_PREFIX))
        .record(duration_secs);

    tracing::debug!(
        nodes = node_count,
        edges = edge_count,
        latency_secs = duration_secs,
        "Relation graph built"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latency_buckets_sorted() {
        for buckets in [LATENCY_BUCKETS, ASSISTANT_BUCKETS] {
            let mut prev = 0.0;
            for &bucket in buckets {
                assert!(bucket > prev);
                prev = bucket;
            }
        }
    }

    #[test]
    fn test_request_metrics() {
        let metrics = RequestMetrics::start("GET", "/v1/graph");
        std::thread::sleep(std::time::Duration::from_millis(5));
        metrics.finish(200);
        // Just verify it runs without panic
    }
}
