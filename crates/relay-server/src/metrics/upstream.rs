//! Upstream call metrics.

use metrics::{counter, histogram};
use relay_core::HttpMethod;
use std::time::Duration;

/// Resultado de una llamada al upstream, usado como label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamOutcome {
    Success,
    Failure,
}

impl UpstreamOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpstreamOutcome::Success => "success",
            UpstreamOutcome::Failure => "failure",
        }
    }
}

/// Registra una llamada al upstream.
pub fn record_upstream_call(method: HttpMethod, outcome: UpstreamOutcome, duration: Duration) {
    counter!(
        "relay_upstream_requests_total",
        "method" => method.as_str(),
        "outcome" => outcome.as_str()
    )
    .increment(1);

    histogram!("relay_upstream_request_seconds", "method" => method.as_str())
        .record(duration.as_secs_f64());
}

/// Registra las metricas del upstream
pub fn register_upstream_metrics() {
    metrics::describe_counter!(
        "relay_upstream_requests_total",
        "Requests forwarded to the upstream host on cache miss"
    );
    metrics::describe_histogram!(
        "relay_upstream_request_seconds",
        "Upstream request duration in seconds"
    );
}
