//! Prometheus metrics for the game server.
//!
//! Counters are recorded unconditionally; they only leave the process when
//! [`init_metrics`] has installed the exporter. Without it the `metrics`
//! macros are no-ops.
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use c4_server::metrics;
//! use std::net::SocketAddr;
//!
//! let addr: SocketAddr = "127.0.0.1:9090".parse().unwrap();
//! metrics::init_metrics(addr).unwrap();
//!
//! metrics::http_requests_total("POST", "/connect4/check_move", 200);
//! ```

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

/// Initialize Prometheus metrics exporter.
///
/// Metrics will be available at `http://<addr>/metrics`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), String> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| format!("Failed to install Prometheus exporter: {}", e))
}

// ============================================================================
// HTTP Metrics
// ============================================================================

/// Record HTTP request.
pub fn http_requests_total(method: &str, path: &str, status: u16) {
    metrics::counter!("http_requests_total",
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// Record HTTP request duration in milliseconds.
pub fn http_request_duration_ms(method: &str, path: &str, duration_ms: f64) {
    metrics::histogram!("http_request_duration_ms",
        "method" => method.to_string(),
        "path" => path.to_string()
    )
    .record(duration_ms);
}

// ============================================================================
// Game Metrics
// ============================================================================

/// Count a registration attempt. `result` is `"ok"` or an error code.
pub fn registrations_total(result: &str) {
    metrics::counter!("connect4_registrations_total",
        "result" => result.to_string()
    )
    .increment(1);
}

/// Count a move attempt. `result` is `"ok"` or an error code.
pub fn moves_total(result: &str) {
    metrics::counter!("connect4_moves_total",
        "result" => result.to_string()
    )
    .increment(1);
}

/// Count a finished game by outcome (`"x"`, `"o"` or `"draw"`).
pub fn games_finished_total(outcome: &str) {
    metrics::counter!("connect4_games_finished_total",
        "outcome" => outcome.to_string()
    )
    .increment(1);
}
