//! Metrics module
//!
//! Prometheus counters for step outcomes and HTTP traffic. The CLI can dump
//! them as a text exposition file for a node-exporter textfile collector.

use lazy_static::lazy_static;
use prometheus::{
    register_counter_vec, register_histogram_vec, CounterVec, Encoder, HistogramVec, TextEncoder,
};
use std::path::Path;

lazy_static! {
    pub static ref STEPS_TOTAL: CounterVec = register_counter_vec!(
        "foody_steps_total",
        "Harness steps by outcome",
        &["step", "outcome"]
    ).unwrap();

    pub static ref HTTP_REQUESTS_TOTAL: CounterVec = register_counter_vec!(
        "foody_http_requests_total",
        "HTTP requests issued against the Foody API",
        &["method", "status"]
    ).unwrap();

    pub static ref HTTP_REQUEST_DURATION: HistogramVec = register_histogram_vec!(
        "foody_http_request_duration_seconds",
        "HTTP request duration in seconds",
        &["method"],
        vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    ).unwrap();
}

/// Record a finished step
pub fn record_step(step: &str, outcome: &str) {
    STEPS_TOTAL.with_label_values(&[step, outcome]).inc();
}

/// Record a completed HTTP request
pub fn record_http_request(method: &str, status: u16, duration_secs: f64) {
    let status = status.to_string();
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[method, status.as_str()])
        .inc();
    HTTP_REQUEST_DURATION
        .with_label_values(&[method])
        .observe(duration_secs);
}

/// Render all registered metrics in the Prometheus text format
pub fn render() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    encoder.encode(&prometheus::gather(), &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
}

/// Write the text exposition to `path`
pub fn write_textfile<P: AsRef<Path>>(path: P) -> std::io::Result<()> {
    let text = render().map_err(|e| std::io::Error::other(e.to_string()))?;
    std::fs::write(path, text)
}
