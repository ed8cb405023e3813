//! Prometheus metrics for the template service.
//!
//! This module provides metrics for monitoring template operations:
//! - Catalog metrics (active template count)
//! - Rendering metrics (previews by outcome, render latency)
//! - Validation metrics (coverage failures)
//! - Decode metrics (variables payloads that fell back to an empty set)

use lazy_static::lazy_static;
use prometheus::{
    register_histogram, register_int_counter, register_int_counter_vec, register_int_gauge,
    Encoder, Histogram, IntCounter, IntCounterVec, IntGauge, TextEncoder,
};

/// Prefix for all metrics
const METRIC_PREFIX: &str = "campus_templates";

lazy_static! {
    /// Number of templates currently in the catalog
    pub static ref TEMPLATES_ACTIVE: IntGauge = register_int_gauge!(
        format!("{}_active", METRIC_PREFIX),
        "Number of templates currently in the catalog"
    ).unwrap();

    /// Total previews rendered, by outcome (ok, missing_variables, not_found)
    pub static ref PREVIEWS_RENDERED_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_previews_rendered_total", METRIC_PREFIX),
        "Total previews rendered",
        &["outcome"]
    ).unwrap();

    /// Total validation checks that reported missing variables
    pub static ref VALIDATION_FAILURES_TOTAL: IntCounter = register_int_counter!(
        format!("{}_validation_failures_total", METRIC_PREFIX),
        "Total validation checks that reported missing variables"
    ).unwrap();

    /// Total variables payloads that could not be decoded and degraded to empty
    pub static ref VARIABLES_DECODE_FAILURES_TOTAL: IntCounter = register_int_counter!(
        format!("{}_variables_decode_failures_total", METRIC_PREFIX),
        "Total variables payloads that degraded to an empty set"
    ).unwrap();

    /// Preview rendering latency
    pub static ref RENDER_DURATION_SECONDS: Histogram = register_histogram!(
        format!("{}_render_duration_seconds", METRIC_PREFIX),
        "Preview rendering latency in seconds",
        vec![0.00001, 0.0001, 0.001, 0.01, 0.1, 1.0]
    ).unwrap();
}

/// Encode all registered metrics in Prometheus text exposition format
pub fn encode_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;

    String::from_utf8(buffer)
        .map_err(|e| prometheus::Error::Msg(format!("Metrics output was not UTF-8: {}", e)))
}
