// SPDX-FileCopyrightText: 2025 GameTip Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Prometheus metrics module
//!
//! Provides global metrics using the default Prometheus registry via macros and
//! an Axum-compatible metrics handler.

use std::sync::LazyLock;

use axum::{
    http::{StatusCode, header},
    response::Response,
};
use prometheus::{
    Encoder, HistogramVec, IntCounterVec, TextEncoder, register_histogram_vec,
    register_int_counter_vec,
};
use shared_types::Capability;

/// Total number of capability requests received, labeled by capability and chain.
pub static REQUESTS_BY_CAPABILITY: LazyLock<IntCounterVec> = LazyLock::new(|| {
    register_int_counter_vec!(
        "gateway_requests_total",
        "Total number of capability requests, labeled by capability and chain",
        &["capability", "chain"]
    )
    .expect("Failed to create gateway_requests_total counter vec")
});

/// Total number of responses served from the fallback generator.
pub static FALLBACK_RESPONSES: LazyLock<IntCounterVec> = LazyLock::new(|| {
    register_int_counter_vec!(
        "gateway_fallback_responses_total",
        "Total number of responses served with fallback provenance",
        &["capability", "chain"]
    )
    .expect("Failed to create gateway_fallback_responses_total counter vec")
});

/// Histogram for capability dispatch durations in seconds.
pub static DISPATCH_DURATION: LazyLock<HistogramVec> = LazyLock::new(|| {
    register_histogram_vec!(
        "gateway_dispatch_duration_seconds",
        "Capability dispatch durations in seconds, validation through normalization",
        &["capability"],
        vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]
    )
    .expect("Failed to create gateway dispatch duration histogram")
});

/// Increment the requests counter for a capability
pub fn inc_requests(capability: Capability, chain: &str) {
    REQUESTS_BY_CAPABILITY
        .with_label_values(&[&capability.to_string(), chain])
        .inc();
}

/// Increment the fallback counter for a capability
pub fn inc_fallback(capability: Capability, chain: &str) {
    FALLBACK_RESPONSES
        .with_label_values(&[&capability.to_string(), chain])
        .inc();
}

/// Observe the duration of one capability dispatch
pub fn observe_dispatch_duration(capability: Capability, duration_secs: f64) {
    DISPATCH_DURATION
        .with_label_values(&[&capability.to_string()])
        .observe(duration_secs);
}

/// Axum handler that exports metrics in Prometheus text format
///
/// # Panics
///
/// This function will panic if:
/// - The metrics encoder fails to encode the metrics data
/// - The UTF-8 conversion of the encoded buffer fails
/// - The HTTP response builder fails to create the response
pub async fn metrics_handler() -> Response<String> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = vec![];
    encoder
        .encode(&metric_families, &mut buffer)
        .expect("Failed to encode metrics");

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, encoder.format_type())
        .body(String::from_utf8(buffer).expect("metrics buffer should be valid UTF-8"))
        .expect("Failed to create metrics response")
}
