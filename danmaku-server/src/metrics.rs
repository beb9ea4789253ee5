//! Prometheus-compatible metrics endpoint

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use crate::state::AppState;

/// Metrics collector
#[derive(Debug)]
pub struct Metrics {
    /// Server start time
    start_time: Instant,
    /// Total requests processed
    request_count: RwLock<u64>,
    /// Conversions by output format
    conversions_by_format: RwLock<HashMap<String, u64>>,
    /// Total comment records decoded
    records_decoded: RwLock<u64>,
    /// Total request body bytes received
    bytes_received: RwLock<u64>,
    /// Requests refused because of an unusable date/hour filter
    filter_rejections: RwLock<u64>,
    /// Errors by type
    errors_by_type: RwLock<HashMap<String, u64>>,
}

impl Metrics {
    /// Create new metrics collector
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            request_count: RwLock::new(0),
            conversions_by_format: RwLock::new(HashMap::new()),
            records_decoded: RwLock::new(0),
            bytes_received: RwLock::new(0),
            filter_rejections: RwLock::new(0),
            errors_by_type: RwLock::new(HashMap::new()),
        }
    }

    pub fn record_request(&self) {
        *self.request_count.write() += 1;
    }

    /// Record a finished conversion of `bytes` input into `records` comments
    pub fn record_conversion(&self, format: &str, bytes: u64, records: u64) {
        *self
            .conversions_by_format
            .write()
            .entry(format.to_string())
            .or_insert(0) += 1;
        *self.bytes_received.write() += bytes;
        *self.records_decoded.write() += records;
    }

    pub fn record_filter_rejection(&self) {
        *self.filter_rejections.write() += 1;
    }

    /// Record error
    pub fn record_error(&self, error_type: &str) {
        *self
            .errors_by_type
            .write()
            .entry(error_type.to_string())
            .or_insert(0) += 1;
    }

    /// Get uptime in seconds
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Export metrics in Prometheus format
    pub fn export_prometheus(&self) -> String {
        let mut output = String::new();

        output.push_str("# HELP danmaku_server_uptime_seconds Server uptime in seconds\n");
        output.push_str("# TYPE danmaku_server_uptime_seconds counter\n");
        output.push_str(&format!(
            "danmaku_server_uptime_seconds {}\n",
            self.uptime_secs()
        ));

        output.push_str("\n# HELP danmaku_requests_total Total number of HTTP requests\n");
        output.push_str("# TYPE danmaku_requests_total counter\n");
        output.push_str(&format!(
            "danmaku_requests_total {}\n",
            *self.request_count.read()
        ));

        output.push_str("\n# HELP danmaku_conversions_total Conversions by output format\n");
        output.push_str("# TYPE danmaku_conversions_total counter\n");
        let mut formats: Vec<_> = self
            .conversions_by_format
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), *v))
            .collect();
        formats.sort();
        for (format, count) in formats {
            output.push_str(&format!(
                "danmaku_conversions_total{{format=\"{}\"}} {}\n",
                format, count
            ));
        }

        output.push_str("\n# HELP danmaku_records_decoded_total Total comment records decoded\n");
        output.push_str("# TYPE danmaku_records_decoded_total counter\n");
        output.push_str(&format!(
            "danmaku_records_decoded_total {}\n",
            *self.records_decoded.read()
        ));

        output.push_str("\n# HELP danmaku_bytes_received_total Total request body bytes\n");
        output.push_str("# TYPE danmaku_bytes_received_total counter\n");
        output.push_str(&format!(
            "danmaku_bytes_received_total {}\n",
            *self.bytes_received.read()
        ));

        output.push_str(
            "\n# HELP danmaku_filter_rejections_total Requests with an invalid date/hour filter\n",
        );
        output.push_str("# TYPE danmaku_filter_rejections_total counter\n");
        output.push_str(&format!(
            "danmaku_filter_rejections_total {}\n",
            *self.filter_rejections.read()
        ));

        output.push_str("\n# HELP danmaku_errors_total Total errors by type\n");
        output.push_str("# TYPE danmaku_errors_total counter\n");
        for (error_type, count) in self.errors_by_type.read().iter() {
            output.push_str(&format!(
                "danmaku_errors_total{{type=\"{}\"}} {}\n",
                error_type, count
            ));
        }

        output
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Metrics endpoint handler
pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> Response {
    let prometheus_output = state.metrics.export_prometheus();

    (
        StatusCode::OK,
        [("Content-Type", "text/plain; version=0.0.4")],
        prometheus_output,
    )
        .into_response()
}
