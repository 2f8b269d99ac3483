//! Metrics helper structs for convenient metric recording

use prometheus::{Encoder, TextEncoder};

use super::{
    REPORTED_EXCEPTIONS_TOTAL, SEND_ATTACHMENTS_TOTAL, SEND_REQUESTS_TOTAL, TEMPLATE_LOADS_TOTAL,
    TEMPLATE_RESOLUTION_FAILURES_TOTAL,
};

/// Encode all metrics to Prometheus text format
pub fn encode_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer).unwrap_or_default())
}

/// Helper struct for recording template metrics
pub struct TemplateMetrics;

impl TemplateMetrics {
    /// Template set read from the primary cache file
    pub fn record_cache_load() {
        TEMPLATE_LOADS_TOTAL.with_label_values(&["cache"]).inc();
    }

    /// Template set fetched from the remote listing
    pub fn record_remote_load() {
        TEMPLATE_LOADS_TOTAL.with_label_values(&["remote"]).inc();
    }

    /// Template set read from the fallback file
    pub fn record_fallback_load() {
        TEMPLATE_LOADS_TOTAL.with_label_values(&["fallback"]).inc();
    }

    pub fn record_resolution_failure(kind: &str) {
        TEMPLATE_RESOLUTION_FAILURES_TOTAL
            .with_label_values(&[kind])
            .inc();
    }
}

/// Helper struct for recording send metrics
pub struct SendMetrics;

impl SendMetrics {
    /// Request reached the API (any status)
    pub fn record_dispatched(with_attachment: bool) {
        SEND_REQUESTS_TOTAL.with_label_values(&["dispatched"]).inc();
        if with_attachment {
            SEND_ATTACHMENTS_TOTAL.inc();
        }
    }

    /// Request never got a response
    pub fn record_transport_error() {
        SEND_REQUESTS_TOTAL
            .with_label_values(&["transport_error"])
            .inc();
    }
}

/// Helper struct for recording reporter metrics
pub struct ReporterMetrics;

impl ReporterMetrics {
    pub fn record_reported(kind: &str) {
        REPORTED_EXCEPTIONS_TOTAL.with_label_values(&[kind]).inc();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_contains_recorded_metrics() {
        TemplateMetrics::record_cache_load();
        SendMetrics::record_dispatched(true);

        let output = encode_metrics().unwrap();
        assert!(output.contains("courier_template_loads_total"));
        assert!(output.contains("courier_send_requests_total"));
        assert!(output.contains("courier_send_attachments_total"));
    }
}
