//! Prometheus metrics for the Courier client.
//!
//! - Template loads by source (cache, remote, fallback)
//! - Template resolution failures
//! - Send outcomes
//! - Exceptions handed to the reporter

mod helpers;

pub use helpers::{encode_metrics, ReporterMetrics, SendMetrics, TemplateMetrics};

use lazy_static::lazy_static;
use prometheus::{register_int_counter, register_int_counter_vec, IntCounter, IntCounterVec};

/// Prefix for all metrics
const METRIC_PREFIX: &str = "courier";

lazy_static! {
    /// Template sets loaded, by source
    pub static ref TEMPLATE_LOADS_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_template_loads_total", METRIC_PREFIX),
        "Template sets loaded, labelled by source",
        &["source"]
    ).unwrap();

    /// Failed template resolutions, by error kind
    pub static ref TEMPLATE_RESOLUTION_FAILURES_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_template_resolution_failures_total", METRIC_PREFIX),
        "Template resolutions that failed",
        &["kind"]
    ).unwrap();

    /// Send requests, by outcome
    pub static ref SEND_REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_send_requests_total", METRIC_PREFIX),
        "Send requests issued, labelled by outcome",
        &["outcome"]
    ).unwrap();

    /// Send requests that carried an attachment
    pub static ref SEND_ATTACHMENTS_TOTAL: IntCounter = register_int_counter!(
        format!("{}_send_attachments_total", METRIC_PREFIX),
        "Send requests that carried an attachment"
    ).unwrap();

    /// Exceptions passed to the exception reporter
    pub static ref REPORTED_EXCEPTIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_reported_exceptions_total", METRIC_PREFIX),
        "Exceptions passed to the exception reporter",
        &["kind"]
    ).unwrap();
}
