//! Exception reporting capability

use crate::error::CourierError;
use crate::metrics::ReporterMetrics;

/// Sink for failures the client recovers from but that someone should see.
pub trait ExceptionReporter: Send + Sync {
    fn report_exception(&self, error: &CourierError);
}

/// Reports exceptions as `tracing` error events.
///
/// With OTLP export enabled these end up at the collector.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl ExceptionReporter for TracingReporter {
    fn report_exception(&self, error: &CourierError) {
        ReporterMetrics::record_reported(error.kind());
        tracing::error!(
            kind = error.kind(),
            error = %error,
            "Reported exception"
        );
    }
}
