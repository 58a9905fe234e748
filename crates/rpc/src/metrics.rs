use prometheus::{CounterVec, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder};
use std::sync::Arc;

/// Metrics collector for the HTTP server
#[derive(Clone)]
pub struct Metrics {
    registry: Arc<Registry>,

    // Record lifecycle metrics
    pub records_created: CounterVec,
    pub records_deleted: CounterVec,

    // Association metrics
    pub association_ops: CounterVec,

    // Performance metrics
    pub request_duration: HistogramVec,
}

impl Metrics {
    /// Create a new metrics collector
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let records_created = CounterVec::new(
            Opts::new(
                "repdesk_records_created_total",
                "Total number of records created",
            ),
            &["entity"],
        )?;
        registry.register(Box::new(records_created.clone()))?;

        let records_deleted = CounterVec::new(
            Opts::new(
                "repdesk_records_deleted_total",
                "Total number of records deleted",
            ),
            &["entity"],
        )?;
        registry.register(Box::new(records_deleted.clone()))?;

        let association_ops = CounterVec::new(
            Opts::new(
                "repdesk_association_ops_total",
                "Total number of association operations",
            ),
            &["op"],
        )?;
        registry.register(Box::new(association_ops.clone()))?;

        let request_duration = HistogramVec::new(
            HistogramOpts::new(
                "repdesk_request_duration_seconds",
                "Request duration in seconds",
            ),
            &["endpoint", "method"],
        )?;
        registry.register(Box::new(request_duration.clone()))?;

        Ok(Self {
            registry: Arc::new(registry),
            records_created,
            records_deleted,
            association_ops,
            request_duration,
        })
    }

    /// Export metrics in Prometheus format
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        encoder.encode_to_string(&metric_families)
    }

    /// Record a created record
    pub fn record_created(&self, entity: &str) {
        self.records_created.with_label_values(&[entity]).inc();
    }

    /// Record a deleted record
    pub fn record_deleted(&self, entity: &str) {
        self.records_deleted.with_label_values(&[entity]).inc();
    }

    /// Record an assign/unassign/transfer operation
    pub fn record_association_op(&self, op: &str) {
        self.association_ops.with_label_values(&[op]).inc();
    }

    /// Record a request duration observation
    pub fn observe_request(&self, endpoint: &str, method: &str, seconds: f64) {
        self.request_duration
            .with_label_values(&[endpoint, method])
            .observe(seconds);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new().expect("Failed to create metrics")
    }
}
