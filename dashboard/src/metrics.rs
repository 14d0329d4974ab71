use lazy_static::lazy_static;
use prometheus::{Counter, Encoder, Gauge, Histogram, HistogramOpts, Opts, Registry, TextEncoder};
use tracing::warn;

lazy_static! {
    pub static ref REGISTRY: Registry = Registry::new();
    pub static ref FETCH_TOTAL: Counter = Counter::with_opts(Opts::new(
        "dashboard_fetch_total",
        "Total telemetry fetches attempted"
    ))
    .unwrap();
    pub static ref FETCH_FAILURES_TOTAL: Counter = Counter::with_opts(Opts::new(
        "dashboard_fetch_failures_total",
        "Total telemetry fetches that failed"
    ))
    .unwrap();
    pub static ref DISCARDED_FETCHES_TOTAL: Counter = Counter::with_opts(Opts::new(
        "dashboard_discarded_fetches_total",
        "Fetches that resolved after the poller was stopped"
    ))
    .unwrap();
    pub static ref FETCH_LATENCY_SECONDS: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "dashboard_fetch_latency_seconds",
            "Time taken to fetch a telemetry snapshot"
        )
        .buckets(vec![
            0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0
        ])
    )
    .unwrap();
    pub static ref DEVICES: Gauge = Gauge::with_opts(Opts::new(
        "dashboard_devices",
        "Devices in the current snapshot"
    ))
    .unwrap();
}

pub fn init_metrics() {
    let collectors: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(FETCH_TOTAL.clone()),
        Box::new(FETCH_FAILURES_TOTAL.clone()),
        Box::new(DISCARDED_FETCHES_TOTAL.clone()),
        Box::new(FETCH_LATENCY_SECONDS.clone()),
        Box::new(DEVICES.clone()),
    ];

    for collector in collectors {
        if let Err(e) = REGISTRY.register(collector) {
            warn!("Failed to register metric: {}", e);
        }
    }
}

pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        warn!("Failed to encode metrics: {}", e);
    }
    String::from_utf8_lossy(&buffer).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gather_contains_registered_metrics() {
        init_metrics();
        // Registering twice is tolerated
        init_metrics();
        FETCH_TOTAL.inc();

        let output = gather_metrics();
        assert!(output.contains("dashboard_fetch_total"));
        assert!(output.contains("dashboard_devices"));
    }
}
