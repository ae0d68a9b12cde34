use axum::{routing::get, Router};
use metrics::{describe_counter, describe_gauge, describe_histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

pub const REQUESTS_TOTAL: &str = "timeline_requests_total";
pub const EVENTS_TOTAL: &str = "timeline_events_total";
pub const REJECTED_TOTAL: &str = "timeline_rejected_total";
pub const BUILD_MS: &str = "timeline_build_ms";
pub const LAST_BUILD_TS: &str = "timeline_last_build_ts";

static HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

#[derive(Clone)]
pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Install the process-wide Prometheus recorder (once) and describe the
    /// timeline series so they show up on /metrics.
    pub fn init() -> anyhow::Result<Self> {
        let handle = HANDLE.get_or_try_init(|| {
            // Use default buckets to avoid API differences across crate versions.
            let handle = PrometheusBuilder::new().install_recorder()?;
            describe_series();
            Ok::<_, anyhow::Error>(handle)
        })?;
        Ok(Self {
            handle: handle.clone(),
        })
    }

    /// Returns a router exposing `/metrics` with the Prometheus exposition format.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}

fn describe_series() {
    describe_counter!(REQUESTS_TOTAL, "Week timelines requested, by endpoint.");
    describe_counter!(EVENTS_TOTAL, "Events received across all requests.");
    describe_counter!(REJECTED_TOTAL, "Requests rejected at the input boundary.");
    describe_histogram!(BUILD_MS, "Week reconstruction time in milliseconds.");
    describe_gauge!(LAST_BUILD_TS, "Unix ts of the last successful reconstruction.");
}
