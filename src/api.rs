//! # HTTP surface
//! Thin JSON layer over the reconstruction engine. Handlers parse and
//! validate input, read the clock once, then hand everything to the pure
//! `WeeklyAssembler`.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use metrics::{counter, gauge, histogram};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use crate::config::GraphConfig;
use crate::error::TimelineError;
use crate::event::{self, Event, RawEvent};
use crate::metrics::{
    Metrics, BUILD_MS, EVENTS_TOTAL, LAST_BUILD_TS, REJECTED_TOTAL, REQUESTS_TOTAL,
};
use crate::sample::sample_events;
use crate::timeline::{Day, WeekSummary, WeeklyAssembler};

#[derive(Clone)]
pub struct AppState {
    assembler: Arc<WeeklyAssembler>,
    config: Arc<GraphConfig>,
}

impl AppState {
    pub fn new(config: GraphConfig) -> anyhow::Result<Self> {
        let assembler = config.assembler()?;
        Ok(Self {
            assembler: Arc::new(assembler),
            config: Arc::new(config),
        })
    }

    /// Config from `GraphConfig::load_default` (env + files + defaults).
    pub fn from_env() -> anyhow::Result<Self> {
        Self::new(GraphConfig::load_default()?)
    }
}

/// Build the router. `/metrics` is mounted only with `DEBUG_ROUTES=1`.
pub fn create_router(state: AppState) -> Router {
    let router = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/week-timeline", post(week_timeline))
        .route("/sample-week", get(sample_week))
        .layer(CorsLayer::very_permissive())
        .with_state(state);

    if debug_routes_enabled() {
        match Metrics::init() {
            Ok(m) => return router.merge(m.router()),
            Err(e) => tracing::warn!(target: "api", error = %e, "metrics disabled"),
        }
    }
    router
}

fn debug_routes_enabled() -> bool {
    std::env::var("DEBUG_ROUTES").ok().as_deref() == Some("1")
}

// ---- request / response shapes ----

#[derive(Debug, Deserialize)]
pub struct WeekRequest {
    pub monitor_id: i64,
    /// Local Monday 00:00 as an RFC 3339 instant, e.g. `2026-02-08T22:00:00Z`.
    pub week_start: String,
    #[serde(default)]
    pub events: Vec<RawEvent>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WeekResponse {
    pub monitor_id: i64,
    pub week_start: DateTime<Utc>,
    pub days: Vec<Day>,
    pub summary: WeekSummary,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
}

/// Boundary rejection, always a 400.
#[derive(Debug)]
pub struct ApiError(TimelineError);

impl From<TimelineError> for ApiError {
    fn from(e: TimelineError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        counter!(REJECTED_TOTAL).increment(1);
        let body = ErrorBody {
            code: self.0.code(),
            message: self.0.to_string(),
        };
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

// ---- handlers ----

async fn root(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "service": state.config.service_name,
        "version": state.config.version,
        "timezone": state.config.timezone,
        "endpoints": {
            "POST /week-timeline": "raw events -> seven-day timeline",
            "GET  /sample-week": "timeline for the built-in fixture week",
            "GET  /health": "health check",
        },
    }))
}

#[derive(Debug, Serialize)]
struct HealthOut {
    status: &'static str,
    service: String,
    version: String,
    timestamp: DateTime<Utc>,
    now_local: String,
}

async fn health(State(state): State<AppState>) -> Json<HealthOut> {
    let now = Utc::now();
    let local = state.assembler.clock().local(now);
    Json(HealthOut {
        status: "healthy",
        service: state.config.service_name.clone(),
        version: state.config.version.clone(),
        timestamp: now,
        now_local: local.format("%Y-%m-%d %H:%M:%S %Z").to_string(),
    })
}

async fn week_timeline(
    State(state): State<AppState>,
    Json(req): Json<WeekRequest>,
) -> Result<Json<WeekResponse>, ApiError> {
    counter!(REQUESTS_TOTAL, "endpoint" => "week_timeline").increment(1);

    let week_start = event::parse_instant("week_start", &req.week_start)?;
    let events = event::parse_all(&req.events)?;
    counter!(EVENTS_TOTAL).increment(events.len() as u64);

    Ok(Json(build(&state, req.monitor_id, &events, week_start)))
}

async fn sample_week(State(state): State<AppState>) -> Json<WeekResponse> {
    counter!(REQUESTS_TOTAL, "endpoint" => "sample_week").increment(1);

    let week_start = state.assembler.clock().current_week_start(Utc::now());
    let events = sample_events(week_start);
    Json(build(&state, 0, &events, week_start))
}

fn build(
    state: &AppState,
    monitor_id: i64,
    events: &[Event],
    week_start: DateTime<Utc>,
) -> WeekResponse {
    let now = Utc::now();
    let started = Instant::now();
    let week = state.assembler.assemble(events, week_start, now);
    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

    histogram!(BUILD_MS).record(elapsed_ms);
    gauge!(LAST_BUILD_TS).set(now.timestamp() as f64);
    tracing::debug!(
        target: "api",
        monitor_id,
        events = events.len(),
        outages = week.summary.outage_count,
        elapsed_ms,
        "week timeline built"
    );

    WeekResponse {
        monitor_id,
        week_start,
        days: week.days,
        summary: week.summary,
    }
}
