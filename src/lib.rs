// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod api;
pub mod config;
pub mod error;
pub mod event;
pub mod metrics;
pub mod sample;

// Interval reconstruction engine (clock, initial state, partition, segments, week)
pub mod timeline;

// ---- Re-exports for stable public API ----
pub use crate::api::{create_router as router, AppState};
pub use crate::config::GraphConfig;
pub use crate::error::{Result, TimelineError};
pub use crate::event::{Event, RawEvent};
pub use crate::timeline::{
    CarryState, Day, Interval, IntervalKind, LocalClock, WeekSummary, WeekTimeline,
    WeeklyAssembler,
};

/// Build the full in-process app from env/config files. Used by the binary
/// and by integration tests that want exactly what production serves.
pub fn app() -> anyhow::Result<axum::Router> {
    let state = AppState::from_env()?;
    Ok(api::create_router(state))
}
