//! # Interval Reconstruction Engine
//! Pure logic that turns a sparse, unordered list of on/off events into a
//! gap-free, local-time timeline of seven days. No I/O; "now" is always an
//! explicit argument so every call is reproducible.
//!
//! Pipeline: [`initial`] resolves the state in force before the week,
//! [`partition`] buckets in-window events by local day, [`segment`] runs the
//! per-day state machine and [`week`] drives it across the seven days.
//! [`summary`] derives the week-level totals consumers display.

pub mod clock;
pub mod initial;
pub mod partition;
pub mod segment;
pub mod summary;
pub mod week;

use serde::{Deserialize, Serialize};

pub use clock::LocalClock;
pub use initial::resolve_initial_state;
pub use partition::{partition_week, DayBucket, DayEvent, WeekBuckets, WEEK_DAYS};
pub use segment::{build_day_segments, DaySegments};
pub use summary::{format_hours, WeekSummary};
pub use week::{Day, DayNames, WeekTimeline, WeeklyAssembler};

pub const HOURS_PER_DAY: f64 = 24.0;

/// What an interval says about the monitored resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntervalKind {
    On,
    Off,
    /// No event has ever established a state for this span.
    Unknown,
    /// The span lies after "now".
    Future,
}

impl IntervalKind {
    /// `On`/`Off` are observed data; the rest are placeholders.
    pub fn is_observed(self) -> bool {
        matches!(self, IntervalKind::On | IntervalKind::Off)
    }
}

/// Half-open span `[start, end)` in local decimal hours of one day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub start: f64,
    pub end: f64,
    pub kind: IntervalKind,
}

impl Interval {
    pub fn new(start: f64, end: f64, kind: IntervalKind) -> Self {
        Self { start, end, kind }
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// State in force at a day boundary.
///
/// `Unresolved` means the subject has no history yet; it is carried across
/// days untouched until the first real event arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CarryState {
    #[default]
    Unresolved,
    On,
    Off,
}

impl CarryState {
    pub fn interval_kind(self) -> IntervalKind {
        match self {
            CarryState::Unresolved => IntervalKind::Unknown,
            CarryState::On => IntervalKind::On,
            CarryState::Off => IntervalKind::Off,
        }
    }

    pub fn is_resolved(self) -> bool {
        !matches!(self, CarryState::Unresolved)
    }
}

impl From<bool> for CarryState {
    fn from(is_on: bool) -> Self {
        if is_on {
            CarryState::On
        } else {
            CarryState::Off
        }
    }
}

/// Round to two decimals, ties to even. Applied once, when a `Day`
/// aggregate is produced.
pub(crate) fn round2(v: f64) -> f64 {
    (v * 100.0).round_ties_even() / 100.0
}
