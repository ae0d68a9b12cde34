//! # Weekly assembly
//! Drives the per-day state machine across the seven days of a week and
//! applies the "future day" and "today cutoff" policies.
//!
//! Regimes per day, relative to the local date of `now`:
//! - after today: a single `Future` interval, the builder is not invoked;
//! - today: intervals up to the current local hour, `Future` afterwards;
//! - before today: the full 24 hours.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::segment::is_contiguous_day;
use super::{
    build_day_segments, format_hours, partition_week, resolve_initial_state, round2, Interval,
    IntervalKind, LocalClock, WeekSummary, HOURS_PER_DAY, WEEK_DAYS,
};
use crate::error::{Result, TimelineError};
use crate::event::Event;

/// Short weekday names, Monday first, used for day labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct DayNames([String; WEEK_DAYS]);

impl Default for DayNames {
    fn default() -> Self {
        Self(["ПН", "ВТ", "СР", "ЧТ", "ПТ", "СБ", "НД"].map(String::from))
    }
}

impl TryFrom<Vec<String>> for DayNames {
    type Error = TimelineError;

    fn try_from(names: Vec<String>) -> Result<Self> {
        let len = names.len();
        let trimmed: Vec<String> = names.into_iter().map(|n| n.trim().to_string()).collect();
        if trimmed.iter().any(String::is_empty) {
            return Err(TimelineError::InvalidDayNames(len));
        }
        let arr: [String; WEEK_DAYS] = trimmed
            .try_into()
            .map_err(|_| TimelineError::InvalidDayNames(len))?;
        Ok(Self(arr))
    }
}

impl From<DayNames> for Vec<String> {
    fn from(d: DayNames) -> Self {
        d.0.into()
    }
}

impl DayNames {
    /// `"ПН (09.02)"`: weekday name plus day and month.
    pub fn label(&self, date: NaiveDate) -> String {
        let name = &self.0[date.weekday().num_days_from_monday() as usize];
        format!("{} ({})", name, date.format("%d.%m"))
    }
}

/// One reconstructed local day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Day {
    pub date_label: String,
    pub date: NaiveDate,
    pub intervals: Vec<Interval>,
    pub hours_on: f64,
    pub hours_off: f64,
    /// `hours_on`/`hours_off` as display text, e.g. `"7год 30хв"`.
    pub hours_on_text: String,
    pub hours_off_text: String,
    /// No `On`/`Off` interval at all; consumers hide the day's stats.
    pub is_future_or_unknown: bool,
}

impl Day {
    fn from_intervals(date: NaiveDate, date_label: String, intervals: Vec<Interval>) -> Self {
        debug_assert!(is_contiguous_day(&intervals), "{intervals:?}");
        let sum_of = |kind: IntervalKind| {
            intervals
                .iter()
                .filter(|i| i.kind == kind)
                .map(Interval::duration)
                .sum::<f64>()
        };
        let hours_on = round2(sum_of(IntervalKind::On));
        let hours_off = round2(sum_of(IntervalKind::Off));
        let is_future_or_unknown = !intervals.iter().any(|i| i.kind.is_observed());

        Self {
            date_label,
            date,
            intervals,
            hours_on,
            hours_off,
            hours_on_text: format_hours(hours_on),
            hours_off_text: format_hours(hours_off),
            is_future_or_unknown,
        }
    }
}

/// The seven days plus the derived week totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekTimeline {
    pub days: Vec<Day>,
    pub summary: WeekSummary,
}

#[derive(Debug, Clone, Default)]
pub struct WeeklyAssembler {
    clock: LocalClock,
    day_names: DayNames,
}

impl WeeklyAssembler {
    pub fn new(clock: LocalClock, day_names: DayNames) -> Self {
        Self { clock, day_names }
    }

    pub fn clock(&self) -> &LocalClock {
        &self.clock
    }

    /// Reconstruct the week beginning at `week_start` as seen at `now`.
    ///
    /// Pure: identical inputs give identical output.
    pub fn assemble(
        &self,
        events: &[Event],
        week_start: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> WeekTimeline {
        let initial = resolve_initial_state(events, week_start);
        let buckets = partition_week(events, week_start, &self.clock);
        let today = self.clock.day_key(now);
        let now_hour = self.clock.decimal_hour(now);

        tracing::debug!(
            target: "timeline",
            events = events.len(),
            unplaced = buckets.unplaced,
            ?initial,
            %today,
            "assembling week"
        );

        let mut carry = initial;
        let mut days = Vec::with_capacity(WEEK_DAYS);

        for bucket in buckets.days.iter() {
            let label = self.day_names.label(bucket.date);

            let intervals = match bucket.date.cmp(&today) {
                Ordering::Greater => {
                    vec![Interval::new(0.0, HOURS_PER_DAY, IntervalKind::Future)]
                }
                Ordering::Equal => {
                    let seg = build_day_segments(&bucket.events, carry, Some(now_hour));
                    carry = seg.carry;
                    seg.intervals
                }
                Ordering::Less => {
                    let seg = build_day_segments(&bucket.events, carry, None);
                    carry = seg.carry;
                    seg.intervals
                }
            };

            days.push(Day::from_intervals(bucket.date, label, intervals));
        }

        tracing::trace!(target: "timeline", final_carry = ?carry, "week assembled");

        let summary = WeekSummary::from_days(&days);
        WeekTimeline { days, summary }
    }
}
