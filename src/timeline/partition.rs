//! Buckets in-window events into the seven local calendar days of a week.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use std::cmp::Ordering;

use super::LocalClock;
use crate::event::Event;

pub const WEEK_DAYS: usize = 7;

/// An event projected onto its local day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayEvent {
    pub id: i64,
    pub hour: f64,
    pub is_on: bool,
    pub instant: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayBucket {
    pub date: NaiveDate,
    /// Sorted by local hour, then instant, then id.
    pub events: Vec<DayEvent>,
}

/// Exactly seven buckets, one per offset from the week start; empty days
/// are present with no events.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekBuckets {
    pub days: [DayBucket; WEEK_DAYS],
    /// In-window events whose local date matched none of the seven days
    /// (only possible when the week start is not local midnight).
    pub unplaced: usize,
}

/// Keep events in `[week_start, week_start + 7 days)` and group them by
/// local date.
pub fn partition_week(
    events: &[Event],
    week_start: DateTime<Utc>,
    clock: &LocalClock,
) -> WeekBuckets {
    let week_end = week_start + Duration::days(WEEK_DAYS as i64);
    let first = clock.day_key(week_start);

    let mut days: [DayBucket; WEEK_DAYS] = std::array::from_fn(|offset| DayBucket {
        date: first + Duration::days(offset as i64),
        events: Vec::new(),
    });
    let mut unplaced = 0usize;

    for ev in events
        .iter()
        .filter(|e| e.instant >= week_start && e.instant < week_end)
    {
        let key = clock.day_key(ev.instant);
        let offset = (key - first).num_days();
        match usize::try_from(offset).ok().filter(|o| *o < WEEK_DAYS) {
            Some(o) => days[o].events.push(DayEvent {
                id: ev.id,
                hour: clock.decimal_hour(ev.instant),
                is_on: ev.is_on,
                instant: ev.instant,
            }),
            None => {
                tracing::trace!(target: "timeline", id = ev.id, %key, "event outside week days");
                unplaced += 1;
            }
        }
    }

    for bucket in days.iter_mut() {
        bucket.events.sort_by(by_local_hour);
    }

    WeekBuckets { days, unplaced }
}

// Local hour first so a DST fall-back never moves the cursor backwards.
fn by_local_hour(a: &DayEvent, b: &DayEvent) -> Ordering {
    a.hour
        .total_cmp(&b.hour)
        .then(a.instant.cmp(&b.instant))
        .then(a.id.cmp(&b.id))
}
