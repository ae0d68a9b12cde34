//! # Events
//! State-change events as they arrive from the monitor feed, plus the
//! boundary parsing that turns wire timestamps into absolute instants.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::error::{Result, TimelineError};

/// One observed state flip. Immutable once parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub is_on: bool,
    pub instant: DateTime<Utc>,
}

impl Event {
    pub fn new(id: i64, is_on: bool, instant: DateTime<Utc>) -> Self {
        Self { id, is_on, instant }
    }
}

/// Engine total order: ascending instant, ties broken by ascending id.
/// Used with a stable sort, so exact duplicates keep arrival order.
pub fn chronological(a: &Event, b: &Event) -> Ordering {
    a.instant.cmp(&b.instant).then(a.id.cmp(&b.id))
}

/// Event exactly as posted by callers (`timestamp` is an RFC 3339 string).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEvent {
    pub id: i64,
    #[serde(default)]
    pub monitor_id: i64,
    pub is_online: bool,
    pub timestamp: String,
}

impl RawEvent {
    pub fn parse(&self) -> Result<Event> {
        let field = format!("events[id={}].timestamp", self.id);
        let instant = parse_instant(&field, &self.timestamp)?;
        Ok(Event::new(self.id, self.is_online, instant))
    }
}

/// Parse every raw event; the first malformed timestamp rejects the batch.
pub fn parse_all(raw: &[RawEvent]) -> Result<Vec<Event>> {
    raw.iter().map(RawEvent::parse).collect()
}

/// Parse an RFC 3339 instant (`Z` or numeric offset) into UTC.
pub fn parse_instant(field: &str, value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| TimelineError::InvalidTimestamp {
            field: field.to_string(),
            value: value.to_string(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ev(id: i64, is_on: bool, secs: i64) -> Event {
        Event::new(id, is_on, Utc.timestamp_opt(secs, 0).unwrap())
    }

    #[test]
    fn parses_zulu_and_offset_forms() {
        let a = parse_instant("t", "2026-02-09T00:00:00Z").unwrap();
        let b = parse_instant("t", "2026-02-09T02:00:00+02:00").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn malformed_timestamp_is_rejected_with_field_name() {
        let raw = RawEvent {
            id: 7,
            monitor_id: 1,
            is_online: true,
            timestamp: "2026-02-30 25:00".into(),
        };
        let err = raw.parse().unwrap_err();
        match err {
            TimelineError::InvalidTimestamp { field, value, .. } => {
                assert_eq!(field, "events[id=7].timestamp");
                assert_eq!(value, "2026-02-30 25:00");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn sort_is_by_instant_then_id() {
        let mut evs = vec![ev(3, true, 200), ev(2, false, 100), ev(1, true, 200)];
        evs.sort_by(chronological);
        let ids: Vec<i64> = evs.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn full_ties_keep_arrival_order() {
        let mut out = vec![ev(5, true, 100), ev(5, false, 100)];
        out.sort_by(chronological);
        assert!(out[0].is_on);
        assert!(!out[1].is_on);
    }
}
