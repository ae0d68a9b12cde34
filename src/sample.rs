//! Fixture week used by `/sample-week` and by tests: one pre-week ON event
//! so Monday starts known, then a realistic on/off pattern over four days.

use chrono::{DateTime, Duration, Utc};

use crate::event::Event;

// (day offset, hour, minute, is_on)
const PATTERN: [(i64, i64, i64, bool); 12] = [
    (0, 7, 30, false),
    (0, 11, 0, true),
    (0, 15, 45, false),
    (0, 18, 0, true),
    (1, 6, 0, false),
    (1, 10, 30, true),
    (2, 8, 0, false),
    (2, 12, 0, true),
    (2, 20, 0, false),
    (2, 22, 0, true),
    (3, 9, 0, false),
    (3, 13, 15, true),
];

pub fn sample_events(week_start: DateTime<Utc>) -> Vec<Event> {
    let mut out = Vec::with_capacity(PATTERN.len() + 1);
    out.push(Event::new(0, true, week_start - Duration::hours(4)));
    out.extend(PATTERN.iter().enumerate().map(|(i, &(day, h, m, on))| {
        let at = week_start + Duration::days(day) + Duration::hours(h) + Duration::minutes(m);
        Event::new(i as i64 + 1, on, at)
    }));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::{IntervalKind, WeeklyAssembler};
    use chrono::TimeZone;

    #[test]
    fn sample_week_reconstructs_expected_first_day() {
        let ws = Utc.with_ymd_and_hms(2026, 2, 8, 22, 0, 0).unwrap();
        let evs = sample_events(ws);
        assert_eq!(evs.len(), 13);

        let week = WeeklyAssembler::default().assemble(&evs, ws, ws + Duration::days(8));
        let mon = &week.days[0];
        assert_eq!(mon.intervals.len(), 5);
        assert_eq!(mon.intervals[0].kind, IntervalKind::On);
        assert_eq!(mon.hours_off, 5.75);
        assert_eq!(mon.hours_on, 18.25);
        // Thursday ends on, and the carry keeps Fri..Sun fully on.
        assert!(week.days[4..].iter().all(|d| d.hours_on == 24.0));
        assert_eq!(week.summary.outage_count, 6);
    }
}
